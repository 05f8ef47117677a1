//! Crop profiles: the read-only reference data used to look up base seeding rates and standard
//! seed sizes.
use crate::id::define_id_type;
use crate::units::SeedRate;
use indexmap::IndexMap;
use serde_string_enum::DeserializeLabeledStringEnum;

define_id_type! {CropID}
define_id_type! {RegionID}

/// Number of seeds which are weighed to give the thousand-seed weight
const SEEDS_PER_TKW: f64 = 1000.0;

/// Grams in a kilogram
const GRAMS_PER_KG: f64 = 1000.0;

/// A map of [`CropProfile`]s, keyed by crop ID
pub type CropProfileMap = IndexMap<CropID, CropProfile>;

/// Reference data for a single crop
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfile {
    /// A unique identifier for the crop (e.g. "wheat")
    pub id: CropID,
    /// A human-readable description of the crop
    pub description: String,
    /// The standard thousand-seed weight in grams, if known
    pub standard_tkw: Option<f64>,
    /// Base seeding rates for each region in which the crop has reference data.
    ///
    /// A rate of zero indicates the crop is not grown in that region.
    pub base_rates: IndexMap<RegionID, SeedRate>,
}

impl CropProfile {
    /// The standard number of seeds per kilogram, derived from the standard thousand-seed weight
    pub fn standard_seeds_per_kg(&self) -> Option<f64> {
        self.standard_tkw.map(|tkw| SEEDS_PER_TKW * GRAMS_PER_KG / tkw)
    }

    /// Get the base seeding rate for the given region.
    ///
    /// Returns `None` if the region is absent or the crop is not grown there.
    pub fn base_rate(&self, region_id: &RegionID) -> Option<SeedRate> {
        self.base_rates
            .get(region_id)
            .copied()
            .filter(|rate| *rate > SeedRate(0.0))
    }
}

/// The unit in which base seeding rates (and hence results) are expressed
#[derive(DeserializeLabeledStringEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateUnit {
    /// Seeds per hectare of field
    #[default]
    #[string = "seeds_per_hectare"]
    SeedsPerHectare,
    /// Seeds per metre of row
    #[string = "seeds_per_metre"]
    SeedsPerMetre,
}

impl RateUnit {
    /// A short label for displaying alongside a rate
    pub fn label(self) -> &'static str {
        match self {
            Self::SeedsPerHectare => "seeds/ha",
            Self::SeedsPerMetre => "seeds/m",
        }
    }
}

/// A versioned table of crop profiles
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfileTable {
    /// The version of the reference data (e.g. "2024.1")
    pub version: String,
    /// The unit in which the base rates are given
    pub rate_unit: RateUnit,
    /// The crop profiles, keyed by crop ID
    pub crops: CropProfileMap,
}

impl CropProfileTable {
    /// Look up a crop's profile by its ID
    pub fn get(&self, crop_id: &CropID) -> Option<&CropProfile> {
        self.crops.get(crop_id)
    }

    /// Look up the base rate for a crop in a region.
    ///
    /// Returns `None` if there is no data for this combination or the base rate is zero.
    pub fn base_rate(&self, crop_id: &CropID, region_id: &RegionID) -> Option<SeedRate> {
        self.get(crop_id)?.base_rate(region_id)
    }

    /// All regions referenced by the table, in order of first appearance
    pub fn region_ids(&self) -> impl Iterator<Item = &RegionID> {
        let mut seen = indexmap::IndexSet::new();
        for crop in self.crops.values() {
            seen.extend(crop.base_rates.keys());
        }
        seen.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::crop_table;
    use float_cmp::assert_approx_eq;
    use itertools::Itertools;
    use rstest::rstest;

    #[rstest]
    fn test_standard_seeds_per_kg(crop_table: CropProfileTable) {
        let wheat = crop_table.get(&"wheat".into()).unwrap();
        assert_approx_eq!(f64, wheat.standard_seeds_per_kg().unwrap(), 25_000.0);
    }

    #[test]
    fn test_standard_seeds_per_kg_missing() {
        let crop = CropProfile {
            id: "mystery".into(),
            description: String::new(),
            standard_tkw: None,
            base_rates: IndexMap::new(),
        };
        assert!(crop.standard_seeds_per_kg().is_none());
    }

    #[rstest]
    #[case("wheat", "australia", Some(200_000.0))]
    #[case("wheat", "canada", Some(250_000.0))]
    #[case("soybean", "australia", None)] // Explicit zero
    #[case("soybean", "antarctica", None)] // Unknown region
    #[case("quinoa", "australia", None)] // Unknown crop
    fn test_base_rate(
        crop_table: CropProfileTable,
        #[case] crop: &str,
        #[case] region: &str,
        #[case] expected: Option<f64>,
    ) {
        assert_eq!(
            crop_table.base_rate(&crop.into(), &region.into()),
            expected.map(SeedRate)
        );
    }

    #[rstest]
    fn test_region_ids(crop_table: CropProfileTable) {
        let regions = crop_table.region_ids().map(RegionID::as_str).collect_vec();
        assert_eq!(regions, ["australia", "canada"]);
    }

    #[test]
    fn test_rate_unit_label() {
        assert_eq!(RateUnit::SeedsPerHectare.label(), "seeds/ha");
        assert_eq!(RateUnit::SeedsPerMetre.label(), "seeds/m");
    }
}
