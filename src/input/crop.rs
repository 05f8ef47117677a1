//! Code for reading crop reference data.
use super::*;
use crate::crop::{CropID, CropProfile, CropProfileMap, CropProfileTable, RateUnit, RegionID};
use crate::id::IDCollection;
use crate::units::SeedRate;
use crate::validation::normalise_name;
use anyhow::{Context, Result, ensure};
use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::Deserialize;
use std::path::Path;

const REFERENCE_FILE_NAME: &str = "reference.toml";
const CROPS_FILE_NAME: &str = "crops.csv";
const BASE_RATES_FILE_NAME: &str = "base_rates.csv";

const BUILT_IN_REFERENCE: &str = include_str!("../../data/reference/reference.toml");
const BUILT_IN_CROPS: &str = include_str!("../../data/reference/crops.csv");
const BUILT_IN_BASE_RATES: &str = include_str!("../../data/reference/base_rates.csv");

/// Top-level information about a set of reference data
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ReferenceMetadata {
    version: String,
    #[serde(default)]
    rate_unit: RateUnit,
}

#[derive(Debug, Deserialize, PartialEq)]
struct CropRaw {
    id: String,
    description: String,
    standard_tkw: Option<f64>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct BaseRateRaw {
    crop_id: String,
    region_id: String,
    base_rate: f64,
}

/// Load the crop reference data for a scenario directory.
///
/// If the directory contains a `reference.toml` file, the reference data is read from the
/// directory; otherwise the built-in reference data is used.
pub fn load_crop_profile_table(scenario_dir: &Path) -> Result<CropProfileTable> {
    if scenario_dir.join(REFERENCE_FILE_NAME).is_file() {
        read_crop_profile_table(scenario_dir)
    } else {
        debug!("Using built-in crop reference data");
        built_in_crop_profile_table()
    }
}

/// Read crop reference data from the files in the specified directory
pub fn read_crop_profile_table(dir: &Path) -> Result<CropProfileTable> {
    let metadata: ReferenceMetadata = read_toml(&dir.join(REFERENCE_FILE_NAME))?;
    let crops = read_csv(&dir.join(CROPS_FILE_NAME))?;
    let base_rates_path = dir.join(BASE_RATES_FILE_NAME);
    let base_rates = read_csv(&base_rates_path)?;

    build_crop_profile_table(metadata, crops, base_rates)
        .with_context(|| format!("Invalid crop reference data in {}", dir.display()))
}

/// The crop reference data which is compiled into the program
pub fn built_in_crop_profile_table() -> Result<CropProfileTable> {
    let metadata: ReferenceMetadata = toml::from_str(BUILT_IN_REFERENCE)?;
    let crops = read_csv_from_reader(BUILT_IN_CROPS.as_bytes())?;
    let base_rates = read_csv_from_reader(BUILT_IN_BASE_RATES.as_bytes())?;

    build_crop_profile_table(metadata, crops, base_rates)
        .context("Invalid built-in crop reference data")
}

/// Assemble and validate a [`CropProfileTable`] from raw data
fn build_crop_profile_table(
    metadata: ReferenceMetadata,
    crops: Vec<CropRaw>,
    base_rates: Vec<BaseRateRaw>,
) -> Result<CropProfileTable> {
    ensure!(
        !metadata.version.trim().is_empty(),
        "Reference data version cannot be empty"
    );

    let mut profiles = CropProfileMap::new();
    for crop in crops {
        // IDs are matched against user input, which is normalised the same way
        let id = CropID::from(normalise_name(&crop.id));
        ensure!(!id.as_str().is_empty(), "Crop ID cannot be empty");
        if let Some(tkw) = crop.standard_tkw {
            ensure!(
                tkw.is_finite() && tkw > 0.0,
                "Standard thousand-seed weight for {id} must be a finite number greater than zero"
            );
        }

        let profile = CropProfile {
            id: id.clone(),
            description: crop.description,
            standard_tkw: crop.standard_tkw,
            base_rates: IndexMap::new(),
        };
        ensure!(
            profiles.insert(id.clone(), profile).is_none(),
            "Duplicate crop ID: {id}"
        );
    }

    let crop_ids: IndexSet<CropID> = profiles.keys().cloned().collect();
    for rate in base_rates {
        let crop_id = crop_ids.get_id(&normalise_name(&rate.crop_id))?;
        let region_id = RegionID::from(normalise_name(&rate.region_id));
        ensure!(!region_id.as_str().is_empty(), "Region ID cannot be empty");
        ensure!(
            rate.base_rate.is_finite() && rate.base_rate >= 0.0,
            "Base rate for {crop_id} in {region_id} must be a finite, non-negative number"
        );

        let profile = &mut profiles[&crop_id];
        ensure!(
            profile
                .base_rates
                .insert(region_id.clone(), SeedRate(rate.base_rate))
                .is_none(),
            "Duplicate base rate for {crop_id} in {region_id}"
        );
    }

    Ok(CropProfileTable {
        version: metadata.version,
        rate_unit: metadata.rate_unit,
        crops: profiles,
    })
}
