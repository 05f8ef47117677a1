//! The seeding rate calculator.
//!
//! A calculation looks up the base seeding rate for a crop and region, multiplies it by a chain of
//! independent adjustment factors and then corrects for the expected germination rate. It is a pure
//! function of its input and the (read-only) crop reference data.
use crate::adjustment::{
    MAX_GERMINATION_RATE, MAX_TRASH_LEVEL, MIN_GERMINATION_RATE, SoilType, WeedPressure, absolute_tkw_factor,
    adjust_germination_rate, moisture_depth_factor, relative_difference, relative_tkw_factor,
    seeds_per_kg_factor, soil_type_factor, trash_level_factor, weed_pressure_factor,
};
use crate::crop::{CropID, CropProfileTable, RegionID};
use crate::input::{input_err_msg, read_toml};
use crate::units::{Dimensionless, SeedRate};
use anyhow::{Context, Result, ensure};
use log::{debug, info};
use serde::Deserialize;
use serde_string_enum::DeserializeLabeledStringEnum;
use std::path::Path;
use thiserror::Error;

/// The name of the file in a scenario directory which sets calculator options
const OPTIONS_FILE_NAME: &str = "options.toml";

/// How seed size is measured and compared against the crop's standard
#[derive(DeserializeLabeledStringEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSizePolicy {
    /// Thousand-seed weight, compared against a ±10% band around the crop's standard
    #[default]
    #[string = "relative_tkw"]
    RelativeTkw,
    /// Thousand-seed weight, compared against fixed 35 g and 45 g thresholds
    #[string = "absolute_tkw"]
    AbsoluteTkw,
    /// Seeds per kilogram, compared against a ±10% band around the crop's standard
    #[string = "seeds_per_kg"]
    SeedsPerKg,
}

impl SeedSizePolicy {
    /// Interpret a raw seed-size measurement according to this policy
    pub fn seed_size(self, value: f64) -> SeedSize {
        match self {
            Self::RelativeTkw | Self::AbsoluteTkw => SeedSize::ThousandSeedWeight(value),
            Self::SeedsPerKg => SeedSize::SeedsPerKg(value),
        }
    }
}

/// A measurement of seed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedSize {
    /// Mass of 1000 seeds in grams
    ThousandSeedWeight(f64),
    /// Number of seeds in a kilogram
    SeedsPerKg(f64),
}

impl SeedSize {
    /// The raw measured value
    pub fn value(self) -> f64 {
        match self {
            Self::ThousandSeedWeight(value) | Self::SeedsPerKg(value) => value,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Options controlling which variant of the calculation is performed
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorOptions {
    /// How seed size is measured and compared against the standard
    #[serde(default)]
    pub seed_size_policy: SeedSizePolicy,
    /// Whether to divide by the germination rate to compensate for seeds which do not germinate
    #[serde(default = "default_true")]
    pub germination_correction: bool,
    /// Whether to adjust the germination rate according to seed size.
    ///
    /// Only possible with the `seeds_per_kg` policy.
    #[serde(default)]
    pub germination_feedback: bool,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            seed_size_policy: SeedSizePolicy::default(),
            germination_correction: true,
            germination_feedback: false,
        }
    }
}

impl CalculatorOptions {
    /// Read calculator options from a scenario directory.
    ///
    /// If the options file is not present, default options are used.
    pub fn from_path<P: AsRef<Path>>(scenario_dir: P) -> Result<CalculatorOptions> {
        let file_path = scenario_dir.as_ref().join(OPTIONS_FILE_NAME);
        if !file_path.is_file() {
            info!("No {OPTIONS_FILE_NAME} found; using default calculator options");
            return Ok(CalculatorOptions::default());
        }

        let options: CalculatorOptions = read_toml(&file_path)?;
        options
            .validate()
            .with_context(|| input_err_msg(&file_path))?;

        Ok(options)
    }

    /// Check that the combination of options is valid
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.germination_feedback || self.seed_size_policy == SeedSizePolicy::SeedsPerKg,
            "germination_feedback requires the seeds_per_kg seed size policy"
        );
        ensure!(
            !self.germination_feedback || self.germination_correction,
            "germination_feedback has no effect unless germination_correction is enabled"
        );

        Ok(())
    }
}

/// The inputs for a single seeding rate calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    /// The crop to be sown
    pub crop_id: CropID,
    /// The region in which it is to be sown
    pub region_id: RegionID,
    /// The size of the seed being sown
    pub seed_size: SeedSize,
    /// Expected germination rate (%)
    pub germination_rate: f64,
    /// Depth (cm) at which the seed will reach soil moisture
    pub moisture_depth: f64,
    /// Soil type, or `None` if it was not recognised
    pub soil_type: Option<SoilType>,
    /// Percentage of the soil surface covered by residue
    pub trash_level: f64,
    /// Competing-seed pressure, or `None` if it was not recognised
    pub weed_pressure: Option<WeedPressure>,
}

/// The adjustment factors applied in a calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentFactors {
    /// Seed size factor
    pub seed_size: Dimensionless,
    /// Moisture depth factor
    pub moisture_depth: Dimensionless,
    /// Soil type factor
    pub soil_type: Dimensionless,
    /// Trash/residue level factor
    pub trash_level: Dimensionless,
    /// Competing-seed pressure factor
    pub weed_pressure: Dimensionless,
}

impl AdjustmentFactors {
    /// The combined effect of all factors
    pub fn combined(&self) -> Dimensionless {
        [
            self.seed_size,
            self.moisture_depth,
            self.soil_type,
            self.trash_level,
            self.weed_pressure,
        ]
        .into_iter()
        .product()
    }
}

/// The outcome of a successful calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    /// The recommended seeding rate, in whole seeds per unit area or length
    pub seeding_rate: u64,
    /// The germination rate (%) used, if it was adjusted for seed size
    pub adjusted_germination_rate: Option<f64>,
    /// The base rate for the crop and region
    pub base_rate: SeedRate,
    /// The adjustment factors which were applied
    pub factors: AdjustmentFactors,
}

/// Reasons a calculation cannot produce a seeding rate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// There is no base rate for this crop in this region
    #[error("No base seeding rate is available for {crop} in {region}")]
    UnknownCropRegion {
        /// The requested crop
        crop: CropID,
        /// The requested region
        region: RegionID,
    },
    /// The input would give a meaningless result
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The seed-size factor along with the deviation it was computed from
struct SeedSizeAdjustment {
    factor: Dimensionless,
    /// Percentage difference in seeds per kilogram from standard (seeds-per-kg policy only)
    percentage_difference: Option<f64>,
}

/// Computes seeding rates using a crop reference table
#[derive(Debug, Clone, Copy)]
pub struct Calculator<'a> {
    table: &'a CropProfileTable,
    options: CalculatorOptions,
}

impl<'a> Calculator<'a> {
    /// Create a new calculator, checking that the options are valid
    pub fn new(table: &'a CropProfileTable, options: CalculatorOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { table, options })
    }

    /// The options used by this calculator
    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    /// Calculate the seeding rate for the given input
    pub fn compute(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, CalculationError> {
        self.check_input(input)?;

        let base_rate = self
            .table
            .base_rate(&input.crop_id, &input.region_id)
            .ok_or_else(|| CalculationError::UnknownCropRegion {
                crop: input.crop_id.clone(),
                region: input.region_id.clone(),
            })?;

        let seed_size = self.seed_size_adjustment(input);
        let factors = AdjustmentFactors {
            seed_size: seed_size.factor,
            moisture_depth: moisture_depth_factor(input.moisture_depth),
            soil_type: soil_type_factor(input.soil_type),
            trash_level: trash_level_factor(input.trash_level),
            weed_pressure: weed_pressure_factor(input.weed_pressure),
        };
        debug!(
            "Factors for {} in {}: {factors:?}",
            input.crop_id, input.region_id
        );

        let mut rate = base_rate * factors.combined();

        let mut adjusted_germination_rate = None;
        if self.options.germination_correction {
            let mut germination_rate = input.germination_rate;
            if self.options.germination_feedback {
                let percentage_difference = seed_size.percentage_difference.unwrap_or(0.0);
                germination_rate = adjust_germination_rate(germination_rate, percentage_difference);
                adjusted_germination_rate = Some(germination_rate);
            }
            rate = rate / Dimensionless(germination_rate / 100.0);
        }

        Ok(CalculationResult {
            seeding_rate: rate.round_to_count(),
            adjusted_germination_rate,
            base_rate,
            factors,
        })
    }

    /// Reject inputs which would give infinite, negative or otherwise meaningless rates
    fn check_input(&self, input: &CalculationInput) -> Result<(), CalculationError> {
        let germination = input.germination_rate;
        if !(MIN_GERMINATION_RATE..=MAX_GERMINATION_RATE).contains(&germination) {
            return Err(CalculationError::InvalidInput(format!(
                "germination rate must be between {MIN_GERMINATION_RATE} and \
                {MAX_GERMINATION_RATE}%, got {germination}"
            )));
        }

        let seed_size = input.seed_size.value();
        if !(seed_size.is_finite() && seed_size > 0.0) {
            return Err(CalculationError::InvalidInput(format!(
                "seed size must be a finite number greater than zero, got {seed_size}"
            )));
        }

        let depth = input.moisture_depth;
        if !(depth.is_finite() && depth >= 0.0) {
            return Err(CalculationError::InvalidInput(format!(
                "moisture depth must be a finite, non-negative number, got {depth}"
            )));
        }

        let trash_level = input.trash_level;
        if !(0.0..=MAX_TRASH_LEVEL).contains(&trash_level) {
            return Err(CalculationError::InvalidInput(format!(
                "trash level must be between 0 and {MAX_TRASH_LEVEL}%, got {trash_level}"
            )));
        }

        if self.options.seed_size_policy.seed_size(seed_size) != input.seed_size {
            return Err(CalculationError::InvalidInput(format!(
                "seed size measure {:?} does not match the seed size policy {:?}",
                input.seed_size, self.options.seed_size_policy
            )));
        }

        Ok(())
    }

    /// Compute the seed-size factor for the configured policy
    fn seed_size_adjustment(&self, input: &CalculationInput) -> SeedSizeAdjustment {
        let profile = self.table.get(&input.crop_id);
        let value = input.seed_size.value();
        match self.options.seed_size_policy {
            SeedSizePolicy::RelativeTkw => SeedSizeAdjustment {
                factor: relative_tkw_factor(value, profile.and_then(|p| p.standard_tkw)),
                percentage_difference: None,
            },
            SeedSizePolicy::AbsoluteTkw => SeedSizeAdjustment {
                factor: absolute_tkw_factor(value),
                percentage_difference: None,
            },
            SeedSizePolicy::SeedsPerKg => {
                let difference = profile
                    .and_then(|p| p.standard_seeds_per_kg())
                    .map(|standard| relative_difference(value, standard));
                SeedSizeAdjustment {
                    factor: seeds_per_kg_factor(difference),
                    percentage_difference: difference.map(|diff| diff * 100.0),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, crop_table, wheat_input};
    use float_cmp::assert_approx_eq;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::tempdir;

    #[fixture]
    fn feedback_options() -> CalculatorOptions {
        CalculatorOptions {
            seed_size_policy: SeedSizePolicy::SeedsPerKg,
            germination_correction: true,
            germination_feedback: true,
        }
    }

    /// Wheat input using seeds per kilogram rather than thousand-seed weight
    fn wheat_input_per_kg(wheat_input: CalculationInput, seeds_per_kg: f64) -> CalculationInput {
        CalculationInput {
            seed_size: SeedSize::SeedsPerKg(seeds_per_kg),
            germination_rate: 90.0,
            ..wheat_input
        }
    }

    #[rstest]
    fn test_compute_standard_wheat(crop_table: CropProfileTable, wheat_input: CalculationInput) {
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        let result = calculator.compute(&wheat_input).unwrap();
        assert_eq!(result.seeding_rate, 210_526);
        assert_eq!(result.adjusted_germination_rate, None);
        assert_eq!(result.base_rate, SeedRate(200_000.0));
        assert_approx_eq!(Dimensionless, result.factors.combined(), Dimensionless(1.0));
    }

    #[rstest]
    fn test_compute_is_deterministic(crop_table: CropProfileTable, wheat_input: CalculationInput) {
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        let first = calculator.compute(&wheat_input).unwrap();
        for _ in 0..10 {
            assert_eq!(calculator.compute(&wheat_input).unwrap(), first);
        }
    }

    #[rstest]
    fn test_compute_all_factors(crop_table: CropProfileTable, wheat_input: CalculationInput) {
        let input = CalculationInput {
            crop_id: "barley".into(),
            region_id: "canada".into(),
            seed_size: SeedSize::ThousandSeedWeight(38.0),
            germination_rate: 90.0,
            moisture_depth: 4.0,
            soil_type: Some(SoilType::Sandy),
            trash_level: 45.0,
            weed_pressure: Some(WeedPressure::Moderate),
        };
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        let result = calculator.compute(&input).unwrap();

        // 225000 * 1.05 * 1.10 * 1.10 * 1.05 * 1.05 / 0.9
        assert_eq!(result.seeding_rate, 350_182);
        assert_eq!(
            result.factors,
            AdjustmentFactors {
                seed_size: Dimensionless(1.05),
                moisture_depth: Dimensionless(1.10),
                soil_type: Dimensionless(1.10),
                trash_level: Dimensionless(1.05),
                weed_pressure: Dimensionless(1.05),
            }
        );

        // Reducing inputs
        let input = CalculationInput {
            crop_id: "canola".into(),
            seed_size: SeedSize::ThousandSeedWeight(3.5),
            germination_rate: 80.0,
            moisture_depth: 12.0,
            soil_type: Some(SoilType::Clay),
            trash_level: 70.0,
            weed_pressure: Some(WeedPressure::High),
            ..wheat_input
        };
        let result = calculator.compute(&input).unwrap();

        // 5000000 * 0.95 * 0.95 * 0.95 * 1.10 * 1.10 / 0.8
        assert_eq!(result.seeding_rate, 6_483_898);
    }

    #[rstest]
    fn test_compute_unrecognised_categories(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
    ) {
        let input = CalculationInput {
            soil_type: None,
            weed_pressure: None,
            ..wheat_input
        };
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        assert_eq!(calculator.compute(&input).unwrap().seeding_rate, 210_526);
    }

    #[rstest]
    #[case("soybean", "australia")] // Explicit zero
    #[case("chickpeas", "canada")] // Explicit zero
    #[case("wheat", "antarctica")] // Unknown region
    #[case("quinoa", "australia")] // Unknown crop
    fn test_compute_unknown_crop_region(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
        #[case] crop: &str,
        #[case] region: &str,
    ) {
        let input = CalculationInput {
            crop_id: crop.into(),
            region_id: region.into(),
            ..wheat_input
        };
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        assert_eq!(
            calculator.compute(&input).unwrap_err(),
            CalculationError::UnknownCropRegion {
                crop: crop.into(),
                region: region.into(),
            }
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.5)]
    #[case(100.1)]
    #[case(f64::NAN)]
    fn test_compute_invalid_germination(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
        #[case] germination_rate: f64,
    ) {
        let input = CalculationInput {
            germination_rate,
            ..wheat_input
        };
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        assert!(matches!(
            calculator.compute(&input),
            Err(CalculationError::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-40.0)]
    #[case(f64::INFINITY)]
    fn test_compute_invalid_seed_size(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
        #[case] tkw: f64,
    ) {
        let input = CalculationInput {
            seed_size: SeedSize::ThousandSeedWeight(tkw),
            ..wheat_input
        };
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        assert!(matches!(
            calculator.compute(&input),
            Err(CalculationError::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(-50.0)]
    #[case(f64::INFINITY)]
    fn test_compute_invalid_moisture_depth(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
        #[case] moisture_depth: f64,
    ) {
        let input = CalculationInput {
            moisture_depth,
            ..wheat_input
        };
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        assert!(matches!(
            calculator.compute(&input),
            Err(CalculationError::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(-0.1)]
    #[case(100.5)]
    fn test_compute_invalid_trash_level(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
        #[case] trash_level: f64,
    ) {
        let input = CalculationInput {
            trash_level,
            ..wheat_input
        };
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        assert!(matches!(
            calculator.compute(&input),
            Err(CalculationError::InvalidInput(_))
        ));
    }

    #[rstest]
    fn test_compute_mismatched_seed_size(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
    ) {
        let input = wheat_input_per_kg(wheat_input, 25_000.0);
        let calculator = Calculator::new(&crop_table, CalculatorOptions::default()).unwrap();
        assert!(matches!(
            calculator.compute(&input),
            Err(CalculationError::InvalidInput(_))
        ));
    }

    #[rstest]
    fn test_compute_absolute_tkw(crop_table: CropProfileTable, wheat_input: CalculationInput) {
        let options = CalculatorOptions {
            seed_size_policy: SeedSizePolicy::AbsoluteTkw,
            ..CalculatorOptions::default()
        };
        let calculator = Calculator::new(&crop_table, options).unwrap();

        // Canola seeds are tiny, so the absolute thresholds always count them as small
        let input = CalculationInput {
            crop_id: "canola".into(),
            seed_size: SeedSize::ThousandSeedWeight(3.0),
            germination_rate: 100.0,
            ..wheat_input
        };
        let result = calculator.compute(&input).unwrap();
        assert_eq!(result.factors.seed_size, Dimensionless(1.05));
        assert_eq!(result.seeding_rate, 5_250_000);
    }

    #[rstest]
    fn test_compute_without_germination_correction(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
    ) {
        let options = CalculatorOptions {
            germination_correction: false,
            ..CalculatorOptions::default()
        };
        let calculator = Calculator::new(&crop_table, options).unwrap();
        assert_eq!(calculator.compute(&wheat_input).unwrap().seeding_rate, 200_000);
    }

    #[rstest]
    #[case(25_000.0, 1.0, 90.0, 222_222)] // Standard
    #[case(27_500.0, 1.0, 85.0, 235_294)] // At the band boundary: factor unchanged, 5 point drop
    #[case(20_000.0, 0.95, 94.0, 202_128)]
    #[case(40_000.0, 1.05, 80.0, 262_500)] // Decrease capped at 10 points
    fn test_compute_germination_feedback(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
        feedback_options: CalculatorOptions,
        #[case] seeds_per_kg: f64,
        #[case] expected_factor: f64,
        #[case] expected_germination: f64,
        #[case] expected_rate: u64,
    ) {
        let calculator = Calculator::new(&crop_table, feedback_options).unwrap();
        let result = calculator
            .compute(&wheat_input_per_kg(wheat_input, seeds_per_kg))
            .unwrap();
        assert_eq!(result.factors.seed_size, Dimensionless(expected_factor));
        assert_approx_eq!(
            f64,
            result.adjusted_germination_rate.unwrap(),
            expected_germination
        );
        assert_eq!(result.seeding_rate, expected_rate);
    }

    #[rstest]
    fn test_compute_germination_feedback_rerun(
        crop_table: CropProfileTable,
        wheat_input: CalculationInput,
        feedback_options: CalculatorOptions,
    ) {
        let input = wheat_input_per_kg(wheat_input, 31_000.0);
        let with_feedback = Calculator::new(&crop_table, feedback_options)
            .unwrap()
            .compute(&input)
            .unwrap();

        // Feeding the adjusted germination rate back in without feedback should give the same rate
        let options = CalculatorOptions {
            germination_feedback: false,
            ..feedback_options
        };
        let input = CalculationInput {
            germination_rate: with_feedback.adjusted_germination_rate.unwrap(),
            ..input
        };
        let without_feedback = Calculator::new(&crop_table, options)
            .unwrap()
            .compute(&input)
            .unwrap();
        assert_eq!(without_feedback.seeding_rate, with_feedback.seeding_rate);
    }

    #[rstest]
    fn test_compute_seeds_per_kg_no_standard(
        mut crop_table: CropProfileTable,
        wheat_input: CalculationInput,
        feedback_options: CalculatorOptions,
    ) {
        crop_table.crops.get_mut("wheat").unwrap().standard_tkw = None;
        let calculator = Calculator::new(&crop_table, feedback_options).unwrap();
        let result = calculator
            .compute(&wheat_input_per_kg(wheat_input, 50_000.0))
            .unwrap();
        assert_eq!(result.factors.seed_size, Dimensionless(1.0));
        assert_approx_eq!(f64, result.adjusted_germination_rate.unwrap(), 90.0);
    }

    #[rstest]
    fn test_calculator_new_invalid_options(crop_table: CropProfileTable) {
        let options = CalculatorOptions {
            germination_feedback: true,
            ..CalculatorOptions::default()
        };
        assert_error!(
            Calculator::new(&crop_table, options),
            "germination_feedback requires the seeds_per_kg seed size policy"
        );

        let options = CalculatorOptions {
            seed_size_policy: SeedSizePolicy::SeedsPerKg,
            germination_correction: false,
            germination_feedback: true,
        };
        assert_error!(
            Calculator::new(&crop_table, options),
            "germination_feedback has no effect unless germination_correction is enabled"
        );
    }

    #[test]
    fn test_options_from_path_missing_file() {
        let dir = tempdir().unwrap();
        assert_eq!(
            CalculatorOptions::from_path(dir.path()).unwrap(),
            CalculatorOptions::default()
        );
    }

    #[test]
    fn test_options_from_path() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(OPTIONS_FILE_NAME),
            "seed_size_policy = \"seeds_per_kg\"\ngermination_feedback = true\n",
        )
        .unwrap();
        assert_eq!(
            CalculatorOptions::from_path(dir.path()).unwrap(),
            CalculatorOptions {
                seed_size_policy: SeedSizePolicy::SeedsPerKg,
                germination_correction: true,
                germination_feedback: true,
            }
        );
    }

    #[test]
    fn test_options_from_path_invalid() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(OPTIONS_FILE_NAME),
            "germination_feedback = true\n",
        )
        .unwrap();
        assert!(CalculatorOptions::from_path(dir.path()).is_err());
    }

    #[rstest]
    #[case("relative_tkw", SeedSizePolicy::RelativeTkw)]
    #[case("absolute_tkw", SeedSizePolicy::AbsoluteTkw)]
    #[case("seeds_per_kg", SeedSizePolicy::SeedsPerKg)]
    fn test_seed_size_policy_from_str(#[case] s: &str, #[case] expected: SeedSizePolicy) {
        assert_eq!(s.parse::<SeedSizePolicy>().unwrap(), expected);
    }

    #[test]
    fn test_seed_size_policy_from_str_unknown() {
        assert!("seeds_per_bushel".parse::<SeedSizePolicy>().is_err());
    }
}
