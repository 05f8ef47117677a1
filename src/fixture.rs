//! Fixtures for tests

use crate::adjustment::{SoilType, WeedPressure};
use crate::calculator::{CalculationInput, SeedSize};
use crate::crop::CropProfileTable;
use crate::input::crop::built_in_crop_profile_table;
use crate::validation::RawInput;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn crop_table() -> CropProfileTable {
    built_in_crop_profile_table().unwrap()
}

/// Wheat in Australia under standard conditions
#[fixture]
pub fn wheat_input() -> CalculationInput {
    CalculationInput {
        crop_id: "wheat".into(),
        region_id: "australia".into(),
        seed_size: SeedSize::ThousandSeedWeight(40.0),
        germination_rate: 95.0,
        moisture_depth: 7.0,
        soil_type: Some(SoilType::Loamy),
        trash_level: 20.0,
        weed_pressure: Some(WeedPressure::Low),
    }
}

/// The unvalidated equivalent of [`wheat_input`]
#[fixture]
pub fn raw_input() -> RawInput {
    RawInput {
        crop: "wheat".into(),
        region: "australia".into(),
        seed_size: 40.0,
        germination_rate: 95.0,
        moisture_depth: 7.0,
        soil_type: "loamy".into(),
        trash_level: 20.0,
        weed_pressure: "low".into(),
    }
}
