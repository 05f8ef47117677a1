//! Validation of user-supplied inputs before they are passed to the calculator.
//!
//! All problems with an input are collected and reported together, rather than stopping at the
//! first one.
use crate::adjustment::{
    MAX_GERMINATION_RATE, MAX_TRASH_LEVEL, MIN_GERMINATION_RATE, SoilType, WeedPressure,
};
use crate::calculator::{CalculationInput, SeedSizePolicy};
use itertools::Itertools;
use log::warn;
use std::str::FromStr;
use thiserror::Error;

/// Inputs for a calculation as supplied by the user, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    /// Crop name
    pub crop: String,
    /// Region name
    pub region: String,
    /// Seed size, either as thousand-seed weight (g) or seeds per kilogram
    pub seed_size: f64,
    /// Expected germination rate (%)
    pub germination_rate: f64,
    /// Depth (cm) to soil moisture
    pub moisture_depth: f64,
    /// Soil type name
    pub soil_type: String,
    /// Residue cover (%)
    pub trash_level: f64,
    /// Competing-seed pressure name
    pub weed_pressure: String,
}

/// A problem with a single field of a [`RawInput`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was empty
    #[error("{0} must be provided")]
    MissingField(&'static str),
    /// Germination rate outside [1, 100]
    #[error("germination rate must be between 1 and 100%, got {0}")]
    GerminationOutOfRange(f64),
    /// Seed size which is zero, negative or not finite
    #[error("seed size must be a finite number greater than zero, got {0}")]
    NonPositiveSeedSize(f64),
    /// Moisture depth which is negative or not finite
    #[error("moisture depth must be a finite, non-negative number, got {0}")]
    InvalidMoistureDepth(f64),
    /// Residue cover outside [0, 100]
    #[error("trash level must be between 0 and 100%, got {0}")]
    TrashLevelOutOfRange(f64),
}

/// All of the problems found with an input
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .0.iter().join("; "))]
pub struct ValidationErrors(pub Vec<ValidationError>);

/// Parse a category name, returning `None` (with a warning) if it is not recognised
fn parse_category<T: FromStr>(value: &str, field: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        warn!("Unrecognised {field} '{value}'; no adjustment will be made for it");
    }

    parsed
}

/// Normalise a name which is used to look up reference data
pub(crate) fn normalise_name(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Check a raw input and convert it into a [`CalculationInput`].
///
/// # Arguments
///
/// * `raw` - The input as supplied
/// * `policy` - The seed size policy, which determines how the seed size is interpreted
///
/// # Returns
///
/// The validated input or every problem which was found with it. Unrecognised soil types and
/// weed pressures are not errors: they are passed on as `None`.
pub fn validate_input(
    raw: &RawInput,
    policy: SeedSizePolicy,
) -> Result<CalculationInput, ValidationErrors> {
    let mut errors = Vec::new();

    let required = [
        ("crop", &raw.crop),
        ("region", &raw.region),
        ("soil type", &raw.soil_type),
        ("weed pressure", &raw.weed_pressure),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::MissingField(field));
        }
    }

    if !(MIN_GERMINATION_RATE..=MAX_GERMINATION_RATE).contains(&raw.germination_rate) {
        errors.push(ValidationError::GerminationOutOfRange(raw.germination_rate));
    }
    if !(raw.seed_size.is_finite() && raw.seed_size > 0.0) {
        errors.push(ValidationError::NonPositiveSeedSize(raw.seed_size));
    }
    if !(raw.moisture_depth.is_finite() && raw.moisture_depth >= 0.0) {
        errors.push(ValidationError::InvalidMoistureDepth(raw.moisture_depth));
    }
    if !(0.0..=MAX_TRASH_LEVEL).contains(&raw.trash_level) {
        errors.push(ValidationError::TrashLevelOutOfRange(raw.trash_level));
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(CalculationInput {
        crop_id: normalise_name(&raw.crop).into(),
        region_id: normalise_name(&raw.region).into(),
        seed_size: policy.seed_size(raw.seed_size),
        germination_rate: raw.germination_rate,
        moisture_depth: raw.moisture_depth,
        soil_type: parse_category::<SoilType>(raw.soil_type.trim(), "soil type"),
        trash_level: raw.trash_level,
        weed_pressure: parse_category::<WeedPressure>(raw.weed_pressure.trim(), "weed pressure"),
    })
}
