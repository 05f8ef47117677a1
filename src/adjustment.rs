//! The individual adjustment factors which are applied to a crop's base seeding rate.
//!
//! Every factor is a strictly positive multiplier. Each depends on exactly one input, so they are
//! independent of one another and can be combined in any order.
use crate::units::Dimensionless;
use strum::{Display, EnumIter, EnumString};

/// The factor applied when an input calls for no adjustment
pub const NEUTRAL_FACTOR: Dimensionless = Dimensionless(1.0);

/// Factor applied for seeds smaller than standard (more seeds are needed per unit area)
const SMALL_SEED_FACTOR: Dimensionless = Dimensionless(1.05);

/// Factor applied for seeds larger than standard
const LARGE_SEED_FACTOR: Dimensionless = Dimensionless(0.95);

/// How far (as a proportion) a seed size may deviate from the standard before it is adjusted for
const SEED_SIZE_TOLERANCE: f64 = 0.1;

/// Thousand-seed weights (g) below which seeds are considered small, for the absolute policy
const ABSOLUTE_SMALL_TKW: f64 = 35.0;

/// Thousand-seed weights (g) above which seeds are considered large, for the absolute policy
const ABSOLUTE_LARGE_TKW: f64 = 45.0;

/// Moisture depths (cm) shallower than this are adjusted upwards
const SHALLOW_MOISTURE_DEPTH: f64 = 5.0;

/// Moisture depths (cm) deeper than this are adjusted downwards
const DEEP_MOISTURE_DEPTH: f64 = 10.0;

/// Residue cover (%) from which the moderate trash factor applies
const MODERATE_TRASH_LEVEL: f64 = 30.0;

/// Residue cover (%) above which the heavy trash factor applies
const HEAVY_TRASH_LEVEL: f64 = 60.0;

/// Germination points lost per percentage point that seeds are smaller than standard
const SMALL_SEED_GERMINATION_PENALTY: f64 = 0.5;

/// Maximum number of germination points lost for small seeds
const MAX_GERMINATION_DECREASE: f64 = 10.0;

/// Germination points gained per percentage point that seeds are larger than standard
const LARGE_SEED_GERMINATION_BONUS: f64 = 0.2;

/// Maximum number of germination points gained for large seeds
const MAX_GERMINATION_INCREASE: f64 = 5.0;

/// The lowest permissible germination rate (%)
pub const MIN_GERMINATION_RATE: f64 = 1.0;

/// The highest permissible germination rate (%)
pub const MAX_GERMINATION_RATE: f64 = 100.0;

/// The highest possible trash level (%)
pub const MAX_TRASH_LEVEL: f64 = 100.0;

/// The soil type of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SoilType {
    /// Light, free-draining soil
    Sandy,
    /// Medium-textured soil
    Loamy,
    /// Heavy soil
    Clay,
}

/// The level of pressure from competing seeds (e.g. weeds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeedPressure {
    /// Little competition
    Low,
    /// Some competition
    Moderate,
    /// Heavy competition
    High,
}

/// A lookup table mapping categories to factors, with a neutral default for unknown categories
struct FactorTable<K: 'static> {
    entries: &'static [(K, Dimensionless)],
}

impl<K: PartialEq> FactorTable<K> {
    /// Get the factor for the given category, or [`NEUTRAL_FACTOR`] if it is unrecognised
    fn factor(&self, key: Option<K>) -> Dimensionless {
        key.and_then(|key| {
            self.entries
                .iter()
                .find(|(entry, _)| *entry == key)
                .map(|(_, factor)| *factor)
        })
        .unwrap_or(NEUTRAL_FACTOR)
    }
}

const SOIL_TYPE_FACTORS: FactorTable<SoilType> = FactorTable {
    entries: &[
        (SoilType::Sandy, Dimensionless(1.10)),
        (SoilType::Loamy, Dimensionless(1.0)),
        (SoilType::Clay, Dimensionless(0.95)),
    ],
};

const WEED_PRESSURE_FACTORS: FactorTable<WeedPressure> = FactorTable {
    entries: &[
        (WeedPressure::Low, Dimensionless(1.0)),
        (WeedPressure::Moderate, Dimensionless(1.05)),
        (WeedPressure::High, Dimensionless(1.10)),
    ],
};

/// Factor for a proportional deviation of seed size from the standard.
///
/// A positive deviation means *smaller* seeds when measuring seeds per kilogram, and *larger*
/// seeds when measuring thousand-seed weight, so the caller chooses which factor goes where.
fn banded_factor(deviation: f64, above: Dimensionless, below: Dimensionless) -> Dimensionless {
    if deviation > SEED_SIZE_TOLERANCE {
        above
    } else if deviation < -SEED_SIZE_TOLERANCE {
        below
    } else {
        NEUTRAL_FACTOR
    }
}

/// Proportional difference of a measurement from a standard value
pub fn relative_difference(value: f64, standard: f64) -> f64 {
    (value - standard) / standard
}

/// Seed-size factor comparing thousand-seed weight against the crop's standard.
///
/// Weights under 90% of standard give 1.05, over 110% give 0.95. Crops without a standard are not
/// adjusted.
pub fn relative_tkw_factor(tkw: f64, standard_tkw: Option<f64>) -> Dimensionless {
    let Some(standard_tkw) = standard_tkw else {
        return NEUTRAL_FACTOR;
    };

    if tkw < standard_tkw * (1.0 - SEED_SIZE_TOLERANCE) {
        SMALL_SEED_FACTOR
    } else if tkw > standard_tkw * (1.0 + SEED_SIZE_TOLERANCE) {
        LARGE_SEED_FACTOR
    } else {
        NEUTRAL_FACTOR
    }
}

/// Seed-size factor using fixed thousand-seed weight thresholds of 35 g and 45 g
pub fn absolute_tkw_factor(tkw: f64) -> Dimensionless {
    if tkw < ABSOLUTE_SMALL_TKW {
        SMALL_SEED_FACTOR
    } else if tkw > ABSOLUTE_LARGE_TKW {
        LARGE_SEED_FACTOR
    } else {
        NEUTRAL_FACTOR
    }
}

/// Seed-size factor for a relative difference in seeds per kilogram from the standard.
///
/// More seeds per kilogram than standard means smaller seeds, so the rate goes up.
pub fn seeds_per_kg_factor(relative_difference: Option<f64>) -> Dimensionless {
    relative_difference.map_or(NEUTRAL_FACTOR, |diff| {
        banded_factor(diff, SMALL_SEED_FACTOR, LARGE_SEED_FACTOR)
    })
}

/// Factor for the depth (cm) at which seed will reach soil moisture
pub fn moisture_depth_factor(depth: f64) -> Dimensionless {
    if depth < SHALLOW_MOISTURE_DEPTH {
        Dimensionless(1.10)
    } else if depth > DEEP_MOISTURE_DEPTH {
        Dimensionless(0.95)
    } else {
        NEUTRAL_FACTOR
    }
}

/// Factor for soil type. Unrecognised soil types are not adjusted for.
pub fn soil_type_factor(soil_type: Option<SoilType>) -> Dimensionless {
    SOIL_TYPE_FACTORS.factor(soil_type)
}

/// Factor for the percentage of the soil surface covered by residue
pub fn trash_level_factor(trash_level: f64) -> Dimensionless {
    if trash_level < MODERATE_TRASH_LEVEL {
        NEUTRAL_FACTOR
    } else if trash_level <= HEAVY_TRASH_LEVEL {
        Dimensionless(1.05)
    } else {
        Dimensionless(1.10)
    }
}

/// Factor for competing-seed pressure. Unrecognised levels are not adjusted for.
pub fn weed_pressure_factor(weed_pressure: Option<WeedPressure>) -> Dimensionless {
    WEED_PRESSURE_FACTORS.factor(weed_pressure)
}

/// Adjust a germination rate (%) for how far seed size deviates from standard.
///
/// `percentage_difference` is the difference in seeds per kilogram from standard, as a
/// percentage. Smaller seeds (positive difference) lose up to 10 points of germination; larger
/// seeds gain up to 5 points. The result is clamped to [1, 100].
pub fn adjust_germination_rate(germination_rate: f64, percentage_difference: f64) -> f64 {
    let adjustment = if percentage_difference > 0.0 {
        -(SMALL_SEED_GERMINATION_PENALTY * percentage_difference).min(MAX_GERMINATION_DECREASE)
    } else if percentage_difference < 0.0 {
        (LARGE_SEED_GERMINATION_BONUS * -percentage_difference).min(MAX_GERMINATION_INCREASE)
    } else {
        0.0
    };

    (germination_rate + adjustment).clamp(MIN_GERMINATION_RATE, MAX_GERMINATION_RATE)
}
