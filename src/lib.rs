//! Seeding rate calculations for field crops.
//!
//! A base rate for a crop and region is adjusted for seed size, soil moisture, soil type, surface
//! residue and weed pressure, then corrected for the expected germination rate.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod adjustment;
pub mod batch;
pub mod calculator;
pub mod cli;
pub mod crop;
pub mod id;
pub mod input;
pub mod log;
pub mod output;
pub mod settings;
pub mod units;
pub mod validation;

#[cfg(test)]
mod fixture;

/// Get the program's config directory, falling back to the working directory if the platform has
/// no standard location
pub fn get_seedrate_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("seedrate")
}
