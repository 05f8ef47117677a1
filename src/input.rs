//! Common routines for handling input data.
use crate::calculator::CalculatorOptions;
use crate::crop::CropProfileTable;
use anyhow::{Context, Result, ensure};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Read;
use std::path::Path;

pub mod crop;
use crop::load_crop_profile_table;
pub mod scenario;
use scenario::{Scenario, read_scenarios};

/// Read a series of type `T`s from a CSV file.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
///
/// # Returns
///
/// The deserialised rows or an error if the file is empty or malformed
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let file = fs::File::open(file_path).with_context(|| input_err_msg(file_path))?;
    read_csv_from_reader(file).with_context(|| input_err_msg(file_path))
}

/// Read a series of type `T`s from CSV data in any reader
pub fn read_csv_from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let vec = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()?;
    ensure!(!vec.is_empty(), "CSV file cannot be empty");

    Ok(vec)
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// A set of scenarios to be evaluated together, with the data needed to evaluate them
#[derive(Debug)]
pub struct ScenarioSet {
    /// Options for the calculator
    pub options: CalculatorOptions,
    /// Crop reference data
    pub crop_table: CropProfileTable,
    /// The scenarios to evaluate
    pub scenarios: Vec<Scenario>,
}

/// Load a scenario set from the specified directory.
///
/// The directory must contain a `scenarios.csv` file. It may contain an `options.toml` file and its
/// own crop reference data; otherwise defaults and the built-in reference data are used.
pub fn load_scenario_set<P: AsRef<Path>>(scenario_dir: P) -> Result<ScenarioSet> {
    let scenario_dir = scenario_dir.as_ref();
    let options = CalculatorOptions::from_path(scenario_dir)?;
    let crop_table = load_crop_profile_table(scenario_dir)?;
    let scenarios = read_scenarios(scenario_dir)?;

    Ok(ScenarioSet {
        options,
        crop_table,
        scenarios,
    })
}
