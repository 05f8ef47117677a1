//! Code for reading the scenarios to be evaluated from a CSV file.
use super::*;
use crate::validation::RawInput;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const SCENARIOS_FILE_NAME: &str = "scenarios.csv";

/// A single scenario: the unvalidated inputs for one calculation, with an identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// A unique identifier for the scenario
    pub id: String,
    /// The inputs as supplied
    pub input: RawInput,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ScenarioRaw {
    id: String,
    crop: String,
    region: String,
    seed_size: f64,
    germination_rate: f64,
    moisture_depth: f64,
    soil_type: String,
    trash_level: f64,
    weed_pressure: String,
}

impl From<ScenarioRaw> for Scenario {
    fn from(raw: ScenarioRaw) -> Self {
        Self {
            id: raw.id,
            input: RawInput {
                crop: raw.crop,
                region: raw.region,
                seed_size: raw.seed_size,
                germination_rate: raw.germination_rate,
                moisture_depth: raw.moisture_depth,
                soil_type: raw.soil_type,
                trash_level: raw.trash_level,
                weed_pressure: raw.weed_pressure,
            },
        }
    }
}

/// Read scenarios from the CSV file in the specified directory.
///
/// # Arguments
///
/// * `scenario_dir` - Folder containing the scenarios file
///
/// # Returns
///
/// The scenarios, in file order, or an error if the file is invalid
pub fn read_scenarios(scenario_dir: &Path) -> Result<Vec<Scenario>> {
    let file_path = scenario_dir.join(SCENARIOS_FILE_NAME);
    let scenarios_csv: Vec<ScenarioRaw> = read_csv(&file_path)?;
    read_scenarios_from_iter(scenarios_csv.into_iter()).with_context(|| input_err_msg(&file_path))
}

fn read_scenarios_from_iter<I>(iter: I) -> Result<Vec<Scenario>>
where
    I: Iterator<Item = ScenarioRaw>,
{
    let mut ids = HashSet::new();
    iter.map(|raw| {
        ensure!(!raw.id.is_empty(), "Scenario ID cannot be empty");
        ensure!(ids.insert(raw.id.clone()), "Duplicate scenario ID: {}", raw.id);
        Ok(raw.into())
    })
    .collect()
}
