//! The module responsible for rendering results and writing them to disk.
use crate::calculator::{AdjustmentFactors, CalculationResult};
use crate::crop::RateUnit;
use crate::input::scenario::Scenario;
use anyhow::{Context, Result, ensure};
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;

/// The output file name for calculation results
const RESULTS_FILE_NAME: &str = "results.csv";

/// The output file name for the individual adjustment factors
const FACTORS_FILE_NAME: &str = "debug_factors.csv";

/// Get the default output directory for the scenario set at `scenario_dir`.
///
/// # Arguments
///
/// * `output_root` - The folder in which output folders for each scenario set are created
/// * `scenario_dir` - The scenario set's directory
pub fn get_output_dir(output_root: &Path, scenario_dir: &Path) -> Result<PathBuf> {
    // Canonicalise in case the user has specified "."
    let scenario_dir = scenario_dir
        .canonicalize()
        .context("Could not resolve path to scenarios")?;

    let name = scenario_dir
        .file_name()
        .context("Scenarios cannot be in root folder")?
        .to_str()
        .context("Invalid chars in scenario dir name")?;

    Ok(output_root.join(name))
}

/// Create a new output directory, if it does not already exist.
///
/// If the directory exists and is not empty, it is only replaced if `allow_overwrite` is set.
///
/// # Returns
///
/// Whether an existing directory's contents were overwritten
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwrite = if output_dir.is_dir() {
        if output_dir.read_dir()?.next().is_none() {
            // Empty, so nothing to overwrite
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Use --overwrite to replace it."
        );

        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Format a count with commas separating groups of thousands (e.g. 1,234,567)
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Render a result for display to the user
pub fn render_result(result: &CalculationResult, rate_unit: RateUnit) -> String {
    let mut out = format!(
        "Optimal seeding rate: {} {}",
        format_count(result.seeding_rate),
        rate_unit.label()
    );
    if let Some(germination) = result.adjusted_germination_rate {
        out.push_str(&format!(" (adjusted germination rate: {germination:.1}%)"));
    }

    out
}

/// Represents a row in the results CSV file.
///
/// Scenarios which could not be calculated have an error message and no seeding rate.
#[derive(Serialize, Debug, PartialEq)]
struct ResultRow<'a> {
    scenario_id: &'a str,
    crop: &'a str,
    region: &'a str,
    seeding_rate: Option<u64>,
    unit: &'static str,
    adjusted_germination_rate: Option<f64>,
    error: Option<String>,
}

/// Represents a row in the debug factors CSV file
#[derive(Serialize, Debug, PartialEq)]
struct FactorsRow<'a> {
    scenario_id: &'a str,
    base_rate: f64,
    seed_size: f64,
    moisture_depth: f64,
    soil_type: f64,
    trash_level: f64,
    weed_pressure: f64,
    combined: f64,
}

impl<'a> FactorsRow<'a> {
    fn new(scenario_id: &'a str, result: &CalculationResult) -> Self {
        let AdjustmentFactors {
            seed_size,
            moisture_depth,
            soil_type,
            trash_level,
            weed_pressure,
        } = result.factors;

        Self {
            scenario_id,
            base_rate: result.base_rate.value(),
            seed_size: seed_size.value(),
            moisture_depth: moisture_depth.value(),
            soil_type: soil_type.value(),
            trash_level: trash_level.value(),
            weed_pressure: weed_pressure.value(),
            combined: result.factors.combined().value(),
        }
    }
}

/// An object for writing calculation results to file
pub struct ResultsWriter {
    results_writer: csv::Writer<File>,
    factors_writer: Option<csv::Writer<File>>,
    rate_unit: RateUnit,
}

impl ResultsWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    /// * `rate_unit` - The unit of the seeding rates being written
    /// * `save_factors` - Whether to write the individual adjustment factors to a separate file
    pub fn create(output_path: &Path, rate_unit: RateUnit, save_factors: bool) -> Result<Self> {
        let factors_writer = if save_factors {
            Some(csv::Writer::from_path(output_path.join(FACTORS_FILE_NAME))?)
        } else {
            None
        };

        Ok(Self {
            results_writer: csv::Writer::from_path(output_path.join(RESULTS_FILE_NAME))?,
            factors_writer,
            rate_unit,
        })
    }

    /// Write the outcome of calculating a single scenario
    pub fn write(
        &mut self,
        scenario: &Scenario,
        outcome: &Result<CalculationResult>,
    ) -> Result<()> {
        let (seeding_rate, adjusted_germination_rate, error) = match outcome {
            Ok(result) => (
                Some(result.seeding_rate),
                result.adjusted_germination_rate,
                None,
            ),
            Err(err) => (None, None, Some(format!("{err:#}"))),
        };

        self.results_writer.serialize(ResultRow {
            scenario_id: &scenario.id,
            crop: &scenario.input.crop,
            region: &scenario.input.region,
            seeding_rate,
            unit: self.rate_unit.label(),
            adjusted_germination_rate,
            error,
        })?;

        if let (Some(writer), Ok(result)) = (&mut self.factors_writer, outcome) {
            writer.serialize(FactorsRow::new(&scenario.id, result))?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.results_writer.flush()?;
        if let Some(writer) = &mut self.factors_writer {
            writer.flush()?;
        }

        Ok(())
    }
}
