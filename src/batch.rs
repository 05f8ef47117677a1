//! Functionality for evaluating a whole set of scenarios.
use crate::calculator::{CalculationResult, Calculator};
use crate::input::ScenarioSet;
use crate::output::ResultsWriter;
use crate::validation::{RawInput, validate_input};
use anyhow::Result;
use log::{info, warn};
use std::path::Path;

/// Counts of scenarios which could and could not be calculated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Number of scenarios with a seeding rate
    pub succeeded: usize,
    /// Number of scenarios which could not be calculated
    pub failed: usize,
}

/// Evaluate every scenario in a set, writing results to the output folder.
///
/// Scenarios which fail validation or calculation are logged and recorded in the output with their
/// error message; they do not stop the rest of the batch.
///
/// # Arguments
///
/// * `scenario_set` - The scenarios and the data needed to evaluate them
/// * `output_path` - The folder to which results will be written
/// * `save_factors` - Whether to write the individual adjustment factors to file
pub fn run(
    scenario_set: &ScenarioSet,
    output_path: &Path,
    save_factors: bool,
) -> Result<BatchSummary> {
    let calculator = Calculator::new(&scenario_set.crop_table, scenario_set.options)?;
    let mut writer = ResultsWriter::create(
        output_path,
        scenario_set.crop_table.rate_unit,
        save_factors,
    )?;

    let mut summary = BatchSummary::default();
    for scenario in &scenario_set.scenarios {
        let outcome = evaluate(&calculator, &scenario.input);
        match &outcome {
            Ok(result) => {
                info!(
                    "Scenario {}: {} {}",
                    scenario.id,
                    result.seeding_rate,
                    scenario_set.crop_table.rate_unit.label()
                );
                summary.succeeded += 1;
            }
            Err(err) => {
                warn!("Scenario {} could not be calculated: {err:#}", scenario.id);
                summary.failed += 1;
            }
        }
        writer.write(scenario, &outcome)?;
    }
    writer.flush()?;

    Ok(summary)
}

/// Validate a raw input and calculate its seeding rate
fn evaluate(calculator: &Calculator<'_>, input: &RawInput) -> Result<CalculationResult> {
    let input = validate_input(input, calculator.options().seed_size_policy)?;
    Ok(calculator.compute(&input)?)
}
