//! The command line interface for the calculator.
use crate::batch;
use crate::calculator::{CalculationResult, Calculator, CalculatorOptions, SeedSizePolicy};
use crate::crop::{CropID, CropProfileTable, RateUnit};
use crate::input::crop::{built_in_crop_profile_table, read_crop_profile_table};
use crate::input::load_scenario_set;
use crate::log;
use crate::output::metadata::write_metadata;
use crate::output::{create_output_directory, format_count, get_output_dir, render_result};
use crate::settings::Settings;
use crate::validation::{RawInput, validate_input};
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use itertools::Itertools;
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the calculator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Inputs and options for a single calculation
#[derive(Args, Debug, Clone)]
pub struct CalculateArgs {
    /// The crop to be sown (e.g. wheat)
    #[arg(long)]
    pub crop: String,
    /// The region in which the crop is sown (e.g. australia)
    #[arg(long)]
    pub region: String,
    /// Thousand-seed weight in grams, or seeds per kilogram with the seeds_per_kg policy
    #[arg(long)]
    pub seed_size: f64,
    /// Expected germination rate (%)
    #[arg(long)]
    pub germination_rate: f64,
    /// Depth to soil moisture (cm)
    #[arg(long)]
    pub moisture_depth: f64,
    /// Soil type (sandy, loamy or clay)
    #[arg(long)]
    pub soil_type: String,
    /// Percentage of the soil surface covered by residue
    #[arg(long)]
    pub trash_level: f64,
    /// Pressure from competing seeds (low, moderate or high)
    #[arg(long)]
    pub weed_pressure: String,
    /// How seed size is compared against the crop's standard
    /// (relative_tkw, absolute_tkw or seeds_per_kg)
    #[arg(long, default_value = "relative_tkw")]
    pub seed_size_policy: SeedSizePolicy,
    /// Don't increase the rate to compensate for seeds which fail to germinate
    #[arg(long)]
    pub no_germination_correction: bool,
    /// Adjust the germination rate according to seed size (requires seeds_per_kg)
    #[arg(long)]
    pub germination_feedback: bool,
    /// Folder containing custom crop reference data
    #[arg(long)]
    pub reference_dir: Option<PathBuf>,
}

impl CalculateArgs {
    /// The calculator options selected by the arguments
    fn options(&self) -> CalculatorOptions {
        CalculatorOptions {
            seed_size_policy: self.seed_size_policy,
            germination_correction: !self.no_germination_correction,
            germination_feedback: self.germination_feedback,
        }
    }

    /// The calculation inputs, before validation
    fn raw_input(&self) -> RawInput {
        RawInput {
            crop: self.crop.clone(),
            region: self.region.clone(),
            seed_size: self.seed_size,
            germination_rate: self.germination_rate,
            moisture_depth: self.moisture_depth,
            soil_type: self.soil_type.clone(),
            trash_level: self.trash_level,
            weed_pressure: self.weed_pressure.clone(),
        }
    }
}

/// Options for the batch command
#[derive(Args, Debug, Clone, Default)]
pub struct BatchOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
    /// Whether to write the individual adjustment factors to a CSV file
    #[arg(long)]
    pub debug_factors: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Calculate the seeding rate for a single crop and field.
    Calculate {
        /// The calculation inputs
        #[command(flatten)]
        args: CalculateArgs,
    },
    /// Calculate seeding rates for every scenario in a scenario set.
    Batch {
        /// Path to the scenario set directory.
        scenario_dir: PathBuf,
        /// Other batch options
        #[command(flatten)]
        opts: BatchOpts,
    },
    /// List the crops and base rates in the reference data.
    Crops {
        /// Folder containing custom crop reference data
        #[arg(long)]
        reference_dir: Option<PathBuf>,
    },
    /// Manage example scenario sets.
    Example {
        /// The available subcommands for managing example scenario sets.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Calculate { args } => handle_calculate_command(&args, None),
            Self::Batch { scenario_dir, opts } => {
                handle_batch_command(&scenario_dir, &opts, None)
            }
            Self::Crops { reference_dir } => handle_crops_command(reference_dir.as_deref()),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start the program
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ seedrate --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load the crop reference data from the given folder, or the built-in data if not given
fn load_reference_data(reference_dir: Option<&Path>) -> Result<CropProfileTable> {
    match reference_dir {
        Some(dir) => read_crop_profile_table(dir),
        None => built_in_crop_profile_table(),
    }
}

/// Validate the arguments and calculate a seeding rate
pub fn calculate(args: &CalculateArgs) -> Result<(CalculationResult, RateUnit)> {
    let crop_table = load_reference_data(args.reference_dir.as_deref())
        .context("Failed to load crop reference data.")?;
    let calculator = Calculator::new(&crop_table, args.options())?;
    let input = validate_input(&args.raw_input(), args.seed_size_policy)?;
    let result = calculator.compute(&input)?;

    Ok((result, crop_table.rate_unit))
}

/// Handle the `calculate` command.
pub fn handle_calculate_command(args: &CalculateArgs, settings: Option<Settings>) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    let (result, rate_unit) = calculate(args)?;
    println!("{}", render_result(&result, rate_unit));

    Ok(())
}

/// Handle the `batch` command.
pub fn handle_batch_command(
    scenario_path: &Path,
    opts: &BatchOpts,
    settings: Option<Settings>,
) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(&settings.output_root, scenario_path)?;
        &pathbuf
    };

    let overwritten = create_output_directory(output_path, opts.overwrite || settings.overwrite)
        .with_context(|| {
            format!(
                "Failed to create output directory: {}",
                output_path.display()
            )
        })?;

    log::init(&settings.log_level, Some(output_path)).context("Failed to initialise logging.")?;

    // NB: We have to wait until the logger is initialised to display this warning
    if overwritten {
        warn!("Output folder will be overwritten");
    }

    let scenario_set = load_scenario_set(scenario_path).context("Failed to load scenarios.")?;
    info!("Loaded scenarios from {}", scenario_path.display());
    info!("Output folder: {}", output_path.display());

    write_metadata(
        output_path,
        scenario_path,
        &scenario_set.options,
        &scenario_set.crop_table,
    )
    .context("Failed to write metadata.")?;

    let summary = batch::run(&scenario_set, output_path, opts.debug_factors)?;
    info!(
        "Batch complete: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );

    Ok(())
}

/// Describe a crop's base rates for display
fn describe_base_rates(crop_table: &CropProfileTable, crop_id: &CropID) -> String {
    let unit = crop_table.rate_unit.label();
    crop_table.crops[crop_id]
        .base_rates
        .iter()
        .map(|(region_id, rate)| match crop_table.base_rate(crop_id, region_id) {
            Some(_) => format!("{region_id} {} {unit}", format_count(rate.round_to_count())),
            None => format!("{region_id} not grown"),
        })
        .join("; ")
}

/// Handle the `crops` command.
fn handle_crops_command(reference_dir: Option<&Path>) -> Result<()> {
    let crop_table = load_reference_data(reference_dir)?;
    println!("Crop reference data version {}", crop_table.version);
    println!("Regions: {}", crop_table.region_ids().join(", "));
    for (crop_id, crop) in &crop_table.crops {
        let tkw = crop
            .standard_tkw
            .map_or_else(|| "unknown".to_string(), |tkw| format!("{tkw} g"));
        println!(
            "{crop_id} ({}): standard TKW {tkw}; {}",
            crop.description,
            describe_base_rates(&crop_table, crop_id)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::crop_table;
    use rstest::{fixture, rstest};

    #[fixture]
    fn args() -> CalculateArgs {
        CalculateArgs {
            crop: "wheat".into(),
            region: "australia".into(),
            seed_size: 40.0,
            germination_rate: 95.0,
            moisture_depth: 7.0,
            soil_type: "loamy".into(),
            trash_level: 20.0,
            weed_pressure: "low".into(),
            seed_size_policy: SeedSizePolicy::RelativeTkw,
            no_germination_correction: false,
            germination_feedback: false,
            reference_dir: None,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[rstest]
    fn test_calculate(args: CalculateArgs) {
        let (result, rate_unit) = calculate(&args).unwrap();
        assert_eq!(result.seeding_rate, 210_526);
        assert_eq!(rate_unit, RateUnit::SeedsPerHectare);
    }

    #[rstest]
    fn test_calculate_unknown_crop_region(args: CalculateArgs) {
        let args = CalculateArgs {
            crop: "soybean".into(),
            ..args
        };
        assert_eq!(
            calculate(&args).unwrap_err().to_string(),
            "No base seeding rate is available for soybean in australia"
        );
    }

    #[rstest]
    fn test_calculate_invalid_input(args: CalculateArgs) {
        let args = CalculateArgs {
            germination_rate: 0.0,
            ..args
        };
        assert_eq!(
            calculate(&args).unwrap_err().to_string(),
            "germination rate must be between 1 and 100%, got 0"
        );
    }

    #[rstest]
    fn test_calculate_feedback(args: CalculateArgs) {
        let args = CalculateArgs {
            seed_size: 27_500.0,
            germination_rate: 90.0,
            seed_size_policy: SeedSizePolicy::SeedsPerKg,
            germination_feedback: true,
            ..args
        };
        let (result, _) = calculate(&args).unwrap();
        assert_eq!(result.seeding_rate, 235_294);
        assert_eq!(result.adjusted_germination_rate, Some(85.0));
    }

    #[test]
    fn test_parse_calculate_args() {
        let cli = Cli::try_parse_from([
            "seedrate",
            "calculate",
            "--crop",
            "wheat",
            "--region",
            "australia",
            "--seed-size",
            "40",
            "--germination-rate",
            "95",
            "--moisture-depth",
            "7",
            "--soil-type",
            "loamy",
            "--trash-level",
            "20",
            "--weed-pressure",
            "low",
        ])
        .unwrap();
        let Some(Commands::Calculate { args }) = cli.command else {
            panic!("Expected calculate command");
        };
        assert_eq!(args.seed_size_policy, SeedSizePolicy::RelativeTkw);
        assert!(!args.no_germination_correction);
    }

    #[rstest]
    fn test_describe_base_rates(crop_table: CropProfileTable) {
        assert_eq!(
            describe_base_rates(&crop_table, &"soybean".into()),
            "australia not grown; canada 450,000 seeds/ha"
        );
    }
}
