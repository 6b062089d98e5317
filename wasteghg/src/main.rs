use clap::{Parser, Subcommand};
use std::path::Path;
use wasteghg::{
    app::{self, AppConfig, AppError},
    model::pathway::PathwayType,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct WasteGhgArguments {
    #[arg(long, global = true, help = "path to a TOML or JSON application settings file")]
    config_file: Option<String>,
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// emissions of a single treatment pathway, printed as JSON
    Pathway {
        #[arg(value_enum)]
        pathway: PathwayType,
        #[arg(long, help = "path to the pathway input file (.json or .toml)")]
        input_file: String,
    },
    /// evaluates scenario files in parallel
    Scenario {
        #[arg(long, num_args = 1.., required = true, help = "scenario input files (.json or .toml)")]
        input_files: Vec<String>,
        #[arg(long, help = "write per-pathway results to this CSV file")]
        output_file: Option<String>,
    },
    /// year-by-year landfill decay schedule
    FodSchedule {
        #[arg(long, help = "path to the landfill input file (.json or .toml)")]
        input_file: String,
        #[arg(long, help = "write the schedule to this CSV file")]
        output_file: Option<String>,
    },
    /// checks a reference data file for consistency
    ValidateReference {
        #[arg(long, help = "path to the reference data file (.json or .toml)")]
        reference_file: String,
    },
}

fn run(args: &WasteGhgArguments) -> Result<(), AppError> {
    env_logger::init();
    log::info!("starting wasteghg at {}", chrono::Local::now().to_rfc3339());
    let conf = AppConfig::load(args.config_file.as_ref())?;
    if let Some(threads) = conf.parallelism {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| AppError::ConfigurationError(e.to_string()))?;
    }
    match &args.app {
        App::Pathway {
            pathway,
            input_file,
        } => {
            let context = conf.context()?;
            let result = app::run_pathway(*pathway, Path::new(input_file), &context)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        App::Scenario {
            input_files,
            output_file,
        } => {
            let context = conf.context()?;
            let reports = app::run_scenarios(input_files, &context)?;
            match output_file {
                Some(f) => app::write_scenario_csv(&reports, Path::new(f))?,
                None => println!("{}", serde_json::to_string_pretty(&reports)?),
            }
        }
        App::FodSchedule {
            input_file,
            output_file,
        } => {
            let context = conf.context()?;
            let years = app::run_fod_schedule(Path::new(input_file), &context)?;
            match output_file {
                Some(f) => app::write_fod_schedule_csv(&years, Path::new(f))?,
                None => println!("{}", serde_json::to_string_pretty(&years)?),
            }
        }
        App::ValidateReference { reference_file } => {
            let reference = app::validate_reference(Path::new(reference_file))?;
            eprintln!(
                "reference data version {} is valid.",
                reference.version()
            );
        }
    }
    Ok(())
}

fn main() {
    let args = WasteGhgArguments::parse();
    if let Err(e) = run(&args) {
        log::error!("wasteghg failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
