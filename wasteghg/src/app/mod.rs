mod app_config;
mod app_error;
mod operations;

pub use app_config::AppConfig;
pub use app_error::AppError;
pub use operations::{
    run_fod_schedule, run_pathway, run_scenarios, validate_reference, write_fod_schedule_csv,
    write_scenario_csv,
};
