use super::AppError;
use crate::model::{landfill::FodParameters, CalculationContext};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use wasteghg_core::{calculator::FuelLookupPolicy, reference::ReferenceData};

/// prefix of environment variables overriding application settings, for
/// example `WASTEGHG_FUEL_LOOKUP_POLICY=strict` or `WASTEGHG_FOD__HORIZON_YEARS=150`.
pub const ENV_PREFIX: &str = "WASTEGHG";

/// application settings.
///
/// # Example
///
/// ```toml
/// reference_data_file = "data/reference_data.json"
/// fuel_lookup_policy = "strict"
/// parallelism = 4
///
/// [fod]
/// horizon_years = 100
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// reference tables to load instead of the bundled defaults
    pub reference_data_file: Option<String>,
    pub fuel_lookup_policy: FuelLookupPolicy,
    pub fod: FodParameters,
    /// worker threads for batch runs, rayon decides when absent
    pub parallelism: Option<usize>,
}

impl AppConfig {
    /// layers an optional settings file and `WASTEGHG_*` environment
    /// variables over the defaults.
    pub fn load(config_file: Option<&String>) -> Result<AppConfig, AppError> {
        let mut builder = config::Config::builder();
        if let Some(f) = config_file {
            log::info!("reading application settings from {f}");
            builder = builder.add_source(config::File::with_name(f));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let app_config: AppConfig = settings.try_deserialize()?;
        if app_config.parallelism == Some(0) {
            return Err(AppError::ConfigurationError(String::from(
                "parallelism must be at least 1",
            )));
        }
        app_config.fod.horizon()?;
        Ok(app_config)
    }

    /// builds the calculation context, loading reference data once.
    pub fn context(&self) -> Result<CalculationContext, AppError> {
        let reference = match &self.reference_data_file {
            Some(f) => ReferenceData::from_file(Path::new(f))?,
            None => {
                log::info!("using bundled reference data");
                ReferenceData::default_tables()?
            }
        };
        let context = CalculationContext::new(Arc::new(reference))
            .with_fuel_lookup_policy(self.fuel_lookup_policy)
            .with_fod_parameters(self.fod.clone());
        Ok(context)
    }
}
