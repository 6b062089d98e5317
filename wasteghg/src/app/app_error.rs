use thiserror::Error;
use wasteghg_core::EmissionError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure loading application settings: {source}")]
    SettingsError {
        #[from]
        source: config::ConfigError,
    },
    #[error("{source}")]
    EmissionError {
        #[from]
        source: EmissionError,
    },
    #[error("failure evaluating scenario file {file}: {source}")]
    ScenarioError {
        file: String,
        #[source]
        source: EmissionError,
    },
    #[error("failure running batch: {0}")]
    BatchError(String),
    #[error("failure writing CSV output: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("failure writing output: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
}
