use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmissionError {
    #[error("invalid input for '{field}': {value} must be non-negative")]
    NegativeInput { field: String, value: f64 },
    #[error("invalid input for '{field}': value is not a finite number")]
    NonNumericInput { field: String },
    #[error("invalid input for '{field}': {value} is not a percentage in [0, 100]")]
    PercentOutOfRange { field: String, value: f64 },
    #[error("invalid year range: start year {start_year} and current year {current_year} must not exceed end year {end_year}, and current year must be within [start, end]")]
    InvalidYearRange {
        start_year: i32,
        current_year: i32,
        end_year: i32,
    },
    #[error("invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },
    #[error("missing required input '{0}'")]
    MissingInput(String),
    #[error("fuel type '{0}' not found in reference data")]
    UnknownFuelType(String),
    #[error("vehicle type '{vehicle_type}' not found in reference data, must be one of: {available}")]
    UnknownVehicleType {
        vehicle_type: String,
        available: String,
    },
    #[error("incineration type '{incineration_type}' not found in reference data, must be one of: {available}")]
    UnknownIncinerationType {
        incineration_type: String,
        available: String,
    },
    #[error("invalid reference data: {0}")]
    ReferenceDataError(String),
    #[error("{pathway} pathway failed: {source}")]
    PathwayFailure {
        pathway: String,
        #[source]
        source: Box<EmissionError>,
    },
    #[error("failure reading file: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure decoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("failure decoding TOML: {source}")]
    TomlError {
        #[from]
        source: toml::de::Error,
    },
}

impl EmissionError {
    /// wraps this error with the name of the pathway that produced it.
    pub fn in_pathway(self, pathway: impl ToString) -> EmissionError {
        EmissionError::PathwayFailure {
            pathway: pathway.to_string(),
            source: Box::new(self),
        }
    }
}
