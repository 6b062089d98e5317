use serde::de::DeserializeOwned;
use std::path::Path;
use wasteghg_core::EmissionError;

/// reads calculation inputs from a .json or .toml file.
pub fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T, EmissionError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let s = std::fs::read_to_string(path)?;
            let input = serde_json::from_str(&s)?;
            Ok(input)
        }
        Some("toml") => {
            let s = std::fs::read_to_string(path)?;
            let input = toml::from_str(&s)?;
            Ok(input)
        }
        _ => Err(EmissionError::InvalidInput {
            field: String::from("input_file"),
            message: format!("unsupported file type: {}", path.display()),
        }),
    }
}
