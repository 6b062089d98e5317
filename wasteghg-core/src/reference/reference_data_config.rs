use super::tables::{
    BiologicalTreatment, DigestionProperties, ElectricityGridFactor, FertilizerProductionFactors,
    FossilCarbonProperties, GwpFactor, IncinerationTypeProperties, VirginMaterialProduction,
    WasteCategoryProperties,
};
use crate::{
    model::{FuelProfile, LandfillGasProperties, LandfillTypeProperties, VehicleProfile},
    EmissionError,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_REFERENCE_DATA: &str = include_str!("../../resources/reference_data.json");

/// serialized form of the reference tables, as read from a JSON or TOML
/// document. converted into an indexed, validated
/// [`super::ReferenceData`] via `TryFrom`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferenceDataConfig {
    pub version: String,
    pub fuels: Vec<FuelProfile>,
    pub gwp_factors: Vec<GwpFactor>,
    pub electricity_grid_factor: ElectricityGridFactor,
    #[serde(default)]
    pub vehicle_bc_factors: Vec<VehicleProfile>,
    pub waste_categories: Vec<WasteCategoryProperties>,
    pub landfill_types: Vec<LandfillTypeProperties>,
    pub landfill_gas: LandfillGasProperties,
    pub biological_treatment: BiologicalTreatment,
    pub fertilizer_production: FertilizerProductionFactors,
    pub anaerobic_digestion: DigestionProperties,
    #[serde(default)]
    pub incineration_types: Vec<IncinerationTypeProperties>,
    #[serde(default)]
    pub fossil_carbon: Vec<FossilCarbonProperties>,
    #[serde(default)]
    pub virgin_materials: Vec<VirginMaterialProduction>,
}

impl ReferenceDataConfig {
    /// the reference tables bundled with this crate.
    pub fn default_tables() -> Result<ReferenceDataConfig, EmissionError> {
        let config = serde_json::from_str(DEFAULT_REFERENCE_DATA)?;
        Ok(config)
    }

    /// reads reference tables from a .json or .toml file.
    pub fn from_file(path: &Path) -> Result<ReferenceDataConfig, EmissionError> {
        let extension = path.extension().and_then(|e| e.to_str());
        match extension {
            Some("json") => {
                let s = std::fs::read_to_string(path)?;
                let config = serde_json::from_str(&s)?;
                Ok(config)
            }
            Some("toml") => {
                let s = std::fs::read_to_string(path)?;
                let config = toml::from_str(&s)?;
                Ok(config)
            }
            _ => Err(EmissionError::ReferenceDataError(format!(
                "unsupported file type: {}",
                path.display()
            ))),
        }
    }
}
