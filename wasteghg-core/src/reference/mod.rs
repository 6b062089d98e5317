mod reference_data;
mod reference_data_config;
mod reference_data_store;
mod tables;

pub use reference_data::ReferenceData;
pub use reference_data_config::ReferenceDataConfig;
pub use reference_data_store::ReferenceDataStore;
pub use tables::{
    BiologicalTreatment, BiologicalTreatmentFactors, DigestionProperties, ElectricityGridFactor,
    FertilizerProductionFactors, FossilCarbonProperties, GwpFactor, IncinerationTypeProperties,
    VirginMaterialProduction, WasteCategoryProperties, CO2_PER_CARBON, UNCATEGORIZED_LANDFILL,
};
