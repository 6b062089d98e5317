mod emission_result;
mod fuel;
mod landfill_type;
mod pollutant;
mod recyclable_material;
mod reference_key;
mod waste_category;

pub use emission_result::{EmissionResult, GasAmounts};
pub use fuel::{EmissionFactors, FuelConsumption, FuelProfile, VehicleProfile};
pub use landfill_type::{LandfillGasProperties, LandfillTypeProperties};
pub use pollutant::{GasType, Pollutant};
pub use recyclable_material::RecyclableMaterial;
pub use reference_key::{canonical_key, ReferenceKey};
pub use waste_category::{normalize_composition, WasteCategory, WasteComposition};
