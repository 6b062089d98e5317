use super::{Pollutant, ReferenceKey};
use serde::{Deserialize, Serialize};

/// per-energy emission factors of a fuel, in kg of pollutant per MJ.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub ch4_per_energy: f64,
    pub co2_per_energy: f64,
    pub n2o_per_energy: f64,
    pub bc_per_energy: f64,
}

impl EmissionFactors {
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Ch4 => self.ch4_per_energy,
            Pollutant::Co2 => self.co2_per_energy,
            Pollutant::N2o => self.n2o_per_energy,
            Pollutant::Bc => self.bc_per_energy,
        }
    }
}

/// a combustible fuel. quantities of this fuel are expressed in the unit its
/// energy content and density refer to (litres, kg or m³).
///
/// # Example
///
/// ```json
/// {
///   "fuel_type": "diesel",
///   "energy_content_per_unit": 38.6,
///   "density_per_unit": 0.835,
///   "emission_factors": {
///     "ch4_per_energy": 3.9e-6,
///     "co2_per_energy": 0.0741,
///     "n2o_per_energy": 3.9e-6,
///     "bc_per_energy": 1.6e-5
///   }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelProfile {
    pub fuel_type: ReferenceKey,
    /// MJ per unit
    pub energy_content_per_unit: f64,
    /// kg per unit
    pub density_per_unit: f64,
    pub emission_factors: EmissionFactors,
}

/// amount of one fuel (or electric carrier, in kWh) consumed by an operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelConsumption {
    pub fuel_type: ReferenceKey,
    pub quantity: f64,
}

impl FuelConsumption {
    pub fn new(fuel_type: &str, quantity: f64) -> FuelConsumption {
        FuelConsumption {
            fuel_type: ReferenceKey::new(fuel_type),
            quantity,
        }
    }
}

/// black carbon emitted per kg of fuel burned by a collection vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub vehicle_type: ReferenceKey,
    pub bc_per_kg_fuel: f64,
}
