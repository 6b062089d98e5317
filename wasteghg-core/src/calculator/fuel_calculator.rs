use crate::{
    model::{FuelConsumption, FuelProfile, Pollutant, ReferenceKey, VehicleProfile},
    reference::ReferenceData,
    util::validation,
    EmissionError,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// energy of one kWh in MJ
pub const MJ_PER_KWH: f64 = 3.6;

/// how a fuel missing from the reference data is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelLookupPolicy {
    /// the fuel contributes zero, a warning is logged
    #[default]
    ZeroContribution,
    /// the fuel raises [`EmissionError::UnknownFuelType`]
    Strict,
}

/// converts fuel and electricity consumption into pollutant mass.
pub struct FuelEmissionCalculator<'a> {
    reference: &'a ReferenceData,
    policy: FuelLookupPolicy,
}

impl<'a> FuelEmissionCalculator<'a> {
    pub fn new(reference: &'a ReferenceData, policy: FuelLookupPolicy) -> FuelEmissionCalculator<'a> {
        FuelEmissionCalculator { reference, policy }
    }

    /// pollutant mass from parallel sequences of fuel types and quantities,
    /// divided by `normalizer` (zero when the normalizer is zero).
    pub fn compute(
        &self,
        fuel_types: &[String],
        quantities: &[f64],
        pollutant: Pollutant,
        normalizer: f64,
    ) -> Result<f64, EmissionError> {
        if fuel_types.len() != quantities.len() {
            return Err(EmissionError::InvalidInput {
                field: String::from("fuel_types"),
                message: format!(
                    "{} fuel types given for {} quantities",
                    fuel_types.len(),
                    quantities.len()
                ),
            });
        }
        let consumption = fuel_types
            .iter()
            .zip(quantities.iter())
            .map(|(fuel_type, quantity)| FuelConsumption::new(fuel_type, *quantity))
            .collect_vec();
        self.compute_consumption(&consumption, pollutant, normalizer, None)
    }

    /// pollutant mass of a consumption list divided by `normalizer`. when a
    /// vehicle profile is given, black carbon from combustion fuels uses the
    /// vehicle's per-kg-fuel factor instead of the fuel's energy factor.
    pub fn compute_consumption(
        &self,
        consumption: &[FuelConsumption],
        pollutant: Pollutant,
        normalizer: f64,
        vehicle: Option<&VehicleProfile>,
    ) -> Result<f64, EmissionError> {
        let mut total = 0.0;
        for fuel_use in consumption.iter() {
            let field = format!("fuel_consumption.{}", fuel_use.fuel_type);
            let quantity = validation::non_negative(&field, fuel_use.quantity)?;
            total += self.fuel_mass(&fuel_use.fuel_type, quantity, pollutant, vehicle)?;
        }
        Ok(validation::per_unit(total, normalizer))
    }

    /// pollutant mass avoided when `energy` MJ of a fossil fuel is no longer
    /// burned. an electric carrier displaces grid electricity.
    pub fn displaced_fuel(
        &self,
        fuel_type: &ReferenceKey,
        energy: f64,
        pollutant: Pollutant,
    ) -> Result<f64, EmissionError> {
        if fuel_type.is_electric_carrier() {
            return Ok(self.grid_electricity(energy / MJ_PER_KWH, pollutant));
        }
        match self.lookup(fuel_type)? {
            Some(profile) => Ok(energy * profile.emission_factors.get(pollutant)),
            None => Ok(0.0),
        }
    }

    /// pollutant mass of grid electricity. only CO2 is attributed to the grid.
    pub fn grid_electricity(&self, kwh: f64, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Co2 => kwh * self.reference.grid_co2_per_kwh(),
            _ => 0.0,
        }
    }

    fn fuel_mass(
        &self,
        fuel_type: &ReferenceKey,
        quantity: f64,
        pollutant: Pollutant,
        vehicle: Option<&VehicleProfile>,
    ) -> Result<f64, EmissionError> {
        if fuel_type.is_electric_carrier() {
            return Ok(self.grid_electricity(quantity, pollutant));
        }
        let profile = match self.lookup(fuel_type)? {
            Some(profile) => profile,
            None => return Ok(0.0),
        };
        let mass = match (pollutant, vehicle) {
            (Pollutant::Bc, Some(vehicle)) => {
                quantity * profile.density_per_unit * vehicle.bc_per_kg_fuel
            }
            _ => quantity * profile.energy_content_per_unit * profile.emission_factors.get(pollutant),
        };
        Ok(mass)
    }

    fn lookup(&self, fuel_type: &ReferenceKey) -> Result<Option<&'a FuelProfile>, EmissionError> {
        match (self.reference.fuel(fuel_type), self.policy) {
            (Some(profile), _) => Ok(Some(profile)),
            (None, FuelLookupPolicy::ZeroContribution) => {
                log::warn!("fuel type '{fuel_type}' not found in reference data, contributes zero");
                Ok(None)
            }
            (None, FuelLookupPolicy::Strict) => {
                Err(EmissionError::UnknownFuelType(fuel_type.to_string()))
            }
        }
    }
}
