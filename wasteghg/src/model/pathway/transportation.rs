use super::{fossil_co2e, EmissionPathway, PathwayType};
use crate::model::CalculationContext;
use serde::{Deserialize, Serialize};
use wasteghg_core::{
    model::{FuelConsumption, Pollutant, ReferenceKey, VehicleProfile},
    util::validation,
    EmissionError,
};

/// waste collection and haulage, optionally through a transfer station.
///
/// # Example
///
/// ```json
/// {
///   "waste_collected_formal": 120.0,
///   "vehicle_type": "compactor truck",
///   "fuels": [{ "fuel_type": "diesel", "quantity": 310.0 }],
///   "transfer_station": {
///     "waste_handled": 80.0,
///     "electricity_kwh": 150.0
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransportationInput {
    /// waste collected by the formal system, tons
    pub waste_collected_formal: f64,
    /// fuel used by collection vehicles
    #[serde(default)]
    pub fuels: Vec<FuelConsumption>,
    #[serde(default)]
    pub vehicle_type: Option<ReferenceKey>,
    #[serde(default)]
    pub transfer_station: Option<TransferStationInput>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransferStationInput {
    /// tons
    pub waste_handled: f64,
    #[serde(default)]
    pub fuels: Vec<FuelConsumption>,
    #[serde(default)]
    pub electricity_kwh: f64,
}

/// transportation emits through two segments, collection (per ton collected)
/// and transfer (per ton handled at the station). it avoids nothing.
pub struct TransportationEmissions {
    input: TransportationInput,
    vehicle: Option<VehicleProfile>,
    context: CalculationContext,
}

impl TransportationEmissions {
    pub fn new(
        input: TransportationInput,
        context: &CalculationContext,
    ) -> Result<TransportationEmissions, EmissionError> {
        validation::non_negative("waste_collected_formal", input.waste_collected_formal)?;
        validation::fuel_consumption("fuels", &input.fuels)?;
        if let Some(station) = &input.transfer_station {
            validation::non_negative("transfer_station.waste_handled", station.waste_handled)?;
            validation::non_negative("transfer_station.electricity_kwh", station.electricity_kwh)?;
            validation::fuel_consumption("transfer_station.fuels", &station.fuels)?;
        }
        let vehicle = match &input.vehicle_type {
            Some(vehicle_type) => Some(context.reference.vehicle(vehicle_type)?.clone()),
            None => None,
        };
        Ok(TransportationEmissions {
            input,
            vehicle,
            context: context.clone(),
        })
    }

    fn station_waste(&self) -> f64 {
        self.input
            .transfer_station
            .as_ref()
            .map(|s| s.waste_handled)
            .unwrap_or_default()
    }

    /// pollutant mass per ton of each segment: (collection, transfer station)
    fn segments(&self, pollutant: Pollutant) -> Result<(f64, f64), EmissionError> {
        let calculator = self.context.fuel_calculator();
        let collection = calculator.compute_consumption(
            &self.input.fuels,
            pollutant,
            self.input.waste_collected_formal,
            self.vehicle.as_ref(),
        )?;
        let station = match &self.input.transfer_station {
            Some(station) => {
                let fuel = calculator.compute_consumption(
                    &station.fuels,
                    pollutant,
                    station.waste_handled,
                    None,
                )?;
                let electricity = calculator.grid_electricity(station.electricity_kwh, pollutant);
                fuel + validation::per_unit(electricity, station.waste_handled)
            }
            None => 0.0,
        };
        Ok((collection, station))
    }
}

impl EmissionPathway for TransportationEmissions {
    fn pathway_type(&self) -> PathwayType {
        PathwayType::Transportation
    }

    fn throughput(&self) -> f64 {
        self.input.waste_collected_formal + self.station_waste()
    }

    fn emit(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        let (collection, station) = self.segments(pollutant)?;
        Ok(fossil_co2e(&self.context.reference, pollutant, collection + station))
    }

    fn avoid(&self, _pollutant: Pollutant) -> Result<f64, EmissionError> {
        Ok(0.0)
    }

    fn emit_total(&self, pollutant: Pollutant, _per_ton: f64) -> Result<f64, EmissionError> {
        let (collection, station) = self.segments(pollutant)?;
        let mass = collection * self.input.waste_collected_formal + station * self.station_waste();
        Ok(fossil_co2e(&self.context.reference, pollutant, mass))
    }

    fn avoid_total(&self, _pollutant: Pollutant, _per_ton: f64) -> Result<f64, EmissionError> {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasteghg_core::model::GasType;

    fn context() -> CalculationContext {
        CalculationContext::default_tables().unwrap()
    }

    fn diesel_haul(waste: f64, litres: f64) -> TransportationInput {
        TransportationInput {
            waste_collected_formal: waste,
            fuels: vec![FuelConsumption::new("diesel", litres)],
            ..Default::default()
        }
    }

    #[test]
    fn test_diesel_collection() {
        let context = context();
        let pathway = TransportationEmissions::new(diesel_haul(10.0, 100.0), &context).unwrap();
        let diesel = context.reference.fuel(&ReferenceKey::new("diesel")).unwrap();
        let expected_co2 = 100.0 * diesel.energy_content_per_unit * diesel.emission_factors.co2_per_energy / 10.0;
        assert!((pathway.emit_co2().unwrap() - expected_co2).abs() < 1e-9);

        let ch4_mass = 100.0 * diesel.energy_content_per_unit * diesel.emission_factors.ch4_per_energy / 10.0;
        let expected_ch4 = context.reference.gwp().to_co2e(ch4_mass, GasType::Ch4Fossil);
        assert!((pathway.emit_ch4().unwrap() - expected_ch4).abs() < 1e-9);

        let result = pathway.overall_emissions().unwrap();
        assert_eq!(result.total_emissions_avoid, 0.0);
        assert_eq!(result.net_emissions, result.total_emissions);
        assert!((result.co2_emissions_total - expected_co2 * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_station_electricity() {
        let context = context();
        let input = TransportationInput {
            transfer_station: Some(TransferStationInput {
                waste_handled: 50.0,
                fuels: vec![],
                electricity_kwh: 100.0,
            }),
            ..diesel_haul(0.0, 0.0)
        };
        let pathway = TransportationEmissions::new(input, &context).unwrap();
        let expected = 100.0 * context.reference.grid_co2_per_kwh() / 50.0;
        assert!((pathway.emit_co2().unwrap() - expected).abs() < 1e-12);
        let result = pathway.overall_emissions().unwrap();
        assert!((result.co2_emissions_total - 100.0 * context.reference.grid_co2_per_kwh()).abs() < 1e-9);
    }

    #[test]
    fn test_vehicle_black_carbon() {
        let context = context();
        let generic = TransportationEmissions::new(diesel_haul(10.0, 100.0), &context).unwrap();
        let input = TransportationInput {
            vehicle_type: Some(ReferenceKey::new("Tipper Truck")),
            ..diesel_haul(10.0, 100.0)
        };
        let with_vehicle = TransportationEmissions::new(input, &context).unwrap();
        let diesel = context.reference.fuel(&ReferenceKey::new("diesel")).unwrap();
        let vehicle = context.reference.vehicle(&ReferenceKey::new("tipper_truck")).unwrap();
        let expected = 100.0 * diesel.density_per_unit * vehicle.bc_per_kg_fuel / 10.0;
        assert!((with_vehicle.emit_bc().unwrap() - expected).abs() < 1e-12);
        assert_ne!(with_vehicle.emit_bc().unwrap(), generic.emit_bc().unwrap());
    }

    #[test]
    fn test_unknown_vehicle() {
        let input = TransportationInput {
            vehicle_type: Some(ReferenceKey::new("zeppelin")),
            ..diesel_haul(10.0, 100.0)
        };
        let result = TransportationEmissions::new(input, &context());
        assert!(matches!(result, Err(EmissionError::UnknownVehicleType { .. })));
    }

    #[test]
    fn test_negative_waste() {
        let result = TransportationEmissions::new(diesel_haul(-1.0, 100.0), &context());
        match result {
            Err(EmissionError::NegativeInput { field, .. }) => {
                assert_eq!(field, "waste_collected_formal")
            }
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("expected failure"),
        }
    }
}
