use super::{fossil_co2e, EmissionPathway, PathwayType};
use crate::model::CalculationContext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasteghg_core::{
    model::{FuelConsumption, Pollutant, RecyclableMaterial},
    util::validation,
    EmissionError,
};

/// energy used to reprocess one ton of a recovered material.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaterialOperation {
    #[serde(default)]
    pub electricity_kwh_per_ton: f64,
    /// fuel per ton of material reprocessed
    #[serde(default)]
    pub fuels: Vec<FuelConsumption>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecyclingInput {
    /// tons collected for recycling by the formal sector
    pub recycle_collected_formal: f64,
    /// tons collected for recycling by informal waste pickers
    #[serde(default)]
    pub recycle_collected_informal: f64,
    /// percent of each material in the formal stream
    #[serde(default)]
    pub material_composition_formal: HashMap<RecyclableMaterial, f64>,
    /// percent of each material in the informal stream
    #[serde(default)]
    pub material_composition_informal: HashMap<RecyclableMaterial, f64>,
    #[serde(default)]
    pub operations: HashMap<RecyclableMaterial, MaterialOperation>,
    /// percent of each collected material actually turned into secondary
    /// material. materials not listed are fully recycled.
    #[serde(default)]
    pub recyclability_percent: HashMap<RecyclableMaterial, f64>,
}

/// material recycling. reprocessing energy is emitted; virgin production
/// replaced by secondary material is avoided.
pub struct RecyclingEmissions {
    input: RecyclingInput,
    context: CalculationContext,
}

impl RecyclingEmissions {
    pub fn new(
        input: RecyclingInput,
        context: &CalculationContext,
    ) -> Result<RecyclingEmissions, EmissionError> {
        validation::non_negative("recycle_collected_formal", input.recycle_collected_formal)?;
        validation::non_negative("recycle_collected_informal", input.recycle_collected_informal)?;
        for (material, percent) in input.material_composition_formal.iter() {
            validation::percent(&format!("material_composition_formal.{material}"), *percent)?;
        }
        for (material, percent) in input.material_composition_informal.iter() {
            validation::percent(&format!("material_composition_informal.{material}"), *percent)?;
        }
        for (material, percent) in input.recyclability_percent.iter() {
            validation::percent(&format!("recyclability_percent.{material}"), *percent)?;
        }
        for (material, operation) in input.operations.iter() {
            validation::non_negative(
                &format!("operations.{material}.electricity_kwh_per_ton"),
                operation.electricity_kwh_per_ton,
            )?;
            validation::fuel_consumption(&format!("operations.{material}.fuels"), &operation.fuels)?;
        }
        Ok(RecyclingEmissions {
            input,
            context: context.clone(),
        })
    }

    fn formal_fraction(&self) -> f64 {
        validation::per_unit(self.input.recycle_collected_formal, self.throughput())
    }

    fn informal_fraction(&self) -> f64 {
        validation::per_unit(self.input.recycle_collected_informal, self.throughput())
    }

    /// pollutant mass of reprocessing one ton of a material
    fn operation_mass(
        &self,
        material: &RecyclableMaterial,
        pollutant: Pollutant,
    ) -> Result<f64, EmissionError> {
        let operation = match self.input.operations.get(material) {
            Some(operation) => operation,
            None => return Ok(0.0),
        };
        let calculator = self.context.fuel_calculator();
        let fuel = calculator.compute_consumption(&operation.fuels, pollutant, 1.0, None)?;
        let electricity = calculator.grid_electricity(operation.electricity_kwh_per_ton, pollutant);
        Ok(fuel + electricity)
    }

    /// pollutant mass of producing one ton of a material from virgin feedstock
    fn virgin_mass(
        &self,
        material: &RecyclableMaterial,
        pollutant: Pollutant,
    ) -> Result<f64, EmissionError> {
        let production = match self.context.reference.virgin_material(material) {
            Some(production) => production,
            None => {
                log::warn!("no virgin production data for '{material}', no emissions avoided");
                return Ok(0.0);
            }
        };
        let calculator = self.context.fuel_calculator();
        let fuel = calculator.compute_consumption(&production.fuel_use, pollutant, 1.0, None)?;
        let electricity = calculator.grid_electricity(production.electricity_kwh_per_ton, pollutant);
        let process = match pollutant {
            Pollutant::Co2 => production.process_co2_per_ton,
            _ => 0.0,
        };
        Ok(fuel + electricity + process)
    }

    /// direct pollutant mass per ton of a stream with the given composition
    fn stream_emitted(
        &self,
        composition: &HashMap<RecyclableMaterial, f64>,
        pollutant: Pollutant,
    ) -> Result<f64, EmissionError> {
        let mut total = 0.0;
        for (material, percent) in composition.iter() {
            total += percent / 100.0 * self.operation_mass(material, pollutant)?;
        }
        Ok(total)
    }

    /// avoided pollutant mass per ton of a stream with the given composition
    fn stream_avoided(
        &self,
        composition: &HashMap<RecyclableMaterial, f64>,
        pollutant: Pollutant,
    ) -> Result<f64, EmissionError> {
        let mut total = 0.0;
        for (material, percent) in composition.iter() {
            let recyclability = self
                .input
                .recyclability_percent
                .get(material)
                .copied()
                .unwrap_or(100.0);
            total += percent / 100.0 * recyclability / 100.0 * self.virgin_mass(material, pollutant)?;
        }
        Ok(total)
    }
}

impl EmissionPathway for RecyclingEmissions {
    fn pathway_type(&self) -> PathwayType {
        PathwayType::Recycling
    }

    fn throughput(&self) -> f64 {
        self.input.recycle_collected_formal + self.input.recycle_collected_informal
    }

    fn emit(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        if self.throughput() <= 0.0 {
            return Ok(0.0);
        }
        let formal = self.stream_emitted(&self.input.material_composition_formal, pollutant)?;
        let informal = self.stream_emitted(&self.input.material_composition_informal, pollutant)?;
        let mass = self.formal_fraction() * formal + self.informal_fraction() * informal;
        Ok(fossil_co2e(&self.context.reference, pollutant, mass))
    }

    fn avoid(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        if self.throughput() <= 0.0 {
            return Ok(0.0);
        }
        let formal = self.stream_avoided(&self.input.material_composition_formal, pollutant)?;
        let informal = self.stream_avoided(&self.input.material_composition_informal, pollutant)?;
        let mass = self.formal_fraction() * formal + self.informal_fraction() * informal;
        Ok(fossil_co2e(&self.context.reference, pollutant, mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CalculationContext {
        CalculationContext::default_tables().unwrap()
    }

    #[test]
    fn test_virgin_displacement_weighted_by_streams() {
        let context = context();
        let input = RecyclingInput {
            recycle_collected_formal: 30.0,
            recycle_collected_informal: 10.0,
            material_composition_formal: HashMap::from([(RecyclableMaterial::Aluminum, 100.0)]),
            material_composition_informal: HashMap::from([(RecyclableMaterial::Glass, 100.0)]),
            recyclability_percent: HashMap::from([(RecyclableMaterial::Glass, 50.0)]),
            ..Default::default()
        };
        let pathway = RecyclingEmissions::new(input, &context).unwrap();
        let aluminum = pathway
            .virgin_mass(&RecyclableMaterial::Aluminum, Pollutant::Co2)
            .unwrap();
        let glass = pathway
            .virgin_mass(&RecyclableMaterial::Glass, Pollutant::Co2)
            .unwrap();
        let expected = 0.75 * aluminum + 0.25 * 0.5 * glass;
        assert!((pathway.avoid_co2().unwrap() - expected).abs() < 1e-6);
        assert!(aluminum > glass);

        let result = pathway.overall_emissions().unwrap();
        assert!((result.co2_emissions_avoid_total - expected * 40.0).abs() < 1e-6);
        assert!(result.net_emissions < 0.0);
    }

    #[test]
    fn test_reprocessing_energy() {
        let context = context();
        let input = RecyclingInput {
            recycle_collected_formal: 10.0,
            material_composition_formal: HashMap::from([
                (RecyclableMaterial::Plastic, 40.0),
                (RecyclableMaterial::Paper, 60.0),
            ]),
            operations: HashMap::from([(
                RecyclableMaterial::Plastic,
                MaterialOperation {
                    electricity_kwh_per_ton: 500.0,
                    fuels: vec![FuelConsumption::new("diesel", 2.0)],
                },
            )]),
            ..Default::default()
        };
        let pathway = RecyclingEmissions::new(input, &context).unwrap();
        let diesel = context
            .reference
            .fuel(&wasteghg_core::model::ReferenceKey::new("diesel"))
            .unwrap();
        let plastic = 500.0 * context.reference.grid_co2_per_kwh()
            + 2.0 * diesel.energy_content_per_unit * diesel.emission_factors.co2_per_energy;
        assert!((pathway.emit_co2().unwrap() - 0.4 * plastic).abs() < 1e-9);
    }

    #[test]
    fn test_composition_out_of_range() {
        let input = RecyclingInput {
            recycle_collected_formal: 10.0,
            material_composition_formal: HashMap::from([(RecyclableMaterial::Steel, 101.0)]),
            ..Default::default()
        };
        assert!(matches!(
            RecyclingEmissions::new(input, &context()),
            Err(EmissionError::PercentOutOfRange { .. })
        ));
    }
}
