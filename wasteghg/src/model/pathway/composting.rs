use super::{biogenic_co2e, fossil_co2e, EmissionPathway, PathwayType};
use crate::model::CalculationContext;
use serde::{Deserialize, Serialize};
use wasteghg_core::{
    model::{FuelConsumption, Pollutant},
    util::validation,
    EmissionError,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompostingInput {
    /// tons
    pub waste_composted: f64,
    /// compost produced, kg per ton of waste composted
    pub compost_production_kg_per_ton: f64,
    /// share of the compost applied in agriculture or gardens, in place of
    /// chemical fertilizer
    #[serde(default)]
    pub compost_usage_percent: f64,
    #[serde(default)]
    pub electricity_kwh: f64,
    #[serde(default)]
    pub fuels: Vec<FuelConsumption>,
}

/// aerobic composting. the process emits IPCC default biogenic CH4 and N2O
/// on top of operational energy use, and compost applied to land avoids
/// fertilizer production.
pub struct CompostingEmissions {
    input: CompostingInput,
    context: CalculationContext,
}

impl CompostingEmissions {
    pub fn new(
        input: CompostingInput,
        context: &CalculationContext,
    ) -> Result<CompostingEmissions, EmissionError> {
        validation::non_negative("waste_composted", input.waste_composted)?;
        validation::non_negative(
            "compost_production_kg_per_ton",
            input.compost_production_kg_per_ton,
        )?;
        validation::percent("compost_usage_percent", input.compost_usage_percent)?;
        validation::non_negative("electricity_kwh", input.electricity_kwh)?;
        validation::fuel_consumption("fuels", &input.fuels)?;
        Ok(CompostingEmissions {
            input,
            context: context.clone(),
        })
    }

    /// tons of compost displacing fertilizer per ton of waste
    fn compost_applied(&self) -> f64 {
        self.input.compost_production_kg_per_ton / 1000.0 * self.input.compost_usage_percent / 100.0
    }
}

impl EmissionPathway for CompostingEmissions {
    fn pathway_type(&self) -> PathwayType {
        PathwayType::Composting
    }

    fn throughput(&self) -> f64 {
        self.input.waste_composted
    }

    fn emit(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        let waste = self.input.waste_composted;
        if waste <= 0.0 {
            return Ok(0.0);
        }
        let reference = &self.context.reference;
        let calculator = self.context.fuel_calculator();
        let fuel = calculator.compute_consumption(&self.input.fuels, pollutant, waste, None)?;
        let process = &reference.biological_treatment().composting;
        let emitted = match pollutant {
            Pollutant::Ch4 => {
                fossil_co2e(reference, pollutant, fuel)
                    + biogenic_co2e(reference, pollutant, process.ch4_per_ton)
            }
            Pollutant::N2o => biogenic_co2e(reference, pollutant, fuel + process.n2o_per_ton),
            Pollutant::Co2 => {
                let electricity = calculator.grid_electricity(self.input.electricity_kwh, pollutant);
                fuel + validation::per_unit(electricity, waste)
            }
            Pollutant::Bc => fuel,
        };
        Ok(emitted)
    }

    fn avoid(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        if self.input.waste_composted <= 0.0 {
            return Ok(0.0);
        }
        let reference = &self.context.reference;
        let mass = self.compost_applied() * reference.fertilizer_production().get(pollutant);
        Ok(fossil_co2e(reference, pollutant, mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasteghg_core::model::{EmissionResult, GasType};

    fn context() -> CalculationContext {
        CalculationContext::default_tables().unwrap()
    }

    #[test]
    fn test_no_compost_use_avoids_nothing() {
        let input = CompostingInput {
            waste_composted: 100.0,
            compost_production_kg_per_ton: 50.0,
            compost_usage_percent: 0.0,
            ..Default::default()
        };
        let pathway = CompostingEmissions::new(input, &context()).unwrap();
        assert_eq!(pathway.avoid_co2().unwrap(), 0.0);
        assert_eq!(pathway.avoid_ch4().unwrap(), 0.0);
        let result = pathway.overall_emissions().unwrap();
        assert_eq!(result.total_emissions_avoid, 0.0);
        assert_eq!(result.net_emissions, result.total_emissions);
    }

    #[test]
    fn test_process_emissions() {
        let context = context();
        let input = CompostingInput {
            waste_composted: 100.0,
            compost_production_kg_per_ton: 300.0,
            ..Default::default()
        };
        let pathway = CompostingEmissions::new(input, &context).unwrap();
        let process = &context.reference.biological_treatment().composting;
        let gwp = context.reference.gwp();
        assert!(
            (pathway.emit_ch4().unwrap() - gwp.to_co2e(process.ch4_per_ton, GasType::Ch4Biogenic))
                .abs()
                < 1e-12
        );
        assert!(
            (pathway.emit_n2o().unwrap() - gwp.to_co2e(process.n2o_per_ton, GasType::N2o)).abs()
                < 1e-12
        );
        assert_eq!(pathway.emit_co2().unwrap(), 0.0);
    }

    #[test]
    fn test_fertilizer_displacement() {
        let context = context();
        let input = CompostingInput {
            waste_composted: 10.0,
            compost_production_kg_per_ton: 400.0,
            compost_usage_percent: 50.0,
            electricity_kwh: 20.0,
            ..Default::default()
        };
        let pathway = CompostingEmissions::new(input, &context).unwrap();
        let fertilizer = context.reference.fertilizer_production();
        assert!((pathway.avoid_co2().unwrap() - 0.2 * fertilizer.co2_per_ton).abs() < 1e-12);
        assert!((pathway.avoid_bc().unwrap() - 0.2 * fertilizer.bc_per_ton).abs() < 1e-12);
        let expected_co2 = 20.0 * context.reference.grid_co2_per_kwh() / 10.0;
        assert!((pathway.emit_co2().unwrap() - expected_co2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_waste() {
        let input = CompostingInput {
            compost_production_kg_per_ton: 300.0,
            compost_usage_percent: 100.0,
            ..Default::default()
        };
        let pathway = CompostingEmissions::new(input, &context()).unwrap();
        assert_eq!(pathway.emit_ch4().unwrap(), 0.0);
        assert_eq!(pathway.overall_emissions().unwrap(), EmissionResult::default());
    }

    #[test]
    fn test_usage_out_of_range() {
        let input = CompostingInput {
            waste_composted: 1.0,
            compost_usage_percent: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            CompostingEmissions::new(input, &context()),
            Err(EmissionError::PercentOutOfRange { .. })
        ));
    }
}
