use super::{biogenic_co2e, fossil_co2e, EmissionPathway, PathwayType};
use crate::model::CalculationContext;
use serde::{Deserialize, Serialize};
use wasteghg_core::{
    calculator::MJ_PER_KWH,
    model::{FuelConsumption, Pollutant, ReferenceKey},
    util::validation,
    EmissionError,
};

/// how the energy in the biogas is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdEnergyProduct {
    /// biogas is flared or vented, nothing is displaced
    #[default]
    None,
    /// combined in an engine to displace grid electricity
    Electricity,
    /// burned for heat in place of a fossil fuel
    Heat,
    /// upgraded and used directly in place of a fossil fuel
    Biogas,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnaerobicDigestionInput {
    /// tons
    pub waste_digested: f64,
    #[serde(default)]
    pub energy_product: AdEnergyProduct,
    /// fossil fuel displaced by heat or upgraded biogas
    #[serde(default)]
    pub fuel_replaced: Option<ReferenceKey>,
    /// overrides the reference biogas yield, m³ per ton
    #[serde(default)]
    pub biogas_yield_m3_per_ton: Option<f64>,
    /// overrides the reference methane content of the biogas
    #[serde(default)]
    pub methane_content_percent: Option<f64>,
    /// overrides the reference efficiency of the selected energy product
    #[serde(default)]
    pub conversion_efficiency_percent: Option<f64>,
    #[serde(default)]
    pub compost_recovered: bool,
    /// share of the digestate recovered as compost, defaults to 100
    #[serde(default)]
    pub compost_recovery_percent: Option<f64>,
    /// share of recovered compost applied in place of chemical fertilizer
    #[serde(default)]
    pub compost_usage_percent: f64,
    #[serde(default)]
    pub electricity_kwh: f64,
    #[serde(default)]
    pub fuels: Vec<FuelConsumption>,
}

/// anaerobic digestion. CH4 leakage and operational energy use are emitted;
/// energy recovered from biogas and fertilizer displaced by digestate compost
/// are avoided.
pub struct AnaerobicDigestionEmissions {
    input: AnaerobicDigestionInput,
    context: CalculationContext,
}

impl AnaerobicDigestionEmissions {
    pub fn new(
        input: AnaerobicDigestionInput,
        context: &CalculationContext,
    ) -> Result<AnaerobicDigestionEmissions, EmissionError> {
        validation::non_negative("waste_digested", input.waste_digested)?;
        validation::non_negative("electricity_kwh", input.electricity_kwh)?;
        validation::fuel_consumption("fuels", &input.fuels)?;
        validation::percent("compost_usage_percent", input.compost_usage_percent)?;
        if let Some(yield_m3) = input.biogas_yield_m3_per_ton {
            validation::non_negative("biogas_yield_m3_per_ton", yield_m3)?;
        }
        if let Some(content) = input.methane_content_percent {
            validation::percent("methane_content_percent", content)?;
        }
        if let Some(efficiency) = input.conversion_efficiency_percent {
            validation::percent("conversion_efficiency_percent", efficiency)?;
        }
        if let Some(recovery) = input.compost_recovery_percent {
            validation::percent("compost_recovery_percent", recovery)?;
        }
        let needs_fuel = matches!(
            input.energy_product,
            AdEnergyProduct::Heat | AdEnergyProduct::Biogas
        );
        if needs_fuel && input.fuel_replaced.is_none() {
            return Err(EmissionError::MissingInput(String::from("fuel_replaced")));
        }
        Ok(AnaerobicDigestionEmissions {
            input,
            context: context.clone(),
        })
    }

    /// MJ of methane energy produced per ton of waste digested
    fn methane_energy(&self) -> f64 {
        let digestion = self.context.reference.anaerobic_digestion();
        let yield_m3 = self
            .input
            .biogas_yield_m3_per_ton
            .unwrap_or(digestion.biogas_yield_m3_per_ton);
        let methane_percent = self
            .input
            .methane_content_percent
            .unwrap_or(digestion.methane_content_percent);
        yield_m3 * methane_percent / 100.0 * digestion.methane_lhv
    }

    /// pollutant mass avoided per ton by the recovered energy
    fn energy_displacement(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        let digestion = self.context.reference.anaerobic_digestion();
        let calculator = self.context.fuel_calculator();
        let efficiency = |default: f64| {
            self.input.conversion_efficiency_percent.unwrap_or(default) / 100.0
        };
        match (self.input.energy_product, &self.input.fuel_replaced) {
            (AdEnergyProduct::None, _) => Ok(0.0),
            (AdEnergyProduct::Electricity, _) => {
                let kwh = self.methane_energy()
                    * efficiency(digestion.electrical_efficiency_percent)
                    / MJ_PER_KWH;
                Ok(calculator.grid_electricity(kwh, pollutant))
            }
            (AdEnergyProduct::Heat, Some(fuel)) => {
                let energy = self.methane_energy() * efficiency(digestion.heat_efficiency_percent);
                calculator.displaced_fuel(fuel, energy, pollutant)
            }
            (AdEnergyProduct::Biogas, Some(fuel)) => {
                let energy =
                    self.methane_energy() * efficiency(digestion.upgrading_efficiency_percent);
                calculator.displaced_fuel(fuel, energy, pollutant)
            }
            (_, None) => Err(EmissionError::MissingInput(String::from("fuel_replaced"))),
        }
    }

    /// pollutant mass avoided per ton by digestate compost applied to land
    fn fertilizer_displacement(&self, pollutant: Pollutant) -> f64 {
        if !self.input.compost_recovered {
            return 0.0;
        }
        let reference = &self.context.reference;
        let recovery = self.input.compost_recovery_percent.unwrap_or(100.0) / 100.0;
        let compost_applied = reference.anaerobic_digestion().digestate_compost_kg_per_ton
            / 1000.0
            * recovery
            * self.input.compost_usage_percent
            / 100.0;
        compost_applied * reference.fertilizer_production().get(pollutant)
    }
}

impl EmissionPathway for AnaerobicDigestionEmissions {
    fn pathway_type(&self) -> PathwayType {
        PathwayType::AnaerobicDigestion
    }

    fn throughput(&self) -> f64 {
        self.input.waste_digested
    }

    fn emit(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        let waste = self.input.waste_digested;
        if waste <= 0.0 {
            return Ok(0.0);
        }
        let reference = &self.context.reference;
        let calculator = self.context.fuel_calculator();
        let fuel = calculator.compute_consumption(&self.input.fuels, pollutant, waste, None)?;
        let process = &reference.biological_treatment().anaerobic_digestion;
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
        if self.input.waste_digested <= 0.0 {
            return Ok(0.0);
        }
        let mass = self.energy_displacement(pollutant)? + self.fertilizer_displacement(pollutant);
        Ok(fossil_co2e(&self.context.reference, pollutant, mass))
    }
}
