use super::{biogenic_co2e, fossil_co2e, EmissionPathway, PathwayType};
use crate::model::CalculationContext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasteghg_core::{
    calculator::MJ_PER_KWH,
    model::{FuelConsumption, Pollutant, ReferenceKey, WasteCategory},
    reference::IncinerationTypeProperties,
    util::validation,
    EmissionError,
};

/// slack allowed on a composition total for rounding in the input
const COMPOSITION_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyRecoveryType {
    Heat,
    Electricity,
    #[default]
    Both,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnergyRecoveryInput {
    #[serde(default)]
    pub recovery_type: EnergyRecoveryType,
    #[serde(default)]
    pub electricity_recovery_efficiency_percent: f64,
    /// share of recovered electricity consumed by the plant itself
    #[serde(default)]
    pub electricity_used_onsite_percent: f64,
    #[serde(default)]
    pub heat_recovery_efficiency_percent: f64,
    /// share of recovered heat consumed by the plant itself
    #[serde(default)]
    pub heat_used_onsite_percent: f64,
    /// fossil fuel displaced by exported heat
    #[serde(default)]
    pub fuel_replaced: Option<ReferenceKey>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IncinerationInput {
    /// tons
    pub waste_incinerated: f64,
    pub incineration_type: ReferenceKey,
    /// lower heating value of the waste as fired, MJ per kg
    #[serde(default)]
    pub calorific_value_mj_per_kg: Option<f64>,
    /// percent of the incinerated waste in each category
    #[serde(default)]
    pub waste_composition: HashMap<WasteCategory, f64>,
    #[serde(default)]
    pub energy_recovery: EnergyRecoveryInput,
    #[serde(default)]
    pub electricity_kwh: f64,
    #[serde(default)]
    pub fuels: Vec<FuelConsumption>,
}

/// mass burn incineration. fossil carbon in the waste, combustion technology
/// emissions and operational energy are emitted; exported heat and electricity
/// are avoided.
pub struct IncinerationEmissions {
    input: IncinerationInput,
    incinerator: IncinerationTypeProperties,
    context: CalculationContext,
}

impl IncinerationEmissions {
    pub fn new(
        input: IncinerationInput,
        context: &CalculationContext,
    ) -> Result<IncinerationEmissions, EmissionError> {
        validation::non_negative("waste_incinerated", input.waste_incinerated)?;
        validation::non_negative("electricity_kwh", input.electricity_kwh)?;
        validation::fuel_consumption("fuels", &input.fuels)?;
        if let Some(lhv) = input.calorific_value_mj_per_kg {
            validation::non_negative("calorific_value_mj_per_kg", lhv)?;
        }
        let mut composition_total = 0.0;
        for (category, percent) in input.waste_composition.iter() {
            composition_total +=
                validation::percent(&format!("waste_composition.{category}"), *percent)?;
        }
        // a shortfall is the share without fossil carbon
        if composition_total > 100.0 + COMPOSITION_TOLERANCE {
            return Err(EmissionError::InvalidInput {
                field: String::from("waste_composition"),
                message: format!("percentages sum to {composition_total}, more than 100"),
            });
        }
        let recovery = &input.energy_recovery;
        validation::percent(
            "energy_recovery.electricity_recovery_efficiency_percent",
            recovery.electricity_recovery_efficiency_percent,
        )?;
        validation::percent(
            "energy_recovery.electricity_used_onsite_percent",
            recovery.electricity_used_onsite_percent,
        )?;
        validation::percent(
            "energy_recovery.heat_recovery_efficiency_percent",
            recovery.heat_recovery_efficiency_percent,
        )?;
        validation::percent(
            "energy_recovery.heat_used_onsite_percent",
            recovery.heat_used_onsite_percent,
        )?;
        let recovers_heat = matches!(
            recovery.recovery_type,
            EnergyRecoveryType::Heat | EnergyRecoveryType::Both
        ) && recovery.heat_recovery_efficiency_percent > 0.0;
        if recovers_heat && recovery.fuel_replaced.is_none() {
            return Err(EmissionError::MissingInput(String::from(
                "energy_recovery.fuel_replaced",
            )));
        }
        let incinerator = context
            .reference
            .incineration_type(&input.incineration_type)?
            .clone();
        Ok(IncinerationEmissions {
            input,
            incinerator,
            context: context.clone(),
        })
    }

    /// kg fossil CO2 per ton from burning the waste itself
    fn fossil_co2(&self) -> f64 {
        self.context
            .reference
            .fossil_carbon()
            .map(|carbon| {
                let percent = self
                    .input
                    .waste_composition
                    .get(&carbon.category)
                    .copied()
                    .unwrap_or_default();
                carbon.fossil_co2_per_ton() * percent / 100.0
            })
            .sum()
    }

    /// exported heat, MJ per ton
    fn heat_export(&self) -> f64 {
        let recovery = &self.input.energy_recovery;
        let lhv = self.input.calorific_value_mj_per_kg.unwrap_or_default();
        recovery.heat_recovery_efficiency_percent / 100.0
            * 1000.0
            * lhv
            * (100.0 - recovery.heat_used_onsite_percent)
            / 100.0
    }

    /// exported electricity, kWh per ton
    fn electricity_export(&self) -> f64 {
        let recovery = &self.input.energy_recovery;
        let lhv = self.input.calorific_value_mj_per_kg.unwrap_or_default();
        recovery.electricity_recovery_efficiency_percent / 100.0 * 1000.0 * lhv / MJ_PER_KWH
            * (100.0 - recovery.electricity_used_onsite_percent)
            / 100.0
    }

    fn heat_displacement(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        match &self.input.energy_recovery.fuel_replaced {
            Some(fuel) => self
                .context
                .fuel_calculator()
                .displaced_fuel(fuel, self.heat_export(), pollutant),
            None => Ok(0.0),
        }
    }

    fn electricity_displacement(&self, pollutant: Pollutant) -> f64 {
        self.context
            .fuel_calculator()
            .grid_electricity(self.electricity_export(), pollutant)
    }
}

impl EmissionPathway for IncinerationEmissions {
    fn pathway_type(&self) -> PathwayType {
        PathwayType::Incineration
    }

    fn throughput(&self) -> f64 {
        self.input.waste_incinerated
    }

    fn emit(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        let waste = self.input.waste_incinerated;
        if waste <= 0.0 {
            return Ok(0.0);
        }
        let reference = &self.context.reference;
        let calculator = self.context.fuel_calculator();
        let fuel = calculator.compute_consumption(&self.input.fuels, pollutant, waste, None)?;
        let emitted = match pollutant {
            Pollutant::Ch4 => {
                fossil_co2e(reference, pollutant, fuel)
                    + biogenic_co2e(reference, pollutant, self.incinerator.ch4_per_ton)
            }
            Pollutant::N2o => {
                biogenic_co2e(reference, pollutant, fuel + self.incinerator.n2o_per_ton)
            }
            Pollutant::Co2 => {
                let electricity = calculator.grid_electricity(self.input.electricity_kwh, pollutant);
                fuel + validation::per_unit(electricity, waste) + self.fossil_co2()
            }
            Pollutant::Bc => fuel + self.incinerator.bc_per_ton,
        };
        Ok(emitted)
    }

    fn avoid(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        if self.input.waste_incinerated <= 0.0 {
            return Ok(0.0);
        }
        let mass = match self.input.energy_recovery.recovery_type {
            EnergyRecoveryType::Heat => self.heat_displacement(pollutant)?,
            EnergyRecoveryType::Electricity => self.electricity_displacement(pollutant),
            EnergyRecoveryType::Both => {
                self.heat_displacement(pollutant)? + self.electricity_displacement(pollutant)
            }
        };
        Ok(fossil_co2e(&self.context.reference, pollutant, mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CalculationContext {
        CalculationContext::default_tables().unwrap()
    }

    fn incinerator() -> IncinerationInput {
        IncinerationInput {
            waste_incinerated: 100.0,
            incineration_type: ReferenceKey::new("continuous_stoker"),
            calorific_value_mj_per_kg: Some(10.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_plastic_fossil_co2() {
        let context = context();
        let input = IncinerationInput {
            waste_composition: HashMap::from([
                (WasteCategory::Plastic, 20.0),
                (WasteCategory::Food, 80.0),
            ]),
            ..incinerator()
        };
        let pathway = IncinerationEmissions::new(input, &context).unwrap();
        // 1000 kg x 100% dry matter x 75% carbon x 100% fossil x 44/12 x 20%
        let expected = 1000.0 * 0.75 * 44.0 / 12.0 * 0.2;
        assert!((pathway.emit_co2().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_electricity_recovery() {
        let context = context();
        let input = IncinerationInput {
            energy_recovery: EnergyRecoveryInput {
                recovery_type: EnergyRecoveryType::Electricity,
                electricity_recovery_efficiency_percent: 18.0,
                electricity_used_onsite_percent: 50.0,
                heat_recovery_efficiency_percent: 60.0,
                fuel_replaced: Some(ReferenceKey::new("coal")),
                ..Default::default()
            },
            ..incinerator()
        };
        let pathway = IncinerationEmissions::new(input, &context).unwrap();
        let kwh = 0.18 * 1000.0 * 10.0 / 3.6 * 0.5;
        let expected = kwh * context.reference.grid_co2_per_kwh();
        assert!((pathway.avoid_co2().unwrap() - expected).abs() < 1e-9);
        assert_eq!(pathway.avoid_ch4().unwrap(), 0.0);
    }

    #[test]
    fn test_heat_and_electricity_recovery() {
        let context = context();
        let recovery = EnergyRecoveryInput {
            electricity_recovery_efficiency_percent: 18.0,
            heat_recovery_efficiency_percent: 60.0,
            fuel_replaced: Some(ReferenceKey::new("coal")),
            ..Default::default()
        };
        let both = IncinerationEmissions::new(
            IncinerationInput {
                energy_recovery: recovery.clone(),
                ..incinerator()
            },
            &context,
        )
        .unwrap();
        let heat_only = IncinerationEmissions::new(
            IncinerationInput {
                energy_recovery: EnergyRecoveryInput {
                    recovery_type: EnergyRecoveryType::Heat,
                    ..recovery
                },
                ..incinerator()
            },
            &context,
        )
        .unwrap();
        let coal = context.reference.fuel(&ReferenceKey::new("coal")).unwrap();
        let heat = 0.6 * 1000.0 * 10.0 * coal.emission_factors.co2_per_energy;
        assert!((heat_only.avoid_co2().unwrap() - heat).abs() < 1e-9);
        assert!(both.avoid_co2().unwrap() > heat_only.avoid_co2().unwrap());
        assert!(heat_only.avoid_ch4().unwrap() > 0.0);
    }

    #[test]
    fn test_composition_over_100_percent() {
        let input = IncinerationInput {
            waste_composition: HashMap::from([
                (WasteCategory::Plastic, 100.0),
                (WasteCategory::Textile, 100.0),
                (WasteCategory::RubberLeather, 100.0),
            ]),
            ..incinerator()
        };
        match IncinerationEmissions::new(input, &context()) {
            Err(EmissionError::InvalidInput { field, .. }) => {
                assert_eq!(field, "waste_composition")
            }
            other => panic!("expected invalid composition, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_partial_composition_accepted() {
        let context = context();
        let plastic_only = IncinerationInput {
            waste_composition: HashMap::from([(WasteCategory::Plastic, 40.0)]),
            ..incinerator()
        };
        let pathway = IncinerationEmissions::new(plastic_only, &context).unwrap();
        let expected = 1000.0 * 0.75 * 44.0 / 12.0 * 0.4;
        assert!((pathway.emit_co2().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_heat_recovery_requires_fuel() {
        for recovery_type in [EnergyRecoveryType::Heat, EnergyRecoveryType::Both] {
            let input = IncinerationInput {
                energy_recovery: EnergyRecoveryInput {
                    recovery_type,
                    heat_recovery_efficiency_percent: 60.0,
                    ..Default::default()
                },
                ..incinerator()
            };
            assert!(matches!(
                IncinerationEmissions::new(input, &context()),
                Err(EmissionError::MissingInput(field)) if field == "energy_recovery.fuel_replaced"
            ));
        }
        // no heat is exported, so nothing is displaced
        let input = IncinerationInput {
            energy_recovery: EnergyRecoveryInput {
                recovery_type: EnergyRecoveryType::Both,
                electricity_recovery_efficiency_percent: 18.0,
                ..Default::default()
            },
            ..incinerator()
        };
        assert!(IncinerationEmissions::new(input, &context()).is_ok());
    }

    #[test]
    fn test_unknown_incineration_type() {
        let input = IncinerationInput {
            incineration_type: ReferenceKey::new("bonfire"),
            ..incinerator()
        };
        assert!(matches!(
            IncinerationEmissions::new(input, &context()),
            Err(EmissionError::UnknownIncinerationType { .. })
        ));
    }

    #[test]
    fn test_technology_black_carbon() {
        let context = context();
        let pathway = IncinerationEmissions::new(incinerator(), &context).unwrap();
        let stoker = context
            .reference
            .incineration_type(&ReferenceKey::new("continuous_stoker"))
            .unwrap();
        assert_eq!(pathway.emit_bc().unwrap(), stoker.bc_per_ton);
        let result = pathway.overall_emissions().unwrap();
        assert_eq!(result.net_emissions_bc, stoker.bc_per_ton);
    }
}
