use super::{biogenic_co2e, fossil_co2e, EmissionPathway, PathwayType};
use crate::model::{
    landfill::{DisposalSchedule, FodEngine, FodOutcome, FodScenario, LfgTreatment, RecoveryPlan},
    CalculationContext,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasteghg_core::{
    calculator::MJ_PER_KWH,
    model::{normalize_composition, FuelConsumption, Pollutant, ReferenceKey, WasteCategory},
    reference::UNCATEGORIZED_LANDFILL,
    util::validation,
    EmissionError,
};

/// landfill gas collection at a recovery-enabled site.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GasRecoveryInput {
    pub collection_efficiency_percent: f64,
    #[serde(default = "GasRecoveryInput::default_utilization")]
    pub utilization_efficiency_percent: f64,
    #[serde(default)]
    pub treatment: LfgTreatment,
    /// first year of collection, defaults to the first disposal year
    #[serde(default)]
    pub start_year: Option<i32>,
    /// last year of collection, defaults to the end of the simulation
    #[serde(default)]
    pub end_year: Option<i32>,
    /// fossil fuel displaced when the gas is burned for heat
    #[serde(default)]
    pub fuel_replaced: Option<ReferenceKey>,
}

impl GasRecoveryInput {
    fn default_utilization() -> f64 {
        100.0
    }
}

/// a disposal site.
///
/// # Example
///
/// ```json
/// {
///   "waste_disposed": 250.0,
///   "open_burned_percent": 5.0,
///   "landfill_type": "sanitary with gas recovery",
///   "start_year": 2005,
///   "current_year": 2024,
///   "end_year": 2035,
///   "annual_growth_rate_percent": 2.0,
///   "gas_recovery": {
///     "collection_efficiency_percent": 50.0,
///     "treatment": "electricity"
///   }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LandfillInput {
    /// tons arriving per day
    pub waste_disposed: f64,
    /// share of the arriving waste burned in the open instead of landfilled
    #[serde(default)]
    pub open_burned_percent: f64,
    #[serde(default = "LandfillInput::default_landfill_type")]
    pub landfill_type: ReferenceKey,
    #[serde(default = "LandfillInput::default_start_year")]
    pub start_year: i32,
    #[serde(default = "LandfillInput::default_current_year")]
    pub current_year: i32,
    #[serde(default = "LandfillInput::default_end_year")]
    pub end_year: i32,
    #[serde(default)]
    pub annual_growth_rate_percent: f64,
    /// percent by category. the reference default composition applies when
    /// absent
    #[serde(default)]
    pub waste_composition: Option<HashMap<WasteCategory, f64>>,
    #[serde(default)]
    pub gas_recovery: Option<GasRecoveryInput>,
    #[serde(default)]
    pub electricity_kwh: f64,
    #[serde(default)]
    pub fuels: Vec<FuelConsumption>,
}

impl LandfillInput {
    fn default_landfill_type() -> ReferenceKey {
        ReferenceKey::new(UNCATEGORIZED_LANDFILL)
    }

    fn default_start_year() -> i32 {
        2000
    }

    fn default_current_year() -> i32 {
        2025
    }

    fn default_end_year() -> i32 {
        2025
    }
}

impl Default for LandfillInput {
    fn default() -> Self {
        Self {
            waste_disposed: 0.0,
            open_burned_percent: 0.0,
            landfill_type: LandfillInput::default_landfill_type(),
            start_year: LandfillInput::default_start_year(),
            current_year: LandfillInput::default_current_year(),
            end_year: LandfillInput::default_end_year(),
            annual_growth_rate_percent: 0.0,
            waste_composition: None,
            gas_recovery: None,
            electricity_kwh: 0.0,
            fuels: vec![],
        }
    }
}

/// landfill disposal. methane from decay of the deposited waste (net of
/// recovery and cover oxidation) and operational energy are emitted; recovered
/// methane and the energy it displaces are avoided.
pub struct LandfillEmissions {
    input: LandfillInput,
    scenario: FodScenario,
    fuel_replaced: Option<ReferenceKey>,
    outcome: FodOutcome,
    context: CalculationContext,
}

impl LandfillEmissions {
    pub fn new(
        input: LandfillInput,
        context: &CalculationContext,
    ) -> Result<LandfillEmissions, EmissionError> {
        validation::non_negative("waste_disposed", input.waste_disposed)?;
        validation::percent("open_burned_percent", input.open_burned_percent)?;
        validation::non_negative("electricity_kwh", input.electricity_kwh)?;
        validation::fuel_consumption("fuels", &input.fuels)?;
        let schedule = DisposalSchedule::new(
            input.start_year,
            input.current_year,
            input.end_year,
            input.annual_growth_rate_percent,
        )?;
        let composition = match &input.waste_composition {
            Some(percentages) => normalize_composition(percentages)?,
            None => context.reference.default_composition(),
        };
        let landfill = context.reference.landfill_type(&input.landfill_type).clone();

        let horizon_end = context.fod.last_year(input.start_year)?;
        let (recovery, fuel_replaced) = match &input.gas_recovery {
            Some(gas) if landfill.gas_recovery => {
                let plan = recovery_plan(gas, input.start_year, horizon_end)?;
                if plan.treatment == LfgTreatment::Heat && gas.fuel_replaced.is_none() {
                    return Err(EmissionError::MissingInput(String::from(
                        "gas_recovery.fuel_replaced",
                    )));
                }
                (Some(plan), gas.fuel_replaced.clone())
            }
            Some(_) => {
                log::warn!(
                    "landfill type '{}' does not collect gas, ignoring gas recovery",
                    landfill.landfill_type
                );
                (None, None)
            }
            None => (None, None),
        };

        let scenario = FodScenario {
            daily_landfilled: input.waste_disposed * (100.0 - input.open_burned_percent) / 100.0,
            schedule,
            composition,
            landfill,
            recovery,
        };
        let outcome = FodEngine::new(&context.reference, &context.fod).run(&scenario)?;
        Ok(LandfillEmissions {
            input,
            scenario,
            fuel_replaced,
            outcome,
            context: context.clone(),
        })
    }

    pub fn fod_outcome(&self) -> &FodOutcome {
        &self.outcome
    }

    /// tons landfilled per day, after open burning
    fn landfilled(&self) -> f64 {
        self.scenario.daily_landfilled
    }

    /// pollutant mass per ton avoided by using recovered gas as an energy source
    fn energy_displacement(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        let plan = match &self.scenario.recovery {
            Some(plan) => plan,
            None => return Ok(0.0),
        };
        let gas = self.context.reference.landfill_gas();
        let calculator = self.context.fuel_calculator();
        let energy = self.outcome.recovered_ch4_per_ton() / gas.methane_density * gas.methane_lhv;
        match (plan.treatment, &self.fuel_replaced) {
            (LfgTreatment::Flaring, _) => Ok(0.0),
            (LfgTreatment::Electricity, _) => {
                let kwh = energy * gas.engine_efficiency / MJ_PER_KWH;
                Ok(calculator.grid_electricity(kwh, pollutant))
            }
            (LfgTreatment::Heat, Some(fuel)) => {
                calculator.displaced_fuel(fuel, energy * gas.boiler_efficiency, pollutant)
            }
            (LfgTreatment::Heat, None) => Ok(0.0),
        }
    }
}

fn recovery_plan(
    gas: &GasRecoveryInput,
    disposal_start: i32,
    horizon_end: i32,
) -> Result<RecoveryPlan, EmissionError> {
    let collection = validation::percent(
        "gas_recovery.collection_efficiency_percent",
        gas.collection_efficiency_percent,
    )?;
    let utilization = validation::percent(
        "gas_recovery.utilization_efficiency_percent",
        gas.utilization_efficiency_percent,
    )?;
    let start_year = gas.start_year.unwrap_or(disposal_start);
    let end_year = gas.end_year.unwrap_or(horizon_end);
    if start_year > end_year {
        return Err(EmissionError::InvalidInput {
            field: String::from("gas_recovery.start_year"),
            message: format!("start year {start_year} is after end year {end_year}"),
        });
    }
    Ok(RecoveryPlan {
        collection_efficiency: collection / 100.0,
        utilization_efficiency: utilization / 100.0,
        treatment: gas.treatment,
        start_year,
        end_year,
    })
}

impl EmissionPathway for LandfillEmissions {
    fn pathway_type(&self) -> PathwayType {
        PathwayType::Landfill
    }

    fn throughput(&self) -> f64 {
        self.input.waste_disposed
    }

    fn emit(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        if self.input.waste_disposed <= 0.0 {
            return Ok(0.0);
        }
        let reference = &self.context.reference;
        let calculator = self.context.fuel_calculator();
        let landfilled = self.landfilled();
        let fuel = calculator.compute_consumption(&self.input.fuels, pollutant, landfilled, None)?;
        let emitted = match pollutant {
            Pollutant::Ch4 => {
                fossil_co2e(reference, pollutant, fuel)
                    + biogenic_co2e(reference, pollutant, self.outcome.fugitive_ch4_per_ton())
            }
            Pollutant::Co2 => {
                let electricity = calculator.grid_electricity(self.input.electricity_kwh, pollutant);
                fuel + validation::per_unit(electricity, landfilled)
            }
            Pollutant::N2o => fossil_co2e(reference, pollutant, fuel),
            Pollutant::Bc => fuel,
        };
        Ok(emitted)
    }

    fn avoid(&self, pollutant: Pollutant) -> Result<f64, EmissionError> {
        if self.input.waste_disposed <= 0.0 {
            return Ok(0.0);
        }
        let reference = &self.context.reference;
        let displaced = fossil_co2e(reference, pollutant, self.energy_displacement(pollutant)?);
        let recovered = match pollutant {
            Pollutant::Ch4 => {
                biogenic_co2e(reference, pollutant, self.outcome.recovered_ch4_per_ton())
            }
            _ => 0.0,
        };
        Ok(displaced + recovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::landfill::FodParameters;

    fn context() -> CalculationContext {
        CalculationContext::default_tables().unwrap()
    }

    #[test]
    fn test_defaults_from_json() {
        let input: LandfillInput = serde_json::from_str(r#"{"waste_disposed": 100.0}"#).unwrap();
        assert_eq!(input.landfill_type.as_str(), "uncategorized");
        assert_eq!(input.start_year, 2000);
        assert_eq!(input.current_year, 2025);
        assert_eq!(input.end_year, 2025);
        let pathway = LandfillEmissions::new(input, &context()).unwrap();
        assert!(pathway.emit_ch4().unwrap() > 0.0);
        assert_eq!(pathway.avoid_ch4().unwrap(), 0.0);
    }

    #[test]
    fn test_fully_burned_waste_does_not_decay() {
        let input = LandfillInput {
            waste_disposed: 100.0,
            open_burned_percent: 100.0,
            ..Default::default()
        };
        let pathway = LandfillEmissions::new(input, &context()).unwrap();
        assert_eq!(pathway.fod_outcome().ch4_generated, 0.0);
        assert_eq!(pathway.emit_ch4().unwrap(), 0.0);
    }

    #[test]
    fn test_recovery_ignored_without_gas_collection() {
        let input = LandfillInput {
            waste_disposed: 100.0,
            landfill_type: ReferenceKey::new("open dump shallow"),
            gas_recovery: Some(GasRecoveryInput {
                collection_efficiency_percent: 50.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        let pathway = LandfillEmissions::new(input, &context()).unwrap();
        assert_eq!(pathway.fod_outcome().ch4_recovered, 0.0);
        assert_eq!(pathway.avoid_ch4().unwrap(), 0.0);
    }

    #[test]
    fn test_electricity_recovery() {
        let context = context();
        let base = LandfillInput {
            waste_disposed: 100.0,
            landfill_type: ReferenceKey::new("sanitary_with_gas_recovery"),
            ..Default::default()
        };
        let without = LandfillEmissions::new(base.clone(), &context).unwrap();
        let input = LandfillInput {
            gas_recovery: Some(GasRecoveryInput {
                collection_efficiency_percent: 50.0,
                utilization_efficiency_percent: 100.0,
                treatment: LfgTreatment::Electricity,
                ..Default::default()
            }),
            ..base
        };
        let with = LandfillEmissions::new(input, &context).unwrap();
        assert!(with.emit_ch4().unwrap() < without.emit_ch4().unwrap());
        assert!(with.avoid_ch4().unwrap() > 0.0);
        assert!(with.avoid_co2().unwrap() > 0.0);
        assert_eq!(with.avoid_bc().unwrap(), 0.0);
        let result = with.overall_emissions().unwrap();
        assert_eq!(
            result.net_emissions,
            result.total_emissions - result.total_emissions_avoid
        );
    }

    #[test]
    fn test_heat_recovery_requires_fuel() {
        let input = LandfillInput {
            waste_disposed: 100.0,
            landfill_type: ReferenceKey::new("sanitary_with_gas_recovery"),
            gas_recovery: Some(GasRecoveryInput {
                collection_efficiency_percent: 50.0,
                treatment: LfgTreatment::Heat,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            LandfillEmissions::new(input, &context()),
            Err(EmissionError::MissingInput(_))
        ));
    }

    #[test]
    fn test_invalid_years() {
        let input = LandfillInput {
            waste_disposed: 100.0,
            start_year: 2030,
            ..Default::default()
        };
        assert!(matches!(
            LandfillEmissions::new(input, &context()),
            Err(EmissionError::InvalidYearRange { .. })
        ));
    }

    #[test]
    fn test_years_at_end_of_range() {
        let year = i32::MAX - 10;
        let input = LandfillInput {
            waste_disposed: 100.0,
            start_year: year,
            current_year: year,
            end_year: year,
            ..Default::default()
        };
        assert!(matches!(
            LandfillEmissions::new(input, &context()),
            Err(EmissionError::InvalidInput { field, .. }) if field == "start_year"
        ));
    }

    #[test]
    fn test_horizon_too_long() {
        let context = context().with_fod_parameters(FodParameters {
            horizon_years: u32::MAX,
        });
        let input = LandfillInput {
            waste_disposed: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            LandfillEmissions::new(input, &context),
            Err(EmissionError::InvalidInput { field, .. }) if field == "horizon_years"
        ));
    }
}
