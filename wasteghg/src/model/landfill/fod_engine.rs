//! IPCC first-order decay model of methane generation at a disposal site.
//!
//! every year the degradable organic carbon that can decompose under
//! anaerobic conditions (DDOCm) deposited that year joins the accumulated
//! stock, and a fixed share `1 - e^(-k)` of the stock carried over from the
//! previous year decomposes into landfill gas.
use super::{DisposalSchedule, FodParameters, RecoveryPlan};
use serde::{Deserialize, Serialize};
use wasteghg_core::{
    model::{LandfillTypeProperties, WasteComposition},
    reference::ReferenceData,
    util::validation,
    EmissionError,
};

/// molecular weight ratio of CH4 to carbon
pub const CH4_PER_CARBON: f64 = 16.0 / 12.0;

/// a disposal site to simulate.
#[derive(Clone, Debug)]
pub struct FodScenario {
    /// tons landfilled per day in the current year
    pub daily_landfilled: f64,
    pub schedule: DisposalSchedule,
    /// percent by category, summing to 100
    pub composition: WasteComposition,
    pub landfill: LandfillTypeProperties,
    pub recovery: Option<RecoveryPlan>,
}

/// one simulated year. masses in tons.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FodYear {
    pub year: i32,
    pub deposited: f64,
    pub ddocm_deposited: f64,
    pub ddocm_decomposed: f64,
    pub ddocm_accumulated: f64,
    pub ch4_generated: f64,
    pub ch4_recovered: f64,
    pub ch4_emitted: f64,
    pub lfg_collected_m3: f64,
}

/// simulation result over the whole horizon. masses in tons.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FodOutcome {
    pub years: Vec<FodYear>,
    pub total_deposited: f64,
    pub ch4_generated: f64,
    pub ch4_recovered: f64,
    pub ch4_emitted: f64,
    pub lfg_collected_m3: f64,
    pub weighted_doc: f64,
    pub weighted_decay_rate: f64,
}

impl FodOutcome {
    /// kg of methane escaping to the atmosphere per ton of waste deposited
    pub fn fugitive_ch4_per_ton(&self) -> f64 {
        validation::per_unit(self.ch4_emitted * 1000.0, self.total_deposited)
    }

    /// kg of methane recovered per ton of waste deposited
    pub fn recovered_ch4_per_ton(&self) -> f64 {
        validation::per_unit(self.ch4_recovered * 1000.0, self.total_deposited)
    }
}

pub struct FodEngine<'a> {
    reference: &'a ReferenceData,
    parameters: &'a FodParameters,
}

impl<'a> FodEngine<'a> {
    pub fn new(reference: &'a ReferenceData, parameters: &'a FodParameters) -> FodEngine<'a> {
        FodEngine {
            reference,
            parameters,
        }
    }

    /// composition-weighted (DOC, k)
    pub fn weighted_parameters(&self, composition: &WasteComposition) -> (f64, f64) {
        composition
            .iter()
            .fold((0.0, 0.0), |(doc, k), (category, percent)| {
                match self.reference.waste_category(category) {
                    Some(properties) => (
                        doc + percent / 100.0 * properties.doc,
                        k + percent / 100.0 * properties.decay_rate,
                    ),
                    None => (doc, k),
                }
            })
    }

    pub fn run(&self, scenario: &FodScenario) -> Result<FodOutcome, EmissionError> {
        let horizon = self.parameters.horizon()?;
        let schedule = &scenario.schedule;
        let last_year = self.parameters.last_year(schedule.start_year())?;
        if schedule.disposal_years() > horizon {
            return Err(EmissionError::InvalidInput {
                field: String::from("end_year"),
                message: format!(
                    "disposal period of {} years exceeds the {horizon} year simulation horizon",
                    schedule.disposal_years()
                ),
            });
        }
        let daily = validation::non_negative("daily_landfilled", scenario.daily_landfilled)?;

        let gas = self.reference.landfill_gas();
        let (doc, k) = self.weighted_parameters(&scenario.composition);
        let mcf = scenario.landfill.methane_correction_factor;
        let ox = scenario.landfill.oxidation_factor;
        let retained = (-k).exp();
        log::debug!(
            "running FOD from {} over {horizon} years with DOC {doc:.4}, k {k:.4}, MCF {mcf}, OX {ox}",
            schedule.start_year()
        );

        let mut outcome = FodOutcome {
            years: Vec::with_capacity(horizon as usize),
            weighted_doc: doc,
            weighted_decay_rate: k,
            ..Default::default()
        };
        let mut accumulated = 0.0;
        for year in schedule.start_year()..=last_year {
            let deposited = schedule.deposited(year, daily);
            let ddocm_deposited = deposited * doc * gas.decomposable_doc_fraction * mcf;
            let ddocm_decomposed = accumulated * (1.0 - retained);
            accumulated = accumulated * retained + ddocm_deposited;

            let ch4_generated = ddocm_decomposed * gas.methane_volume_fraction * CH4_PER_CARBON;
            let (ch4_recovered, lfg_collected_m3) = match &scenario.recovery {
                Some(plan) if plan.is_active(year) => {
                    let collected_ch4 = ch4_generated * plan.collection_efficiency;
                    let lfg_m3 = validation::per_unit(
                        collected_ch4 * 1000.0 / gas.methane_density,
                        gas.methane_volume_fraction,
                    );
                    (ch4_generated * plan.recovered_fraction(), lfg_m3)
                }
                _ => (0.0, 0.0),
            };
            let ch4_emitted = (ch4_generated - ch4_recovered).max(0.0) * (1.0 - ox);

            outcome.total_deposited += deposited;
            outcome.ch4_generated += ch4_generated;
            outcome.ch4_recovered += ch4_recovered;
            outcome.ch4_emitted += ch4_emitted;
            outcome.lfg_collected_m3 += lfg_collected_m3;
            outcome.years.push(FodYear {
                year,
                deposited,
                ddocm_deposited,
                ddocm_decomposed,
                ddocm_accumulated: accumulated,
                ch4_generated,
                ch4_recovered,
                ch4_emitted,
                lfg_collected_m3,
            });
        }
        log::debug!(
            "FOD deposited {:.1} t, generated {:.3} t CH4, recovered {:.3} t, emitted {:.3} t",
            outcome.total_deposited,
            outcome.ch4_generated,
            outcome.ch4_recovered,
            outcome.ch4_emitted
        );
        Ok(outcome)
    }
}
