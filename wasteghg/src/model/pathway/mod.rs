mod aggregate;
mod anaerobic_digestion;
mod composting;
mod incineration;
mod landfill;
mod pathway_type;
mod recycling;
mod transportation;

pub use aggregate::overall_emissions;
pub use anaerobic_digestion::{AdEnergyProduct, AnaerobicDigestionEmissions, AnaerobicDigestionInput};
pub use composting::{CompostingEmissions, CompostingInput};
pub use incineration::{
    EnergyRecoveryInput, EnergyRecoveryType, IncinerationEmissions, IncinerationInput,
};
pub use landfill::{GasRecoveryInput, LandfillEmissions, LandfillInput};
pub use pathway_type::PathwayType;
pub use recycling::{MaterialOperation, RecyclingEmissions, RecyclingInput};
pub use transportation::{TransferStationInput, TransportationEmissions, TransportationInput};

use wasteghg_core::{
    model::{EmissionResult, Pollutant},
    reference::ReferenceData,
    util::validation,
    EmissionError,
};

/// a waste treatment pathway able to report emitted and avoided amounts of
/// each pollutant per ton of waste handled. CH4, CO2 and N2O are in kg CO2e
/// per ton, black carbon in kg per ton.
pub trait EmissionPathway {
    fn pathway_type(&self) -> PathwayType;

    /// mass of waste handled, tons.
    fn throughput(&self) -> f64;

    fn emit(&self, pollutant: Pollutant) -> Result<f64, EmissionError>;

    fn avoid(&self, pollutant: Pollutant) -> Result<f64, EmissionError>;

    /// absolute emitted amount given the per-ton amount.
    fn emit_total(&self, _pollutant: Pollutant, per_ton: f64) -> Result<f64, EmissionError> {
        Ok(per_ton * validation::absolute_multiplier(self.throughput()))
    }

    /// absolute avoided amount given the per-ton amount.
    fn avoid_total(&self, _pollutant: Pollutant, per_ton: f64) -> Result<f64, EmissionError> {
        Ok(per_ton * validation::absolute_multiplier(self.throughput()))
    }

    fn emit_ch4(&self) -> Result<f64, EmissionError> {
        self.emit(Pollutant::Ch4)
    }

    fn emit_co2(&self) -> Result<f64, EmissionError> {
        self.emit(Pollutant::Co2)
    }

    fn emit_n2o(&self) -> Result<f64, EmissionError> {
        self.emit(Pollutant::N2o)
    }

    fn emit_bc(&self) -> Result<f64, EmissionError> {
        self.emit(Pollutant::Bc)
    }

    fn avoid_ch4(&self) -> Result<f64, EmissionError> {
        self.avoid(Pollutant::Ch4)
    }

    fn avoid_co2(&self) -> Result<f64, EmissionError> {
        self.avoid(Pollutant::Co2)
    }

    fn avoid_n2o(&self) -> Result<f64, EmissionError> {
        self.avoid(Pollutant::N2o)
    }

    fn avoid_bc(&self) -> Result<f64, EmissionError> {
        self.avoid(Pollutant::Bc)
    }

    fn overall_emissions(&self) -> Result<EmissionResult, EmissionError>
    where
        Self: Sized,
    {
        overall_emissions(self)
    }
}

/// reported amount of a pollutant mass from fossil sources: CO2e for the
/// greenhouse gases, raw mass for black carbon.
pub(crate) fn fossil_co2e(reference: &ReferenceData, pollutant: Pollutant, mass: f64) -> f64 {
    match pollutant.fossil_gas_type() {
        Some(gas) => reference.gwp().to_co2e(mass, gas),
        None => mass,
    }
}

/// reported amount of a pollutant mass from biogenic sources.
pub(crate) fn biogenic_co2e(reference: &ReferenceData, pollutant: Pollutant, mass: f64) -> f64 {
    match pollutant.biogenic_gas_type() {
        Some(gas) => reference.gwp().to_co2e(mass, gas),
        None => mass,
    }
}
