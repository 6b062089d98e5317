use super::landfill::FodParameters;
use std::sync::Arc;
use wasteghg_core::{
    calculator::{FuelEmissionCalculator, FuelLookupPolicy},
    reference::ReferenceData,
    EmissionError,
};

/// everything a pathway calculator needs besides its own inputs: a reference
/// data snapshot and the calculation policies. cheap to clone.
#[derive(Clone, Debug)]
pub struct CalculationContext {
    pub reference: Arc<ReferenceData>,
    pub fuel_lookup_policy: FuelLookupPolicy,
    pub fod: FodParameters,
}

impl CalculationContext {
    pub fn new(reference: Arc<ReferenceData>) -> CalculationContext {
        CalculationContext {
            reference,
            fuel_lookup_policy: FuelLookupPolicy::default(),
            fod: FodParameters::default(),
        }
    }

    /// context over the bundled reference tables.
    pub fn default_tables() -> Result<CalculationContext, EmissionError> {
        let reference = ReferenceData::default_tables()?;
        Ok(CalculationContext::new(Arc::new(reference)))
    }

    pub fn with_fuel_lookup_policy(mut self, policy: FuelLookupPolicy) -> CalculationContext {
        self.fuel_lookup_policy = policy;
        self
    }

    pub fn with_fod_parameters(mut self, fod: FodParameters) -> CalculationContext {
        self.fod = fod;
        self
    }

    pub fn fuel_calculator(&self) -> FuelEmissionCalculator<'_> {
        FuelEmissionCalculator::new(&self.reference, self.fuel_lookup_policy)
    }
}
