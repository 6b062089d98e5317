use serde::{Deserialize, Serialize};

/// what is done with collected landfill gas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LfgTreatment {
    #[default]
    Flaring,
    Electricity,
    Heat,
}

/// landfill gas collection during a window of years.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPlan {
    /// fraction of generated gas captured
    pub collection_efficiency: f64,
    /// fraction of captured gas destroyed or used
    pub utilization_efficiency: f64,
    pub treatment: LfgTreatment,
    pub start_year: i32,
    pub end_year: i32,
}

impl RecoveryPlan {
    pub fn is_active(&self, year: i32) -> bool {
        self.start_year <= year && year <= self.end_year
    }

    /// fraction of generated methane that counts as recovered. gas sent to
    /// power generation counts fully once collected.
    pub fn recovered_fraction(&self) -> f64 {
        match self.treatment {
            LfgTreatment::Electricity => self.collection_efficiency,
            LfgTreatment::Flaring | LfgTreatment::Heat => {
                self.collection_efficiency * self.utilization_efficiency
            }
        }
    }
}
