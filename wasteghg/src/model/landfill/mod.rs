mod disposal_schedule;
mod fod_engine;
mod fod_parameters;
mod gas_recovery;

pub use disposal_schedule::{DisposalSchedule, DAYS_PER_YEAR};
pub use fod_engine::{FodEngine, FodOutcome, FodScenario, FodYear, CH4_PER_CARBON};
pub use fod_parameters::{FodParameters, MAX_HORIZON_YEARS};
pub use gas_recovery::{LfgTreatment, RecoveryPlan};
