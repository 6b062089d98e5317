mod scenario_input;
mod scenario_report;

pub use scenario_input::Scenario;
pub use scenario_report::{PathwayReport, ScenarioReport};
