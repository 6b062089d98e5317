use crate::model::pathway::PathwayType;
use serde::{Deserialize, Serialize};
use wasteghg_core::model::EmissionResult;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathwayReport {
    pub pathway: PathwayType,
    pub result: EmissionResult,
}

/// results of every pathway in a scenario and their combined absolute
/// amounts (kg CO2e, kg black carbon).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub pathways: Vec<PathwayReport>,
    pub total_emissions: f64,
    pub total_emissions_avoid: f64,
    pub net_emissions: f64,
    pub net_emissions_bc: f64,
}

impl ScenarioReport {
    pub fn new(name: String, pathways: Vec<PathwayReport>) -> ScenarioReport {
        let total_emissions: f64 = pathways.iter().map(|p| p.result.total_emissions_total).sum();
        let total_emissions_avoid: f64 = pathways
            .iter()
            .map(|p| p.result.total_emissions_avoid_total)
            .sum();
        let net_emissions_bc: f64 = pathways
            .iter()
            .map(|p| p.result.net_emissions_bc_total)
            .sum();
        ScenarioReport {
            name,
            pathways,
            total_emissions,
            total_emissions_avoid,
            net_emissions: total_emissions - total_emissions_avoid,
            net_emissions_bc,
        }
    }
}
