use super::{PathwayReport, ScenarioReport};
use crate::model::{
    pathway::{
        AnaerobicDigestionEmissions, AnaerobicDigestionInput, CompostingEmissions,
        CompostingInput, EmissionPathway, IncinerationEmissions, IncinerationInput,
        LandfillEmissions, LandfillInput, PathwayType, RecyclingEmissions, RecyclingInput,
        TransportationEmissions, TransportationInput,
    },
    read_input, CalculationContext,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wasteghg_core::EmissionError;

/// a municipality's waste management system: one optional input block per
/// treatment pathway.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub transportation: Option<TransportationInput>,
    #[serde(default)]
    pub composting: Option<CompostingInput>,
    #[serde(default)]
    pub anaerobic_digestion: Option<AnaerobicDigestionInput>,
    #[serde(default)]
    pub recycling: Option<RecyclingInput>,
    #[serde(default)]
    pub incineration: Option<IncinerationInput>,
    #[serde(default)]
    pub landfill: Option<LandfillInput>,
}

impl Scenario {
    /// reads a scenario from a .json or .toml file.
    pub fn from_file(path: &Path) -> Result<Scenario, EmissionError> {
        read_input(path)
    }

    /// builds the pathway calculators present in this scenario.
    pub fn pathways(
        &self,
        context: &CalculationContext,
    ) -> Result<Vec<Box<dyn EmissionPathway>>, EmissionError> {
        let mut pathways: Vec<Box<dyn EmissionPathway>> = vec![];
        if let Some(input) = &self.transportation {
            let pathway = TransportationEmissions::new(input.clone(), context)
                .map_err(|e| e.in_pathway(PathwayType::Transportation))?;
            pathways.push(Box::new(pathway));
        }
        if let Some(input) = &self.composting {
            let pathway = CompostingEmissions::new(input.clone(), context)
                .map_err(|e| e.in_pathway(PathwayType::Composting))?;
            pathways.push(Box::new(pathway));
        }
        if let Some(input) = &self.anaerobic_digestion {
            let pathway = AnaerobicDigestionEmissions::new(input.clone(), context)
                .map_err(|e| e.in_pathway(PathwayType::AnaerobicDigestion))?;
            pathways.push(Box::new(pathway));
        }
        if let Some(input) = &self.recycling {
            let pathway = RecyclingEmissions::new(input.clone(), context)
                .map_err(|e| e.in_pathway(PathwayType::Recycling))?;
            pathways.push(Box::new(pathway));
        }
        if let Some(input) = &self.incineration {
            let pathway = IncinerationEmissions::new(input.clone(), context)
                .map_err(|e| e.in_pathway(PathwayType::Incineration))?;
            pathways.push(Box::new(pathway));
        }
        if let Some(input) = &self.landfill {
            let pathway = LandfillEmissions::new(input.clone(), context)
                .map_err(|e| e.in_pathway(PathwayType::Landfill))?;
            pathways.push(Box::new(pathway));
        }
        Ok(pathways)
    }

    pub fn evaluate(&self, context: &CalculationContext) -> Result<ScenarioReport, EmissionError> {
        let pathways = self.pathways(context)?;
        let mut reports = Vec::with_capacity(pathways.len());
        for pathway in pathways.iter() {
            let pathway_type = pathway.pathway_type();
            let result = crate::model::pathway::overall_emissions(pathway.as_ref())
                .map_err(|e| e.in_pathway(pathway_type))?;
            reports.push(PathwayReport {
                pathway: pathway_type,
                result,
            });
        }
        log::info!(
            "scenario '{}' evaluated {} pathways",
            self.name,
            reports.len()
        );
        Ok(ScenarioReport::new(self.name.clone(), reports))
    }
}
