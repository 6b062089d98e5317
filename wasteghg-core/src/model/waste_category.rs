use crate::{util::validation, EmissionError};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

/// municipal solid waste composition categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteCategory {
    Food,
    Garden,
    Paper,
    Wood,
    Textile,
    Nappies,
    #[serde(alias = "leather_rubber")]
    RubberLeather,
    Plastic,
    Metal,
    Glass,
    Hazardous,
    Others,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 12] = [
        WasteCategory::Food,
        WasteCategory::Garden,
        WasteCategory::Paper,
        WasteCategory::Wood,
        WasteCategory::Textile,
        WasteCategory::Nappies,
        WasteCategory::RubberLeather,
        WasteCategory::Plastic,
        WasteCategory::Metal,
        WasteCategory::Glass,
        WasteCategory::Hazardous,
        WasteCategory::Others,
    ];
}

impl Display for WasteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WasteCategory::Food => "food",
            WasteCategory::Garden => "garden",
            WasteCategory::Paper => "paper",
            WasteCategory::Wood => "wood",
            WasteCategory::Textile => "textile",
            WasteCategory::Nappies => "nappies",
            WasteCategory::RubberLeather => "rubber_leather",
            WasteCategory::Plastic => "plastic",
            WasteCategory::Metal => "metal",
            WasteCategory::Glass => "glass",
            WasteCategory::Hazardous => "hazardous",
            WasteCategory::Others => "others",
        };
        write!(f, "{s}")
    }
}

/// percent of waste mass in each category.
pub type WasteComposition = BTreeMap<WasteCategory, f64>;

/// turns user supplied composition percentages into a composition summing to
/// 100. a shortfall is assigned to [`WasteCategory::Others`], an excess is
/// scaled down proportionally.
pub fn normalize_composition(
    percentages: &HashMap<WasteCategory, f64>,
) -> Result<WasteComposition, EmissionError> {
    let mut composition = WasteComposition::new();
    for (category, percent) in percentages.iter() {
        let field = format!("waste_composition.{category}");
        let percent = validation::non_negative(&field, *percent)?;
        *composition.entry(*category).or_insert(0.0) += percent;
    }
    let total: f64 = composition.values().sum();
    if total > 100.0 {
        let scale = 100.0 / total;
        composition.values_mut().for_each(|v| *v *= scale);
    } else if total < 100.0 {
        *composition.entry(WasteCategory::Others).or_insert(0.0) += 100.0 - total;
    }
    Ok(composition)
}
