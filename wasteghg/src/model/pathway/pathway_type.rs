use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PathwayType {
    Transportation,
    Composting,
    AnaerobicDigestion,
    Recycling,
    Incineration,
    Landfill,
}

impl Display for PathwayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PathwayType::Transportation => "transportation",
            PathwayType::Composting => "composting",
            PathwayType::AnaerobicDigestion => "anaerobic_digestion",
            PathwayType::Recycling => "recycling",
            PathwayType::Incineration => "incineration",
            PathwayType::Landfill => "landfill",
        };
        write!(f, "{s}")
    }
}
