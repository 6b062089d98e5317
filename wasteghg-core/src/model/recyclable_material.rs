use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecyclableMaterial {
    Paper,
    Plastic,
    #[serde(alias = "aluminium")]
    Aluminum,
    Steel,
    Glass,
}

impl RecyclableMaterial {
    pub const ALL: [RecyclableMaterial; 5] = [
        RecyclableMaterial::Paper,
        RecyclableMaterial::Plastic,
        RecyclableMaterial::Aluminum,
        RecyclableMaterial::Steel,
        RecyclableMaterial::Glass,
    ];
}

impl Display for RecyclableMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecyclableMaterial::Paper => "paper",
            RecyclableMaterial::Plastic => "plastic",
            RecyclableMaterial::Aluminum => "aluminum",
            RecyclableMaterial::Steel => "steel",
            RecyclableMaterial::Glass => "glass",
        };
        write!(f, "{s}")
    }
}
