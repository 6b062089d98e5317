use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// the four reported pollutants. CH4, CO2 and N2O are greenhouse gases and are
/// reported in CO2-equivalent; black carbon is reported as raw mass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pollutant {
    Ch4,
    Co2,
    N2o,
    Bc,
}

impl Pollutant {
    pub const ALL: [Pollutant; 4] = [Pollutant::Ch4, Pollutant::Co2, Pollutant::N2o, Pollutant::Bc];

    /// GWP entry used for this pollutant when it comes from fossil fuel use.
    /// black carbon has no GWP entry.
    pub fn fossil_gas_type(&self) -> Option<GasType> {
        match self {
            Pollutant::Ch4 => Some(GasType::Ch4Fossil),
            Pollutant::Co2 => Some(GasType::Co2),
            Pollutant::N2o => Some(GasType::N2o),
            Pollutant::Bc => None,
        }
    }

    /// GWP entry used for this pollutant when it comes from decomposition of
    /// biogenic material.
    pub fn biogenic_gas_type(&self) -> Option<GasType> {
        match self {
            Pollutant::Ch4 => Some(GasType::Ch4Biogenic),
            Pollutant::Co2 => Some(GasType::Co2),
            Pollutant::N2o => Some(GasType::N2o),
            Pollutant::Bc => None,
        }
    }
}

impl Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Pollutant::Ch4 => "ch4",
            Pollutant::Co2 => "co2",
            Pollutant::N2o => "n2o",
            Pollutant::Bc => "bc",
        };
        write!(f, "{s}")
    }
}

/// keys of the GWP100 table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasType {
    Co2,
    Ch4Fossil,
    Ch4Biogenic,
    N2o,
}

impl GasType {
    pub const ALL: [GasType; 4] = [
        GasType::Co2,
        GasType::Ch4Fossil,
        GasType::Ch4Biogenic,
        GasType::N2o,
    ];
}

impl Display for GasType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GasType::Co2 => "co2",
            GasType::Ch4Fossil => "ch4_fossil",
            GasType::Ch4Biogenic => "ch4_biogenic",
            GasType::N2o => "n2o",
        };
        write!(f, "{s}")
    }
}
