use super::ReferenceKey;
use serde::{Deserialize, Serialize};

/// operating category of a disposal site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandfillTypeProperties {
    pub landfill_type: ReferenceKey,
    /// MCF, fraction in [0, 1]
    pub methane_correction_factor: f64,
    /// OX, fraction of generated methane oxidized in the cover
    pub oxidation_factor: f64,
    /// whether the site can collect landfill gas
    #[serde(default)]
    pub gas_recovery: bool,
}

/// physical constants of landfill gas used by the decay model and by gas
/// recovery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandfillGasProperties {
    /// DOCf, fraction of degradable organic carbon that decomposes
    pub decomposable_doc_fraction: f64,
    /// F, fraction of methane in generated landfill gas
    pub methane_volume_fraction: f64,
    /// kg/m³
    pub methane_density: f64,
    /// MJ/m³
    pub methane_lhv: f64,
    pub boiler_efficiency: f64,
    pub engine_efficiency: f64,
}
