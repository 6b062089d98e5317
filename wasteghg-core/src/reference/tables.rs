use crate::model::{FuelConsumption, GasType, Pollutant, RecyclableMaterial, ReferenceKey, WasteCategory};
use serde::{Deserialize, Serialize};

/// molecular weight ratio of CO2 to carbon
pub const CO2_PER_CARBON: f64 = 44.0 / 12.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GwpFactor {
    pub gas_type: GasType,
    pub gwp100: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectricityGridFactor {
    pub co2_per_kwh: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WasteCategoryProperties {
    pub category: WasteCategory,
    /// degradable organic carbon, fraction of wet mass
    pub doc: f64,
    /// first-order decay rate constant k, 1/year
    pub decay_rate: f64,
    pub default_composition_percent: f64,
}

/// IPCC default process emissions of a biological treatment, kg per ton of
/// wet waste treated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiologicalTreatmentFactors {
    pub ch4_per_ton: f64,
    pub n2o_per_ton: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiologicalTreatment {
    pub composting: BiologicalTreatmentFactors,
    pub anaerobic_digestion: BiologicalTreatmentFactors,
}

/// emissions from producing the chemical fertilizer displaced by one ton of
/// compost applied to land, kg per ton of compost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FertilizerProductionFactors {
    pub ch4_per_ton: f64,
    pub co2_per_ton: f64,
    pub n2o_per_ton: f64,
    pub bc_per_ton: f64,
}

impl FertilizerProductionFactors {
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Ch4 => self.ch4_per_ton,
            Pollutant::Co2 => self.co2_per_ton,
            Pollutant::N2o => self.n2o_per_ton,
            Pollutant::Bc => self.bc_per_ton,
        }
    }
}

/// default performance of an anaerobic digester.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DigestionProperties {
    pub biogas_yield_m3_per_ton: f64,
    pub methane_content_percent: f64,
    /// MJ per m³ of methane
    pub methane_lhv: f64,
    pub electrical_efficiency_percent: f64,
    pub heat_efficiency_percent: f64,
    pub upgrading_efficiency_percent: f64,
    /// compost-like digestate recoverable per ton of waste digested, kg
    pub digestate_compost_kg_per_ton: f64,
}

/// combustion-technology emissions of an incinerator, kg per ton of waste.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncinerationTypeProperties {
    pub incineration_type: ReferenceKey,
    pub ch4_per_ton: f64,
    pub n2o_per_ton: f64,
    pub bc_per_ton: f64,
}

/// carbon content parameters of a waste category, all percentages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FossilCarbonProperties {
    pub category: WasteCategory,
    pub dry_matter_percent: f64,
    /// of dry matter
    pub total_carbon_percent: f64,
    /// of total carbon
    pub fossil_carbon_percent: f64,
    pub oxidation_factor_percent: f64,
}

impl FossilCarbonProperties {
    /// kg fossil CO2 released when burning one ton of this category.
    pub fn fossil_co2_per_ton(&self) -> f64 {
        1000.0
            * (self.dry_matter_percent / 100.0)
            * (self.total_carbon_percent / 100.0)
            * (self.fossil_carbon_percent / 100.0)
            * (self.oxidation_factor_percent / 100.0)
            * CO2_PER_CARBON
    }
}

/// energy used to make one ton of a material from virgin feedstock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VirginMaterialProduction {
    pub material: RecyclableMaterial,
    pub electricity_kwh_per_ton: f64,
    #[serde(default)]
    pub fuel_use: Vec<FuelConsumption>,
    /// non-energy process CO2, kg per ton
    #[serde(default)]
    pub process_co2_per_ton: f64,
}

/// default key of the landfill type used when a requested type is absent.
pub const UNCATEGORIZED_LANDFILL: &str = "uncategorized";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fossil_co2_per_ton() {
        let plastic = FossilCarbonProperties {
            category: WasteCategory::Plastic,
            dry_matter_percent: 100.0,
            total_carbon_percent: 75.0,
            fossil_carbon_percent: 100.0,
            oxidation_factor_percent: 100.0,
        };
        assert!((plastic.fossil_co2_per_ton() - 2750.0).abs() < 1e-9);
    }
}
