use super::{
    tables::{
        BiologicalTreatment, DigestionProperties, FertilizerProductionFactors,
        FossilCarbonProperties, IncinerationTypeProperties, VirginMaterialProduction,
        WasteCategoryProperties, UNCATEGORIZED_LANDFILL,
    },
    ReferenceDataConfig,
};
use crate::{
    calculator::GwpTable,
    model::{
        FuelProfile, LandfillGasProperties, LandfillTypeProperties, RecyclableMaterial,
        ReferenceKey, VehicleProfile, WasteCategory, WasteComposition,
    },
    util::validation,
    EmissionError,
};
use itertools::Itertools;
use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
    hash::Hash,
    path::Path,
};

/// tolerance when checking that default composition percentages sum to 100
const COMPOSITION_TOLERANCE: f64 = 1e-6;

/// immutable, validated bundle of every reference table used by the
/// calculators. build one with [`ReferenceData::default_tables`],
/// [`ReferenceData::from_file`] or `TryFrom<ReferenceDataConfig>`, then share it
/// (typically behind an `Arc`) across calculations.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    version: String,
    fuels: HashMap<ReferenceKey, FuelProfile>,
    gwp: GwpTable,
    grid_co2_per_kwh: f64,
    vehicles: HashMap<ReferenceKey, VehicleProfile>,
    waste_categories: BTreeMap<WasteCategory, WasteCategoryProperties>,
    landfill_types: HashMap<ReferenceKey, LandfillTypeProperties>,
    uncategorized_landfill: LandfillTypeProperties,
    landfill_gas: LandfillGasProperties,
    biological_treatment: BiologicalTreatment,
    fertilizer_production: FertilizerProductionFactors,
    anaerobic_digestion: DigestionProperties,
    incineration_types: HashMap<ReferenceKey, IncinerationTypeProperties>,
    fossil_carbon: BTreeMap<WasteCategory, FossilCarbonProperties>,
    virgin_materials: HashMap<RecyclableMaterial, VirginMaterialProduction>,
}

impl ReferenceData {
    /// the reference tables bundled with this crate.
    pub fn default_tables() -> Result<ReferenceData, EmissionError> {
        ReferenceData::try_from(ReferenceDataConfig::default_tables()?)
    }

    pub fn from_file(path: &Path) -> Result<ReferenceData, EmissionError> {
        let config = ReferenceDataConfig::from_file(path)?;
        let data = ReferenceData::try_from(config)?;
        log::info!(
            "loaded reference data version '{}' from {}",
            data.version,
            path.display()
        );
        Ok(data)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn fuel(&self, fuel_type: &ReferenceKey) -> Option<&FuelProfile> {
        self.fuels.get(fuel_type)
    }

    pub fn gwp(&self) -> &GwpTable {
        &self.gwp
    }

    /// kg CO2 per kWh of grid electricity
    pub fn grid_co2_per_kwh(&self) -> f64 {
        self.grid_co2_per_kwh
    }

    pub fn vehicle(&self, vehicle_type: &ReferenceKey) -> Result<&VehicleProfile, EmissionError> {
        self.vehicles
            .get(vehicle_type)
            .ok_or_else(|| EmissionError::UnknownVehicleType {
                vehicle_type: vehicle_type.to_string(),
                available: self.vehicles.keys().sorted().join(", "),
            })
    }

    pub fn waste_category(&self, category: &WasteCategory) -> Option<&WasteCategoryProperties> {
        self.waste_categories.get(category)
    }

    /// default composition of municipal solid waste, percent by category.
    pub fn default_composition(&self) -> WasteComposition {
        self.waste_categories
            .iter()
            .filter(|(_, p)| p.default_composition_percent > 0.0)
            .map(|(c, p)| (*c, p.default_composition_percent))
            .collect()
    }

    /// properties of a landfill type, falling back to the uncategorized entry
    /// when the type is absent from the table.
    pub fn landfill_type(&self, landfill_type: &ReferenceKey) -> &LandfillTypeProperties {
        match self.landfill_types.get(landfill_type) {
            Some(properties) => properties,
            None => {
                log::debug!(
                    "landfill type '{landfill_type}' not found, using '{UNCATEGORIZED_LANDFILL}'"
                );
                &self.uncategorized_landfill
            }
        }
    }

    pub fn landfill_gas(&self) -> &LandfillGasProperties {
        &self.landfill_gas
    }

    pub fn biological_treatment(&self) -> &BiologicalTreatment {
        &self.biological_treatment
    }

    pub fn fertilizer_production(&self) -> &FertilizerProductionFactors {
        &self.fertilizer_production
    }

    pub fn anaerobic_digestion(&self) -> &DigestionProperties {
        &self.anaerobic_digestion
    }

    pub fn incineration_type(
        &self,
        incineration_type: &ReferenceKey,
    ) -> Result<&IncinerationTypeProperties, EmissionError> {
        self.incineration_types
            .get(incineration_type)
            .ok_or_else(|| EmissionError::UnknownIncinerationType {
                incineration_type: incineration_type.to_string(),
                available: self.incineration_types.keys().sorted().join(", "),
            })
    }

    pub fn fossil_carbon(&self) -> impl Iterator<Item = &FossilCarbonProperties> {
        self.fossil_carbon.values()
    }

    pub fn virgin_material(&self, material: &RecyclableMaterial) -> Option<&VirginMaterialProduction> {
        self.virgin_materials.get(material)
    }
}

impl TryFrom<ReferenceDataConfig> for ReferenceData {
    type Error = EmissionError;

    fn try_from(config: ReferenceDataConfig) -> Result<Self, Self::Error> {
        for fuel in config.fuels.iter() {
            let name = format!("fuels.{}", fuel.fuel_type);
            non_negative(&name, "energy_content_per_unit", fuel.energy_content_per_unit)?;
            non_negative(&name, "density_per_unit", fuel.density_per_unit)?;
            let factors = &fuel.emission_factors;
            non_negative(&name, "ch4_per_energy", factors.ch4_per_energy)?;
            non_negative(&name, "co2_per_energy", factors.co2_per_energy)?;
            non_negative(&name, "n2o_per_energy", factors.n2o_per_energy)?;
            non_negative(&name, "bc_per_energy", factors.bc_per_energy)?;
        }
        let fuels = index("fuels", config.fuels, |f| f.fuel_type.clone())?;

        let gwp = GwpTable::from_factors(&config.gwp_factors)?;
        let grid_co2_per_kwh = config.electricity_grid_factor.co2_per_kwh;
        non_negative("electricity_grid_factor", "co2_per_kwh", grid_co2_per_kwh)?;

        for vehicle in config.vehicle_bc_factors.iter() {
            let name = format!("vehicle_bc_factors.{}", vehicle.vehicle_type);
            non_negative(&name, "bc_per_kg_fuel", vehicle.bc_per_kg_fuel)?;
        }
        let vehicles = index("vehicle_bc_factors", config.vehicle_bc_factors, |v| {
            v.vehicle_type.clone()
        })?;

        for category in config.waste_categories.iter() {
            let name = format!("waste_categories.{}", category.category);
            fraction(&name, "doc", category.doc)?;
            non_negative(&name, "decay_rate", category.decay_rate)?;
            percent(
                &name,
                "default_composition_percent",
                category.default_composition_percent,
            )?;
        }
        let waste_categories: BTreeMap<_, _> =
            index("waste_categories", config.waste_categories, |c| c.category)?
                .into_iter()
                .collect();
        if let Some(missing) = WasteCategory::ALL
            .iter()
            .find(|c| !waste_categories.contains_key(*c))
        {
            return Err(EmissionError::ReferenceDataError(format!(
                "waste category '{missing}' missing from waste_categories"
            )));
        }
        let composition_sum: f64 = waste_categories
            .values()
            .map(|c| c.default_composition_percent)
            .sum();
        if (composition_sum - 100.0).abs() > COMPOSITION_TOLERANCE {
            return Err(EmissionError::ReferenceDataError(format!(
                "default waste composition must sum to 100, found {composition_sum}"
            )));
        }

        for landfill in config.landfill_types.iter() {
            let name = format!("landfill_types.{}", landfill.landfill_type);
            fraction(&name, "methane_correction_factor", landfill.methane_correction_factor)?;
            fraction(&name, "oxidation_factor", landfill.oxidation_factor)?;
        }
        let landfill_types = index("landfill_types", config.landfill_types, |l| {
            l.landfill_type.clone()
        })?;
        let uncategorized_landfill = landfill_types
            .get(&ReferenceKey::new(UNCATEGORIZED_LANDFILL))
            .cloned()
            .ok_or_else(|| {
                EmissionError::ReferenceDataError(format!(
                    "landfill type '{UNCATEGORIZED_LANDFILL}' missing from landfill_types"
                ))
            })?;

        let gas = &config.landfill_gas;
        fraction("landfill_gas", "decomposable_doc_fraction", gas.decomposable_doc_fraction)?;
        fraction("landfill_gas", "methane_volume_fraction", gas.methane_volume_fraction)?;
        fraction("landfill_gas", "boiler_efficiency", gas.boiler_efficiency)?;
        fraction("landfill_gas", "engine_efficiency", gas.engine_efficiency)?;
        non_negative("landfill_gas", "methane_lhv", gas.methane_lhv)?;
        if !(gas.methane_density > 0.0) {
            return Err(EmissionError::ReferenceDataError(format!(
                "landfill_gas.methane_density must be positive, found {}",
                gas.methane_density
            )));
        }

        let bio = &config.biological_treatment;
        non_negative("composting", "ch4_per_ton", bio.composting.ch4_per_ton)?;
        non_negative("composting", "n2o_per_ton", bio.composting.n2o_per_ton)?;
        non_negative("anaerobic_digestion", "ch4_per_ton", bio.anaerobic_digestion.ch4_per_ton)?;
        non_negative("anaerobic_digestion", "n2o_per_ton", bio.anaerobic_digestion.n2o_per_ton)?;

        let fert = &config.fertilizer_production;
        non_negative("fertilizer_production", "ch4_per_ton", fert.ch4_per_ton)?;
        non_negative("fertilizer_production", "co2_per_ton", fert.co2_per_ton)?;
        non_negative("fertilizer_production", "n2o_per_ton", fert.n2o_per_ton)?;
        non_negative("fertilizer_production", "bc_per_ton", fert.bc_per_ton)?;

        let ad = &config.anaerobic_digestion;
        non_negative("anaerobic_digestion", "biogas_yield_m3_per_ton", ad.biogas_yield_m3_per_ton)?;
        non_negative("anaerobic_digestion", "methane_lhv", ad.methane_lhv)?;
        non_negative(
            "anaerobic_digestion",
            "digestate_compost_kg_per_ton",
            ad.digestate_compost_kg_per_ton,
        )?;
        percent("anaerobic_digestion", "methane_content_percent", ad.methane_content_percent)?;
        percent(
            "anaerobic_digestion",
            "electrical_efficiency_percent",
            ad.electrical_efficiency_percent,
        )?;
        percent("anaerobic_digestion", "heat_efficiency_percent", ad.heat_efficiency_percent)?;
        percent(
            "anaerobic_digestion",
            "upgrading_efficiency_percent",
            ad.upgrading_efficiency_percent,
        )?;

        for incinerator in config.incineration_types.iter() {
            let name = format!("incineration_types.{}", incinerator.incineration_type);
            non_negative(&name, "ch4_per_ton", incinerator.ch4_per_ton)?;
            non_negative(&name, "n2o_per_ton", incinerator.n2o_per_ton)?;
            non_negative(&name, "bc_per_ton", incinerator.bc_per_ton)?;
        }
        let incineration_types = index("incineration_types", config.incineration_types, |i| {
            i.incineration_type.clone()
        })?;

        for carbon in config.fossil_carbon.iter() {
            let name = format!("fossil_carbon.{}", carbon.category);
            percent(&name, "dry_matter_percent", carbon.dry_matter_percent)?;
            percent(&name, "total_carbon_percent", carbon.total_carbon_percent)?;
            percent(&name, "fossil_carbon_percent", carbon.fossil_carbon_percent)?;
            percent(&name, "oxidation_factor_percent", carbon.oxidation_factor_percent)?;
        }
        let fossil_carbon = index("fossil_carbon", config.fossil_carbon, |c| c.category)?
            .into_iter()
            .collect();

        for virgin in config.virgin_materials.iter() {
            let name = format!("virgin_materials.{}", virgin.material);
            non_negative(&name, "electricity_kwh_per_ton", virgin.electricity_kwh_per_ton)?;
            non_negative(&name, "process_co2_per_ton", virgin.process_co2_per_ton)?;
            for fuel_use in virgin.fuel_use.iter() {
                non_negative(&name, fuel_use.fuel_type.as_str(), fuel_use.quantity)?;
                if !fuel_use.fuel_type.is_electric_carrier() && !fuels.contains_key(&fuel_use.fuel_type) {
                    return Err(EmissionError::ReferenceDataError(format!(
                        "{name} uses fuel '{}' which is missing from fuels",
                        fuel_use.fuel_type
                    )));
                }
            }
        }
        let virgin_materials = index("virgin_materials", config.virgin_materials, |v| v.material)?;

        Ok(ReferenceData {
            version: config.version,
            fuels,
            gwp,
            grid_co2_per_kwh,
            vehicles,
            waste_categories,
            landfill_types,
            uncategorized_landfill,
            landfill_gas: config.landfill_gas,
            biological_treatment: config.biological_treatment,
            fertilizer_production: config.fertilizer_production,
            anaerobic_digestion: config.anaerobic_digestion,
            incineration_types,
            fossil_carbon,
            virgin_materials,
        })
    }
}

/// builds a lookup table, rejecting duplicate keys.
fn index<K, V>(
    table: &str,
    rows: Vec<V>,
    key: impl Fn(&V) -> K,
) -> Result<HashMap<K, V>, EmissionError>
where
    K: Eq + Hash + Display,
{
    let mut result = HashMap::with_capacity(rows.len());
    for row in rows.into_iter() {
        let k = key(&row);
        if result.contains_key(&k) {
            return Err(EmissionError::ReferenceDataError(format!(
                "duplicate entry '{k}' in {table}"
            )));
        }
        result.insert(k, row);
    }
    Ok(result)
}

fn non_negative(table: &str, field: &str, value: f64) -> Result<(), EmissionError> {
    validation::non_negative(&format!("{table}.{field}"), value)
        .map(|_| ())
        .map_err(|e| EmissionError::ReferenceDataError(e.to_string()))
}

fn percent(table: &str, field: &str, value: f64) -> Result<(), EmissionError> {
    validation::percent(&format!("{table}.{field}"), value)
        .map(|_| ())
        .map_err(|e| EmissionError::ReferenceDataError(e.to_string()))
}

fn fraction(table: &str, field: &str, value: f64) -> Result<(), EmissionError> {
    validation::fraction(&format!("{table}.{field}"), value)
        .map(|_| ())
        .map_err(|e| EmissionError::ReferenceDataError(e.to_string()))
}
