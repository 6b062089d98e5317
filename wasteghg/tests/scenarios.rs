use std::{collections::HashMap, sync::Arc};
use wasteghg::model::{
    pathway::{
        CompostingEmissions, CompostingInput, EmissionPathway, LandfillEmissions, LandfillInput,
        TransportationEmissions, TransportationInput,
    },
    CalculationContext,
};
use wasteghg_core::{
    model::{FuelConsumption, Pollutant, ReferenceKey, WasteCategory},
    reference::{ReferenceData, ReferenceDataConfig},
};

fn context() -> CalculationContext {
    CalculationContext::default_tables().expect("bundled reference data")
}

fn context_with_oxidation(oxidation_factor: f64) -> CalculationContext {
    let mut config = ReferenceDataConfig::default_tables().expect("bundled reference data");
    for landfill in config.landfill_types.iter_mut() {
        if landfill.landfill_type.as_str() == "managed_anaerobic" {
            landfill.oxidation_factor = oxidation_factor;
        }
    }
    let reference = ReferenceData::try_from(config).expect("valid reference data");
    CalculationContext::new(Arc::new(reference))
}

#[test]
fn compost_left_unused_avoids_nothing() {
    let input = CompostingInput {
        waste_composted: 100.0,
        compost_production_kg_per_ton: 50.0,
        compost_usage_percent: 0.0,
        ..Default::default()
    };
    let result = CompostingEmissions::new(input, &context())
        .unwrap()
        .overall_emissions()
        .unwrap();
    assert_eq!(result.ch4_emissions_avoid, 0.0);
    assert_eq!(result.co2_emissions_avoid, 0.0);
    assert_eq!(result.n2o_emissions_avoid, 0.0);
    assert_eq!(result.bc_emissions_avoid, 0.0);
    assert_eq!(result.total_emissions_avoid, 0.0);
    assert!(result.ch4_emissions > 0.0);
    assert!(result.n2o_emissions > 0.0);
}

#[test]
fn collection_diesel_is_reported_per_ton() {
    let ctx = context();
    let input = TransportationInput {
        waste_collected_formal: 10.0,
        fuels: vec![FuelConsumption::new("diesel", 100.0)],
        ..Default::default()
    };
    let result = TransportationEmissions::new(input, &ctx)
        .unwrap()
        .overall_emissions()
        .unwrap();
    let diesel = ctx
        .reference
        .fuel(&ReferenceKey::new("diesel"))
        .expect("diesel profile");
    let expected = 100.0 * diesel.energy_content_per_unit * diesel.emission_factors.co2_per_energy / 10.0;
    assert!((result.co2_emissions - expected).abs() < 1e-9);
    assert!((result.co2_emissions_total - expected * 10.0).abs() < 1e-9);
    assert_eq!(result.total_emissions_avoid, 0.0);
    assert_eq!(result.net_emissions, result.total_emissions);
    assert_eq!(result.net_emissions_total, result.total_emissions_total);
}

#[test]
fn landfill_methane_falls_as_oxidation_rises() {
    let input = LandfillInput {
        waste_disposed: 100.0,
        landfill_type: ReferenceKey::new("managed anaerobic"),
        start_year: 2000,
        current_year: 2025,
        end_year: 2025,
        waste_composition: Some(HashMap::from([(WasteCategory::Food, 100.0)])),
        ..Default::default()
    };
    let ch4 = |oxidation: f64| {
        LandfillEmissions::new(input.clone(), &context_with_oxidation(oxidation))
            .unwrap()
            .emit(Pollutant::Ch4)
            .unwrap()
    };
    let open = ch4(0.0);
    let covered = ch4(0.1);
    let capped = ch4(0.5);
    assert!(open > 0.0);
    assert!(covered < open);
    assert!(capped < covered);
}

#[test]
fn landfill_without_recovery_avoids_no_methane() {
    let input = LandfillInput {
        waste_disposed: 40.0,
        ..Default::default()
    };
    let result = LandfillEmissions::new(input, &context())
        .unwrap()
        .overall_emissions()
        .unwrap();
    assert!(result.ch4_emissions > 0.0);
    assert_eq!(result.ch4_emissions_avoid, 0.0);
}
