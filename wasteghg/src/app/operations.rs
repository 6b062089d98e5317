use super::AppError;
use crate::model::{
    landfill::FodYear,
    pathway::{
        AnaerobicDigestionEmissions, CompostingEmissions, EmissionPathway, IncinerationEmissions,
        LandfillEmissions, PathwayType, RecyclingEmissions, TransportationEmissions,
    },
    read_input,
    scenario::{Scenario, ScenarioReport},
    CalculationContext,
};
use itertools::Itertools;
use kdam::{Bar, BarExt};
use rayon::prelude::*;
use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use wasteghg_core::{model::EmissionResult, reference::ReferenceData};

/// computes the emissions of a single pathway from its input file.
pub fn run_pathway(
    pathway: PathwayType,
    input_file: &Path,
    context: &CalculationContext,
) -> Result<EmissionResult, AppError> {
    log::info!("computing {pathway} emissions from {}", input_file.display());
    let result = match pathway {
        PathwayType::Transportation => {
            TransportationEmissions::new(read_input(input_file)?, context)?.overall_emissions()?
        }
        PathwayType::Composting => {
            CompostingEmissions::new(read_input(input_file)?, context)?.overall_emissions()?
        }
        PathwayType::AnaerobicDigestion => {
            AnaerobicDigestionEmissions::new(read_input(input_file)?, context)?
                .overall_emissions()?
        }
        PathwayType::Recycling => {
            RecyclingEmissions::new(read_input(input_file)?, context)?.overall_emissions()?
        }
        PathwayType::Incineration => {
            IncinerationEmissions::new(read_input(input_file)?, context)?.overall_emissions()?
        }
        PathwayType::Landfill => {
            LandfillEmissions::new(read_input(input_file)?, context)?.overall_emissions()?
        }
    };
    Ok(result)
}

/// evaluates scenario files in parallel against a shared reference snapshot.
/// reports are returned in input order.
pub fn run_scenarios(
    input_files: &[String],
    context: &CalculationContext,
) -> Result<Vec<ScenarioReport>, AppError> {
    let bar = Arc::new(Mutex::new(
        Bar::builder()
            .desc("scenarios")
            .total(input_files.len())
            .build()
            .map_err(AppError::BatchError)?,
    ));
    let reports = input_files
        .par_iter()
        .map(|f| -> Result<ScenarioReport, AppError> {
            let report = Scenario::from_file(Path::new(f))
                .and_then(|scenario| scenario.evaluate(context))
                .map_err(|source| AppError::ScenarioError {
                    file: f.clone(),
                    source,
                })?;
            if let Ok(mut bar) = bar.lock() {
                let _ = bar.update(1);
            }
            Ok(report)
        })
        .collect::<Result<Vec<_>, AppError>>()?;
    eprintln!();
    Ok(reports)
}

/// writes one row per scenario pathway.
pub fn write_scenario_csv(reports: &[ScenarioReport], output_file: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(output_file)?;
    let header = ["scenario", "pathway"]
        .into_iter()
        .chain(EmissionResult::FIELD_NAMES)
        .collect_vec();
    writer.write_record(&header)?;
    for report in reports.iter() {
        for pathway in report.pathways.iter() {
            let row = [report.name.clone(), pathway.pathway.to_string()]
                .into_iter()
                .chain(pathway.result.values().iter().map(|v| v.to_string()))
                .collect_vec();
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;
    log::info!("wrote scenario results to {}", output_file.display());
    Ok(())
}

/// runs the decay model of a landfill input and returns the per-year rows.
pub fn run_fod_schedule(
    input_file: &Path,
    context: &CalculationContext,
) -> Result<Vec<FodYear>, AppError> {
    let landfill = LandfillEmissions::new(read_input(input_file)?, context)?;
    let outcome = landfill.fod_outcome();
    log::info!(
        "landfill fugitive methane {:.3} kg/t, recovered {:.3} kg/t over {} years",
        outcome.fugitive_ch4_per_ton(),
        outcome.recovered_ch4_per_ton(),
        outcome.years.len()
    );
    Ok(outcome.years.clone())
}

pub fn write_fod_schedule_csv(years: &[FodYear], output_file: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(output_file)?;
    for year in years.iter() {
        writer.serialize(year)?;
    }
    writer.flush()?;
    log::info!("wrote decay schedule to {}", output_file.display());
    Ok(())
}

/// loads and validates a reference data file.
pub fn validate_reference(reference_file: &Path) -> Result<ReferenceData, AppError> {
    let reference = ReferenceData::from_file(reference_file)?;
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_run_pathway() {
        let context = CalculationContext::default_tables().unwrap();
        let path = write_temp(
            "wasteghg_ops_transport.json",
            r#"{"waste_collected_formal": 10.0, "fuels": [{"fuel_type": "Diesel", "quantity": 100.0}]}"#,
        );
        let result = run_pathway(PathwayType::Transportation, &path, &context).unwrap();
        assert!(result.co2_emissions > 0.0);
        assert_eq!(result.net_emissions, result.total_emissions);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_run_scenarios_and_write_csv() {
        let context = CalculationContext::default_tables().unwrap();
        let a = write_temp(
            "wasteghg_ops_scenario_a.json",
            r#"{"name": "a", "landfill": {"waste_disposed": 50.0}}"#,
        );
        let b = write_temp(
            "wasteghg_ops_scenario_b.toml",
            "name = \"b\"\n[composting]\nwaste_composted = 5.0\ncompost_production_kg_per_ton = 300.0\n",
        );
        let files = vec![
            a.to_string_lossy().to_string(),
            b.to_string_lossy().to_string(),
        ];
        let reports = run_scenarios(&files, &context).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "a");
        assert_eq!(reports[1].name, "b");

        let out = std::env::temp_dir().join("wasteghg_ops_scenarios.csv");
        write_scenario_csv(&reports, &out).unwrap();
        let mut reader = csv::Reader::from_path(&out).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 26);
        assert_eq!(reader.records().count(), 2);
        for path in [a, b, out] {
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_missing_scenario_file() {
        let context = CalculationContext::default_tables().unwrap();
        let files = vec![String::from("does/not/exist.json")];
        let result = run_scenarios(&files, &context);
        assert!(matches!(result, Err(AppError::ScenarioError { .. })));
    }

    #[test]
    fn test_fod_schedule() {
        let context = CalculationContext::default_tables().unwrap();
        let path = write_temp(
            "wasteghg_ops_landfill.json",
            r#"{"waste_disposed": 20.0, "landfill_type": "managed anaerobic"}"#,
        );
        let years = run_fod_schedule(&path, &context).unwrap();
        assert_eq!(years.len(), context.fod.horizon_years as usize);
        let generated: f64 = years.iter().map(|y| y.ch4_generated).sum();
        assert!(generated > 0.0);
        let out = std::env::temp_dir().join("wasteghg_ops_fod.csv");
        write_fod_schedule_csv(&years, &out).unwrap();
        assert_eq!(csv::Reader::from_path(&out).unwrap().records().count(), years.len());
        for path in [path, out] {
            std::fs::remove_file(&path).unwrap();
        }
    }
}
