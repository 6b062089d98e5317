use super::EmissionPathway;
use wasteghg_core::{
    model::{EmissionResult, GasAmounts, Pollutant},
    EmissionError,
};

/// runs every emit/avoid operation of a pathway once and assembles the
/// per-ton and absolute result. a pathway with no throughput yields an
/// all-zero result.
pub fn overall_emissions(pathway: &dyn EmissionPathway) -> Result<EmissionResult, EmissionError> {
    let pathway_type = pathway.pathway_type();
    if pathway.throughput() <= 0.0 {
        log::debug!("{pathway_type} pathway has no waste throughput, reporting zero emissions");
        return Ok(EmissionResult::default());
    }
    let mut emitted = GasAmounts::default();
    let mut avoided = GasAmounts::default();
    let mut emitted_total = GasAmounts::default();
    let mut avoided_total = GasAmounts::default();
    for pollutant in Pollutant::ALL {
        let emit = pathway.emit(pollutant)?;
        let avoid = pathway.avoid(pollutant)?;
        emitted.set(pollutant, emit);
        avoided.set(pollutant, avoid);
        emitted_total.set(pollutant, pathway.emit_total(pollutant, emit)?);
        avoided_total.set(pollutant, pathway.avoid_total(pollutant, avoid)?);
        log::debug!("{pathway_type} {pollutant}: emitted {emit}, avoided {avoid} per ton");
    }
    Ok(EmissionResult::new(
        emitted,
        avoided,
        emitted_total,
        avoided_total,
    ))
}
