use crate::{model::GasType, reference::GwpFactor, EmissionError};
use serde::{Deserialize, Serialize};

/// 100-year global warming potentials. the CO2 entry is fixed at 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GwpTable {
    ch4_fossil: f64,
    ch4_biogenic: f64,
    n2o: f64,
}

impl GwpTable {
    pub fn new(ch4_fossil: f64, ch4_biogenic: f64, n2o: f64) -> GwpTable {
        GwpTable {
            ch4_fossil,
            ch4_biogenic,
            n2o,
        }
    }

    /// builds the table from reference rows. every non-CO2 gas must be present
    /// and a CO2 row, if present, must equal 1.
    pub fn from_factors(factors: &[GwpFactor]) -> Result<GwpTable, EmissionError> {
        let find = |gas: GasType| -> Result<f64, EmissionError> {
            let factor = factors
                .iter()
                .find(|f| f.gas_type == gas)
                .map(|f| f.gwp100)
                .ok_or_else(|| {
                    EmissionError::ReferenceDataError(format!("gwp factor for '{gas}' missing"))
                })?;
            if !factor.is_finite() || factor < 0.0 {
                return Err(EmissionError::ReferenceDataError(format!(
                    "gwp factor for '{gas}' must be non-negative, found {factor}"
                )));
            }
            Ok(factor)
        };
        if let Some(co2) = factors.iter().find(|f| f.gas_type == GasType::Co2) {
            if co2.gwp100 != 1.0 {
                return Err(EmissionError::ReferenceDataError(format!(
                    "gwp factor for 'co2' must be 1, found {}",
                    co2.gwp100
                )));
            }
        }
        Ok(GwpTable {
            ch4_fossil: find(GasType::Ch4Fossil)?,
            ch4_biogenic: find(GasType::Ch4Biogenic)?,
            n2o: find(GasType::N2o)?,
        })
    }

    pub fn gwp100(&self, gas: GasType) -> f64 {
        match gas {
            GasType::Co2 => 1.0,
            GasType::Ch4Fossil => self.ch4_fossil,
            GasType::Ch4Biogenic => self.ch4_biogenic,
            GasType::N2o => self.n2o,
        }
    }

    /// converts a mass of gas into CO2-equivalent mass.
    pub fn to_co2e(&self, mass: f64, gas: GasType) -> f64 {
        mass * self.gwp100(gas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<GwpFactor> {
        vec![
            GwpFactor {
                gas_type: GasType::Co2,
                gwp100: 1.0,
            },
            GwpFactor {
                gas_type: GasType::Ch4Fossil,
                gwp100: 29.8,
            },
            GwpFactor {
                gas_type: GasType::Ch4Biogenic,
                gwp100: 27.0,
            },
            GwpFactor {
                gas_type: GasType::N2o,
                gwp100: 273.0,
            },
        ]
    }

    #[test]
    fn test_to_co2e() {
        let table = GwpTable::from_factors(&rows()).unwrap();
        assert_eq!(table.to_co2e(12.5, GasType::Co2), 12.5);
        assert_eq!(table.to_co2e(2.0, GasType::Ch4Fossil), 59.6);
        assert_eq!(table.to_co2e(2.0, GasType::Ch4Biogenic), 54.0);
        assert_eq!(table.to_co2e(1.0, GasType::N2o), 273.0);
        assert_eq!(table.to_co2e(0.0, GasType::N2o), 0.0);
    }

    #[test]
    fn test_missing_gas() {
        let rows = rows()
            .into_iter()
            .filter(|r| r.gas_type != GasType::N2o)
            .collect::<Vec<_>>();
        assert!(matches!(
            GwpTable::from_factors(&rows),
            Err(EmissionError::ReferenceDataError(_))
        ));
    }

    #[test]
    fn test_co2_must_be_one() {
        let mut rows = rows();
        rows[0].gwp100 = 2.0;
        assert!(GwpTable::from_factors(&rows).is_err());
    }
}
