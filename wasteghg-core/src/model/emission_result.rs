use super::Pollutant;
use serde::{Deserialize, Serialize};

/// one value per pollutant. greenhouse gases are held in kg CO2e, black
/// carbon as kg of mass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GasAmounts {
    pub ch4: f64,
    pub co2: f64,
    pub n2o: f64,
    pub bc: f64,
}

impl GasAmounts {
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Ch4 => self.ch4,
            Pollutant::Co2 => self.co2,
            Pollutant::N2o => self.n2o,
            Pollutant::Bc => self.bc,
        }
    }

    pub fn set(&mut self, pollutant: Pollutant, value: f64) {
        match pollutant {
            Pollutant::Ch4 => self.ch4 = value,
            Pollutant::Co2 => self.co2 = value,
            Pollutant::N2o => self.n2o = value,
            Pollutant::Bc => self.bc = value,
        }
    }

    /// sum of the greenhouse gases. black carbon is never part of it.
    pub fn co2e(&self) -> f64 {
        self.ch4 + self.co2 + self.n2o
    }
}

/// emissions of a single treatment pathway, per ton of waste handled and as
/// absolute amounts (`_total` fields).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub ch4_emissions: f64,
    pub ch4_emissions_avoid: f64,
    pub co2_emissions: f64,
    pub co2_emissions_avoid: f64,
    pub n2o_emissions: f64,
    pub n2o_emissions_avoid: f64,
    pub bc_emissions: f64,
    pub bc_emissions_avoid: f64,
    pub total_emissions: f64,
    pub total_emissions_avoid: f64,
    pub net_emissions: f64,
    pub net_emissions_bc: f64,
    pub ch4_emissions_total: f64,
    pub ch4_emissions_avoid_total: f64,
    pub co2_emissions_total: f64,
    pub co2_emissions_avoid_total: f64,
    pub n2o_emissions_total: f64,
    pub n2o_emissions_avoid_total: f64,
    pub bc_emissions_total: f64,
    pub bc_emissions_avoid_total: f64,
    pub total_emissions_total: f64,
    pub total_emissions_avoid_total: f64,
    pub net_emissions_total: f64,
    pub net_emissions_bc_total: f64,
}

impl EmissionResult {
    pub const FIELD_NAMES: [&'static str; 24] = [
        "ch4_emissions",
        "ch4_emissions_avoid",
        "co2_emissions",
        "co2_emissions_avoid",
        "n2o_emissions",
        "n2o_emissions_avoid",
        "bc_emissions",
        "bc_emissions_avoid",
        "total_emissions",
        "total_emissions_avoid",
        "net_emissions",
        "net_emissions_bc",
        "ch4_emissions_total",
        "ch4_emissions_avoid_total",
        "co2_emissions_total",
        "co2_emissions_avoid_total",
        "n2o_emissions_total",
        "n2o_emissions_avoid_total",
        "bc_emissions_total",
        "bc_emissions_avoid_total",
        "total_emissions_total",
        "total_emissions_avoid_total",
        "net_emissions_total",
        "net_emissions_bc_total",
    ];

    /// builds a result from per-ton and absolute amounts, deriving the totals
    /// and net values from exactly those amounts.
    pub fn new(
        emitted: GasAmounts,
        avoided: GasAmounts,
        emitted_total: GasAmounts,
        avoided_total: GasAmounts,
    ) -> EmissionResult {
        let total_emissions = emitted.co2e();
        let total_emissions_avoid = avoided.co2e();
        let total_emissions_total = emitted_total.co2e();
        let total_emissions_avoid_total = avoided_total.co2e();
        EmissionResult {
            ch4_emissions: emitted.ch4,
            ch4_emissions_avoid: avoided.ch4,
            co2_emissions: emitted.co2,
            co2_emissions_avoid: avoided.co2,
            n2o_emissions: emitted.n2o,
            n2o_emissions_avoid: avoided.n2o,
            bc_emissions: emitted.bc,
            bc_emissions_avoid: avoided.bc,
            total_emissions,
            total_emissions_avoid,
            net_emissions: total_emissions - total_emissions_avoid,
            net_emissions_bc: emitted.bc - avoided.bc,
            ch4_emissions_total: emitted_total.ch4,
            ch4_emissions_avoid_total: avoided_total.ch4,
            co2_emissions_total: emitted_total.co2,
            co2_emissions_avoid_total: avoided_total.co2,
            n2o_emissions_total: emitted_total.n2o,
            n2o_emissions_avoid_total: avoided_total.n2o,
            bc_emissions_total: emitted_total.bc,
            bc_emissions_avoid_total: avoided_total.bc,
            total_emissions_total,
            total_emissions_avoid_total,
            net_emissions_total: total_emissions_total - total_emissions_avoid_total,
            net_emissions_bc_total: emitted_total.bc - avoided_total.bc,
        }
    }

    pub fn emitted(&self) -> GasAmounts {
        GasAmounts {
            ch4: self.ch4_emissions,
            co2: self.co2_emissions,
            n2o: self.n2o_emissions,
            bc: self.bc_emissions,
        }
    }

    pub fn avoided(&self) -> GasAmounts {
        GasAmounts {
            ch4: self.ch4_emissions_avoid,
            co2: self.co2_emissions_avoid,
            n2o: self.n2o_emissions_avoid,
            bc: self.bc_emissions_avoid,
        }
    }

    /// field values in the order of [`EmissionResult::FIELD_NAMES`].
    pub fn values(&self) -> [f64; 24] {
        [
            self.ch4_emissions,
            self.ch4_emissions_avoid,
            self.co2_emissions,
            self.co2_emissions_avoid,
            self.n2o_emissions,
            self.n2o_emissions_avoid,
            self.bc_emissions,
            self.bc_emissions_avoid,
            self.total_emissions,
            self.total_emissions_avoid,
            self.net_emissions,
            self.net_emissions_bc,
            self.ch4_emissions_total,
            self.ch4_emissions_avoid_total,
            self.co2_emissions_total,
            self.co2_emissions_avoid_total,
            self.n2o_emissions_total,
            self.n2o_emissions_avoid_total,
            self.bc_emissions_total,
            self.bc_emissions_avoid_total,
            self.total_emissions_total,
            self.total_emissions_avoid_total,
            self.net_emissions_total,
            self.net_emissions_bc_total,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amounts(ch4: f64, co2: f64, n2o: f64, bc: f64) -> GasAmounts {
        GasAmounts { ch4, co2, n2o, bc }
    }

    #[test]
    fn test_net_identity() {
        let result = EmissionResult::new(
            amounts(10.0, 20.0, 3.0, 0.5),
            amounts(1.0, 5.0, 0.25, 0.1),
            amounts(100.0, 200.0, 30.0, 5.0),
            amounts(10.0, 50.0, 2.5, 1.0),
        );
        assert_eq!(result.total_emissions, 33.0);
        assert_eq!(result.total_emissions_avoid, 6.25);
        assert_eq!(
            result.net_emissions,
            result.total_emissions - result.total_emissions_avoid
        );
        assert_eq!(
            result.net_emissions_total,
            result.total_emissions_total - result.total_emissions_avoid_total
        );
        assert_eq!(result.net_emissions_bc, 0.4);
    }

    #[test]
    fn test_bc_excluded_from_totals() {
        let with_bc = EmissionResult::new(
            amounts(1.0, 1.0, 1.0, 1000.0),
            GasAmounts::default(),
            GasAmounts::default(),
            GasAmounts::default(),
        );
        assert_eq!(with_bc.total_emissions, 3.0);
        assert_eq!(with_bc.bc_emissions, 1000.0);
    }

    #[test]
    fn test_values_match_field_names() {
        let result = EmissionResult::new(
            amounts(1.0, 2.0, 3.0, 4.0),
            GasAmounts::default(),
            GasAmounts::default(),
            GasAmounts::default(),
        );
        let json = serde_json::to_value(&result).unwrap();
        for (name, value) in EmissionResult::FIELD_NAMES.iter().zip(result.values()) {
            assert_eq!(json[name].as_f64().unwrap(), value, "field {name}");
        }
    }
}
