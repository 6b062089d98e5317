use serde::{Deserialize, Serialize};
use wasteghg_core::EmissionError;

/// longest simulation accepted, in years
pub const MAX_HORIZON_YEARS: u32 = 1000;

/// settings of the first-order decay simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FodParameters {
    /// number of simulated years, counted from the first disposal year
    #[serde(default = "FodParameters::default_horizon_years")]
    pub horizon_years: u32,
}

impl FodParameters {
    pub fn default_horizon_years() -> u32 {
        100
    }

    /// the horizon, checked to lie in [1, MAX_HORIZON_YEARS].
    pub fn horizon(&self) -> Result<u32, EmissionError> {
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            Err(EmissionError::InvalidInput {
                field: String::from("horizon_years"),
                message: format!(
                    "{} must be between 1 and {MAX_HORIZON_YEARS}",
                    self.horizon_years
                ),
            })
        } else {
            Ok(self.horizon_years)
        }
    }

    /// last simulated year for a simulation starting in `start_year`.
    pub fn last_year(&self, start_year: i32) -> Result<i32, EmissionError> {
        let horizon = self.horizon()?;
        // horizon is at most MAX_HORIZON_YEARS so the cast cannot wrap
        start_year
            .checked_add(horizon as i32 - 1)
            .ok_or_else(|| EmissionError::InvalidInput {
                field: String::from("start_year"),
                message: format!("{start_year} leaves no room for a {horizon} year simulation"),
            })
    }
}

impl Default for FodParameters {
    fn default() -> Self {
        Self {
            horizon_years: FodParameters::default_horizon_years(),
        }
    }
}
