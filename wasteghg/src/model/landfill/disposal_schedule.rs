use super::MAX_HORIZON_YEARS;
use serde::{Deserialize, Serialize};
use wasteghg_core::{util::validation, EmissionError};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// years over which a site receives waste and how the deposited amount grows.
/// the amount measured today is pinned to the current year, earlier years are
/// back-projected and later years projected forward at the growth rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisposalSchedule {
    start_year: i32,
    current_year: i32,
    end_year: i32,
    /// fraction per year
    growth_rate: f64,
}

impl DisposalSchedule {
    pub fn new(
        start_year: i32,
        current_year: i32,
        end_year: i32,
        growth_rate_percent: f64,
    ) -> Result<DisposalSchedule, EmissionError> {
        if start_year > end_year || current_year < start_year || current_year > end_year {
            return Err(EmissionError::InvalidYearRange {
                start_year,
                current_year,
                end_year,
            });
        }
        let span = i64::from(end_year) - i64::from(start_year) + 1;
        if span > i64::from(MAX_HORIZON_YEARS) {
            return Err(EmissionError::InvalidInput {
                field: String::from("end_year"),
                message: format!(
                    "disposal period of {span} years is longer than {MAX_HORIZON_YEARS} years"
                ),
            });
        }
        let growth = validation::non_negative("annual_growth_rate_percent", growth_rate_percent)?;
        Ok(DisposalSchedule {
            start_year,
            current_year,
            end_year,
            growth_rate: growth / 100.0,
        })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// number of years in which waste is deposited
    pub fn disposal_years(&self) -> u32 {
        (self.end_year - self.start_year + 1) as u32
    }

    /// tons deposited in a year given the current daily landfilled amount.
    pub fn deposited(&self, year: i32, daily_tons: f64) -> f64 {
        let current_annual = daily_tons * DAYS_PER_YEAR;
        if year < self.start_year || year > self.end_year {
            0.0
        } else if year == self.current_year {
            current_annual
        } else {
            current_annual * (1.0 + self.growth_rate).powi(year - self.current_year)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_year_pinned() {
        let schedule = DisposalSchedule::new(2000, 2020, 2030, 5.0).unwrap();
        assert_eq!(schedule.deposited(2020, 10.0), 3650.0);
        assert!((schedule.deposited(2019, 10.0) - 3650.0 / 1.05).abs() < 1e-9);
        assert!((schedule.deposited(2021, 10.0) - 3650.0 * 1.05).abs() < 1e-9);
        assert_eq!(schedule.disposal_years(), 31);
    }

    #[test]
    fn test_back_projection_from_start() {
        let schedule = DisposalSchedule::new(2000, 2010, 2010, 3.0).unwrap();
        let start = schedule.deposited(2000, 1.0);
        assert!((start - 365.0 / 1.03f64.powi(10)).abs() < 1e-9);
        assert!((schedule.deposited(2005, 1.0) - start * 1.03f64.powi(5)).abs() < 1e-9);
    }

    #[test]
    fn test_no_deposits_outside_disposal_period() {
        let schedule = DisposalSchedule::new(2000, 2025, 2025, 0.0).unwrap();
        assert_eq!(schedule.deposited(1999, 10.0), 0.0);
        assert_eq!(schedule.deposited(2026, 10.0), 0.0);
        assert_eq!(schedule.deposited(2010, 10.0), 3650.0);
    }

    #[test]
    fn test_invalid_years() {
        assert!(matches!(
            DisposalSchedule::new(2025, 2025, 2000, 0.0),
            Err(EmissionError::InvalidYearRange { .. })
        ));
        assert!(matches!(
            DisposalSchedule::new(2000, 2030, 2025, 0.0),
            Err(EmissionError::InvalidYearRange { .. })
        ));
        assert!(matches!(
            DisposalSchedule::new(2000, 1990, 2025, 0.0),
            Err(EmissionError::InvalidYearRange { .. })
        ));
    }

    #[test]
    fn test_disposal_period_too_long() {
        assert!(matches!(
            DisposalSchedule::new(i32::MIN, 0, i32::MAX, 0.0),
            Err(EmissionError::InvalidInput { field, .. }) if field == "end_year"
        ));
        let longest = DisposalSchedule::new(1, 1, MAX_HORIZON_YEARS as i32, 0.0).unwrap();
        assert_eq!(longest.disposal_years(), MAX_HORIZON_YEARS);
    }
}
