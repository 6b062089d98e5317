//! input checks shared by every calculator. each check names the offending
//! field so callers receive a single structured failure.
use crate::{model::FuelConsumption, EmissionError};

/// accepts finite, non-negative values.
pub fn non_negative(field: &str, value: f64) -> Result<f64, EmissionError> {
    if !value.is_finite() {
        Err(EmissionError::NonNumericInput {
            field: field.to_string(),
        })
    } else if value < 0.0 {
        Err(EmissionError::NegativeInput {
            field: field.to_string(),
            value,
        })
    } else {
        Ok(value)
    }
}

/// accepts finite values in [0, 100].
pub fn percent(field: &str, value: f64) -> Result<f64, EmissionError> {
    let value = non_negative(field, value)?;
    if value > 100.0 {
        Err(EmissionError::PercentOutOfRange {
            field: field.to_string(),
            value,
        })
    } else {
        Ok(value)
    }
}

/// accepts finite values in [0, 1].
pub fn fraction(field: &str, value: f64) -> Result<f64, EmissionError> {
    let value = non_negative(field, value)?;
    if value > 1.0 {
        Err(EmissionError::InvalidInput {
            field: field.to_string(),
            message: format!("{value} must be a fraction in [0, 1]"),
        })
    } else {
        Ok(value)
    }
}

/// checks every quantity of a fuel consumption list.
pub fn fuel_consumption(field: &str, consumption: &[FuelConsumption]) -> Result<(), EmissionError> {
    for fuel_use in consumption.iter() {
        non_negative(&format!("{field}.{}", fuel_use.fuel_type), fuel_use.quantity)?;
    }
    Ok(())
}

/// divides by a denominator, yielding zero for a zero (or negative) denominator.
pub fn per_unit(value: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        value / denominator
    } else {
        0.0
    }
}

/// multiplier used to scale per-ton results to absolute amounts.
pub fn absolute_multiplier(throughput: f64) -> f64 {
    if throughput > 0.0 {
        throughput
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative("waste", 3.5).unwrap(), 3.5);
        assert_eq!(non_negative("waste", 0.0).unwrap(), 0.0);
        match non_negative("waste", -1.0) {
            Err(EmissionError::NegativeInput { field, value }) => {
                assert_eq!(field, "waste");
                assert_eq!(value, -1.0);
            }
            other => panic!("expected NegativeInput, found {other:?}"),
        }
        assert!(matches!(
            non_negative("waste", f64::NAN),
            Err(EmissionError::NonNumericInput { .. })
        ));
        assert!(matches!(
            non_negative("waste", f64::INFINITY),
            Err(EmissionError::NonNumericInput { .. })
        ));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent("usage", 100.0).unwrap(), 100.0);
        assert!(matches!(
            percent("usage", 100.5),
            Err(EmissionError::PercentOutOfRange { .. })
        ));
        assert!(matches!(
            percent("usage", -0.5),
            Err(EmissionError::NegativeInput { .. })
        ));
    }

    #[test]
    fn test_per_unit_zero_denominator() {
        assert_eq!(per_unit(10.0, 0.0), 0.0);
        assert_eq!(per_unit(10.0, 4.0), 2.5);
    }

    #[test]
    fn test_absolute_multiplier() {
        assert_eq!(absolute_multiplier(0.0), 1.0);
        assert_eq!(absolute_multiplier(12.0), 12.0);
    }
}
