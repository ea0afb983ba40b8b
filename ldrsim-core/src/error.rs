//! Invalid-input errors for the divider model and the curve generator.

use thiserror::Error;

/// The single error class of the model: an input that does not describe a
/// valid circuit or sweep. Detected at the call boundary so NaN or infinity
/// never reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CircuitError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("supply voltage must be > 0 V, got {volts}")]
    NonPositiveSupply { volts: f64 },

    #[error("pull-down resistance must be > 0 Ω, got {ohms}")]
    NonPositivePullDown { ohms: f64 },

    #[error("LDR resistance must be >= 0 Ω, got {ohms}")]
    NegativeLdr { ohms: f64 },

    #[error("divider total resistance {total_ohms} Ω is not usable")]
    DegenerateDivider { total_ohms: f64 },

    #[error("invalid sweep range: {min_ohms} Ω .. {max_ohms} Ω (need 0 < min < max)")]
    InvalidSweepRange { min_ohms: f64, max_ohms: f64 },

    #[error("sweep needs at least 2 samples, got {samples}")]
    TooFewSamples { samples: usize },
}

pub type ModelResult<T> = Result<T, CircuitError>;

/// Reject NaN and ±∞ for a named input.
#[inline]
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> ModelResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CircuitError::NotFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let e = CircuitError::NonPositivePullDown { ohms: -5.0 };
        assert_eq!(e.to_string(), "pull-down resistance must be > 0 Ω, got -5");

        let e = CircuitError::TooFewSamples { samples: 1 };
        assert_eq!(e.to_string(), "sweep needs at least 2 samples, got 1");
    }

    #[test]
    fn ensure_finite_rejects_nan() {
        assert!(ensure_finite("x", 1.0).is_ok());
        assert!(matches!(
            ensure_finite("x", f64::NAN),
            Err(CircuitError::NotFinite { field: "x", .. })
        ));
    }
}
