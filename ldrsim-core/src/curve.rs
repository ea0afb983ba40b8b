//! Curve generator: pin voltage across a logarithmic LDR sweep.
//!
//! Samples are evenly spaced in `log10(R)`, so every decade of the LDR swing
//! gets the same number of points on a log-scaled axis. The sweep is an
//! iterator; nothing is allocated unless the caller collects it.

use crate::divider::{pin_voltage, validate};
use crate::error::{ensure_finite, CircuitError, ModelResult};
use crate::math::{exp10, lerp, log10, round_to};

/// Decimal places kept on each sample's voltage.
pub const VOLTAGE_DECIMALS: i32 = 4;

/// One point on the Vpin-vs-R_LDR curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSample {
    pub resistance_ohms: f64,
    pub log_resistance: f64,
    /// Rounded to [`VOLTAGE_DECIMALS`].
    pub pin_voltage: f64,
}

/// Resistance span and resolution of a sweep.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SweepRange {
    pub min_ohms: f64,
    pub max_ohms: f64,
    pub samples: usize,
}

impl SweepRange {
    /// 1 kΩ .. 1 MΩ in 120 points, the span of a typical LDR from bright to dark.
    pub const REFERENCE: Self = Self { min_ohms: 1_000.0, max_ohms: 1_000_000.0, samples: 120 };

    #[inline]
    pub const fn new(min_ohms: f64, max_ohms: f64, samples: usize) -> Self {
        Self { min_ohms, max_ohms, samples }
    }

    /// Check `0 < min < max` (finite) and `samples >= 2`.
    ///
    /// # Errors
    /// [`CircuitError::InvalidSweepRange`], [`CircuitError::TooFewSamples`]
    /// or [`CircuitError::NotFinite`].
    pub fn validate(&self) -> ModelResult<()> {
        let lo = ensure_finite("sweep minimum", self.min_ohms)?;
        let hi = ensure_finite("sweep maximum", self.max_ohms)?;
        if lo <= 0.0 || hi <= lo {
            return Err(CircuitError::InvalidSweepRange { min_ohms: lo, max_ohms: hi });
        }
        if self.samples < 2 {
            return Err(CircuitError::TooFewSamples { samples: self.samples });
        }
        Ok(())
    }
}

impl Default for SweepRange {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Iterator over the samples of a validated sweep, ascending in resistance.
#[derive(Clone, Debug)]
pub struct Sweep {
    supply_voltage: f64,
    pull_down_ohms: f64,
    min_ohms: f64,
    max_ohms: f64,
    log_min: f64,
    log_max: f64,
    last: usize,
    front: usize,
    back: usize,
}

impl Sweep {
    fn sample(&self, i: usize) -> CurveSample {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / self.last as f64;
        let log_resistance = lerp(self.log_min, self.log_max, t);
        // The endpoints are the range itself, not 10^log10(x) round trips.
        let resistance_ohms = if i == 0 {
            self.min_ohms
        } else if i == self.last {
            self.max_ohms
        } else {
            exp10(log_resistance)
        };
        let v = pin_voltage(self.supply_voltage, self.pull_down_ohms, resistance_ohms);
        CurveSample {
            resistance_ohms,
            log_resistance,
            pin_voltage: round_to(v, VOLTAGE_DECIMALS),
        }
    }
}

impl Iterator for Sweep {
    type Item = CurveSample;

    #[inline]
    fn next(&mut self) -> Option<CurveSample> {
        if self.front >= self.back {
            return None;
        }
        let s = self.sample(self.front);
        self.front += 1;
        Some(s)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Sweep {
    #[inline]
    fn next_back(&mut self) -> Option<CurveSample> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.sample(self.back))
    }
}

impl ExactSizeIterator for Sweep {}

impl core::iter::FusedIterator for Sweep {}

/// Sweep `R_LDR` from `range_min_ohms` to `range_max_ohms` in `sample_count`
/// log-spaced points at the given pull-down.
///
/// # Errors
/// [`CircuitError`] if the supply or pull-down is invalid, the range is not
/// `0 < min < max`, or `sample_count < 2`.
pub fn sweep(
    supply_voltage: f64,
    pull_down_ohms: f64,
    range_min_ohms: f64,
    range_max_ohms: f64,
    sample_count: usize,
) -> ModelResult<Sweep> {
    sweep_range(
        supply_voltage,
        pull_down_ohms,
        &SweepRange::new(range_min_ohms, range_max_ohms, sample_count),
    )
}

/// [`sweep`] taking a [`SweepRange`].
///
/// # Errors
/// See [`sweep`].
pub fn sweep_range(supply_voltage: f64, pull_down_ohms: f64, range: &SweepRange) -> ModelResult<Sweep> {
    range.validate()?;
    // Validating the circuit at both ends covers every sample in between.
    validate(supply_voltage, pull_down_ohms, range.min_ohms)?;
    validate(supply_voltage, pull_down_ohms, range.max_ohms)?;
    Ok(Sweep {
        supply_voltage,
        pull_down_ohms,
        min_ohms: range.min_ohms,
        max_ohms: range.max_ohms,
        log_min: log10(range.min_ohms),
        log_max: log10(range.max_ohms),
        last: range.samples - 1,
        front: 0,
        back: range.samples,
    })
}

/// Fill `out` with the first `out.len()` samples of the sweep, allocation free.
/// Returns the number of samples written.
///
/// # Errors
/// See [`sweep`].
pub fn sweep_into(
    supply_voltage: f64,
    pull_down_ohms: f64,
    range: &SweepRange,
    out: &mut [CurveSample],
) -> ModelResult<usize> {
    let mut written = 0;
    for (slot, s) in out.iter_mut().zip(sweep_range(supply_voltage, pull_down_ohms, range)?) {
        *slot = s;
        written += 1;
    }
    Ok(written)
}
