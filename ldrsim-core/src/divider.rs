//! Divider model: LDR on the high side, pull-down to ground, pin at the node.
//!
//! ```text
//!   +Vcc
//!    │
//!  [LDR]
//!    │
//!    ├───→ pin
//!    │
//!  [Rd]  (pull-down)
//!    │
//!   GND
//! ```
//!
//! `Vpin = Vcc · Rd / (R_LDR + Rd)`
//!
//! The pin is read against two fixed fractions of the supply: at or below
//! [`LOW_FRACTION`] it is a logic LOW, at or above [`HIGH_FRACTION`] a logic
//! HIGH, and anything in between is undefined for a plain CMOS input.

use crate::error::{ensure_finite, CircuitError, ModelResult};

/// Supply voltage of the reference bench (5 V logic).
pub const SUPPLY_VOLTAGE: f64 = 5.0;

/// LOW band upper edge as a fraction of supply (1.5 V at 5 V).
pub const LOW_FRACTION: f64 = 0.3;

/// HIGH band lower edge as a fraction of supply (3.0 V at 5 V).
pub const HIGH_FRACTION: f64 = 0.6;

/// Logic level the input sees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DigitalState {
    Low,
    High,
    Indeterminate,
}

impl DigitalState {
    /// Classify a pin voltage. Both band edges are inclusive; the bands never
    /// overlap because `low_volts < high_volts` for any positive supply.
    #[inline]
    pub fn classify(pin_voltage: f64, thresholds: LogicThresholds) -> Self {
        if pin_voltage >= thresholds.high_volts {
            Self::High
        } else if pin_voltage <= thresholds.low_volts {
            Self::Low
        } else {
            Self::Indeterminate
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
            Self::Indeterminate => "INDETERMINATE",
        }
    }
}

impl core::fmt::Display for DigitalState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Voltage edges of the LOW and HIGH bands for a given supply.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogicThresholds {
    pub low_volts: f64,
    pub high_volts: f64,
}

impl LogicThresholds {
    #[inline]
    pub fn for_supply(supply_voltage: f64) -> Self {
        Self {
            low_volts: LOW_FRACTION * supply_voltage,
            high_volts: HIGH_FRACTION * supply_voltage,
        }
    }
}

/// The two resistances the user controls.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircuitInputs {
    pub pull_down_ohms: f64,
    pub ldr_ohms: f64,
}

impl CircuitInputs {
    #[inline]
    pub const fn new(pull_down_ohms: f64, ldr_ohms: f64) -> Self {
        Self { pull_down_ohms, ldr_ohms }
    }

    /// Evaluate these inputs at `supply_voltage`.
    #[inline]
    pub fn evaluate(&self, supply_voltage: f64) -> ModelResult<CircuitResult> {
        evaluate(supply_voltage, self.pull_down_ohms, self.ldr_ohms)
    }
}

/// Pin voltage plus its classification.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircuitResult {
    pub pin_voltage: f64,
    pub digital_state: DigitalState,
}

/// LDR resistances at which the pin sits exactly on each band edge.
///
/// The pin is HIGH while `R_LDR <= ldr_for_high` and LOW while
/// `R_LDR >= ldr_for_low`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdResistances {
    pub ldr_for_high: f64,
    pub ldr_for_low: f64,
}

fn check_supply(supply_voltage: f64) -> ModelResult<f64> {
    let v = ensure_finite("supply voltage", supply_voltage)?;
    if v <= 0.0 {
        return Err(CircuitError::NonPositiveSupply { volts: v });
    }
    Ok(v)
}

fn check_pull_down(pull_down_ohms: f64) -> ModelResult<f64> {
    let r = ensure_finite("pull-down resistance", pull_down_ohms)?;
    if r <= 0.0 {
        return Err(CircuitError::NonPositivePullDown { ohms: r });
    }
    Ok(r)
}

fn check_ldr(ldr_ohms: f64) -> ModelResult<f64> {
    let r = ensure_finite("LDR resistance", ldr_ohms)?;
    if r < 0.0 {
        return Err(CircuitError::NegativeLdr { ohms: r });
    }
    Ok(r)
}

/// Divider voltage without validation or classification.
///
/// Written as `Vcc · (Rd / total)` so very large resistances cannot overflow
/// the numerator. Callers must have validated the inputs; the curve
/// generator calls this once per sample after validating the sweep once.
#[inline]
pub fn pin_voltage(supply_voltage: f64, pull_down_ohms: f64, ldr_ohms: f64) -> f64 {
    supply_voltage * (pull_down_ohms / (ldr_ohms + pull_down_ohms))
}

/// Validate a full circuit and return the divider total.
pub(crate) fn validate(supply_voltage: f64, pull_down_ohms: f64, ldr_ohms: f64) -> ModelResult<f64> {
    check_supply(supply_voltage)?;
    let rd = check_pull_down(pull_down_ohms)?;
    let rl = check_ldr(ldr_ohms)?;
    let total = rd + rl;
    if !total.is_finite() || total <= 0.0 {
        return Err(CircuitError::DegenerateDivider { total_ohms: total });
    }
    Ok(total)
}

/// Pin voltage and logic state for one pair of resistances.
///
/// `ldr_ohms == 0` is allowed and models a shorted LDR (pin at the rail).
///
/// # Errors
/// [`CircuitError`] for non-finite inputs, a non-positive supply or
/// pull-down, a negative LDR, or a divider total that is not finite.
pub fn evaluate(supply_voltage: f64, pull_down_ohms: f64, ldr_ohms: f64) -> ModelResult<CircuitResult> {
    validate(supply_voltage, pull_down_ohms, ldr_ohms)?;
    let v = pin_voltage(supply_voltage, pull_down_ohms, ldr_ohms);
    Ok(CircuitResult {
        pin_voltage: v,
        digital_state: DigitalState::classify(v, LogicThresholds::for_supply(supply_voltage)),
    })
}

/// Solve the divider for `R_LDR` at each band edge.
///
/// With the fixed 0.3 / 0.6 fractions this is `2/3 · Rd` for HIGH and
/// `7/3 · Rd` for LOW, independent of the supply.
///
/// # Errors
/// Same supply and pull-down checks as [`evaluate`].
pub fn threshold_resistances(supply_voltage: f64, pull_down_ohms: f64) -> ModelResult<ThresholdResistances> {
    let vcc = check_supply(supply_voltage)?;
    let rd = check_pull_down(pull_down_ohms)?;
    let t = LogicThresholds::for_supply(vcc);
    let ldr_for_high = rd * (vcc - t.high_volts) / t.high_volts;
    let ldr_for_low = rd * (vcc - t.low_volts) / t.low_volts;
    if !ldr_for_high.is_finite() || !ldr_for_low.is_finite() {
        return Err(CircuitError::DegenerateDivider { total_ohms: ldr_for_low + rd });
    }
    Ok(ThresholdResistances { ldr_for_high, ldr_for_low })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn reference_high_boundary() {
        let r = evaluate(5.0, 30_000.0, 20_000.0).unwrap();
        assert!(approx_eq(r.pin_voltage, 3.0, 1e-12));
        assert_eq!(r.digital_state, DigitalState::High);
    }

    #[test]
    fn reference_low_boundary() {
        let r = evaluate(5.0, 30_000.0, 70_000.0).unwrap();
        assert!(approx_eq(r.pin_voltage, 1.5, 1e-12));
        assert_eq!(r.digital_state, DigitalState::Low);
    }

    #[test]
    fn reference_indeterminate() {
        let r = evaluate(5.0, 30_000.0, 40_000.0).unwrap();
        assert!((r.pin_voltage - 2.142_857).abs() < 1e-6, "v={}", r.pin_voltage);
        assert_eq!(r.digital_state, DigitalState::Indeterminate);
    }

    #[test]
    fn shorted_ldr_puts_pin_at_supply() {
        let r = evaluate(5.0, 10_000.0, 0.0).unwrap();
        assert_eq!(r.pin_voltage, 5.0);
        assert_eq!(r.digital_state, DigitalState::High);
    }

    #[test]
    fn thresholds_scale_with_supply() {
        let t = LogicThresholds::for_supply(SUPPLY_VOLTAGE);
        assert!(approx_eq(t.low_volts, 1.5, 1e-12));
        assert!(approx_eq(t.high_volts, 3.0, 1e-12));

        let t33 = LogicThresholds::for_supply(3.3);
        assert!(approx_eq(t33.low_volts, 0.99, 1e-12));
        assert!(approx_eq(t33.high_volts, 1.98, 1e-12));
    }

    #[test]
    fn threshold_resistances_match_closed_form() {
        let t = threshold_resistances(5.0, 30_000.0).unwrap();
        assert!(approx_eq(t.ldr_for_high, 20_000.0, 1e-12));
        assert!(approx_eq(t.ldr_for_low, 70_000.0, 1e-12));
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert_eq!(
            evaluate(0.0, 1.0, 1.0),
            Err(CircuitError::NonPositiveSupply { volts: 0.0 })
        );
        assert_eq!(
            evaluate(5.0, 0.0, 0.0),
            Err(CircuitError::NonPositivePullDown { ohms: 0.0 })
        );
        assert_eq!(
            evaluate(5.0, 1.0, -1.0),
            Err(CircuitError::NegativeLdr { ohms: -1.0 })
        );
        assert!(matches!(
            evaluate(5.0, f64::NAN, 1.0),
            Err(CircuitError::NotFinite { .. })
        ));
        assert!(matches!(
            evaluate(5.0, f64::MAX, f64::MAX),
            Err(CircuitError::DegenerateDivider { .. })
        ));
        assert!(threshold_resistances(-5.0, 1.0).is_err());
    }

    #[test]
    fn state_labels() {
        assert_eq!(DigitalState::Low.to_string(), "LOW");
        assert_eq!(DigitalState::High.label(), "HIGH");
        assert_eq!(DigitalState::Indeterminate.label(), "INDETERMINATE");
    }
}
