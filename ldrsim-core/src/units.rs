//! Display helpers for resistances and voltages.
//!
//! All formatters are `Display` adapters so they work without an allocator;
//! call `.to_string()` on hosted targets.
//!
//! Magnitude thresholds are shared by every formatter: below 1 000 the value
//! is shown in Ω, below 1 000 000 in kΩ, otherwise in MΩ.
//!
//! Fixed-precision output rounds half away from zero (`1.5625` -> `"1.563"`);
//! `{:.N}` alone would round exact ties to even.

use core::fmt;

use crate::math::round_to;

/// Axis ticks of the Vpin-vs-R_LDR chart, in ohms (1-2-5 per decade).
pub const AXIS_TICKS_OHMS: [f64; 10] = [
    1e3, 2e3, 5e3, 1e4, 2e4, 5e4, 1e5, 2e5, 5e5, 1e6,
];

const KILO: f64 = 1e3;
const MEGA: f64 = 1e6;

/// Resistance with two decimals and a scaled unit: `"20.00 kΩ"`, `"999 Ω"`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ohms(pub f64);

impl fmt::Display for Ohms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        if r >= MEGA {
            write!(f, "{:.2} MΩ", round_to(r / MEGA, 2))
        } else if r >= KILO {
            write!(f, "{:.2} kΩ", round_to(r / KILO, 2))
        } else {
            write!(f, "{:.0} Ω", round_to(r, 0))
        }
    }
}

/// Compact axis label without trailing zeros: `"2kΩ"`, `"1MΩ"`, `"500Ω"`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickLabel(pub f64);

impl fmt::Display for TickLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        if r >= MEGA {
            write!(f, "{}MΩ", r / MEGA)
        } else if r >= KILO {
            write!(f, "{}kΩ", r / KILO)
        } else {
            write!(f, "{r}Ω")
        }
    }
}

/// Pin voltage to millivolt precision: `"3.000 V"`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Volts(pub f64);

impl fmt::Display for Volts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} V", round_to(self.0, 3))
    }
}

#[cfg(feature = "std")]
pub fn format_ohms(r: f64) -> String {
    Ohms(r).to_string()
}
