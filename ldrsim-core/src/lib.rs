#![cfg_attr(not(feature = "std"), no_std)]
//! ldrsim Core: no_std-ready model of an LDR + pull-down divider on a digital pin.
//!
//! Features
//! - `std`    : (default) use the Rust standard library
//! - `no-std` : build with `#![no_std]` and use `libm` for log10/pow/round
//! - `serde`  : derive `Serialize`/`Deserialize` on the model types
//!
//! Modules
//! - [`divider`] : pin voltage, logic classification, threshold resistances
//! - [`curve`]   : log-spaced Vpin-vs-R_LDR sweep
//! - [`units`]   : Ω/kΩ/MΩ and volt formatting, chart tick list
//! - [`math`]    : math backend selection and rounding helpers
//! - [`error`]   : `CircuitError`, the one invalid-input error
//!
//! Design
//! - Pure, deterministic functions; no heap allocations
//! - Every entry point validates its inputs and returns `Result`, so NaN and
//!   infinity never leak out of the model

pub mod curve;
pub mod divider;
pub mod error;
pub mod math;
pub mod units;

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::curve::{sweep, sweep_into, sweep_range, CurveSample, Sweep, SweepRange};
    pub use crate::divider::{
        evaluate, pin_voltage, threshold_resistances, CircuitInputs, CircuitResult, DigitalState,
        LogicThresholds, ThresholdResistances, HIGH_FRACTION, LOW_FRACTION, SUPPLY_VOLTAGE,
    };
    pub use crate::error::{CircuitError, ModelResult};
    pub use crate::units::{Ohms, TickLabel, Volts, AXIS_TICKS_OHMS};
}

#[cfg(test)]
mod smoke {

    #[test]
    fn prelude_exists() {
        use crate::prelude::*;
        let r = evaluate(SUPPLY_VOLTAGE, 30_000.0, 20_000.0).unwrap();
        assert_eq!(r.digital_state, DigitalState::High);
        let _ = threshold_resistances(SUPPLY_VOLTAGE, 30_000.0).unwrap();
        assert_eq!(sweep_range(SUPPLY_VOLTAGE, 30_000.0, &SweepRange::REFERENCE).unwrap().count(), 120);
    }
}
