//! C ABI wrapper for the ldrsim model and bench.
//!
//! Exposes stateless entry points (evaluate, thresholds, sweep into a caller
//! buffer) and an opaque bench handle that owns the two slider values.
//!
//! ABI notes
//! - All functions are `extern "C"` and `#[no_mangle]`.
//! - Status-returning calls give `LDRSIM_OK` (0) or a negative `LDRSIM_ERR_*`.
//! - Opaque handle type: `LdrsimBench` (heap-allocated; you own/delete it).
//!
//! Threading
//! - A bench handle is NOT thread-safe; use each handle from one thread.

use ldrsim_engine::model::prelude::*;
use ldrsim_engine::{Bench, BenchConfig};

pub const LDRSIM_OK: i32 = 0;
pub const LDRSIM_ERR_NULL: i32 = -1;
pub const LDRSIM_ERR_INVALID_CIRCUIT: i32 = -2;
pub const LDRSIM_ERR_INVALID_SWEEP: i32 = -3;

pub const LDRSIM_STATE_LOW: i32 = 0;
pub const LDRSIM_STATE_HIGH: i32 = 1;
pub const LDRSIM_STATE_INDETERMINATE: i32 = 2;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LdrsimResult {
    pub pin_voltage: f64,
    /// One of `LDRSIM_STATE_*`.
    pub digital_state: i32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LdrsimThresholds {
    pub ldr_for_high: f64,
    pub ldr_for_low: f64,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LdrsimCurveSample {
    pub resistance_ohms: f64,
    pub log_resistance: f64,
    pub pin_voltage: f64,
}

/// Opaque bench wrapper we hand to C.
pub struct LdrsimBench {
    inner: Bench,
}

fn state_code(s: DigitalState) -> i32 {
    match s {
        DigitalState::Low => LDRSIM_STATE_LOW,
        DigitalState::High => LDRSIM_STATE_HIGH,
        DigitalState::Indeterminate => LDRSIM_STATE_INDETERMINATE,
    }
}

fn error_code(e: CircuitError) -> i32 {
    log::debug!("ldrsim-ffi: {e}");
    match e {
        CircuitError::InvalidSweepRange { .. } | CircuitError::TooFewSamples { .. } => LDRSIM_ERR_INVALID_SWEEP,
        _ => LDRSIM_ERR_INVALID_CIRCUIT,
    }
}

impl From<CurveSample> for LdrsimCurveSample {
    fn from(s: CurveSample) -> Self {
        Self {
            resistance_ohms: s.resistance_ohms,
            log_resistance: s.log_resistance,
            pin_voltage: s.pin_voltage,
        }
    }
}

// --- Stateless model ---------------------------------------------------------------

/// Evaluate the divider and write the result to `out`.
///
/// # Safety
/// `out` must be null or point to writable memory for one `LdrsimResult`.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_evaluate(
    supply_voltage: f64,
    pull_down_ohms: f64,
    ldr_ohms: f64,
    out: *mut LdrsimResult,
) -> i32 {
    if out.is_null() {
        return LDRSIM_ERR_NULL;
    }
    match evaluate(supply_voltage, pull_down_ohms, ldr_ohms) {
        Ok(r) => {
            *out = LdrsimResult { pin_voltage: r.pin_voltage, digital_state: state_code(r.digital_state) };
            LDRSIM_OK
        }
        Err(e) => error_code(e),
    }
}

/// LDR resistances at the HIGH and LOW band edges for a pull-down.
///
/// # Safety
/// `out` must be null or point to writable memory for one `LdrsimThresholds`.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_thresholds(
    supply_voltage: f64,
    pull_down_ohms: f64,
    out: *mut LdrsimThresholds,
) -> i32 {
    if out.is_null() {
        return LDRSIM_ERR_NULL;
    }
    match threshold_resistances(supply_voltage, pull_down_ohms) {
        Ok(t) => {
            *out = LdrsimThresholds { ldr_for_high: t.ldr_for_high, ldr_for_low: t.ldr_for_low };
            LDRSIM_OK
        }
        Err(e) => error_code(e),
    }
}

/// Sweep `count` log-spaced LDR values from `min_ohms` to `max_ohms` into `out`.
///
/// Returns the number of samples written (0 on error).
///
/// # Safety
/// `out` must be null or point to writable memory for `count` samples.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_sweep(
    supply_voltage: f64,
    pull_down_ohms: f64,
    min_ohms: f64,
    max_ohms: f64,
    out: *mut LdrsimCurveSample,
    count: u32,
) -> u32 {
    if out.is_null() || count == 0 {
        return 0;
    }
    let Ok(points) = sweep(supply_voltage, pull_down_ohms, min_ohms, max_ohms, count as usize) else {
        return 0;
    };
    let dst = std::slice::from_raw_parts_mut(out, count as usize);
    let mut written = 0u32;
    for (slot, s) in dst.iter_mut().zip(points) {
        *slot = s.into();
        written += 1;
    }
    written
}

// --- Bench handle --------------------------------------------------------------------

/// Create a bench at the reference start point (Rd 30 kΩ, R_LDR 20 kΩ).
/// Returns null if `supply_voltage` is not a valid supply.
#[no_mangle]
pub extern "C" fn ldrsim_bench_create(supply_voltage: f64) -> *mut LdrsimBench {
    let cfg = BenchConfig { supply_voltage, ..BenchConfig::default() };
    match Bench::new(cfg) {
        Ok(inner) => Box::into_raw(Box::new(LdrsimBench { inner })),
        Err(e) => {
            log::debug!("ldrsim-ffi: bench_create: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Destroy a bench previously returned by `ldrsim_bench_create`.
///
/// # Safety
/// `bench` must be null or a pointer from `ldrsim_bench_create` not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_bench_destroy(bench: *mut LdrsimBench) {
    if !bench.is_null() {
        drop(Box::from_raw(bench));
    }
}

/// Move the pull-down slider (clamped to 5 kΩ..220 kΩ, 1 kΩ steps).
///
/// # Safety
/// `bench` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_bench_set_pull_down(bench: *mut LdrsimBench, ohms: f64) -> i32 {
    let Some(b) = bench.as_mut() else { return LDRSIM_ERR_NULL };
    b.inner.set_pull_down(ohms).map_or_else(error_code, |_| LDRSIM_OK)
}

/// Move the LDR slider (clamped to 1 kΩ..1 MΩ, 1 kΩ steps).
///
/// # Safety
/// `bench` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_bench_set_ldr(bench: *mut LdrsimBench, ohms: f64) -> i32 {
    let Some(b) = bench.as_mut() else { return LDRSIM_ERR_NULL };
    b.inner.set_ldr(ohms).map_or_else(error_code, |_| LDRSIM_OK)
}

/// Current pin voltage and state.
///
/// # Safety
/// `bench` must be null or a live handle; `out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_bench_result(bench: *const LdrsimBench, out: *mut LdrsimResult) -> i32 {
    let (Some(b), false) = (bench.as_ref(), out.is_null()) else { return LDRSIM_ERR_NULL };
    let r = b.inner.snapshot().result;
    *out = LdrsimResult { pin_voltage: r.pin_voltage, digital_state: state_code(r.digital_state) };
    LDRSIM_OK
}

/// Current threshold resistances.
///
/// # Safety
/// `bench` must be null or a live handle; `out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_bench_thresholds(bench: *const LdrsimBench, out: *mut LdrsimThresholds) -> i32 {
    let (Some(b), false) = (bench.as_ref(), out.is_null()) else { return LDRSIM_ERR_NULL };
    let t = b.inner.snapshot().threshold_resistances;
    *out = LdrsimThresholds { ldr_for_high: t.ldr_for_high, ldr_for_low: t.ldr_for_low };
    LDRSIM_OK
}

/// Copy up to `capacity` samples of the current curve into `out`.
/// Returns the number written; the full curve has 120 samples.
///
/// # Safety
/// `bench` must be null or a live handle; `out` null or writable for `capacity` samples.
#[no_mangle]
pub unsafe extern "C" fn ldrsim_bench_curve(
    bench: *const LdrsimBench,
    out: *mut LdrsimCurveSample,
    capacity: u32,
) -> u32 {
    let (Some(b), false) = (bench.as_ref(), out.is_null()) else { return 0 };
    let dst = std::slice::from_raw_parts_mut(out, capacity as usize);
    let mut written = 0u32;
    for (slot, s) in dst.iter_mut().zip(&b.inner.snapshot().curve) {
        *slot = (*s).into();
        written += 1;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_writes_result() {
        let mut out = LdrsimResult::default();
        let rc = unsafe { ldrsim_evaluate(5.0, 30_000.0, 40_000.0, &mut out) };
        assert_eq!(rc, LDRSIM_OK);
        assert!((out.pin_voltage - 2.142_857).abs() < 1e-6);
        assert_eq!(out.digital_state, LDRSIM_STATE_INDETERMINATE);
    }

    #[test]
    fn evaluate_reports_errors() {
        let mut out = LdrsimResult::default();
        assert_eq!(unsafe { ldrsim_evaluate(5.0, 0.0, 0.0, &mut out) }, LDRSIM_ERR_INVALID_CIRCUIT);
        assert_eq!(unsafe { ldrsim_evaluate(5.0, 1.0, 1.0, std::ptr::null_mut()) }, LDRSIM_ERR_NULL);
    }

    #[test]
    fn thresholds() {
        let mut t = LdrsimThresholds::default();
        assert_eq!(unsafe { ldrsim_thresholds(5.0, 30_000.0, &mut t) }, LDRSIM_OK);
        assert!((t.ldr_for_high - 20_000.0).abs() < 1e-9);
        assert!((t.ldr_for_low - 70_000.0).abs() < 1e-9);
    }

    #[test]
    fn sweep_fills_buffer() {
        let mut buf = vec![LdrsimCurveSample::default(); 120];
        let n = unsafe { ldrsim_sweep(5.0, 30_000.0, 1e3, 1e6, buf.as_mut_ptr(), 120) };
        assert_eq!(n, 120);
        assert_eq!(buf[0].pin_voltage, 4.8387);
        assert_eq!(buf[119].pin_voltage, 0.1456);

        assert_eq!(unsafe { ldrsim_sweep(5.0, 30_000.0, 1e3, 1e6, buf.as_mut_ptr(), 1) }, 0);
        assert_eq!(unsafe { ldrsim_sweep(5.0, 30_000.0, 1e6, 1e3, buf.as_mut_ptr(), 10) }, 0);
    }

    #[test]
    fn bench_lifecycle() {
        let b = ldrsim_bench_create(5.0);
        assert!(!b.is_null());
        unsafe {
            let mut r = LdrsimResult::default();
            assert_eq!(ldrsim_bench_result(b, &mut r), LDRSIM_OK);
            assert_eq!(r.digital_state, LDRSIM_STATE_HIGH);

            assert_eq!(ldrsim_bench_set_ldr(b, 70_000.0), LDRSIM_OK);
            ldrsim_bench_result(b, &mut r);
            assert_eq!(r.digital_state, LDRSIM_STATE_LOW);

            assert_eq!(ldrsim_bench_set_pull_down(b, 60_000.0), LDRSIM_OK);
            let mut t = LdrsimThresholds::default();
            ldrsim_bench_thresholds(b, &mut t);
            assert!((t.ldr_for_high - 40_000.0).abs() < 1e-9);

            let mut curve = [LdrsimCurveSample::default(); 4];
            assert_eq!(ldrsim_bench_curve(b, curve.as_mut_ptr(), 4), 4);

            ldrsim_bench_destroy(b);
        }
        assert!(ldrsim_bench_create(0.0).is_null());
        unsafe { ldrsim_bench_destroy(std::ptr::null_mut()) };
        assert_eq!(unsafe { ldrsim_bench_set_ldr(std::ptr::null_mut(), 1.0) }, LDRSIM_ERR_NULL);
    }
}
