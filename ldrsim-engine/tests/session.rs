// Bench session walk-throughs, driven the way a front-end would drive them.

use ldrsim_engine::model::prelude::*;
use ldrsim_engine::{Bench, BenchConfig, LogAxis};

#[test]
fn covering_the_ldr_turns_the_pin_low() {
    let mut bench = Bench::new(BenchConfig::default()).unwrap();
    let mut states = Vec::new();
    for ldr in [5_000.0, 20_000.0, 40_000.0, 70_000.0, 500_000.0] {
        states.push(bench.set_ldr(ldr).unwrap().result.digital_state);
    }
    assert_eq!(
        states,
        [
            DigitalState::High,
            DigitalState::High,
            DigitalState::Indeterminate,
            DigitalState::Low,
            DigitalState::Low,
        ]
    );
}

#[test]
fn snapshot_is_consistent_with_model() {
    let mut bench = Bench::new(BenchConfig::default()).unwrap();
    bench.set_pull_down(47_000.0).unwrap();
    let s = bench.set_ldr(123_000.0).unwrap().clone();

    let direct = evaluate(SUPPLY_VOLTAGE, 47_000.0, 123_000.0).unwrap();
    assert_eq!(s.result, direct);

    let curve: Vec<_> = sweep_range(SUPPLY_VOLTAGE, 47_000.0, &SweepRange::REFERENCE).unwrap().collect();
    assert_eq!(s.curve, curve);

    let axis = LogAxis::for_sweep(bench.sweep());
    let p = axis.position_log(s.marker_log_resistance);
    assert!(p > 0.0 && p < 1.0);
}

#[test]
fn custom_supply_moves_thresholds() {
    let cfg = BenchConfig { supply_voltage: 3.3, ..BenchConfig::default() };
    let bench = Bench::new(cfg).unwrap();
    let s = bench.snapshot();
    assert!((s.thresholds.high_volts - 1.98).abs() < 1e-12);
    // 2/3 · Rd regardless of supply
    assert!((s.threshold_resistances.ldr_for_high - 20_000.0).abs() < 1e-9);
    assert!(s.result.pin_voltage <= 3.3);
}

#[cfg(feature = "serde")]
#[test]
fn snapshot_serializes_to_json() {
    let bench = Bench::new(BenchConfig::default()).unwrap();
    let json = serde_json::to_value(bench.snapshot()).unwrap();
    assert_eq!(json["result"]["digital_state"], "HIGH");
    assert_eq!(json["curve"].as_array().unwrap().len(), 120);
    assert_eq!(json["inputs"]["pull_down_ohms"], 30_000.0);
}
