//! The bench: owner of the current inputs and their derived snapshot.
//!
//! This module defines [`Bench`], which holds the two slider positions and
//! recomputes a full [`Snapshot`] every time either one changes. Inputs are
//! replaced wholesale; the snapshot is a pure projection of them, so there
//! is nothing to invalidate and no partial state to reason about.

use ldrsim_core::prelude::*;
use ldrsim_core::math::log10;

use crate::controls::Slider;

/// Start-up settings of a bench.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BenchConfig {
    pub supply_voltage: f64,
    pub pull_down_ohms: f64,
    pub ldr_ohms: f64,
    pub sweep: SweepRange,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            supply_voltage: SUPPLY_VOLTAGE,
            pull_down_ohms: 30_000.0,
            ldr_ohms: 20_000.0,
            sweep: SweepRange::REFERENCE,
        }
    }
}

/// Everything the presentation needs for one set of inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub supply_voltage: f64,
    pub inputs: CircuitInputs,
    pub thresholds: LogicThresholds,
    pub result: CircuitResult,
    pub threshold_resistances: ThresholdResistances,
    pub curve: Vec<CurveSample>,
    /// `log10(R_LDR)`, where the current-value marker sits on the chart.
    pub marker_log_resistance: f64,
}

impl Snapshot {
    /// Evaluate the divider, the threshold resistances and the curve.
    ///
    /// # Errors
    /// Any [`CircuitError`] from the model.
    pub fn compute(supply_voltage: f64, inputs: CircuitInputs, sweep: &SweepRange) -> ModelResult<Self> {
        let result = inputs.evaluate(supply_voltage)?;
        let threshold_resistances = threshold_resistances(supply_voltage, inputs.pull_down_ohms)?;
        let curve = sweep_range(supply_voltage, inputs.pull_down_ohms, sweep)?.collect();
        // log10(0) is -inf; a shorted LDR pins the marker to the left edge.
        let marker_log_resistance = if inputs.ldr_ohms > 0.0 {
            log10(inputs.ldr_ohms)
        } else {
            log10(sweep.min_ohms)
        };
        Ok(Self {
            supply_voltage,
            inputs,
            thresholds: LogicThresholds::for_supply(supply_voltage),
            result,
            threshold_resistances,
            curve,
            marker_log_resistance,
        })
    }
}

/// Session object: two sliders plus the snapshot derived from them.
#[derive(Clone, Debug)]
pub struct Bench {
    supply_voltage: f64,
    sweep: SweepRange,
    pull_down: Slider,
    ldr: Slider,
    snapshot: Snapshot,
}

impl Bench {
    /// Build a bench from `config`, clamping the start values onto the
    /// slider grids.
    ///
    /// # Errors
    /// [`CircuitError`] if the supply voltage or the sweep range is invalid.
    pub fn new(config: BenchConfig) -> ModelResult<Self> {
        config.sweep.validate()?;
        let pull_down = Slider::pull_down(config.pull_down_ohms);
        let ldr = Slider::ldr(config.ldr_ohms);
        if pull_down.value() != config.pull_down_ohms || ldr.value() != config.ldr_ohms {
            log::warn!(
                "start values moved onto slider grid: Rd {} -> {}, R_LDR {} -> {}",
                Ohms(config.pull_down_ohms),
                Ohms(pull_down.value()),
                Ohms(config.ldr_ohms),
                Ohms(ldr.value()),
            );
        }
        let inputs = CircuitInputs::new(pull_down.value(), ldr.value());
        let snapshot = Snapshot::compute(config.supply_voltage, inputs, &config.sweep)?;
        Ok(Self {
            supply_voltage: config.supply_voltage,
            sweep: config.sweep,
            pull_down,
            ldr,
            snapshot,
        })
    }

    /// Move the pull-down slider and recompute.
    ///
    /// # Errors
    /// Propagates model errors; with validated construction these do not occur
    /// for slider-range values. On error both sliders keep their previous
    /// values, matching the snapshot.
    pub fn set_pull_down(&mut self, ohms: f64) -> ModelResult<&Snapshot> {
        let previous = self.pull_down;
        self.pull_down.set(ohms);
        self.commit(previous, self.ldr)
    }

    /// Move the LDR slider and recompute.
    ///
    /// # Errors
    /// See [`Bench::set_pull_down`].
    pub fn set_ldr(&mut self, ohms: f64) -> ModelResult<&Snapshot> {
        let previous = self.ldr;
        self.ldr.set(ohms);
        self.commit(self.pull_down, previous)
    }

    /// Move the pull-down slider by `steps` grid steps and recompute.
    ///
    /// # Errors
    /// See [`Bench::set_pull_down`].
    pub fn nudge_pull_down(&mut self, steps: i32) -> ModelResult<&Snapshot> {
        let previous = self.pull_down;
        self.pull_down.nudge(steps);
        self.commit(previous, self.ldr)
    }

    /// Move the LDR slider by `steps` grid steps and recompute.
    ///
    /// # Errors
    /// See [`Bench::set_pull_down`].
    pub fn nudge_ldr(&mut self, steps: i32) -> ModelResult<&Snapshot> {
        let previous = self.ldr;
        self.ldr.nudge(steps);
        self.commit(self.pull_down, previous)
    }

    /// Recompute from the current sliders, or roll them back to
    /// `(pull_down, ldr)` if the model rejects the new inputs.
    fn commit(&mut self, pull_down: Slider, ldr: Slider) -> ModelResult<&Snapshot> {
        let inputs = CircuitInputs::new(self.pull_down.value(), self.ldr.value());
        if inputs == self.snapshot.inputs {
            return Ok(&self.snapshot);
        }
        match Snapshot::compute(self.supply_voltage, inputs, &self.sweep) {
            Ok(s) => {
                log::debug!(
                    "Rd={} R_LDR={} -> {} {}",
                    Ohms(inputs.pull_down_ohms),
                    Ohms(inputs.ldr_ohms),
                    Volts(s.result.pin_voltage),
                    s.result.digital_state,
                );
                self.snapshot = s;
                Ok(&self.snapshot)
            }
            Err(e) => {
                log::warn!("rejected inputs {inputs:?}: {e}");
                self.pull_down = pull_down;
                self.ldr = ldr;
                Err(e)
            }
        }
    }

    #[inline] pub fn snapshot(&self) -> &Snapshot { &self.snapshot }
    #[inline] pub fn inputs(&self) -> CircuitInputs { self.snapshot.inputs }
    #[inline] pub fn supply_voltage(&self) -> f64 { self.supply_voltage }
    #[inline] pub fn sweep(&self) -> &SweepRange { &self.sweep }
    #[inline] pub fn pull_down_slider(&self) -> &Slider { &self.pull_down }
    #[inline] pub fn ldr_slider(&self) -> &Slider { &self.ldr }
}
