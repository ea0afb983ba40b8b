//! Slider controls for the two resistances.
//!
//! A [`Slider`] behaves like an HTML range input: values are clamped to
//! `[min, max]` and snapped to the step grid anchored at `min`. Everything
//! here is `Copy` and cheap; the bench owns one slider per resistance.

/// Pull-down slider: 5 kΩ .. 220 kΩ in 1 kΩ steps.
pub const PULL_DOWN_RANGE: (f64, f64, f64) = (5_000.0, 220_000.0, 1_000.0);

/// LDR slider: 1 kΩ .. 1 MΩ in 1 kΩ steps.
pub const LDR_RANGE: (f64, f64, f64) = (1_000.0, 1_000_000.0, 1_000.0);

/// A clamped, stepped numeric control.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Slider {
    min: f64,
    max: f64,
    step: f64,
    value: f64,
}

impl Slider {
    /// Build a slider and place it at `value` (clamped and snapped).
    /// `max < min` is swapped; a non-positive step means continuous.
    pub fn new(min: f64, max: f64, step: f64, value: f64) -> Self {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        let mut s = Self { min, max, step: step.max(0.0), value: min };
        s.set(value);
        s
    }

    #[inline] pub fn pull_down(value: f64) -> Self { Self::new(PULL_DOWN_RANGE.0, PULL_DOWN_RANGE.1, PULL_DOWN_RANGE.2, value) }
    #[inline] pub fn ldr(value: f64) -> Self { Self::new(LDR_RANGE.0, LDR_RANGE.1, LDR_RANGE.2, value) }

    #[inline] pub fn value(&self) -> f64 { self.value }
    #[inline] pub fn min(&self) -> f64 { self.min }
    #[inline] pub fn max(&self) -> f64 { self.max }
    #[inline] pub fn step(&self) -> f64 { self.step }

    /// Clamp and snap `x` without moving the slider.
    pub fn quantize(&self, x: f64) -> f64 {
        let clamped = x.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let k = ((clamped - self.min) / self.step).round();
        (self.min + k * self.step).clamp(self.min, self.max)
    }

    /// Move to `x`. Non-finite input leaves the slider where it is.
    /// Returns the value actually taken.
    pub fn set(&mut self, x: f64) -> f64 {
        if x.is_finite() {
            self.value = self.quantize(x);
        }
        self.value
    }

    /// Move by `steps` grid steps (negative moves down).
    pub fn nudge(&mut self, steps: i32) -> f64 {
        self.set(self.value + f64::from(steps) * self.step)
    }

    /// Position of the current value in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 { 0.0 } else { (self.value - self.min) / span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_step_grid() {
        let mut s = Slider::pull_down(30_000.0);
        assert_eq!(s.value(), 30_000.0);
        assert_eq!(s.set(12_345.0), 12_000.0);
        assert_eq!(s.set(12_500.0), 13_000.0);
    }

    #[test]
    fn clamps_to_range() {
        let mut s = Slider::pull_down(30_000.0);
        assert_eq!(s.set(1.0), 5_000.0);
        assert_eq!(s.set(1e9), 220_000.0);

        let mut l = Slider::ldr(20_000.0);
        assert_eq!(l.set(0.0), 1_000.0);
        assert_eq!(l.set(2e6), 1_000_000.0);
    }

    #[test]
    fn nudge_moves_by_steps_and_stops_at_edges() {
        let mut s = Slider::ldr(20_000.0);
        assert_eq!(s.nudge(1), 21_000.0);
        assert_eq!(s.nudge(-10), 11_000.0);
        assert_eq!(s.nudge(-1_000), 1_000.0);
    }

    #[test]
    fn ignores_non_finite() {
        let mut s = Slider::ldr(20_000.0);
        assert_eq!(s.set(f64::NAN), 20_000.0);
        assert_eq!(s.set(f64::INFINITY), 20_000.0);
    }

    #[test]
    fn continuous_slider_and_fraction() {
        let mut s = Slider::new(10.0, 0.0, 0.0, 2.5);
        assert_eq!(s.min(), 0.0);
        assert_eq!(s.value(), 2.5);
        assert_eq!(s.set(7.25), 7.25);
        assert!((s.fraction() - 0.725).abs() < 1e-12);
    }
}
