//! Chart model for the Vpin-vs-R_LDR curve and a plain-text renderer.
//!
//! The x axis is `log10(R)`; ticks come from the 1-2-5 list in
//! [`AXIS_TICKS_OHMS`]. The y axis runs from 0 V to the supply. Two
//! horizontal reference lines mark the LOW and HIGH band edges and a vertical
//! marker shows where the current LDR value sits on the curve.

use ldrsim_core::math::log10;
use ldrsim_core::prelude::*;

use crate::bench::Snapshot;

/// Log-scaled resistance axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LogAxis {
    pub min_ohms: f64,
    pub max_ohms: f64,
}

impl LogAxis {
    pub fn new(min_ohms: f64, max_ohms: f64) -> Self {
        Self { min_ohms, max_ohms }
    }

    pub fn for_sweep(range: &SweepRange) -> Self {
        Self::new(range.min_ohms, range.max_ohms)
    }

    /// `[log10(min), log10(max)]`.
    pub fn log_bounds(&self) -> [f64; 2] {
        [log10(self.min_ohms), log10(self.max_ohms)]
    }

    /// Ticks inside the axis as `(ohms, log10(ohms))`.
    pub fn ticks(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        AXIS_TICKS_OHMS
            .iter()
            .copied()
            .filter(move |r| *r >= self.min_ohms && *r <= self.max_ohms)
            .map(|r| (r, log10(r)))
    }

    /// Map a `log10(R)` value onto `[0, 1]` (clamped).
    pub fn position_log(&self, log_r: f64) -> f64 {
        let [lo, hi] = self.log_bounds();
        if hi <= lo {
            return 0.0;
        }
        ((log_r - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    /// Map a resistance onto `[0, 1]` (clamped).
    pub fn position(&self, ohms: f64) -> f64 {
        if ohms <= 0.0 {
            return 0.0;
        }
        self.position_log(log10(ohms))
    }
}

/// Horizontal and vertical guide lines drawn over the curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Guides {
    pub low_volts: f64,
    pub high_volts: f64,
    pub marker_log_resistance: f64,
}

impl Guides {
    pub fn from_snapshot(s: &Snapshot) -> Self {
        Self {
            low_volts: s.thresholds.low_volts,
            high_volts: s.thresholds.high_volts,
            marker_log_resistance: s.marker_log_resistance,
        }
    }
}

const Y_LABEL_WIDTH: usize = 6;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn to_cell(frac: f64, cells: usize) -> usize {
    ((frac * (cells - 1) as f64).round() as usize).min(cells - 1)
}

/// Render the snapshot's curve as text, `width` × `height` plot cells plus a
/// y-label gutter and two axis rows. Sizes below 16 × 6 are raised to that.
///
/// Legend: `*` curve, `-` LOW/HIGH band edges, `|` current R_LDR.
pub fn render_ascii(snapshot: &Snapshot, axis: &LogAxis, width: usize, height: usize) -> String {
    let w = width.max(16);
    let h = height.max(6);
    let vmax = snapshot.supply_voltage;
    let guides = Guides::from_snapshot(snapshot);
    let row_of = |v: f64| to_cell(1.0 - (v / vmax).clamp(0.0, 1.0), h);

    let mut grid = vec![vec![' '; w]; h];

    for v in [guides.low_volts, guides.high_volts] {
        let r = row_of(v);
        for c in &mut grid[r] {
            *c = '-';
        }
    }

    let marker_col = to_cell(axis.position_log(guides.marker_log_resistance), w);
    for row in &mut grid {
        row[marker_col] = '|';
    }

    for s in &snapshot.curve {
        let c = to_cell(axis.position_log(s.log_resistance), w);
        grid[row_of(s.pin_voltage)][c] = '*';
    }

    // y labels on the rows that carry a reference value
    let mut labels: Vec<Option<f64>> = vec![None; h];
    for v in [vmax, guides.high_volts, guides.low_volts, 0.0] {
        labels[row_of(v)] = Some(v);
    }

    let mut out = String::with_capacity((w + Y_LABEL_WIDTH + 2) * (h + 2));
    for (row, label) in grid.iter().zip(&labels) {
        match label {
            Some(v) => out.push_str(&format!("{v:>5.1}V")),
            None => out.push_str(&" ".repeat(Y_LABEL_WIDTH)),
        }
        out.push('|');
        out.extend(row.iter());
        out.push('\n');
    }

    out.push_str(&" ".repeat(Y_LABEL_WIDTH));
    out.push('+');
    out.push_str(&"-".repeat(w));
    out.push('\n');

    // x tick labels, skipping any that would collide with the previous one
    let mut axis_row = vec![' '; w + 8];
    let mut free_from = 0usize;
    for (ohms, log_r) in axis.ticks() {
        let text: Vec<char> = TickLabel(ohms).to_string().chars().collect();
        let col = to_cell(axis.position_log(log_r), w);
        let start = col.saturating_sub(text.len() / 2).max(free_from);
        if start + text.len() > axis_row.len() {
            continue;
        }
        axis_row[start..start + text.len()].copy_from_slice(&text);
        free_from = start + text.len() + 1;
    }
    out.push_str(&" ".repeat(Y_LABEL_WIDTH + 1));
    out.push_str(axis_row.iter().collect::<String>().trim_end());
    out.push('\n');
    out
}
