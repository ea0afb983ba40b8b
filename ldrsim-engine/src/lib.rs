//! ldrsim Engine: bench session, slider controls and chart model.
//!
//! Crate layout:
//! - [`bench`]    : `Bench` owns the current inputs; `Snapshot` is everything derived from them
//! - [`controls`] : `Slider`, clamped and stepped like an HTML range input
//! - [`chart`]    : log axis, guide lines, and a plain-text chart renderer
//!
//! The bench recomputes synchronously on every write. There is no caching
//! across input changes and no shared state; front-ends (CLI, TUI, FFI)
//! hold a `Bench` and read its snapshot after each interaction.

pub mod bench;
pub mod chart;
pub mod controls;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use bench::{Bench, BenchConfig, Snapshot};
pub use chart::{render_ascii, Guides, LogAxis};
pub use controls::{Slider, LDR_RANGE, PULL_DOWN_RANGE};
pub use ldrsim_core as model;
