//! Runtime diagnostics and progress tracking.
//!
//! - [`GridDiagnostics`]: Water content, bounds and CFL of the current fields
//! - [`DiagnosticsTracker`]: Conservation and extrema over a run
//!
//! The per-cell divergence query lives on
//! [`SimulationState::divergence`](crate::solver::SimulationState::divergence).

mod diagnostics;

pub use diagnostics::{DiagnosticsTracker, GridDiagnostics, total_velocity, total_water};
