//! Height-field solver components.
//!
//! # Submodules
//!
//! - [`config`]: Physical and numerical parameters ([`SweConfig`])
//! - [`state`]: Double-buffered fields and step orchestration ([`SimulationState`])
//! - [`executor`]: Stage scheduling strategies ([`StageExecutor`], [`Serial`])
//! - [`diagnostics`]: Runtime diagnostics and conservation tracking
//!
//! The per-stage row kernels live in `advection`, `momentum` and
//! `continuity`. A step runs them in that order, each stage reading the
//! buffers the previous one finished writing.

mod advection;
pub mod config;
mod continuity;
pub mod diagnostics;
pub mod executor;
mod momentum;
#[cfg(feature = "parallel")]
mod parallel;
pub mod state;

pub use config::SweConfig;
pub use diagnostics::{DiagnosticsTracker, GridDiagnostics, total_velocity, total_water};
pub use executor::{Serial, StageExecutor};
pub use state::SimulationState;

#[cfg(feature = "parallel")]
pub use parallel::RowParallel;
