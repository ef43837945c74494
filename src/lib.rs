//! # swe-grid
//!
//! A height-field shallow water integrator on a fixed-size square grid.
//!
//! This crate provides:
//! - Dense N×N scalar fields with strict, defaulting and clamped accessors
//! - Semi-Lagrangian velocity advection on a staggered grid
//! - Gravity-driven momentum update with shore drag and dry-face handling
//! - Upwind donor-cell height update with an optional depth limiter
//! - Double-buffered stepping, serial or row-parallel (feature `parallel`)
//! - Diagnostics, stability monitoring and a simulation runner
//!
//! # Example
//!
//! ```
//! use swe_grid::{Scenario, SimulationState, SweConfig};
//!
//! let mut sim = SimulationState::<32>::new(SweConfig::default())?;
//! Scenario::BowlDamBreak.apply(&mut sim);
//! for _ in 0..60 {
//!     sim.step()?;
//! }
//! assert!(sim.heights().as_slice().iter().all(|&h| h >= 0.0));
//! # Ok::<(), swe_grid::SweError>(())
//! ```

pub mod analysis;
pub mod error;
pub mod grid;
pub mod scenario;
pub mod simulation;
pub mod solver;

pub use error::{Result, SweError};
pub use grid::{Grid, lerp, sample_bilinear};
pub use scenario::{Scenario, barrier_walls, bowl_terrain, fill_basin};
pub use solver::{
    DiagnosticsTracker, GridDiagnostics, Serial, SimulationState, StageExecutor, SweConfig,
    total_velocity, total_water,
};

#[cfg(feature = "parallel")]
pub use solver::RowParallel;

// Analysis and runner types
pub use analysis::{StabilityMonitor, StabilityStatus, StabilityThresholds, StabilityWarning};
pub use simulation::{Simulation, SimulationConfig, SimulationResult};
