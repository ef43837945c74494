//! Simulation runner abstraction.
//!
//! Ties a [`SimulationState`](crate::solver::SimulationState) to a stage
//! executor, callbacks and stability monitoring.
//!
//! # Example
//! ```
//! use swe_grid::analysis::StabilityThresholds;
//! use swe_grid::simulation::Simulation;
//! use swe_grid::{SimulationState, SweConfig};
//!
//! let mut state = SimulationState::<16>::new(SweConfig::default()).unwrap();
//! state.set_height(8, 8, 1.0);
//!
//! let result = Simulation::new()
//!     .with_stability_monitor(StabilityThresholds::strict())
//!     .with_callback_interval(10)
//!     .run_with_callback(&mut state, 1.0, |s, t| println!("t = {:.2}: h = {:.3}", t, s.height(8, 8)));
//! assert!(result.success);
//! ```

mod runner;

pub use runner::{Simulation, SimulationConfig, SimulationResult};
