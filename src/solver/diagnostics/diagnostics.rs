//! Whole-field diagnostics for height-field simulations.
//!
//! Provides functions and types for computing and tracking:
//! - Water content (sum of depths, volume)
//! - Flow activity (sum of face speeds, divergence)
//! - Solution bounds (depth range, largest velocity component)
//! - CFL numbers for the advective and gravity-wave speeds
//!
//! # Example
//!
//! ```
//! use swe_grid::{DiagnosticsTracker, GridDiagnostics, SimulationState, SweConfig};
//!
//! let mut sim = SimulationState::<8>::new(SweConfig::default()).unwrap();
//! sim.set_height(4, 4, 1.0);
//!
//! let mut tracker = DiagnosticsTracker::new(GridDiagnostics::compute(&sim));
//! for _ in 0..10 {
//!     sim.step().unwrap();
//!     tracker.update(sim.time(), GridDiagnostics::compute(&sim));
//! }
//! assert!(tracker.water_error() < 1e-3);
//! ```

use crate::solver::SimulationState;

/// Depth above which a cell counts as wet for the wet-cell count.
const WET_THRESHOLD: f32 = 1e-6;

/// Diagnostic quantities of the current fields.
#[derive(Clone, Debug, PartialEq)]
pub struct GridDiagnostics {
    /// Sum of water depths over all cells
    pub total_water: f64,
    /// Water volume: total depth times cell area
    pub total_volume: f64,
    /// Sum of |u| + |v| over all faces
    pub total_velocity: f64,
    /// Minimum water depth
    pub min_depth: f32,
    /// Maximum water depth
    pub max_depth: f32,
    /// Largest |u| or |v|
    pub max_velocity: f32,
    /// Largest |divergence| of the velocity field
    pub max_divergence: f32,
    /// Advective CFL number: max_velocity * dt / dxdy
    pub cfl_advective: f32,
    /// Gravity-wave CFL number: sqrt(g * max_depth) * dt / dxdy
    pub cfl_gravity: f32,
    /// Number of cells with depth above a small threshold
    pub wet_cells: usize,
}

impl GridDiagnostics {
    /// Compute all diagnostics from the current fields of `state`.
    pub fn compute<const N: usize>(state: &SimulationState<N>) -> Self {
        let config = state.config();
        let heights = state.heights();
        let u = state.velocities_u();
        let v = state.velocities_v();

        let mut total_water = 0.0_f64;
        let mut wet_cells = 0;
        for &h in heights.as_slice() {
            total_water += h as f64;
            if h > WET_THRESHOLD {
                wet_cells += 1;
            }
        }

        let total_velocity: f64 = u
            .as_slice()
            .iter()
            .zip(v.as_slice())
            .map(|(a, b)| (a.abs() + b.abs()) as f64)
            .sum();

        let (mut min_depth, max_depth) = heights.min_max();
        if !min_depth.is_finite() {
            min_depth = 0.0;
        }
        let max_velocity = u.max_abs().max(v.max_abs());

        let mut max_divergence = 0.0_f32;
        for y in 0..N as isize {
            for x in 0..N as isize {
                max_divergence = max_divergence.max(state.divergence(x, y).abs());
            }
        }

        let dt_over_dx = config.dt / config.dxdy;
        let cfl_advective = max_velocity * dt_over_dx;
        let cfl_gravity = (config.g * max_depth.max(0.0)).sqrt() * dt_over_dx;
        let cell_area = (config.dxdy as f64) * (config.dxdy as f64);

        Self {
            total_water,
            total_volume: total_water * cell_area,
            total_velocity,
            min_depth,
            max_depth,
            max_velocity,
            max_divergence,
            cfl_advective,
            cfl_gravity,
            wet_cells,
        }
    }

    /// Format diagnostics as a single-line summary.
    pub fn summary_line(&self) -> String {
        format!(
            "water={:.4} vel={:.4} h=[{:.4},{:.4}] |u|max={:.3} div={:.3} CFL={:.3}/{:.3} wet={}",
            self.total_water,
            self.total_velocity,
            self.min_depth,
            self.max_depth,
            self.max_velocity,
            self.max_divergence,
            self.cfl_advective,
            self.cfl_gravity,
            self.wet_cells
        )
    }
}

/// Track diagnostics over time for monitoring water conservation and
/// extrema.
#[derive(Clone, Debug)]
pub struct DiagnosticsTracker {
    /// Initial diagnostics (for conservation error computation)
    initial: GridDiagnostics,
    /// Most recent diagnostics
    current: GridDiagnostics,
    /// Time of most recent update
    current_time: f64,
    /// Number of updates
    n_updates: usize,
    /// Maximum gravity-wave CFL seen
    max_cfl_seen: f32,
    /// Maximum velocity component seen
    max_velocity_seen: f32,
    /// Maximum depth seen
    max_depth_seen: f32,
}

impl DiagnosticsTracker {
    /// Create a new tracker with initial diagnostics.
    pub fn new(initial: GridDiagnostics) -> Self {
        Self {
            max_cfl_seen: initial.cfl_gravity,
            max_velocity_seen: initial.max_velocity,
            max_depth_seen: initial.max_depth,
            current: initial.clone(),
            initial,
            current_time: 0.0,
            n_updates: 0,
        }
    }

    /// Update tracker with new diagnostics.
    pub fn update(&mut self, time: f64, diag: GridDiagnostics) {
        self.current_time = time;
        self.n_updates += 1;
        self.max_cfl_seen = self.max_cfl_seen.max(diag.cfl_gravity);
        self.max_velocity_seen = self.max_velocity_seen.max(diag.max_velocity);
        self.max_depth_seen = self.max_depth_seen.max(diag.max_depth);
        self.current = diag;
    }

    /// Relative change in total water since the initial diagnostics.
    ///
    /// The donor-cell fluxes conserve water except where depth is clamped
    /// at zero, so this stays small unless cells are drained hard.
    pub fn water_error(&self) -> f64 {
        if self.initial.total_water.abs() > 1e-12 {
            (self.current.total_water - self.initial.total_water).abs()
                / self.initial.total_water.abs()
        } else {
            self.current.total_water.abs()
        }
    }

    /// Get current diagnostics.
    pub fn current(&self) -> &GridDiagnostics {
        &self.current
    }

    /// Get initial diagnostics.
    pub fn initial(&self) -> &GridDiagnostics {
        &self.initial
    }

    /// Number of updates recorded.
    pub fn n_updates(&self) -> usize {
        self.n_updates
    }

    /// Largest velocity component seen so far.
    pub fn max_velocity_seen(&self) -> f32 {
        self.max_velocity_seen
    }

    /// Largest depth seen so far.
    pub fn max_depth_seen(&self) -> f32 {
        self.max_depth_seen
    }

    /// Check if the run appears stable (finite values, CFL below one).
    pub fn is_stable(&self) -> bool {
        let diag = &self.current;
        if !diag.total_water.is_finite() || !diag.total_velocity.is_finite() {
            return false;
        }
        diag.cfl_advective <= 1.0
    }

    /// Log a summary of the tracked diagnostics at info level.
    pub fn log_summary(&self) {
        log::info!(
            "Diagnostics at t={:.3}s ({} updates): water error {:.2e}",
            self.current_time,
            self.n_updates,
            self.water_error()
        );
        log::info!(
            "Extrema: max CFL {:.4}, max |u| {:.4}, max depth {:.4}",
            self.max_cfl_seen,
            self.max_velocity_seen,
            self.max_depth_seen
        );
        log::info!("Current: {}", self.current.summary_line());
    }
}

/// Total water (sum of current depths) of a state.
pub fn total_water<const N: usize>(state: &SimulationState<N>) -> f64 {
    state.heights().as_slice().iter().map(|&h| h as f64).sum()
}

/// Total velocity (sum of |u| + |v| over current faces) of a state.
pub fn total_velocity<const N: usize>(state: &SimulationState<N>) -> f64 {
    let u = state.velocities_u().as_slice();
    let v = state.velocities_v().as_slice();
    u.iter().zip(v).map(|(a, b)| (a.abs() + b.abs()) as f64).sum()
}
