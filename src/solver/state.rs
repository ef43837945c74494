//! Double-buffered simulation state and step orchestration.
//!
//! The state owns one terrain field and two copies of each evolving field
//! (water depth, u and v). A parity index selects the "current" copy; a step
//! reads the current copies, writes the others, and flips the parity.

use crate::error::Result;
use crate::grid::Grid;
use crate::solver::SweConfig;
use crate::solver::executor::{Serial, StageExecutor};

/// Split a buffer pair into `(current, next)` for the given parity.
#[inline]
fn split_buffers<const N: usize>(
    pair: &mut [Grid<N>; 2],
    current: usize,
) -> (&Grid<N>, &mut Grid<N>) {
    let (first, second) = pair.split_at_mut(1);
    if current == 0 {
        (&first[0], &mut second[0])
    } else {
        (&second[0], &mut first[0])
    }
}

// =============================================================================
// Simulation State
// =============================================================================

/// Height-field shallow water state on an N×N grid.
///
/// Velocities are staggered: `u(x, y)` is the flow across the face between
/// cells `(x, y)` and `(x+1, y)`, `v(x, y)` across the face between `(x, y)`
/// and `(x, y+1)`. Depth and terrain are cell-centred.
///
/// After every successful [`step`](Self::step), all current depths are
/// non-negative and every current velocity component lies within
/// `[-max_vel, max_vel]` (see [`SweConfig::max_velocity`]).
///
/// # Example
///
/// ```
/// use swe_grid::{SimulationState, SweConfig};
///
/// let mut sim = SimulationState::<4>::new(SweConfig::default()).unwrap();
/// sim.set_height(1, 1, 1.0);
/// sim.step().unwrap();
/// assert!(sim.height(1, 1) < 1.0);
/// assert!(sim.height(2, 1) > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationState<const N: usize> {
    ground_h: Grid<N>,
    water_h: [Grid<N>; 2],
    vel_u: [Grid<N>; 2],
    vel_v: [Grid<N>; 2],
    parity: usize,
    steps: u64,
    config: SweConfig,
}

impl<const N: usize> SimulationState<N> {
    /// Create a state with all fields zero.
    ///
    /// # Errors
    ///
    /// Returns [`SweError::InvalidConfig`](crate::SweError::InvalidConfig) if `config` fails validation.
    pub fn new(config: SweConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "Creating {}x{} shallow water state: dxdy={}, dt={}, max_vel={:.3}",
            N,
            N,
            config.dxdy,
            config.dt,
            config.max_velocity()
        );
        Ok(Self {
            ground_h: Grid::zeros(),
            water_h: [Grid::zeros(), Grid::zeros()],
            vel_u: [Grid::zeros(), Grid::zeros()],
            vel_v: [Grid::zeros(), Grid::zeros()],
            parity: 0,
            steps: 0,
            config,
        })
    }

    /// Create a state with default physics and the given cell spacing.
    pub fn with_spacing(dxdy: f32) -> Result<Self> {
        Self::new(SweConfig::default().with_dxdy(dxdy))
    }

    /// Grid dimension.
    #[inline]
    pub const fn size(&self) -> usize {
        N
    }

    /// Configuration in use.
    pub fn config(&self) -> &SweConfig {
        &self.config
    }

    /// Index (0 or 1) of the current buffers.
    pub fn parity(&self) -> usize {
        self.parity
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time: completed steps times `dt`.
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.config.dt as f64
    }

    // -------------------------------------------------------------------------
    // Field access
    // -------------------------------------------------------------------------

    /// Terrain height field.
    pub fn ground(&self) -> &Grid<N> {
        &self.ground_h
    }

    /// Mutable terrain height field, for initialization.
    pub fn ground_mut(&mut self) -> &mut Grid<N> {
        &mut self.ground_h
    }

    /// Set terrain height at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set_ground(&mut self, x: usize, y: usize, value: f32) {
        self.ground_h.set(x, y, value);
    }

    /// Current water depth field.
    pub fn heights(&self) -> &Grid<N> {
        &self.water_h[self.parity]
    }

    /// Mutable current water depth field.
    ///
    /// Writes take effect at the next step and are not validated.
    pub fn heights_mut(&mut self) -> &mut Grid<N> {
        &mut self.water_h[self.parity]
    }

    /// Current x-velocity field.
    pub fn velocities_u(&self) -> &Grid<N> {
        &self.vel_u[self.parity]
    }

    /// Current y-velocity field.
    pub fn velocities_v(&self) -> &Grid<N> {
        &self.vel_v[self.parity]
    }

    /// Current water depth at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn height(&self, x: usize, y: usize) -> f32 {
        self.water_h[self.parity].at(x, y)
    }

    /// Set the current water depth at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set_height(&mut self, x: usize, y: usize, value: f32) {
        self.water_h[self.parity].set(x, y, value);
    }

    /// Current x-velocity at face `(x, y)`, zero outside the grid.
    pub fn velocity_u(&self, x: isize, y: isize) -> f32 {
        self.vel_u[self.parity].at_or(x, y, 0.0)
    }

    /// Current y-velocity at face `(x, y)`, zero outside the grid.
    pub fn velocity_v(&self, x: isize, y: isize) -> f32 {
        self.vel_v[self.parity].at_or(x, y, 0.0)
    }

    /// Set the current velocities at face `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set_velocity(&mut self, x: usize, y: usize, u: f32, v: f32) {
        self.vel_u[self.parity].set(x, y, u);
        self.vel_v[self.parity].set(x, y, v);
    }

    /// Zero the current velocity fields.
    pub fn clear_velocities(&mut self) {
        self.vel_u[self.parity].fill(0.0);
        self.vel_v[self.parity].fill(0.0);
    }

    /// Put `depth` of water at the cell nearest to `(x, y)`.
    ///
    /// Coordinates are clamped into the grid. Cells on the outer border are
    /// left alone and `false` is returned.
    pub fn inject_water(&mut self, x: isize, y: isize, depth: f32) -> bool {
        let max = N as isize - 1;
        let xc = x.clamp(0, max);
        let yc = y.clamp(0, max);
        if xc == 0 || yc == 0 || xc == max || yc == max {
            return false;
        }
        self.water_h[self.parity].set(xc as usize, yc as usize, depth);
        true
    }

    /// Free-surface elevation `h + H` at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn surface_elevation(&self, x: usize, y: usize) -> f32 {
        self.height(x, y) + self.ground_h.at(x, y)
    }

    // -------------------------------------------------------------------------
    // Time stepping
    // -------------------------------------------------------------------------

    /// Advance the state by one time step `dt`.
    ///
    /// Runs velocity advection, the momentum update and the height update,
    /// then makes the freshly written buffers current.
    ///
    /// # Errors
    ///
    /// Returns [`SweError::NonFiniteHeight`](crate::SweError::NonFiniteHeight) if the height update blows up.
    /// The parity is not flipped in that case, so the current fields still
    /// hold the pre-step state. A failed step is not retried.
    pub fn step(&mut self) -> Result<()> {
        self.step_with(&Serial)
    }

    /// Advance one step with the stages spread over Rayon's thread pool.
    ///
    /// Produces the same fields as [`step`](Self::step).
    #[cfg(feature = "parallel")]
    pub fn step_parallel(&mut self) -> Result<()> {
        self.step_with(&crate::solver::RowParallel)
    }

    /// Advance one step using the given stage executor.
    pub fn step_with<E: StageExecutor>(&mut self, executor: &E) -> Result<()> {
        let current = self.parity;
        let next = 1 - current;
        let config = &self.config;

        let (u_src, u_dst) = split_buffers(&mut self.vel_u, current);
        let (v_src, v_dst) = split_buffers(&mut self.vel_v, current);
        executor.advect(u_src, v_src, u_dst, v_dst, config.dt);

        let (h_src, h_dst) = split_buffers(&mut self.water_h, current);
        executor.update_momentum(h_src, &self.ground_h, u_dst, v_dst, config);

        if let Err(err) = executor.update_heights(h_src, u_dst, v_dst, h_dst, config) {
            log::warn!(
                "Step {} aborted ({} executor): {}",
                self.steps + 1,
                executor.name(),
                err
            );
            return Err(err);
        }

        self.parity = next;
        self.steps += 1;
        log::trace!("Step {} complete, parity {}", self.steps, self.parity);
        Ok(())
    }

    /// Run `n` steps, stopping at the first error.
    pub fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    /// Backward-difference divergence of the current velocity field at
    /// `(x, y)`:
    ///
    ///   (u(x, y) - u(x-1, y) + v(x, y) - v(x, y-1)) / dxdy
    ///
    /// Velocities outside the grid read as zero. Does not modify the state.
    pub fn divergence(&self, x: isize, y: isize) -> f32 {
        let u11 = self.velocity_u(x, y);
        let u01 = self.velocity_u(x - 1, y);
        let v11 = self.velocity_v(x, y);
        let v10 = self.velocity_v(x, y - 1);
        (u11 - u01 + v11 - v10) / self.config.dxdy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweError;

    const TOL: f32 = 1e-6;

    fn droplet() -> SimulationState<4> {
        let mut sim = SimulationState::<4>::new(SweConfig::default()).unwrap();
        sim.set_height(1, 1, 1.0);
        sim
    }

    #[test]
    fn test_new_is_zeroed() {
        let sim = SimulationState::<5>::with_spacing(0.25).unwrap();
        assert_eq!(sim.heights().max_abs(), 0.0);
        assert_eq!(sim.velocities_u().max_abs(), 0.0);
        assert_eq!(sim.velocities_v().max_abs(), 0.0);
        assert_eq!(sim.ground().max_abs(), 0.0);
        assert_eq!(sim.parity(), 0);
        assert_eq!(sim.config().dxdy, 0.25);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = SimulationState::<4>::new(SweConfig::default().with_dt(0.0)).unwrap_err();
        assert!(matches!(err, SweError::InvalidConfig(_)));
    }

    #[test]
    fn test_step_flips_parity_and_counts() {
        let mut sim = droplet();
        sim.step().unwrap();
        assert_eq!(sim.parity(), 1);
        assert_eq!(sim.steps(), 1);
        sim.step().unwrap();
        assert_eq!(sim.parity(), 0);
        assert_eq!(sim.steps(), 2);
        assert!((sim.time() - 2.0 * 0.01666).abs() < 1e-6);
    }

    #[test]
    fn test_step_does_not_touch_ground() {
        let mut sim = droplet();
        sim.set_ground(2, 2, 0.5);
        let before = sim.ground().clone();
        sim.step_n(5).unwrap();
        assert_eq!(sim.ground(), &before);
    }

    #[test]
    fn test_failed_step_keeps_previous_state() {
        let mut sim = droplet();
        sim.set_height(2, 2, f32::INFINITY);
        let before = sim.heights().clone();
        let err = sim.step().unwrap_err();
        assert!(matches!(err, SweError::NonFiniteHeight { .. }));
        assert_eq!(sim.parity(), 0);
        assert_eq!(sim.steps(), 0);
        assert_eq!(sim.heights(), &before);
    }

    #[test]
    fn test_divergence_backward_difference() {
        let mut sim = SimulationState::<4>::new(SweConfig::default()).unwrap();
        sim.set_velocity(1, 1, 2.0, 1.0);
        sim.set_velocity(0, 1, 0.5, 0.0);
        sim.set_velocity(1, 0, 0.0, -1.0);

        let expected = (2.0 - 0.5 + 1.0 - (-1.0)) / 0.4;
        assert!((sim.divergence(1, 1) - expected).abs() < 1e-5);

        // Outside reads are zero: only u(0,0)/v(0,0) contribute at the corner
        assert!((sim.divergence(0, 0) - 0.0).abs() < TOL);
        // Repeated queries leave the state alone
        let snapshot = sim.velocities_u().clone();
        for _ in 0..3 {
            sim.divergence(1, 1);
        }
        assert_eq!(sim.velocities_u(), &snapshot);
    }

    #[test]
    fn test_velocity_accessors_default_outside() {
        let mut sim = SimulationState::<3>::new(SweConfig::default()).unwrap();
        sim.set_velocity(2, 2, 1.0, -1.0);
        assert_eq!(sim.velocity_u(2, 2), 1.0);
        assert_eq!(sim.velocity_v(2, 2), -1.0);
        assert_eq!(sim.velocity_u(3, 2), 0.0);
        assert_eq!(sim.velocity_v(-1, 0), 0.0);
    }

    #[test]
    fn test_inject_water_skips_border() {
        let mut sim = SimulationState::<5>::new(SweConfig::default()).unwrap();
        assert!(sim.inject_water(2, 2, 1.1));
        assert_eq!(sim.height(2, 2), 1.1);
        assert!(!sim.inject_water(0, 2, 1.1));
        assert!(!sim.inject_water(2, 4, 1.1));
        // Clamped onto the border
        assert!(!sim.inject_water(100, 2, 1.1));
        assert!(!sim.inject_water(-5, -5, 1.1));
        assert_eq!(sim.heights().sum(), 1.1);
    }

    #[test]
    fn test_surface_elevation() {
        let mut sim = droplet();
        sim.set_ground(1, 1, 0.25);
        assert!((sim.surface_elevation(1, 1) - 1.25).abs() < TOL);
    }

    #[test]
    fn test_split_buffers_selects_by_parity() {
        let mut pair = [Grid::<2>::new(0.0), Grid::<2>::new(1.0)];
        let (cur, next) = split_buffers(&mut pair, 0);
        assert_eq!(cur.at(0, 0), 0.0);
        assert_eq!(next.at(0, 0), 1.0);
        let (cur, next) = split_buffers(&mut pair, 1);
        assert_eq!(cur.at(0, 0), 1.0);
        assert_eq!(next.at(0, 0), 0.0);
    }
}
