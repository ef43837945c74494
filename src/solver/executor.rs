//! Execution strategies for the three per-step stages.
//!
//! Every stage writes rows of a destination buffer from read-only source
//! buffers, so a strategy only decides how rows are scheduled. Each call
//! returns once its destination is fully written, which is the barrier
//! between stages.

use crate::error::Result;
use crate::grid::Grid;
use crate::solver::{SweConfig, advection, continuity, momentum};

/// Schedules the row kernels of one time step.
pub trait StageExecutor {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Semi-Lagrangian advection into `(u_dst, v_dst)`.
    fn advect<const N: usize>(
        &self,
        u_src: &Grid<N>,
        v_src: &Grid<N>,
        u_dst: &mut Grid<N>,
        v_dst: &mut Grid<N>,
        dt: f32,
    );

    /// Gravity, drag and dry-cell correction of `(u, v)` in place.
    fn update_momentum<const N: usize>(
        &self,
        h: &Grid<N>,
        ground: &Grid<N>,
        u: &mut Grid<N>,
        v: &mut Grid<N>,
        config: &SweConfig,
    );

    /// Donor-cell height update into `h_dst`.
    fn update_heights<const N: usize>(
        &self,
        h: &Grid<N>,
        u: &Grid<N>,
        v: &Grid<N>,
        h_dst: &mut Grid<N>,
        config: &SweConfig,
    ) -> Result<()>;
}

/// Row-by-row execution on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Serial;

impl StageExecutor for Serial {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn advect<const N: usize>(
        &self,
        u_src: &Grid<N>,
        v_src: &Grid<N>,
        u_dst: &mut Grid<N>,
        v_dst: &mut Grid<N>,
        dt: f32,
    ) {
        advection::advect_velocities(u_src, v_src, u_dst, v_dst, dt);
    }

    fn update_momentum<const N: usize>(
        &self,
        h: &Grid<N>,
        ground: &Grid<N>,
        u: &mut Grid<N>,
        v: &mut Grid<N>,
        config: &SweConfig,
    ) {
        momentum::update_momentum(h, ground, u, v, config);
    }

    fn update_heights<const N: usize>(
        &self,
        h: &Grid<N>,
        u: &Grid<N>,
        v: &Grid<N>,
        h_dst: &mut Grid<N>,
        config: &SweConfig,
    ) -> Result<()> {
        continuity::update_heights(h, u, v, h_dst, config)
    }
}
