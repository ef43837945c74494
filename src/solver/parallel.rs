//! Row-parallel stage execution using Rayon.
//!
//! Rows of a destination buffer are independent within a stage, so each
//! stage is a `par_rows_mut` sweep over the same row kernels the serial
//! path uses. Results are bit-identical to [`Serial`](super::Serial).

use rayon::prelude::*;

use crate::error::Result;
use crate::grid::Grid;
use crate::solver::executor::StageExecutor;
use crate::solver::{SweConfig, advection, continuity, momentum};

/// Rayon-backed executor: one task per grid row.
#[derive(Clone, Copy, Debug, Default)]
pub struct RowParallel;

impl StageExecutor for RowParallel {
    fn name(&self) -> &'static str {
        "row-parallel"
    }

    fn advect<const N: usize>(
        &self,
        u_src: &Grid<N>,
        v_src: &Grid<N>,
        u_dst: &mut Grid<N>,
        v_dst: &mut Grid<N>,
        dt: f32,
    ) {
        u_dst
            .par_rows_mut()
            .zip(v_dst.par_rows_mut())
            .enumerate()
            .take(N - 1)
            .for_each(|(y, (u_row, v_row))| {
                advection::advect_velocity_row(y, u_src, v_src, dt, u_row, v_row);
            });
    }

    fn update_momentum<const N: usize>(
        &self,
        h: &Grid<N>,
        ground: &Grid<N>,
        u: &mut Grid<N>,
        v: &mut Grid<N>,
        config: &SweConfig,
    ) {
        u.par_rows_mut()
            .zip(v.par_rows_mut())
            .enumerate()
            .take(N - 1)
            .for_each(|(y, (u_row, v_row))| {
                momentum::update_momentum_row(y, h, ground, config, u_row, v_row);
            });
    }

    fn update_heights<const N: usize>(
        &self,
        h: &Grid<N>,
        u: &Grid<N>,
        v: &Grid<N>,
        h_dst: &mut Grid<N>,
        config: &SweConfig,
    ) -> Result<()> {
        h_dst
            .par_rows_mut()
            .enumerate()
            .try_for_each(|(y, h_row)| continuity::update_height_row(y, h, u, v, config, h_row))
    }
}
