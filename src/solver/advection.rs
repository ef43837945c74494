//! Semi-Lagrangian advection of the staggered velocity field.
//!
//! For each face velocity we trace a parcel backwards along the current
//! velocity field and take the value found at its foot point:
//!
//!   u*(x, y) = u(x - dt·u, y - dt·v̄)
//!
//! where v̄ is the other component interpolated onto the u face. The scheme
//! is unconditionally stable for the advection term alone but diffusive.
//!
//! Only faces with `x, y < N-1` are written. The last row and column of the
//! destination buffers keep whatever they held, which acts as a no-flow
//! condition at the outer boundary.

use crate::grid::{Grid, sample_bilinear};

/// Advect one row `y` of both velocity components.
///
/// `u_row` and `v_row` are row `y` of the destination buffers.
pub fn advect_velocity_row<const N: usize>(
    y: usize,
    u_src: &Grid<N>,
    v_src: &Grid<N>,
    dt: f32,
    u_row: &mut [f32],
    v_row: &mut [f32],
) {
    let yf = y as f32;
    for x in 0..N - 1 {
        let xf = x as f32;

        // u lives on the +x face: v is sampled half a cell right and down
        let u = u_src.at(x, y);
        let v_face = sample_bilinear(v_src, xf + 0.5, yf - 0.5);
        u_row[x] = sample_bilinear(u_src, xf - dt * u, yf - dt * v_face);

        // v lives on the +y face: u is sampled half a cell left and up
        let v = v_src.at(x, y);
        let u_face = sample_bilinear(u_src, xf - 0.5, yf + 0.5);
        v_row[x] = sample_bilinear(v_src, xf - dt * u_face, yf - dt * v);
    }
}

/// Advect both velocity components from `(u_src, v_src)` into
/// `(u_dst, v_dst)`.
pub fn advect_velocities<const N: usize>(
    u_src: &Grid<N>,
    v_src: &Grid<N>,
    u_dst: &mut Grid<N>,
    v_dst: &mut Grid<N>,
    dt: f32,
) {
    for (y, (u_row, v_row)) in u_dst
        .rows_mut()
        .zip(v_dst.rows_mut())
        .enumerate()
        .take(N - 1)
    {
        advect_velocity_row(y, u_src, v_src, dt, u_row, v_row);
    }
}
