//! Momentum update: pressure gradient, shore drag and dry-cell handling.
//!
//! Applied to the advected velocities, using the heights of the previous
//! step:
//!
//!   u' = u - dt·g·(η(x+1, y) - η(x, y))/Δ - drag·u,   η = h + H
//!
//! and symmetrically for v along y. A face is forced to zero velocity when
//! the water on the lower side is below the terrain on the other side and
//! that lower cell is dry, so no flow is sourced from an empty cell.
//! Results are clamped to `[-max_vel, max_vel]`.

use crate::grid::Grid;
use crate::solver::SweConfig;

/// Whether the face between cells `a` and `b` must carry no flow.
///
/// `eta_*` is the free-surface elevation, `ground_*` the terrain height and
/// `h_*` the water depth on each side.
#[inline]
pub fn is_dry_face(
    eta_a: f32,
    eta_b: f32,
    ground_a: f32,
    ground_b: f32,
    h_a: f32,
    h_b: f32,
    eps: f32,
) -> bool {
    (eta_b < ground_a && h_a < eps) || (eta_a < ground_b && h_b < eps)
}

/// Gravity- and drag-corrected face velocity, clamped to `max_vel`.
#[inline]
pub fn accelerate(vel: f32, eta_a: f32, eta_b: f32, drag: f32, config: &SweConfig) -> f32 {
    let max_vel = config.max_velocity();
    let slope = (eta_b - eta_a) / config.dxdy;
    let new_vel = vel - config.dt * config.g * slope - drag * vel;
    new_vel.clamp(-max_vel, max_vel)
}

/// Update one row `y` of both velocity components in place.
///
/// `u_row` and `v_row` hold the advected velocities on entry and the final
/// velocities on return. `h` and `ground` are the previous step's fields.
pub fn update_momentum_row<const N: usize>(
    y: usize,
    h: &Grid<N>,
    ground: &Grid<N>,
    config: &SweConfig,
    u_row: &mut [f32],
    v_row: &mut [f32],
) {
    let yi = y as isize;
    for x in 0..N - 1 {
        let xi = x as isize;

        let h_c = h.at_clamped(xi, yi);
        let h_r = h.at_clamped(xi + 1, yi);
        let h_u = h.at_clamped(xi, yi + 1);

        let ground_c = ground.at_clamped(xi, yi);
        let ground_r = ground.at_clamped(xi + 1, yi);
        let ground_u = ground.at_clamped(xi, yi + 1);

        let eta_c = h_c + ground_c;
        let eta_r = h_r + ground_r;
        let eta_u = h_u + ground_u;

        let drag = config.drag_at(h_c);

        u_row[x] = if is_dry_face(eta_c, eta_r, ground_c, ground_r, h_c, h_r, config.eps) {
            0.0
        } else {
            accelerate(u_row[x], eta_c, eta_r, drag, config)
        };

        v_row[x] = if is_dry_face(eta_c, eta_u, ground_c, ground_u, h_c, h_u, config.eps) {
            0.0
        } else {
            accelerate(v_row[x], eta_c, eta_u, drag, config)
        };
    }
}

/// Apply the momentum update to every interior face of `(u, v)`.
pub fn update_momentum<const N: usize>(
    h: &Grid<N>,
    ground: &Grid<N>,
    u: &mut Grid<N>,
    v: &mut Grid<N>,
    config: &SweConfig,
) {
    for (y, (u_row, v_row)) in u.rows_mut().zip(v.rows_mut()).enumerate().take(N - 1) {
        update_momentum_row(y, h, ground, config, u_row, v_row);
    }
}
