//! Height update: upwind donor-cell discretization of the continuity
//! equation.
//!
//!   ∂h/∂t + ∂(h u)/∂x + ∂(h v)/∂y = 0
//!
//! Each face flux takes its height from the upstream cell. Heights come from
//! the previous step while velocities are the freshly updated ones, a
//! semi-implicit coupling that keeps the scheme stable at the default step.

use crate::error::{Result, SweError};
use crate::grid::Grid;
use crate::solver::SweConfig;

/// Upwinded heights on the four faces of a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonorHeights {
    /// Height carried through the +x face
    pub right: f32,
    /// Height carried through the -x face
    pub left: f32,
    /// Height carried through the +y face
    pub up: f32,
    /// Height carried through the -y face
    pub down: f32,
}

impl DonorHeights {
    /// Pick the donor height for every face of cell `(x, y)`.
    ///
    /// A face with outflow (or no flow) uses the local height; a face with
    /// inflow uses the neighbor's.
    #[inline]
    pub fn select<const N: usize>(
        h: &Grid<N>,
        x: isize,
        y: isize,
        u_here: f32,
        u_left: f32,
        v_here: f32,
        v_below: f32,
    ) -> Self {
        let h_c = h.at_clamped(x, y);
        Self {
            right: if u_here <= 0.0 { h.at_clamped(x + 1, y) } else { h_c },
            left: if u_left <= 0.0 { h_c } else { h.at_clamped(x - 1, y) },
            up: if v_here <= 0.0 { h.at_clamped(x, y + 1) } else { h_c },
            down: if v_below <= 0.0 { h_c } else { h.at_clamped(x, y - 1) },
        }
    }

    /// Subtract any excess of the mean donor height over `max_mean`
    /// uniformly from all four faces.
    #[inline]
    pub fn limit(&mut self, max_mean: f32) {
        let mean = 0.25 * (self.right + self.left + self.up + self.down);
        let excess = (mean - max_mean).max(0.0);
        self.right -= excess;
        self.left -= excess;
        self.up -= excess;
        self.down -= excess;
    }
}

/// Net outflow per unit area through the four faces.
#[inline]
pub fn flux_divergence(
    donors: &DonorHeights,
    u_here: f32,
    u_left: f32,
    v_here: f32,
    v_below: f32,
    dxdy: f32,
) -> f32 {
    (donors.right * u_here - donors.left * u_left) / dxdy
        + (donors.up * v_here - donors.down * v_below) / dxdy
}

/// Compute row `y` of the new height field.
///
/// `h` is the previous height field, `(u, v)` the updated velocities and
/// `h_row` row `y` of the destination buffer.
///
/// # Errors
///
/// Returns [`SweError::NonFiniteHeight`] for the first cell whose new height
/// is NaN or infinite.
pub fn update_height_row<const N: usize>(
    y: usize,
    h: &Grid<N>,
    u: &Grid<N>,
    v: &Grid<N>,
    config: &SweConfig,
    h_row: &mut [f32],
) -> Result<()> {
    let yi = y as isize;
    let max_mean = config.max_mean_donor_height();

    for x in 0..N {
        let xi = x as isize;

        let u_here = u.at(x, y);
        let u_left = if x > 0 { u.at(x - 1, y) } else { 0.0 };
        let v_here = v.at(x, y);
        let v_below = if y > 0 { v.at(x, y - 1) } else { 0.0 };

        let mut donors = DonorHeights::select(h, xi, yi, u_here, u_left, v_here, v_below);
        if let Some(max_mean) = max_mean {
            donors.limit(max_mean);
        }

        let div = flux_divergence(&donors, u_here, u_left, v_here, v_below, config.dxdy);
        let raw = h.at_clamped(xi, yi) - config.dt * div;

        // Checked before clamping: f32::max would turn NaN into 0
        if !raw.is_finite() {
            return Err(SweError::NonFiniteHeight { x, y, value: raw });
        }

        h_row[x] = raw.max(0.0);
    }
    Ok(())
}

/// Compute the full new height field into `h_dst`.
pub fn update_heights<const N: usize>(
    h: &Grid<N>,
    u: &Grid<N>,
    v: &Grid<N>,
    h_dst: &mut Grid<N>,
    config: &SweConfig,
) -> Result<()> {
    for (y, h_row) in h_dst.rows_mut().enumerate() {
        update_height_row(y, h, u, v, config, h_row)?;
    }
    Ok(())
}
