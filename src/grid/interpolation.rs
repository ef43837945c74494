//! Bilinear sampling of grid fields at fractional positions.

use super::Grid;

/// Linear blend: `a` at `w = 0`, `b` at `w = 1`.
#[inline(always)]
pub fn lerp(a: f32, b: f32, w: f32) -> f32 {
    a * (1.0 - w) + b * w
}

/// Bilinearly interpolate `grid` at the fractional cell position `(x, y)`.
///
/// The four surrounding samples are read with [`Grid::at_or`] and a default
/// of zero, so positions near or beyond the domain edge blend towards zero.
pub fn sample_bilinear<const N: usize>(grid: &Grid<N>, x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let xi = x0 as isize;
    let yi = y0 as isize;

    let g00 = grid.at_or(xi, yi, 0.0);
    let g10 = grid.at_or(xi + 1, yi, 0.0);
    let g01 = grid.at_or(xi, yi + 1, 0.0);
    let g11 = grid.at_or(xi + 1, yi + 1, 0.0);

    lerp(lerp(g00, g10, fx), lerp(g01, g11, fx), fy)
}
