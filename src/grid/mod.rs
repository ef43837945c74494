//! Fixed-size scalar fields on a uniform square grid.
//!
//! - [`Grid`]: N×N `f32` storage with explicit bounds policies
//! - [`sample_bilinear`]: interpolation between cell samples

mod field;
mod interpolation;

pub use field::Grid;
pub use interpolation::{lerp, sample_bilinear};
