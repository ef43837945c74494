//! Error types for grid access and time stepping.

use thiserror::Error;

/// Errors reported by the grid and the integrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweError {
    /// Cell index outside the `[0, size)` square.
    #[error("Cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: isize, y: isize, size: usize },

    /// Height update produced NaN or Inf.
    ///
    /// The time step, cell spacing or gravity violate the scheme's stability
    /// bound. The state is left at its pre-step values.
    #[error("Non-finite water height {value} at cell ({x}, {y})")]
    NonFiniteHeight { x: usize, y: usize, value: f32 },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SweError {
    /// Create an out-of-bounds error.
    pub fn out_of_bounds(x: impl TryInto<isize>, y: impl TryInto<isize>, size: usize) -> Self {
        Self::OutOfBounds {
            x: x.try_into().unwrap_or(isize::MAX),
            y: y.try_into().unwrap_or(isize::MAX),
            size,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SweError>;
