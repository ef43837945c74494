//! Physical and numerical parameters of the height-field integrator.

use crate::error::{Result, SweError};

/// Configuration for [`SimulationState`](crate::solver::SimulationState).
///
/// The time step is fixed: one call to `step()` always advances the state by
/// `dt`. The velocity bound [`SweConfig::max_velocity`] is derived from `dt`
/// and `dxdy` rather than from the actual wave speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweConfig {
    /// Gravitational acceleration (m/s²)
    pub g: f32,
    /// Time step (s); the default assumes a 60 Hz host
    pub dt: f32,
    /// Cell spacing, identical in x and y (m)
    pub dxdy: f32,
    /// Depth below which a cell counts as dry for the zero-flow rule
    pub eps: f32,
    /// Fraction of velocity removed per step in shallow (shore) cells
    pub drag_factor: f32,
    /// Depth below which shore drag applies
    pub drag_shore_height_threshold: f32,
    /// Donor-height limiter factor `b`; `None` disables the limiter
    pub height_limiter: Option<f32>,
}

impl SweConfig {
    /// Standard gravity.
    pub const G: f32 = 9.81;
    /// Default time step (one 60 Hz frame).
    pub const DT: f32 = 0.01666;
    /// Default cell spacing.
    pub const DXDY: f32 = 0.4;
    /// Limiter factor used when the limiter is switched on without a value.
    pub const DEFAULT_LIMITER: f32 = 2.0;

    /// Create a configuration with the given step and spacing, default
    /// physics otherwise.
    ///
    /// # Arguments
    /// * `dt` - Time step (s)
    /// * `dxdy` - Cell spacing (m)
    pub fn new(dt: f32, dxdy: f32) -> Self {
        Self {
            dt,
            dxdy,
            ..Self::default()
        }
    }

    /// The alternative parameter set with active shore drag.
    ///
    /// `drag_factor = 0.05`, `eps = 0.0001 * dxdy`. Whether this or
    /// [`SweConfig::default`] is the intended final tuning is unresolved, so
    /// both are exposed.
    pub fn shore_damped() -> Self {
        let base = Self::default();
        Self {
            eps: 0.0001 * base.dxdy,
            drag_factor: 0.05,
            ..base
        }
    }

    /// Set gravitational acceleration.
    pub fn with_gravity(mut self, g: f32) -> Self {
        self.g = g;
        self
    }

    /// Set the time step.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Set the cell spacing.
    pub fn with_dxdy(mut self, dxdy: f32) -> Self {
        self.dxdy = dxdy;
        self
    }

    /// Set the dry-cell depth threshold.
    pub fn with_eps(mut self, eps: f32) -> Self {
        self.eps = eps;
        self
    }

    /// Set shore drag: `factor` applies where depth is below `threshold`.
    pub fn with_shore_drag(mut self, factor: f32, threshold: f32) -> Self {
        self.drag_factor = factor;
        self.drag_shore_height_threshold = threshold;
        self
    }

    /// Enable the donor-height limiter with factor `b`.
    pub fn with_height_limiter(mut self, b: f32) -> Self {
        self.height_limiter = Some(b);
        self
    }

    /// Maximum velocity magnitude per component: half a cell per step.
    #[inline]
    pub fn max_velocity(&self) -> f32 {
        0.5 * self.dxdy / self.dt
    }

    /// Shore drag coefficient for a cell of depth `h`.
    #[inline]
    pub fn drag_at(&self, h: f32) -> f32 {
        if h < self.drag_shore_height_threshold {
            self.drag_factor
        } else {
            0.0
        }
    }

    /// Largest mean donor height allowed by the limiter, if enabled.
    #[inline]
    pub fn max_mean_donor_height(&self) -> Option<f32> {
        self.height_limiter
            .map(|b| b * self.dxdy / (self.g * self.dt))
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SweError::invalid_config(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if !(self.dxdy.is_finite() && self.dxdy > 0.0) {
            return Err(SweError::invalid_config(format!(
                "dxdy must be positive and finite, got {}",
                self.dxdy
            )));
        }
        for (name, value) in [
            ("g", self.g),
            ("eps", self.eps),
            ("drag_shore_height_threshold", self.drag_shore_height_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SweError::invalid_config(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.drag_factor) {
            return Err(SweError::invalid_config(format!(
                "drag_factor must lie in [0, 1], got {}",
                self.drag_factor
            )));
        }
        if let Some(b) = self.height_limiter {
            if !(b.is_finite() && b > 0.0) {
                return Err(SweError::invalid_config(format!(
                    "height limiter factor must be positive and finite, got {}",
                    b
                )));
            }
            if self.g == 0.0 {
                return Err(SweError::invalid_config(
                    "height limiter requires non-zero gravity",
                ));
            }
        }
        Ok(())
    }
}

impl Default for SweConfig {
    fn default() -> Self {
        Self {
            g: Self::G,
            dt: Self::DT,
            dxdy: Self::DXDY,
            eps: 0.001,
            drag_factor: 0.0,
            drag_shore_height_threshold: 0.1,
            height_limiter: None,
        }
    }
}
