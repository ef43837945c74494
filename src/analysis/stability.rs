//! Stability monitoring for height-field simulations.
//!
//! A step already refuses to produce non-finite depths, but a run can still
//! drift into nonsense (depth piling up behind a wall, velocities pinned at
//! the clamp). The monitor scans the current fields after a step and
//! recommends stopping once problems persist.
//!
//! # Example
//!
//! ```
//! use swe_grid::analysis::{StabilityMonitor, StabilityThresholds};
//! use swe_grid::{SimulationState, SweConfig};
//!
//! let mut sim = SimulationState::<8>::new(SweConfig::default()).unwrap();
//! sim.set_height(3, 3, 1.0);
//! let mut monitor = StabilityMonitor::new(StabilityThresholds::default());
//!
//! for _ in 0..10 {
//!     sim.step().unwrap();
//!     let status = monitor.check(&sim);
//!     if !status.is_stable && monitor.should_stop() {
//!         break;
//!     }
//! }
//! assert_eq!(monitor.total_checks(), 10);
//! ```

use crate::solver::SimulationState;

/// Thresholds for stability monitoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityThresholds {
    /// Maximum allowed water depth.
    pub max_depth: f32,
    /// Maximum allowed |u| or |v| on any face.
    pub max_velocity: f32,
    /// Maximum consecutive unstable checks before recommending stop.
    pub max_consecutive_warnings: usize,
}

impl Default for StabilityThresholds {
    /// Catches runaway depths; velocity limit sits above the default clamp.
    fn default() -> Self {
        Self {
            max_depth: 100.0,
            max_velocity: 50.0,
            max_consecutive_warnings: 10,
        }
    }
}

impl StabilityThresholds {
    /// Strict thresholds for detecting issues early.
    ///
    /// - max_depth: 10
    /// - max_velocity: 10
    /// - max_consecutive_warnings: 3
    pub fn strict() -> Self {
        Self {
            max_depth: 10.0,
            max_velocity: 10.0,
            max_consecutive_warnings: 3,
        }
    }

    /// Relaxed thresholds for exploratory runs.
    ///
    /// Only catches catastrophic blow-up.
    pub fn relaxed() -> Self {
        Self {
            max_depth: 1.0e4,
            max_velocity: 1.0e3,
            max_consecutive_warnings: 100,
        }
    }

    /// Set maximum depth threshold.
    pub fn with_max_depth(mut self, max_depth: f32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set maximum velocity threshold.
    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Set how many consecutive unstable checks are tolerated.
    pub fn with_max_consecutive_warnings(mut self, n: usize) -> Self {
        self.max_consecutive_warnings = n;
        self
    }
}

/// Types of stability warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum StabilityWarning {
    /// Depth or velocity at a cell is NaN or infinite.
    NonFiniteValue { x: usize, y: usize },
    /// Water depth below zero.
    NegativeDepth { x: usize, y: usize, value: f32 },
    /// Water depth exceeds maximum threshold.
    DepthExceedsMax {
        x: usize,
        y: usize,
        value: f32,
        threshold: f32,
    },
    /// A velocity component exceeds the threshold.
    VelocityExceedsMax {
        x: usize,
        y: usize,
        value: f32,
        threshold: f32,
    },
    /// Solution has blown up catastrophically.
    SolutionBlowUp,
}

impl std::fmt::Display for StabilityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteValue { x, y } => write!(f, "Non-finite value at cell ({}, {})", x, y),
            Self::NegativeDepth { x, y, value } => {
                write!(f, "Negative depth: h={:.6} at cell ({}, {})", value, x, y)
            }
            Self::DepthExceedsMax {
                x,
                y,
                value,
                threshold,
            } => write!(
                f,
                "Depth exceeds max: h={:.3} > {:.3} at cell ({}, {})",
                value, threshold, x, y
            ),
            Self::VelocityExceedsMax {
                x,
                y,
                value,
                threshold,
            } => write!(
                f,
                "Velocity exceeds max: |u|={:.3} > {:.3} at face ({}, {})",
                value, threshold, x, y
            ),
            Self::SolutionBlowUp => write!(f, "SOLUTION BLOW-UP DETECTED"),
        }
    }
}

/// Result of one stability check.
#[derive(Debug, Clone)]
pub struct StabilityStatus {
    /// Finite water depth range (min, max).
    pub h_range: (f32, f32),
    /// Largest finite |u| or |v|.
    pub max_velocity: f32,
    /// Whether the check produced no warnings.
    pub is_stable: bool,
    /// Warnings detected, in row-major cell order.
    pub warnings: Vec<StabilityWarning>,
}

impl StabilityStatus {
    /// Check if any warnings were generated.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if any critical warnings (blow-up, non-finite) were detected.
    pub fn has_critical_warnings(&self) -> bool {
        self.warnings.iter().any(|w| {
            matches!(
                w,
                StabilityWarning::SolutionBlowUp | StabilityWarning::NonFiniteValue { .. }
            )
        })
    }
}

/// Monitor for tracking solution stability across checks.
#[derive(Debug, Clone)]
pub struct StabilityMonitor {
    thresholds: StabilityThresholds,
    consecutive_warnings: usize,
    total_checks: usize,
    total_warnings: usize,
    last_status: Option<StabilityStatus>,
}

impl StabilityMonitor {
    /// Create a new stability monitor with the given thresholds.
    pub fn new(thresholds: StabilityThresholds) -> Self {
        Self {
            thresholds,
            consecutive_warnings: 0,
            total_checks: 0,
            total_warnings: 0,
            last_status: None,
        }
    }

    /// Get the thresholds being used.
    pub fn thresholds(&self) -> &StabilityThresholds {
        &self.thresholds
    }

    /// Get the number of consecutive unstable checks.
    pub fn consecutive_warnings(&self) -> usize {
        self.consecutive_warnings
    }

    /// Get the total number of checks performed.
    pub fn total_checks(&self) -> usize {
        self.total_checks
    }

    /// Get the total number of warnings generated.
    pub fn total_warnings(&self) -> usize {
        self.total_warnings
    }

    /// Get the last stability status.
    pub fn last_status(&self) -> Option<&StabilityStatus> {
        self.last_status.as_ref()
    }

    /// Scan the current fields of `state` for stability issues.
    pub fn check<const N: usize>(&mut self, state: &SimulationState<N>) -> StabilityStatus {
        self.total_checks += 1;

        let heights = state.heights();
        let u = state.velocities_u();
        let v = state.velocities_v();

        let mut warnings = Vec::new();
        let mut min_h = f32::INFINITY;
        let mut max_h = f32::NEG_INFINITY;
        let mut max_vel = 0.0_f32;
        let mut found_blow_up = false;

        for (x, y, h) in heights.iter_cells() {
            let uf = u.at(x, y);
            let vf = v.at(x, y);
            if !h.is_finite() || !uf.is_finite() || !vf.is_finite() {
                warnings.push(StabilityWarning::NonFiniteValue { x, y });
                found_blow_up = true;
                continue;
            }

            min_h = min_h.min(h);
            max_h = max_h.max(h);

            if h < 0.0 {
                warnings.push(StabilityWarning::NegativeDepth { x, y, value: h });
            } else if h > self.thresholds.max_depth {
                warnings.push(StabilityWarning::DepthExceedsMax {
                    x,
                    y,
                    value: h,
                    threshold: self.thresholds.max_depth,
                });
            }

            let vel = uf.abs().max(vf.abs());
            max_vel = max_vel.max(vel);
            if vel > self.thresholds.max_velocity {
                warnings.push(StabilityWarning::VelocityExceedsMax {
                    x,
                    y,
                    value: vel,
                    threshold: self.thresholds.max_velocity,
                });
            }
        }

        if found_blow_up || max_h > 1e6 || max_vel > 1e6 {
            warnings.push(StabilityWarning::SolutionBlowUp);
        }

        let is_stable = warnings.is_empty();
        if is_stable {
            self.consecutive_warnings = 0;
        } else {
            self.consecutive_warnings += 1;
            self.total_warnings += warnings.len();
            log::warn!(
                "Stability check failed at step {}: {} warning(s), first: {}",
                state.steps(),
                warnings.len(),
                warnings[0]
            );
        }

        let status = StabilityStatus {
            h_range: (min_h, max_h),
            max_velocity: max_vel,
            is_stable,
            warnings,
        };
        self.last_status = Some(status.clone());
        status
    }

    /// Check if the simulation should be stopped based on warning history.
    pub fn should_stop(&self) -> bool {
        if self.consecutive_warnings >= self.thresholds.max_consecutive_warnings {
            return true;
        }
        self.last_status
            .as_ref()
            .is_some_and(StabilityStatus::has_critical_warnings)
    }

    /// Suggested remediation for the warnings of the last check.
    pub fn suggest_remediation(&self) -> Vec<String> {
        let mut suggestions = Vec::new();

        if let Some(status) = &self.last_status {
            for warning in &status.warnings {
                let hint = match warning {
                    StabilityWarning::DepthExceedsMax { .. } => {
                        "Depth exceeds threshold: enable the height limiter (SweConfig::with_height_limiter)"
                    }
                    StabilityWarning::VelocityExceedsMax { .. } => {
                        "Velocity exceeds threshold: reduce dt or increase dxdy"
                    }
                    StabilityWarning::NegativeDepth { .. } => {
                        "Negative depth: initial water field was written with negative values"
                    }
                    StabilityWarning::NonFiniteValue { .. } | StabilityWarning::SolutionBlowUp => {
                        "Solution blow-up: check initial fields for NaN and reduce dt"
                    }
                };
                suggestions.push(hint.to_string());
            }
        }

        suggestions.sort();
        suggestions.dedup();
        suggestions
    }
}
