//! Run-time analysis of simulation health.
//!
//! - [`StabilityMonitor`]: Threshold checks on depth and velocity with stop recommendations

mod stability;

pub use stability::{StabilityMonitor, StabilityStatus, StabilityThresholds, StabilityWarning};
