//! Simulation runner implementation.
//!
//! Provides a high-level interface for running a height-field simulation
//! forward in time with callbacks and stability monitoring.

use crate::analysis::{StabilityMonitor, StabilityThresholds};
use crate::solver::{Serial, SimulationState, StageExecutor};

// =============================================================================
// Simulation Configuration
// =============================================================================

/// Configuration for a simulation run.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfig {
    /// Number of steps between callbacks (every step if not set).
    pub callback_interval: Option<u64>,
    /// Maximum number of time steps.
    pub max_steps: Option<u64>,
    /// Stability thresholds checked after every step, if set.
    pub stability: Option<StabilityThresholds>,
    /// Whether to log progress at info level.
    pub verbose: bool,
}

// =============================================================================
// Simulation Result
// =============================================================================

/// Result of a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Final simulation time reached.
    pub final_time: f64,
    /// Number of time steps taken by this run.
    pub n_steps: u64,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
    /// Mean wall-clock time per step in milliseconds.
    pub mean_step_ms: f64,
    /// Whether the simulation completed successfully.
    pub success: bool,
    /// Error message if simulation failed.
    pub error: Option<String>,
}

impl SimulationResult {
    /// Create a successful result.
    pub fn success(final_time: f64, n_steps: u64, wall_time: f64) -> Self {
        Self {
            final_time,
            n_steps,
            wall_time,
            mean_step_ms: mean_step_ms(wall_time, n_steps),
            success: true,
            error: None,
        }
    }

    /// Create a failed result.
    pub fn failure(final_time: f64, n_steps: u64, wall_time: f64, error: String) -> Self {
        Self {
            final_time,
            n_steps,
            wall_time,
            mean_step_ms: mean_step_ms(wall_time, n_steps),
            success: false,
            error: Some(error),
        }
    }
}

fn mean_step_ms(wall_time: f64, n_steps: u64) -> f64 {
    if n_steps == 0 {
        0.0
    } else {
        wall_time * 1000.0 / n_steps as f64
    }
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// High-level simulation runner.
///
/// Steps a [`SimulationState`] with fixed `dt` until a target time, calling
/// back at a configurable interval and optionally stopping when the
/// stability monitor recommends it.
///
/// # Example
///
/// ```
/// use swe_grid::simulation::Simulation;
/// use swe_grid::{SimulationState, SweConfig};
///
/// let mut state = SimulationState::<16>::new(SweConfig::default()).unwrap();
/// state.set_height(8, 8, 1.0);
///
/// let result = Simulation::new().with_max_steps(1000).run(&mut state, 0.5);
/// assert!(result.success);
/// assert_eq!(result.n_steps, 31);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Simulation<E: StageExecutor = Serial> {
    executor: E,
    config: SimulationConfig,
}

impl Simulation<Serial> {
    /// Create a runner that steps on the calling thread.
    pub fn new() -> Self {
        Self::with_executor(Serial)
    }
}

impl<E: StageExecutor> Simulation<E> {
    /// Create a runner that schedules stages with `executor`.
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor,
            config: SimulationConfig::default(),
        }
    }

    /// Set the callback interval in steps.
    pub fn with_callback_interval(mut self, steps: u64) -> Self {
        self.config.callback_interval = Some(steps.max(1));
        self
    }

    /// Set the maximum number of steps.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.config.max_steps = Some(max_steps);
        self
    }

    /// Check stability after every step and stop when the monitor says so.
    pub fn with_stability_monitor(mut self, thresholds: StabilityThresholds) -> Self {
        self.config.stability = Some(thresholds);
        self
    }

    /// Enable progress logging.
    pub fn verbose(mut self) -> Self {
        self.config.verbose = true;
        self
    }

    /// Get the run configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Get the stage executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run the simulation until `state.time()` reaches `t_end`.
    pub fn run<const N: usize>(
        &self,
        state: &mut SimulationState<N>,
        t_end: f64,
    ) -> SimulationResult {
        self.run_with_callback(state, t_end, |_, _| {})
    }

    /// Run the simulation with a callback function.
    ///
    /// The callback receives the state and its simulated time once before
    /// the first step and then at the configured interval (every step if not
    /// set).
    pub fn run_with_callback<const N: usize, F>(
        &self,
        state: &mut SimulationState<N>,
        t_end: f64,
        mut callback: F,
    ) -> SimulationResult
    where
        F: FnMut(&SimulationState<N>, f64),
    {
        let start_wall = std::time::Instant::now();
        let interval = self.config.callback_interval.unwrap_or(1);
        let mut monitor = self.config.stability.map(StabilityMonitor::new);
        let mut n_steps: u64 = 0;

        callback(state, state.time());

        if self.config.verbose {
            log::info!(
                "Starting {}x{} simulation with {} executor: t = {:.4} -> {:.4}",
                N,
                N,
                self.executor.name(),
                state.time(),
                t_end
            );
        }

        while state.time() < t_end {
            if let Some(max_steps) = self.config.max_steps
                && n_steps >= max_steps
            {
                return SimulationResult::failure(
                    state.time(),
                    n_steps,
                    start_wall.elapsed().as_secs_f64(),
                    format!("Maximum step limit ({}) reached", max_steps),
                );
            }

            if let Err(err) = state.step_with(&self.executor) {
                return SimulationResult::failure(
                    state.time(),
                    n_steps,
                    start_wall.elapsed().as_secs_f64(),
                    err.to_string(),
                );
            }
            n_steps += 1;

            if n_steps % interval == 0 {
                callback(state, state.time());
            }

            if let Some(monitor) = monitor.as_mut() {
                let status = monitor.check(state);
                if !status.is_stable && monitor.should_stop() {
                    let reasons = monitor.suggest_remediation().join("; ");
                    return SimulationResult::failure(
                        state.time(),
                        n_steps,
                        start_wall.elapsed().as_secs_f64(),
                        format!("Stopped by stability monitor: {}", reasons),
                    );
                }
            }

            if self.config.verbose && n_steps % 100 == 0 {
                log::info!("  Step {}: t = {:.4}", n_steps, state.time());
            }
        }

        let wall_time = start_wall.elapsed().as_secs_f64();
        let result = SimulationResult::success(state.time(), n_steps, wall_time);

        if self.config.verbose {
            log::info!(
                "Simulation complete: {} steps, {:.3}s wall, {:.3} ms/step",
                n_steps,
                wall_time,
                result.mean_step_ms
            );
        }

        result
    }
}
