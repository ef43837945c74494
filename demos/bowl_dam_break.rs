//! Headless bowl dam break.
//!
//! Fills the left part of a bowl with water behind two perforated walls,
//! injects a column of water every half second and logs water content,
//! flow activity and step timing.
//!
//! ```bash
//! RUST_LOG=info cargo run --release --example bowl_dam_break
//!
//! # Row-parallel stages (rayon)
//! RUST_LOG=info cargo run --release --features parallel --example bowl_dam_break
//! ```

use std::time::Instant;

use swe_grid::{
    DiagnosticsTracker, GridDiagnostics, Scenario, SimulationState, StabilityMonitor,
    StabilityThresholds, SweConfig, SweError,
};

const GRID_SIZE: usize = 80;
const FRAMES: usize = 1200;
const INJECT_EVERY: usize = 30;
const INJECT_DEPTH: f32 = 1.1;

fn step(sim: &mut SimulationState<GRID_SIZE>) -> Result<(), SweError> {
    #[cfg(feature = "parallel")]
    {
        sim.step_parallel()
    }
    #[cfg(not(feature = "parallel"))]
    {
        sim.step()
    }
}

fn main() -> Result<(), SweError> {
    env_logger::init();

    let mut sim = SimulationState::<GRID_SIZE>::new(SweConfig::default())?;
    Scenario::BowlDamBreak.apply(&mut sim);

    let mut tracker = DiagnosticsTracker::new(GridDiagnostics::compute(&sim));
    let mut monitor = StabilityMonitor::new(StabilityThresholds::default());
    let mut step_ms_total = 0.0_f64;

    log::info!(
        "Bowl dam break on {}x{} grid, {} frames, max_vel = {:.2}",
        GRID_SIZE,
        GRID_SIZE,
        FRAMES,
        sim.config().max_velocity()
    );

    for frame in 1..=FRAMES {
        // Sweep the injection point across the empty right half
        if frame % INJECT_EVERY == 0 {
            let k = (frame / INJECT_EVERY) as isize;
            let x = GRID_SIZE as isize / 2 + 4 + (k * 7) % (GRID_SIZE as isize / 2);
            let y = 8 + (k * 13) % (GRID_SIZE as isize - 8);
            if !sim.inject_water(x, y, INJECT_DEPTH) {
                log::debug!("Skipped injection on border cell ({}, {})", x, y);
            }
        }

        let start = Instant::now();
        step(&mut sim)?;
        let step_ms = start.elapsed().as_secs_f64() * 1000.0;
        step_ms_total += step_ms;

        let status = monitor.check(&sim);
        if !status.is_stable && monitor.should_stop() {
            for suggestion in monitor.suggest_remediation() {
                log::error!("  * {}", suggestion);
            }
            break;
        }

        if frame % 60 == 0 {
            let diag = GridDiagnostics::compute(&sim);
            log::info!(
                "frame {:5}  water {:10.3}  velocity {:10.3}  step {:.3} ms",
                frame,
                diag.total_water,
                diag.total_velocity,
                step_ms
            );
            tracker.update(sim.time(), diag);
        }
    }

    tracker.log_summary();
    log::info!(
        "Mean step time: {:.3} ms over {} steps",
        step_ms_total / sim.steps().max(1) as f64,
        sim.steps()
    );
    Ok(())
}
