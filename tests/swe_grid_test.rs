//! Integration tests for the height-field shallow water integrator.
//!
//! These tests verify:
//! - Droplet spreading on a small grid (hand-checked values)
//! - Non-negative depths and bounded velocities over long runs
//! - Water conservation while no cell runs dry
//! - Dry-face handling and closed outer faces
//! - Determinism and error reporting

use swe_grid::{Grid, Scenario, SimulationState, SweConfig, SweError, total_water};

const TOL: f32 = 1e-5;

fn droplet<const N: usize>(x: usize, y: usize, height: f32) -> SimulationState<N> {
    let mut sim = SimulationState::<N>::new(SweConfig::default()).unwrap();
    Scenario::Droplet { x, y, height }.apply(&mut sim);
    sim
}

/// Lake of depth one with a raised column in the middle.
fn bumped_lake<const N: usize>() -> SimulationState<N> {
    let mut sim = SimulationState::<N>::new(SweConfig::default()).unwrap();
    sim.heights_mut().fill(1.0);
    sim.set_height(N / 2, N / 2, 1.2);
    sim
}

fn assert_physical<const N: usize>(sim: &SimulationState<N>) {
    let max_vel = sim.config().max_velocity();
    for (x, y, h) in sim.heights().iter_cells() {
        assert!(h >= 0.0 && h.is_finite(), "bad depth {h} at ({x}, {y})");
    }
    assert!(sim.velocities_u().max_abs() <= max_vel + TOL);
    assert!(sim.velocities_v().max_abs() <= max_vel + TOL);
}

/// One step of a unit droplet at (1, 1) on a 4x4 grid.
///
/// The four faces around the droplet get |vel| = g*dt/dxdy = 0.40858; the
/// droplet loses 4 * dt * 0.40858 / 0.4 of depth, split evenly over its
/// four neighbours.
#[test]
fn test_droplet_single_step() {
    let mut sim = droplet::<4>(1, 1, 1.0);
    sim.step().unwrap();

    let vel = 9.81 * 0.01666 / 0.4;
    assert!((sim.velocity_u(1, 1) - vel).abs() < TOL);
    assert!((sim.velocity_u(0, 1) + vel).abs() < TOL);
    assert!((sim.velocity_v(1, 1) - vel).abs() < TOL);
    assert!((sim.velocity_v(1, 0) + vel).abs() < TOL);

    let outflow = 0.01666 * vel / 0.4;
    assert!((sim.height(1, 1) - (1.0 - 4.0 * outflow)).abs() < TOL);
    for (x, y) in [(0, 1), (2, 1), (1, 0), (1, 2)] {
        assert!(
            (sim.height(x, y) - outflow).abs() < TOL,
            "neighbour ({x}, {y}) has {}",
            sim.height(x, y)
        );
    }
    assert_eq!(sim.height(3, 3), 0.0);
    assert_eq!(sim.height(2, 2), 0.0);

    let div = sim.divergence(1, 1);
    assert!((div - 4.0 * vel / 0.4).abs() < 1e-4);
    assert!((sim.heights().sum() - 1.0).abs() < TOL);
}

#[test]
fn test_depths_stay_non_negative_and_velocities_bounded() {
    let mut sim = SimulationState::<32>::new(SweConfig::default()).unwrap();
    Scenario::BowlDamBreak.apply(&mut sim);
    for _ in 0..300 {
        sim.step().unwrap();
        assert_physical(&sim);
    }
}

#[test]
fn test_shore_damped_preset_stays_physical() {
    let mut sim = SimulationState::<24>::new(SweConfig::shore_damped()).unwrap();
    Scenario::BowlDamBreak.apply(&mut sim);
    for _ in 0..200 {
        sim.step().unwrap();
    }
    assert_physical(&sim);
}

#[test]
fn test_water_conserved_while_wet() {
    let mut sim = bumped_lake::<16>();
    let initial = total_water(&sim);
    for _ in 0..100 {
        sim.step().unwrap();
    }
    assert!(sim.heights().min_max().0 > 0.0, "lake should stay wet");
    let rel = (total_water(&sim) - initial).abs() / initial;
    assert!(rel < 1e-4, "relative water change {rel}");
}

#[test]
fn test_dry_terrain_stays_still() {
    let mut sim = SimulationState::<8>::new(SweConfig::default()).unwrap();
    for y in 2..6 {
        for x in 2..6 {
            sim.set_ground(x, y, 1.0);
        }
    }
    sim.step_n(3).unwrap();
    assert_eq!(sim.velocities_u().max_abs(), 0.0);
    assert_eq!(sim.velocities_v().max_abs(), 0.0);
    assert_eq!(sim.heights().max_abs(), 0.0);
}

#[test]
fn test_water_does_not_climb_dry_ledge() {
    // Shallow pool next to a dry plateau higher than its surface
    let mut sim = SimulationState::<6>::new(SweConfig::default()).unwrap();
    for y in 0..6 {
        for x in 3..6 {
            sim.set_ground(x, y, 1.0);
        }
        for x in 0..3 {
            sim.set_height(x, y, 0.5);
        }
    }
    sim.step_n(10).unwrap();
    for y in 0..6 {
        assert_eq!(sim.velocity_u(2, y as isize), 0.0);
        for x in 3..6 {
            assert_eq!(sim.height(x, y), 0.0);
        }
    }
}

#[test]
fn test_outer_faces_stay_closed() {
    const N: usize = 8;
    let mut sim = droplet::<N>(6, 6, 1.0);
    sim.step_n(20).unwrap();
    let last = N as isize - 1;
    for i in 0..N as isize {
        assert_eq!(sim.velocity_u(last, i), 0.0, "u at column {last}, row {i}");
        assert_eq!(sim.velocity_v(i, last), 0.0, "v at row {last}, column {i}");
        assert_eq!(sim.velocity_u(i, last), 0.0, "u on row {last}");
        assert_eq!(sim.velocity_v(last, i), 0.0, "v on column {last}");
    }
}

#[test]
fn test_stepping_is_deterministic() {
    let mut a = SimulationState::<20>::new(SweConfig::default()).unwrap();
    Scenario::BowlDamBreak.apply(&mut a);
    let mut b = a.clone();

    a.step_n(50).unwrap();
    b.step_n(50).unwrap();
    assert_eq!(a.heights(), b.heights());
    assert_eq!(a.velocities_u(), b.velocities_u());
    assert_eq!(a.velocities_v(), b.velocities_v());
}

#[test]
fn test_height_limiter_holds_back_deep_column() {
    let mut plain = droplet::<8>(4, 4, 10.0);
    let config = SweConfig::default().with_height_limiter(2.0);
    let mut limited = SimulationState::<8>::new(config).unwrap();
    Scenario::Droplet {
        x: 4,
        y: 4,
        height: 10.0,
    }
    .apply(&mut limited);

    plain.step().unwrap();
    limited.step().unwrap();
    assert!(limited.height(4, 4) > plain.height(4, 4));
    assert_physical(&limited);
}

#[test]
fn test_clamped_reads_match_strict_reads() {
    let mut g = Grid::<5>::zeros();
    for (i, value) in (0..25).map(|i| i as f32).enumerate() {
        g.set(i % 5, i / 5, value);
    }
    for y in -3..8_isize {
        for x in -3..8_isize {
            let expected = g.at(x.clamp(0, 4) as usize, y.clamp(0, 4) as usize);
            assert_eq!(g.at_clamped(x, y), expected);
        }
    }
}

#[test]
fn test_out_of_bounds_access() {
    let mut g = Grid::<4>::zeros();
    assert_eq!(
        g.try_at(4, 0),
        Err(SweError::OutOfBounds { x: 4, y: 0, size: 4 })
    );
    assert!(g.try_set(0, 9, 1.0).is_err());
    assert_eq!(g.at_or(-1, 0, 2.5), 2.5);
}

#[test]
#[should_panic(expected = "outside")]
fn test_strict_read_panics_outside() {
    let sim = SimulationState::<4>::new(SweConfig::default()).unwrap();
    let _ = sim.height(4, 0);
}

#[test]
fn test_non_finite_height_aborts_step() {
    let mut sim = droplet::<6>(2, 2, 1.0);
    sim.step().unwrap();
    let before = sim.heights().clone();
    sim.set_height(3, 3, f32::NAN);

    let err = sim.step().unwrap_err();
    assert!(matches!(err, SweError::NonFiniteHeight { .. }), "{err}");
    assert_eq!(sim.steps(), 1);
    assert_eq!(sim.height(2, 2), before.at(2, 2));
}

#[test]
fn test_invalid_configs_rejected() {
    for config in [
        SweConfig::default().with_dt(-1.0),
        SweConfig::default().with_dxdy(f32::NAN),
        SweConfig::default().with_shore_drag(1.5, 0.1),
        SweConfig::default().with_height_limiter(0.0),
    ] {
        let err = SimulationState::<4>::new(config).unwrap_err();
        assert!(matches!(err, SweError::InvalidConfig(_)));
    }
}
