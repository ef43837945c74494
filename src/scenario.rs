//! Initial conditions for common test setups.
//!
//! The free functions write terrain or water into the current fields of a
//! [`SimulationState`]; [`Scenario`] bundles them into named setups.

use crate::solver::SimulationState;

/// Terrain height of the barrier walls in [`Scenario::BowlDamBreak`].
pub const WALL_HEIGHT: f32 = 2.0;

/// Shape the terrain as a bowl: zero at the domain centre, rising linearly
/// to one at distance `N/2 - 1` cells and beyond.
///
/// The centre is at integer cell coordinates `(N/2, N/2)`; distances are
/// measured to cell centres.
pub fn bowl_terrain<const N: usize>(state: &mut SimulationState<N>) {
    let center = (N / 2) as f32;
    let radius = (N as f32 * 0.5 - 1.0).max(1.0);
    for (y, row) in state.ground_mut().rows_mut().enumerate() {
        let dy = center - (y as f32 + 0.5);
        for (x, ground) in row.iter_mut().enumerate() {
            let dx = center - (x as f32 + 0.5);
            *ground = (dx * dx + dy * dy).sqrt() / radius;
        }
    }
}

/// Fill columns `x < x_end` with water up to surface `level`.
///
/// Cells whose terrain is above `level` stay dry.
pub fn fill_basin<const N: usize>(state: &mut SimulationState<N>, x_end: usize, level: f32) {
    let x_end = x_end.min(N);
    for y in 0..N {
        for x in 0..x_end {
            let depth = (level - state.ground().at(x, y)).max(0.0);
            state.set_height(x, y, depth);
        }
    }
}

/// Raise two walls of terrain `height` across the domain.
///
/// - Column `N/2`, split into 11 bands along y, open in every third band.
/// - Column `3N/4`, split into 5 bands along y, open in the middle band.
///
/// Open cells keep their terrain.
pub fn barrier_walls<const N: usize>(state: &mut SimulationState<N>, height: f32) {
    let band_11 = N as f32 / 11.0;
    let band_5 = N as f32 / 5.0;
    let first = N / 2;
    let second = N * 3 / 4;

    for y in 0..N {
        let index_11 = (y as f32 / band_11) as usize;
        if (index_11 + 1) % 3 != 0 {
            state.set_ground(first, y, height);
        }
        let index_5 = (y as f32 / band_5) as usize;
        if index_5 != 2 {
            state.set_ground(second, y, height);
        }
    }
}

/// Named initial conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scenario {
    /// Flat dry terrain with a single column of water.
    Droplet { x: usize, y: usize, height: f32 },
    /// Bowl terrain, the left part filled to level one, behind two walls
    /// with gaps.
    BowlDamBreak,
}

impl Scenario {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Droplet { .. } => "droplet",
            Self::BowlDamBreak => "bowl dam break",
        }
    }

    /// Write this scenario into the current fields of `state`.
    ///
    /// Terrain, water and velocities are reset first.
    ///
    /// # Panics
    ///
    /// `Droplet` panics if its cell is outside the grid.
    pub fn apply<const N: usize>(&self, state: &mut SimulationState<N>) {
        state.ground_mut().fill(0.0);
        state.heights_mut().fill(0.0);
        state.clear_velocities();

        match *self {
            Self::Droplet { x, y, height } => state.set_height(x, y, height),
            Self::BowlDamBreak => {
                bowl_terrain(state);
                fill_basin(state, (N / 2).saturating_sub(1), 1.0);
                barrier_walls(state, WALL_HEIGHT);
            }
        }

        log::debug!(
            "Applied {} scenario to {}x{} grid: total water {:.4}",
            self.name(),
            N,
            N,
            state.heights().sum()
        );
    }
}
