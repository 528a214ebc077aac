mod particle;
mod random_walk;

pub use particle::{Move, Particle};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::exec::ExecMode;
use crate::maze::{Cell, Grid};

/// Releases a swarm of random-walking particles from a shared spawn cell
/// and races them to the exit, then walks the rest of the swarm onto the
/// winning route. Returns the grid with the discovered route stamped as
/// [`Cell::Solution`] and the spawn cell as [`Cell::Start`].
pub fn solve(
    mut grid: Grid,
    n_particles: usize,
    rng: &mut StdRng,
    mode: ExecMode,
    show_steps: bool,
) -> Grid {
    tracing::info!(n_particles, %mode, "solving the maze");
    let size = grid.size();

    // Spawn somewhere in the middle two thirds of the maze, on a walkable
    // cell.
    let lo = size / 6;
    let hi = 5 * size / 6;
    let mut spawn = (rng.random_range(lo..=hi), rng.random_range(lo..=hi));
    while grid[spawn] != Cell::Empty {
        spawn = (rng.random_range(lo..=hi), rng.random_range(lo..=hi));
    }

    // Each particle walks on its own random stream, drawn here from the
    // solution stream, so trajectories are identical no matter how the
    // per-step loops are scheduled.
    let mut swarm: Vec<Particle> = (0..n_particles)
        .map(|_| Particle::spawn(spawn, StdRng::seed_from_u64(rng.random())))
        .collect();

    if show_steps {
        random_walk::render_spawn(&grid, spawn);
    }

    let winner = random_walk::race(&grid, &mut swarm, spawn, mode, show_steps);
    let winner_path = std::mem::take(&mut swarm[winner].path);
    tracing::info!(winner, route_len = winner_path.len(), "exit reached");

    // Stamp the winning trail before the rest of the swarm reconciles; the
    // grid is read-only from here on.
    for &coord in &winner_path {
        grid[coord] = Cell::Solution;
    }
    grid[spawn] = Cell::Start;
    if show_steps {
        crate::maze::render(&grid).ok();
    }

    random_walk::reconcile(&grid, &mut swarm, winner, &winner_path, spawn, mode, show_steps);
    tracing::info!("all particles have reached the exit");

    grid
}
