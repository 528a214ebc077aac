use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;
use rayon::prelude::*;

use super::particle::{Move, Particle};
use crate::exec::ExecMode;
use crate::maze::{Cell, Grid};

/// Slot value meaning "no particle has claimed the exit yet".
const NO_WINNER: usize = usize::MAX;

/// Drives the swarm through synchronized random-walk steps until one
/// particle lands on the exit. Returns the winning particle's index.
///
/// A step is a barrier: every particle completes its move for step `k`
/// before any particle starts step `k + 1`, and all in-flight moves of the
/// winning step still apply. The winner slot is an atomic `fetch_min`, so
/// exactly one claim is ever committed and, when several particles reach
/// the exit in the same step, the lowest index wins no matter how the loop
/// was scheduled.
pub(super) fn race(
    grid: &Grid,
    swarm: &mut [Particle],
    spawn: (usize, usize),
    mode: ExecMode,
    show_steps: bool,
) -> usize {
    let winner = AtomicUsize::new(NO_WINNER);

    loop {
        let step = |(index, particle): (usize, &mut Particle)| {
            let moves = possible_moves(grid, particle.position);
            walk(particle, &moves);
            if grid[particle.position] == Cell::Exit {
                winner.fetch_min(index, Ordering::Relaxed);
            }
        };
        if mode.fan_out(swarm.len()) {
            swarm.par_iter_mut().enumerate().for_each(step);
        } else {
            swarm.iter_mut().enumerate().for_each(step);
        }

        if show_steps {
            render_snapshot(grid, swarm, spawn);
        }

        let claimed = winner.load(Ordering::Relaxed);
        if claimed != NO_WINNER {
            return claimed;
        }
    }
}

/// Picks and applies one random-walk move.
///
/// With exactly two options and one of them equal to the previous move,
/// the particle keeps going straight instead of thrashing back and forth
/// in a corridor; otherwise it draws uniformly among the legal moves.
fn walk(particle: &mut Particle, moves: &[Move]) {
    if moves.is_empty() {
        panic!(
            "corrupt maze: no legal move at {:?}, every walkable cell must stay connected",
            particle.position
        );
    }
    if moves.len() == 2 {
        if let Some(last) = particle.last_move {
            if moves.contains(&last) {
                particle.update_position(last, false);
                return;
            }
        }
    }
    let new_move = moves[particle.rng.random_range(0..moves.len())];
    particle.update_position(new_move, false);
}

/// Legal moves out of `position`: any cardinal step whose target is inside
/// the grid and not a wall.
pub(super) fn possible_moves(grid: &Grid, position: (usize, usize)) -> Vec<Move> {
    let size = grid.size();
    let (row, col) = position;
    let mut moves = Vec::with_capacity(4);
    if row > 0 && grid[(row - 1, col)] != Cell::Wall {
        moves.push(Move::North);
    }
    if row + 1 < size && grid[(row + 1, col)] != Cell::Wall {
        moves.push(Move::South);
    }
    if col > 0 && grid[(row, col - 1)] != Cell::Wall {
        moves.push(Move::West);
    }
    if col + 1 < size && grid[(row, col + 1)] != Cell::Wall {
        moves.push(Move::East);
    }
    moves
}

/// Reconciliation state of a particle after the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    /// Still retracing its own trail, not yet on the winning route.
    Wandering,
    /// Following the winning route toward the exit.
    OnTrack,
    /// Standing on the exit; nothing left to do.
    Exited,
}

/// Walks every non-winning particle back along its own trail until it hits
/// the winning route, then forward along that route to the exit.
///
/// `winner_path` is the winner's compressed spawn-to-exit trail and is only
/// ever read; the grid is only read too, so the per-step loop is free to
/// fan out. Steps stay barrier-synchronized for consistent snapshots.
pub(super) fn reconcile(
    grid: &Grid,
    swarm: &mut [Particle],
    winner: usize,
    winner_path: &[(usize, usize)],
    spawn: (usize, usize),
    mode: ExecMode,
    show_steps: bool,
) {
    let mut progress = vec![Progress::Wandering; swarm.len()];
    progress[winner] = Progress::Exited;
    let exited = AtomicUsize::new(1);

    while exited.load(Ordering::Relaxed) < swarm.len() {
        let step = |(particle, state): (&mut Particle, &mut Progress)| {
            if *state == Progress::Exited {
                return;
            }
            if *state == Progress::Wandering {
                // Retracing its own trail brings the particle back toward
                // the spawn cell, which is always on the winning route, so
                // this match is guaranteed to happen eventually.
                if let Some(hit) = winner_path.iter().position(|&c| c == particle.position) {
                    particle.path.clear();
                    particle.path.extend(winner_path[hit + 1..].iter().rev());
                    *state = Progress::OnTrack;
                }
            }
            follow_trail(particle, state, &exited);
        };
        if mode.fan_out(swarm.len()) {
            swarm
                .par_iter_mut()
                .zip(progress.par_iter_mut())
                .for_each(step);
        } else {
            swarm.iter_mut().zip(progress.iter_mut()).for_each(step);
        }

        if show_steps {
            render_snapshot(grid, swarm, spawn);
        }
    }
}

/// Takes the next coordinate off the particle's trail and steps toward it.
/// An empty trail means the particle is standing on the exit.
fn follow_trail(particle: &mut Particle, state: &mut Progress, exited: &AtomicUsize) {
    let Some(&top) = particle.path.last() else {
        *state = Progress::Exited;
        exited.fetch_add(1, Ordering::Relaxed);
        return;
    };
    let mut next = top;
    if next == particle.position {
        particle.path.pop();
        match particle.path.last() {
            Some(&coord) => next = coord,
            // The trail bottoms out at the spawn cell, which matches the
            // winning route before the trail can empty out here.
            None => unreachable!("particle trail emptied mid-step"),
        }
    }
    particle.update_position(move_toward(particle.position, next), true);
}

/// The single cardinal move from a cell to an adjacent one, read off the
/// coordinate delta.
fn move_toward(from: (usize, usize), to: (usize, usize)) -> Move {
    if to.0 == from.0 {
        if to.1 > from.1 { Move::East } else { Move::West }
    } else if to.0 > from.0 {
        Move::South
    } else {
        Move::North
    }
}

/// Shows the maze with the spawn cell marked, before the race begins.
pub(super) fn render_spawn(grid: &Grid, spawn: (usize, usize)) {
    let mut frame = grid.clone();
    frame[spawn] = Cell::Start;
    crate::maze::render(&frame).ok();
}

/// Builds an isolated display copy of the grid with every particle and the
/// spawn cell overlaid, and renders it. Taken after the step barrier so a
/// frame never mixes two steps.
fn render_snapshot(grid: &Grid, swarm: &[Particle], spawn: (usize, usize)) {
    let mut frame = grid.clone();
    for particle in swarm {
        frame[particle.position] = Cell::Particle;
    }
    frame[spawn] = Cell::Start;
    crate::maze::render(&frame).ok();
}
