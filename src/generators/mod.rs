use rand::{Rng, rngs::StdRng};

mod recur_backtrack;

use crate::exec::ExecMode;
use crate::maze::{Cell, Grid};

/// Generates a perfect square maze with a single boundary exit.
///
/// The carving lattice is initialized (fanned out across workers when
/// `mode` allows it), a random exit opening is placed on the boundary, and
/// the rooms are connected into a spanning tree by a randomized
/// depth-first backtracker. `size` must be odd; the configuration layer
/// guarantees it before the generator runs.
pub fn generate(size: usize, rng: &mut StdRng, mode: ExecMode) -> Grid {
    tracing::info!(size, %mode, "generating the maze");

    let exit = exit_coords(size, rng);
    let mut grid = Grid::lattice(size, mode);
    grid[exit] = Cell::Exit;

    recur_backtrack::carve_paths(&mut grid, exit, rng);
    grid
}

/// Picks the exit cell: a random odd offset along the top or the left
/// edge. Odd offsets keep the opening aligned with the room lattice.
fn exit_coords(size: usize, rng: &mut StdRng) -> (usize, usize) {
    let mut offset = rng.random_range(0..size);
    while offset % 2 == 0 {
        offset = rng.random_range(0..size);
    }
    if rng.random_range(0..=1) == 1 {
        (0, offset)
    } else {
        (offset, 0)
    }
}
