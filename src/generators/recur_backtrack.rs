use rand::{Rng, rngs::StdRng};

use crate::maze::{Cell, Grid};

/// Carves a spanning tree over the room lattice with a randomized
/// depth-first backtracker, starting from the exit opening.
///
/// Each iteration either advances into a random unvisited room two cells
/// away, clearing the wall midway, or, at a dead end, pops the carving
/// track until a room with unvisited neighbors shows up. The loop is
/// inherently sequential: every step depends on the visited set and the
/// track left behind by the previous one.
pub(super) fn carve_paths(grid: &mut Grid, exit: (usize, usize), rng: &mut StdRng) {
    let size = grid.size();
    let mut visited = vec![false; size * size];
    visited[exit.0 * size + exit.1] = true;

    let mut track = vec![exit];
    let mut current = exit;
    // The exit sits directly beside its one interior room with no wall in
    // between, so the first step searches at offset 1 and carves nothing.
    let mut at_exit = true;

    loop {
        let near = unvisited_near_cells(grid, &visited, current, if at_exit { 1 } else { 2 });
        if near.is_empty() {
            // Dead end: drop the current room and resume from its
            // predecessor. The exit is never re-examined; its sole
            // neighbor was the first room visited.
            track.pop();
            match track.last() {
                Some(&cell) if track.len() > 1 => current = cell,
                _ => break,
            }
            continue;
        }

        let next = near[rng.random_range(0..near.len())];
        if at_exit {
            at_exit = false;
        } else {
            // The removed wall cell is the edge of the spanning tree.
            let wall = ((current.0 + next.0) / 2, (current.1 + next.1) / 2);
            grid[wall] = Cell::Empty;
        }
        visited[next.0 * size + next.1] = true;
        track.push(next);
        current = next;
    }
}

/// Collects the unvisited rooms reachable from `cell` by stepping `offset`
/// cells in each axis direction, skipping targets that are out of bounds
/// or structural wall positions. The probe order is fixed so that a seeded
/// carve is reproducible.
fn unvisited_near_cells(
    grid: &Grid,
    visited: &[bool],
    cell: (usize, usize),
    offset: usize,
) -> Vec<(usize, usize)> {
    let size = grid.size();
    let (row, col) = cell;
    // Underflow wraps to a huge value and is dropped by the bounds filter,
    // the same trick the walkable-neighbor scans use elsewhere.
    [
        (row.wrapping_add(offset), col),
        (row, col.wrapping_add(offset)),
        (row.wrapping_sub(offset), col),
        (row, col.wrapping_sub(offset)),
    ]
    .into_iter()
    .filter(|&(r, c)| {
        r < size && c < size && !visited[r * size + c] && grid[(r, c)] != Cell::Wall
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::ExecMode;
    use rand::SeedableRng;

    #[test]
    fn near_cells_respect_bounds_and_walls() {
        let grid = Grid::lattice(5, ExecMode::Sequential);
        let visited = vec![false; 25];
        // Corner room: both two-step probes toward the boundary fall off
        // the grid, leaving the two interior rooms.
        let near = unvisited_near_cells(&grid, &visited, (1, 1), 2);
        assert_eq!(near, vec![(3, 1), (1, 3)]);
    }

    #[test]
    fn near_cells_skip_visited_rooms() {
        let grid = Grid::lattice(5, ExecMode::Sequential);
        let mut visited = vec![false; 25];
        visited[3 * 5 + 1] = true;
        let near = unvisited_near_cells(&grid, &visited, (1, 1), 2);
        assert_eq!(near, vec![(1, 3)]);
    }

    #[test]
    fn carving_clears_one_wall_per_room_beyond_the_first() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut grid = Grid::lattice(9, ExecMode::Sequential);
        grid[(0, 3)] = Cell::Exit;
        carve_paths(&mut grid, (0, 3), &mut rng);
        let cleared = (0..9)
            .flat_map(|row| (0..9).map(move |col| (row, col)))
            .filter(|&(row, col)| {
                (row % 2 == 0 || col % 2 == 0) && grid[(row, col)] == Cell::Empty
            })
            .count();
        // 16 rooms, connected into a tree
        assert_eq!(cleared, 15);
    }
}
