use rand::rngs::StdRng;

/// Cardinal moves available to a particle, probed in the fixed order
/// north, south, west, east wherever moves are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    North,
    South,
    West,
    East,
}

impl Move {
    /// The coordinate one step away in this direction. Legality of the
    /// step is established by the caller; the target must be in bounds.
    pub fn apply(self, (row, col): (usize, usize)) -> (usize, usize) {
        match self {
            Move::North => (row - 1, col),
            Move::South => (row + 1, col),
            Move::West => (row, col - 1),
            Move::East => (row, col + 1),
        }
    }
}

/// An independent random-walking solver unit.
///
/// `path` is the particle's currently relevant acyclic trail, not its full
/// history: stepping back onto the next-to-last trail cell pops the trail
/// instead of growing it. `path[0]` is the shared spawn cell and survives
/// every walking update.
pub struct Particle {
    pub position: (usize, usize),
    pub last_move: Option<Move>,
    pub path: Vec<(usize, usize)>,
    /// Per-particle random stream, seeded by the solver so a trajectory
    /// never depends on how the per-step loop is scheduled.
    pub rng: StdRng,
}

impl Particle {
    pub fn spawn(position: (usize, usize), rng: StdRng) -> Self {
        Particle {
            position,
            last_move: None,
            path: vec![position],
            rng,
        }
    }

    /// Applies `new_move`, keeping the trail compressed.
    ///
    /// A backtracking update always pops the trail top. A walking update
    /// pops when the particle stepped back onto the next-to-last trail
    /// cell and pushes otherwise.
    pub fn update_position(&mut self, new_move: Move, backtracking: bool) {
        self.position = new_move.apply(self.position);
        let len = self.path.len();
        if backtracking || (len > 1 && self.path[len - 2] == self.position) {
            self.path.pop();
        } else {
            self.path.push(self.position);
        }
        debug_assert!(
            self.path.len() < 2 || self.path[self.path.len() - 2] != self.path[self.path.len() - 1],
            "compressed trail must not hold consecutive duplicates"
        );
        self.last_move = Some(new_move);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn particle_at(position: (usize, usize)) -> Particle {
        Particle::spawn(position, StdRng::seed_from_u64(0))
    }

    #[test]
    fn walking_appends_new_cells() {
        let mut particle = particle_at((3, 3));
        particle.update_position(Move::East, false);
        particle.update_position(Move::South, false);
        assert_eq!(particle.position, (4, 4));
        assert_eq!(particle.path, vec![(3, 3), (3, 4), (4, 4)]);
        assert_eq!(particle.last_move, Some(Move::South));
    }

    #[test]
    fn immediate_reversal_pops_instead_of_growing() {
        let mut particle = particle_at((3, 3));
        particle.update_position(Move::East, false);
        particle.update_position(Move::West, false);
        assert_eq!(particle.position, (3, 3));
        assert_eq!(particle.path, vec![(3, 3)]);
    }

    #[test]
    fn spawn_cell_survives_repeated_reversals() {
        let mut particle = particle_at((3, 3));
        for _ in 0..3 {
            particle.update_position(Move::North, false);
            particle.update_position(Move::South, false);
        }
        assert_eq!(particle.path, vec![(3, 3)]);
    }

    #[test]
    fn backtracking_updates_always_pop() {
        let mut particle = particle_at((1, 1));
        particle.update_position(Move::East, false);
        particle.update_position(Move::East, false);
        assert_eq!(particle.path, vec![(1, 1), (1, 2), (1, 3)]);
        particle.update_position(Move::West, true);
        assert_eq!(particle.position, (1, 2));
        assert_eq!(particle.path, vec![(1, 1), (1, 2)]);
    }
}
