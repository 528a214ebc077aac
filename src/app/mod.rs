mod report;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use rand::{SeedableRng, rngs::StdRng};

use crate::config::{self, Config};
use crate::exec::ExecMode;
use crate::generators;
use crate::maze::Grid;
use crate::solvers;

/// Drives the paired executions: seed and size resolution, generation,
/// solving, timing and result persistence.
pub struct App {
    config: Config,
    /// Where maze images and the executions report land.
    results_dir: PathBuf,
}

impl App {
    pub fn new(config: Config, results_dir: PathBuf) -> Self {
        App {
            config,
            results_dir,
        }
    }

    /// Runs every configured execution. Each one resolves a seed pair,
    /// then times every enabled version on clones of the same random
    /// streams, so both see an identical maze and identical particle
    /// movements.
    pub fn run(&self) -> io::Result<()> {
        println!("\n[ Random Maze Generator and Solver ]\n");
        let n_particles = self.config.n_particles.max(1);

        for execution in 0..self.config.n_executions {
            tracing::info!(execution, "starting execution");
            let generation_seed = config::resolve_seed(self.config.generation_seed, "generation");
            let solution_seed = config::resolve_seed(self.config.solution_seed, "solution");

            let mut generation_rng = StdRng::seed_from_u64(generation_seed);
            let solution_rng = StdRng::seed_from_u64(solution_seed);
            let size = config::resolve_size(
                self.config.maze_size,
                self.config.side_min,
                self.config.side_max,
                &mut generation_rng,
            );
            println!("Maze Size: [{size}, {size}]");

            for mode in [ExecMode::Sequential, ExecMode::Parallel] {
                if !self.enabled(mode) {
                    continue;
                }
                println!("\n\n{} VERSION:\n", mode.to_string().to_uppercase());

                let start = Instant::now();
                let grid = run_pipeline(
                    size,
                    n_particles,
                    generation_rng.clone(),
                    solution_rng.clone(),
                    mode,
                    self.config.show_steps,
                );
                let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;
                println!("The execution took {elapsed_ms:.3} ms");

                let record = report::Record {
                    mode,
                    elapsed_ms,
                    size,
                    n_particles,
                    generation_seed,
                    solution_seed,
                };
                let image_path = report::save_results(&self.results_dir, &record, &grid)?;
                tracing::info!(image = %image_path.display(), "results saved");
                println!("-----------------------------------------------------------");
            }
            println!("###########################################################");
        }
        Ok(())
    }

    fn enabled(&self, mode: ExecMode) -> bool {
        match mode {
            ExecMode::Sequential => self.config.execute_sequential,
            ExecMode::Parallel => self.config.execute_parallel,
        }
    }
}

/// Generates a maze and releases the swarm into it, in the given mode.
pub fn run_pipeline(
    size: usize,
    n_particles: usize,
    mut generation_rng: StdRng,
    mut solution_rng: StdRng,
    mode: ExecMode,
    show_steps: bool,
) -> Grid {
    let grid = generators::generate(size, &mut generation_rng, mode);
    solvers::solve(grid, n_particles, &mut solution_rng, mode, show_steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_modes_produce_the_same_grid_from_shared_streams() {
        let generation_rng = StdRng::seed_from_u64(41);
        let solution_rng = StdRng::seed_from_u64(42);
        let sequential = run_pipeline(
            51,
            8,
            generation_rng.clone(),
            solution_rng.clone(),
            ExecMode::Sequential,
            false,
        );
        let parallel = run_pipeline(
            51,
            8,
            generation_rng,
            solution_rng,
            ExecMode::Parallel,
            false,
        );
        assert_eq!(sequential, parallel);
    }
}
