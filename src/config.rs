use std::io;
use std::path::Path;

use rand::{Rng, rngs::StdRng};
use serde::Deserialize;

/// Runtime settings, loaded from a JSON file.
///
/// Every field has a default, so a partial or absent configuration file is
/// fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many paired executions to perform.
    pub n_executions: usize,
    /// Number of particles released into each maze.
    pub n_particles: usize,
    /// Requested maze side length. A random odd side is drawn when absent
    /// or invalid.
    pub maze_size: Option<usize>,
    /// Render every synchronized step instead of just the final maze.
    pub show_steps: bool,
    /// Fixed seed for maze generation; fresh entropy when absent.
    pub generation_seed: Option<u64>,
    /// Fixed seed for the swarm's movements; fresh entropy when absent.
    pub solution_seed: Option<u64>,
    pub execute_sequential: bool,
    pub execute_parallel: bool,
    /// Smallest allowed maze side.
    pub side_min: usize,
    /// Largest allowed maze side.
    pub side_max: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            n_executions: 1,
            n_particles: 1000,
            maze_size: None,
            show_steps: false,
            generation_seed: None,
            solution_seed: None,
            execute_sequential: true,
            execute_parallel: true,
            side_min: 51,
            side_max: 301,
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, falling back to the defaults
    /// when no file exists there.
    pub fn load(path: &Path) -> io::Result<Config> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(io::BufReader::new(file)).map_err(io::Error::other)
    }
}

/// Returns the configured seed or draws a fresh one. The value is printed
/// either way, so any run can be reproduced by pinning it in the
/// configuration.
pub fn resolve_seed(configured: Option<u64>, purpose: &str) -> u64 {
    let seed = configured.unwrap_or_else(|| rand::rng().random());
    println!("Current seed for {purpose}: {seed}");
    seed
}

/// Enforces the maze size constraints: the side must be odd and inside
/// `[side_min, side_max]`. Anything else is replaced by a random odd side
/// drawn from the generation stream.
pub fn resolve_size(
    requested: Option<usize>,
    side_min: usize,
    side_max: usize,
    rng: &mut StdRng,
) -> usize {
    if let Some(size) = requested {
        if size % 2 == 1 && (side_min..=side_max).contains(&size) {
            return size;
        }
        println!("Invalid maze size specified. The values must be in [{side_min}, {side_max}]");
    }
    let mut size = rng.random_range(side_min..side_max);
    while size % 2 == 0 {
        size = rng.random_range(side_min..side_max);
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn defaults_fill_in_missing_fields() {
        let config: Config = serde_json::from_str(r#"{"n_particles": 8}"#).unwrap();
        assert_eq!(config.n_particles, 8);
        assert_eq!(config.n_executions, 1);
        assert_eq!(config.side_min, 51);
        assert_eq!(config.side_max, 301);
        assert!(config.execute_sequential);
        assert!(config.execute_parallel);
        assert_eq!(config.generation_seed, None);
    }

    #[test]
    fn configured_seed_is_kept() {
        assert_eq!(resolve_seed(Some(42), "generation"), 42);
    }

    #[test]
    fn valid_odd_sizes_pass_through() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(resolve_size(Some(53), 51, 301, &mut rng), 53);
    }

    #[test]
    fn invalid_sizes_are_redrawn_odd_and_in_range() {
        for requested in [Some(52), Some(13), Some(1000), None] {
            let mut rng = StdRng::seed_from_u64(17);
            let size = resolve_size(requested, 51, 301, &mut rng);
            assert_eq!(size % 2, 1);
            assert!((51..=301).contains(&size));
        }
    }

    #[test]
    fn redrawn_size_is_reproducible() {
        let mut first = StdRng::seed_from_u64(23);
        let mut second = StdRng::seed_from_u64(23);
        assert_eq!(
            resolve_size(None, 51, 301, &mut first),
            resolve_size(None, 51, 301, &mut second)
        );
    }
}
