/// Chooses whether the data-parallel sections of the pipeline run on one
/// worker or are fanned out across the rayon pool.
///
/// The mode never changes what is computed, only how the independent
/// per-cell and per-particle loops are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    Sequential,
    Parallel,
}

impl ExecMode {
    /// Minimum number of work items each worker must receive before a
    /// fan-out pays for its scheduling overhead.
    pub const MIN_ITEMS_PER_WORKER: usize = 100;

    /// Whether a data-parallel loop over `items` elements should be fanned
    /// out across the worker pool in this mode.
    pub fn fan_out(self, items: usize) -> bool {
        match self {
            ExecMode::Sequential => false,
            ExecMode::Parallel => {
                items / rayon::current_num_threads() > Self::MIN_ITEMS_PER_WORKER
            }
        }
    }
}

impl std::fmt::Display for ExecMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecMode::Sequential => write!(f, "sequential"),
            ExecMode::Parallel => write!(f, "parallel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_never_fans_out() {
        assert!(!ExecMode::Sequential.fan_out(usize::MAX));
    }

    #[test]
    fn parallel_fans_out_on_large_inputs_only() {
        assert!(!ExecMode::Parallel.fan_out(10));
        assert!(ExecMode::Parallel.fan_out(100_000_000));
    }

    #[test]
    fn modes_format_as_report_version_names() {
        assert_eq!(ExecMode::Sequential.to_string(), "sequential");
        assert_eq!(ExecMode::Parallel.to_string(), "parallel");
    }
}
