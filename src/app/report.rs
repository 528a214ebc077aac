use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::exec::ExecMode;
use crate::maze::Grid;

/// One row of the executions report.
pub(super) struct Record {
    pub mode: ExecMode,
    pub elapsed_ms: f64,
    pub size: usize,
    pub n_particles: usize,
    pub generation_seed: u64,
    pub solution_seed: u64,
}

const REPORT_HEADER: &str =
    "version,elapsed_time,maze_size,n_particles,generation_seed,solution_seed,maze_image_path";

/// Writes the solved maze's ascii image and appends a record to the
/// executions report. Returns the image path.
pub(super) fn save_results(
    results_dir: &Path,
    record: &Record,
    grid: &Grid,
) -> io::Result<PathBuf> {
    println!("Saving the results..");
    let images_dir = results_dir.join("mazes");
    fs::create_dir_all(&images_dir)?;

    let image_path = images_dir.join(format!("{}_{}.txt", record.mode, unix_millis()));
    fs::write(&image_path, grid.to_ascii())?;

    let report_path = results_dir.join("executions_report.csv");
    let new_report = !report_path.exists();
    let mut report = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&report_path)?;
    if new_report {
        write!(report, "{REPORT_HEADER}")?;
    }
    write!(
        report,
        "\n{},{:.3},{},{},{},{},{}",
        record.mode,
        record.elapsed_ms,
        record.size,
        record.n_particles,
        record.generation_seed,
        record.solution_seed,
        image_path.display()
    )?;
    Ok(image_path)
}

/// Millisecond timestamp keeping image file names unique across runs.
fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mode: ExecMode) -> Record {
        Record {
            mode,
            elapsed_ms: 12.5,
            size: 5,
            n_particles: 3,
            generation_seed: 1,
            solution_seed: 2,
        }
    }

    #[test]
    fn report_appends_under_a_single_header() {
        let results_dir =
            std::env::temp_dir().join(format!("mazeswarm-report-test-{}", std::process::id()));
        let grid = Grid::lattice(5, ExecMode::Sequential);

        let image = save_results(&results_dir, &record(ExecMode::Sequential), &grid).unwrap();
        save_results(&results_dir, &record(ExecMode::Parallel), &grid).unwrap();

        assert_eq!(fs::read_to_string(&image).unwrap(), grid.to_ascii());

        let report = fs::read_to_string(results_dir.join("executions_report.csv")).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], REPORT_HEADER);
        assert!(lines[1].starts_with("sequential,12.500,5,3,1,2,"));
        assert!(lines[2].starts_with("parallel,12.500,5,3,1,2,"));

        fs::remove_dir_all(&results_dir).unwrap();
    }
}
