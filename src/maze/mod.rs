pub mod cell;
mod grid;

pub use cell::Cell;
pub use grid::Grid;

use std::io::Write;

use crossterm::{cursor, queue, terminal};

/// Renders the grid to the terminal, replacing the previous frame.
pub fn render(grid: &Grid) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
    )?;
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            write!(stdout, "{}", grid[(row, col)])?;
        }
        write!(stdout, "\r\n")?;
    }
    stdout.flush()?;
    Ok(())
}
