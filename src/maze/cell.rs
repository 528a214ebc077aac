use crossterm::style::{Color, Stylize};

use std::fmt;

/// State of a single grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// A walkable cell, either a room or a carved passage.
    Empty,
    Wall,
    /// The single boundary opening of the maze.
    Exit,
    /// Marks the discovered route once a particle has exited.
    Solution,
    /// The shared spawn cell of the swarm.
    Start,
    /// Overlay for a particle's current position, only ever applied to a
    /// display copy of the grid.
    Particle,
}

impl Cell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Glyph triplet used for the on-disk ascii image of the maze.
    pub fn ascii(self) -> &'static str {
        match self {
            Cell::Empty | Cell::Exit => "   ",
            Cell::Wall => "  □",
            Cell::Start => "  ●",
            Cell::Solution => "  x",
            Cell::Particle => "  o",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Cell::Empty => "  ".with(Color::Reset),
            Cell::Wall => "⬜".with(Color::White),
            Cell::Exit => "🟥".with(Color::Red),
            Cell::Solution => "🟨".with(Color::Yellow),
            Cell::Start => "🟩".with(Color::Green),
            Cell::Particle => "🟡".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Cell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
