//! Text patterns for building grids
//!
//! Format: one line per row, '1' for a living cell and '0' for a dead one.
//! Surrounding whitespace and blank lines are ignored.

use super::LifeGrid;
use crate::error::LifeError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Parse a grid from its text representation
pub fn parse_grid(content: &str) -> Result<LifeGrid, LifeError> {
    let cells = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    _ => Err(LifeError::InvalidPattern { ch, row, col }),
                })
                .collect::<Result<Vec<bool>, LifeError>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    LifeGrid::from_cells(cells)
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &LifeGrid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for row in grid.rows() {
        for &cell in row {
            result.push(if cell { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Well-known starting patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// 2x2 still life
    Block,
    /// Period-2 oscillator, three cells in a row
    Blinker,
    /// Period-2 oscillator made of two blocks
    Beacon,
    /// Smallest spaceship, moves diagonally every four generations
    Glider,
}

impl Pattern {
    fn text(self) -> &'static str {
        match self {
            Pattern::Block => "11\n11\n",
            Pattern::Blinker => "111\n",
            Pattern::Beacon => "1100\n1100\n0011\n0011\n",
            Pattern::Glider => "010\n001\n111\n",
        }
    }

    /// The pattern on a grid just large enough to hold it
    pub fn grid(self) -> Result<LifeGrid, LifeError> {
        parse_grid(self.text())
    }

    /// The pattern centred on an otherwise dead `height` x `width` grid
    pub fn centered(self, height: usize, width: usize) -> Result<LifeGrid, LifeError> {
        let pattern = self.grid()?;
        if height < pattern.height() || width < pattern.width() {
            return Err(LifeError::PatternTooLarge {
                pattern_height: pattern.height(),
                pattern_width: pattern.width(),
                height,
                width,
            });
        }

        let top = (height - pattern.height()) / 2;
        let left = (width - pattern.width()) / 2;

        let mut cells = vec![vec![false; width]; height];
        for (row, col) in pattern.living_cells() {
            cells[top + row][left + col] = true;
        }
        LifeGrid::from_cells(cells)
    }
}
