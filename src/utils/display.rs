//! Display and output formatting utilities

use crate::driver::GenerationReport;
use crate::game_of_life::LifeGrid;

/// Text renderings of a grid
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &LifeGrid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1) * 3);
        for row in grid.rows() {
            for &cell in row {
                output.push(if cell { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with row and column numbers
    pub fn format_grid_with_coords(grid: &LifeGrid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary of a generation
    pub fn format_report(report: &GenerationReport, grid_cells: usize) -> String {
        let density = if grid_cells > 0 {
            report.living as f64 / grid_cells as f64 * 100.0
        } else {
            0.0
        };
        format!(
            "Generation {:>5} | Living: {:>6} | Density: {:5.1}%",
            report.generation, report.living, density
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_formatting() {
        let grid = LifeGrid::from_cells(vec![
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap();

        assert_eq!(GridFormatter::format_grid_compact(&grid), "█·█\n·█·\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_format_report() {
        let report = GenerationReport { generation: 7, living: 25 };
        let line = GridFormatter::format_report(&report, 100);
        assert!(line.contains("Generation     7"));
        assert!(line.contains("25.0%"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::error("bad").contains("bad"));
    }
}
