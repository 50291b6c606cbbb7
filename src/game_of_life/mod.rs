//! Game of Life core functionality

pub mod grid;
pub mod patterns;
pub mod rules;

pub use grid::LifeGrid;
pub use patterns::{grid_to_string, parse_grid, Pattern};
pub use rules::GameOfLifeRules;
