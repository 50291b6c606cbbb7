//! Error types for grid operations

/// Contract violations reported by [`LifeGrid`](crate::LifeGrid) and the
/// pattern parser. Grid state is never modified when one of these is returned
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LifeError {
    /// Height or width was zero
    #[error("invalid grid dimensions {height}x{width}: both must be positive")]
    InvalidDimension {
        /// Requested number of rows
        height: usize,
        /// Requested number of columns
        width: usize,
    },

    /// Seeding probability outside `[0, 1]`, or NaN
    #[error("invalid probability {0}: must be within [0, 1]")]
    InvalidProbability(f64),

    /// A queried coordinate lies outside the grid
    #[error("coordinates ({row}, {col}) out of bounds for {height}x{width} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        height: usize,
        width: usize,
    },

    /// Rows passed to a constructor differ in length
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A pattern string contained something other than '0' or '1'
    #[error("invalid character '{ch}' at position ({row}, {col}); only '0' and '1' are allowed")]
    InvalidPattern { ch: char, row: usize, col: usize },

    /// A pattern is larger than the grid it was placed on
    #[error("{pattern_height}x{pattern_width} pattern does not fit a {height}x{width} grid")]
    PatternTooLarge {
        pattern_height: usize,
        pattern_width: usize,
        height: usize,
        width: usize,
    },
}
