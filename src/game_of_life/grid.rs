//! Grid representation and generational transition for Game of Life

use super::GameOfLifeRules;
use crate::error::LifeError;
use itertools::Itertools;
use rand::Rng;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, trace};

/// Offsets of the eight Moore neighbours: orthogonal first, then diagonal
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
];

/// A fixed-size, non-wrapping Game of Life grid
///
/// Cells are stored row-major. Cells beyond the edge do not exist and are
/// never counted as alive. The engine only ever replaces the whole buffer;
/// no cell is flipped in place.
#[derive(Debug, Clone)]
pub struct LifeGrid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
    generation: u64,
}

impl LifeGrid {
    /// Create an all-dead grid
    pub fn new(height: usize, width: usize) -> Result<Self, LifeError> {
        if height == 0 || width == 0 {
            return Err(LifeError::InvalidDimension { height, width });
        }

        Ok(Self {
            height,
            width,
            cells: vec![false; height * width],
            generation: 0,
        })
    }

    /// Create a grid from rows of cells
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self, LifeError> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        if height == 0 || width == 0 {
            return Err(LifeError::InvalidDimension { height, width });
        }

        for (row, cells_in_row) in cells.iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(LifeError::RaggedRows {
                    row,
                    found: cells_in_row.len(),
                    expected: width,
                });
            }
        }

        Ok(Self {
            height,
            width,
            cells: cells.into_iter().flatten().collect(),
            generation: 0,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of generations committed since creation or the last seeding
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Bounds-checked lookup; `None` for anything off the grid
    fn cell(&self, row: isize, col: isize) -> Option<bool> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.height)?;
        let col = usize::try_from(col).ok().filter(|&c| c < self.width)?;
        Some(self.cells[self.index(row, col)])
    }

    fn out_of_bounds(&self, row: isize, col: isize) -> LifeError {
        LifeError::OutOfBounds {
            row,
            col,
            height: self.height,
            width: self.width,
        }
    }

    /// State of the cell at `(row, col)`
    pub fn is_alive(&self, row: isize, col: isize) -> Result<bool, LifeError> {
        self.cell(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Count living cells in the Moore neighbourhood of `(row, col)`
    ///
    /// Neighbours past the edge count as dead. The centre itself must be on
    /// the grid.
    pub fn neighbor_count(&self, row: isize, col: isize) -> Result<u8, LifeError> {
        self.is_alive(row, col)?;
        Ok(self.count_alive_neighbors(row, col))
    }

    fn count_alive_neighbors(&self, row: isize, col: isize) -> u8 {
        let mut count = 0;
        for (dr, dc) in NEIGHBOR_OFFSETS {
            if self.cell(row + dr, col + dc).unwrap_or(false) {
                count += 1;
            }
        }
        debug_assert!(GameOfLifeRules::is_valid_neighbor_count(count));
        count
    }

    /// Replace every cell with an independent draw that is alive with
    /// `probability`
    ///
    /// Resets the generation counter, since the seeded state is a new start.
    pub fn seed_random<R: Rng + ?Sized>(
        &mut self,
        probability: f64,
        rng: &mut R,
    ) -> Result<(), LifeError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }

        let seeded: Vec<bool> = (0..self.cells.len())
            .map(|_| rng.random_bool(probability))
            .collect();

        self.cells = seeded;
        self.generation = 0;
        debug!(
            height = self.height,
            width = self.width,
            probability,
            living = self.living_count(),
            "Seeded grid"
        );
        Ok(())
    }

    /// Advance one generation
    ///
    /// Every cell of the next generation is computed from the current buffer,
    /// which stays untouched until the new buffer is complete.
    pub fn advance(&mut self) {
        let next = self.next_generation();
        self.cells = next;
        self.generation += 1;
        trace!(generation = self.generation, "Advanced grid");
    }

    /// Advance `generations` times in sequence
    pub fn advance_by(&mut self, generations: usize) {
        for _ in 0..generations {
            self.advance();
        }
    }

    fn next_generation(&self) -> Vec<bool> {
        // Rows are independent given the snapshot, so evaluate them in parallel
        (0..self.height)
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..self.width).map(move |col| {
                    let neighbors = self.count_alive_neighbors(row as isize, col as isize);
                    let alive = self.cells[self.index(row, col)];
                    GameOfLifeRules::next_state(alive, neighbors)
                })
            })
            .collect()
    }

    /// Iterate over rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Coordinates of all living cells, row-major
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        (0..self.height)
            .cartesian_product(0..self.width)
            .filter(|&(row, col)| self.cells[self.index(row, col)])
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// True when no cell is alive
    pub fn is_extinct(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}

/// Grids are equal when they have the same shape and the same living cells,
/// regardless of how many generations each has been advanced.
impl PartialEq for LifeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height && self.width == other.width && self.cells == other.cells
    }
}

impl Eq for LifeGrid {}

impl fmt::Display for LifeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                let symbol = if cell { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn all_alive(height: usize, width: usize) -> LifeGrid {
        LifeGrid::from_cells(vec![vec![true; width]; height]).unwrap()
    }

    fn grid_with(height: usize, width: usize, living: &[(usize, usize)]) -> LifeGrid {
        let mut cells = vec![vec![false; width]; height];
        for &(row, col) in living {
            cells[row][col] = true;
        }
        LifeGrid::from_cells(cells).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = LifeGrid::new(3, 4).unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.generation(), 0);
        assert!(grid.is_extinct());

        for row in 0..3 {
            for col in 0..4 {
                assert!(!grid.is_alive(row, col).unwrap());
            }
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            LifeGrid::new(0, 5),
            Err(LifeError::InvalidDimension { height: 0, width: 5 })
        );
        assert!(LifeGrid::new(5, 0).is_err());
        assert!(LifeGrid::from_cells(vec![]).is_err());
        assert!(LifeGrid::from_cells(vec![vec![]]).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let cells = vec![vec![true, false], vec![true]];
        assert_eq!(
            LifeGrid::from_cells(cells),
            Err(LifeError::RaggedRows { row: 1, found: 1, expected: 2 })
        );
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let grid = LifeGrid::new(4, 6).unwrap();

        for (row, col) in [(-1, 0), (4, 0), (0, -1), (0, 6)] {
            assert_eq!(
                grid.is_alive(row, col),
                Err(LifeError::OutOfBounds { row, col, height: 4, width: 6 })
            );
            assert!(matches!(
                grid.neighbor_count(row, col),
                Err(LifeError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_neighbor_count_all_dead() {
        let grid = LifeGrid::new(5, 5).unwrap();
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(grid.neighbor_count(row, col).unwrap(), 0);
            }
        }
    }

    #[test]
    fn test_neighbor_count_all_alive() {
        let grid = all_alive(4, 5);

        // Corners
        for (row, col) in [(0, 0), (0, 4), (3, 0), (3, 4)] {
            assert_eq!(grid.neighbor_count(row, col).unwrap(), 3);
        }
        // Edges
        for (row, col) in [(0, 2), (3, 1), (1, 0), (2, 4)] {
            assert_eq!(grid.neighbor_count(row, col).unwrap(), 5);
        }
        // Interior
        for (row, col) in [(1, 1), (1, 3), (2, 2)] {
            assert_eq!(grid.neighbor_count(row, col).unwrap(), 8);
        }
    }

    #[test]
    fn test_neighbor_count_excludes_center() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        assert_eq!(grid.neighbor_count(1, 1).unwrap(), 0);
        assert_eq!(grid.neighbor_count(0, 0).unwrap(), 1);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut grid = grid_with(3, 3, &[(1, 1)]);
        grid.advance();
        assert!(grid.is_extinct());
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn test_block_is_still_life() {
        let block = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut grid = block.clone();
        grid.advance();
        assert_eq!(grid, block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);

        let mut grid = horizontal.clone();
        grid.advance();
        assert_eq!(grid, vertical);

        grid.advance();
        assert_eq!(grid, horizontal);
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn test_advance_by_matches_repeated_advance() {
        let glider = grid_with(6, 6, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);

        let mut stepped = glider.clone();
        for _ in 0..4 {
            stepped.advance();
        }
        let mut jumped = glider;
        jumped.advance_by(4);

        assert_eq!(stepped, jumped);
        // A glider moves one cell diagonally every four generations
        assert_eq!(
            jumped.living_cells(),
            vec![(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn test_edges_are_not_wrapped() {
        // A blinker against the top edge loses the half that would leave the grid
        let mut grid = grid_with(3, 3, &[(0, 0), (0, 1), (0, 2)]);
        grid.advance();
        assert_eq!(grid.living_cells(), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn test_seed_random_extremes() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut grid = LifeGrid::new(6, 9).unwrap();
        grid.seed_random(1.0, &mut rng).unwrap();
        assert_eq!(grid.living_count(), 54);

        grid.seed_random(0.0, &mut rng).unwrap();
        assert!(grid.is_extinct());
    }

    #[test]
    fn test_seed_random_is_reproducible() {
        let mut first = LifeGrid::new(20, 30).unwrap();
        let mut second = LifeGrid::new(20, 30).unwrap();

        first.seed_random(0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        second.seed_random(0.3, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(first, second);
        assert!(!first.is_extinct());
        assert!(first.living_count() < 600);
    }

    #[test]
    fn test_seed_random_accepts_trait_object() {
        let mut concrete = LifeGrid::new(8, 8).unwrap();
        concrete.seed_random(0.5, &mut StdRng::seed_from_u64(11)).unwrap();

        let mut boxed: Box<dyn RngCore> = Box::new(StdRng::seed_from_u64(11));
        let mut dynamic = LifeGrid::new(8, 8).unwrap();
        dynamic.seed_random(0.5, boxed.as_mut()).unwrap();

        assert_eq!(dynamic, concrete);
    }

    #[test]
    fn test_invalid_probability_leaves_grid_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = grid_with(3, 3, &[(0, 0), (2, 2)]);
        let before = grid.clone();

        for probability in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                grid.seed_random(probability, &mut rng),
                Err(LifeError::InvalidProbability(_))
            ));
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn test_display() {
        let grid = grid_with(2, 2, &[(0, 0), (1, 1)]);
        assert_eq!(grid.to_string(), "⬛⬜\n⬜⬛\n");
    }
}
