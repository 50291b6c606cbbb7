//! Game of Life transition rule

/// Conway's B3/S23 rule
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Neighbour counts that bring a dead cell to life
    pub const BIRTH: [u8; 1] = [3];

    /// Neighbour counts that keep a living cell alive
    pub const SURVIVAL: [u8; 2] = [2, 3];

    /// Size of the Moore neighbourhood
    pub const MAX_NEIGHBORS: u8 = 8;

    /// State of a cell in the next generation
    ///
    /// Birth on three is checked before survival on two; the two never
    /// overlap, so the order only fixes how the rule reads.
    pub fn next_state(alive: bool, neighbors: u8) -> bool {
        if neighbors == 3 {
            true
        } else {
            alive && neighbors == 2
        }
    }

    /// Check if a neighbour count is possible in a Moore neighbourhood
    pub fn is_valid_neighbor_count(count: u8) -> bool {
        count <= Self::MAX_NEIGHBORS
    }
}
