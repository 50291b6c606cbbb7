//! Conway's Game of Life engine
//!
//! A fixed-size, non-wrapping grid of cells that advances one generation at a
//! time, plus a small driver for stepping it on a timer.

pub mod config;
pub mod driver;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use driver::{GenerationReport, RunState, Simulation, StopHandle};
pub use error::LifeError;
pub use game_of_life::{GameOfLifeRules, LifeGrid, Pattern};

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

/// Build the starting grid described by the settings
///
/// A configured pattern is centred on an empty grid; otherwise every cell is
/// seeded at random, from the configured seed when there is one.
pub fn initial_grid(settings: &Settings) -> Result<LifeGrid> {
    let (height, width) = (settings.grid.height, settings.grid.width);

    if let Some(pattern) = settings.seeding.pattern {
        return Ok(pattern.centered(height, width)?);
    }

    let mut grid = LifeGrid::new(height, width)?;
    let mut rng = match settings.seeding.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    grid.seed_random(settings.seeding.probability, &mut rng)?;
    Ok(grid)
}
