//! Timed driver for stepping a grid
//!
//! The grid itself has no notion of time. [`Simulation`] owns the run state
//! and the step interval, and serialises every `advance()` through a mutex so
//! a manual step can never overlap a step taken by the run loop.

use crate::error::LifeError;
use crate::game_of_life::LifeGrid;
use rand::Rng;
use serde::Serialize;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

/// Whether the run loop is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Stopped,
    Running,
}

/// Summary of the grid right after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub generation: u64,
    pub living: usize,
}

#[derive(Debug)]
struct Control {
    state: RunState,
    interval: Duration,
}

#[derive(Debug)]
struct Shared {
    control: Mutex<Control>,
    wake: Condvar,
}

// A panic mid-step cannot leave the grid half-written: advance() only
// commits a finished buffer. Recovering the guard is therefore safe.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives a grid on a fixed cadence
///
/// Clones share the same grid and run state, so one clone can run on a
/// background thread while another takes manual steps or stops it.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Arc<Mutex<LifeGrid>>,
    shared: Arc<Shared>,
}

impl Simulation {
    pub fn new(grid: LifeGrid, interval: Duration) -> Self {
        Self {
            grid: Arc::new(Mutex::new(grid)),
            shared: Arc::new(Shared {
                control: Mutex::new(Control {
                    state: RunState::Stopped,
                    interval,
                }),
                wake: Condvar::new(),
            }),
        }
    }

    pub fn state(&self) -> RunState {
        lock(&self.shared.control).state
    }

    pub fn interval(&self) -> Duration {
        lock(&self.shared.control).interval
    }

    /// Change the delay between generations; takes effect on the next wait
    pub fn set_interval(&self, interval: Duration) {
        lock(&self.shared.control).interval = interval;
    }

    /// Handle that can stop the run loop from anywhere
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Copy of the current grid, e.g. for rendering
    pub fn snapshot(&self) -> LifeGrid {
        lock(&self.grid).clone()
    }

    /// Advance exactly one generation
    pub fn step(&self) -> GenerationReport {
        let mut grid = lock(&self.grid);
        grid.advance();
        GenerationReport {
            generation: grid.generation(),
            living: grid.living_count(),
        }
    }

    /// Re-seed the grid with fresh random cells, starting again from
    /// generation zero
    ///
    /// Safe to call while the run loop is active; the loop simply carries on
    /// from the new state. On `InvalidProbability` the grid is left as it was.
    pub fn reset<R: Rng + ?Sized>(&self, probability: f64, rng: &mut R) -> Result<(), LifeError> {
        lock(&self.grid).seed_random(probability, rng)?;
        info!(probability, "Simulation reset");
        Ok(())
    }

    /// Step repeatedly until stopped or `limit` generations have been taken
    ///
    /// Waits for the current interval between generations and checks for a
    /// stop request before each one. `on_generation` sees every report.
    /// Returns the number of generations advanced by this call, which is zero
    /// if the simulation was already running elsewhere.
    pub fn run<F>(&self, limit: Option<usize>, mut on_generation: F) -> usize
    where
        F: FnMut(&GenerationReport),
    {
        {
            let mut control = lock(&self.shared.control);
            if control.state == RunState::Running {
                warn!("Simulation is already running");
                return 0;
            }
            control.state = RunState::Running;
        }
        info!(?limit, interval_ms = self.interval().as_millis() as u64, "Simulation running");

        let mut advanced = 0;
        while self.state() == RunState::Running && limit.map_or(true, |limit| advanced < limit) {
            let report = self.step();
            advanced += 1;
            on_generation(&report);

            if limit.is_some_and(|limit| advanced >= limit) {
                break;
            }

            let control = lock(&self.shared.control);
            let interval = control.interval;
            let _control = self
                .shared
                .wake
                .wait_timeout_while(control, interval, |control| {
                    control.state == RunState::Running
                })
                .unwrap_or_else(PoisonError::into_inner);
        }

        self.stop_handle().stop();
        info!(advanced, "Simulation stopped");
        advanced
    }
}

/// Stops a running [`Simulation`] between generations
#[derive(Debug, Clone)]
pub struct StopHandle {
    shared: Arc<Shared>,
}

impl StopHandle {
    /// Request a stop; wakes the run loop if it is waiting out an interval
    pub fn stop(&self) {
        lock(&self.shared.control).state = RunState::Stopped;
        self.shared.wake.notify_all();
    }
}
