//! Configuration management for the Game of Life simulation

pub mod settings;

pub use settings::{
    CliOverrides, DriverConfig, GridConfig, OutputConfig, OutputFormat, SeedingConfig, Settings,
};
