//! Terminal output helpers for the CLI

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter};
