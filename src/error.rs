//! Error types
//!
//! Only input handling can fail. Simulation, encoding and rendering are
//! closed computations over validated inputs.

use thiserror::Error;

/// Errors from loading [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Errors from reading a contribution grid
#[derive(Debug, Error)]
pub enum GridError {
    #[error("failed to parse contribution grid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Any failure surfaced by the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
