// error.rs - Error types for the engine and its collaborators

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected run parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("{name} = {value} must be between 0.0 and 1.0")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("long_prob + dead_prob must not exceed 1 (got {long_prob} + {dead_prob})")]
    ProbabilitySum { long_prob: f64, dead_prob: f64 },
    #[error("grid of {rows}x{columns} is too large to address")]
    TooLarge { rows: usize, columns: usize },
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to allocate generation {generation}: {source}")]
    Allocation {
        generation: u32,
        #[source]
        source: TryReserveError,
    },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("row has {actual} columns, header has {expected}")]
    ColumnMismatch { expected: usize, actual: usize },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to save {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("grid of {rows}x{columns} does not fit an image")]
    TooLarge { rows: usize, columns: usize },
}
