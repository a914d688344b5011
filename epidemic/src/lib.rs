//! Probabilistic cellular automaton for the spread of an infection.
//!
//! A ghost-bordered [`Grid`] holds one [`Cell`] state per individual. Each
//! generation the [`Scheduler`] draws a single [`Policy`] for the whole grid
//! and the [`Simulation`] applies [`next_state`] to every cell at once.

pub mod cell;
pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod render;
pub mod report;
pub mod scheduler;
pub mod simulation;

pub use cell::{Cell, Census, next_state};
pub use config::{HistoryRetention, SimulationConfig};
pub use error::{ConfigError, RenderError, ReportError, SimulationError};
pub use grid::Grid;
pub use report::CsvReport;
pub use scheduler::{Policy, Scheduler};
pub use simulation::Simulation;
