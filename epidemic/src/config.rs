// config.rs - Run parameters fixed at construction

use crate::error::ConfigError;
use crate::grid::Grid;

pub const DEFAULT_DAY_CUTOFF: u32 = 31;               // Longest epidemic we model, in generations
pub const DEFAULT_TERMINAL_STATE: f64 = 1.0 / 3.0;    // Fewer healthy cells than this fraction means collapse

/// How many past generations the engine keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryRetention {
    #[default]
    Disabled,
    /// Newest `n` generations, oldest dropped first.
    Bounded(usize),
    Unbounded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub rows: usize,
    pub columns: usize,
    /// Chance per generation of the long course (regenerate + delay).
    pub long_prob: f64,
    /// Chance per generation of the fatal course (no regrowth, no delay).
    pub dead_prob: f64,
    pub terminal_state: f64,
    pub day_cutoff: u32,
    pub history: HistoryRetention,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 700,
            columns: 700,
            long_prob: 0.05,
            dead_prob: 0.35,
            terminal_state: DEFAULT_TERMINAL_STATE,
            day_cutoff: DEFAULT_DAY_CUTOFF,
            history: HistoryRetention::Disabled,
        }
    }
}

impl SimulationConfig {
    pub fn new(rows: usize, columns: usize, long_prob: f64, dead_prob: f64, terminal_state: f64) -> Self {
        Self { rows, columns, long_prob, dead_prob, terminal_state, ..Self::default() }
    }

    pub fn with_history(mut self, history: HistoryRetention) -> Self {
        self.history = history;
        self
    }

    pub fn with_day_cutoff(mut self, day_cutoff: u32) -> Self {
        self.day_cutoff = day_cutoff;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid { rows: self.rows, columns: self.columns });
        }
        if Grid::bordered_len(self.rows, self.columns).is_none() {
            return Err(ConfigError::TooLarge { rows: self.rows, columns: self.columns });
        }
        for (name, value) in [
            ("long_prob", self.long_prob),
            ("dead_prob", self.dead_prob),
            ("terminal_state", self.terminal_state),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        if self.long_prob + self.dead_prob > 1.0 {
            return Err(ConfigError::ProbabilitySum {
                long_prob: self.long_prob,
                dead_prob: self.dead_prob,
            });
        }
        Ok(())
    }
}
