// simulation.rs - Generation stepping, seeding and termination

use std::collections::{TryReserveError, VecDeque};

use rand::Rng;
use tracing::debug;

use crate::cell::{self, Cell, Census};
use crate::config::{HistoryRetention, SimulationConfig};
use crate::error::SimulationError;
use crate::grid::Grid;
use crate::scheduler::{Policy, Scheduler};

/// One epidemic run over a fixed-size grid.
///
/// Every tick reads the whole current generation and builds the next one in a
/// fresh grid, so no cell sees a half-updated neighbour. The census counters
/// describe the generation that was consumed by the last tick.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    scheduler: Scheduler,
    generation: Grid,
    history: VecDeque<Grid>,
    day: u32,
    census: Census,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let generation = Grid::try_new(config.rows, config.columns)
            .map_err(|source| SimulationError::Allocation { generation: 0, source })?;

        Ok(Self {
            scheduler: Scheduler::new(config.long_prob, config.dead_prob),
            generation,
            history: VecDeque::new(),
            day: 0,
            census: Census::default(),
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig { &self.config }

    pub fn generation(&self) -> &Grid { &self.generation }

    /// Retained past generations, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Grid> + '_ { self.history.iter() }

    pub fn day_count(&self) -> u32 { self.day }

    pub fn census(&self) -> Census { self.census }

    pub fn healthy(&self) -> usize { self.census.healthy }

    pub fn infected(&self) -> usize { self.census.infected }

    pub fn dead(&self) -> usize { self.census.dead }

    /// Infects `amount` uniformly drawn cells. Repeated draws of one cell are harmless.
    pub fn seed<R: Rng + ?Sized>(&mut self, amount: usize, rng: &mut R) {
        let (rows, columns) = (self.generation.rows(), self.generation.columns());
        for _ in 0..amount {
            let row = rng.gen_range(0..rows);
            let column = rng.gen_range(0..columns);
            self.generation.set(row, column, Cell::Infected);
        }
        debug!(amount, "seeded infections");
    }

    /// Places one infection at a known cell.
    pub fn infect(&mut self, row: usize, column: usize) {
        self.generation.set(row, column, Cell::Infected);
    }

    /// Advances one generation under a single policy shared by every cell.
    ///
    /// On allocation failure the engine is left exactly as it was.
    pub fn tick(&mut self, regenerate: bool, delay: bool) -> Result<Census, SimulationError> {
        self.advance(regenerate, delay, Grid::try_new)
    }

    fn advance<A>(&mut self, regenerate: bool, delay: bool, allocate: A) -> Result<Census, SimulationError>
    where
        A: FnOnce(usize, usize) -> Result<Grid, TryReserveError>,
    {
        let current = &self.generation;
        let mut next = allocate(current.rows(), current.columns())
            .map_err(|source| SimulationError::Allocation { generation: self.day + 1, source })?;
        let mut census = Census::default();

        for (row, column, state) in current.iter_cells() {
            census.record(state);
            let infected = match state {
                Cell::Healthy => current.infected_neighbours(row, column),
                _ => 0,
            };
            next.set(row, column, cell::next_state(state, infected, regenerate, delay));
        }

        let previous = std::mem::replace(&mut self.generation, next);
        self.retain(previous);
        self.census = census;
        self.day += 1;

        debug!(
            day = self.day,
            regenerate,
            delay,
            healthy = census.healthy,
            infected = census.infected,
            dead = census.dead,
            "generation advanced",
        );
        Ok(census)
    }

    pub fn apply(&mut self, policy: Policy) -> Result<Census, SimulationError> {
        self.tick(policy.regenerate, policy.delay)
    }

    /// Draws this generation's policy and ticks once.
    pub fn random_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Policy, SimulationError> {
        let policy = self.scheduler.choose(rng);
        self.apply(policy)?;
        Ok(policy)
    }

    fn retain(&mut self, previous: Grid) {
        match self.config.history {
            HistoryRetention::Disabled => {}
            HistoryRetention::Unbounded => self.history.push_back(previous),
            HistoryRetention::Bounded(depth) => {
                if depth == 0 {
                    return;
                }
                while self.history.len() >= depth {
                    self.history.pop_front();
                }
                self.history.push_back(previous);
            }
        }
    }

    /// Whole-population verdict for the current generation.
    ///
    /// `Dead` once the day cutoff is passed or when healthy cells fall below
    /// the terminal fraction, `Infected` while the disease is still present,
    /// `Healthy` when it has burnt out.
    pub fn status(&self) -> Cell {
        if self.day > self.config.day_cutoff {
            return Cell::Dead;
        }

        let (mut alive, mut infected) = (0usize, 0usize);
        for row in self.generation.iter_rows() {
            for &cell in row {
                match cell {
                    Cell::Healthy => alive += 1,
                    Cell::Infected | Cell::Spoiled => infected += 1,
                    Cell::Dead => {}
                }
            }
        }

        if (alive as f64) < self.config.cell_count() as f64 * self.config.terminal_state {
            Cell::Dead
        } else if infected > 0 {
            Cell::Infected
        } else {
            Cell::Healthy
        }
    }

    /// Text snapshot of the current generation.
    pub fn dump(&self) -> String {
        format!("-- Generation {} --\n{}", self.day, self.generation)
    }
}
