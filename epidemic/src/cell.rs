// cell.rs - Per-cell health states and the transition rule

/// Health state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Healthy,
    Infected,
    Spoiled,                                          // Infected, one generation further along
    Dead,
}

impl Cell {
    /// Infected and Spoiled both spread the disease.
    pub fn is_infectious(self) -> bool {
        matches!(self, Cell::Infected | Cell::Spoiled)
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Healthy => '.',
            Cell::Infected => 'I',
            Cell::Spoiled => 'S',
            Cell::Dead => '#',
        }
    }
}

/// Next state of a cell for one generation.
///
/// `infected_neighbours` counts Infected/Spoiled cells in the full 3x3 block,
/// the cell itself included.
pub fn next_state(cell: Cell, infected_neighbours: usize, regenerate: bool, delay: bool) -> Cell {
    match (cell, infected_neighbours) {
        (Cell::Dead, _)     => if regenerate { Cell::Healthy } else { Cell::Dead },
        (Cell::Spoiled, _)  => Cell::Dead,
        (Cell::Infected, _) => if delay { Cell::Spoiled } else { Cell::Dead },
        (Cell::Healthy, 0)  => Cell::Healthy,
        (Cell::Healthy, _)  => Cell::Infected,
    }
}

/// Cells of one consumed generation, bucketed by their state before transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Census {
    pub healthy: usize,
    pub infected: usize,                              // Infected + Spoiled
    pub dead: usize,
}

impl Census {
    pub fn record(&mut self, cell: Cell) {
        match cell {
            Cell::Healthy => self.healthy += 1,
            Cell::Infected | Cell::Spoiled => self.infected += 1,
            Cell::Dead => self.dead += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.healthy + self.infected + self.dead
    }
}
