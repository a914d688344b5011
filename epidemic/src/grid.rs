// grid.rs - Ghost-bordered population grid

use std::collections::TryReserveError;
use std::fmt;

use crate::cell::Cell;

pub const BORDER: usize = 1;                          // Ghost margin on every side
pub const BORDER_CELL: Cell = Cell::Dead;             // Never infectious, never regenerates

/// A `rows x columns` generation stored with a one-cell ghost border.
///
/// Storage is `(rows + 2) * (columns + 2)` cells in row-major order. The
/// border always holds [`BORDER_CELL`], so the 3x3 neighbourhood of any
/// addressable cell, including corner cells, is read without branching.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    stride: usize,                                    // columns + 2
    cells: Vec<Cell>,
}

impl Grid {
    /// All-Healthy grid. Panics on a zero dimension or an unaddressable size.
    pub fn new(rows: usize, columns: usize) -> Self {
        let (stride, total) = Self::layout(rows, columns);
        let mut grid = Self { rows, columns, stride, cells: vec![Cell::Healthy; total] };
        grid.paint_border();
        grid
    }

    /// Like [`Grid::new`] but reports allocation failure instead of aborting.
    pub fn try_new(rows: usize, columns: usize) -> Result<Self, TryReserveError> {
        assert!(rows > 0 && columns > 0, "grid dimensions must be non-zero");

        // An overflowing size is asked for in full so the reserve itself rejects it
        let total = Self::bordered_len(rows, columns).unwrap_or(usize::MAX);
        let mut cells = Vec::new();
        cells.try_reserve_exact(total)?;
        cells.resize(total, Cell::Healthy);

        let mut grid = Self { rows, columns, stride: columns + 2 * BORDER, cells };
        grid.paint_border();
        Ok(grid)
    }

    /// Cells stored for a `rows x columns` grid, border included. `None` on overflow.
    pub fn bordered_len(rows: usize, columns: usize) -> Option<usize> {
        let stride = columns.checked_add(2 * BORDER)?;
        rows.checked_add(2 * BORDER)?.checked_mul(stride)
    }

    fn layout(rows: usize, columns: usize) -> (usize, usize) {
        assert!(rows > 0 && columns > 0, "grid dimensions must be non-zero");
        match Self::bordered_len(rows, columns) {
            Some(total) => (columns + 2 * BORDER, total),
            None => panic!("{rows}x{columns} grid does not fit in memory"),
        }
    }

    fn paint_border(&mut self) {
        let last_row = self.rows + BORDER;
        let last_col = self.columns + BORDER;
        for col in 0..self.stride {
            self.cells[col] = BORDER_CELL;
            self.cells[last_row * self.stride + col] = BORDER_CELL;
        }
        for row in 0..self.rows + 2 * BORDER {
            self.cells[row * self.stride] = BORDER_CELL;
            self.cells[row * self.stride + last_col] = BORDER_CELL;
        }
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn columns(&self) -> usize { self.columns }

    /// Number of addressable cells.
    pub fn len(&self) -> usize { self.rows * self.columns }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[inline]
    fn index(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows && column < self.columns, "({row}, {column}) out of range");
        (row + BORDER) * self.stride + column + BORDER
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[self.index(row, column)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, column: usize, cell: Cell) {
        let idx = self.index(row, column);
        self.cells[idx] = cell;
    }

    /// The 3x3 block centred on `(row, column)`, the cell itself included.
    pub fn neighbourhood(&self, row: usize, column: usize) -> impl Iterator<Item = Cell> + '_ {
        let centre = self.index(row, column);
        let top = centre - self.stride - 1;
        (0..3).flat_map(move |dr| {
            let start = top + dr * self.stride;
            self.cells[start..start + 3].iter().copied()
        })
    }

    /// Infected or Spoiled cells in the 3x3 block around `(row, column)`.
    pub fn infected_neighbours(&self, row: usize, column: usize) -> usize {
        self.neighbourhood(row, column).filter(|cell| cell.is_infectious()).count()
    }

    /// Addressable rows, top to bottom, without the ghost border.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (BORDER..self.rows + BORDER).map(move |row| {
            let start = row * self.stride + BORDER;
            &self.cells[start..start + self.columns]
        })
    }

    /// Every addressable cell as `(row, column, cell)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.iter_rows()
            .enumerate()
            .flat_map(|(row, cells)| cells.iter().enumerate().map(move |(col, &cell)| (row, col, cell)))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.iter_rows().map(|row| row.iter().filter(|&&c| c == cell).count()).sum()
    }

    /// True if every ghost cell still holds [`BORDER_CELL`].
    pub fn border_intact(&self) -> bool {
        let last_row = self.rows + BORDER;
        let last_col = self.columns + BORDER;
        (0..self.stride).all(|col| {
            self.cells[col] == BORDER_CELL && self.cells[last_row * self.stride + col] == BORDER_CELL
        }) && (0..self.rows + 2 * BORDER).all(|row| {
            self.cells[row * self.stride] == BORDER_CELL
                && self.cells[row * self.stride + last_col] == BORDER_CELL
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.columns)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_healthy_inside_dead_outside() {
        let grid = Grid::new(4, 6);
        assert_eq!(grid.count(Cell::Healthy), 24);
        assert!(grid.border_intact());
        assert_eq!(grid.cells.len(), 6 * 8);
    }

    #[test]
    fn corner_neighbourhood_reads_the_border() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, Cell::Infected);

        let block: Vec<Cell> = grid.neighbourhood(0, 0).collect();
        assert_eq!(block.len(), 9);
        assert_eq!(block.iter().filter(|&&c| c == BORDER_CELL).count(), 5);
        assert_eq!(grid.infected_neighbours(0, 0), 1);
        assert_eq!(grid.infected_neighbours(2, 2), 0);
        assert_eq!(grid.infected_neighbours(1, 1), 1);
    }

    #[test]
    fn single_cell_grid_has_full_neighbourhood() {
        let grid = Grid::new(1, 1);
        assert_eq!(grid.neighbourhood(0, 0).count(), 9);
        assert_eq!(grid.infected_neighbours(0, 0), 0);
    }

    #[test]
    fn spoiled_counts_as_infectious() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 1, Cell::Spoiled);
        grid.set(2, 1, Cell::Infected);
        grid.set(1, 0, Cell::Dead);
        assert_eq!(grid.infected_neighbours(1, 1), 2);
    }

    #[test]
    fn rows_are_restartable() {
        let mut grid = Grid::new(2, 3);
        grid.set(1, 2, Cell::Dead);

        let first: Vec<Vec<Cell>> = grid.iter_rows().map(|r| r.to_vec()).collect();
        let second: Vec<Vec<Cell>> = grid.iter_rows().map(|r| r.to_vec()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[1], vec![Cell::Healthy, Cell::Healthy, Cell::Dead]);

        let cells: Vec<_> = grid.iter_cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[5], (1, 2, Cell::Dead));
    }

    #[test]
    fn display_uses_one_line_per_row() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 1, Cell::Infected);
        grid.set(1, 0, Cell::Spoiled);
        grid.set(1, 1, Cell::Dead);
        assert_eq!(grid.to_string(), ".I\nS#\n");
    }

    #[test]
    fn oversized_grid_fails_to_reserve() {
        assert_eq!(Grid::bordered_len(3, 4), Some(30));
        assert_eq!(Grid::bordered_len(usize::MAX - 1, 1), None);
        assert!(Grid::try_new(usize::MAX / 2, usize::MAX / 2).is_err());
        assert!(Grid::try_new(1 << 20, usize::MAX - 1).is_err());
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn zero_rows_rejected() {
        let _ = Grid::new(0, 5);
    }
}
