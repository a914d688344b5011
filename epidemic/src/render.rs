// render.rs - One pixel per cell snapshots of a generation

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::cell::Cell;
use crate::error::RenderError;
use crate::grid::Grid;

pub const HEALTHY_RGB: [u8; 3] = [39, 117, 84];
pub const INFECTED_RGB: [u8; 3] = [170, 57, 57];
pub const DEAD_RGB: [u8; 3] = [0, 0, 0];

pub fn color(cell: Cell) -> [u8; 3] {
    match cell {
        Cell::Healthy => HEALTHY_RGB,
        Cell::Infected | Cell::Spoiled => INFECTED_RGB,
        Cell::Dead => DEAD_RGB,
    }
}

/// x runs along columns, y along rows.
pub fn to_image(grid: &Grid) -> Result<RgbImage, RenderError> {
    let too_large = || RenderError::TooLarge { rows: grid.rows(), columns: grid.columns() };
    let width = u32::try_from(grid.columns()).map_err(|_| too_large())?;
    let height = u32::try_from(grid.rows()).map_err(|_| too_large())?;

    let mut image = RgbImage::new(width, height);
    for (row, column, cell) in grid.iter_cells() {
        image.put_pixel(column as u32, row as u32, Rgb(color(cell)));
    }
    Ok(image)
}

/// Writes the grid; the format follows the file extension.
pub fn save(grid: &Grid, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    to_image(grid)?
        .save(path)
        .map_err(|source| RenderError::Image { path: path.to_path_buf(), source })
}
