// Saving and restoring drawings.
// JSON keeps the sparse grid as-is; PNG flattens it at a given cell size.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use image::{Rgba, RgbaImage};
use tracing::info;

use crate::error::Result;
use crate::grid::PixelGrid;
use crate::types::{Color, GridExtent};

pub fn save_json(path: impl AsRef<Path>, grid: &PixelGrid) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, grid)?;
    writer.flush()?;
    info!(path = %path.display(), cells = grid.len(), "pixels saved");
    Ok(())
}

pub fn load_json(path: impl AsRef<Path>) -> Result<PixelGrid> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let grid: PixelGrid = serde_json::from_reader(reader)?;
    info!(path = %path.display(), cells = grid.len(), "pixels loaded");
    Ok(grid)
}

/// Render the cells inside `extent` into an image, `cell_size` pixels per cell.
pub fn render_image(grid: &PixelGrid, extent: GridExtent, cell_size: u32, background: Color) -> RgbaImage {
    let cell_size = cell_size.max(1);
    let mut image =
        RgbaImage::from_pixel(extent.columns * cell_size, extent.rows * cell_size, Rgba(background.0));

    for (coord, color) in grid {
        if !extent.contains(coord) {
            continue;
        }
        let (left, top) = (coord.x as u32 * cell_size, coord.y as u32 * cell_size);
        for y in top..top + cell_size {
            for x in left..left + cell_size {
                image.put_pixel(x, y, Rgba(color.0));
            }
        }
    }
    image
}

pub fn export_png(
    path: impl AsRef<Path>,
    grid: &PixelGrid,
    extent: GridExtent,
    cell_size: u32,
    background: Color,
) -> Result<()> {
    let path = path.as_ref();
    let image = render_image(grid, extent, cell_size, background);
    image.save_with_format(path, image::ImageFormat::Png)?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "png exported");
    Ok(())
}
