//! PNG export of grid occupancy

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::io::configuration::{FREE_CELL_COLOR, PIXELS_PER_CELL, TYPE_PALETTE};
use crate::io::error::{GridError, Result};
use crate::placement::PlacementController;

/// Palette color for a catalog entry, cycling when the catalog is larger
pub fn type_color(type_index: usize) -> [u8; 4] {
    TYPE_PALETTE
        .get(type_index % TYPE_PALETTE.len())
        .copied()
        .unwrap_or(FREE_CELL_COLOR)
}

/// Render occupancy as an image, one `PIXELS_PER_CELL` square per cell
///
/// Grid `z` grows upwards, so row `z = 0` is the bottom of the image.
/// Occupied cells take the palette color of their object's type; free
/// cells are transparent.
pub fn render_occupancy(controller: &PlacementController) -> RgbaImage {
    let grid = controller.grid();
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    let mut img = ImageBuffer::new(width * PIXELS_PER_CELL, height * PIXELS_PER_CELL);

    for (position, cell) in grid.cells() {
        let color = cell
            .occupant()
            .and_then(|&id| controller.placed_object(id))
            .map_or(FREE_CELL_COLOR, |object| type_color(object.type_index()));

        let left = position.x as u32 * PIXELS_PER_CELL;
        let top = (height - 1 - position.z as u32) * PIXELS_PER_CELL;
        for dy in 0..PIXELS_PER_CELL {
            for dx in 0..PIXELS_PER_CELL {
                img.put_pixel(left + dx, top + dy, Rgba(color));
            }
        }
    }

    img
}

/// Export the controller's grid occupancy as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_occupancy_png(controller: &PlacementController, output_path: &Path) -> Result<()> {
    let img = render_occupancy(controller);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GridError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| GridError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
