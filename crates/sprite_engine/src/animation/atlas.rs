//! Uniform grid sprite-sheet regions

use crate::foundation::math::Rectangle;

/// Cut a texture into equal cells, row-major from the top-left
///
/// Partial cells at the right/bottom edges are dropped. Zero cell
/// dimensions yield no regions.
pub fn grid_regions(
    texture_width: u32,
    texture_height: u32,
    cell_width: u32,
    cell_height: u32,
) -> Vec<Rectangle> {
    if cell_width == 0 || cell_height == 0 {
        log::warn!("grid atlas with zero cell size ({cell_width}x{cell_height})");
        return Vec::new();
    }

    let columns = texture_width / cell_width;
    let rows = texture_height / cell_height;

    let mut regions = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for column in 0..columns {
            regions.push(Rectangle::new(
                (column * cell_width) as f32,
                (row * cell_height) as f32,
                cell_width as f32,
                cell_height as f32,
            ));
        }
    }
    regions
}
