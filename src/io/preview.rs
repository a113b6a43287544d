//! Flat PNG preview export
//!
//! Writes one pixel per tile using the catalog display colors. This is a
//! debugging artifact for eyeballing generated maps, not a renderer.

use crate::catalog::tileset::{CatalogMode, TileSet};
use crate::engine::map::Map;
use crate::io::error::{GenError, Result};
use image::{ImageBuffer, Rgb};
use std::path::Path;

/// Export a generated map as a flat color PNG
///
/// # Errors
///
/// Returns an error if:
/// - The full tile catalog fails to build
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_map_png(map: &Map, output_path: &Path) -> Result<()> {
    let tileset = TileSet::build(CatalogMode::Full)?;

    let width = map.width.max(1) as u32;
    let height = map.height.max(1) as u32;
    let mut img = ImageBuffer::new(width, height);

    for row in &map.tiles {
        for tile in row {
            let color = tileset.kind(tile.tile).display_color;
            if tile.x < width as usize && tile.y < height as usize {
                img.put_pixel(tile.x as u32, tile.y as u32, Rgb(color));
            }
        }
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| GenError::MapWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    img.save(output_path).map_err(|e| GenError::PreviewExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
