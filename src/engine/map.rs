//! Final map artifact
//!
//! A read-only, JSON-compatible snapshot of the post-generation grid plus
//! the metadata callers need to render or simulate against it.

use crate::catalog::tiles::Tile;
use crate::seed::schema::{PoiType, WorldSeed};
use crate::spatial::grid::Grid;
use serde::{Deserialize, Serialize};

/// One output tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTile {
    /// Tile kind
    #[serde(rename = "type")]
    pub tile: Tile,
    /// Walkability from the catalog entry for `tile`
    pub walkable: bool,
    /// Elevation step from the catalog entry for `tile`
    pub height: u8,
    /// Column coordinate
    pub x: usize,
    /// Row coordinate
    pub y: usize,
}

/// A settlement stamped during generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Village {
    /// Column coordinate of the settlement center
    pub x: usize,
    /// Row coordinate of the settlement center
    pub y: usize,
    /// Display name from the world seed
    pub name: String,
    /// Settlement type from the world seed
    #[serde(rename = "type")]
    pub poi_type: PoiType,
}

/// Counters describing how hard the solve was
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Collapse steps attempted
    pub iterations: usize,
    /// Contradictions recovered by restoring a snapshot
    pub backtracks: usize,
}

/// The generated map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    /// Width in tiles
    pub width: usize,
    /// Height in tiles
    pub height: usize,
    /// RNG seed the map was generated with
    pub seed: u64,
    /// Row-major tile grid, indexed `[y][x]`
    pub tiles: Vec<Vec<MapTile>>,
    /// Settlements stamped in phase 2, in world seed order
    pub villages: Vec<Village>,
    /// Whether the solve finished without falling back to recovery
    pub success: bool,
    /// Echo of the input world seed
    pub world_seed: WorldSeed,
    /// Solve counters
    pub stats: GenerationStats,
}

impl Map {
    /// Assemble the artifact from a fully collapsed grid
    ///
    /// Cells that somehow lack a tile fall back to grass; after recovery
    /// this cannot happen, it only guards the accessor chain.
    pub fn from_grid(
        grid: &Grid,
        world_seed: WorldSeed,
        seed: u64,
        villages: Vec<Village>,
        success: bool,
        stats: GenerationStats,
    ) -> Self {
        let mut tiles = Vec::with_capacity(grid.height());
        for y in 0..grid.height() {
            let mut row = Vec::with_capacity(grid.width());
            for x in 0..grid.width() {
                let (tile, walkable, height) = grid
                    .cell(x, y)
                    .map_or((Tile::Grass, true, 1), |cell| {
                        (
                            cell.tile().unwrap_or(Tile::Grass),
                            cell.walkable(),
                            cell.height(),
                        )
                    });
                row.push(MapTile {
                    tile,
                    walkable,
                    height,
                    x,
                    y,
                });
            }
            tiles.push(row);
        }

        Self {
            width: grid.width(),
            height: grid.height(),
            seed,
            tiles,
            villages,
            success,
            world_seed,
            stats,
        }
    }

    /// Borrow the tile at `(x, y)` if in bounds
    pub fn tile(&self, x: usize, y: usize) -> Option<&MapTile> {
        self.tiles.get(y).and_then(|row| row.get(x))
    }

    /// Count tiles matching a predicate
    pub fn count_tiles<F>(&self, predicate: F) -> usize
    where
        F: Fn(Tile) -> bool,
    {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|t| predicate(t.tile))
            .count()
    }
}
