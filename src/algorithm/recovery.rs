//! Fallback fill after backtrack exhaustion
//!
//! When the solver gives up, every still-uncollapsed cell is filled from a
//! small set of forgiving terrain kinds, preferring one that agrees with at
//! least one already-collapsed neighbor. The result can be locally
//! incoherent, but the map stays well-typed and generation always
//! terminates.

use crate::catalog::tileset::TileSet;
use crate::catalog::tiles::Tile;
use crate::spatial::grid::Grid;

/// Forgiving tile kinds tried in order during recovery
pub const FALLBACK_TILES: [Tile; 5] = [
    Tile::Grass,
    Tile::Meadow,
    Tile::Forest,
    Tile::Hills,
    Tile::Scrubland,
];

/// Fill every uncollapsed cell, returning how many were recovered
///
/// Cells are visited in row-major scan order so earlier recoveries are
/// visible as collapsed neighbors to later ones.
pub fn fill_uncollapsed(grid: &mut Grid, tileset: &TileSet) -> usize {
    let mut recovered = 0;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.cell(x, y).is_some_and(|c| c.collapsed()) {
                continue;
            }

            let mut collapsed_neighbors = Vec::with_capacity(4);
            for ((nx, ny), _direction) in grid.neighbors(x, y) {
                if let Some(tile) = grid.cell(nx, ny).and_then(|c| c.tile()) {
                    collapsed_neighbors.push(tile);
                }
            }

            let choice = FALLBACK_TILES
                .iter()
                .copied()
                .find(|candidate| {
                    collapsed_neighbors
                        .iter()
                        .any(|placed| tileset.can_be_adjacent(*candidate, *placed))
                })
                .unwrap_or(Tile::Grass);

            grid.seed_cell(x, y, choice, tileset);
            recovered += 1;
        }
    }

    recovered
}

#[cfg(test)]
mod tests {
    use super::{FALLBACK_TILES, fill_uncollapsed};
    use crate::catalog::tileset::{CatalogMode, TileSet};
    use crate::catalog::tiles::Tile;
    use crate::math::sampling::RandomSource;
    use crate::spatial::grid::Grid;

    #[test]
    fn fills_every_cell_and_keeps_seeds() {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(6);
        let mut grid = Grid::new(4, 4, &tileset, &mut rng);
        grid.seed_cell(0, 0, Tile::DeepWater, &tileset);

        let recovered = fill_uncollapsed(&mut grid, &tileset);
        assert_eq!(recovered, 15);
        assert!(grid.is_fully_collapsed());
        assert_eq!(grid.cell(0, 0).and_then(|c| c.tile()), Some(Tile::DeepWater));
    }

    #[test]
    fn recovered_tiles_come_from_the_fallback_set() {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(7);
        let mut grid = Grid::new(3, 3, &tileset, &mut rng);

        fill_uncollapsed(&mut grid, &tileset);
        for y in 0..3 {
            for x in 0..3 {
                let tile = grid.cell(x, y).and_then(|c| c.tile());
                assert!(tile.is_some_and(|t| FALLBACK_TILES.contains(&t)));
            }
        }
    }
}
