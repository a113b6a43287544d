//! Worklist constraint propagation
//!
//! After any cell's possibilities shrink, neighbors are transitively
//! restricted to the union of tiles permitted by the remaining
//! possibilities. The worklist is FIFO and neighbors are visited in fixed
//! N, E, S, W order, which keeps the restriction order — and therefore the
//! whole solve — deterministic.

use crate::algorithm::mask::TileMask;
use crate::algorithm::snapshot::ChangeJournal;
use crate::catalog::tileset::TileSet;
use crate::catalog::tiles::Tile;
use crate::spatial::grid::Grid;
use std::collections::VecDeque;

/// Result of a propagation pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// All restrictions applied without emptying any cell
    Settled,
    /// A cell ran out of possibilities
    Contradiction {
        /// x coordinate of the emptied cell
        x: usize,
        /// y coordinate of the emptied cell
        y: usize,
    },
}

/// AC-3 style propagator with a reusable worklist
///
/// The `in_queue` set suppresses duplicate enqueues; it is cleared at the
/// start of every pass so an aborted contradiction run cannot poison the
/// next one.
pub struct Propagator {
    queue: VecDeque<(usize, usize)>,
    in_queue: Vec<bool>,
    width: usize,
}

impl Propagator {
    /// Create a propagator for a grid of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            in_queue: vec![false; width * height],
            width,
        }
    }

    /// Propagate restrictions outward from the given seed coordinates
    ///
    /// Changed cells are recorded in the journal (when one is supplied)
    /// before they are modified, so a later backtrack can restore them.
    pub fn propagate(
        &mut self,
        grid: &mut Grid,
        tileset: &TileSet,
        seeds: &[(usize, usize)],
        mut journal: Option<&mut ChangeJournal>,
    ) -> Propagation {
        self.reset();
        for &(x, y) in seeds {
            self.enqueue(x, y);
        }

        while let Some((x, y)) = self.queue.pop_front() {
            self.mark_dequeued(x, y);

            let allowed = match grid.cell(x, y) {
                Some(cell) => union_of_permitted(cell.possibilities(), tileset),
                None => continue,
            };

            for ((nx, ny), _direction) in grid.neighbors(x, y) {
                if let Some(journal) = journal.as_mut() {
                    journal.record(grid, nx, ny);
                }

                let Some(neighbor) = grid.cell_mut(nx, ny) else {
                    continue;
                };
                let result = neighbor.constrain(&allowed);
                if !result.changed {
                    continue;
                }
                if !neighbor.is_valid() {
                    return Propagation::Contradiction { x: nx, y: ny };
                }
                if let Some(tile) = result.auto_collapsed {
                    let kind = tileset.kind(tile).clone();
                    if let Some(cell) = grid.cell_mut(nx, ny) {
                        cell.apply_kind(&kind);
                    }
                }
                self.enqueue(nx, ny);
            }
        }

        Propagation::Settled
    }

    /// Propagate from every collapsed cell, for grids seeded before solving
    pub fn propagate_all(
        &mut self,
        grid: &mut Grid,
        tileset: &TileSet,
        journal: Option<&mut ChangeJournal>,
    ) -> Propagation {
        let mut seeds = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.cell(x, y).is_some_and(|c| c.collapsed()) {
                    seeds.push((x, y));
                }
            }
        }
        self.propagate(grid, tileset, &seeds, journal)
    }

    fn reset(&mut self) {
        while let Some((x, y)) = self.queue.pop_front() {
            self.mark_dequeued(x, y);
        }
    }

    fn enqueue(&mut self, x: usize, y: usize) {
        let slot = y * self.width + x;
        if let Some(flag) = self.in_queue.get_mut(slot) {
            if !*flag {
                *flag = true;
                self.queue.push_back((x, y));
            }
        }
    }

    fn mark_dequeued(&mut self, x: usize, y: usize) {
        if let Some(flag) = self.in_queue.get_mut(y * self.width + x) {
            *flag = false;
        }
    }
}

/// Union of the adjacency rows of every tile in a possibility set
fn union_of_permitted(possibilities: &TileMask, tileset: &TileSet) -> TileMask {
    let mut allowed = TileMask::new();
    for tile in possibilities.iter() {
        if let Some(row) = tileset.adjacency_mask(tile) {
            allowed.union_with(row);
        }
    }
    allowed
}

/// Whether placing `tile` at `(x, y)` respects the current neighborhood
///
/// Collapsed neighbors must each permit an edge to `tile`; uncollapsed
/// neighbors must retain at least one possibility compatible with it.
pub fn is_valid_placement(
    grid: &Grid,
    tileset: &TileSet,
    x: usize,
    y: usize,
    tile: Tile,
) -> bool {
    let Some(row) = tileset.adjacency_mask(tile) else {
        return false;
    };

    for ((nx, ny), _direction) in grid.neighbors(x, y) {
        let Some(neighbor) = grid.cell(nx, ny) else {
            continue;
        };
        match neighbor.tile() {
            Some(placed) => {
                if !tileset.can_be_adjacent(tile, placed) {
                    return false;
                }
            }
            None => {
                if neighbor.possibilities().intersection(row).is_empty() {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{Propagation, Propagator, is_valid_placement};
    use crate::catalog::tileset::{CatalogMode, TileSet};
    use crate::catalog::tiles::Tile;
    use crate::math::sampling::RandomSource;
    use crate::spatial::grid::Grid;

    fn fresh(width: usize, height: usize) -> (Grid, TileSet) {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(1);
        (Grid::new(width, height, &tileset, &mut rng), tileset)
    }

    #[test]
    fn seeding_deep_water_restricts_the_neighborhood() {
        let (mut grid, tileset) = fresh(3, 3);
        grid.seed_cell(1, 1, Tile::DeepWater, &tileset);

        let mut propagator = Propagator::new(3, 3);
        let outcome = propagator.propagate_all(&mut grid, &tileset, None);
        assert_eq!(outcome, Propagation::Settled);

        // Deep water only borders water, so every 4-neighbor is now water-only
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            let possibilities = grid
                .cell(x, y)
                .map(|c| c.possibilities().to_vec())
                .unwrap_or_default();
            assert!(
                possibilities
                    .iter()
                    .all(|t| matches!(t, Tile::DeepWater | Tile::Water)),
                "({x},{y}) kept {possibilities:?}"
            );
        }
    }

    #[test]
    fn incompatible_seeds_contradict() {
        let (mut grid, tileset) = fresh(2, 2);
        grid.seed_cell(0, 0, Tile::DeepWater, &tileset);
        grid.seed_cell(0, 1, Tile::Peak, &tileset);

        let mut propagator = Propagator::new(2, 2);
        let outcome = propagator.propagate_all(&mut grid, &tileset, None);
        assert!(matches!(outcome, Propagation::Contradiction { .. }));
    }

    #[test]
    fn placement_validity_consults_collapsed_neighbors() {
        let (mut grid, tileset) = fresh(3, 1);
        grid.seed_cell(0, 0, Tile::DeepWater, &tileset);

        assert!(is_valid_placement(&grid, &tileset, 1, 0, Tile::Water));
        assert!(!is_valid_placement(&grid, &tileset, 1, 0, Tile::Grass));
    }
}
