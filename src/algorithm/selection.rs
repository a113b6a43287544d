//! Entropy-ordered cell selection
//!
//! A min-heap keyed by `(entropy, y, x)` with lazy deletion: entries carry
//! the cell version they were computed from, and entries whose cell has
//! since collapsed or changed are skipped on pop. Tie-break noise is baked
//! into the entropy value itself, drawn once per cell at grid construction.

use crate::spatial::grid::Grid;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// One queued candidate for collapse
#[derive(Debug)]
struct Entry {
    entropy: f64,
    version: u64,
    x: usize,
    y: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Coordinates as final keys keep ordering total and deterministic
        self.entropy
            .total_cmp(&other.entropy)
            .then_with(|| self.y.cmp(&other.y))
            .then_with(|| self.x.cmp(&other.x))
    }
}

/// Min-heap of uncollapsed cells with stale-entry skipping
#[derive(Debug, Default)]
pub struct EntropyQueue {
    heap: BinaryHeap<Reverse<Entry>>,
}

impl EntropyQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a refreshed entry for `(x, y)` if the cell is uncollapsed
    pub fn push(&mut self, grid: &Grid, x: usize, y: usize) {
        if let Some(cell) = grid.cell(x, y) {
            if !cell.collapsed() {
                self.heap.push(Reverse(Entry {
                    entropy: cell.entropy(),
                    version: cell.version(),
                    x,
                    y,
                }));
            }
        }
    }

    /// Queue every uncollapsed cell in row-major scan order
    pub fn fill(&mut self, grid: &Grid) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                self.push(grid, x, y);
            }
        }
    }

    /// Pop the lowest-entropy cell that is still current
    ///
    /// Entries for collapsed cells and entries whose cached version no
    /// longer matches the cell are discarded on the way.
    pub fn pop_ready(&mut self, grid: &Grid) -> Option<(usize, usize)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            let current = grid
                .cell(entry.x, entry.y)
                .is_some_and(|cell| !cell.collapsed() && cell.version() == entry.version);
            if current {
                return Some((entry.x, entry.y));
            }
        }
        None
    }

    /// Number of queued entries, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no entries remain
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::EntropyQueue;
    use crate::catalog::tileset::{CatalogMode, TileSet};
    use crate::catalog::tiles::Tile;
    use crate::math::sampling::RandomSource;
    use crate::spatial::grid::Grid;

    fn fresh() -> (Grid, TileSet) {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(8);
        (Grid::new(3, 3, &tileset, &mut rng), tileset)
    }

    #[test]
    fn restricted_cells_pop_before_open_ones() {
        let (mut grid, _tileset) = fresh();

        // Constrain one cell to a pair of tiles so its entropy drops
        if let Some(cell) = grid.cell_mut(2, 1) {
            let narrow = [Tile::Grass, Tile::Meadow].into_iter().collect();
            let _ = cell.constrain(&narrow);
        }

        let mut queue = EntropyQueue::new();
        queue.fill(&grid);
        assert_eq!(queue.pop_ready(&grid), Some((2, 1)));
    }

    #[test]
    fn stale_entries_are_skipped() {
        let (mut grid, tileset) = fresh();

        let mut queue = EntropyQueue::new();
        queue.fill(&grid);

        // Collapsing a cell invalidates its queued entry
        grid.seed_cell(0, 0, Tile::Grass, &tileset);
        let mut seen = Vec::new();
        while let Some(coords) = queue.pop_ready(&grid) {
            seen.push(coords);
        }
        assert!(!seen.contains(&(0, 0)));
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn empty_queue_pops_nothing() {
        let (grid, _tileset) = fresh();
        let mut queue = EntropyQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pop_ready(&grid), None);
        assert_eq!(queue.len(), 0);
    }
}
