//! Undo journal for backtracking
//!
//! Rather than deep-copying the grid per collapse, the solver keeps one
//! frame per step holding the prior state of only the cells that step
//! touched. Restoring replays a frame's records in reverse. Frame count is
//! capped at the backtrack budget; older frames can never be reached by a
//! backtrack and are dropped from the front.

use crate::spatial::cell::CellSnapshot;
use crate::spatial::grid::Grid;
use crate::catalog::tiles::Tile;
use std::collections::VecDeque;

/// Saved state of one touched cell
#[derive(Debug)]
struct CellRecord {
    x: usize,
    y: usize,
    state: CellSnapshot,
}

/// Undo information for a single collapse step
#[derive(Debug)]
pub struct Frame {
    /// x coordinate of the collapsed cell
    pub x: usize,
    /// y coordinate of the collapsed cell
    pub y: usize,
    /// Tile chosen at this step, banned again on restore
    pub chosen: Option<Tile>,
    records: Vec<CellRecord>,
}

impl Frame {
    /// Coordinates of every cell this frame touched
    pub fn touched(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.records.iter().map(|r| (r.x, r.y))
    }

    /// Write the saved states back onto the grid in reverse record order
    pub fn restore(self, grid: &mut Grid) -> Vec<(usize, usize)> {
        let mut coords = Vec::with_capacity(self.records.len());
        for record in self.records.into_iter().rev() {
            if let Some(cell) = grid.cell_mut(record.x, record.y) {
                cell.restore(record.state);
            }
            coords.push((record.x, record.y));
        }
        coords
    }
}

/// Bounded stack of per-step diff frames
#[derive(Debug)]
pub struct ChangeJournal {
    frames: VecDeque<Frame>,
    stamps: Vec<u64>,
    step: u64,
    width: usize,
    capacity: usize,
}

impl ChangeJournal {
    /// Create a journal for a grid of the given dimensions
    ///
    /// `capacity` bounds the retained frames and should match the solver's
    /// backtrack budget.
    pub fn new(width: usize, height: usize, capacity: usize) -> Self {
        Self {
            frames: VecDeque::new(),
            stamps: vec![0; width * height],
            step: 0,
            width,
            capacity: capacity.max(1),
        }
    }

    /// Open a frame for the collapse about to happen at `(x, y)`
    pub fn begin_frame(&mut self, x: usize, y: usize) {
        self.step += 1;
        self.frames.push_back(Frame {
            x,
            y,
            chosen: None,
            records: Vec::new(),
        });
        if self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
    }

    /// Note the tile the open frame collapsed to
    pub fn set_chosen(&mut self, tile: Tile) {
        if let Some(frame) = self.frames.back_mut() {
            frame.chosen = Some(tile);
        }
    }

    /// Save a cell's current state into the open frame, once per step
    pub fn record(&mut self, grid: &Grid, x: usize, y: usize) {
        let slot = y * self.width + x;
        let fresh = self.stamps.get(slot).copied() != Some(self.step);
        if !fresh {
            return;
        }
        if let Some(stamp) = self.stamps.get_mut(slot) {
            *stamp = self.step;
        }
        if let (Some(cell), Some(frame)) = (grid.cell(x, y), self.frames.back_mut()) {
            frame.records.push(CellRecord {
                x,
                y,
                state: cell.snapshot(),
            });
        }
    }

    /// Coordinates touched by the most recent frame
    pub fn top_touched(&self) -> Vec<(usize, usize)> {
        self.frames
            .back()
            .map(|frame| frame.touched().collect())
            .unwrap_or_default()
    }

    /// Pop the most recent frame for restoration
    pub fn pop_frame(&mut self) -> Option<Frame> {
        self.frames.pop_back()
    }

    /// Number of retained frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::ChangeJournal;
    use crate::catalog::tileset::{CatalogMode, TileSet};
    use crate::catalog::tiles::Tile;
    use crate::math::sampling::RandomSource;
    use crate::spatial::grid::Grid;

    fn fresh() -> (Grid, TileSet) {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(2);
        (Grid::new(3, 3, &tileset, &mut rng), tileset)
    }

    #[test]
    fn restore_rewinds_a_seeded_cell() {
        let (mut grid, tileset) = fresh();

        let mut journal = ChangeJournal::new(3, 3, 8);
        journal.begin_frame(1, 1);
        journal.record(&grid, 1, 1);
        journal.set_chosen(Tile::Peak);

        grid.seed_cell(1, 1, Tile::Peak, &tileset);
        assert!(grid.cell(1, 1).is_some_and(|c| c.collapsed()));

        let frame = journal.pop_frame();
        assert!(frame.is_some());
        if let Some(frame) = frame {
            assert_eq!(frame.chosen, Some(Tile::Peak));
            frame.restore(&mut grid);
        }
        assert!(grid.cell(1, 1).is_some_and(|c| !c.collapsed()));
    }

    #[test]
    fn records_deduplicate_within_a_frame() {
        let (grid, _tileset) = fresh();

        let mut journal = ChangeJournal::new(3, 3, 8);
        journal.begin_frame(0, 0);
        journal.record(&grid, 0, 0);
        journal.record(&grid, 0, 0);
        journal.record(&grid, 2, 2);

        assert_eq!(journal.top_touched().len(), 2);
    }

    #[test]
    fn frame_count_is_capped() {
        let (grid, _tileset) = fresh();

        let mut journal = ChangeJournal::new(3, 3, 2);
        for i in 0..5 {
            journal.begin_frame(i % 3, 0);
            journal.record(&grid, i % 3, 0);
        }
        assert_eq!(journal.depth(), 2);
    }
}
