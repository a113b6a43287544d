//! Solver loop: entropy selection, weighted collapse, propagation, backtracking
//!
//! The solver repeatedly collapses the lowest-entropy cell and propagates
//! the consequences. Contradictions restore the most recent journal frame
//! and ban the failed choice; an emptied cell after a ban cascades to the
//! next frame. The loop reports progress at a bounded rate and polls the
//! cancel token at every checkpoint.

use crate::algorithm::propagation::{Propagation, Propagator};
use crate::algorithm::selection::EntropyQueue;
use crate::algorithm::snapshot::ChangeJournal;
use crate::catalog::tileset::TileSet;
use crate::io::progress::{CancelToken, GenPhase, ProgressReporter};
use crate::math::sampling::RandomSource;
use crate::spatial::grid::Grid;
use std::time::Duration;

/// Terminal state of a solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every cell collapsed consistently
    Succeeded,
    /// The backtrack budget ran out; recovery must finish the grid
    Exhausted,
    /// The caller cancelled mid-solve; the grid is partial
    Cancelled,
}

/// Outcome and counters from one solve
#[derive(Clone, Copy, Debug)]
pub struct SolveReport {
    /// Terminal state
    pub status: SolveStatus,
    /// Collapse steps attempted
    pub iterations: usize,
    /// Contradictions recovered by restoring a snapshot
    pub backtracks: usize,
}

/// Wave function collapse driver over a prepared grid
pub struct Solver<'a> {
    grid: &'a mut Grid,
    tileset: &'a TileSet,
    rng: &'a mut RandomSource,
    max_backtracks: usize,
    animation_delay: Option<Duration>,
}

impl<'a> Solver<'a> {
    /// Create a solver over a grid whose weights and seeds are in place
    pub const fn new(
        grid: &'a mut Grid,
        tileset: &'a TileSet,
        rng: &'a mut RandomSource,
        max_backtracks: usize,
        animation_delay: Option<Duration>,
    ) -> Self {
        Self {
            grid,
            tileset,
            rng,
            max_backtracks,
            animation_delay,
        }
    }

    /// Run to completion, exhaustion, or cancellation
    pub fn run(&mut self, reporter: &mut ProgressReporter, cancel: &CancelToken) -> SolveReport {
        let width = self.grid.width();
        let height = self.grid.height();
        let total = self.grid.total_cells().max(1);

        let mut queue = EntropyQueue::new();
        queue.fill(self.grid);
        let mut propagator = Propagator::new(width, height);
        let mut journal = ChangeJournal::new(width, height, self.max_backtracks.max(1));

        let mut iterations = 0;
        let mut backtracks = 0;

        loop {
            if cancel.is_cancelled() {
                return SolveReport {
                    status: SolveStatus::Cancelled,
                    iterations,
                    backtracks,
                };
            }

            let collapsed = self.grid.collapsed_count();
            reporter.tick(GenPhase::Terrain, collapsed as f64 / total as f64, || {
                format!("Collapsing terrain ({collapsed}/{total} cells)")
            });

            let Some((x, y)) = queue.pop_ready(self.grid) else {
                if self.grid.is_fully_collapsed() {
                    return SolveReport {
                        status: SolveStatus::Succeeded,
                        iterations,
                        backtracks,
                    };
                }
                // Stale entries can drain the heap while work remains
                queue.fill(self.grid);
                continue;
            };

            if let Some(delay) = self.animation_delay {
                std::thread::sleep(delay);
            }

            iterations += 1;
            journal.begin_frame(x, y);
            journal.record(self.grid, x, y);

            let chosen = self
                .grid
                .cell_mut(x, y)
                .and_then(|cell| cell.collapse(self.rng));
            let Some(chosen) = chosen else {
                // The queued cell emptied underneath us; treat as contradiction
                backtracks += 1;
                if backtracks > self.max_backtracks
                    || !self.unwind(&mut journal, &mut queue)
                {
                    return SolveReport {
                        status: SolveStatus::Exhausted,
                        iterations,
                        backtracks,
                    };
                }
                continue;
            };
            journal.set_chosen(chosen);
            let kind = self.tileset.kind(chosen).clone();
            if let Some(cell) = self.grid.cell_mut(x, y) {
                cell.apply_kind(&kind);
            }

            match propagator.propagate(self.grid, self.tileset, &[(x, y)], Some(&mut journal)) {
                Propagation::Settled => {
                    for (tx, ty) in journal.top_touched() {
                        queue.push(self.grid, tx, ty);
                    }
                }
                Propagation::Contradiction { .. } => {
                    backtracks += 1;
                    if backtracks > self.max_backtracks
                        || !self.unwind(&mut journal, &mut queue)
                    {
                        return SolveReport {
                            status: SolveStatus::Exhausted,
                            iterations,
                            backtracks,
                        };
                    }
                }
            }
        }
    }

    /// Restore the most recent frame and ban its choice, cascading while
    /// the restored cell has nothing left to try
    ///
    /// Returns false when the journal runs dry, which means the search
    /// space above the contradiction is exhausted.
    fn unwind(&mut self, journal: &mut ChangeJournal, queue: &mut EntropyQueue) -> bool {
        loop {
            let Some(frame) = journal.pop_frame() else {
                return false;
            };
            let (fx, fy) = (frame.x, frame.y);
            let banned = frame.chosen;

            let restored = frame.restore(self.grid);

            if let Some(tile) = banned {
                if let Some(cell) = self.grid.cell_mut(fx, fy) {
                    cell.ban(tile);
                }
            }

            for (rx, ry) in restored {
                queue.push(self.grid, rx, ry);
            }

            let viable = self.grid.cell(fx, fy).is_some_and(|c| c.is_valid());
            if viable {
                queue.push(self.grid, fx, fy);
                return true;
            }
            // Nothing left at this frame's cell: cascade to the next frame
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SolveStatus, Solver};
    use crate::algorithm::propagation::Propagator;
    use crate::catalog::tileset::{CatalogMode, TileSet};
    use crate::io::progress::{CancelToken, ProgressReporter};
    use crate::math::sampling::RandomSource;
    use crate::spatial::grid::Grid;

    #[test]
    fn small_open_grid_solves_cleanly() {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(1);
        let mut grid = Grid::new(4, 4, &tileset, &mut rng);

        let mut reporter = ProgressReporter::new(None);
        let cancel = CancelToken::new();
        let report = Solver::new(&mut grid, &tileset, &mut rng, 500, None)
            .run(&mut reporter, &cancel);

        assert_eq!(report.status, SolveStatus::Succeeded);
        assert!(grid.is_fully_collapsed());
        assert!(report.iterations >= 1);
    }

    #[test]
    fn solved_grids_respect_adjacency_everywhere() {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(21);
        let mut grid = Grid::new(8, 8, &tileset, &mut rng);

        let mut reporter = ProgressReporter::new(None);
        let cancel = CancelToken::new();
        let report = Solver::new(&mut grid, &tileset, &mut rng, 500, None)
            .run(&mut reporter, &cancel);
        assert_eq!(report.status, SolveStatus::Succeeded);

        for y in 0..8 {
            for x in 0..8 {
                let tile = grid.cell(x, y).and_then(|c| c.tile());
                for ((nx, ny), _) in grid.neighbors(x, y) {
                    let neighbor = grid.cell(nx, ny).and_then(|c| c.tile());
                    if let (Some(a), Some(b)) = (tile, neighbor) {
                        assert!(
                            tileset.can_be_adjacent(a, b),
                            "({x},{y})={a} against ({nx},{ny})={b}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn cancellation_stops_the_solve() {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(4);
        let mut grid = Grid::new(6, 6, &tileset, &mut rng);

        let mut reporter = ProgressReporter::new(None);
        let cancel = CancelToken::new();
        cancel.cancel();

        let report = Solver::new(&mut grid, &tileset, &mut rng, 500, None)
            .run(&mut reporter, &cancel);
        assert_eq!(report.status, SolveStatus::Cancelled);
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn conflicting_seeds_exhaust_the_budget() {
        let tileset = TileSet::build(CatalogMode::TerrainOnly)
            .unwrap_or_else(|e| unreachable!("terrain catalog must build: {e}"));
        let mut rng = RandomSource::new(3);
        let mut grid = Grid::new(4, 4, &tileset, &mut rng);

        // Adjacent seeds with no permitted edge poison the neighborhood
        grid.seed_cell(0, 0, crate::catalog::tiles::Tile::DeepWater, &tileset);
        grid.seed_cell(0, 1, crate::catalog::tiles::Tile::Peak, &tileset);

        let mut propagator = Propagator::new(4, 4);
        let pre = propagator.propagate_all(&mut grid, &tileset, None);
        assert!(matches!(
            pre,
            crate::algorithm::propagation::Propagation::Contradiction { .. }
        ));
    }
}
