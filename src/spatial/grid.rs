//! Fixed-size cell grid with neighborhood lookup and regional weight edits

use crate::catalog::tiles::Tile;
use crate::catalog::tileset::TileSet;
use crate::math::sampling::RandomSource;
use crate::spatial::cell::Cell;
use ndarray::Array2;
use std::ops::Range;

/// Span of entropy tie-break noise drawn per cell at construction
pub const NOISE_SPAN: f64 = 1e-3;

/// Cardinal direction toward a 4-neighbor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward decreasing y
    North,
    /// Toward increasing x
    East,
    /// Toward increasing y
    South,
    /// Toward decreasing x
    West,
}

/// Fixed neighbor visitation order for deterministic propagation
pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Unit offset of this direction as `(dx, dy)`
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// A rectangular region defined by row and column ranges
#[derive(Clone, Debug)]
pub struct Region {
    /// Row indices range
    pub rows: Range<usize>,
    /// Column indices range
    pub cols: Range<usize>,
}

impl Region {
    /// Create a new region from row and column ranges
    pub const fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self { rows, cols }
    }

    /// Region covering an inclusive coordinate rectangle, clipped to a grid
    pub fn clipped(
        x_min: usize,
        x_max: usize,
        y_min: usize,
        y_max: usize,
        width: usize,
        height: usize,
    ) -> Self {
        let row_end = y_max.saturating_add(1).min(height);
        let col_end = x_max.saturating_add(1).min(width);
        Self {
            rows: y_min.min(height)..row_end,
            cols: x_min.min(width)..col_end,
        }
    }

    /// Center coordinate of the region as `(x, y)`
    pub fn center(&self) -> (usize, usize) {
        let cx = self.cols.start + self.cols.len().saturating_sub(1) / 2;
        let cy = self.rows.start + self.rows.len().saturating_sub(1) / 2;
        (cx, cy)
    }
}

/// W×H array of cells with neighborhood and bulk weight operations
#[derive(Debug)]
pub struct Grid {
    cells: Array2<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid with every cell holding the full member superposition
    ///
    /// Tie-break noise is drawn from the engine RNG in row-major scan order,
    /// which makes entropy comparisons reproducible for a fixed seed.
    pub fn new(width: usize, height: usize, tileset: &TileSet, rng: &mut RandomSource) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for _y in 0..height {
            for _x in 0..width {
                let noise = rng.unit() * NOISE_SPAN;
                cells.push(Cell::new(
                    tileset.member_mask().clone(),
                    tileset.base_weights().to_vec(),
                    noise,
                ));
            }
        }

        let cells = Array2::from_shape_vec((height, width), cells)
            .unwrap_or_else(|_| Array2::from_elem((0, 0), Cell::new(Default::default(), Vec::new(), 0.0)));

        Self {
            cells,
            width,
            height,
        }
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn total_cells(&self) -> usize {
        self.width * self.height
    }

    /// Borrow the cell at `(x, y)` if in bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get([y, x])
    }

    /// Mutably borrow the cell at `(x, y)` if in bounds
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.cells.get_mut([y, x])
    }

    /// In-bounds 4-neighbors of `(x, y)` in fixed N, E, S, W order
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<((usize, usize), Direction)> {
        let mut found = Vec::with_capacity(4);
        for direction in DIRECTIONS {
            let (dx, dy) = direction.offset();
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx >= 0 && ny >= 0 && (nx as usize) < self.width && (ny as usize) < self.height {
                found.push(((nx as usize, ny as usize), direction));
            }
        }
        found
    }

    /// Count of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.collapsed()).count()
    }

    /// Whether every cell has collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::collapsed)
    }

    /// Force-collapse a cell to a fixed tile, seeding the solve
    ///
    /// Out-of-bounds coordinates are ignored; seed positions are validated
    /// upstream against the world seed.
    pub fn seed_cell(&mut self, x: usize, y: usize, tile: Tile, tileset: &TileSet) {
        let kind = tileset.kind(tile).clone();
        if let Some(cell) = self.cell_mut(x, y) {
            cell.force_collapse(tile);
            cell.apply_kind(&kind);
        }
    }

    /// Overwrite a collapsed cell during stamping or carving
    ///
    /// Bounds-checked: out-of-bounds writes are silently dropped so stamp
    /// patterns can hang over the map edge. Adjacency is deliberately not
    /// consulted; the later phases are post-solve mutations.
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile, tileset: &TileSet) {
        let kind = tileset.kind(tile).clone();
        if let Some(cell) = self.cell_mut(x, y) {
            cell.force_collapse(tile);
            cell.apply_kind(&kind);
        }
    }

    /// Multiply weights for selected tiles across the uncollapsed cells of a region
    ///
    /// Factors below one suppress a tile, factors above one favor it; a
    /// multiplier never removes a tile from the possibility set.
    pub fn apply_region_modifiers(&mut self, region: &Region, multipliers: &[(Tile, f64)]) {
        for y in region.rows.clone() {
            for x in region.cols.clone() {
                if let Some(cell) = self.cells.get_mut([y, x]) {
                    if cell.collapsed() {
                        continue;
                    }
                    for &(tile, factor) in multipliers {
                        cell.scale_weight(tile, factor);
                    }
                }
            }
        }
    }

    /// Replace weights for selected tiles on one uncollapsed cell
    ///
    /// Used by the slider overrides, which set absolute weights rather than
    /// scaling whatever the zone biases left behind.
    pub fn set_weights(&mut self, x: usize, y: usize, assignments: &[(Tile, f64)]) {
        if let Some(cell) = self.cell_mut(x, y) {
            if cell.collapsed() {
                return;
            }
            for &(tile, weight) in assignments {
                cell.set_weight(tile, weight);
            }
        }
    }
}
