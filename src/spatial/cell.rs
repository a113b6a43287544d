//! Superposition state for a single grid position

use crate::algorithm::mask::TileMask;
use crate::catalog::tiles::{Tile, TileKind};
use crate::math::entropy::weighted_shannon;
use crate::math::sampling::RandomSource;

/// Outcome of constraining a cell against an allowed set
#[derive(Debug, PartialEq, Eq)]
pub struct ConstrainResult {
    /// Whether any possibility was removed
    pub changed: bool,
    /// The tile the cell auto-collapsed to, if the set became a singleton
    pub auto_collapsed: Option<Tile>,
}

/// Saved cell state for backtracking
///
/// Weights are not captured: they are fixed before the solve begins and
/// never change while snapshots are live.
#[derive(Clone, Debug)]
pub struct CellSnapshot {
    possibilities: TileMask,
    collapsed: bool,
    tile: Option<Tile>,
    walkable: bool,
    height: u8,
}

/// A single grid position's superposition state
///
/// Holds the remaining possible tiles, the per-cell sampling weights, and a
/// stored tie-break noise term drawn once at grid construction. A version
/// counter is bumped on every possibility change so stale entropy-queue
/// entries can be skipped lazily.
#[derive(Clone, Debug)]
pub struct Cell {
    possibilities: TileMask,
    weights: Vec<f64>,
    noise: f64,
    version: u64,
    collapsed: bool,
    tile: Option<Tile>,
    walkable: bool,
    height: u8,
}

impl Cell {
    /// Create an uncollapsed cell with the given starting possibilities
    pub const fn new(possibilities: TileMask, weights: Vec<f64>, noise: f64) -> Self {
        Self {
            possibilities,
            weights,
            noise,
            version: 0,
            collapsed: false,
            tile: None,
            walkable: false,
            height: 0,
        }
    }

    /// Remaining possible tiles
    pub const fn possibilities(&self) -> &TileMask {
        &self.possibilities
    }

    /// Whether the cell has been reduced to a single tile
    pub const fn collapsed(&self) -> bool {
        self.collapsed
    }

    /// The chosen tile once collapsed
    pub const fn tile(&self) -> Option<Tile> {
        self.tile
    }

    /// Cached walkability of the chosen tile
    pub const fn walkable(&self) -> bool {
        self.walkable
    }

    /// Cached elevation step of the chosen tile
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Stored tie-break noise in `[0, 1e-3)`
    pub const fn noise(&self) -> f64 {
        self.noise
    }

    /// Version counter, bumped on every possibility change
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Sampling weight for one tile
    pub fn weight(&self, tile: Tile) -> f64 {
        self.weights.get(tile.index()).copied().unwrap_or(0.0)
    }

    /// Replace the sampling weight for one tile
    pub fn set_weight(&mut self, tile: Tile, weight: f64) {
        if let Some(slot) = self.weights.get_mut(tile.index()) {
            *slot = weight;
        }
    }

    /// Multiply the sampling weight for one tile
    pub fn scale_weight(&mut self, tile: Tile, factor: f64) {
        if let Some(slot) = self.weights.get_mut(tile.index()) {
            *slot *= factor;
        }
    }

    /// Whether the cell still has at least one possibility
    pub fn is_valid(&self) -> bool {
        !self.possibilities.is_empty()
    }

    /// Weighted Shannon entropy of the remaining possibilities
    ///
    /// Collapsed and singleton cells report exactly zero so they sort ahead
    /// of everything else; all other cells add the stored noise term to
    /// break ties deterministically under a fixed RNG seed.
    pub fn entropy(&self) -> f64 {
        if self.collapsed || self.possibilities.count() <= 1 {
            return 0.0;
        }
        let h = weighted_shannon(self.possibilities.iter().map(|t| self.weight(t)));
        h + self.noise
    }

    /// Collapse by weighted sample over the remaining possibilities
    ///
    /// Falls back to a uniform draw when every remaining weight is zero;
    /// exactly one random value is consumed either way. Returns `None`
    /// only for a contradictory (empty) cell.
    pub fn collapse(&mut self, rng: &mut RandomSource) -> Option<Tile> {
        let candidates = self.possibilities.to_vec();
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<f64> = candidates.iter().map(|t| self.weight(*t)).collect();
        let choice = rng.weighted_choice(&weights);
        let tile = candidates.get(choice).copied()?;
        self.force_collapse(tile);
        Some(tile)
    }

    /// Unconditionally collapse to the given tile
    ///
    /// Used for seeding from the world seed and for post-solve stamping;
    /// ignores prior possibilities.
    pub fn force_collapse(&mut self, tile: Tile) {
        self.possibilities = TileMask::new();
        self.possibilities.insert(tile);
        self.collapsed = true;
        self.tile = Some(tile);
        self.version += 1;
    }

    /// Remove tiles not present in `allowed`
    ///
    /// Auto-collapses when exactly one possibility remains. Reports whether
    /// anything changed so the propagator can decide what to enqueue.
    pub fn constrain(&mut self, allowed: &TileMask) -> ConstrainResult {
        let before = self.possibilities.count();
        self.possibilities.intersect_with(allowed);
        let after = self.possibilities.count();

        if after == before {
            return ConstrainResult {
                changed: false,
                auto_collapsed: None,
            };
        }

        self.version += 1;
        let mut auto_collapsed = None;
        if after == 1 && !self.collapsed {
            if let Some(tile) = self.possibilities.sole() {
                self.collapsed = true;
                self.tile = Some(tile);
                auto_collapsed = Some(tile);
            }
        }

        ConstrainResult {
            changed: true,
            auto_collapsed,
        }
    }

    /// Remove a single failed possibility after a backtrack
    ///
    /// Never auto-collapses; a remaining singleton is picked up by the
    /// entropy queue on the next selection step.
    pub fn ban(&mut self, tile: Tile) {
        if self.possibilities.contains(tile) {
            self.possibilities.remove(tile);
            self.version += 1;
        }
    }

    /// Refresh the cached walkable/height fields from the catalog entry
    pub const fn apply_kind(&mut self, kind: &TileKind) {
        self.walkable = kind.walkable;
        self.height = kind.height;
    }

    /// Capture the mutable state touched by solving, for the undo journal
    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            possibilities: self.possibilities.clone(),
            collapsed: self.collapsed,
            tile: self.tile,
            walkable: self.walkable,
            height: self.height,
        }
    }

    /// Restore a captured state, invalidating stale queue entries
    pub fn restore(&mut self, snapshot: CellSnapshot) {
        self.possibilities = snapshot.possibilities;
        self.collapsed = snapshot.collapsed;
        self.tile = snapshot.tile;
        self.walkable = snapshot.walkable;
        self.height = snapshot.height;
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;
    use crate::algorithm::mask::TileMask;
    use crate::catalog::tiles::{TILE_COUNT, Tile};
    use crate::math::sampling::RandomSource;

    fn cell_over(tiles: &[Tile]) -> Cell {
        let possibilities: TileMask = tiles.iter().copied().collect();
        let mut weights = vec![0.0; TILE_COUNT];
        for tile in tiles {
            if let Some(slot) = weights.get_mut(tile.index()) {
                *slot = 1.0;
            }
        }
        Cell::new(possibilities, weights, 0.0005)
    }

    #[test]
    fn entropy_is_zero_once_collapsed() {
        let mut cell = cell_over(&[Tile::Grass, Tile::Forest]);
        assert!(cell.entropy() > 0.0);

        cell.force_collapse(Tile::Grass);
        assert!(cell.entropy().abs() < f64::EPSILON);
    }

    #[test]
    fn constrain_auto_collapses_singletons() {
        let mut cell = cell_over(&[Tile::Grass, Tile::Forest, Tile::Hills]);
        let allowed: TileMask = [Tile::Forest].into_iter().collect();

        let result = cell.constrain(&allowed);
        assert!(result.changed);
        assert_eq!(result.auto_collapsed, Some(Tile::Forest));
        assert!(cell.collapsed());
        assert_eq!(cell.tile(), Some(Tile::Forest));
    }

    #[test]
    fn constrain_reports_no_change_for_supersets() {
        let mut cell = cell_over(&[Tile::Grass, Tile::Forest]);
        let allowed: TileMask = [Tile::Grass, Tile::Forest, Tile::Hills].into_iter().collect();

        let result = cell.constrain(&allowed);
        assert!(!result.changed);
        assert!(!cell.collapsed());
    }

    #[test]
    fn collapse_respects_zeroed_weights() {
        let mut cell = cell_over(&[Tile::Grass, Tile::Water]);
        cell.set_weight(Tile::Water, 0.0);

        let mut rng = RandomSource::new(3);
        for _ in 0..8 {
            let mut fresh = cell.clone();
            assert_eq!(fresh.collapse(&mut rng), Some(Tile::Grass));
        }
    }

    #[test]
    fn ban_does_not_auto_collapse() {
        let mut cell = cell_over(&[Tile::Grass, Tile::Forest]);
        cell.ban(Tile::Forest);

        assert!(!cell.collapsed());
        assert_eq!(cell.possibilities().sole(), Some(Tile::Grass));
    }

    #[test]
    fn restore_rewinds_possibilities() {
        let mut cell = cell_over(&[Tile::Grass, Tile::Forest, Tile::Hills]);
        let saved = cell.snapshot();
        let version_before = cell.version();

        cell.force_collapse(Tile::Hills);
        cell.restore(saved);

        assert!(!cell.collapsed());
        assert_eq!(cell.possibilities().count(), 3);
        assert!(cell.version() > version_before);
    }
}
