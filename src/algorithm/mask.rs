use crate::catalog::tiles::{TILE_COUNT, Tile};
use bitvec::prelude::{BitVec, bitvec};
use std::fmt;

/// Fixed-width bitset over the tile enumeration
///
/// Tracks tile membership for possibility sets and adjacency rows. Bit
/// positions follow [`Tile::index`], so membership tests and set algebra
/// are O(1) word operations for the whole catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMask {
    bits: BitVec,
}

impl TileMask {
    /// Create a mask with no tiles present
    pub fn new() -> Self {
        Self {
            bits: bitvec![0; TILE_COUNT],
        }
    }

    /// Insert a tile
    pub fn insert(&mut self, tile: Tile) {
        self.bits.set(tile.index(), true);
    }

    /// Remove a tile
    pub fn remove(&mut self, tile: Tile) {
        self.bits.set(tile.index(), false);
    }

    /// Test tile membership
    pub fn contains(&self, tile: Tile) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Intersect this mask with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Union another mask into this one in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new mask containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The single member, if the set is a singleton
    pub fn sole(&self) -> Option<Tile> {
        if self.count() == 1 {
            self.bits.first_one().and_then(Tile::from_index)
        } else {
            None
        }
    }

    /// Iterate members in tile declaration order
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.bits.iter_ones().filter_map(Tile::from_index)
    }

    /// Extract all members as a vector in declaration order
    pub fn to_vec(&self) -> Vec<Tile> {
        self.iter().collect()
    }
}

impl Default for TileMask {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Tile> for TileMask {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut mask = Self::new();
        for tile in iter {
            mask.insert(tile);
        }
        mask
    }
}

impl fmt::Display for TileMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileMask({} tiles: {:?})", self.count(), self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::TileMask;
    use crate::catalog::tiles::Tile;

    #[test]
    fn insert_remove_contains() {
        let mut mask = TileMask::new();
        assert!(mask.is_empty());

        mask.insert(Tile::Grass);
        mask.insert(Tile::Water);
        assert!(mask.contains(Tile::Grass));
        assert!(!mask.contains(Tile::Forest));
        assert_eq!(mask.count(), 2);

        mask.remove(Tile::Grass);
        assert!(!mask.contains(Tile::Grass));
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn intersection_keeps_shared_members() {
        let a: TileMask = [Tile::Grass, Tile::Forest, Tile::Hills].into_iter().collect();
        let b: TileMask = [Tile::Forest, Tile::Hills, Tile::Peak].into_iter().collect();

        let shared = a.intersection(&b);
        assert_eq!(shared.to_vec(), vec![Tile::Forest, Tile::Hills]);
    }

    #[test]
    fn sole_identifies_singletons() {
        let mut mask = TileMask::new();
        assert_eq!(mask.sole(), None);

        mask.insert(Tile::Marsh);
        assert_eq!(mask.sole(), Some(Tile::Marsh));

        mask.insert(Tile::Swamp);
        assert_eq!(mask.sole(), None);
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let mask: TileMask = [Tile::Peak, Tile::DeepWater, Tile::Grass].into_iter().collect();
        assert_eq!(
            mask.to_vec(),
            vec![Tile::DeepWater, Tile::Grass, Tile::Peak]
        );
    }
}
