//! Validated tile set construction and adjacency queries
//!
//! A [`TileSet`] is built once per generation run. Construction walks the
//! declared adjacency tables, verifies that every declaration has its
//! mirror and that every weight is positive, and precomputes one adjacency
//! bitmask per tile for the propagator's hot path.

use crate::algorithm::mask::TileMask;
use crate::catalog::adjacency::{structure_links, terrain_neighbors};
use crate::catalog::tiles::{ALL_TILES, TILE_COUNT, Tile, TileKind};
use crate::io::error::{GenError, Result};
use std::collections::BTreeMap;

/// Which slice of the catalog a tile set exposes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogMode {
    /// Terrain tiles only, with the dense relation used by the solver
    TerrainOnly,
    /// Terrain plus structures, used for lookups by the later phases
    Full,
}

/// Immutable catalog of tile kinds, weights, and the adjacency relation
#[derive(Debug)]
pub struct TileSet {
    mode: CatalogMode,
    members: Vec<Tile>,
    member_mask: TileMask,
    kinds: Vec<TileKind>,
    adjacency: Vec<TileMask>,
    neighbor_lists: Vec<Vec<Tile>>,
    weights: Vec<f64>,
}

impl TileSet {
    /// Build a tile set for the given catalog mode
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TileCatalog`] if any declared adjacency lacks its
    /// mirror declaration, if a declaration references a tile absent from
    /// the mode, or if any member weight is not strictly positive.
    pub fn build(mode: CatalogMode) -> Result<Self> {
        Self::build_with_overrides(mode, &BTreeMap::new())
    }

    /// Build a tile set, replacing base weights for selected tiles
    ///
    /// Overrides come from the world seed and apply before any zone or
    /// slider adjustment.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TileCatalog`] under the same conditions as
    /// [`TileSet::build`], or when an override weight is not strictly
    /// positive.
    pub fn build_with_overrides(
        mode: CatalogMode,
        overrides: &BTreeMap<Tile, f64>,
    ) -> Result<Self> {
        let members: Vec<Tile> = ALL_TILES
            .iter()
            .copied()
            .filter(|tile| mode == CatalogMode::Full || !tile.is_structure())
            .collect();
        let member_mask: TileMask = members.iter().copied().collect();

        let mut kinds = Vec::with_capacity(TILE_COUNT);
        let mut weights = vec![0.0; TILE_COUNT];
        for tile in ALL_TILES {
            let kind = tile.kind();
            if member_mask.contains(tile) {
                let weight = overrides.get(&tile).copied().unwrap_or(kind.weight);
                if weight <= 0.0 {
                    return Err(GenError::TileCatalog {
                        reason: format!("tile '{tile}' has nonpositive weight {weight}"),
                    });
                }
                if let Some(slot) = weights.get_mut(tile.index()) {
                    *slot = weight;
                }
            }
            kinds.push(kind);
        }

        let neighbor_lists = Self::collect_neighbor_lists(mode, &member_mask)?;
        Self::check_symmetry(&neighbor_lists)?;

        let adjacency = neighbor_lists
            .iter()
            .map(|list| list.iter().copied().collect())
            .collect();

        Ok(Self {
            mode,
            members,
            member_mask,
            kinds,
            adjacency,
            neighbor_lists,
            weights,
        })
    }

    fn collect_neighbor_lists(
        mode: CatalogMode,
        member_mask: &TileMask,
    ) -> Result<Vec<Vec<Tile>>> {
        let mut lists = Vec::with_capacity(TILE_COUNT);
        for tile in ALL_TILES {
            if !member_mask.contains(tile) {
                lists.push(Vec::new());
                continue;
            }

            let mut declared: Vec<Tile> = terrain_neighbors(tile).to_vec();
            if mode == CatalogMode::Full {
                for &extra in structure_links(tile) {
                    if !declared.contains(&extra) {
                        declared.push(extra);
                    }
                }
            }

            for &neighbor in &declared {
                if !member_mask.contains(neighbor) {
                    return Err(GenError::TileCatalog {
                        reason: format!(
                            "tile '{tile}' declares adjacency to '{neighbor}', absent from this catalog"
                        ),
                    });
                }
            }

            declared.sort_by_key(|t| t.index());
            lists.push(declared);
        }
        Ok(lists)
    }

    fn check_symmetry(lists: &[Vec<Tile>]) -> Result<()> {
        for (index, declared) in lists.iter().enumerate() {
            let Some(tile) = Tile::from_index(index) else {
                continue;
            };
            for &neighbor in declared {
                let mirrored = lists
                    .get(neighbor.index())
                    .is_some_and(|back| back.contains(&tile));
                if !mirrored {
                    return Err(GenError::TileCatalog {
                        reason: format!(
                            "adjacency '{tile}' -> '{neighbor}' lacks the mirror declaration"
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// The catalog mode this set was built for
    pub const fn mode(&self) -> CatalogMode {
        self.mode
    }

    /// Member tiles in declaration order
    pub fn ids(&self) -> &[Tile] {
        &self.members
    }

    /// Bitmask of member tiles
    pub const fn member_mask(&self) -> &TileMask {
        &self.member_mask
    }

    /// Metadata for a tile kind
    ///
    /// Available for every tile in the full enumeration, including tiles
    /// outside this set's members; later phases look up structure kinds
    /// through a terrain-mode set's catalog.
    pub fn kind(&self, tile: Tile) -> &TileKind {
        // The kinds vector is built over ALL_TILES, so the index always resolves
        self.kinds.get(tile.index()).map_or(&FALLBACK_KIND, |k| k)
    }

    /// Declared neighbors of a tile in declaration order
    pub fn neighbors_of(&self, tile: Tile) -> &[Tile] {
        self.neighbor_lists
            .get(tile.index())
            .map_or(&[], Vec::as_slice)
    }

    /// Adjacency row of a tile as a bitmask
    pub fn adjacency_mask(&self, tile: Tile) -> Option<&TileMask> {
        self.adjacency.get(tile.index())
    }

    /// Whether two tiles may share a 4-neighborhood edge
    pub fn can_be_adjacent(&self, a: Tile, b: Tile) -> bool {
        self.adjacency
            .get(a.index())
            .is_some_and(|mask| mask.contains(b))
    }

    /// Base sampling weight of a member tile, zero for non-members
    pub fn base_weight(&self, tile: Tile) -> f64 {
        self.weights.get(tile.index()).copied().unwrap_or(0.0)
    }

    /// Base weights for the whole enumeration, indexed by [`Tile::index`]
    pub fn base_weights(&self) -> &[f64] {
        &self.weights
    }
}

// Only reachable if Tile::index ever exceeds the kinds vector, which the
// construction over ALL_TILES rules out
static FALLBACK_KIND: TileKind = Tile::Grass.kind();
