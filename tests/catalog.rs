//! Validates catalog construction, adjacency symmetry, and mode membership

use worldweave::catalog::{CatalogMode, TileSet};
use worldweave::catalog::tiles::{ALL_TILES, Tile};

#[test]
fn both_catalog_modes_build() {
    assert!(TileSet::build(CatalogMode::TerrainOnly).is_ok());
    assert!(TileSet::build(CatalogMode::Full).is_ok());
}

#[test]
fn terrain_mode_excludes_structures() {
    let Ok(tileset) = TileSet::build(CatalogMode::TerrainOnly) else {
        unreachable!("terrain catalog must build");
    };
    assert!(!tileset.ids().is_empty());
    for tile in tileset.ids() {
        assert!(!tile.is_structure(), "{tile} leaked into the terrain catalog");
    }
    assert!(!tileset.ids().contains(&Tile::DirtRoad));
}

#[test]
fn full_mode_covers_the_whole_enumeration() {
    let Ok(tileset) = TileSet::build(CatalogMode::Full) else {
        unreachable!("full catalog must build");
    };
    assert_eq!(tileset.ids().len(), ALL_TILES.len());
}

#[test]
fn adjacency_is_symmetric_in_both_modes() {
    for mode in [CatalogMode::TerrainOnly, CatalogMode::Full] {
        let Ok(tileset) = TileSet::build(mode) else {
            unreachable!("catalog must build");
        };
        for &tile in tileset.ids() {
            for &neighbor in tileset.neighbors_of(tile) {
                assert!(
                    tileset.can_be_adjacent(neighbor, tile),
                    "{tile} -> {neighbor} is not mirrored in {mode:?}"
                );
            }
        }
    }
}

#[test]
fn every_terrain_tile_reaches_grass_within_one_hop() {
    let Ok(tileset) = TileSet::build(CatalogMode::TerrainOnly) else {
        unreachable!("terrain catalog must build");
    };
    for &tile in tileset.ids() {
        if tile == Tile::Grass || tileset.can_be_adjacent(tile, Tile::Grass) {
            continue;
        }
        let one_hop = tileset
            .neighbors_of(tile)
            .iter()
            .any(|&n| tileset.can_be_adjacent(n, Tile::Grass));
        assert!(one_hop, "{tile} is more than one hop from the grass hub");
    }
}

#[test]
fn member_weights_are_positive() {
    let Ok(tileset) = TileSet::build(CatalogMode::Full) else {
        unreachable!("full catalog must build");
    };
    for &tile in tileset.ids() {
        assert!(tileset.base_weight(tile) > 0.0);
    }
}

#[test]
fn weight_overrides_replace_base_weights() {
    let mut overrides = std::collections::BTreeMap::new();
    overrides.insert(Tile::Grass, 9.5);

    let Ok(tileset) = TileSet::build_with_overrides(CatalogMode::TerrainOnly, &overrides) else {
        unreachable!("terrain catalog must build with a valid override");
    };
    assert!((tileset.base_weight(Tile::Grass) - 9.5).abs() < f64::EPSILON);

    overrides.insert(Tile::Water, 0.0);
    assert!(TileSet::build_with_overrides(CatalogMode::TerrainOnly, &overrides).is_err());
}

#[test]
fn kind_metadata_matches_the_enumeration() {
    let Ok(tileset) = TileSet::build(CatalogMode::Full) else {
        unreachable!("full catalog must build");
    };
    for tile in ALL_TILES {
        let kind = tileset.kind(tile);
        assert_eq!(kind.id, tile);
        assert_eq!(kind.walkable, tile.kind().walkable);
        assert_eq!(kind.height, tile.kind().height);
    }
}

#[test]
fn incompatible_pairs_are_rejected() {
    let Ok(tileset) = TileSet::build(CatalogMode::TerrainOnly) else {
        unreachable!("terrain catalog must build");
    };
    assert!(!tileset.can_be_adjacent(Tile::DeepWater, Tile::Peak));
    assert!(!tileset.can_be_adjacent(Tile::DeepWater, Tile::Grass));
    assert!(tileset.can_be_adjacent(Tile::DeepWater, Tile::Water));
    assert!(tileset.can_be_adjacent(Tile::Water, Tile::Grass));
}
