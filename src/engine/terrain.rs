//! Phase 1: terrain weight shaping
//!
//! Weight adjustments land in a fixed order: zone biases from regional
//! points of interest first, then the biome-wide tilt, then the slider
//! overrides, which replace rather than scale so they always win. Zone
//! centers are seeded as hard collapses to anchor each region.

use crate::catalog::tileset::TileSet;
use crate::catalog::tiles::Tile;
use crate::engine::{ResolvedPoi, TerrainSliders};
use crate::seed::schema::{Biome, PoiType, WorldSeed};
use crate::spatial::grid::{Grid, Region};

/// Multiplier table a terrain zone applies inside its region
///
/// Factors above one favor a tile, below one suppress it; they never
/// remove a tile from play.
fn zone_bias(poi_type: PoiType) -> &'static [(Tile, f64)] {
    match poi_type {
        PoiType::Lake => &[
            (Tile::DeepWater, 3.5),
            (Tile::Water, 4.0),
            (Tile::ShallowWater, 3.0),
            (Tile::Sand, 1.5),
            (Tile::Grass, 0.3),
            (Tile::Forest, 0.4),
        ],
        PoiType::Forest => &[
            (Tile::Forest, 3.0),
            (Tile::DenseForest, 2.5),
            (Tile::PineForest, 2.0),
            (Tile::Glen, 1.5),
            (Tile::Grass, 0.3),
        ],
        PoiType::Mountain => &[
            (Tile::Mountains, 3.5),
            (Tile::Cliffs, 2.5),
            (Tile::Peak, 2.5),
            (Tile::Highlands, 2.0),
            (Tile::Hills, 2.0),
            (Tile::Grass, 0.4),
            (Tile::Water, 0.3),
        ],
        PoiType::Swamp => &[
            (Tile::Swamp, 4.0),
            (Tile::Marsh, 3.5),
            (Tile::ShallowWater, 1.5),
            (Tile::Grass, 0.4),
            (Tile::Hills, 0.3),
        ],
        PoiType::Plains => &[
            (Tile::Grass, 2.5),
            (Tile::Meadow, 2.0),
            (Tile::FlowerField, 1.5),
            (Tile::Forest, 0.3),
            (Tile::Mountains, 0.2),
            (Tile::Cliffs, 0.1),
            (Tile::Peak, 0.1),
            (Tile::Water, 0.3),
        ],
        PoiType::Hills => &[
            (Tile::Hills, 3.0),
            (Tile::Highlands, 2.0),
            (Tile::Scrubland, 1.5),
            (Tile::Grass, 0.5),
            (Tile::Water, 0.4),
        ],
        _ => &[],
    }
}

/// Representative tile hard-seeded at a zone's center
const fn zone_seed_tile(poi_type: PoiType) -> Option<Tile> {
    match poi_type {
        PoiType::Lake => Some(Tile::DeepWater),
        PoiType::Forest => Some(Tile::Forest),
        PoiType::Mountain => Some(Tile::Peak),
        PoiType::Swamp => Some(Tile::Swamp),
        PoiType::Plains => Some(Tile::Grass),
        PoiType::Hills => Some(Tile::Hills),
        _ => None,
    }
}

/// Whole-grid multiplier table for a biome
fn biome_modifiers(biome: Biome) -> &'static [(Tile, f64)] {
    match biome {
        Biome::Temperate => &[(Tile::Meadow, 1.2), (Tile::Forest, 1.1)],
        Biome::Tropical => &[
            (Tile::Forest, 1.5),
            (Tile::DenseForest, 1.6),
            (Tile::Swamp, 1.8),
            (Tile::Marsh, 1.5),
            (Tile::Water, 1.3),
            (Tile::Snow, 0.05),
            (Tile::PineForest, 0.4),
        ],
        Biome::Desert => &[
            (Tile::Sand, 4.0),
            (Tile::Scrubland, 2.5),
            (Tile::Water, 0.25),
            (Tile::DeepWater, 0.15),
            (Tile::Forest, 0.3),
            (Tile::DenseForest, 0.2),
            (Tile::Marsh, 0.2),
            (Tile::Swamp, 0.15),
            (Tile::Snow, 0.05),
        ],
        Biome::Arctic => &[
            (Tile::Snow, 6.0),
            (Tile::PineForest, 2.0),
            (Tile::Highlands, 1.8),
            (Tile::Mountains, 1.5),
            (Tile::Peak, 1.5),
            (Tile::Sand, 0.2),
            (Tile::Meadow, 0.4),
            (Tile::FlowerField, 0.2),
            (Tile::Swamp, 0.3),
        ],
        Biome::Volcanic => &[
            (Tile::Mountains, 3.0),
            (Tile::Cliffs, 2.5),
            (Tile::Peak, 2.0),
            (Tile::Highlands, 1.8),
            (Tile::Scrubland, 1.5),
            (Tile::Water, 0.5),
            (Tile::Forest, 0.4),
            (Tile::Snow, 0.3),
        ],
        Biome::Coastal => &[
            (Tile::Water, 2.0),
            (Tile::ShallowWater, 2.5),
            (Tile::DeepWater, 1.5),
            (Tile::Sand, 3.0),
            (Tile::Marsh, 1.4),
            (Tile::Mountains, 0.5),
            (Tile::Peak, 0.3),
        ],
    }
}

/// Absolute weight assignments derived from the sliders
///
/// Forest and grass move inversely; water scales with the water level and
/// pulls hills down slightly. Related tiles follow at fixed ratios. A
/// slider hard against an end zeroes its suppressed family so extreme
/// settings produce categorical absences rather than trace amounts.
pub fn slider_assignments(sliders: &TerrainSliders) -> Vec<(Tile, f64)> {
    let f = sliders.forest_density.clamp(0.0, 1.0);
    let w = sliders.water_level.clamp(0.0, 1.0);

    let forest = if f <= 0.0 { 0.0 } else { 0.16f64.mul_add(f, 0.02) };
    let grass = if f >= 1.0 { 0.0 } else { 0.16f64.mul_add(-f, 0.18) };
    let water = if w <= 0.0 { 0.0 } else { 0.14f64.mul_add(w, 0.02) };

    vec![
        (Tile::Forest, forest),
        (Tile::DenseForest, forest * 0.7),
        (Tile::PineForest, forest * 0.6),
        (Tile::AutumnForest, forest * 0.45),
        (Tile::Grass, grass),
        (Tile::Meadow, grass * 0.85),
        (Tile::Glen, grass * 0.45),
        (Tile::Scrubland, grass * 0.4),
        (Tile::FlowerField, grass * 0.25),
        (Tile::Water, water),
        (Tile::ShallowWater, water * 1.1),
        (Tile::DeepWater, water * 0.6),
        (Tile::Marsh, water * 0.4),
        (Tile::Swamp, water * 0.35),
        (Tile::Sand, 0.05 * 1.2f64.mul_add(w, 0.4)),
        (Tile::Hills, 0.08 * 0.35f64.mul_add(-w, 1.0)),
    ]
}

/// Apply zone biases, the biome tilt, and the slider overrides
///
/// Terrain points of interest also get their resolved position recorded
/// here: the center of their clipped region, where the representative tile
/// is seeded.
pub(crate) fn shape_weights(
    grid: &mut Grid,
    world_seed: &WorldSeed,
    sliders: &TerrainSliders,
    tileset: &TileSet,
    pois: &mut [ResolvedPoi],
) {
    let width = grid.width();
    let height = grid.height();

    for poi in pois.iter_mut() {
        if !poi.spec.poi_type.is_terrain() {
            continue;
        }

        let region = match (&poi.spec.position, &poi.spec.region) {
            (Some(position), _) => Region::clipped(
                position.x.max(0) as usize,
                position.x.max(0) as usize,
                position.y.max(0) as usize,
                position.y.max(0) as usize,
                width,
                height,
            ),
            (None, Some(spec)) => {
                let x_max = spec.x_max.unwrap_or(width as i64 - 1).max(0) as usize;
                let y_max = spec.y_max.unwrap_or(height as i64 - 1).max(0) as usize;
                Region::clipped(
                    spec.x_min.max(0) as usize,
                    x_max,
                    spec.y_min.max(0) as usize,
                    y_max,
                    width,
                    height,
                )
            }
            (None, None) => continue,
        };

        let density = poi.spec.density.unwrap_or(1.0).clamp(0.0, 1.0);
        let scaled: Vec<(Tile, f64)> = zone_bias(poi.spec.poi_type)
            .iter()
            .map(|&(tile, factor)| (tile, (factor - 1.0).mul_add(density, 1.0)))
            .collect();
        grid.apply_region_modifiers(&region, &scaled);

        let (cx, cy) = region.center();
        poi.position = Some((cx, cy));
        let already_collapsed = grid.cell(cx, cy).is_some_and(|c| c.collapsed());
        if !already_collapsed {
            if let Some(tile) = zone_seed_tile(poi.spec.poi_type) {
                grid.seed_cell(cx, cy, tile, tileset);
            }
        }
    }

    let whole = Region::new(0..height, 0..width);
    grid.apply_region_modifiers(&whole, biome_modifiers(world_seed.biome));

    let assignments = slider_assignments(sliders);
    for y in 0..height {
        for x in 0..width {
            grid.set_weights(x, y, &assignments);
        }
    }
}
