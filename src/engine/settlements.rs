//! Phase 2: settlement stamping
//!
//! Settlements mutate the collapsed terrain directly. Stamp shapes are
//! deterministic apart from small variants drawn from the engine RNG, and
//! every write goes through the bounds-checked tile setter, so patterns may
//! hang over the map edge. Adjacency is deliberately not enforced here.

use crate::catalog::tileset::TileSet;
use crate::catalog::tiles::{Tile, TileCategory};
use crate::engine::ResolvedPoi;
use crate::engine::map::Village;
use crate::engine::roads::is_carvable;
use crate::math::sampling::RandomSource;
use crate::seed::schema::{PoiSize, PoiType};
use crate::spatial::grid::Grid;

/// Chance that a settlement ring cell receives a building
const BUILDING_CHANCE: f64 = 0.7;

/// Terrain a settlement of the given type may be placed on
const fn site_allowlist(poi_type: PoiType) -> &'static [Tile] {
    match poi_type {
        PoiType::Village => &[Tile::Grass, Tile::Meadow, Tile::Sand],
        PoiType::City => &[Tile::Grass, Tile::Meadow],
        PoiType::Castle => &[Tile::Hills, Tile::Highlands, Tile::Grass],
        PoiType::Farm => &[Tile::Grass, Tile::Meadow],
        PoiType::Tavern => &[Tile::Grass, Tile::Meadow, Tile::Sand],
        PoiType::Tower => &[Tile::Hills, Tile::Grass, Tile::Highlands],
        PoiType::Port => &[Tile::Sand, Tile::ShallowWater, Tile::Grass],
        PoiType::Ruins => &[Tile::Grass, Tile::Scrubland, Tile::Hills, Tile::Sand],
        _ => &[],
    }
}

/// Stamp settlements onto the solved terrain, capped at `village_count`
///
/// Points of interest are visited in world seed order; once the cap is
/// reached the remainder are skipped. Regional settlements scan their
/// region for an allowed site and pick uniformly among candidates; a
/// region with no usable site skips the settlement entirely.
pub(crate) fn place(
    grid: &mut Grid,
    pois: &mut [ResolvedPoi],
    village_count: usize,
    tileset: &TileSet,
    rng: &mut RandomSource,
) -> Vec<Village> {
    let mut villages = Vec::new();

    for poi in pois.iter_mut() {
        if poi.spec.poi_type.is_terrain() {
            continue;
        }
        if villages.len() >= village_count {
            break;
        }

        let position = match (&poi.spec.position, &poi.spec.region) {
            (Some(position), _) => Some((position.x.max(0) as usize, position.y.max(0) as usize)),
            (None, Some(region)) => {
                let x_max = region.x_max.unwrap_or(grid.width() as i64 - 1);
                let y_max = region.y_max.unwrap_or(grid.height() as i64 - 1);
                scan_region(
                    grid,
                    poi.spec.poi_type,
                    region.x_min.max(0) as usize,
                    x_max.max(0) as usize,
                    region.y_min.max(0) as usize,
                    y_max.max(0) as usize,
                    rng,
                )
            }
            (None, None) => None,
        };
        let Some((x, y)) = position else {
            continue;
        };
        poi.position = Some((x, y));

        let scale = poi.spec.size.unwrap_or(PoiSize::Medium).scale();
        stamp(grid, poi.spec.poi_type, x, y, scale, tileset, rng);

        villages.push(Village {
            x,
            y,
            name: poi.spec.name.clone(),
            poi_type: poi.spec.poi_type,
        });
    }

    villages
}

/// Pick a placement site uniformly from the allowed tiles inside a region
fn scan_region(
    grid: &Grid,
    poi_type: PoiType,
    x_min: usize,
    x_max: usize,
    y_min: usize,
    y_max: usize,
    rng: &mut RandomSource,
) -> Option<(usize, usize)> {
    let allowed = site_allowlist(poi_type);
    let mut candidates = Vec::new();
    for y in y_min..=y_max.min(grid.height().saturating_sub(1)) {
        for x in x_min..=x_max.min(grid.width().saturating_sub(1)) {
            let usable = grid
                .cell(x, y)
                .and_then(|c| c.tile())
                .is_some_and(|t| allowed.contains(&t));
            if usable {
                candidates.push((x, y));
            }
        }
    }
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.index(candidates.len())).copied()
}

fn stamp(
    grid: &mut Grid,
    poi_type: PoiType,
    x: usize,
    y: usize,
    scale: usize,
    tileset: &TileSet,
    rng: &mut RandomSource,
) {
    match poi_type {
        PoiType::Village => stamp_village(grid, x, y, scale, tileset, rng),
        PoiType::City => stamp_city(grid, x, y, scale, tileset, rng),
        PoiType::Castle => stamp_castle(grid, x, y, tileset),
        PoiType::Farm => stamp_farm(grid, x, y, tileset),
        PoiType::Tavern => stamp_tavern(grid, x, y, tileset),
        PoiType::Tower => stamp_tower(grid, x, y, tileset),
        PoiType::Port => stamp_port(grid, x, y, tileset),
        PoiType::Ruins => stamp_ruins(grid, x, y, tileset, rng),
        _ => {}
    }
}

/// Offsets of the 8-neighborhood in reading order
const RING_8: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn offset(x: usize, y: usize, dx: i64, dy: i64) -> Option<(usize, usize)> {
    let nx = x as i64 + dx;
    let ny = y as i64 + dy;
    if nx >= 0 && ny >= 0 {
        Some((nx as usize, ny as usize))
    } else {
        None
    }
}

fn tile_at(grid: &Grid, x: usize, y: usize) -> Option<Tile> {
    grid.cell(x, y).and_then(|c| c.tile())
}

/// Dirt cross roads out of a center, clipped to carvable terrain
fn lay_cross_roads(
    grid: &mut Grid,
    x: usize,
    y: usize,
    length: usize,
    road: Tile,
    tileset: &TileSet,
) {
    for (dx, dy) in [(0i64, -1i64), (1, 0), (0, 1), (-1, 0)] {
        for step in 1..=length as i64 {
            let Some((nx, ny)) = offset(x, y, dx * step, dy * step) else {
                continue;
            };
            if tile_at(grid, nx, ny).is_some_and(is_carvable) {
                grid.set_tile(nx, ny, road, tileset);
            }
        }
    }
}

fn stamp_village(
    grid: &mut Grid,
    x: usize,
    y: usize,
    scale: usize,
    tileset: &TileSet,
    rng: &mut RandomSource,
) {
    grid.set_tile(x, y, Tile::DirtRoad, tileset);

    for (dx, dy) in RING_8 {
        let Some((nx, ny)) = offset(x, y, dx, dy) else {
            continue;
        };
        let buildable = tile_at(grid, nx, ny)
            .is_some_and(|t| matches!(t, Tile::Grass | Tile::Sand | Tile::Forest));
        if buildable {
            let tile = if rng.chance(BUILDING_CHANCE) {
                Tile::BuildingWood
            } else {
                Tile::FarmField
            };
            grid.set_tile(nx, ny, tile, tileset);
        }
    }

    lay_cross_roads(grid, x, y, scale + 1, Tile::DirtRoad, tileset);
}

fn stamp_city(
    grid: &mut Grid,
    x: usize,
    y: usize,
    scale: usize,
    tileset: &TileSet,
    rng: &mut RandomSource,
) {
    grid.set_tile(x, y, Tile::Market, tileset);
    lay_cross_roads(grid, x, y, scale + 2, Tile::StoneRoad, tileset);

    // Outer ring of the 5x5 block around the market
    for dy in -2i64..=2 {
        for dx in -2i64..=2 {
            if dx.abs() != 2 && dy.abs() != 2 {
                continue;
            }
            let Some((nx, ny)) = offset(x, y, dx, dy) else {
                continue;
            };
            let buildable = tile_at(grid, nx, ny).is_some_and(|t| {
                matches!(
                    t,
                    Tile::Grass
                        | Tile::Meadow
                        | Tile::Sand
                        | Tile::Glen
                        | Tile::Scrubland
                        | Tile::FlowerField
                        | Tile::Forest
                )
            });
            if buildable && rng.chance(BUILDING_CHANCE) {
                grid.set_tile(nx, ny, Tile::BuildingStone, tileset);
            }
        }
    }
}

fn stamp_castle(grid: &mut Grid, x: usize, y: usize, tileset: &TileSet) {
    grid.set_tile(x, y, Tile::CastleTower, tileset);
    for (dx, dy) in RING_8 {
        if let Some((nx, ny)) = offset(x, y, dx, dy) {
            grid.set_tile(nx, ny, Tile::CastleWall, tileset);
        }
    }
    // Approach road south of the gate
    for step in 2..=3 {
        if let Some((nx, ny)) = offset(x, y, 0, step) {
            if tile_at(grid, nx, ny).is_some_and(is_carvable) {
                grid.set_tile(nx, ny, Tile::StoneRoad, tileset);
            }
        }
    }
}

fn stamp_farm(grid: &mut Grid, x: usize, y: usize, tileset: &TileSet) {
    grid.set_tile(x, y, Tile::BuildingWood, tileset);
    for dy in -1i64..=1 {
        for dx in -2i64..=2 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let Some((nx, ny)) = offset(x, y, dx, dy) else {
                continue;
            };
            if tile_at(grid, nx, ny) == Some(Tile::Grass) {
                grid.set_tile(nx, ny, Tile::FarmField, tileset);
            }
        }
    }
    if let Some((nx, ny)) = offset(x, y, 0, 2) {
        if tile_at(grid, nx, ny).is_some_and(is_carvable) {
            grid.set_tile(nx, ny, Tile::DirtRoad, tileset);
        }
    }
}

fn stamp_tavern(grid: &mut Grid, x: usize, y: usize, tileset: &TileSet) {
    grid.set_tile(x, y, Tile::BuildingWood, tileset);
    // Door road on the first in-bounds side, south preferred
    for (dx, dy) in [(0i64, 1i64), (1, 0), (0, -1), (-1, 0)] {
        if let Some((nx, ny)) = offset(x, y, dx, dy) {
            if grid.cell(nx, ny).is_some() {
                grid.set_tile(nx, ny, Tile::DirtRoad, tileset);
                break;
            }
        }
    }
}

fn stamp_tower(grid: &mut Grid, x: usize, y: usize, tileset: &TileSet) {
    grid.set_tile(x, y, Tile::BuildingStone, tileset);
    for (dx, dy) in [(0i64, -1i64), (1, 0), (0, 1), (-1, 0)] {
        let Some((nx, ny)) = offset(x, y, dx, dy) else {
            continue;
        };
        let cleared = tile_at(grid, nx, ny).is_some_and(|t| {
            tileset.kind(t).category == TileCategory::Forest || t == Tile::Hills
        });
        if cleared {
            grid.set_tile(nx, ny, Tile::Grass, tileset);
        }
    }
}

fn stamp_port(grid: &mut Grid, x: usize, y: usize, tileset: &TileSet) {
    grid.set_tile(x, y, Tile::Dock, tileset);
    if let Some((nx, ny)) = offset(x, y, 0, -1) {
        grid.set_tile(nx, ny, Tile::BuildingWood, tileset);
    }
    if let Some((nx, ny)) = offset(x, y, 0, 1) {
        grid.set_tile(nx, ny, Tile::DirtRoad, tileset);
    }
}

fn stamp_ruins(grid: &mut Grid, x: usize, y: usize, tileset: &TileSet, rng: &mut RandomSource) {
    for _ in 0..4 {
        let dx = rng.index(5) as i64 - 2;
        let dy = rng.index(5) as i64 - 2;
        if rng.chance(BUILDING_CHANCE) {
            if let Some((nx, ny)) = offset(x, y, dx, dy) {
                grid.set_tile(nx, ny, Tile::BuildingStone, tileset);
            }
        }
    }
}
