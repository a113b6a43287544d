//! Phase 3: road carving
//!
//! Roads are carved by a randomized incremental walker rather than a path
//! search: each step favors the axis with more remaining distance toward
//! the target, with a fixed chance of drifting onto the other axis. Soft
//! terrain is overwritten with road tiles; water, rock, and existing
//! structures are traversed but left alone. The walk is bounded by
//! `width + height` steps, so an unreachable target degrades into a road
//! that peters out instead of a hang.

use crate::catalog::tileset::TileSet;
use crate::catalog::tiles::Tile;
use crate::engine::ResolvedPoi;
use crate::math::sampling::RandomSource;
use crate::seed::schema::{Connection, RoadEndpoint};
use crate::spatial::grid::Grid;

/// Chance per step of moving along the dominant axis
const MAJOR_AXIS_CHANCE: f64 = 0.7;

/// Terrain the carver may overwrite with road tiles
pub(crate) const fn is_carvable(tile: Tile) -> bool {
    matches!(
        tile,
        Tile::Grass
            | Tile::Meadow
            | Tile::Glen
            | Tile::Scrubland
            | Tile::Sand
            | Tile::Forest
            | Tile::DenseForest
            | Tile::PineForest
            | Tile::Hills
            | Tile::FarmField
            | Tile::Marsh
    )
}

/// Carve all declared connections and edge exits
pub(crate) fn carve_all(
    grid: &mut Grid,
    pois: &[ResolvedPoi],
    connections: &[Connection],
    endpoints: &[RoadEndpoint],
    tileset: &TileSet,
    rng: &mut RandomSource,
) {
    for connection in connections {
        let from = resolved_position(pois, &connection.from);
        let to = resolved_position(pois, &connection.to);
        // A connection to an unplaced point of interest is skipped, not fatal
        if let (Some(from), Some(to)) = (from, to) {
            carve(grid, from, to, connection.style.tile(), tileset, rng);
        }
    }

    for endpoint in endpoints {
        let edge = endpoint
            .direction
            .edge_coordinate(grid.width(), grid.height());
        if let Some(start) = nearest_positioned_poi(pois, edge) {
            carve(grid, start, edge, endpoint.style.tile(), tileset, rng);
        }
    }
}

fn resolved_position(pois: &[ResolvedPoi], id: &str) -> Option<(usize, usize)> {
    pois.iter()
        .find(|poi| poi.spec.id == id)
        .and_then(|poi| poi.position)
}

/// Positioned point of interest nearest to `target` by Manhattan distance
///
/// Ties resolve to the earliest in world seed order.
fn nearest_positioned_poi(
    pois: &[ResolvedPoi],
    target: (usize, usize),
) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), usize)> = None;
    for poi in pois {
        let Some((x, y)) = poi.position else {
            continue;
        };
        let distance = x.abs_diff(target.0) + y.abs_diff(target.1);
        let closer = best.is_none_or(|(_, d)| distance < d);
        if closer {
            best = Some(((x, y), distance));
        }
    }
    best.map(|(position, _)| position)
}

/// Walk from `from` to `to`, overwriting soft terrain with `road`
fn carve(
    grid: &mut Grid,
    from: (usize, usize),
    to: (usize, usize),
    road: Tile,
    tileset: &TileSet,
    rng: &mut RandomSource,
) {
    let max_steps = grid.width() + grid.height();
    let (mut x, mut y) = from;

    for _ in 0..max_steps {
        let overwrite = grid
            .cell(x, y)
            .and_then(|c| c.tile())
            .is_some_and(is_carvable);
        if overwrite {
            grid.set_tile(x, y, road, tileset);
        }

        if (x, y) == to {
            break;
        }

        let dx = to.0 as i64 - x as i64;
        let dy = to.1 as i64 - y as i64;
        let x_is_major = dx.abs() >= dy.abs();
        let take_major = rng.chance(MAJOR_AXIS_CHANCE);
        let step_in_x = x_is_major == take_major;

        let step = if step_in_x {
            (signed_step(dx, rng), 0)
        } else {
            (0, signed_step(dy, rng))
        };

        x = (x as i64 + step.0).clamp(0, grid.width() as i64 - 1) as usize;
        y = (y as i64 + step.1).clamp(0, grid.height() as i64 - 1) as usize;
    }
}

/// Unit step toward the target on one axis, random when already aligned
fn signed_step(remaining: i64, rng: &mut RandomSource) -> i64 {
    if remaining > 0 {
        1
    } else if remaining < 0 {
        -1
    } else if rng.chance(0.5) {
        1
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::{carve, is_carvable};
    use crate::catalog::tileset::{CatalogMode, TileSet};
    use crate::catalog::tiles::Tile;
    use crate::math::sampling::RandomSource;
    use crate::spatial::grid::Grid;

    #[test]
    fn carvable_set_excludes_water_and_rock() {
        assert!(is_carvable(Tile::Grass));
        assert!(is_carvable(Tile::Marsh));
        assert!(is_carvable(Tile::FarmField));
        assert!(!is_carvable(Tile::Water));
        assert!(!is_carvable(Tile::Mountains));
        assert!(!is_carvable(Tile::StoneRoad));
    }

    #[test]
    fn walker_connects_endpoints_on_open_ground() {
        let tileset = TileSet::build(CatalogMode::Full)
            .unwrap_or_else(|e| unreachable!("full catalog must build: {e}"));
        let mut rng = RandomSource::new(9);
        let mut grid = Grid::new(12, 12, &tileset, &mut rng);
        for y in 0..12 {
            for x in 0..12 {
                grid.seed_cell(x, y, Tile::Grass, &tileset);
            }
        }

        carve(&mut grid, (1, 6), (10, 6), Tile::StoneRoad, &tileset, &mut rng);

        let carved = (0..12)
            .flat_map(|y| (0..12).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                grid.cell(x, y).and_then(|c| c.tile()) == Some(Tile::StoneRoad)
            })
            .count();
        assert!(carved >= 10, "only {carved} road tiles carved");

        // The walk always pushes into the target's half of the map
        let reached_east = (8..12).any(|x| {
            (0..12).any(|y| grid.cell(x, y).and_then(|c| c.tile()) == Some(Tile::StoneRoad))
        });
        assert!(reached_east);
    }

    #[test]
    fn hard_terrain_is_traversed_but_kept() {
        let tileset = TileSet::build(CatalogMode::Full)
            .unwrap_or_else(|e| unreachable!("full catalog must build: {e}"));
        let mut rng = RandomSource::new(2);
        let mut grid = Grid::new(6, 3, &tileset, &mut rng);
        for y in 0..3 {
            for x in 0..6 {
                grid.seed_cell(x, y, Tile::Grass, &tileset);
            }
        }
        grid.seed_cell(3, 1, Tile::Mountains, &tileset);

        carve(&mut grid, (0, 1), (5, 1), Tile::DirtRoad, &tileset, &mut rng);
        assert_eq!(
            grid.cell(3, 1).and_then(|c| c.tile()),
            Some(Tile::Mountains)
        );
    }
}
