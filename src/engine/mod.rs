//! Generation phases and the single public entry point
//!
//! The engine owns the seeded RNG and runs the three phases in order:
//! terrain constraint solving, settlement stamping, road carving. One RNG
//! stream threads through all of them, so a fixed `(world seed, rng seed)`
//! pair reproduces the map exactly.

/// Final map artifact
pub mod map;
/// Phase 3: road carving
pub mod roads;
/// Phase 2: settlement stamping
pub mod settlements;
/// Phase 1: terrain weight shaping
pub mod terrain;

use crate::algorithm::propagation::{Propagation, Propagator};
use crate::algorithm::recovery;
use crate::algorithm::solver::{SolveStatus, Solver};
use crate::catalog::tileset::{CatalogMode, TileSet};
use crate::io::configuration::{
    DEFAULT_ANIMATION_DELAY_MS, DEFAULT_FOREST_DENSITY, DEFAULT_MAX_BACKTRACKS,
    DEFAULT_VILLAGE_COUNT, DEFAULT_WATER_LEVEL,
};
use crate::io::error::{GenError, Result};
use crate::io::progress::{CancelToken, GenPhase, ProgressCallback, ProgressReporter};
use crate::math::sampling::RandomSource;
use crate::seed::schema::{Poi, WorldSeed};
use crate::seed::validate;
use crate::spatial::grid::Grid;
use self::map::{GenerationStats, Map};
use std::collections::BTreeMap;
use std::time::Duration;

/// Slider settings controlling the terrain mix and the settlement cap
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSliders {
    /// Forest density, 0 to 1
    pub forest_density: f64,
    /// Water level, 0 to 1
    pub water_level: f64,
    /// Upper bound on stamped settlements
    pub village_count: usize,
}

impl Default for TerrainSliders {
    fn default() -> Self {
        Self {
            forest_density: DEFAULT_FOREST_DENSITY,
            water_level: DEFAULT_WATER_LEVEL,
            village_count: DEFAULT_VILLAGE_COUNT,
        }
    }
}

impl TerrainSliders {
    /// Sliders from a world seed's terrain options, defaults where omitted
    pub fn from_seed(seed: &WorldSeed) -> Self {
        seed.terrain_options.map_or_else(Self::default, |options| Self {
            forest_density: options.forest_density,
            water_level: options.water_level,
            village_count: options.village_count,
        })
    }
}

/// Caller-facing knobs for one generation run
#[derive(Default)]
pub struct GenerateOptions {
    /// Backtrack budget before recovery; the crate default when `None`
    pub max_backtracks: Option<usize>,
    /// Insert a per-collapse delay so a UI can watch the solve
    pub animated: bool,
    /// Per-collapse delay in animated mode; the crate default when `None`
    pub animation_delay_ms: Option<u64>,
    /// Progress event sink
    pub progress: Option<ProgressCallback>,
    /// Cooperative cancellation flag
    pub cancel: CancelToken,
}

/// A point of interest plus the position generation resolved for it
pub(crate) struct ResolvedPoi {
    /// The seed declaration
    pub spec: Poi,
    /// Position fixed during phase 1 (terrain zones) or phase 2 (settlements)
    pub position: Option<(usize, usize)>,
}

/// Generate a map from a world seed
///
/// This is the single entry point: it validates the seed, builds the tile
/// catalogs, runs the three phases, and assembles the artifact. The `seed`
/// value drives every random draw; identical inputs give identical maps.
///
/// # Errors
///
/// Returns [`GenError::InvalidSeed`] for a seed that fails validation,
/// [`GenError::TileCatalog`] if a catalog fails its build-time checks, and
/// [`GenError::Cancelled`] when the cancel token fires mid-run. Solver
/// failures are not errors: the map is emitted with `success: false` after
/// the recovery pass fills the remaining cells.
pub fn generate(
    world_seed: &WorldSeed,
    rng_seed: u64,
    sliders: &TerrainSliders,
    options: GenerateOptions,
) -> Result<Map> {
    validate(world_seed)?;

    let overrides = world_seed.weights.clone().unwrap_or_else(BTreeMap::new);
    let terrain_set = TileSet::build_with_overrides(CatalogMode::TerrainOnly, &filter_terrain(&overrides))?;
    let full_set = TileSet::build_with_overrides(CatalogMode::Full, &overrides)?;

    let max_backtracks = options.max_backtracks.unwrap_or(DEFAULT_MAX_BACKTRACKS);
    let animation_delay = options.animated.then(|| {
        Duration::from_millis(
            options
                .animation_delay_ms
                .unwrap_or(DEFAULT_ANIMATION_DELAY_MS),
        )
    });
    let cancel = options.cancel.clone();
    let mut reporter = ProgressReporter::new(options.progress);

    let mut rng = RandomSource::new(rng_seed);
    let mut grid = Grid::new(world_seed.size.width, world_seed.size.height, &terrain_set, &mut rng);

    let mut pois: Vec<ResolvedPoi> = world_seed
        .pois
        .iter()
        .map(|spec| ResolvedPoi {
            spec: spec.clone(),
            position: None,
        })
        .collect();

    // Phase 1: shape weights, seed zones, propagate, solve
    reporter.force(GenPhase::Terrain, 0.0, "Shaping terrain weights".to_string());
    terrain::shape_weights(&mut grid, world_seed, sliders, &terrain_set, &mut pois);

    let mut propagator = Propagator::new(grid.width(), grid.height());
    let seeded_ok = matches!(
        propagator.propagate_all(&mut grid, &terrain_set, None),
        Propagation::Settled
    );

    let mut stats = GenerationStats::default();
    let mut success = false;
    if seeded_ok {
        let report = Solver::new(
            &mut grid,
            &terrain_set,
            &mut rng,
            max_backtracks,
            animation_delay,
        )
        .run(&mut reporter, &cancel);
        stats.iterations = report.iterations;
        stats.backtracks = report.backtracks;
        match report.status {
            SolveStatus::Cancelled => return Err(GenError::Cancelled),
            SolveStatus::Succeeded => success = true,
            SolveStatus::Exhausted => {}
        }
    }
    if !success {
        // Seeded conflicts and exhausted budgets both end in the fill pass
        let recovered = recovery::fill_uncollapsed(&mut grid, &terrain_set);
        reporter.force(
            GenPhase::Terrain,
            1.0,
            format!("Recovered {recovered} unsolved cells"),
        );
    }

    if cancel.is_cancelled() {
        return Err(GenError::Cancelled);
    }

    // Phase 2: settlements
    reporter.force(GenPhase::Pois, 0.0, "Placing settlements".to_string());
    let villages = settlements::place(
        &mut grid,
        &mut pois,
        sliders.village_count,
        &full_set,
        &mut rng,
    );
    reporter.force(
        GenPhase::Pois,
        1.0,
        format!("Placed {} settlements", villages.len()),
    );

    if cancel.is_cancelled() {
        return Err(GenError::Cancelled);
    }

    // Phase 3: roads
    reporter.force(GenPhase::Roads, 0.0, "Carving roads".to_string());
    roads::carve_all(
        &mut grid,
        &pois,
        &world_seed.connections,
        &world_seed.road_endpoints,
        &full_set,
        &mut rng,
    );
    reporter.force(GenPhase::Roads, 1.0, "Roads carved".to_string());

    let map = Map::from_grid(
        &grid,
        world_seed.clone(),
        rng_seed,
        villages,
        success,
        stats,
    );
    reporter.force(GenPhase::Complete, 1.0, "Map complete".to_string());
    Ok(map)
}

/// Drop override entries for tiles outside the terrain catalog
fn filter_terrain(
    overrides: &BTreeMap<crate::catalog::tiles::Tile, f64>,
) -> BTreeMap<crate::catalog::tiles::Tile, f64> {
    overrides
        .iter()
        .filter(|(tile, _)| !tile.is_structure())
        .map(|(tile, weight)| (*tile, *weight))
        .collect()
}
