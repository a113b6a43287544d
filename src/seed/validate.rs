//! Cross-reference validation of parsed world seeds
//!
//! Every rule here rejects the seed before any grid is allocated: bad
//! dimensions, duplicate or dangling identifiers, malformed placements,
//! regions that miss the map entirely, and out-of-range sliders.

use crate::io::configuration::{MAX_MAP_DIMENSION, MIN_MAP_DIMENSION};
use crate::io::error::{Result, invalid_seed};
use crate::seed::schema::{Poi, WorldSeed};
use std::collections::BTreeSet;

/// Check a parsed world seed against the schema's cross-reference rules
///
/// # Errors
///
/// Returns [`crate::GenError::InvalidSeed`] describing the first rule the
/// seed breaks.
pub fn validate(seed: &WorldSeed) -> Result<()> {
    let width = seed.size.width;
    let height = seed.size.height;

    if width < MIN_MAP_DIMENSION || height < MIN_MAP_DIMENSION {
        return Err(invalid_seed(format!(
            "map size {width}x{height} is below the {MIN_MAP_DIMENSION}x{MIN_MAP_DIMENSION} minimum"
        )));
    }
    if width > MAX_MAP_DIMENSION || height > MAX_MAP_DIMENSION {
        return Err(invalid_seed(format!(
            "map size {width}x{height} exceeds the {MAX_MAP_DIMENSION}x{MAX_MAP_DIMENSION} maximum"
        )));
    }

    let mut ids = BTreeSet::new();
    for poi in &seed.pois {
        validate_poi(poi, width, height)?;
        if !ids.insert(poi.id.as_str()) {
            return Err(invalid_seed(format!("duplicate poi id '{}'", poi.id)));
        }
    }

    for connection in &seed.connections {
        for id in [connection.from.as_str(), connection.to.as_str()] {
            if !ids.contains(id) {
                return Err(invalid_seed(format!(
                    "connection references unknown poi id '{id}'"
                )));
            }
        }
    }

    if let Some(options) = &seed.terrain_options {
        for (label, value) in [
            ("forestDensity", options.forest_density),
            ("waterLevel", options.water_level),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid_seed(format!(
                    "{label} must lie in [0, 1], got {value}"
                )));
            }
        }
    }

    if let Some(overrides) = &seed.weights {
        for (tile, weight) in overrides {
            if *weight <= 0.0 {
                return Err(invalid_seed(format!(
                    "weight override for '{tile}' must be positive, got {weight}"
                )));
            }
        }
    }

    Ok(())
}

fn validate_poi(poi: &Poi, width: usize, height: usize) -> Result<()> {
    if poi.id.is_empty() {
        return Err(invalid_seed("poi with empty id"));
    }

    match (&poi.position, &poi.region) {
        (Some(_), Some(_)) => {
            return Err(invalid_seed(format!(
                "poi '{}' declares both position and region",
                poi.id
            )));
        }
        (None, None) => {
            return Err(invalid_seed(format!(
                "poi '{}' declares neither position nor region",
                poi.id
            )));
        }
        (Some(position), None) => {
            let inside = position.x >= 0
                && position.y >= 0
                && (position.x as usize) < width
                && (position.y as usize) < height;
            if !inside {
                return Err(invalid_seed(format!(
                    "poi '{}' position ({}, {}) is outside the {width}x{height} map",
                    poi.id, position.x, position.y
                )));
            }
        }
        (None, Some(region)) => {
            let x_max = region.x_max.unwrap_or(width as i64 - 1);
            let y_max = region.y_max.unwrap_or(height as i64 - 1);
            if region.x_min > x_max || region.y_min > y_max {
                return Err(invalid_seed(format!(
                    "poi '{}' region bounds are inverted",
                    poi.id
                )));
            }
            let misses_map = x_max < 0
                || y_max < 0
                || region.x_min >= width as i64
                || region.y_min >= height as i64;
            if misses_map {
                return Err(invalid_seed(format!(
                    "poi '{}' region lies entirely outside the {width}x{height} map",
                    poi.id
                )));
            }
        }
    }

    if let Some(density) = poi.density {
        if !poi.poi_type.is_terrain() {
            return Err(invalid_seed(format!(
                "poi '{}' sets density but is not a terrain zone",
                poi.id
            )));
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(invalid_seed(format!(
                "poi '{}' density must lie in [0, 1], got {density}",
                poi.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::seed::schema::{
        Biome, Connection, Poi, PoiType, Position, RegionSpec, RoadStyle, SeedSize, WorldSeed,
    };

    fn minimal(width: usize, height: usize) -> WorldSeed {
        WorldSeed {
            name: "test".to_string(),
            description: None,
            size: SeedSize { width, height },
            biome: Biome::Temperate,
            visual_theme: None,
            pois: Vec::new(),
            connections: Vec::new(),
            road_endpoints: Vec::new(),
            terrain_options: None,
            weights: None,
        }
    }

    fn poi_at(id: &str, x: i64, y: i64) -> Poi {
        Poi {
            id: id.to_string(),
            poi_type: PoiType::Village,
            name: id.to_string(),
            size: None,
            position: Some(Position { x, y }),
            region: None,
            density: None,
            description: None,
            visual_style: None,
        }
    }

    #[test]
    fn accepts_the_minimum_size() {
        assert!(validate(&minimal(4, 4)).is_ok());
    }

    #[test]
    fn rejects_undersized_maps() {
        assert!(validate(&minimal(3, 8)).is_err());
    }

    #[test]
    fn rejects_duplicate_poi_ids() {
        let mut seed = minimal(8, 8);
        seed.pois = vec![poi_at("a", 1, 1), poi_at("a", 2, 2)];
        assert!(validate(&seed).is_err());
    }

    #[test]
    fn rejects_out_of_bounds_positions() {
        let mut seed = minimal(8, 8);
        seed.pois = vec![poi_at("a", 8, 1)];
        assert!(validate(&seed).is_err());
    }

    #[test]
    fn rejects_regions_that_miss_the_map() {
        let mut seed = minimal(8, 8);
        let mut poi = poi_at("woods", 0, 0);
        poi.poi_type = PoiType::Forest;
        poi.position = None;
        poi.region = Some(RegionSpec {
            x_min: 20,
            x_max: Some(30),
            y_min: 0,
            y_max: Some(3),
        });
        seed.pois = vec![poi];
        assert!(validate(&seed).is_err());
    }

    #[test]
    fn rejects_dangling_connections() {
        let mut seed = minimal(8, 8);
        seed.pois = vec![poi_at("a", 1, 1)];
        seed.connections = vec![Connection {
            from: "a".to_string(),
            to: "ghost".to_string(),
            style: RoadStyle::Dirt,
        }];
        assert!(validate(&seed).is_err());
    }

    #[test]
    fn rejects_density_on_settlements() {
        let mut seed = minimal(8, 8);
        let mut poi = poi_at("a", 1, 1);
        poi.density = Some(0.5);
        seed.pois = vec![poi];
        assert!(validate(&seed).is_err());
    }
}
