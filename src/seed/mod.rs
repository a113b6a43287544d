//! World seed schema and validation
//!
//! The world seed is the declarative input to the generator: dimensions,
//! biome, points of interest, connections, road endpoints, and slider
//! settings, all JSON-compatible.

/// Serde schema for the world seed
pub mod schema;
/// Cross-reference validation of parsed seeds
pub mod validate;

pub use schema::{
    Biome, CompassDirection, Connection, Poi, PoiSize, PoiType, Position, RegionSpec,
    RoadEndpoint, RoadStyle, SeedSize, TerrainOptions, WorldSeed,
};
pub use validate::validate;
