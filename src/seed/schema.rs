//! Serde schema for the world seed
//!
//! Wire names follow the editor's JSON conventions: camelCase for the
//! multi-word top-level keys, snake_case for region bounds and tile names.

use crate::catalog::tiles::Tile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declarative input describing the map to generate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSeed {
    /// Display name of the world
    pub name: String,
    /// Optional flavor text, opaque to the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Map dimensions in tiles
    pub size: SeedSize,
    /// Biome-wide weight tilt
    pub biome: Biome,
    /// Rendering hint passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_theme: Option<String>,
    /// Points of interest, positional or regional
    #[serde(default)]
    pub pois: Vec<Poi>,
    /// Roads between points of interest
    #[serde(default)]
    pub connections: Vec<Connection>,
    /// Roads running off the map edge
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub road_endpoints: Vec<RoadEndpoint>,
    /// Slider settings; defaults apply when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain_options: Option<TerrainOptions>,
    /// Per-tile base weight overrides applied at catalog construction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<Tile, f64>>,
}

/// Map dimensions in tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSize {
    /// Width in tiles
    pub width: usize,
    /// Height in tiles
    pub height: usize,
}

/// Biome-wide flavor of the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    /// Mild mixed terrain
    Temperate,
    /// Lush and wet
    Tropical,
    /// Sand and scrub
    Desert,
    /// Snow and pine
    Arctic,
    /// Bare rock and cliffs
    Volcanic,
    /// Shorelines and shallow seas
    Coastal,
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperate => "temperate",
            Self::Tropical => "tropical",
            Self::Desert => "desert",
            Self::Arctic => "arctic",
            Self::Volcanic => "volcanic",
            Self::Coastal => "coastal",
        };
        f.write_str(name)
    }
}

/// A named location in the world seed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    /// Unique identifier referenced by connections
    pub id: String,
    /// What the location is
    #[serde(rename = "type")]
    pub poi_type: PoiType,
    /// Display name
    pub name: String,
    /// Footprint scale for stamped settlements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PoiSize>,
    /// Exact placement; mutually exclusive with `region`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Placement area; mutually exclusive with `position`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionSpec>,
    /// Bias strength for regional terrain zones, 0 to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    /// Optional flavor text, opaque to the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rendering hint passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<String>,
}

/// What a point of interest is
///
/// Settlement types are stamped onto the solved terrain; terrain types only
/// bias solver weights inside their region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiType {
    /// Small settlement of wooden buildings
    Village,
    /// Walled stone settlement with a market
    City,
    /// Fortified keep
    Castle,
    /// Farmstead with fields
    Farm,
    /// Roadside tavern
    Tavern,
    /// Lone watchtower
    Tower,
    /// Harbor with a dock
    Port,
    /// Scattered ruins
    Ruins,
    /// Open water zone
    Lake,
    /// Woodland zone
    Forest,
    /// Mountainous zone
    Mountain,
    /// Wetland zone
    Swamp,
    /// Open grassland zone
    Plains,
    /// Rolling hill zone
    Hills,
}

impl PoiType {
    /// Whether this type is a terrain zone rather than a settlement
    pub const fn is_terrain(self) -> bool {
        matches!(
            self,
            Self::Lake | Self::Forest | Self::Mountain | Self::Swamp | Self::Plains | Self::Hills
        )
    }
}

/// Footprint scale of a stamped settlement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiSize {
    /// Minimal footprint
    Small,
    /// Default footprint
    Medium,
    /// Expanded footprint
    Large,
}

impl PoiSize {
    /// Numeric scale used by stamp patterns and road lengths
    pub const fn scale(self) -> usize {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
        }
    }
}

/// Exact tile coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Column, 0-based from the west edge
    pub x: i64,
    /// Row, 0-based from the north edge
    pub y: i64,
}

/// Inclusive coordinate rectangle; omitted maxima extend to the map edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSpec {
    /// Western bound, inclusive
    pub x_min: i64,
    /// Eastern bound, inclusive; map edge when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_max: Option<i64>,
    /// Northern bound, inclusive
    pub y_min: i64,
    /// Southern bound, inclusive; map edge when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_max: Option<i64>,
}

/// A road between two points of interest
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Id of the starting point of interest
    pub from: String,
    /// Id of the ending point of interest
    pub to: String,
    /// Road surface
    #[serde(default)]
    pub style: RoadStyle,
}

/// Road surface material
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadStyle {
    /// Packed earth
    #[default]
    Dirt,
    /// Paved stone
    Stone,
}

impl RoadStyle {
    /// The tile this style carves
    pub const fn tile(self) -> Tile {
        match self {
            Self::Dirt => Tile::DirtRoad,
            Self::Stone => Tile::StoneRoad,
        }
    }
}

/// A road running off the map edge
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadEndpoint {
    /// Which edge or corner the road exits through
    pub direction: CompassDirection,
    /// Road surface
    #[serde(default)]
    pub style: RoadStyle,
    /// Name of where the road leads, opaque to the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Optional flavor text, opaque to the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Edge or corner of the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassDirection {
    /// North edge midpoint
    N,
    /// South edge midpoint
    S,
    /// East edge midpoint
    E,
    /// West edge midpoint
    W,
    /// Northeast corner
    NE,
    /// Northwest corner
    NW,
    /// Southeast corner
    SE,
    /// Southwest corner
    SW,
}

impl CompassDirection {
    /// The edge coordinate this direction resolves to on a W×H map
    pub const fn edge_coordinate(self, width: usize, height: usize) -> (usize, usize) {
        let right = width.saturating_sub(1);
        let bottom = height.saturating_sub(1);
        match self {
            Self::N => (width / 2, 0),
            Self::S => (width / 2, bottom),
            Self::E => (right, height / 2),
            Self::W => (0, height / 2),
            Self::NE => (right, 0),
            Self::NW => (0, 0),
            Self::SE => (right, bottom),
            Self::SW => (0, bottom),
        }
    }
}

/// Slider settings carried in the world seed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainOptions {
    /// Forest density slider, 0 to 1
    pub forest_density: f64,
    /// Water level slider, 0 to 1
    pub water_level: f64,
    /// Upper bound on stamped settlements
    pub village_count: usize,
}
