//! Static tile enumeration and per-tile metadata
//!
//! Tile identity is a closed enum rather than interned strings so that
//! possibility sets become fixed-width bitmasks and every lookup is an
//! array index. The wire format still uses the snake_case tile names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a tile kind
///
/// Terrain tiles come first in declaration order, structure tiles after;
/// [`Tile::index`] follows this order and is stable for a given build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    /// Open deep water, only borders other water
    DeepWater,
    /// Standard open water
    Water,
    /// Shallow water fringe, passable by foot
    ShallowWater,
    /// Reedy wetland transition
    Marsh,
    /// Waterlogged woodland
    Swamp,
    /// Beach and riverbank sand
    Sand,
    /// Open grassland, the adjacency hub of the terrain catalog
    Grass,
    /// Flowering pasture
    Meadow,
    /// Sheltered grassy clearing
    Glen,
    /// Dry brush and shrubs
    Scrubland,
    /// Dense wildflower cover
    FlowerField,
    /// Broadleaf forest
    Forest,
    /// Thick old-growth forest
    DenseForest,
    /// Conifer forest
    PineForest,
    /// Seasonal broadleaf forest
    AutumnForest,
    /// Rolling hills
    Hills,
    /// High moorland
    Highlands,
    /// Mountain slopes
    Mountains,
    /// Sheer rock faces
    Cliffs,
    /// Mountain summit
    Peak,
    /// Permanent snow cover
    Snow,
    /// Packed earth road
    DirtRoad,
    /// Paved stone road
    StoneRoad,
    /// Road crossing over water
    Bridge,
    /// Timber building
    BuildingWood,
    /// Stone building
    BuildingStone,
    /// Market square
    Market,
    /// Castle curtain wall
    CastleWall,
    /// Castle keep tower
    CastleTower,
    /// Tilled cropland
    FarmField,
    /// Harbor dock
    Dock,
    /// Village well
    Well,
    /// Grain windmill
    Windmill,
    /// Village church
    Church,
    /// Churchyard graves
    Graveyard,
    /// Nomad or military tent
    Tent,
}

/// Number of tile kinds in the full catalog
pub const TILE_COUNT: usize = 36;

/// All tiles in declaration order
pub const ALL_TILES: [Tile; TILE_COUNT] = [
    Tile::DeepWater,
    Tile::Water,
    Tile::ShallowWater,
    Tile::Marsh,
    Tile::Swamp,
    Tile::Sand,
    Tile::Grass,
    Tile::Meadow,
    Tile::Glen,
    Tile::Scrubland,
    Tile::FlowerField,
    Tile::Forest,
    Tile::DenseForest,
    Tile::PineForest,
    Tile::AutumnForest,
    Tile::Hills,
    Tile::Highlands,
    Tile::Mountains,
    Tile::Cliffs,
    Tile::Peak,
    Tile::Snow,
    Tile::DirtRoad,
    Tile::StoneRoad,
    Tile::Bridge,
    Tile::BuildingWood,
    Tile::BuildingStone,
    Tile::Market,
    Tile::CastleWall,
    Tile::CastleTower,
    Tile::FarmField,
    Tile::Dock,
    Tile::Well,
    Tile::Windmill,
    Tile::Church,
    Tile::Graveyard,
    Tile::Tent,
];

/// Broad grouping of tile kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileCategory {
    /// Open water
    Water,
    /// Marsh and swamp
    Wetland,
    /// Beaches and banks
    Shoreline,
    /// Open ground
    Terrain,
    /// Wooded ground
    Forest,
    /// Hills and mountains
    Highland,
    /// Roads and bridges
    Road,
    /// Constructed tiles
    Building,
    /// Cropland
    Farm,
    /// Everything else
    Special,
}

/// Species of tree drawn on forested tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeType {
    /// Broadleaf oak
    Oak,
    /// Conifer pine
    Pine,
    /// Seasonal birch
    Birch,
}

/// Immutable metadata for one tile kind
#[derive(Clone, Debug)]
pub struct TileKind {
    /// Tile identity
    pub id: Tile,
    /// Base sampling weight, strictly positive
    pub weight: f64,
    /// Whether units can walk this tile
    pub walkable: bool,
    /// Coarse elevation step
    pub height: u8,
    /// Broad grouping
    pub category: TileCategory,
    /// Whether the tile carries trees
    pub tree: bool,
    /// Species of tree when `tree` is set
    pub tree_type: Option<TreeType>,
    /// Whether the tile carries flower cover
    pub flowers: bool,
    /// Flat preview color
    pub display_color: [u8; 3],
    /// Flat color for segmentation exports
    pub segmentation_color: [u8; 3],
}

impl Tile {
    /// Stable position of this tile in [`ALL_TILES`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Tile::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_TILES.get(index).copied()
    }

    /// Wire name of the tile, matching its serde representation
    pub const fn name(self) -> &'static str {
        match self {
            Self::DeepWater => "deep_water",
            Self::Water => "water",
            Self::ShallowWater => "shallow_water",
            Self::Marsh => "marsh",
            Self::Swamp => "swamp",
            Self::Sand => "sand",
            Self::Grass => "grass",
            Self::Meadow => "meadow",
            Self::Glen => "glen",
            Self::Scrubland => "scrubland",
            Self::FlowerField => "flower_field",
            Self::Forest => "forest",
            Self::DenseForest => "dense_forest",
            Self::PineForest => "pine_forest",
            Self::AutumnForest => "autumn_forest",
            Self::Hills => "hills",
            Self::Highlands => "highlands",
            Self::Mountains => "mountains",
            Self::Cliffs => "cliffs",
            Self::Peak => "peak",
            Self::Snow => "snow",
            Self::DirtRoad => "dirt_road",
            Self::StoneRoad => "stone_road",
            Self::Bridge => "bridge",
            Self::BuildingWood => "building_wood",
            Self::BuildingStone => "building_stone",
            Self::Market => "market",
            Self::CastleWall => "castle_wall",
            Self::CastleTower => "castle_tower",
            Self::FarmField => "farm_field",
            Self::Dock => "dock",
            Self::Well => "well",
            Self::Windmill => "windmill",
            Self::Church => "church",
            Self::Graveyard => "graveyard",
            Self::Tent => "tent",
        }
    }

    /// Look up a tile by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_TILES.iter().copied().find(|t| t.name() == name)
    }

    /// Whether this tile is placed by settlement stamping or road carving
    /// rather than by the terrain solver
    pub const fn is_structure(self) -> bool {
        matches!(
            self.kind().category,
            TileCategory::Road | TileCategory::Building | TileCategory::Farm
        )
    }

    /// Immutable metadata for this tile
    pub const fn kind(self) -> TileKind {
        match self {
            Self::DeepWater => TileKind {
                id: self,
                weight: 0.04,
                walkable: false,
                height: 0,
                category: TileCategory::Water,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [18, 52, 110],
                segmentation_color: [0, 0, 128],
            },
            Self::Water => TileKind {
                id: self,
                weight: 0.06,
                walkable: false,
                height: 0,
                category: TileCategory::Water,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [36, 84, 158],
                segmentation_color: [0, 0, 200],
            },
            Self::ShallowWater => TileKind {
                id: self,
                weight: 0.07,
                walkable: true,
                height: 0,
                category: TileCategory::Water,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [82, 142, 204],
                segmentation_color: [0, 64, 255],
            },
            Self::Marsh => TileKind {
                id: self,
                weight: 0.025,
                walkable: true,
                height: 0,
                category: TileCategory::Wetland,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [86, 120, 86],
                segmentation_color: [0, 128, 128],
            },
            Self::Swamp => TileKind {
                id: self,
                weight: 0.02,
                walkable: true,
                height: 0,
                category: TileCategory::Wetland,
                tree: true,
                tree_type: Some(TreeType::Oak),
                flowers: false,
                display_color: [64, 92, 62],
                segmentation_color: [32, 96, 96],
            },
            Self::Sand => TileKind {
                id: self,
                weight: 0.05,
                walkable: true,
                height: 0,
                category: TileCategory::Shoreline,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [222, 203, 140],
                segmentation_color: [255, 255, 0],
            },
            Self::Grass => TileKind {
                id: self,
                weight: 0.16,
                walkable: true,
                height: 1,
                category: TileCategory::Terrain,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [110, 166, 80],
                segmentation_color: [0, 255, 0],
            },
            Self::Meadow => TileKind {
                id: self,
                weight: 0.13,
                walkable: true,
                height: 1,
                category: TileCategory::Terrain,
                tree: false,
                tree_type: None,
                flowers: true,
                display_color: [134, 186, 94],
                segmentation_color: [64, 255, 64],
            },
            Self::Glen => TileKind {
                id: self,
                weight: 0.06,
                walkable: true,
                height: 1,
                category: TileCategory::Terrain,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [96, 156, 88],
                segmentation_color: [96, 255, 96],
            },
            Self::Scrubland => TileKind {
                id: self,
                weight: 0.05,
                walkable: true,
                height: 1,
                category: TileCategory::Terrain,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [150, 152, 96],
                segmentation_color: [160, 200, 60],
            },
            Self::FlowerField => TileKind {
                id: self,
                weight: 0.03,
                walkable: true,
                height: 1,
                category: TileCategory::Terrain,
                tree: false,
                tree_type: None,
                flowers: true,
                display_color: [170, 150, 190],
                segmentation_color: [255, 128, 255],
            },
            Self::Forest => TileKind {
                id: self,
                weight: 0.11,
                walkable: true,
                height: 1,
                category: TileCategory::Forest,
                tree: true,
                tree_type: Some(TreeType::Oak),
                flowers: false,
                display_color: [52, 110, 52],
                segmentation_color: [0, 128, 0],
            },
            Self::DenseForest => TileKind {
                id: self,
                weight: 0.07,
                walkable: true,
                height: 2,
                category: TileCategory::Forest,
                tree: true,
                tree_type: Some(TreeType::Oak),
                flowers: false,
                display_color: [34, 82, 38],
                segmentation_color: [0, 96, 0],
            },
            Self::PineForest => TileKind {
                id: self,
                weight: 0.05,
                walkable: true,
                height: 2,
                category: TileCategory::Forest,
                tree: true,
                tree_type: Some(TreeType::Pine),
                flowers: false,
                display_color: [40, 90, 66],
                segmentation_color: [0, 112, 64],
            },
            Self::AutumnForest => TileKind {
                id: self,
                weight: 0.03,
                walkable: true,
                height: 1,
                category: TileCategory::Forest,
                tree: true,
                tree_type: Some(TreeType::Birch),
                flowers: false,
                display_color: [170, 110, 48],
                segmentation_color: [192, 128, 0],
            },
            Self::Hills => TileKind {
                id: self,
                weight: 0.08,
                walkable: true,
                height: 2,
                category: TileCategory::Highland,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [140, 132, 96],
                segmentation_color: [128, 128, 0],
            },
            Self::Highlands => TileKind {
                id: self,
                weight: 0.03,
                walkable: true,
                height: 3,
                category: TileCategory::Highland,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [124, 112, 88],
                segmentation_color: [160, 128, 32],
            },
            Self::Mountains => TileKind {
                id: self,
                weight: 0.025,
                walkable: false,
                height: 4,
                category: TileCategory::Highland,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [110, 104, 100],
                segmentation_color: [128, 96, 64],
            },
            Self::Cliffs => TileKind {
                id: self,
                weight: 0.01,
                walkable: false,
                height: 4,
                category: TileCategory::Highland,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [92, 86, 84],
                segmentation_color: [96, 64, 32],
            },
            Self::Peak => TileKind {
                id: self,
                weight: 0.008,
                walkable: false,
                height: 5,
                category: TileCategory::Highland,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [200, 200, 208],
                segmentation_color: [224, 224, 224],
            },
            Self::Snow => TileKind {
                id: self,
                weight: 0.006,
                walkable: true,
                height: 3,
                category: TileCategory::Special,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [236, 240, 244],
                segmentation_color: [255, 255, 255],
            },
            Self::DirtRoad => TileKind {
                id: self,
                weight: 0.02,
                walkable: true,
                height: 1,
                category: TileCategory::Road,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [150, 120, 84],
                segmentation_color: [128, 64, 0],
            },
            Self::StoneRoad => TileKind {
                id: self,
                weight: 0.015,
                walkable: true,
                height: 1,
                category: TileCategory::Road,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [160, 158, 150],
                segmentation_color: [160, 160, 160],
            },
            Self::Bridge => TileKind {
                id: self,
                weight: 0.004,
                walkable: true,
                height: 1,
                category: TileCategory::Road,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [132, 104, 72],
                segmentation_color: [192, 96, 0],
            },
            Self::BuildingWood => TileKind {
                id: self,
                weight: 0.02,
                walkable: false,
                height: 1,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [132, 96, 60],
                segmentation_color: [255, 0, 0],
            },
            Self::BuildingStone => TileKind {
                id: self,
                weight: 0.015,
                walkable: false,
                height: 2,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [146, 140, 134],
                segmentation_color: [200, 0, 0],
            },
            Self::Market => TileKind {
                id: self,
                weight: 0.004,
                walkable: true,
                height: 1,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [196, 154, 96],
                segmentation_color: [255, 96, 0],
            },
            Self::CastleWall => TileKind {
                id: self,
                weight: 0.006,
                walkable: false,
                height: 3,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [120, 118, 116],
                segmentation_color: [144, 0, 0],
            },
            Self::CastleTower => TileKind {
                id: self,
                weight: 0.003,
                walkable: false,
                height: 4,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [104, 102, 104],
                segmentation_color: [112, 0, 0],
            },
            Self::FarmField => TileKind {
                id: self,
                weight: 0.02,
                walkable: true,
                height: 1,
                category: TileCategory::Farm,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [188, 160, 98],
                segmentation_color: [255, 192, 0],
            },
            Self::Dock => TileKind {
                id: self,
                weight: 0.003,
                walkable: true,
                height: 0,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [124, 98, 70],
                segmentation_color: [0, 160, 255],
            },
            Self::Well => TileKind {
                id: self,
                weight: 0.002,
                walkable: false,
                height: 1,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [128, 136, 144],
                segmentation_color: [0, 200, 200],
            },
            Self::Windmill => TileKind {
                id: self,
                weight: 0.002,
                walkable: false,
                height: 2,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [168, 148, 110],
                segmentation_color: [255, 224, 128],
            },
            Self::Church => TileKind {
                id: self,
                weight: 0.002,
                walkable: false,
                height: 2,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [176, 170, 160],
                segmentation_color: [224, 224, 255],
            },
            Self::Graveyard => TileKind {
                id: self,
                weight: 0.002,
                walkable: true,
                height: 1,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [108, 118, 104],
                segmentation_color: [96, 96, 128],
            },
            Self::Tent => TileKind {
                id: self,
                weight: 0.002,
                walkable: true,
                height: 1,
                category: TileCategory::Building,
                tree: false,
                tree_type: None,
                flowers: false,
                display_color: [184, 166, 132],
                segmentation_color: [255, 160, 160],
            },
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
