//! Symmetric adjacency declarations for the tile catalog
//!
//! Every pairing is declared from both sides; [`crate::catalog::TileSet`]
//! construction rejects a catalog in which any declaration lacks its
//! mirror. The terrain relation is deliberately dense — every terrain tile
//! reaches the grass hub directly or through one intermediate kind — so the
//! solver almost never deadlocks on plain biomes.

use crate::catalog::tiles::Tile;

/// Terrain-mode neighbors declared for a tile
///
/// Structure tiles have no terrain-mode declarations and return an empty
/// slice; they are absent from the terrain catalog entirely.
pub const fn terrain_neighbors(tile: Tile) -> &'static [Tile] {
    use Tile::{
        AutumnForest, Cliffs, DeepWater, DenseForest, FlowerField, Forest, Glen, Grass, Highlands,
        Hills, Marsh, Meadow, Mountains, Peak, PineForest, Sand, Scrubland, ShallowWater, Snow,
        Swamp, Water,
    };
    match tile {
        DeepWater => &[DeepWater, Water],
        Water => &[DeepWater, Water, ShallowWater, Grass, Sand, Marsh],
        ShallowWater => &[Water, ShallowWater, Sand, Grass, Marsh, Swamp],
        Marsh => &[Water, ShallowWater, Marsh, Swamp, Grass, Meadow],
        Swamp => &[ShallowWater, Marsh, Swamp, Grass, Forest],
        Sand => &[
            Water,
            ShallowWater,
            Sand,
            Grass,
            Meadow,
            Scrubland,
            Forest,
            Hills,
        ],
        Grass => &[
            Water,
            ShallowWater,
            Marsh,
            Swamp,
            Sand,
            Grass,
            Meadow,
            Glen,
            Scrubland,
            FlowerField,
            Forest,
            DenseForest,
            PineForest,
            AutumnForest,
            Hills,
            Highlands,
            Mountains,
            Snow,
        ],
        Meadow => &[
            Marsh,
            Sand,
            Grass,
            Meadow,
            Glen,
            Scrubland,
            FlowerField,
            Forest,
            AutumnForest,
            Hills,
        ],
        Glen => &[Grass, Meadow, Glen, Forest, DenseForest, Hills],
        Scrubland => &[Sand, Grass, Meadow, Scrubland, Hills, Highlands],
        FlowerField => &[Grass, Meadow, FlowerField, Forest],
        Forest => &[
            Swamp,
            Sand,
            Grass,
            Meadow,
            Glen,
            FlowerField,
            Forest,
            DenseForest,
            PineForest,
            AutumnForest,
            Hills,
        ],
        DenseForest => &[Grass, Glen, Forest, DenseForest, PineForest],
        PineForest => &[
            Grass,
            Forest,
            DenseForest,
            PineForest,
            Hills,
            Highlands,
            Mountains,
            Cliffs,
            Snow,
        ],
        AutumnForest => &[Grass, Meadow, Forest, AutumnForest, Hills],
        Hills => &[
            Sand,
            Grass,
            Meadow,
            Glen,
            Scrubland,
            Forest,
            PineForest,
            AutumnForest,
            Hills,
            Highlands,
            Mountains,
            Snow,
        ],
        Highlands => &[
            Grass,
            Scrubland,
            PineForest,
            Hills,
            Highlands,
            Mountains,
            Cliffs,
            Snow,
        ],
        Mountains => &[
            Grass,
            PineForest,
            Hills,
            Highlands,
            Mountains,
            Cliffs,
            Peak,
            Snow,
        ],
        Cliffs => &[PineForest, Highlands, Mountains, Cliffs, Peak],
        Peak => &[Mountains, Cliffs, Peak, Snow],
        Snow => &[Grass, PineForest, Hills, Highlands, Mountains, Peak, Snow],
        _ => &[],
    }
}

/// Full-mode additions for a tile
///
/// For terrain tiles these are the structures the tile may border; for
/// structure tiles this is the complete declared neighbor list. The full
/// relation for any tile is [`terrain_neighbors`] unioned with this slice.
pub const fn structure_links(tile: Tile) -> &'static [Tile] {
    use Tile::{
        Bridge, BuildingStone, BuildingWood, CastleTower, CastleWall, Church, DirtRoad, Dock,
        FarmField, Forest, Graveyard, Grass, Hills, Market, Marsh, Meadow, Sand, Scrubland,
        ShallowWater, StoneRoad, Tent, Water, Well, Windmill,
    };
    match tile {
        Grass => &[
            DirtRoad,
            StoneRoad,
            BuildingWood,
            BuildingStone,
            Market,
            CastleWall,
            CastleTower,
            FarmField,
            Well,
            Windmill,
            Church,
            Graveyard,
            Tent,
        ],
        Meadow => &[
            DirtRoad,
            StoneRoad,
            BuildingWood,
            BuildingStone,
            Market,
            FarmField,
            Well,
            Windmill,
            Church,
            Graveyard,
            Tent,
        ],
        Sand => &[DirtRoad, StoneRoad, BuildingWood, FarmField, Dock, Tent],
        Scrubland => &[DirtRoad, Tent],
        Forest => &[DirtRoad, FarmField],
        Hills => &[
            DirtRoad,
            StoneRoad,
            BuildingStone,
            CastleWall,
            CastleTower,
            Windmill,
        ],
        Water => &[Bridge, Dock],
        ShallowWater => &[Bridge, Dock],
        Marsh => &[Bridge],
        DirtRoad => &[
            Grass,
            Meadow,
            Sand,
            Scrubland,
            Forest,
            Hills,
            FarmField,
            DirtRoad,
            StoneRoad,
            Bridge,
            BuildingWood,
            BuildingStone,
            Market,
            Dock,
            Well,
            Windmill,
            Church,
            Graveyard,
            Tent,
        ],
        StoneRoad => &[
            Grass,
            Meadow,
            Sand,
            Hills,
            FarmField,
            DirtRoad,
            StoneRoad,
            Bridge,
            BuildingWood,
            BuildingStone,
            Market,
            CastleWall,
            CastleTower,
            Church,
            Graveyard,
            Dock,
        ],
        Bridge => &[Water, ShallowWater, Marsh, DirtRoad, StoneRoad],
        BuildingWood => &[
            Grass,
            Meadow,
            Sand,
            FarmField,
            DirtRoad,
            StoneRoad,
            BuildingWood,
            BuildingStone,
            Market,
            Well,
            Tent,
            Dock,
        ],
        BuildingStone => &[
            Grass,
            Meadow,
            Hills,
            DirtRoad,
            StoneRoad,
            BuildingWood,
            BuildingStone,
            Market,
            CastleWall,
            Church,
            Graveyard,
            Well,
        ],
        Market => &[
            Grass,
            Meadow,
            DirtRoad,
            StoneRoad,
            BuildingWood,
            BuildingStone,
            Well,
        ],
        CastleWall => &[Grass, Hills, StoneRoad, BuildingStone, CastleWall, CastleTower],
        CastleTower => &[CastleWall, StoneRoad, Hills, Grass],
        FarmField => &[
            Grass,
            Meadow,
            Sand,
            Forest,
            FarmField,
            DirtRoad,
            StoneRoad,
            BuildingWood,
            Windmill,
        ],
        Dock => &[
            Water,
            ShallowWater,
            Sand,
            DirtRoad,
            StoneRoad,
            BuildingWood,
            Dock,
        ],
        Well => &[Grass, Meadow, DirtRoad, BuildingWood, BuildingStone, Market],
        Windmill => &[Grass, Meadow, Hills, FarmField, DirtRoad],
        Church => &[Grass, Meadow, DirtRoad, StoneRoad, BuildingStone, Graveyard],
        Graveyard => &[
            Grass,
            Meadow,
            Church,
            DirtRoad,
            StoneRoad,
            BuildingStone,
            Graveyard,
        ],
        Tent => &[Grass, Meadow, Sand, Scrubland, DirtRoad, BuildingWood, Tent],
        _ => &[],
    }
}
