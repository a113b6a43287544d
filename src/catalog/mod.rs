//! Tile catalog: enumerated tile kinds and the adjacency relation
//!
//! This module contains catalog-related functionality including:
//! - The static tile enumeration and per-tile metadata
//! - Symmetric adjacency declarations for terrain and structures
//! - Validated tile set construction and queries

/// Adjacency declarations per tile
pub mod adjacency;
/// Tile enumeration and kind metadata
pub mod tiles;
/// Validated tile set construction and queries
pub mod tileset;

pub use tiles::{Tile, TileCategory, TileKind};
pub use tileset::{CatalogMode, TileSet};
