//! Wave function collapse terrain generation for tile-based fantasy maps
//!
//! The generator turns a declarative world seed into a finished tile map in
//! three phases: constraint-solved terrain, settlement stamping, and road
//! carving. Output is deterministic for a fixed world seed and RNG seed.

#![forbid(unsafe_code)]

/// Constraint solving: possibility masks, propagation, entropy selection, snapshots, and recovery
pub mod algorithm;
/// Tile catalog: tile kinds, adjacency declarations, and tile set construction
pub mod catalog;
/// Generation phases: terrain solve, settlement placement, road carving, map assembly
pub mod engine;
/// Input/output operations, progress reporting, and error handling
pub mod io;
/// Mathematical utilities for entropy and seeded sampling
pub mod math;
/// World seed schema and validation
pub mod seed;
/// Grid and cell state management
pub mod spatial;

pub use engine::map::Map;
pub use engine::{GenerateOptions, TerrainSliders, generate};
pub use io::error::{GenError, Result};
pub use seed::WorldSeed;
