//! Generator constants and runtime configuration defaults

// Solver limits
/// Default backtrack budget before the solver gives up and recovery runs
pub const DEFAULT_MAX_BACKTRACKS: usize = 500;

// Progress reporting settings
/// Collapses between progress emissions
pub const PROGRESS_COLLAPSE_INTERVAL: usize = 64;
/// Minimum milliseconds between progress emissions
pub const PROGRESS_MIN_INTERVAL_MS: u64 = 16;

// Animated mode
/// Default per-collapse delay when animation is enabled
pub const DEFAULT_ANIMATION_DELAY_MS: u64 = 10;

// Map dimension limits
/// Smallest supported map edge
pub const MIN_MAP_DIMENSION: usize = 4;
// Safety limit to prevent excessive memory allocation
/// Largest supported map edge
pub const MAX_MAP_DIMENSION: usize = 512;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Slider defaults applied when the world seed omits terrain options
/// Default forest density slider position
pub const DEFAULT_FOREST_DENSITY: f64 = 0.5;
/// Default water level slider position
pub const DEFAULT_WATER_LEVEL: f64 = 0.3;
/// Default settlement cap
pub const DEFAULT_VILLAGE_COUNT: usize = 3;

// Output settings
/// Suffix added to output filenames by the CLI
pub const OUTPUT_SUFFIX: &str = "_map";
