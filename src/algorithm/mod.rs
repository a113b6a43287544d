//! Constraint solving for the terrain phase
//!
//! This module contains the wave function collapse machinery:
//! - Possibility bitmasks over the tile enumeration
//! - Worklist constraint propagation with contradiction detection
//! - Entropy-ordered cell selection with lazy deletion
//! - Per-step undo journal for backtracking
//! - The solver loop and the post-failure recovery pass

/// Fixed-width tile bitmask
pub mod mask;
/// Worklist constraint propagation
pub mod propagation;
/// Fallback fill after backtrack exhaustion
pub mod recovery;
/// Entropy-ordered cell selection
pub mod selection;
/// Undo journal for backtracking
pub mod snapshot;
/// Solver loop and outcomes
pub mod solver;

pub use mask::TileMask;
pub use solver::{SolveReport, SolveStatus, Solver};
