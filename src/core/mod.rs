//! Core deterministic primitives.
//!
//! Fixed-point numbers, the rectangle every entity is built from, and the
//! state hasher used for replay verification. Nothing here knows about
//! players, coins or enemies.

pub mod fixed;
pub mod rect;
pub mod hash;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use rect::Rect;
pub use hash::{compute_state_hash, StateHash, StateHasher};
