//! # Platformer
//!
//! Deterministic simulation core for a single-screen 2D platformer: a
//! player runs and jumps across static platforms, collects coins and stomps
//! walking enemies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        PLATFORMER                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point arithmetic             │
//! │  ├── rect.rs     - Axis-aligned rectangles                   │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── config.rs   - Level/physics config and validation       │
//! │  ├── input.rs    - Input frames, edge detection, recording   │
//! │  ├── world.rs    - Static platforms                          │
//! │  ├── player.rs   - Player movement and collision             │
//! │  ├── coin.rs     - Collectible coins                         │
//! │  ├── enemy.rs    - Patrolling enemies                        │
//! │  ├── collision.rs- Player-vs-entity contacts                 │
//! │  ├── session.rs  - Session state and reset                   │
//! │  ├── tick.rs     - Simulation step and replay                │
//! │  └── render.rs   - Draw surface contract                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No floating-point arithmetic in game logic (config floats are
//!   converted once, at validation)
//! - Entities are processed in level order
//! - No system time dependencies, no randomness
//!
//! Given identical inputs, the simulation produces **identical state
//! hashes** on any platform.
//!
//! ## Example
//!
//! ```
//! use platformer::{tick, GameConfig, InputFrame, Session};
//!
//! let mut session = Session::from_config(&GameConfig::default()).unwrap();
//! for _ in 0..60 {
//!     tick(&mut session, InputFrame::right());
//! }
//! assert!(session.player.on_ground);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use crate::core::rect::Rect;
pub use crate::game::config::{ConfigError, GameConfig, Level};
pub use crate::game::input::{HeldKeys, InputFrame, InputLatch, InputRecording};
pub use crate::game::session::{Session, SessionPhase};
pub use crate::game::tick::{replay_session, tick, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
