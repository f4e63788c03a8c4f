//! Game Logic Module
//!
//! All game simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `config`: Level and physics configuration, validation
//! - `input`: Input frames, edge detection, recording
//! - `world`: Static platforms
//! - `entity`: Shared update/draw interface
//! - `player`, `coin`, `enemy`: Entity kinds
//! - `collision`: Player-vs-entity contact checks
//! - `session`: Session state and reset
//! - `tick`: Simulation step and replay
//! - `events`: Game events for logging/verification
//! - `render`: Draw surface contract

pub mod config;
pub mod input;
pub mod world;
pub mod render;
pub mod entity;
pub mod player;
pub mod coin;
pub mod enemy;
pub mod collision;
pub mod events;
pub mod session;
pub mod tick;

// Re-export key types
pub use config::{ConfigError, GameConfig, Level};
pub use input::{HeldKeys, InputFrame, InputLatch, InputRecording};
pub use session::{Session, SessionPhase};
pub use tick::{replay_session, tick, TickResult};
pub use events::{DeathCause, GameEvent, GameEventData};
