//! Level and Physics Configuration
//!
//! `GameConfig` is the human-editable description of a level: screen size,
//! movement tuning, scoring and the entity layout, all in float pixels so it
//! can be written as JSON. `GameConfig::validate` turns it into a [`Level`],
//! the immutable fixed-point value a [`Session`](crate::game::session::Session)
//! is built from.
//!
//! Every field has a default, and `#[serde(default)]` lets a JSON file
//! override only the values it names:
//!
//! ```
//! use platformer::game::config::GameConfig;
//! let config = GameConfig::from_json_str(r#"{ "physics": { "gravity": 1.2 } }"#).unwrap();
//! assert_eq!(config.physics.gravity, 1.2);
//! assert_eq!(config.screen.width, 800.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::fixed::{checked_from_f64, from_int, Fixed, CONFIG_LIMIT};
use crate::core::rect::Rect;
use crate::game::world::World;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Screen width in pixels
pub const SCREEN_WIDTH: f64 = 800.0;
/// Screen height in pixels
pub const SCREEN_HEIGHT: f64 = 600.0;
/// Ticks per second
pub const FPS: u32 = 60;

/// Player body width in pixels
pub const PLAYER_WIDTH: f64 = 32.0;
/// Player body height in pixels
pub const PLAYER_HEIGHT: f64 = 48.0;
/// Horizontal speed in pixels per tick
pub const PLAYER_SPEED: f64 = 5.0;
/// Initial jump velocity in pixels per tick (negative is up)
pub const JUMP_SPEED: f64 = -15.0;
/// Downward acceleration in pixels per tick²
pub const GRAVITY: f64 = 0.8;
/// Max `player.bottom - enemy.top` that still counts as landing on top
pub const STOMP_TOLERANCE: f64 = 10.0;

/// Coin side length
pub const COIN_SIZE: f64 = 20.0;
/// Enemy side length
pub const ENEMY_SIZE: f64 = 30.0;
/// Starting enemy velocity (walks left)
pub const ENEMY_SPEED: f64 = -2.0;

/// Points per coin
pub const COIN_POINTS: u32 = 10;
/// Points per stomped enemy
pub const STOMP_POINTS: u32 = 50;

// =============================================================================
// ERRORS
// =============================================================================

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rectangle (or the screen) with zero or negative width/height
    #[error("{what} must have positive size, got {width}x{height}")]
    NonPositiveSize {
        /// Which rectangle
        what: String,
        /// Configured width
        width: f64,
        /// Configured height
        height: f64,
    },

    /// NaN, infinite, or too large for fixed-point
    #[error("{field} is not a usable number: {value}")]
    InvalidNumber {
        /// Dotted field name
        field: String,
        /// Rejected value
        value: f64,
    },

    /// A value that must be zero or positive
    #[error("{field} must not be negative, got {value}")]
    NegativeValue {
        /// Dotted field name
        field: String,
        /// Rejected value
        value: f64,
    },

    /// A rectangle whose right or bottom edge lies past [`CONFIG_LIMIT`]
    #[error("{what} extends past the {limit} px coordinate limit")]
    OutOfRange {
        /// Which rectangle
        what: String,
        /// The limit it crossed
        limit: f64,
    },

    /// `screen.fps` was zero
    #[error("fps must be at least 1")]
    ZeroFps,

    /// The config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config text is not valid JSON for [`GameConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// RAW (SERDE) CONFIG
// =============================================================================

/// Screen dimensions and tick rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
    /// Ticks per second
    pub fps: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fps: FPS,
        }
    }
}

/// Player movement tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Player body width
    pub player_width: f64,
    /// Player body height
    pub player_height: f64,
    /// Horizontal speed (pixels/tick)
    pub player_speed: f64,
    /// Velocity set by a jump (negative is up)
    pub jump_speed: f64,
    /// Downward acceleration (pixels/tick²)
    pub gravity: f64,
    /// How deep a falling player may be and still stomp
    pub stomp_tolerance: f64,
    /// Vertical velocity after a stomp. Defaults to `floor(jump_speed / 2)`.
    pub stomp_bounce: Option<f64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
            stomp_tolerance: STOMP_TOLERANCE,
            stomp_bounce: None,
        }
    }
}

/// Points awarded per event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points per coin
    pub coin_points: u32,
    /// Points per stomped enemy
    pub stomp_points: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coin_points: COIN_POINTS,
            stomp_points: STOMP_POINTS,
        }
    }
}

/// A point in float pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointSpec {
    /// Horizontal
    pub x: f64,
    /// Vertical
    pub y: f64,
}

impl PointSpec {
    /// Point at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in float pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl RectSpec {
    /// Rectangle from its top-left corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Entity layout of the single level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Player spawn (top-left corner)
    pub spawn: PointSpec,
    /// Platforms in collision order
    pub platforms: Vec<RectSpec>,
    /// Coin top-left corners
    pub coins: Vec<PointSpec>,
    /// Enemy top-left corners
    pub enemies: Vec<PointSpec>,
    /// Coin side length
    pub coin_size: f64,
    /// Enemy side length
    pub enemy_size: f64,
    /// Initial horizontal velocity of every enemy
    pub enemy_speed: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        let (w, h) = (SCREEN_WIDTH, SCREEN_HEIGHT);
        Self {
            spawn: PointSpec::new(50.0, h - 200.0),
            platforms: vec![
                RectSpec::new(0.0, h - 40.0, w, 40.0), // ground
                RectSpec::new(200.0, h - 120.0, 150.0, 20.0),
                RectSpec::new(400.0, h - 200.0, 150.0, 20.0),
                RectSpec::new(600.0, h - 160.0, 150.0, 20.0),
            ],
            coins: vec![
                PointSpec::new(250.0, h - 150.0),
                PointSpec::new(450.0, h - 230.0),
                PointSpec::new(650.0, h - 190.0),
                PointSpec::new(300.0, h - 70.0),
                PointSpec::new(500.0, h - 70.0),
            ],
            enemies: vec![
                PointSpec::new(250.0, h - 150.0),
                PointSpec::new(450.0, h - 230.0),
            ],
            coin_size: COIN_SIZE,
            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen size and tick rate
    pub screen: ScreenConfig,
    /// Player movement
    pub physics: PhysicsConfig,
    /// Points
    pub scoring: ScoringConfig,
    /// Entity layout
    pub level: LevelConfig,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validate and convert to fixed-point.
    pub fn validate(&self) -> Result<Level, ConfigError> {
        if self.screen.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        let screen = size("screen", self.screen.width, self.screen.height)?;

        let p = &self.physics;
        let player = size("player", p.player_width, p.player_height)?;
        let bounce = p.stomp_bounce.unwrap_or((p.jump_speed / 2.0).floor());

        let physics = Physics {
            screen_width: screen.0,
            screen_height: screen.1,
            player_width: player.0,
            player_height: player.1,
            player_speed: non_negative("physics.player_speed", p.player_speed)?,
            jump_speed: fixed("physics.jump_speed", p.jump_speed)?,
            gravity: non_negative("physics.gravity", p.gravity)?,
            stomp_bounce: fixed("physics.stomp_bounce", bounce)?,
            stomp_tolerance: non_negative("physics.stomp_tolerance", p.stomp_tolerance)?,
        };

        let l = &self.level;
        let platforms = l
            .platforms
            .iter()
            .enumerate()
            .map(|(i, spec)| rect(&format!("platform {i}"), *spec))
            .collect::<Result<Vec<_>, _>>()?;

        let coins = l
            .coins
            .iter()
            .enumerate()
            .map(|(i, at)| {
                rect(
                    &format!("coin {i}"),
                    RectSpec::new(at.x, at.y, l.coin_size, l.coin_size),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let enemy_speed = fixed("level.enemy_speed", l.enemy_speed)?;
        let enemies = l
            .enemies
            .iter()
            .enumerate()
            .map(|(i, at)| {
                let body = rect(
                    &format!("enemy {i}"),
                    RectSpec::new(at.x, at.y, l.enemy_size, l.enemy_size),
                )?;
                Ok(EnemySpawn { rect: body, vel_x: enemy_speed })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        // The spawned body must fit the coordinate limit too
        let body = rect(
            "player spawn",
            RectSpec::new(l.spawn.x, l.spawn.y, p.player_width, p.player_height),
        )?;
        let spawn = (body.x, body.y);

        debug!(
            "Validated level: {} platforms, {} coins, {} enemies",
            platforms.len(),
            coins.len(),
            enemies.len()
        );

        Ok(Level {
            fps: self.screen.fps,
            physics,
            scoring: Scoring {
                coin_points: self.scoring.coin_points,
                stomp_points: self.scoring.stomp_points,
            },
            world: World::new(platforms),
            spawn,
            coins,
            enemies,
        })
    }
}

fn fixed(field: &str, value: f64) -> Result<Fixed, ConfigError> {
    checked_from_f64(value).ok_or_else(|| ConfigError::InvalidNumber {
        field: field.to_string(),
        value,
    })
}

fn non_negative(field: &str, value: f64) -> Result<Fixed, ConfigError> {
    if value < 0.0 {
        return Err(ConfigError::NegativeValue {
            field: field.to_string(),
            value,
        });
    }
    fixed(field, value)
}

fn size(what: &str, width: f64, height: f64) -> Result<(Fixed, Fixed), ConfigError> {
    let w = fixed(&format!("{what} width"), width)?;
    let h = fixed(&format!("{what} height"), height)?;
    if w <= 0 || h <= 0 {
        return Err(ConfigError::NonPositiveSize {
            what: what.to_string(),
            width,
            height,
        });
    }
    Ok((w, h))
}

fn rect(what: &str, spec: RectSpec) -> Result<Rect, ConfigError> {
    let (w, h) = size(what, spec.width, spec.height)?;
    let x = fixed(&format!("{what} x"), spec.x)?;
    let y = fixed(&format!("{what} y"), spec.y)?;
    let limit = from_int(CONFIG_LIMIT as i32);
    Rect::try_new(x, y, w, h)
        .filter(|r| r.right() <= limit && r.bottom() <= limit)
        .ok_or_else(|| ConfigError::OutOfRange {
            what: what.to_string(),
            limit: CONFIG_LIMIT,
        })
}

// =============================================================================
// VALIDATED (FIXED-POINT) CONFIG
// =============================================================================

/// Movement tuning and screen bounds in fixed-point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Physics {
    /// Right bound for the player
    pub screen_width: Fixed,
    /// Falling below this ends the session
    pub screen_height: Fixed,
    /// Player body width
    pub player_width: Fixed,
    /// Player body height
    pub player_height: Fixed,
    /// Horizontal speed per tick
    pub player_speed: Fixed,
    /// Velocity set by a jump
    pub jump_speed: Fixed,
    /// Added to `vel_y` every tick
    pub gravity: Fixed,
    /// `vel_y` after a stomp
    pub stomp_bounce: Fixed,
    /// Max overlap depth for a stomp
    pub stomp_tolerance: Fixed,
}

/// Points per scoring event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    /// Points per coin
    pub coin_points: u32,
    /// Points per stomped enemy
    pub stomp_points: u32,
}

/// Where an enemy starts and how fast it walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Starting body
    pub rect: Rect,
    /// Starting velocity
    pub vel_x: Fixed,
}

/// A validated level: everything a session needs, immutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Ticks per second
    pub fps: u32,
    /// Movement tuning
    pub physics: Physics,
    /// Points per event
    pub scoring: Scoring,
    /// Platforms
    pub world: World,
    /// Player spawn (top-left corner)
    pub spawn: (Fixed, Fixed),
    /// Coin rectangles
    pub coins: Vec<Rect>,
    /// Enemy spawns
    pub enemies: Vec<EnemySpawn>,
}
