//! Game Session
//!
//! Owns one run of a level: the player, coins, enemies, score and the
//! `Playing`/`GameOver` phase. The simulation step in
//! [`tick`](crate::game::tick) is the only thing that mutates a session
//! while it is playing; once it is over, only [`Session::reset`] brings it
//! back.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::game::coin::CoinState;
use crate::game::config::{ConfigError, GameConfig, Level, Physics, Scoring};
use crate::game::enemy::EnemyState;
use crate::game::entity::Entity;
use crate::game::events::{DeathCause, GameEvent};
use crate::game::player::PlayerState;
use crate::game::render::{Color, Surface};
use crate::game::world::World;

/// Session phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SessionPhase {
    /// Simulation running
    Playing = 0,
    /// Frozen until restart
    GameOver = 1,
}

/// One playthrough of a level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub(crate) level: Level,

    /// The player character
    pub player: PlayerState,

    /// Coins in level order
    pub coins: Vec<CoinState>,

    /// Enemies in level order
    pub enemies: Vec<EnemyState>,

    /// Playing or game over
    pub phase: SessionPhase,

    /// Ticks processed since creation (keeps counting across resets)
    pub tick: u32,

    /// Number of resets so far
    pub resets: u32,

    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl Session {
    /// Start a session on a validated level.
    pub fn new(level: Level) -> Self {
        debug!(
            "New session: {} platforms, {} coins, {} enemies",
            level.world.len(),
            level.coins.len(),
            level.enemies.len()
        );
        let player = PlayerState::new(level.spawn, &level.physics);
        let coins = level.coins.iter().copied().map(CoinState::new).collect();
        let enemies = level.enemies.iter().map(EnemyState::new).collect();

        Self {
            level,
            player,
            coins,
            enemies,
            phase: SessionPhase::Playing,
            tick: 0,
            resets: 0,
            pending_events: Vec::new(),
        }
    }

    /// Validate `config` and start a session on it.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.validate()?))
    }

    /// Start the level over.
    ///
    /// The player respawns with score 0, every coin is uncollected and
    /// every enemy is alive again. Enemies keep their current position and
    /// heading. The tick counter is not rewound.
    pub fn reset(&mut self) {
        self.player = PlayerState::new(self.level.spawn, &self.level.physics);
        for (coin, rect) in self.coins.iter_mut().zip(&self.level.coins) {
            *coin = CoinState::new(*rect);
        }
        for enemy in &mut self.enemies {
            enemy.revive();
        }
        self.phase = SessionPhase::Playing;
        self.resets = self.resets.saturating_add(1);

        info!("Session reset at tick {} (reset #{})", self.tick, self.resets);
        self.push_event(GameEvent::session_reset(self.tick, self.resets));
    }

    /// Switch to game over.
    ///
    /// Returns false (and records nothing) if the session already ended.
    pub fn end(&mut self, cause: DeathCause) -> bool {
        if self.phase == SessionPhase::GameOver {
            return false;
        }
        self.phase = SessionPhase::GameOver;
        info!(
            "Game over at tick {}: {:?}, score {}",
            self.tick, cause, self.player.score
        );
        self.push_event(GameEvent::player_killed(self.tick, cause));
        true
    }

    /// Current score, for the HUD.
    pub fn score(&self) -> u32 {
        self.player.score
    }

    /// Whether the session is waiting for a restart.
    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// The level this session plays.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Static platforms.
    pub fn world(&self) -> &World {
        &self.level.world
    }

    /// Movement tuning and screen bounds.
    pub fn physics(&self) -> &Physics {
        &self.level.physics
    }

    /// Points per event.
    pub fn scoring(&self) -> &Scoring {
        &self.level.scoring
    }

    /// Coins not yet collected.
    pub fn coins_remaining(&self) -> usize {
        self.coins.iter().filter(|c| c.is_active()).count()
    }

    /// Enemies still alive.
    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_active()).count()
    }

    /// Render the whole scene: sky, platforms, coins, enemies, player.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(Color::SKY);
        self.level.world.draw(surface);
        for coin in &self.coins {
            coin.draw(surface);
        }
        for enemy in &self.enemies {
            enemy.draw(surface);
        }
        self.player.draw(surface);
    }

    /// Compute hash of the simulated state.
    ///
    /// Covers the tick counter, phase, player, coins and enemies. The reset
    /// count and queued events are bookkeeping and are left out.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            hasher.update_u8(self.phase as u8);
            self.player.hash_into(hasher);
            for coin in &self.coins {
                coin.hash_into(hasher);
            }
            for enemy in &self.enemies {
                enemy.hash_into(hasher);
            }
        })
    }

    /// Take all pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}
