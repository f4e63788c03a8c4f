//! Game Events
//!
//! Events generated during simulation for logging, HUDs and replay
//! verification. The tick queues them on the session and hands them back
//! in [`TickResult`](crate::game::tick::TickResult).

use serde::{Deserialize, Serialize};

/// Why the player died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Side hit by the enemy at this index
    Enemy {
        /// Index into the level's enemies
        enemy: usize,
    },
    /// Dropped below the bottom of the screen
    FellOffWorld,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Player picked up a coin
    CoinCollected {
        /// Index into the level's coins
        coin: usize,
        /// Points awarded
        points: u32,
        /// Score after the award
        new_score: u32,
    },

    /// Player landed on an enemy
    EnemyStomped {
        /// Index into the level's enemies
        enemy: usize,
        /// Points awarded
        points: u32,
        /// Score after the award
        new_score: u32,
    },

    /// Player left the ground
    PlayerJumped,

    /// Session went to game over
    PlayerKilled {
        /// What ended the session
        cause: DeathCause,
    },

    /// Session was restarted
    SessionReset {
        /// Resets so far, including this one
        resets: u32,
    },
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create coin collected event.
    pub fn coin_collected(tick: u32, coin: usize, points: u32, new_score: u32) -> Self {
        Self::new(tick, GameEventData::CoinCollected { coin, points, new_score })
    }

    /// Create enemy stomped event.
    pub fn enemy_stomped(tick: u32, enemy: usize, points: u32, new_score: u32) -> Self {
        Self::new(tick, GameEventData::EnemyStomped { enemy, points, new_score })
    }

    /// Create player jumped event.
    pub fn player_jumped(tick: u32) -> Self {
        Self::new(tick, GameEventData::PlayerJumped)
    }

    /// Create player killed event.
    pub fn player_killed(tick: u32, cause: DeathCause) -> Self {
        Self::new(tick, GameEventData::PlayerKilled { cause })
    }

    /// Create session reset event.
    pub fn session_reset(tick: u32, resets: u32) -> Self {
        Self::new(tick, GameEventData::SessionReset { resets })
    }

    /// Points this event awarded, if any.
    pub fn points(&self) -> u32 {
        match self.data {
            GameEventData::CoinCollected { points, .. }
            | GameEventData::EnemyStomped { points, .. } => points,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points() {
        assert_eq!(GameEvent::coin_collected(3, 0, 10, 10).points(), 10);
        assert_eq!(GameEvent::enemy_stomped(3, 1, 50, 60).points(), 50);
        assert_eq!(GameEvent::player_jumped(3).points(), 0);
        assert_eq!(
            GameEvent::player_killed(4, DeathCause::FellOffWorld).data,
            GameEventData::PlayerKilled { cause: DeathCause::FellOffWorld }
        );
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::session_reset(120, 2);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"tick":120,"data":{"SessionReset":{"resets":2}}}"#);
    }
}
