//! Collision Detection
//!
//! Player-vs-entity checks run after movement each tick. Platform
//! collisions are resolved inside the movement code itself; this module
//! only classifies contacts, and the tick applies their effects.

use crate::core::fixed::Fixed;
use crate::game::coin::CoinState;
use crate::game::config::Physics;
use crate::game::enemy::EnemyState;
use crate::game::player::PlayerState;

/// How the player touched an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyContact {
    /// Landed on top while falling
    Stomp,
    /// Any other overlap
    SideHit,
}

/// Check player against one enemy.
///
/// A stomp needs the player to be falling and the player's bottom to be
/// less than `stomp_tolerance` below the enemy's top.
pub fn classify_enemy_contact(
    player: &PlayerState,
    enemy: &EnemyState,
    physics: &Physics,
) -> Option<EnemyContact> {
    if !enemy.alive {
        return None;
    }

    if !player.rect.overlaps(&enemy.rect) {
        return None;
    }

    let depth: Fixed = player.rect.bottom() - enemy.rect.top();
    if player.vel_y > 0 && depth < physics.stomp_tolerance {
        Some(EnemyContact::Stomp)
    } else {
        Some(EnemyContact::SideHit)
    }
}

/// Check if the player touches an uncollected coin.
#[inline]
pub fn check_coin_pickup(player: &PlayerState, coin: &CoinState) -> bool {
    !coin.collected && player.rect.overlaps(&coin.rect)
}

/// Indices of every coin the player touches, in level order.
pub fn check_all_coin_pickups(player: &PlayerState, coins: &[CoinState]) -> Vec<usize> {
    coins
        .iter()
        .enumerate()
        .filter(|(_, coin)| check_coin_pickup(player, coin))
        .map(|(i, _)| i)
        .collect()
}

/// Player has dropped entirely below the screen.
#[inline]
pub fn fell_off_world(player: &PlayerState, physics: &Physics) -> bool {
    player.rect.top() > physics.screen_height
}
