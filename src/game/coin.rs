//! Coins
//!
//! Static pickups. A coin never moves; the only state change is
//! `collected`, flipped by the pickup pass and cleared on reset.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{from_int, Fixed};
use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::game::entity::{Entity, UpdateContext};
use crate::game::render::{Color, Surface};

/// Outer radius of the coin sprite.
const RIM_RADIUS: Fixed = from_int(10);
/// Inner radius of the coin sprite.
const FACE_RADIUS: Fixed = from_int(6);

/// A collectible coin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinState {
    /// Bounding box
    pub rect: Rect,
    /// Picked up this session
    pub collected: bool,
}

impl CoinState {
    /// Uncollected coin at `rect`.
    pub fn new(rect: Rect) -> Self {
        Self { rect, collected: false }
    }

    /// Mark collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }

    /// Add to a state hash.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_rect(&self.rect);
        hasher.update_bool(self.collected);
    }
}

impl Entity for CoinState {
    fn update(&mut self, _ctx: &UpdateContext<'_>) {}

    fn draw(&self, surface: &mut dyn Surface) {
        if self.collected {
            return;
        }
        let center = self.rect.center();
        surface.fill_circle(center, RIM_RADIUS, Color::YELLOW);
        surface.fill_circle(center, FACE_RADIUS, Color::GOLD);
    }

    fn is_active(&self) -> bool {
        !self.collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::render::{DrawCommand, DrawList};

    fn coin() -> CoinState {
        CoinState::new(Rect::new(from_int(250), from_int(450), from_int(20), from_int(20)))
    }

    #[test]
    fn test_collect_once() {
        let mut c = coin();
        assert!(c.is_active());
        assert!(c.collect());
        assert!(!c.collect());
        assert!(!c.is_active());
    }

    #[test]
    fn test_draw_two_circles_at_center() {
        let mut list = DrawList::new();
        coin().draw(&mut list);

        let center = (from_int(260), from_int(460));
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Circle { center, radius: from_int(10), color: Color::YELLOW },
                DrawCommand::Circle { center, radius: from_int(6), color: Color::GOLD },
            ]
        );
    }

    #[test]
    fn test_collected_coin_draws_nothing() {
        let mut c = coin();
        c.collect();
        let mut list = DrawList::new();
        c.draw(&mut list);
        assert!(list.is_empty());
    }
}
