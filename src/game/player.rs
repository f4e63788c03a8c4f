//! Player Movement
//!
//! Gravity integration and axis-separated collision resolution against
//! the static world. Horizontal movement is applied and resolved first,
//! then vertical, then the player is clamped to the screen width.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::fixed::{from_int, Fixed};
use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::game::config::Physics;
use crate::game::entity::{Entity, UpdateContext};
use crate::game::input::InputFrame;
use crate::game::render::{Color, Surface};
use crate::game::world::World;

/// Hat is drawn this many pixels above the head...
const HAT_RAISE: i32 = 5;
/// ...and is this tall.
const HAT_HEIGHT: i32 = 8;

/// State of the player character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Bounding box (top-left corner plus size)
    pub rect: Rect,
    /// Horizontal velocity (pixels/tick)
    pub vel_x: Fixed,
    /// Vertical velocity (pixels/tick, positive is down)
    pub vel_y: Fixed,
    /// Landed on a platform during the last update
    pub on_ground: bool,
    /// Points earned this session
    pub score: u32,
}

impl PlayerState {
    /// Fresh player at `spawn` with zero velocity.
    pub fn new(spawn: (Fixed, Fixed), physics: &Physics) -> Self {
        Self {
            rect: Rect::new(spawn.0, spawn.1, physics.player_width, physics.player_height),
            vel_x: 0,
            vel_y: 0,
            on_ground: false,
            score: 0,
        }
    }

    /// Start a jump if standing on something.
    ///
    /// Returns whether the jump happened. `on_ground` is left alone; the
    /// next update clears it once the player leaves the platform.
    pub fn jump(&mut self, physics: &Physics) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel_y = physics.jump_speed;
        true
    }

    /// Move one tick.
    ///
    /// Overlapping platforms are resolved one after another in world order,
    /// each against the rectangle left by the previous one. When several
    /// overlap, the outcome depends on that order rather than on which
    /// platform is nearest. Vertically, the first resolution zeroes `vel_y`,
    /// so later overlapping platforms in the same pass are left unresolved.
    pub fn step(&mut self, input: InputFrame, world: &World, physics: &Physics) {
        // Right overrides left when both are held
        self.vel_x = 0;
        if input.left_held() {
            self.vel_x = -physics.player_speed;
        }
        if input.right_held() {
            self.vel_x = physics.player_speed;
        }

        // No terminal velocity
        self.vel_y = self.vel_y.wrapping_add(physics.gravity);

        self.rect.translate(self.vel_x, 0);
        for platform in world.iter() {
            if !self.rect.overlaps(platform) {
                continue;
            }
            if self.vel_x > 0 {
                self.rect.set_right(platform.left());
            } else if self.vel_x < 0 {
                self.rect.set_left(platform.right());
            }
        }

        self.rect.translate(0, self.vel_y);
        self.on_ground = false;
        for platform in world.iter() {
            if !self.rect.overlaps(platform) {
                continue;
            }
            if self.vel_y > 0 {
                self.rect.set_bottom(platform.top());
                self.vel_y = 0;
                self.on_ground = true;
            } else if self.vel_y < 0 {
                self.rect.set_top(platform.bottom());
                self.vel_y = 0;
            }
        }

        if self.rect.left() < 0 {
            self.rect.set_left(0);
        }
        if self.rect.right() > physics.screen_width {
            self.rect.set_right(physics.screen_width);
        }

        trace!(
            "player at ({}, {}) vel ({}, {}) on_ground={}",
            self.rect.x,
            self.rect.y,
            self.vel_x,
            self.vel_y,
            self.on_ground
        );
    }

    /// Add score from a pickup or stomp.
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Add to a state hash.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_rect(&self.rect);
        hasher.update_fixed(self.vel_x);
        hasher.update_fixed(self.vel_y);
        hasher.update_bool(self.on_ground);
        hasher.update_u32(self.score);
    }
}

impl Entity for PlayerState {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.step(ctx.input, ctx.world, ctx.physics);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.rect, Color::RED);
        let hat = Rect::new(
            self.rect.x,
            self.rect.y - from_int(HAT_RAISE),
            self.rect.width,
            from_int(HAT_HEIGHT),
        );
        surface.fill_rect(hat, Color::DARK_RED);
    }

    fn is_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::from_int;
    use crate::game::config::GameConfig;
    use crate::game::render::{DrawCommand, DrawList};

    fn physics() -> Physics {
        GameConfig::default().validate().unwrap().physics
    }

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(from_int(x), from_int(y), from_int(w), from_int(h))
    }

    fn player_at(x: i32, y: i32) -> PlayerState {
        PlayerState::new((from_int(x), from_int(y)), &physics())
    }

    #[test]
    fn test_new_player_at_rest() {
        let p = player_at(50, 400);
        assert_eq!(p.rect, rect(50, 400, 32, 48));
        assert_eq!((p.vel_x, p.vel_y, p.score), (0, 0, 0));
        assert!(!p.on_ground);
    }

    #[test]
    fn test_gravity_accumulates_without_cap() {
        let physics = physics();
        let world = World::new(vec![]);
        let mut p = player_at(100, 0);
        for _ in 0..10 {
            p.step(InputFrame::new(), &world, &physics);
        }
        assert_eq!(p.vel_y, physics.gravity * 10);
    }

    #[test]
    fn test_lands_on_ground() {
        let physics = physics();
        let world = World::new(vec![rect(0, 560, 800, 40)]);
        let mut p = player_at(50, 400);

        let mut ticks = 0;
        while !p.on_ground {
            p.step(InputFrame::new(), &world, &physics);
            ticks += 1;
            assert!(ticks < 100, "player never landed");
        }
        assert_eq!(p.rect.bottom(), from_int(560));
        assert_eq!(p.vel_y, 0);
    }

    #[test]
    fn test_horizontal_input() {
        let physics = physics();
        let world = World::new(vec![]);

        let mut p = player_at(100, 100);
        p.step(InputFrame::left(), &world, &physics);
        assert_eq!(p.vel_x, -from_int(5));
        assert_eq!(p.rect.x, from_int(95));

        p.step(InputFrame::new(), &world, &physics);
        assert_eq!(p.vel_x, 0);

        // Both held: right wins
        p.step(InputFrame::left().with(InputFrame::right()), &world, &physics);
        assert_eq!(p.vel_x, from_int(5));
    }

    #[test]
    fn test_wall_stops_horizontal_movement() {
        let physics = physics();
        let wall = rect(134, 0, 20, 600);
        let world = World::new(vec![wall]);
        let mut p = player_at(100, 100);

        p.step(InputFrame::right(), &world, &physics);
        assert_eq!(p.rect.right(), wall.left());
        assert!(!p.rect.overlaps(&wall));

        let world = World::new(vec![rect(70, 0, 28, 600)]);
        let mut p = player_at(100, 100);
        p.step(InputFrame::left(), &world, &physics);
        assert_eq!(p.rect.left(), from_int(98));
    }

    #[test]
    fn test_ceiling_stops_rise() {
        let physics = physics();
        let ceiling = rect(0, 80, 800, 10);
        let world = World::new(vec![ceiling]);
        let mut p = player_at(100, 95);
        p.vel_y = physics.jump_speed;

        p.step(InputFrame::new(), &world, &physics);
        assert_eq!(p.rect.top(), ceiling.bottom());
        assert_eq!(p.vel_y, 0);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_screen_clamp() {
        let physics = physics();
        let world = World::new(vec![]);

        let mut p = player_at(2, 100);
        p.step(InputFrame::left(), &world, &physics);
        assert_eq!(p.rect.left(), 0);

        let mut p = player_at(766, 100);
        p.step(InputFrame::right(), &world, &physics);
        assert_eq!(p.rect.right(), from_int(800));
    }

    #[test]
    fn test_jump_only_from_ground() {
        let physics = physics();
        let mut p = player_at(0, 0);
        p.vel_y = from_int(3);

        assert!(!p.jump(&physics));
        assert_eq!(p.vel_y, from_int(3));

        p.on_ground = true;
        assert!(p.jump(&physics));
        assert_eq!(p.vel_y, from_int(-15));
        assert!(p.on_ground, "jump leaves on_ground for the next update to clear");
    }

    #[test]
    fn test_jump_leaves_ground_next_update() {
        let physics = physics();
        let world = World::new(vec![rect(0, 560, 800, 40)]);
        let mut p = player_at(50, 512);
        p.step(InputFrame::new(), &world, &physics);
        assert!(p.on_ground);

        p.jump(&physics);
        p.step(InputFrame::new(), &world, &physics);
        assert!(!p.on_ground);
        assert!(p.rect.bottom() < from_int(560));
    }

    #[test]
    fn test_overlapping_platforms_resolve_in_world_order() {
        // Two platforms both overlapped by one fall. The first in world
        // order wins; the second is left unresolved because vel_y is zero.
        let physics = physics();
        let high = rect(0, 100, 200, 20);
        let low = rect(0, 104, 200, 20);
        let start = || {
            let mut p = player_at(10, 50);
            p.vel_y = from_int(10);
            p
        };

        let mut p = start();
        p.step(InputFrame::new(), &World::new(vec![high, low]), &physics);
        assert_eq!(p.rect.bottom(), high.top());
        assert!(!p.rect.overlaps(&low));

        let mut p = start();
        p.step(InputFrame::new(), &World::new(vec![low, high]), &physics);
        assert_eq!(p.rect.bottom(), low.top());
        assert!(p.rect.overlaps(&high), "second platform is not resolved");
        assert!(p.on_ground);
    }

    #[test]
    fn test_draw_body_and_hat() {
        let p = player_at(50, 400);
        let mut list = DrawList::new();
        p.draw(&mut list);

        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Rect { rect: rect(50, 400, 32, 48), color: Color::RED },
                DrawCommand::Rect { rect: rect(50, 395, 32, 8), color: Color::DARK_RED },
            ]
        );
    }
}
