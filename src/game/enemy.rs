//! Enemies
//!
//! Walkers that patrol horizontally with no gravity. They turn around when
//! they bump a platform or reach a screen edge, and die when stomped.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::fixed::{from_int, Fixed};
use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::game::config::{EnemySpawn, Physics};
use crate::game::entity::{Entity, UpdateContext};
use crate::game::render::{Color, Surface};
use crate::game::world::World;

const EYE_RADIUS: Fixed = from_int(3);
/// Eye centers relative to the top-left corner.
const EYE_OFFSETS: [(i32, i32); 2] = [(8, 8), (22, 8)];

/// State of one enemy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyState {
    /// Bounding box
    pub rect: Rect,
    /// Horizontal velocity (pixels/tick)
    pub vel_x: Fixed,
    /// False once stomped
    pub alive: bool,
}

impl EnemyState {
    /// Living enemy at its spawn.
    pub fn new(spawn: &EnemySpawn) -> Self {
        Self {
            rect: spawn.rect,
            vel_x: spawn.vel_x,
            alive: true,
        }
    }

    /// Walk one tick.
    ///
    /// Platform contact and screen edges are checked independently. An
    /// enemy touching a platform at the edge reverses twice and keeps its
    /// heading.
    pub fn step(&mut self, world: &World, physics: &Physics) {
        if !self.alive {
            return;
        }

        self.rect.translate(self.vel_x, 0);

        if world.first_overlap(&self.rect).is_some() {
            self.vel_x = -self.vel_x;
        }

        if self.rect.left() <= 0 || self.rect.right() >= physics.screen_width {
            self.vel_x = -self.vel_x;
        }

        trace!("enemy at ({}, {}) vel {}", self.rect.x, self.rect.y, self.vel_x);
    }

    /// Kill by stomp. Returns false if already dead.
    pub fn stomp(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        true
    }

    /// Bring back to life where it stands, keeping its heading.
    pub fn revive(&mut self) {
        self.alive = true;
    }

    /// Add to a state hash.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_rect(&self.rect);
        hasher.update_fixed(self.vel_x);
        hasher.update_bool(self.alive);
    }
}

impl Entity for EnemyState {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.step(ctx.world, ctx.physics);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.alive {
            return;
        }
        surface.fill_rect(self.rect, Color::BROWN);
        for (dx, dy) in EYE_OFFSETS {
            let eye = (self.rect.x + from_int(dx), self.rect.y + from_int(dy));
            surface.fill_circle(eye, EYE_RADIUS, Color::BLACK);
        }
    }

    fn is_active(&self) -> bool {
        self.alive
    }
}
