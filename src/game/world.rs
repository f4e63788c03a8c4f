//! Static World
//!
//! The ordered list of platforms. Built once from a validated level and
//! never mutated; collision passes iterate it in insertion order, and that
//! order is observable when several platforms overlap the same entity.

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::game::render::{Color, Surface};

/// Immutable set of platform rectangles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    platforms: Vec<Rect>,
}

impl World {
    /// Build from already-validated rectangles.
    pub fn new(platforms: Vec<Rect>) -> Self {
        Self { platforms }
    }

    /// Platforms in collision order.
    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    /// Iterate platforms in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rect> {
        self.platforms.iter()
    }

    /// Number of platforms.
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    /// True for a level with no platforms.
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// First platform (in order) overlapping `rect`.
    pub fn first_overlap(&self, rect: &Rect) -> Option<&Rect> {
        self.platforms.iter().find(|p| rect.overlaps(p))
    }

    /// Draw every platform in order.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for platform in &self.platforms {
            surface.fill_rect(*platform, Color::GRASS);
        }
    }
}
