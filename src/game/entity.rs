//! Entity Capability
//!
//! Player, coins and enemies share one interface so the simulation step
//! can update and draw them uniformly. Each implementation reads only its
//! own fields when drawing.

use crate::game::config::Physics;
use crate::game::input::InputFrame;
use crate::game::render::Surface;
use crate::game::world::World;

/// Everything an entity may read during its update.
#[derive(Clone, Copy, Debug)]
pub struct UpdateContext<'a> {
    /// This tick's input (only the player looks at it)
    pub input: InputFrame,
    /// Static platforms
    pub world: &'a World,
    /// Movement tuning
    pub physics: &'a Physics,
}

/// Something that lives in the level and can be drawn.
pub trait Entity {
    /// Advance one tick against the static world.
    fn update(&mut self, ctx: &UpdateContext<'_>);

    /// Render onto the presenter's surface.
    fn draw(&self, surface: &mut dyn Surface);

    /// Whether the entity still takes part in play (uncollected, alive).
    fn is_active(&self) -> bool;
}
