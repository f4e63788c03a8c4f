//! Render Contract
//!
//! The core never talks to a window. Entities describe themselves as
//! filled rectangles and circles on a [`Surface`] the presenter supplies;
//! [`DrawList`] is a surface that just records the commands, used by the
//! headless runner and by tests.

use serde::{Deserialize, Serialize};

use crate::core::fixed::Fixed;
use crate::core::rect::Rect;

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Background
    pub const SKY: Self = Self::rgb(135, 206, 235);
    /// Platforms
    pub const GRASS: Self = Self::rgb(0, 255, 0);
    /// Player body
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Player hat
    pub const DARK_RED: Self = Self::rgb(200, 0, 0);
    /// Coin rim
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Coin face
    pub const GOLD: Self = Self::rgb(255, 215, 0);
    /// Enemy body
    pub const BROWN: Self = Self::rgb(139, 69, 19);
    /// Enemy eyes
    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

/// Drawing primitives a presenter must provide.
///
/// Coordinates are fixed-point screen pixels; implementations convert
/// with [`to_float`](crate::core::fixed::to_float) or [`Rect::to_floats`].
pub trait Surface {
    /// Fill the whole surface.
    fn clear(&mut self, color: Color);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: (Fixed, Fixed), radius: Fixed, color: Color);
}

/// A recorded draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Whole-surface fill
    Clear(Color),
    /// Filled rectangle
    Rect {
        /// Area to fill
        rect: Rect,
        /// Fill color
        color: Color,
    },
    /// Filled circle
    Circle {
        /// Center point
        center: (Fixed, Fixed),
        /// Radius
        radius: Fixed,
        /// Fill color
        color: Color,
    },
}

/// Surface that records every call in order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop recorded commands, keeping the allocation for the next frame.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: (Fixed, Fixed), radius: Fixed, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }
}
