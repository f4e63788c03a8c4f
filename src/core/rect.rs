//! Fixed-Point Axis-Aligned Rectangle
//!
//! Screen-space bounding box used by every entity and platform.
//! Y grows downward, so `top < bottom`.

use serde::{Deserialize, Serialize};

use super::fixed::{to_float, Fixed};

/// Axis-aligned rectangle with fixed-point components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: Fixed,
    /// Top edge
    pub y: Fixed,
    /// Width (always > 0)
    pub width: Fixed,
    /// Height (always > 0)
    pub height: Fixed,
}

impl Rect {
    /// Create a rectangle without validating its size.
    ///
    /// Callers building rectangles from untrusted data should go through
    /// [`Rect::try_new`].
    #[inline]
    pub const fn new(x: Fixed, y: Fixed, width: Fixed, height: Fixed) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle, rejecting zero or negative dimensions and
    /// edges that do not fit in a `Fixed`.
    pub fn try_new(x: Fixed, y: Fixed, width: Fixed, height: Fixed) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        x.checked_add(width)?;
        y.checked_add(height)?;
        Some(Self::new(x, y, width, height))
    }

    /// Left edge (same as `x`)
    #[inline]
    pub fn left(&self) -> Fixed {
        self.x
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> Fixed {
        self.x + self.width
    }

    /// Top edge (same as `y`)
    #[inline]
    pub fn top(&self) -> Fixed {
        self.y
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> Fixed {
        self.y + self.height
    }

    /// Center point `(x, y)`.
    #[inline]
    pub fn center(&self) -> (Fixed, Fixed) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Move so the left edge sits at `left`.
    #[inline]
    pub fn set_left(&mut self, left: Fixed) {
        self.x = left;
    }

    /// Move so the right edge sits at `right`.
    #[inline]
    pub fn set_right(&mut self, right: Fixed) {
        self.x = right - self.width;
    }

    /// Move so the top edge sits at `top`.
    #[inline]
    pub fn set_top(&mut self, top: Fixed) {
        self.y = top;
    }

    /// Move so the bottom edge sits at `bottom`.
    #[inline]
    pub fn set_bottom(&mut self, bottom: Fixed) {
        self.y = bottom - self.height;
    }

    /// Shift in place.
    #[inline]
    pub fn translate(&mut self, dx: Fixed, dy: Fixed) {
        self.x = self.x.wrapping_add(dx);
        self.y = self.y.wrapping_add(dy);
    }

    /// Shifted copy.
    #[inline]
    pub fn offset(self, dx: Fixed, dy: Fixed) -> Self {
        let mut moved = self;
        moved.translate(dx, dy);
        moved
    }

    /// Check if two rectangles intersect with non-zero area.
    ///
    /// Rectangles that only share an edge do not overlap, so a player
    /// standing exactly on a platform is not "inside" it.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Convert to `(x, y, width, height)` floats for rendering.
    pub fn to_floats(&self) -> (f32, f32, f32, f32) {
        (
            to_float(self.x),
            to_float(self.y),
            to_float(self.width),
            to_float(self.height),
        )
    }
}
