//! Q16.16 Fixed-Point Arithmetic
//!
//! Every position, velocity and acceleration in the simulation is stored as
//! a Q16.16 fixed-point number. Floats only appear at the edges: when the
//! level configuration is loaded and when a presenter asks for draw
//! coordinates.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 pixels                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! An 800×600 screen uses a tiny fraction of the range, and sub-pixel
//! precision keeps fractional gravity (0.8 px/tick²) exact enough that
//! landings snap to whole platform edges.

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

/// Largest magnitude accepted from configuration (in pixels).
///
/// Level validation also keeps the right and bottom edges of every
/// configured rectangle within this bound, so edge sums on a freshly
/// loaded level cannot overflow.
pub const CONFIG_LIMIT: f64 = 16384.0;

// =============================================================================
// CONVERSIONS
// =============================================================================

/// Convert a compile-time float to fixed-point (truncating).
///
/// # Example
/// ```
/// use platformer::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert a whole number of pixels to fixed-point.
#[inline]
pub const fn from_int(i: i32) -> Fixed {
    i << FIXED_SCALE
}

/// Convert a runtime float (from configuration) to fixed-point.
///
/// Rounds to the nearest representable value. Returns `None` for NaN,
/// infinities, and magnitudes beyond [`CONFIG_LIMIT`].
pub fn checked_from_f64(f: f64) -> Option<Fixed> {
    if !f.is_finite() || f.abs() > CONFIG_LIMIT {
        return None;
    }
    Some((f * FIXED_ONE as f64).round() as Fixed)
}

/// Convert fixed-point to float for display/rendering.
///
/// # Warning
/// Only use for visual output. NEVER use result in game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

// =============================================================================
// TESTS
// =============================================================================
