//! Input Capture and Edge Detection
//!
//! The host samples its keyboard (or gamepad) once per tick and hands the
//! core a [`HeldKeys`] snapshot. [`InputLatch`] turns that into an
//! [`InputFrame`]: movement stays level-triggered, while jump and restart
//! fire only on the tick the key goes down.

use serde::{Deserialize, Serialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// HELD KEYS (host snapshot)
// =============================================================================

/// Which actions the host currently sees held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    /// Move left
    pub left: bool,
    /// Move right
    pub right: bool,
    /// Jump
    pub jump: bool,
    /// Restart after game over
    pub restart: bool,
}

// =============================================================================
// INPUT FRAME
// =============================================================================

/// Input for a single tick.
///
/// Movement bits mean "held this tick". Jump and restart bits mean
/// "pressed this tick" and are set for one tick per key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: Move left held
    /// - Bit 1: Move right held
    /// - Bit 2: Jump pressed this tick
    /// - Bit 3: Restart pressed this tick
    /// - Bit 4-7: Reserved
    pub flags: u8,
}

impl InputFrame {
    /// Move left flag bit
    pub const FLAG_LEFT: u8 = 0x01;

    /// Move right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x04;

    /// Restart flag bit
    pub const FLAG_RESTART: u8 = 0x08;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Frame holding left.
    pub const fn left() -> Self {
        Self { flags: Self::FLAG_LEFT }
    }

    /// Frame holding right.
    pub const fn right() -> Self {
        Self { flags: Self::FLAG_RIGHT }
    }

    /// Frame pressing jump.
    pub const fn jump() -> Self {
        Self { flags: Self::FLAG_JUMP }
    }

    /// Frame pressing restart.
    pub const fn restart() -> Self {
        Self { flags: Self::FLAG_RESTART }
    }

    /// Combine with another frame's flags.
    pub const fn with(self, other: Self) -> Self {
        Self { flags: self.flags | other.flags }
    }

    /// Check if move left is held.
    #[inline]
    pub fn left_held(&self) -> bool {
        self.flags & Self::FLAG_LEFT != 0
    }

    /// Check if move right is held.
    #[inline]
    pub fn right_held(&self) -> bool {
        self.flags & Self::FLAG_RIGHT != 0
    }

    /// Check if jump was pressed this tick.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Check if restart was pressed this tick.
    #[inline]
    pub fn restart_pressed(&self) -> bool {
        self.flags & Self::FLAG_RESTART != 0
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Set or clear move left.
    #[inline]
    pub fn set_left(&mut self, held: bool) {
        self.set_flag(Self::FLAG_LEFT, held);
    }

    /// Set or clear move right.
    #[inline]
    pub fn set_right(&mut self, held: bool) {
        self.set_flag(Self::FLAG_RIGHT, held);
    }

    /// Set or clear jump.
    #[inline]
    pub fn set_jump(&mut self, pressed: bool) {
        self.set_flag(Self::FLAG_JUMP, pressed);
    }

    /// Set or clear restart.
    #[inline]
    pub fn set_restart(&mut self, pressed: bool) {
        self.set_flag(Self::FLAG_RESTART, pressed);
    }

    #[inline]
    fn set_flag(&mut self, bit: u8, on: bool) {
        if on {
            self.flags |= bit;
        } else {
            self.flags &= !bit;
        }
    }
}

// =============================================================================
// EDGE DETECTION
// =============================================================================

/// Converts held-key snapshots into per-tick frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputLatch {
    previous: HeldKeys,
}

impl InputLatch {
    /// Latch with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample one tick of host input.
    pub fn sample(&mut self, held: HeldKeys) -> InputFrame {
        let mut frame = InputFrame::new();
        frame.set_left(held.left);
        frame.set_right(held.right);
        frame.set_jump(held.jump && !self.previous.jump);
        frame.set_restart(held.restart && !self.previous.restart);
        self.previous = held;
        frame
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Input change at a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u32,
    /// The new input state
    pub frame: InputFrame,
}

/// Delta-compressed input log for one session.
///
/// Only ticks where the frame differs from the previous one are stored,
/// so a run of held movement costs a single entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// Last tick recorded
    pub end_tick: u32,

    deltas: Vec<InputDelta>,
}

impl InputRecording {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record input for a tick.
    ///
    /// Ticks must be recorded in increasing order.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.end_tick = tick;

        let current = self.deltas.last().map(|d| d.frame).unwrap_or_default();
        if frame != current {
            self.deltas.push(InputDelta { tick, frame });
        }
    }

    /// Input that was active at `tick` (idle before the first delta).
    pub fn input_at(&self, tick: u32) -> InputFrame {
        // Last delta at or before this tick
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        match idx.checked_sub(1).and_then(|i| self.deltas.get(i)) {
            Some(delta) => delta.frame,
            None => InputFrame::new(),
        }
    }

    /// Number of stored changes.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Hash of the recorded deltas, for pairing a recording with a result.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u32(self.end_tick);
        for delta in &self.deltas {
            hasher.update_u32(delta.tick);
            hasher.update_u8(delta.frame.flags);
        }
        hasher.finalize()
    }
}

// =============================================================================
// TESTS
// =============================================================================
