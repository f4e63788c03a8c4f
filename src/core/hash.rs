//! State Hashing for Verification
//!
//! Deterministic hashing of session state for:
//! - Replay validation (recorded inputs must reproduce the live run)
//! - Comparing two runs of the simulation in tests

use sha2::{Digest, Sha256};

use super::fixed::Fixed;
use super::rect::Rect;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for session state.
///
/// Wraps SHA-256 with helpers for fixed-point types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for session state.
    pub fn for_session_state() -> Self {
        Self::new(b"PLATFORMER_STATE_V1")
    }

    /// Create hasher for an input recording.
    pub fn for_input_recording() -> Self {
        Self::new(b"PLATFORMER_INPUTS_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a Fixed value.
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed) {
        self.update_i32(value);
    }

    /// Update with all four components of a rectangle.
    #[inline]
    pub fn update_rect(&mut self, rect: &Rect) {
        self.update_fixed(rect.x);
        self.update_fixed(rect.y);
        self.update_fixed(rect.width);
        self.update_fixed(rect.height);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for session verification.
///
/// Called by `Session::compute_hash()`. The closure adds the
/// entity-specific data after the tick counter.
pub fn compute_state_hash<F>(tick: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_session_state();

    // Always hash tick first
    hasher.update_u32(tick);

    add_state(&mut hasher);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::from_int;

    #[test]
    fn test_state_hasher_determinism() {
        let rect = Rect::new(from_int(1), from_int(2), from_int(3), from_int(4));
        let hash = |r: &Rect| {
            let mut h = StateHasher::for_session_state();
            h.update_rect(r);
            h.update_bool(true);
            h.update_u32(42);
            h.finalize()
        };
        assert_eq!(hash(&rect), hash(&rect));
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };
        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let a = StateHasher::for_session_state().finalize();
        let b = StateHasher::for_input_recording().finalize();
        assert_ne!(a, b);
    }

    #[test]
    fn test_compute_state_hash_includes_tick() {
        let h1 = compute_state_hash(1, |h| h.update_u8(7));
        let h2 = compute_state_hash(2, |h| h.update_u8(7));
        assert_ne!(h1, h2);
    }
}
