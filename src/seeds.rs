//! Seed derivation for world generation.
//!
//! A single master seed deterministically yields one seed per segment, so
//! revisiting a coordinate (or replaying a world in tests) regenerates
//! identical terrain.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Derive a sub-seed from a master seed and a label.
pub fn derive_seed(master: u64, label: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    label.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic per-segment seed from the master seed and the segment's
/// world coordinates.
pub fn segment_seed(master: u64, x: i32, y: i32) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    x.hash(&mut hasher);
    y.hash(&mut hasher);
    hasher.finish()
}
