//! Procedural overland generation for a tile-based action RPG.
//!
//! The world is an infinite plane of fixed-size segments, generated
//! lazily as the player explores. Each segment is carved out of solid
//! wall by a chain of feature placements (roadside entries, islands,
//! thick connecting paths), stitched against its already-generated
//! neighbors so roads continue across segment seams, and optionally
//! decorated through an autotiling terrain paintbrush that resolves
//! edge shapes into tileset variants.

pub mod ascii;
pub mod builder;
pub mod explorer;
pub mod export;
pub mod features;
pub mod grid;
pub mod seeds;
pub mod segment;
pub mod terrain;
pub mod tileset;
