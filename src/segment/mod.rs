//! Segment maps ("screens") of the tiled world and their lazy manager.

pub mod generation;
pub mod manager;
pub mod map;

pub use generation::{generate_segment, SegmentSize};
pub use manager::SegmentManager;
pub use map::SegmentMap;
