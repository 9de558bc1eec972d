//! Feature generators: rasterization primitives and the map elements
//! (road entries, islands, carved paths) they produce.

pub mod elements;
pub mod raster;

pub use elements::{Island, LinearPath, MapElement, RoadEntry};
pub use raster::{disk_points, points_on_line, points_on_line_width};
