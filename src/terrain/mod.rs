//! Autotiling terrain layer.
//!
//! Cells are painted with symbolic groups; seams between differing,
//! non-glued groups are tracked per cell and resolved to shaped texture
//! variants by the render pass.

pub mod element;
pub mod paintbrush;

pub use element::{Edges, GluedGroups, Group, MetaPatch, TerrainElement, TerrainElementIndex};
pub use paintbrush::{StripeEdge, TerrainPaintbrush};
