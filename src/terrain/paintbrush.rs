//! Group painting and the autotile render pass.
//!
//! The paintbrush owns a [`TerrainElementIndex`] parallel to a grid.
//! Paint operations assign groups (seam flags update eagerly, so glue
//! declarations must precede painting); `render` resolves every painted
//! cell's (group, shape code) to a concrete tile through the tileset's
//! texture-address table and writes tile and materialized metadata back
//! into the grid.

use std::collections::HashMap;

use crate::grid::{Grid, Point};
use crate::terrain::element::{Group, MetaPatch, TerrainElementIndex};
use crate::tileset::Tileset;

/// Which edge of the target rectangle the one-cell stripe band hugs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StripeEdge {
    Top,
    Bottom,
}

/// A declarative two-band feature: a height-1 stripe against one
/// horizontal edge and a body filling the remainder.
#[derive(Clone, Debug)]
struct StripeFeature {
    stripe_group: Group,
    body_group: Group,
    edge: StripeEdge,
    stripe_extra: Option<MetaPatch>,
    body_extra: Option<MetaPatch>,
}

/// Paints terrain groups onto a grid and renders them to tiles.
pub struct TerrainPaintbrush<'a> {
    grid: &'a mut Grid,
    tileset: &'a Tileset,
    index: TerrainElementIndex,
    stripes: HashMap<String, StripeFeature>,
}

impl<'a> TerrainPaintbrush<'a> {
    pub fn new(grid: &'a mut Grid, tileset: &'a Tileset) -> Self {
        let index = TerrainElementIndex::new(grid.width, grid.height);
        Self {
            grid,
            tileset,
            index,
            stripes: HashMap::new(),
        }
    }

    /// Declare `a` and `b` seamless towards each other. Must precede any
    /// paint whose seams depend on it.
    pub fn glue_groups(mut self, a: impl Into<Group>, b: impl Into<Group>) -> Self {
        self.index.glue(a.into(), b.into());
        self
    }

    /// Register a named stripe feature for later [`Self::draw_feature`]
    /// calls.
    pub fn define_stripe_feature(
        mut self,
        name: &str,
        stripe_group: impl Into<Group>,
        body_group: impl Into<Group>,
        edge: StripeEdge,
        stripe_extra: Option<MetaPatch>,
        body_extra: Option<MetaPatch>,
    ) -> Self {
        self.stripes.insert(
            name.to_string(),
            StripeFeature {
                stripe_group: stripe_group.into(),
                body_group: body_group.into(),
                edge,
                stripe_extra,
                body_extra,
            },
        );
        self
    }

    /// Paint the axis-aligned rectangle `[start, end)` with `group`.
    pub fn fill_tiles(
        mut self,
        start: Point,
        end: Point,
        group: impl Into<Group>,
        extra: Option<MetaPatch>,
    ) -> Self {
        let group = group.into();
        for x in start.x..end.x {
            for y in start.y..end.y {
                self.index.alter(Point::new(x, y), group.clone(), extra);
            }
        }
        self
    }

    /// Draw a registered stripe feature over `[start, end)`. A no-op when
    /// the name is unknown or the rectangle is under two cells tall.
    pub fn draw_feature(self, name: &str, start: Point, end: Point) -> Self {
        let Some(feature) = self.stripes.get(name).cloned() else {
            return self;
        };
        if end.y - start.y < 2 {
            return self;
        }

        let (stripe_start, stripe_end, body_start, body_end) = match feature.edge {
            StripeEdge::Top => (
                start,
                Point::new(end.x, start.y + 1),
                Point::new(start.x, start.y + 1),
                end,
            ),
            StripeEdge::Bottom => (
                Point::new(start.x, end.y - 1),
                end,
                start,
                Point::new(end.x, end.y - 1),
            ),
        };

        self.fill_tiles(stripe_start, stripe_end, feature.stripe_group, feature.stripe_extra)
            .fill_tiles(body_start, body_end, feature.body_group, feature.body_extra)
    }

    /// Resolve every painted cell to a concrete tile of `style` and write
    /// it (plus materialized metadata) into the grid.
    ///
    /// Surface cells key as `style.<code>`; tagged cells key as
    /// `style.<name><code>` with a plain `style.<name>` fallback. A cell
    /// whose keys all miss is left unset; the tileset authoring contract
    /// is that the fallback exists for every tagged group in use.
    pub fn render(self, style: &str) -> Self {
        for (pos, el) in self.index.iter() {
            let tile = match &el.group {
                Group::None => continue,
                Group::Surface => {
                    let code = el.edges.shape_code();
                    self.tileset.find(&format!("{style}.{code}"))
                }
                Group::Tagged(name) => {
                    let code = el.edges.shape_code();
                    self.tileset
                        .find(&format!("{style}.{name}{code}"))
                        .or_else(|| self.tileset.find(&format!("{style}.{name}")))
                }
            };

            if let Some(tile) = tile {
                self.grid.set_tile(pos, tile);
                if let Some(patch) = el.extra {
                    let prev = self.grid.meta(pos).unwrap_or_default();
                    self.grid.set_meta(pos, patch.apply(prev));
                }
            }
        }
        self
    }
}
