//! Per-cell group and seam bookkeeping.
//!
//! Each grid cell carries a terrain group and four seam flags, one per
//! cardinal neighbor. A seam is raised against a neighbor that belongs to
//! a different group, unless the two groups are declared glued. The seam
//! flags collapse into a two-letter shape code that selects a texture
//! variant at render time.

use std::collections::HashSet;

use crate::grid::{CellMeta, Point};

/// Symbolic terrain-kind tag for a cell.
///
/// `Surface` is the style's base floor and renders through the shaped
/// `style.<code>` keys; `Tagged` groups render through
/// `style.<name><code>` with a plain `style.<name>` fallback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Group {
    /// Never painted. Raises no seams and is skipped by the render pass.
    #[default]
    None,
    /// The base floor of the active style.
    Surface,
    /// A named per-feature group, e.g. "gravel" or "edge".
    Tagged(String),
}

impl From<&str> for Group {
    fn from(name: &str) -> Self {
        Group::Tagged(name.to_string())
    }
}

/// Per-cell metadata or a transform of the previous metadata, resolved at
/// render time.
#[derive(Clone, Copy, Debug)]
pub enum MetaPatch {
    Set(CellMeta),
    Map(fn(CellMeta) -> CellMeta),
}

impl MetaPatch {
    pub fn apply(self, prev: CellMeta) -> CellMeta {
        match self {
            MetaPatch::Set(meta) => meta,
            MetaPatch::Map(f) => f(prev),
        }
    }
}

/// Seam flags towards the four cardinal neighbors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

/// Shape codes indexed by vertical state * 4 + horizontal state,
/// states ordered both/neither/first-only/second-only.
const SHAPE_CODES: [&str; 16] = [
    "aa", "an", "al", "ar", //
    "na", "nn", "nl", "nr", //
    "ta", "tn", "tl", "tr", //
    "ba", "bn", "bl", "br",
];

impl Edges {
    fn vertical_index(self) -> usize {
        match (self.top, self.bottom) {
            (true, true) => 0,
            (false, false) => 1,
            (true, false) => 2,
            (false, true) => 3,
        }
    }

    fn horizontal_index(self) -> usize {
        match (self.left, self.right) {
            (true, true) => 0,
            (false, false) => 1,
            (true, false) => 2,
            (false, true) => 3,
        }
    }

    /// Two-letter texture-variant key: vertical code then horizontal code.
    pub fn shape_code(self) -> &'static str {
        SHAPE_CODES[self.vertical_index() * 4 + self.horizontal_index()]
    }
}

/// One terrain element per grid cell.
#[derive(Clone, Debug, Default)]
pub struct TerrainElement {
    pub group: Group,
    pub edges: Edges,
    pub extra: Option<MetaPatch>,
}

/// Symmetric glue relation over groups. Declared pairwise only: gluing
/// (x,y) and (y,z) does not glue (x,z).
#[derive(Clone, Debug, Default)]
pub struct GluedGroups {
    pairs: HashSet<(Group, Group)>,
}

impl GluedGroups {
    pub fn glue(&mut self, a: Group, b: Group) {
        self.pairs.insert((a.clone(), b.clone()));
        self.pairs.insert((b, a));
    }

    /// Whether a seam between `a` and `b` is suppressed. Equal groups are
    /// always continuous.
    pub fn is_glued(&self, a: &Group, b: &Group) -> bool {
        a == b || self.pairs.contains(&(a.clone(), b.clone()))
    }
}

/// Parallel array of terrain elements for a grid, with the glue relation
/// and the mutual seam update applied on every paint.
#[derive(Clone, Debug)]
pub struct TerrainElementIndex {
    width: usize,
    height: usize,
    elements: Vec<TerrainElement>,
    glued: GluedGroups,
}

// Neighbor deltas in cell space (top is y-1) paired with which seam flag
// faces that neighbor on the center and on the neighbor itself.
const SIDES: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl TerrainElementIndex {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            elements: vec![TerrainElement::default(); width * height],
            glued: GluedGroups::default(),
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && (p.x as usize) < self.width && p.y >= 0 && (p.y as usize) < self.height {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: Point) -> Option<&TerrainElement> {
        self.index(p).map(|i| &self.elements[i])
    }

    pub fn glue(&mut self, a: Group, b: Group) {
        self.glued.glue(a, b);
    }

    /// Iterate all elements with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &TerrainElement)> {
        let width = self.width;
        self.elements.iter().enumerate().map(move |(i, el)| {
            (Point::new((i % width) as i32, (i / width) as i32), el)
        })
    }

    /// Paint `pos` with `group` and `extra`, recomputing the seam flags
    /// between it and each existing neighbor on both sides. Out-of-bounds
    /// positions are a no-op; unpainted neighbors never receive or cause
    /// seams.
    pub fn alter(&mut self, pos: Point, group: Group, extra: Option<MetaPatch>) {
        let Some(center) = self.index(pos) else {
            return;
        };

        self.elements[center].group = group.clone();
        self.elements[center].extra = extra;

        for (side, (dx, dy)) in SIDES.iter().enumerate() {
            let neighbor_pos = pos + Point::new(*dx, *dy);
            let Some(neighbor) = self.index(neighbor_pos) else {
                set_side(&mut self.elements[center].edges, side, false);
                continue;
            };

            let neighbor_group = self.elements[neighbor].group.clone();
            if neighbor_group == Group::None {
                set_side(&mut self.elements[center].edges, side, false);
                continue;
            }

            let seam = !self.glued.is_glued(&group, &neighbor_group);
            set_side(&mut self.elements[center].edges, side, seam);
            // The neighbor's flag towards us is the mirrored side.
            set_side(&mut self.elements[neighbor].edges, side ^ 1, seam);
        }
    }
}

fn set_side(edges: &mut Edges, side: usize, value: bool) {
    match side {
        0 => edges.left = value,
        1 => edges.right = value,
        2 => edges.top = value,
        _ => edges.bottom = value,
    }
}
