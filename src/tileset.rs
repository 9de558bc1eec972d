//! Tile attribute registry.
//!
//! Every tile a grid cell can hold is registered here with its display
//! glyph/color and gameplay attributes (traversable, collides, road).
//! Tiles are addressed two ways: by `TileId` (what the grid stores) and by
//! texture address (what the autotile render pass composes, e.g.
//! `"green.gravel"` or `"green.ta"`).

use std::collections::HashMap;

use crate::grid::{Grid, Point, TileId};

/// Shape-code letters, vertical then horizontal.
/// `a` = both sides seamed, `n` = neither, `t`/`b`/`l`/`r` = one side.
pub const VERTICAL_CODES: [char; 4] = ['a', 'n', 't', 'b'];
pub const HORIZONTAL_CODES: [char; 4] = ['a', 'n', 'l', 'r'];

/// Static attributes of one tile kind.
#[derive(Clone, Debug)]
pub struct TileDef {
    /// Texture address used by autotile lookups.
    pub texture: String,
    /// Glyph for ASCII rendering.
    pub glyph: char,
    /// RGB color for image export.
    pub color: (u8, u8, u8),
    /// Actors may stand on this tile.
    pub traversable: bool,
    /// Blocks movement at its own elevation level.
    pub collide: bool,
    /// Counts as road for entry detection and path protection.
    pub is_road: bool,
}

impl TileDef {
    /// A plain walkable tile.
    pub fn new(texture: &str, glyph: char, color: (u8, u8, u8)) -> Self {
        Self {
            texture: texture.to_string(),
            glyph,
            color,
            traversable: true,
            collide: false,
            is_road: false,
        }
    }

    /// Mark as impassable.
    pub fn solid(mut self) -> Self {
        self.traversable = false;
        self.collide = true;
        self
    }

    /// Mark as a road tile.
    pub fn road(mut self) -> Self {
        self.is_road = true;
        self
    }
}

/// Ordered tile registry with a by-texture index.
///
/// Index 0 is always the out-of-bounds sentinel: non-traversable, renders
/// as void. Off-grid reads resolve to it.
#[derive(Clone, Debug)]
pub struct Tileset {
    defs: Vec<TileDef>,
    by_texture: HashMap<String, TileId>,
}

impl Tileset {
    pub const OUT_OF_BOUNDS: TileId = TileId(0);
    // Base tiles of the standard set, in registration order.
    pub const PATH: TileId = TileId(1);
    pub const WALL: TileId = TileId(2);
    pub const STAIRS: TileId = TileId(3);
    pub const ROOM: TileId = TileId(4);
    pub const ROAD: TileId = TileId(5);

    pub fn new() -> Self {
        let mut set = Self {
            defs: Vec::new(),
            by_texture: HashMap::new(),
        };
        set.push(TileDef::new("outofbounds", ' ', (0, 0, 0)).solid());
        set
    }

    fn push(&mut self, def: TileDef) -> TileId {
        let id = TileId(self.defs.len());
        self.by_texture.insert(def.texture.clone(), id);
        self.defs.push(def);
        id
    }

    /// Register a tile. Chainable.
    pub fn add_tile(mut self, def: TileDef) -> Self {
        self.push(def);
        self
    }

    /// Register all 16 shape variants for a texture prefix
    /// (`prefix` + vertical code + horizontal code). This makes shaped
    /// lookups for the prefix exhaustive by construction, so the render
    /// pass can never miss a shaped key for it.
    pub fn add_floor_tiles(mut self, prefix: &str, glyph: char, color: (u8, u8, u8)) -> Self {
        for h in HORIZONTAL_CODES {
            for v in VERTICAL_CODES {
                let texture = format!("{prefix}{v}{h}");
                self.push(TileDef::new(&texture, glyph, color));
            }
        }
        self
    }

    /// Attributes for a tile id; unknown ids resolve to out-of-bounds.
    pub fn def(&self, id: TileId) -> &TileDef {
        self.defs.get(id.0).unwrap_or(&self.defs[0])
    }

    /// Look up a tile by its texture address.
    pub fn find(&self, texture: &str) -> Option<TileId> {
        self.by_texture.get(texture).copied()
    }

    /// Attributes of the cell at `p`, with off-grid positions resolving
    /// to the out-of-bounds tile.
    pub fn def_at<'a>(&'a self, grid: &Grid, p: Point) -> &'a TileDef {
        match grid.tile(p) {
            Some(id) => self.def(id),
            None => &self.defs[0],
        }
    }

    /// Whether the cell at `p` blocks an actor at elevation `level`.
    ///
    /// A cell blocks when it collides on the actor's own level, when it
    /// sits above the actor, or (if `require_terrain`) when it sits below.
    /// Off-grid always blocks.
    pub fn is_tile_blocking(&self, grid: &Grid, p: Point, level: i32, require_terrain: bool) -> bool {
        match (grid.tile(p), grid.meta(p)) {
            (Some(id), Some(meta)) => {
                (meta.level == level && self.def(id).collide)
                    || meta.level > level
                    || (meta.level < level && require_terrain)
            }
            _ => true,
        }
    }

    /// Corner-sampled box collision against [`Self::is_tile_blocking`].
    pub fn is_box_blocking(
        &self,
        grid: &Grid,
        pos: Point,
        size: Point,
        level: i32,
        require_terrain: bool,
    ) -> bool {
        self.is_tile_blocking(grid, pos, level, require_terrain)
            || self.is_tile_blocking(grid, pos + size, level, require_terrain)
            || self.is_tile_blocking(grid, pos + Point::new(0, size.y), level, require_terrain)
            || self.is_tile_blocking(grid, pos + Point::new(size.x, 0), level, require_terrain)
    }

    /// The standard tileset: base carving tiles plus the "green" overland
    /// style used by segment generation.
    pub fn standard() -> Self {
        Self::new()
            .add_tile(TileDef::new("path", '.', (48, 48, 48)))
            .add_tile(TileDef::new("wall", '#', (74, 52, 155)).solid())
            .add_tile(TileDef::new("stairs", '=', (34, 34, 34)).road())
            .add_tile(TileDef::new("room", 'o', (255, 162, 138)))
            .add_tile(TileDef::new("road", '+', (0, 255, 166)).road())
            // Shaped surface floor for the green style.
            .add_floor_tiles("green.", ',', (92, 160, 70))
            // Gravel is authored unshaped: only the plain fallback exists,
            // so uniform gravel regions all render the same tile.
            .add_tile(TileDef::new("green.gravel", ':', (130, 126, 110)))
            // Pit rim renders shaped, with a plain fallback.
            .add_floor_tiles("green.edge", '%', (70, 100, 52))
            .add_tile(TileDef::new("green.edge", '%', (70, 100, 52)))
            .add_tile(TileDef::new("green.deep", '_', (40, 44, 48)))
            .add_tile(TileDef::new("green.platform", '^', (150, 150, 160)))
    }
}

impl Default for Tileset {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellMeta;

    #[test]
    fn test_out_of_bounds_sentinel() {
        let set = Tileset::standard();
        let def = set.def(Tileset::OUT_OF_BOUNDS);
        assert!(!def.traversable);
        assert!(def.collide);
        // Unknown ids degrade to the sentinel instead of panicking.
        assert_eq!(set.def(TileId(9999)).texture, "outofbounds");
    }

    #[test]
    fn test_floor_tiles_exhaustive() {
        let set = Tileset::standard();
        for v in VERTICAL_CODES {
            for h in HORIZONTAL_CODES {
                assert!(
                    set.find(&format!("green.{v}{h}")).is_some(),
                    "missing shaped tile green.{v}{h}"
                );
                assert!(set.find(&format!("green.edge{v}{h}")).is_some());
            }
        }
        assert!(set.find("green.gravel").is_some());
        assert!(set.find("green.gravelnn").is_none());
    }

    #[test]
    fn test_blocking_by_level() {
        let set = Tileset::standard();
        let mut grid = Grid::new(4, 4, Tileset::PATH);
        let p = Point::new(1, 1);

        assert!(!set.is_tile_blocking(&grid, p, 0, false));

        // Raised cell blocks actors below it.
        grid.set_meta(p, CellMeta { level: 1 });
        assert!(set.is_tile_blocking(&grid, p, 0, false));

        // Lowered cell only blocks when terrain underfoot is required.
        grid.set_meta(p, CellMeta { level: -1 });
        assert!(!set.is_tile_blocking(&grid, p, 0, false));
        assert!(set.is_tile_blocking(&grid, p, 0, true));

        // Colliding tile blocks only on its own level.
        grid.set(p, Tileset::WALL, CellMeta { level: 0 });
        assert!(set.is_tile_blocking(&grid, p, 0, false));
        grid.set_meta(p, CellMeta { level: -1 });
        assert!(!set.is_tile_blocking(&grid, p, 0, false));

        // Off-grid always blocks.
        assert!(set.is_tile_blocking(&grid, Point::new(-1, 0), 0, false));
    }

    #[test]
    fn test_box_blocking_samples_corners() {
        let set = Tileset::standard();
        let mut grid = Grid::new(8, 8, Tileset::PATH);
        assert!(!set.is_box_blocking(&grid, Point::new(2, 2), Point::new(1, 1), 0, false));

        // A wall touching only the far corner still blocks the box.
        grid.set_tile(Point::new(3, 3), Tileset::WALL);
        assert!(set.is_box_blocking(&grid, Point::new(2, 2), Point::new(1, 1), 0, false));
        assert!(!set.is_box_blocking(&grid, Point::new(4, 4), Point::new(1, 1), 0, false));

        // Boxes poking off-grid block.
        assert!(set.is_box_blocking(&grid, Point::new(7, 7), Point::new(1, 1), 0, false));
    }
}
