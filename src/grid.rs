//! Grid primitives for segment maps.
//!
//! A `Grid` is a width x height matrix of tile indices plus a parallel
//! per-cell metadata record. Access is bounds-checked: reads outside the
//! grid return `None` (callers resolve that to the out-of-bounds tile),
//! writes outside the grid are no-ops.

use std::ops::Add;

/// A cell coordinate. Signed so that off-grid positions are representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// One of the four borders of a segment (and the direction of travel
/// across it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The border facing this one on a neighboring segment.
    /// Only left/right and up/down are opposite pairs.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Offset applied to segment coordinates when moving this way.
    /// Up is +y in world space.
    pub fn segment_shift(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    /// Stable index for per-direction storage.
    pub fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

/// Fixed-size per-direction storage, indexed by [`Direction::index`].
#[derive(Clone, Debug, Default)]
pub struct PerDirection<T>(pub [T; 4]);

impl<T> PerDirection<T> {
    pub fn get(&self, dir: Direction) -> &T {
        &self.0[dir.index()]
    }

    pub fn get_mut(&mut self, dir: Direction) -> &mut T {
        &mut self.0[dir.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.iter().map(move |&d| (d, &self.0[d.index()]))
    }
}

/// Index into a [`crate::tileset::Tileset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileId(pub usize);

/// Per-cell metadata. `level` is an elevation layer used by collision
/// queries; features that dig or raise terrain adjust it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellMeta {
    pub level: i32,
}

/// A 2D grid of tiles with parallel per-cell metadata.
#[derive(Clone, Debug)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    tiles: Vec<TileId>,
    meta: Vec<CellMeta>,
}

impl Grid {
    /// Create a grid filled with the given tile and default metadata.
    pub fn new(width: usize, height: usize, fill: TileId) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width * height],
            meta: vec![CellMeta::default(); width * height],
        }
    }

    /// A grid is usable only if both dimensions are non-zero. Generation
    /// steps treat an unusable grid as an empty no-op target.
    pub fn is_ok(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && (p.x as usize) < self.width && p.y >= 0 && (p.y as usize) < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    pub fn tile(&self, p: Point) -> Option<TileId> {
        self.index(p).map(|i| self.tiles[i])
    }

    pub fn meta(&self, p: Point) -> Option<CellMeta> {
        self.index(p).map(|i| self.meta[i])
    }

    /// Set the tile at `p`. Out-of-bounds writes are silently dropped.
    pub fn set_tile(&mut self, p: Point, tile: TileId) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }

    pub fn set_meta(&mut self, p: Point, meta: CellMeta) {
        if let Some(i) = self.index(p) {
            self.meta[i] = meta;
        }
    }

    pub fn set(&mut self, p: Point, tile: TileId, meta: CellMeta) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
            self.meta[i] = meta;
        }
    }

    /// Fill the entire grid with a tile, resetting metadata.
    pub fn fill(&mut self, tile: TileId) {
        self.tiles.fill(tile);
        self.meta.fill(CellMeta::default());
    }

    /// Number of cells along the border facing `dir`.
    pub fn border_len(&self, dir: Direction) -> usize {
        match dir {
            Direction::Left | Direction::Right => self.height,
            Direction::Up | Direction::Down => self.width,
        }
    }

    /// Coordinate of the cell at index `pos` along the `dir` border,
    /// moved `shift` cells inward from that border.
    pub fn border_cell(&self, dir: Direction, pos: usize, shift: usize) -> Point {
        match dir {
            Direction::Left => Point::new(shift as i32, pos as i32),
            Direction::Right => Point::new(self.width as i32 - 1 - shift as i32, pos as i32),
            Direction::Up => Point::new(pos as i32, shift as i32),
            Direction::Down => Point::new(pos as i32, self.height as i32 - 1 - shift as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_read_is_none() {
        let grid = Grid::new(4, 4, TileId(1));
        assert_eq!(grid.tile(Point::new(-1, 0)), None);
        assert_eq!(grid.tile(Point::new(0, 4)), None);
        assert_eq!(grid.tile(Point::new(3, 3)), Some(TileId(1)));
    }

    #[test]
    fn test_out_of_bounds_write_is_noop() {
        let mut grid = Grid::new(4, 4, TileId(1));
        grid.set_tile(Point::new(4, 0), TileId(2));
        grid.set_tile(Point::new(0, -1), TileId(2));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(grid.tile(Point::new(x, y)), Some(TileId(1)));
            }
        }
    }

    #[test]
    fn test_zero_size_grid_not_ok() {
        let grid = Grid::new(0, 10, TileId(0));
        assert!(!grid.is_ok());
        assert_eq!(grid.tile(Point::new(0, 0)), None);
    }

    #[test]
    fn test_border_cells() {
        let grid = Grid::new(8, 6, TileId(0));
        assert_eq!(grid.border_len(Direction::Left), 6);
        assert_eq!(grid.border_len(Direction::Up), 8);
        assert_eq!(grid.border_cell(Direction::Left, 2, 0), Point::new(0, 2));
        assert_eq!(grid.border_cell(Direction::Right, 2, 1), Point::new(6, 2));
        assert_eq!(grid.border_cell(Direction::Up, 3, 0), Point::new(3, 0));
        assert_eq!(grid.border_cell(Direction::Down, 3, 2), Point::new(3, 3));
    }

    #[test]
    fn test_opposite_directions() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Up.opposite(), Direction::Down);
    }

    #[test]
    fn test_meta_defaults_to_level_zero() {
        let grid = Grid::new(2, 2, TileId(0));
        assert_eq!(grid.meta(Point::new(1, 1)).unwrap().level, 0);
    }
}
