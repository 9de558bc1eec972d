//! Map elements produced by the feature generators.
//!
//! Every element keeps the ordered list of cells it carved plus enough
//! context to pick an anchor point later ("connect the last two" style
//! operations pick random or representative cells).

use rand::prelude::*;

use crate::features::raster::disk_points;
use crate::grid::{Direction, Grid, Point};
use crate::tileset::Tileset;

/// A contiguous run of road cells on a segment border, carved together
/// with a short perpendicular "porch" leading inward. The innermost porch
/// cells are the entry's representative teleport points.
#[derive(Clone, Debug)]
pub struct RoadEntry {
    pub direction: Direction,
    pub cells: Vec<Point>,
    pub porch: Vec<Point>,
    pub representative: Vec<Point>,
}

/// Depth of the porch carved inward from every entry cell.
const PORCH_DEPTH: usize = 2;

impl RoadEntry {
    /// Materialize an entry: border cells become stairs tiles and the
    /// porch is carved as path tiles.
    pub fn carve(grid: &mut Grid, direction: Direction, cells: Vec<Point>) -> Self {
        let mut entry = Self {
            direction,
            cells,
            porch: Vec::new(),
            representative: Vec::new(),
        };

        for &cell in &entry.cells {
            grid.set_tile(cell, Tileset::STAIRS);

            // Border index of this cell along its own border.
            let pos = match direction {
                Direction::Left | Direction::Right => cell.y as usize,
                Direction::Up | Direction::Down => cell.x as usize,
            };
            for depth in 0..PORCH_DEPTH {
                let porch_cell = grid.border_cell(direction, pos, depth + 1);
                grid.set_tile(porch_cell, Tileset::PATH);
                entry.porch.push(porch_cell);
            }
            if let Some(&innermost) = entry.porch.last() {
                entry.representative.push(innermost);
            }
        }

        entry
    }

    /// A random teleport anchor for this entry.
    pub fn representative_tile(&self, rng: &mut impl Rng) -> Option<Point> {
        self.representative.choose(rng).copied()
    }

    pub fn random_tile(&self, rng: &mut impl Rng) -> Option<Point> {
        self.cells.choose(rng).copied()
    }
}

/// A rasterized disk of room tiles.
#[derive(Clone, Debug)]
pub struct Island {
    pub center: Point,
    pub radius: i32,
    pub cells: Vec<Point>,
}

impl Island {
    pub fn carve(grid: &mut Grid, center: Point, radius: i32) -> Self {
        let cells = disk_points(center, radius);
        for &cell in &cells {
            grid.set_tile(cell, Tileset::ROOM);
        }
        Self {
            center,
            radius,
            cells,
        }
    }

    pub fn random_tile(&self, rng: &mut impl Rng) -> Option<Point> {
        self.cells.choose(rng).copied()
    }
}

/// A width-aware carved path between two points.
#[derive(Clone, Debug)]
pub struct LinearPath {
    pub start: Point,
    pub end: Point,
    pub width: i32,
    pub cells: Vec<Point>,
}

impl LinearPath {
    pub fn random_tile(&self, rng: &mut impl Rng) -> Option<Point> {
        self.cells.choose(rng).copied()
    }
}

/// Any element in a builder session's creation history.
#[derive(Clone, Debug)]
pub enum MapElement {
    Road(RoadEntry),
    Island(Island),
    Path(LinearPath),
}

impl MapElement {
    /// A uniformly random carved cell of the element.
    pub fn random_tile(&self, rng: &mut impl Rng) -> Option<Point> {
        match self {
            MapElement::Road(road) => road.random_tile(rng),
            MapElement::Island(island) => island.random_tile(rng),
            MapElement::Path(path) => path.random_tile(rng),
        }
    }

    /// The element's anchor: entries answer with a porch teleport point,
    /// everything else with a random cell.
    pub fn representative_tile(&self, rng: &mut impl Rng) -> Option<Point> {
        match self {
            MapElement::Road(road) => road.representative_tile(rng),
            other => other.random_tile(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_road_entry_carves_porch_inward() {
        let mut grid = Grid::new(16, 16, Tileset::WALL);
        let cells = vec![Point::new(0, 5), Point::new(0, 6), Point::new(0, 7)];
        let entry = RoadEntry::carve(&mut grid, Direction::Left, cells);

        for &cell in &entry.cells {
            assert_eq!(grid.tile(cell), Some(Tileset::STAIRS));
        }
        // Two porch cells per entry cell, one and two steps inward.
        assert_eq!(entry.porch.len(), 6);
        assert_eq!(grid.tile(Point::new(1, 5)), Some(Tileset::PATH));
        assert_eq!(grid.tile(Point::new(2, 5)), Some(Tileset::PATH));
        // Representative points are the innermost porch cells.
        assert_eq!(entry.representative.len(), 3);
        for p in &entry.representative {
            assert_eq!(p.x, 2);
        }
    }

    #[test]
    fn test_road_entry_porch_down_border() {
        let mut grid = Grid::new(10, 10, Tileset::WALL);
        let cells = vec![Point::new(4, 9), Point::new(5, 9)];
        let entry = RoadEntry::carve(&mut grid, Direction::Down, cells);

        assert_eq!(grid.tile(Point::new(4, 8)), Some(Tileset::PATH));
        assert_eq!(grid.tile(Point::new(4, 7)), Some(Tileset::PATH));
        assert!(entry.representative.contains(&Point::new(4, 7)));
        assert!(entry.representative.contains(&Point::new(5, 7)));
    }

    #[test]
    fn test_island_carves_room_tiles() {
        let mut grid = Grid::new(32, 32, Tileset::WALL);
        let island = Island::carve(&mut grid, Point::new(16, 16), 9);

        assert!(!island.cells.is_empty());
        for &cell in &island.cells {
            assert_eq!(grid.tile(cell), Some(Tileset::ROOM));
        }
    }

    #[test]
    fn test_element_anchor_selection() {
        let mut grid = Grid::new(16, 16, Tileset::WALL);
        let entry = RoadEntry::carve(&mut grid, Direction::Left, vec![Point::new(0, 4)]);
        let element = MapElement::Road(entry);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let anchor = element.representative_tile(&mut rng).unwrap();
        assert_eq!(anchor, Point::new(2, 4));
        let cell = element.random_tile(&mut rng).unwrap();
        assert_eq!(cell, Point::new(0, 4));
    }
}
