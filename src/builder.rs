//! Chainable map-generation pipeline.
//!
//! A builder owns the segment under construction, references to the
//! already-generated neighbors, the session RNG and the chronological
//! list of produced elements. Every placement step tolerates failure by
//! skipping: generation never aborts, a segment just ends up sparser.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::features::{points_on_line_width, Island, LinearPath, MapElement, RoadEntry};
use crate::grid::{Direction, PerDirection, Point};
use crate::segment::SegmentMap;
use crate::tileset::Tileset;

/// Border margin islands keep from every grid edge.
const ISLAND_BORDER: i32 = 2;

/// A fixed size or an inclusive random range resolved per placement.
#[derive(Clone, Copy, Debug)]
pub enum SizeSpec {
    Exact(usize),
    Range(usize, usize),
}

impl SizeSpec {
    pub fn resolve(self, rng: &mut impl Rng) -> usize {
        match self {
            SizeSpec::Exact(n) => n,
            SizeSpec::Range(min, max) if max >= min => rng.gen_range(min..=max),
            SizeSpec::Range(min, _) => min,
        }
    }
}

impl From<usize> for SizeSpec {
    fn from(n: usize) -> Self {
        SizeSpec::Exact(n)
    }
}

impl From<(usize, usize)> for SizeSpec {
    fn from((min, max): (usize, usize)) -> Self {
        SizeSpec::Range(min, max)
    }
}

/// Placement constraints for road-entry detection.
#[derive(Clone, Copy, Debug)]
pub struct RoadOptions {
    /// Cells skipped at both ends of the border scan.
    pub edge_avoidance: usize,
    /// Extra clear cells required around a candidate window.
    pub road_avoidance: usize,
    /// Place roads even on borders that already have a generated
    /// neighbor (their entries would not line up).
    pub allow_map_mismatch: bool,
}

impl Default for RoadOptions {
    fn default() -> Self {
        Self {
            edge_avoidance: 1,
            road_avoidance: 1,
            allow_map_mismatch: false,
        }
    }
}

/// Builder session over one segment.
pub struct MapBuilder<'a> {
    map: SegmentMap,
    around: PerDirection<Option<&'a SegmentMap>>,
    order: Vec<MapElement>,
    tileset: &'a Tileset,
    rng: ChaCha8Rng,
}

impl<'a> MapBuilder<'a> {
    pub fn new(map: SegmentMap, tileset: &'a Tileset, rng: ChaCha8Rng) -> Self {
        Self {
            map,
            around: PerDirection::default(),
            order: Vec::new(),
            tileset,
            rng,
        }
    }

    /// Attach the already-generated neighboring segments.
    pub fn maps_around(mut self, around: PerDirection<Option<&'a SegmentMap>>) -> Self {
        self.around = around;
        self
    }

    /// Finish the session and hand the segment back.
    pub fn finish(self) -> SegmentMap {
        self.map
    }

    /// Copy each known neighbor's adjacent border onto this segment's
    /// matching border, then rebuild the road-entry registry so stitched
    /// roads become entries here too.
    pub fn copy_boundaries_on_opposites(mut self) -> Self {
        for dir in Direction::ALL {
            if let Some(source) = self.around.get(dir) {
                for i in 0..self.map.grid.border_len(dir) {
                    let src = source.grid.border_cell(dir.opposite(), i, 0);
                    let dst = self.map.grid.border_cell(dir, i, 0);
                    if let Some(tile) = source.grid.tile(src) {
                        self.map.grid.set_tile(dst, tile);
                    }
                }
            }
        }
        self.map.find_road_entries(self.tileset);
        self
    }

    /// Scan one border for windows of consecutive non-road cells and
    /// materialize a random qualifying window as a road entry.
    ///
    /// A window qualifies after `size + road_avoidance` clear cells; the
    /// candidate is that window minus its first cell, trimming the
    /// avoidance buffer from the leading edge. Any road cell resets the
    /// scan.
    fn add_road(&mut self, dir: Direction, size: usize, options: &RoadOptions) -> Option<RoadEntry> {
        let window = size + options.road_avoidance;
        let len = self.map.grid.border_len(dir);

        let mut candidates: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut clear_run = 0usize;

        for i in options.edge_avoidance..len.saturating_sub(options.edge_avoidance) {
            let cell = self.map.grid.border_cell(dir, i, 0);
            if self.tileset.def_at(&self.map.grid, cell).is_road {
                clear_run = 0;
                current.clear();
                continue;
            }

            clear_run += 1;
            current.push(cell);
            if current.len() > window {
                current.remove(0);
            }
            if clear_run >= window && current.len() > 1 {
                candidates.push(current[1..].to_vec());
            }
        }

        let cells = candidates.choose(&mut self.rng)?.clone();
        let entry = RoadEntry::carve(&mut self.map.grid, dir, cells);
        self.map.add_entry(entry.clone());
        Some(entry)
    }

    /// Guarantee road entries on unoccupied borders, attempting up to
    /// `count` placements. Borders facing an existing neighbor are
    /// skipped unless `allow_map_mismatch` is set.
    ///
    /// The loop bound starts at `4 - unoccupied`, so segments that already
    /// have entries attempt fewer placements.
    pub fn make_no_less_roadsides_than(
        mut self,
        count: usize,
        size: impl Into<SizeSpec>,
        options: RoadOptions,
    ) -> Self {
        if !self.map.grid.is_ok() {
            return self;
        }
        let size = size.into();

        let mut unoccupied = self.map.unoccupied_borders();
        unoccupied.shuffle(&mut self.rng);

        for _ in 4usize.saturating_sub(unoccupied.len())..count {
            let Some(dir) = unoccupied.pop() else {
                break;
            };
            if self.around.get(dir).is_none() || options.allow_map_mismatch {
                let current_size = size.resolve(&mut self.rng);
                if let Some(road) = self.add_road(dir, current_size, &options) {
                    self.order.push(MapElement::Road(road));
                }
            }
        }
        self
    }

    /// Place one road on a random border that has no entries yet.
    pub fn add_road_on_unoccupied_border(
        mut self,
        size: impl Into<SizeSpec>,
        options: RoadOptions,
    ) -> Self {
        if !self.map.grid.is_ok() {
            return self;
        }
        let size = size.into().resolve(&mut self.rng);

        let unoccupied = self.map.unoccupied_borders();
        if let Some(&dir) = unoccupied.choose(&mut self.rng) {
            if let Some(road) = self.add_road(dir, size, &options) {
                self.order.push(MapElement::Road(road));
            }
        }
        self
    }

    /// Carve a path between two cells, protecting existing roads, stairs
    /// and rooms from being overwritten where the path crosses them.
    fn add_path(&mut self, start: Point, end: Point, width: usize) -> LinearPath {
        let cells = points_on_line_width(start, end, width as i32);
        self.map.fill_points(
            &cells,
            Tileset::PATH,
            &[Tileset::STAIRS, Tileset::ROAD, Tileset::ROOM],
        );
        let path = LinearPath {
            start,
            end,
            width: width as i32,
            cells,
        };
        self.map.paths.push(path.clone());
        path
    }

    /// Connect the teleport anchors of two random road entries.
    pub fn connect_random_roads(mut self, size: impl Into<SizeSpec>) -> Self {
        let width = size.into().resolve(&mut self.rng);

        let anchors = {
            let pool = self.map.shuffled_entries(&mut self.rng);
            if pool.len() < 2 {
                None
            } else {
                let first = pool[0].clone();
                let second = pool[1].clone();
                Some((first, second))
            }
        };
        if let Some((first, second)) = anchors {
            let start = first.representative_tile(&mut self.rng);
            let end = second.representative_tile(&mut self.rng);
            if let (Some(start), Some(end)) = (start, end) {
                let path = self.add_path(start, end, width);
                self.order.push(MapElement::Path(path));
            }
        }
        self
    }

    /// Place an island disk at a random center far enough from every
    /// edge. Skipped when the grid is too small to fit it.
    pub fn add_island(mut self, radius: impl Into<SizeSpec>) -> Self {
        if !self.map.grid.is_ok() {
            return self;
        }
        let radius = radius.into().resolve(&mut self.rng) as i32;

        let margin = ISLAND_BORDER + radius;
        let max_x = self.map.grid.width as i32 - margin;
        let max_y = self.map.grid.height as i32 - margin;
        if max_x < margin || max_y < margin {
            return self;
        }

        let center = Point::new(
            self.rng.gen_range(margin..=max_x),
            self.rng.gen_range(margin..=max_y),
        );
        let island = Island::carve(&mut self.map.grid, center, radius);
        self.map.islands.push(island.clone());
        self.order.push(MapElement::Island(island));
        self
    }

    /// Carve a path between the two most recently created elements.
    pub fn connect_last_two(mut self, size: impl Into<SizeSpec>) -> Self {
        let width = size.into().resolve(&mut self.rng);

        if self.order.len() > 1 {
            let start_el = self.order[self.order.len() - 1].clone();
            let end_el = self.order[self.order.len() - 2].clone();
            let start = start_el.random_tile(&mut self.rng);
            let end = end_el.random_tile(&mut self.rng);
            if let (Some(start), Some(end)) = (start, end) {
                let path = self.add_path(start, end, width);
                self.order.push(MapElement::Path(path));
            }
        }
        self
    }

    /// Run `action` against the session with the given probability
    /// (0..1 fraction, compared against a uniform draw in [0, 100)).
    pub fn chance(
        mut self,
        probability: f64,
        action: impl FnOnce(&mut SegmentMap, &mut ChaCha8Rng),
    ) -> Self {
        if self.rng.gen_range(0..100) < (probability * 100.0) as i32 {
            action(&mut self.map, &mut self.rng);
        }
        self
    }
}

/// Island placement bounds, exposed for containment checks.
pub fn island_margin(radius: i32) -> i32 {
    ISLAND_BORDER + radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn empty_map(w: usize, h: usize) -> SegmentMap {
        SegmentMap::new(w, h, Tileset::WALL)
    }

    #[test]
    fn test_add_road_candidates_respect_edge_avoidance() {
        let tileset = Tileset::standard();
        // 32-long up border, all non-road, size 3, avoidance 1/1.
        for seed in 0..20 {
            let mut builder = MapBuilder::new(empty_map(32, 32), &tileset, rng(seed));
            let entry = builder
                .add_road(Direction::Up, 3, &RoadOptions::default())
                .expect("all-clear border must yield a road");

            assert_eq!(entry.cells.len(), 3);
            for pair in entry.cells.windows(2) {
                assert_eq!(pair[1].x - pair[0].x, 1, "entry run must be contiguous");
            }
            for cell in &entry.cells {
                assert!(cell.x >= 1 && cell.x <= 30, "cell {cell:?} violates avoidance");
            }
        }
    }

    #[test]
    fn test_add_road_resets_on_existing_road() {
        let tileset = Tileset::standard();
        let mut map = empty_map(16, 16);
        // Occupy the middle of the up border so windows must avoid it.
        for x in 6..10 {
            map.grid.set_tile(Point::new(x, 0), Tileset::ROAD);
        }
        let mut builder = MapBuilder::new(map, &tileset, rng(11));
        for _ in 0..10 {
            if let Some(entry) = builder.add_road(Direction::Up, 3, &RoadOptions::default()) {
                for cell in &entry.cells {
                    assert!(cell.x < 6 || cell.x > 9);
                }
            }
        }
    }

    #[test]
    fn test_make_no_less_roadsides_places_entries() {
        let tileset = Tileset::standard();
        let map = MapBuilder::new(empty_map(32, 32), &tileset, rng(5))
            .make_no_less_roadsides_than(4, (1, 3), RoadOptions::default())
            .finish();
        assert_eq!(map.unoccupied_borders().len(), 0);
        assert_eq!(map.entry_count(), 4);
    }

    #[test]
    fn test_roadsides_skip_borders_with_neighbors() {
        let tileset = Tileset::standard();
        let neighbor = empty_map(32, 32);
        let mut around: PerDirection<Option<&SegmentMap>> = PerDirection::default();
        *around.get_mut(Direction::Left) = Some(&neighbor);

        let map = MapBuilder::new(empty_map(32, 32), &tileset, rng(5))
            .maps_around(around)
            .make_no_less_roadsides_than(4, 2usize, RoadOptions::default())
            .finish();

        // The left border faces a neighbor with no roads: no entry may
        // be invented there.
        assert!(map.entries.get(Direction::Left).is_empty());
    }

    #[test]
    fn test_connect_random_roads_carves_path() {
        let tileset = Tileset::standard();
        let map = MapBuilder::new(empty_map(32, 32), &tileset, rng(9))
            .make_no_less_roadsides_than(4, 2usize, RoadOptions::default())
            .connect_random_roads(2usize)
            .finish();

        assert_eq!(map.paths.len(), 1);
        let path = &map.paths[0];
        for &cell in &path.cells {
            if let Some(tile) = map.grid.tile(cell) {
                assert_ne!(tile, Tileset::WALL, "path cell {cell:?} left uncarved");
            }
        }
    }

    #[test]
    fn test_connect_random_roads_skips_without_pair() {
        let tileset = Tileset::standard();
        let map = MapBuilder::new(empty_map(16, 16), &tileset, rng(2))
            .connect_random_roads(2usize)
            .finish();
        assert!(map.paths.is_empty());
    }

    #[test]
    fn test_add_island_containment() {
        let tileset = Tileset::standard();
        for seed in 0..10 {
            let map = MapBuilder::new(empty_map(32, 32), &tileset, rng(seed))
                .add_island((5, 13))
                .finish();
            let island = &map.islands[0];
            let margin = island_margin(island.radius);
            assert!(island.center.x >= margin && island.center.x <= 32 - margin);
            assert!(island.center.y >= margin && island.center.y <= 32 - margin);
            for cell in &island.cells {
                let dx = cell.x - island.center.x;
                let dy = cell.y - island.center.y;
                assert!(dx * dx + dy * dy <= island.radius);
                assert!(map.grid.contains(*cell));
            }
        }
    }

    #[test]
    fn test_add_island_skips_when_too_small() {
        let tileset = Tileset::standard();
        let map = MapBuilder::new(empty_map(8, 8), &tileset, rng(1))
            .add_island(13usize)
            .finish();
        assert!(map.islands.is_empty());
    }

    #[test]
    fn test_connect_last_two_links_island_to_road() {
        let tileset = Tileset::standard();
        let map = MapBuilder::new(empty_map(32, 32), &tileset, rng(21))
            .make_no_less_roadsides_than(1, 3usize, RoadOptions::default())
            .add_island(6usize)
            .connect_last_two(2usize)
            .finish();

        if map.entry_count() > 0 && !map.islands.is_empty() {
            assert_eq!(map.paths.len(), 1);
        }
    }

    #[test]
    fn test_connect_last_two_needs_two_elements() {
        let tileset = Tileset::standard();
        let map = MapBuilder::new(empty_map(32, 32), &tileset, rng(3))
            .add_island(5usize)
            .connect_last_two(2usize)
            .finish();
        assert!(map.paths.is_empty());
    }

    #[test]
    fn test_chance_gates_action() {
        let tileset = Tileset::standard();
        let map = MapBuilder::new(empty_map(8, 8), &tileset, rng(4))
            .chance(0.0, |map, _| map.dig(Point::new(1, 1)))
            .finish();
        assert_eq!(map.grid.tile(Point::new(1, 1)), Some(Tileset::WALL));

        let map = MapBuilder::new(empty_map(8, 8), &tileset, rng(4))
            .chance(1.0, |map, _| map.dig(Point::new(1, 1)))
            .finish();
        assert_eq!(map.grid.tile(Point::new(1, 1)), Some(Tileset::PATH));
    }

    #[test]
    fn test_pipeline_on_unusable_grid_is_noop() {
        let tileset = Tileset::standard();
        let map = MapBuilder::new(empty_map(0, 0), &tileset, rng(6))
            .copy_boundaries_on_opposites()
            .make_no_less_roadsides_than(4, (1, 3), RoadOptions::default())
            .connect_random_roads((1, 3))
            .add_island((5, 13))
            .connect_last_two((1, 6))
            .finish();
        assert_eq!(map.entry_count(), 0);
        assert!(map.islands.is_empty());
        assert!(map.paths.is_empty());
    }

    #[test]
    fn test_boundary_copy_stitches_roads() {
        let tileset = Tileset::standard();
        // Neighbor to the right with a road entry on its left border.
        let mut neighbor = empty_map(16, 16);
        for y in 5..8 {
            neighbor.grid.set_tile(Point::new(0, y), Tileset::ROAD);
        }
        neighbor.find_road_entries(&tileset);
        let mut around: PerDirection<Option<&SegmentMap>> = PerDirection::default();
        *around.get_mut(Direction::Right) = Some(&neighbor);

        let map = MapBuilder::new(empty_map(16, 16), &tileset, rng(8))
            .maps_around(around)
            .copy_boundaries_on_opposites()
            .finish();

        // Shared border is identical cell-for-cell.
        for i in 0..16 {
            let mine = map.grid.border_cell(Direction::Right, i, 0);
            let theirs = neighbor.grid.border_cell(Direction::Left, i, 0);
            assert_eq!(map.grid.tile(mine), neighbor.grid.tile(theirs));
        }
        // And the stitched road produced a usable entry.
        assert_eq!(map.entries.get(Direction::Right).len(), 1);
        assert_eq!(map.entries.get(Direction::Right)[0].cells.len(), 3);
    }
}
