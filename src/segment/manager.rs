//! Lazy cache of generated segments keyed by world coordinates.
//!
//! Crossing into unexplored territory generates the new segment seeded
//! from every neighbor already in the cache, so shared borders stay
//! continuous. Revisiting a coordinate returns the cached segment
//! untouched.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::builder::{MapBuilder, RoadOptions};
use crate::grid::{Direction, PerDirection};
use crate::seeds::segment_seed;
use crate::segment::generation::{generate_segment, SegmentSize};
use crate::segment::SegmentMap;
use crate::tileset::Tileset;

/// World coordinate of a segment.
pub type SegmentCoord = (i32, i32);

/// Owns every generated segment and tracks which one the player is on.
pub struct SegmentManager {
    tileset: Tileset,
    size: SegmentSize,
    master_seed: u64,
    segments: HashMap<SegmentCoord, SegmentMap>,
    current: SegmentCoord,
}

impl SegmentManager {
    /// Create a manager and generate the starting segment at (0, 0).
    pub fn new(tileset: Tileset, size: SegmentSize, master_seed: u64) -> Self {
        let mut manager = Self {
            tileset,
            size,
            master_seed,
            segments: HashMap::new(),
            current: (0, 0),
        };
        let start = manager.generate_at((0, 0));
        manager.segments.insert((0, 0), start);
        manager
    }

    /// An already-generated segment, or `None` if never visited.
    pub fn segment(&self, coord: SegmentCoord) -> Option<&SegmentMap> {
        self.segments.get(&coord)
    }

    pub fn current(&self) -> &SegmentMap {
        &self.segments[&self.current]
    }

    pub fn current_mut(&mut self) -> &mut SegmentMap {
        self.segments.get_mut(&self.current).expect("current segment always cached")
    }

    pub fn current_coord(&self) -> SegmentCoord {
        self.current
    }

    pub fn generated_count(&self) -> usize {
        self.segments.len()
    }

    /// Cross into the neighboring segment, generating it on first visit.
    pub fn move_to(&mut self, dir: Direction) {
        let (dx, dy) = dir.segment_shift();
        let next = (self.current.0 + dx, self.current.1 + dy);

        if !self.segments.contains_key(&next) {
            let generated = self.generate_at(next);
            self.segments.insert(next, generated);
        }
        self.current = next;
    }

    fn generate_at(&self, coord: SegmentCoord) -> SegmentMap {
        let mut around: PerDirection<Option<&SegmentMap>> = PerDirection::default();
        for dir in Direction::ALL {
            let (dx, dy) = dir.segment_shift();
            *around.get_mut(dir) = self.segments.get(&(coord.0 + dx, coord.1 + dy));
        }
        let seed = segment_seed(self.master_seed, coord.0, coord.1);
        generate_segment(&self.tileset, self.size, seed, around)
    }

    /// Rebuild the current segment in place, seeding its borders from the
    /// outgoing version. With a teleport direction only that one border
    /// is preserved; without one all four carry over.
    pub fn regenerate_current(&mut self, teleport: Option<Direction>) {
        let Some(old) = self.segments.remove(&self.current) else {
            return;
        };

        let mut fresh = SegmentMap::new(old.grid.width, old.grid.height, Tileset::WALL);
        let directions: Vec<Direction> = match teleport {
            Some(dir) => vec![dir],
            None => Direction::ALL.to_vec(),
        };
        for dir in directions {
            for i in 0..fresh.grid.border_len(dir) {
                let src = old.grid.border_cell(dir, i, 0);
                let dst = fresh.grid.border_cell(dir.opposite(), i, 0);
                if let Some(tile) = old.grid.tile(src) {
                    fresh.grid.set_tile(dst, tile);
                }
            }
        }
        fresh.find_road_entries(&self.tileset);

        let seed = segment_seed(self.master_seed, self.current.0, self.current.1);
        let rng = ChaCha8Rng::seed_from_u64(crate::seeds::derive_seed(seed, "regenerate"));
        let rebuilt = MapBuilder::new(fresh, &self.tileset, rng)
            .add_road_on_unoccupied_border((1, 3), RoadOptions::default())
            .add_road_on_unoccupied_border((1, 3), RoadOptions::default())
            .connect_random_roads((1, 3))
            .add_island((5, 13))
            .connect_last_two((1, 6))
            .finish();
        self.segments.insert(self.current, rebuilt);
    }

    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }
}
