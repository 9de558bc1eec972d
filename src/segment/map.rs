//! One generated segment: its grid plus the registries of features
//! carved into it.

use rand::prelude::*;

use crate::features::{points_on_line, Island, LinearPath, RoadEntry};
use crate::grid::{Direction, Grid, PerDirection, Point, TileId};
use crate::tileset::Tileset;

/// A segment map: the grid and the road-entry/island/path registries the
/// builder fills while generating it.
#[derive(Clone, Debug)]
pub struct SegmentMap {
    pub grid: Grid,
    pub entries: PerDirection<Vec<RoadEntry>>,
    pub islands: Vec<Island>,
    pub paths: Vec<LinearPath>,
}

impl SegmentMap {
    pub fn new(width: usize, height: usize, fill: TileId) -> Self {
        Self {
            grid: Grid::new(width, height, fill),
            entries: PerDirection::default(),
            islands: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn add_entry(&mut self, entry: RoadEntry) {
        self.entries.get_mut(entry.direction).push(entry);
    }

    /// Rebuild the road-entry registry by scanning every border for
    /// contiguous runs of road tiles. Each discovered run is re-carved,
    /// which re-digs its porch; stitched-in border roads gain a working
    /// entry this way.
    pub fn find_road_entries(&mut self, tileset: &Tileset) {
        for dir in Direction::ALL {
            self.entries.get_mut(dir).clear();

            let mut run: Vec<Point> = Vec::new();
            for i in 0..self.grid.border_len(dir) {
                let cell = self.grid.border_cell(dir, i, 0);
                if tileset.def_at(&self.grid, cell).is_road {
                    run.push(cell);
                } else if !run.is_empty() {
                    let entry = RoadEntry::carve(&mut self.grid, dir, std::mem::take(&mut run));
                    self.entries.get_mut(dir).push(entry);
                }
            }
            if !run.is_empty() {
                let entry = RoadEntry::carve(&mut self.grid, dir, run);
                self.entries.get_mut(dir).push(entry);
            }
        }
    }

    /// Borders with no road entry at all.
    pub fn unoccupied_borders(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.entries.get(dir).is_empty())
            .collect()
    }

    /// All entries across every border, flattened and shuffled.
    pub fn shuffled_entries(&self, rng: &mut impl Rng) -> Vec<&RoadEntry> {
        let mut pool: Vec<&RoadEntry> = Direction::ALL
            .into_iter()
            .flat_map(|dir| self.entries.get(dir).iter())
            .collect();
        pool.shuffle(rng);
        pool
    }

    pub fn entry_count(&self) -> usize {
        Direction::ALL
            .into_iter()
            .map(|dir| self.entries.get(dir).len())
            .sum()
    }

    /// Paint `points` with `fill`, skipping cells whose current tile is
    /// in `exclude`. This is how paths avoid overwriting roads, stairs
    /// and rooms they cross.
    pub fn fill_points(&mut self, points: &[Point], fill: TileId, exclude: &[TileId]) {
        for &p in points {
            match self.grid.tile(p) {
                Some(current) if exclude.contains(&current) => {}
                Some(_) => self.grid.set_tile(p, fill),
                None => {}
            }
        }
    }

    /// A reasonable place to drop the player: a random road entry's
    /// teleport point, or the grid center when the segment has no
    /// entries.
    pub fn spawn_point(&self, rng: &mut impl Rng) -> Point {
        let pool = self.shuffled_entries(rng);
        for entry in pool {
            if let Some(p) = entry.representative_tile(rng) {
                return p;
            }
        }
        Point::new(self.grid.width as i32 / 2, self.grid.height as i32 / 2)
    }

    /// Whether every cell on the line between `origin` and `target` is
    /// traversable.
    pub fn is_point_visible(&self, tileset: &Tileset, origin: Point, target: Point) -> bool {
        points_on_line(origin, target)
            .iter()
            .all(|&p| tileset.def_at(&self.grid, p).traversable)
    }

    /// Runtime edit: overwrite a cell with a path tile. Operates directly
    /// on the grid, outside the generation pipeline.
    pub fn dig(&mut self, p: Point) {
        self.grid.set_tile(p, Tileset::PATH);
    }
}
