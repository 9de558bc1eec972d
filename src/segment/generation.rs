//! The full per-segment generation pipeline.
//!
//! A segment starts as solid wall, inherits the borders of every known
//! neighbor, then runs the builder chain: guaranteed roadsides, a
//! connecting path, an island linked back to the most recent feature,
//! and a chance-gated gravel courtyard styled through the autotile
//! paintbrush.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::builder::{MapBuilder, RoadOptions};
use crate::grid::{CellMeta, PerDirection, Point};
use crate::segment::SegmentMap;
use crate::terrain::{MetaPatch, StripeEdge, TerrainPaintbrush};
use crate::tileset::Tileset;

/// Width and height of generated segments.
#[derive(Clone, Copy, Debug)]
pub struct SegmentSize {
    pub width: usize,
    pub height: usize,
}

impl Default for SegmentSize {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
        }
    }
}

fn lower_level(meta: CellMeta) -> CellMeta {
    CellMeta {
        level: meta.level - 1,
    }
}

/// Generate one segment, seeded deterministically and stitched against
/// every neighbor present in `around`.
pub fn generate_segment(
    tileset: &Tileset,
    size: SegmentSize,
    seed: u64,
    around: PerDirection<Option<&SegmentMap>>,
) -> SegmentMap {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let map = SegmentMap::new(size.width, size.height, Tileset::WALL);

    MapBuilder::new(map, tileset, rng)
        .maps_around(around)
        .copy_boundaries_on_opposites()
        .make_no_less_roadsides_than(4, (1, 3), RoadOptions::default())
        .connect_random_roads((1, 3))
        .add_island((5, 13))
        .connect_last_two((1, 6))
        .chance(0.35, |map, rng| carve_courtyard(map, tileset, rng))
        .finish()
}

/// Optional decoration: a gravel courtyard with a sunken pit, painted
/// with terrain groups and resolved through the autotile render pass.
fn carve_courtyard(map: &mut SegmentMap, tileset: &Tileset, rng: &mut ChaCha8Rng) {
    let grid = &mut map.grid;
    if grid.width < 16 || grid.height < 16 {
        return;
    }

    let w = rng.gen_range(8..=12).min(grid.width as i32 - 4);
    let h = rng.gen_range(8..=12).min(grid.height as i32 - 4);
    let x = rng.gen_range(2..=grid.width as i32 - 2 - w);
    let y = rng.gen_range(2..=grid.height as i32 - 2 - h);
    let start = Point::new(x, y);
    let end = Point::new(x + w, y + h);
    let pit_start = start + Point::new(2, 2);
    let pit_end = end + Point::new(-2, -2);

    TerrainPaintbrush::new(grid, tileset)
        .glue_groups("gravel", "edge")
        .define_stripe_feature(
            "pit",
            "edge",
            "deep",
            StripeEdge::Top,
            Some(MetaPatch::Map(lower_level)),
            Some(MetaPatch::Map(lower_level)),
        )
        .fill_tiles(start, end, "gravel", None)
        .draw_feature("pit", pit_start, pit_end)
        .render("green");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use crate::seeds::segment_seed;

    #[test]
    fn test_generation_is_deterministic() {
        let tileset = Tileset::standard();
        let seed = segment_seed(99, 0, 0);
        let a = generate_segment(&tileset, SegmentSize::default(), seed, PerDirection::default());
        let b = generate_segment(&tileset, SegmentSize::default(), seed, PerDirection::default());

        for y in 0..32 {
            for x in 0..32 {
                let p = Point::new(x, y);
                assert_eq!(a.grid.tile(p), b.grid.tile(p));
                assert_eq!(a.grid.meta(p), b.grid.meta(p));
            }
        }
        assert_eq!(a.entry_count(), b.entry_count());
    }

    #[test]
    fn test_fresh_segment_has_four_roadsides() {
        let tileset = Tileset::standard();
        for seed in 0..8 {
            let map = generate_segment(
                &tileset,
                SegmentSize::default(),
                seed,
                PerDirection::default(),
            );
            assert!(map.unoccupied_borders().is_empty(), "seed {seed} left a bare border");
        }
    }

    #[test]
    fn test_neighbor_borders_stitch() {
        let tileset = Tileset::standard();
        let size = SegmentSize::default();
        let first = generate_segment(&tileset, size, segment_seed(7, 0, 0), PerDirection::default());

        let mut around: PerDirection<Option<&SegmentMap>> = PerDirection::default();
        *around.get_mut(Direction::Left) = Some(&first);
        let second = generate_segment(&tileset, size, segment_seed(7, 1, 0), around);

        // Every road crossing the seam continues on the new side. (Wall
        // cells on the border may still be carved into by later path
        // placements; road cells are protected from overwrites.)
        for i in 0..first.grid.border_len(Direction::Right) {
            let old = first.grid.border_cell(Direction::Right, i, 0);
            let new = second.grid.border_cell(Direction::Left, i, 0);
            if tileset.def_at(&first.grid, old).is_road {
                assert!(
                    tileset.def_at(&second.grid, new).is_road,
                    "road broken at seam row {i}"
                );
            }
        }
    }
}
