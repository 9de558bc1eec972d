//! PNG and JSON export of generated segments.

use std::fs::File;
use std::io;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::grid::{Direction, Point};
use crate::segment::SegmentMap;
use crate::tileset::Tileset;

/// Export a segment as a PNG, each cell drawn as a `scale`-pixel square
/// of its tileset color.
pub fn export_segment_png(
    map: &SegmentMap,
    tileset: &Tileset,
    path: &str,
    scale: u32,
) -> Result<(), image::ImageError> {
    let scale = scale.max(1);
    let width = map.grid.width as u32 * scale;
    let height = map.grid.height as u32 * scale;
    let mut img: RgbImage = ImageBuffer::new(width.max(1), height.max(1));

    for y in 0..map.grid.height {
        for x in 0..map.grid.width {
            let def = tileset.def_at(&map.grid, Point::new(x as i32, y as i32));
            let (r, g, b) = def.color;
            for py in 0..scale {
                for px in 0..scale {
                    img.put_pixel(x as u32 * scale + px, y as u32 * scale + py, Rgb([r, g, b]));
                }
            }
        }
    }

    img.save(path)
}

#[derive(Serialize)]
struct EntryDump {
    direction: String,
    cells: Vec<(i32, i32)>,
    representative: Vec<(i32, i32)>,
}

#[derive(Serialize)]
struct SegmentDump {
    coord: (i32, i32),
    width: usize,
    height: usize,
    /// Row-major tile indices.
    tiles: Vec<usize>,
    /// Row-major elevation levels.
    levels: Vec<i32>,
    entries: Vec<EntryDump>,
    islands: usize,
    paths: usize,
}

fn direction_name(dir: Direction) -> &'static str {
    match dir {
        Direction::Left => "left",
        Direction::Right => "right",
        Direction::Up => "up",
        Direction::Down => "down",
    }
}

/// Write a debug dump of a segment as pretty-printed JSON.
pub fn export_segment_json(map: &SegmentMap, coord: (i32, i32), path: &str) -> io::Result<()> {
    let mut tiles = Vec::with_capacity(map.grid.width * map.grid.height);
    let mut levels = Vec::with_capacity(map.grid.width * map.grid.height);
    for y in 0..map.grid.height {
        for x in 0..map.grid.width {
            let p = Point::new(x as i32, y as i32);
            tiles.push(map.grid.tile(p).map(|t| t.0).unwrap_or(0));
            levels.push(map.grid.meta(p).map(|m| m.level).unwrap_or(0));
        }
    }

    let entries = map
        .entries
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|entry| EntryDump {
            direction: direction_name(entry.direction).to_string(),
            cells: entry.cells.iter().map(|p| (p.x, p.y)).collect(),
            representative: entry.representative.iter().map(|p| (p.x, p.y)).collect(),
        })
        .collect();

    let dump = SegmentDump {
        coord,
        width: map.grid.width,
        height: map.grid.height,
        tiles,
        levels,
        entries,
        islands: map.islands.len(),
        paths: map.paths.len(),
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &dump)?;
    Ok(())
}
