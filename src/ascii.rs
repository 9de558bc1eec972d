//! ASCII rendering and export for segment maps.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::grid::Point;
use crate::segment::SegmentMap;
use crate::tileset::Tileset;

/// Render a segment as rows of tile glyphs.
pub fn render_segment(map: &SegmentMap, tileset: &Tileset) -> String {
    let mut out = String::with_capacity((map.grid.width + 1) * map.grid.height);
    for y in 0..map.grid.height {
        for x in 0..map.grid.width {
            let def = tileset.def_at(&map.grid, Point::new(x as i32, y as i32));
            out.push(def.glyph);
        }
        out.push('\n');
    }
    out
}

/// One-line summary of a segment's features.
pub fn describe_segment(map: &SegmentMap, coord: (i32, i32)) -> String {
    format!(
        "segment ({}, {}): {} road entries, {} islands, {} paths",
        coord.0,
        coord.1,
        map.entry_count(),
        map.islands.len(),
        map.paths.len(),
    )
}

/// Write an ASCII render to a timestamped text file, returning the
/// filename.
pub fn export_ascii(map: &SegmentMap, tileset: &Tileset, label: &str) -> io::Result<String> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("overland_{label}_{timestamp}.txt");

    let mut file = File::create(&filename)?;
    file.write_all(render_segment(map, tileset).as_bytes())?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dimensions() {
        let tileset = Tileset::standard();
        let map = SegmentMap::new(8, 5, Tileset::WALL);
        let text = render_segment(&map, &tileset);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            assert_eq!(line.chars().count(), 8);
            assert!(line.chars().all(|c| c == '#'));
        }
    }

    #[test]
    fn test_render_shows_carved_tiles() {
        let tileset = Tileset::standard();
        let mut map = SegmentMap::new(4, 1, Tileset::WALL);
        map.grid.set_tile(Point::new(1, 0), Tileset::PATH);
        map.grid.set_tile(Point::new(2, 0), Tileset::ROAD);
        assert_eq!(render_segment(&map, &tileset), "#.+#\n");
    }
}
