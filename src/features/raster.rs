//! Integer rasterization primitives.
//!
//! Thick lines use the width-aware Bresenham variant (integer error
//! accumulation in both axes, perpendicular cells emitted up to half the
//! requested width). The disk rasterizer compares squared offsets against
//! the unsquared radius, which makes islands noticeably smaller than the
//! nominal radius; generation is tuned around that shape.

use crate::grid::Point;

/// Cells on the Bresenham line from `start` to `end`, inclusive.
pub fn points_on_line(start: Point, end: Point) -> Vec<Point> {
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    let sx = if start.x < end.x { 1 } else { -1 };
    let sy = if start.y < end.y { 1 } else { -1 };
    let mut err = dx - dy;

    let mut p = start;
    let mut points = Vec::new();
    loop {
        points.push(p);
        if p == end {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            p.x += sx;
        }
        if e2 < dx {
            err += dx;
            p.y += sy;
        }
    }
    points
}

/// Cells on a thick line from `start` to `end`.
///
/// For each step of the base line, perpendicular cells are emitted while
/// the accumulated error stays under `ed * (width + 1) / 2`, where `ed`
/// is the Euclidean step length. Cells may repeat where extensions
/// overlap; callers painting them are idempotent per cell.
pub fn points_on_line_width(start: Point, end: Point, width: i32) -> Vec<Point> {
    let mut p = start;
    let dx = (end.x - p.x).abs();
    let sx = if p.x < end.x { 1 } else { -1 };
    let dy = (end.y - p.y).abs();
    let sy = if p.y < end.y { 1 } else { -1 };
    let mut err = dx - dy;

    let ed = if dx + dy == 0 {
        1.0
    } else {
        ((dx * dx + dy * dy) as f64).sqrt()
    };
    let wd = (width as f64 + 1.0) / 2.0;

    let mut points = Vec::new();
    loop {
        points.push(p);
        let mut e2 = err;
        let x2 = p.x;

        if 2 * e2 >= -dx {
            // Perpendicular extension along y.
            e2 += dy;
            let mut y2 = p.y;
            while (e2 as f64) < ed * wd && (end.y != y2 || dx > dy) {
                y2 += sy;
                points.push(Point::new(p.x, y2));
                e2 += dx;
            }
            if p.x == end.x {
                break;
            }
            e2 = err;
            err -= dy;
            p.x += sx;
        }
        if 2 * e2 <= dy {
            // Perpendicular extension along x.
            e2 = dx - e2;
            let mut x2 = x2;
            while (e2 as f64) < ed * wd && (end.x != x2 || dx < dy) {
                x2 += sx;
                points.push(Point::new(x2, p.y));
                e2 += dy;
            }
            if p.y == end.y {
                break;
            }
            err += dx;
            p.y += sy;
        }
    }
    points
}

/// Cells of a disk around `center`. Offsets range over `[-radius, radius)`
/// and qualify when `dx*dx + dy*dy <= radius` (the radius deliberately
/// unsquared).
pub fn disk_points(center: Point, radius: i32) -> Vec<Point> {
    let mut points = Vec::new();
    for x in -radius..radius {
        for y in -radius..radius {
            if x * x + y * y <= radius {
                points.push(center + Point::new(x, y));
            }
        }
    }
    points
}
