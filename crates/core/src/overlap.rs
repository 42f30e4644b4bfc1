//! Exact overlap area between convex polygons.
//!
//! Both operands are normalized to counter-clockwise (positive shoelace)
//! winding, then the subject is clipped against each edge of the clip
//! polygon (Sutherland–Hodgman). For two convex inputs the surviving ring is
//! exactly their intersection, whose area is taken with the shoelace formula.
//!
//! Numerical policy: a vertex within [`EPSILON`] of a clip edge counts as
//! inside, vertices closer than [`EPSILON`] are merged, and a ring with fewer
//! than three vertices or a near-zero area is treated as empty.

use tracing::trace;

use crate::geometry::Point;

/// Distance below which two points coincide, or a point lies on an edge.
pub const EPSILON: f64 = 1e-9;

/// Signed area below which an operand is treated as degenerate.
const AREA_EPSILON: f64 = 1e-12;

/// Outcome of an overlap computation.
///
/// `degenerate` is set when the raw result was non-physical (non-finite,
/// negative, or larger than either operand) and `area` was clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub area: f64,
    pub degenerate: bool,
}

/// Signed shoelace area: positive for counter-clockwise winding in a y-up
/// frame (clockwise on screen), negative for the opposite winding.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum();
    twice / 2.0
}

/// Unsigned polygon area.
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// The unit pixel cell `[x, x + 1] × [y, y + 1]`, centered at `(x + 0.5, y + 0.5)`.
pub fn unit_cell(x: i64, y: i64) -> [Point; 4] {
    let (x0, y0) = (x as f64, y as f64);
    [
        Point::new(x0, y0),
        Point::new(x0 + 1.0, y0),
        Point::new(x0 + 1.0, y0 + 1.0),
        Point::new(x0, y0 + 1.0),
    ]
}

/// Vertices of the intersection of two convex polygons.
///
/// Returns an empty vector when the polygons do not overlap with positive
/// area or either operand is degenerate.
pub fn intersection(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    let Some(clip) = oriented_ring(clip) else {
        return Vec::new();
    };
    let Some(mut output) = oriented_ring(subject) else {
        return Vec::new();
    };

    for (i, &c0) in clip.iter().enumerate() {
        let c1 = clip[(i + 1) % clip.len()];
        let edge = c1 - c0;
        let len = edge.length();
        let distance = |p: Point| edge.perp_dot(p - c0) / len;

        let input = std::mem::take(&mut output);
        let Some(&last) = input.last() else {
            return Vec::new();
        };
        let mut prev = last;
        let mut prev_d = distance(prev);
        for &cur in &input {
            let cur_d = distance(cur);
            let cur_inside = cur_d >= -EPSILON;
            let prev_inside = prev_d >= -EPSILON;
            if cur_inside != prev_inside {
                output.push(crossing(prev, prev_d, cur, cur_d));
            }
            if cur_inside {
                output.push(cur);
            }
            prev = cur;
            prev_d = cur_d;
        }

        dedup_ring(&mut output);
        if output.len() < 3 {
            return Vec::new();
        }
    }
    output
}

/// Area of the intersection of two convex polygons, with the clamp applied.
pub fn overlap(a: &[Point], b: &[Point]) -> Overlap {
    let finite = a.iter().chain(b).all(|p| p.is_finite());
    let raw = polygon_area(&intersection(a, b));
    let bound = polygon_area(a).min(polygon_area(b));

    if finite && raw.is_finite() && raw >= 0.0 && raw <= bound + EPSILON {
        return Overlap {
            area: raw.min(bound),
            degenerate: false,
        };
    }

    trace!(raw, bound, finite, "non-physical overlap clamped");
    let area = if raw.is_finite() && raw > 0.0 && bound.is_finite() {
        bound
    } else {
        0.0
    };
    Overlap {
        area,
        degenerate: true,
    }
}

/// Shorthand for `overlap(a, b).area`.
pub fn overlap_area(a: &[Point], b: &[Point]) -> f64 {
    overlap(a, b).area
}

/// Point where segment `a → b` crosses the clip line, given the signed
/// distances of its endpoints. Callers guarantee `da != db`.
fn crossing(a: Point, da: f64, b: Point, db: f64) -> Point {
    a + (b - a) * (da / (da - db))
}

/// Copies `points` into a deduplicated counter-clockwise ring, or `None`
/// when the ring is degenerate.
fn oriented_ring(points: &[Point]) -> Option<Vec<Point>> {
    let mut ring = points.to_vec();
    dedup_ring(&mut ring);
    if ring.len() < 3 {
        return None;
    }
    let area = signed_area(&ring);
    if !area.is_finite() || area.abs() < AREA_EPSILON {
        return None;
    }
    if area < 0.0 {
        ring.reverse();
    }
    Some(ring)
}

/// Merges consecutive coincident vertices, including the wrap-around pair.
fn dedup_ring(points: &mut Vec<Point>) {
    points.dedup_by(|cur, prev| cur.distance(*prev) < EPSILON);
    while points.len() > 1 && points[0].distance(points[points.len() - 1]) < EPSILON {
        points.pop();
    }
}
