//! Rotated rectangle model and integer pixel bounds.
//!
//! A [`RotatedRect`] derives its four corners from center, size and rotation
//! and memoizes them until the next mutation. Corners are emitted in a fixed
//! index convention so that the axis-aligned extent can be read off by index:
//! `corners[0]` is the topmost (min-y) corner, `corners[1]` the rightmost,
//! `corners[2]` the bottommost and `corners[3]` the leftmost.

use std::cell::Cell;
use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;

use crate::error::SquaresError;

/// A point in centered canvas coordinates (origin at the canvas center, y down).
pub type Point = DVec2;

/// Integer axis-aligned box of pixel cells, half-open on the max edges.
///
/// Cell `(x, y)` covers `[x, x + 1] × [y, y + 1]`; the box holds the cells
/// with `min_x <= x < max_x` and `min_y <= y < max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl PixelBounds {
    /// Number of columns in the box (zero when empty).
    pub fn width(&self) -> i64 {
        (self.max_x - self.min_x).max(0)
    }

    /// Number of rows in the box (zero when empty).
    pub fn height(&self) -> i64 {
        (self.max_y - self.min_y).max(0)
    }

    /// Number of pixel cells inside the box.
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Overlapping part of two boxes, or `None` when they share no cell.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let clipped = Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Iterates the cells of the box in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..self.max_y).flat_map(move |y| (min_x..max_x).map(move |x| (x, y)))
    }
}

/// A rectangle of positive extent rotated about its center.
///
/// Rotation is stored normalized to `[0, π)`, since a rectangle is
/// π-periodic in shape. The corner cache is owned by the value and cleared
/// by every setter.
#[derive(Debug, Clone)]
pub struct RotatedRect {
    center: Point,
    width: f64,
    height: f64,
    rotation: f64,
    corners: Cell<Option<[Point; 4]>>,
}

impl RotatedRect {
    /// Creates a rectangle.
    ///
    /// Returns `SquaresError::InvalidGeometry` if `width` or `height` is not
    /// a positive finite number, or if `center` or `rotation` is not finite.
    pub fn new(center: Point, width: f64, height: f64, rotation: f64) -> Result<Self, SquaresError> {
        validate_extent(width, height)?;
        validate_center(center)?;
        validate_rotation(rotation)?;
        Ok(Self {
            center,
            width,
            height,
            rotation: normalize_rotation(rotation),
            corners: Cell::new(None),
        })
    }

    /// Creates an unrotated square of side `side`.
    pub fn square(center: Point, side: f64) -> Result<Self, SquaresError> {
        Self::new(center, side, side, 0.0)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Rotation in radians, normalized to `[0, π)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Moves the rectangle. A non-finite center is rejected and the
    /// rectangle is left unchanged.
    pub fn set_center(&mut self, center: Point) -> Result<(), SquaresError> {
        validate_center(center)?;
        self.center = center;
        self.corners.set(None);
        Ok(())
    }

    /// Sets the rotation, normalizing it to `[0, π)`. A non-finite angle is
    /// rejected and the rectangle is left unchanged.
    pub fn set_rotation(&mut self, rotation: f64) -> Result<(), SquaresError> {
        validate_rotation(rotation)?;
        self.rotation = normalize_rotation(rotation);
        self.corners.set(None);
        Ok(())
    }

    /// Sets the width. Rejects non-positive or non-finite values and leaves
    /// the rectangle unchanged in that case.
    pub fn set_width(&mut self, width: f64) -> Result<(), SquaresError> {
        self.set_size(width, self.height)
    }

    /// Sets the height. Rejects non-positive or non-finite values and leaves
    /// the rectangle unchanged in that case.
    pub fn set_height(&mut self, height: f64) -> Result<(), SquaresError> {
        self.set_size(self.width, height)
    }

    /// Sets both extents at once.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), SquaresError> {
        validate_extent(width, height)?;
        self.width = width;
        self.height = height;
        self.corners.set(None);
        Ok(())
    }

    /// Whether the corners are currently memoized.
    pub fn has_cached_corners(&self) -> bool {
        self.corners.get().is_some()
    }

    /// The four corners in the fixed top/right/bottom/left index convention.
    pub fn corners(&self) -> [Point; 4] {
        if let Some(cached) = self.corners.get() {
            return cached;
        }
        let computed = compute_corners(self.center, self.width, self.height, self.rotation);
        self.corners.set(Some(computed));
        computed
    }

    /// Smallest integer box enclosing the rectangle.
    ///
    /// Minimum edges are floored and maximum edges are ceiled, so every pixel
    /// cell the rectangle touches is inside the box.
    pub fn bounding_box(&self) -> PixelBounds {
        let [top, right, bottom, left] = self.corners();
        PixelBounds {
            min_x: left.x.floor() as i64,
            min_y: top.y.floor() as i64,
            max_x: right.x.ceil() as i64,
            max_y: bottom.y.ceil() as i64,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

pub(crate) fn validate_extent(width: f64, height: f64) -> Result<(), SquaresError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(SquaresError::InvalidGeometry(format!(
            "width {width} and height {height} must be positive and finite"
        )))
    }
}

fn validate_center(center: Point) -> Result<(), SquaresError> {
    if center.is_finite() {
        Ok(())
    } else {
        Err(SquaresError::InvalidGeometry(format!(
            "center ({}, {}) must be finite",
            center.x, center.y
        )))
    }
}

pub(crate) fn validate_rotation(rotation: f64) -> Result<(), SquaresError> {
    if rotation.is_finite() {
        Ok(())
    } else {
        Err(SquaresError::InvalidGeometry(format!(
            "rotation {rotation} must be finite"
        )))
    }
}

/// Reduces an angle into `[0, π)`.
pub fn normalize_rotation(rotation: f64) -> f64 {
    let mut r = rotation % PI;
    if r < 0.0 {
        r += PI;
    }
    // Tiny negative inputs round up to exactly π.
    if r >= PI {
        0.0
    } else {
        r
    }
}

/// Corner derivation from the half-diagonal and the diagonal's angle.
///
/// `rotation` must already be normalized to `[0, π)`.
fn compute_corners(center: Point, width: f64, height: f64, rotation: f64) -> [Point; 4] {
    let d = (width * width + height * height).sqrt() / 2.0;
    let a = (height / width).atan();
    let (s1, c1) = (a + rotation).sin_cos();
    let (s2, c2) = (a - rotation).sin_cos();

    let p1 = DVec2::new(center.x - d * c1, center.y - d * s1);
    let p2 = DVec2::new(center.x + d * c2, center.y - d * s2);
    let p3 = DVec2::new(center.x + d * c1, center.y + d * s1);
    let p4 = DVec2::new(center.x - d * c2, center.y + d * s2);

    // Past a quarter turn the extremal roles shift by one corner.
    if rotation < FRAC_PI_2 {
        [p1, p2, p3, p4]
    } else {
        [p4, p1, p2, p3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    const EPS: f64 = 1e-9;

    fn assert_point_near(actual: Point, expected: Point) {
        assert!(
            actual.distance(expected) < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    // -- Construction --

    #[test]
    fn new_rejects_non_positive_extent() {
        assert!(matches!(
            RotatedRect::new(Point::ZERO, 0.0, 1.0, 0.0),
            Err(SquaresError::InvalidGeometry(_))
        ));
        assert!(RotatedRect::new(Point::ZERO, 1.0, -3.0, 0.0).is_err());
    }

    #[test]
    fn new_rejects_non_finite_extent() {
        assert!(RotatedRect::new(Point::ZERO, f64::NAN, 1.0, 0.0).is_err());
        assert!(RotatedRect::new(Point::ZERO, 1.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn new_rejects_non_finite_center() {
        for center in [
            Point::new(f64::NAN, 0.0),
            Point::new(0.0, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            let err = RotatedRect::new(center, 2.0, 2.0, 0.0).unwrap_err();
            assert!(matches!(err, SquaresError::InvalidGeometry(_)), "{center:?}");
            assert!(err.to_string().contains("center"), "{err}");
        }
    }

    #[test]
    fn new_rejects_non_finite_rotation() {
        for rotation in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = RotatedRect::new(Point::ZERO, 2.0, 2.0, rotation).unwrap_err();
            assert!(matches!(err, SquaresError::InvalidGeometry(_)), "{rotation}");
            assert!(err.to_string().contains("rotation"), "{err}");
        }
    }

    #[test]
    fn rejected_center_or_rotation_leaves_rect_unchanged() {
        let mut r = RotatedRect::new(DVec2::new(3.0, -1.0), 2.0, 4.0, 0.5).unwrap();
        let corners = r.corners();
        let bounds = r.bounding_box();

        assert!(r.set_center(Point::new(f64::NAN, 0.0)).is_err());
        assert!(r.set_rotation(f64::NAN).is_err());
        assert!(r.set_rotation(f64::INFINITY).is_err());

        assert_eq!(r.center(), DVec2::new(3.0, -1.0));
        assert!((r.rotation() - 0.5).abs() < f64::EPSILON);
        assert!(r.has_cached_corners());
        assert_eq!(r.corners(), corners);
        assert_eq!(r.bounding_box(), bounds);
    }

    #[test]
    fn rotation_is_normalized_on_construction() {
        let r = RotatedRect::new(Point::ZERO, 1.0, 1.0, -FRAC_PI_4).unwrap();
        assert!((r.rotation() - 3.0 * FRAC_PI_4).abs() < EPS);
        let r = RotatedRect::new(Point::ZERO, 1.0, 1.0, 5.0 * PI / 2.0).unwrap();
        assert!((r.rotation() - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn normalize_rotation_stays_below_pi() {
        assert_eq!(normalize_rotation(-1e-20), 0.0);
        assert_eq!(normalize_rotation(PI), 0.0);
        assert_eq!(normalize_rotation(0.0), 0.0);
    }

    // -- Corners --

    #[test]
    fn unrotated_corners_are_top_left_first() {
        let r = RotatedRect::new(DVec2::new(10.0, 20.0), 4.0, 2.0, 0.0).unwrap();
        let c = r.corners();
        assert_point_near(c[0], DVec2::new(8.0, 19.0));
        assert_point_near(c[1], DVec2::new(12.0, 19.0));
        assert_point_near(c[2], DVec2::new(12.0, 21.0));
        assert_point_near(c[3], DVec2::new(8.0, 21.0));
    }

    #[test]
    fn quarter_turn_diamond_has_axis_corners() {
        let r = RotatedRect::new(Point::ZERO, 2.0_f64.sqrt(), 2.0_f64.sqrt(), FRAC_PI_4).unwrap();
        let c = r.corners();
        for p in c {
            assert!((p.length() - 1.0).abs() < EPS, "corner {p:?} not at distance 1");
        }
        assert_point_near(c[0], DVec2::new(0.0, -1.0));
        assert_point_near(c[1], DVec2::new(1.0, 0.0));
        assert_point_near(c[2], DVec2::new(0.0, 1.0));
        assert_point_near(c[3], DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn diamond_past_quarter_turn_keeps_index_roles() {
        let r = RotatedRect::new(Point::ZERO, 2.0_f64.sqrt(), 2.0_f64.sqrt(), 3.0 * FRAC_PI_4)
            .unwrap();
        let c = r.corners();
        assert_point_near(c[0], DVec2::new(0.0, -1.0));
        assert_point_near(c[1], DVec2::new(1.0, 0.0));
        assert_point_near(c[2], DVec2::new(0.0, 1.0));
        assert_point_near(c[3], DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn index_roles_hold_on_both_sides_of_threshold() {
        for rotation in [FRAC_PI_2 - 1e-6, FRAC_PI_2, FRAC_PI_2 + 1e-6] {
            let r = RotatedRect::new(Point::ZERO, 6.0, 2.0, rotation).unwrap();
            let c = r.corners();
            let min_y = c.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
            let max_x = c.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
            assert!((c[0].y - min_y).abs() < EPS, "rotation {rotation}: {c:?}");
            assert!((c[1].x - max_x).abs() < EPS, "rotation {rotation}: {c:?}");
        }
    }

    #[test]
    fn corners_preserve_side_lengths() {
        let r = RotatedRect::new(DVec2::new(-3.0, 7.0), 5.0, 3.0, 0.7).unwrap();
        let c = r.corners();
        let sides: Vec<f64> = (0..4).map(|i| c[i].distance(c[(i + 1) % 4])).collect();
        assert!((sides[0] - sides[2]).abs() < EPS);
        assert!((sides[1] - sides[3]).abs() < EPS);
        let mut pair = [sides[0], sides[1]];
        pair.sort_by(f64::total_cmp);
        assert!((pair[0] - 3.0).abs() < EPS && (pair[1] - 5.0).abs() < EPS);
    }

    // -- Cache --

    #[test]
    fn corners_are_cached_until_mutation() {
        let mut r = RotatedRect::square(Point::ZERO, 2.0).unwrap();
        assert!(!r.has_cached_corners());
        let first = r.corners();
        assert!(r.has_cached_corners());

        r.set_rotation(FRAC_PI_4).unwrap();
        assert!(!r.has_cached_corners());
        assert_ne!(r.corners(), first);

        r.set_center(DVec2::new(1.0, 1.0)).unwrap();
        assert!(!r.has_cached_corners());
        r.corners();
        r.set_width(3.0).unwrap();
        assert!(!r.has_cached_corners());
        r.corners();
        r.set_height(3.0).unwrap();
        assert!(!r.has_cached_corners());
    }

    #[test]
    fn rejected_size_leaves_rect_unchanged() {
        let mut r = RotatedRect::square(Point::ZERO, 2.0).unwrap();
        let before = r.corners();
        assert!(r.set_width(0.0).is_err());
        assert!(r.set_size(1.0, f64::NAN).is_err());
        assert_eq!(r.width(), 2.0);
        assert_eq!(r.height(), 2.0);
        assert!(r.has_cached_corners());
        assert_eq!(r.corners(), before);
    }

    // -- Bounding box --

    #[test]
    fn bounding_box_of_unrotated_square_hugs_its_extent() {
        // Trig round-off may push an edge a hair past the integer line, which
        // costs at most one extra row or column.
        let r = RotatedRect::square(DVec2::new(100.0, -100.0), 100.0).unwrap();
        let b = r.bounding_box();
        assert!((49..=50).contains(&b.min_x), "{b:?}");
        assert!((150..=151).contains(&b.max_x), "{b:?}");
        assert!((-151..=-150).contains(&b.min_y), "{b:?}");
        assert!((-50..=-49).contains(&b.max_y), "{b:?}");
    }

    #[test]
    fn bounding_box_rounds_outward_on_both_sides_of_origin() {
        let r = RotatedRect::square(DVec2::new(0.25, 0.25), 1.0).unwrap();
        let b = r.bounding_box();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-1, -1, 1, 1));

        let r = RotatedRect::square(DVec2::new(10.5, 10.5), 0.5).unwrap();
        let b = r.bounding_box();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (10, 10, 11, 11));
    }

    #[test]
    fn pixel_bounds_intersect_and_cells() {
        let a = PixelBounds {
            min_x: -2,
            min_y: -2,
            max_x: 2,
            max_y: 1,
        };
        let b = PixelBounds {
            min_x: 0,
            min_y: 0,
            max_x: 5,
            max_y: 5,
        };
        let i = a.intersect(b).unwrap();
        assert_eq!((i.min_x, i.min_y, i.max_x, i.max_y), (0, 0, 2, 1));
        let cells: Vec<_> = i.cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0)]);

        let far = PixelBounds {
            min_x: 100,
            max_x: 105,
            ..b
        };
        assert!(a.intersect(far).is_none());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn extent() -> impl Strategy<Value = f64> {
            0.1_f64..500.0
        }

        fn coord() -> impl Strategy<Value = f64> {
            -1000.0_f64..1000.0
        }

        fn angle() -> impl Strategy<Value = f64> {
            -20.0_f64..20.0
        }

        fn same_point_set(a: &[Point; 4], b: &[Point; 4], tol: f64) -> bool {
            a.iter().all(|p| b.iter().any(|q| p.distance(*q) < tol))
                && b.iter().all(|q| a.iter().any(|p| p.distance(*q) < tol))
        }

        proptest! {
            #[test]
            fn corners_are_pi_periodic(
                cx in coord(),
                cy in coord(),
                w in extent(),
                h in extent(),
                r in angle(),
            ) {
                let a = RotatedRect::new(DVec2::new(cx, cy), w, h, r).unwrap();
                let b = RotatedRect::new(DVec2::new(cx, cy), w, h, r + PI).unwrap();
                prop_assert!(
                    same_point_set(&a.corners(), &b.corners(), 1e-6),
                    "{:?} vs {:?}", a.corners(), b.corners()
                );
            }

            #[test]
            fn bounding_box_contains_all_corners(
                cx in coord(),
                cy in coord(),
                w in extent(),
                h in extent(),
                r in angle(),
            ) {
                let rect = RotatedRect::new(DVec2::new(cx, cy), w, h, r).unwrap();
                let b = rect.bounding_box();
                for p in rect.corners() {
                    prop_assert!(p.x >= b.min_x as f64 - 1e-9 && p.x <= b.max_x as f64 + 1e-9,
                        "corner {p:?} outside {b:?}");
                    prop_assert!(p.y >= b.min_y as f64 - 1e-9 && p.y <= b.max_y as f64 + 1e-9,
                        "corner {p:?} outside {b:?}");
                }
            }

            #[test]
            fn corners_stay_on_the_circumscribed_circle(
                w in extent(),
                h in extent(),
                r in angle(),
            ) {
                let rect = RotatedRect::new(Point::ZERO, w, h, r).unwrap();
                let d = (w * w + h * h).sqrt() / 2.0;
                for p in rect.corners() {
                    prop_assert!((p.length() - d).abs() < 1e-9 * d.max(1.0));
                }
            }
        }
    }
}
