//! Points, segments, rays, and the intersection math everything else sits on.
//!
//! Angles use compass convention: 0 points along +y and angles grow
//! clockwise, so a ray at angle `a` travels along `(sin a, cos a)`.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::{Add, Sub};

use crate::color::Rgb;
use crate::error::GeometryError;

/// How far a ray reaches when it is turned into a segment. Far beyond any map.
pub const DISTANT_POINT: f64 = 1000.0;

/// Slack allowed when checking a computed point against a segment's extent.
pub const EPSILON: f64 = 0.000_000_1;

/// `min <= value <= max`, padded by [`EPSILON`] on both ends.
#[inline]
pub fn in_range(min: f64, max: f64, value: f64) -> bool {
    (min - EPSILON) <= value && value <= (max + EPSILON)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Axis-aligned box named after map text order: `upper_left` holds the
/// smaller coordinates, `lower_right` the larger ones.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub upper_left: Point,
    pub lower_right: Point,
}

impl Rectangle {
    pub const fn new(upper_left: Point, lower_right: Point) -> Self {
        Self {
            upper_left,
            lower_right,
        }
    }

    /// Strict containment: points on the border are outside.
    pub fn intersects(&self, point: Point) -> bool {
        point.x > self.upper_left.x
            && point.y > self.upper_left.y
            && point.x < self.lower_right.x
            && point.y < self.lower_right.y
    }

    pub fn center(&self) -> Point {
        let summed = self.upper_left + self.lower_right;
        Point::new(summed.x / 2.0, summed.y / 2.0)
    }
}

/// One wall edge. Equality includes the colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub color: Rgb,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            color: Rgb::WHITE,
        }
    }

    pub const fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    pub fn min_y(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    pub fn max_y(&self) -> f64 {
        self.start.y.max(self.end.y)
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// True when `p` lies inside this segment's bounding box, with tolerance.
    pub fn in_bounds(&self, p: Point) -> bool {
        in_range(self.min_x(), self.max_x(), p.x) && in_range(self.min_y(), self.max_y(), p.y)
    }

    fn denominator(&self, other: &Self) -> f64 {
        (other.end.y - other.start.y) * (self.end.x - self.start.x)
            - (other.end.x - other.start.x) * (self.end.y - self.start.y)
    }

    pub fn parallel(&self, other: &Self) -> bool {
        self.denominator(other) == 0.0
    }

    /// Where this segment crosses `other`, endpoints included.
    ///
    /// Parallel and collinear segments never intersect, even when they overlap.
    pub fn intersection(&self, other: &Self) -> Option<Point> {
        if !(self.min_x() <= other.max_x()
            && self.max_x() >= other.min_x()
            && self.min_y() <= other.max_y()
            && self.max_y() >= other.min_y())
        {
            return None;
        }

        let (x1, y1) = (self.start.x, self.start.y);
        let (x2, y2) = (self.end.x, self.end.y);
        let (x3, y3) = (other.start.x, other.start.y);
        let (x4, y4) = (other.end.x, other.end.y);

        let denominator = self.denominator(other);
        if denominator == 0.0 {
            return None;
        }

        let t = ((x3 - x1) * (y4 - y3) - (y3 - y1) * (x4 - x3)) / denominator;
        let u = ((x1 - x2) * (y3 - y1) - (y1 - y2) * (x3 - x1)) / denominator;

        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
        } else {
            None
        }
    }

    /// The ray leaving `start` through `end`.
    ///
    /// Negative compass angles are wrapped into `[0, 2π)`; non-negative ones
    /// are returned as computed, without the modulo.
    pub fn to_ray(&self) -> Result<Ray, GeometryError> {
        if self.start == self.end {
            return Err(GeometryError::DegenerateSegment {
                x: self.start.x,
                y: self.start.y,
            });
        }

        // atan2 measures counter-clockwise from +x; compass angles run clockwise from +y
        let angle = -(self.end.y - self.start.y).atan2(self.end.x - self.start.x) + FRAC_PI_2;
        let wrapped = angle % TAU;
        let angle = if wrapped < 0.0 { wrapped + TAU } else { angle };

        Ok(Ray::new(self.start, angle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub start: Point,
    /// Compass angle in radians.
    pub angle: f64,
}

impl Ray {
    pub const fn new(start: Point, angle: f64) -> Self {
        Self { start, angle }
    }

    pub fn end_point(&self, distance: f64) -> Point {
        Point::new(
            self.start.x + self.angle.sin() * distance,
            self.start.y + self.angle.cos() * distance,
        )
    }

    pub fn to_segment(&self, distance: f64) -> Segment {
        Segment::new(self.start, self.end_point(distance))
    }
}

/// One wall hit by a query segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionResult {
    /// Distance from the query segment's start to `intersection`.
    pub distance: f64,
    pub intersection: Point,
    pub segment: Segment,
}

/// Every segment of `segments` crossed by `input`, in input order.
pub fn intersecting_segments(input: &Segment, segments: &[Segment]) -> Vec<IntersectionResult> {
    segments
        .iter()
        .filter_map(|segment| {
            input
                .intersection(segment)
                .map(|intersection| IntersectionResult {
                    distance: input.start.distance(intersection),
                    intersection,
                    segment: *segment,
                })
        })
        .collect()
}

/// Casts `ray` out to [`DISTANT_POINT`] and collects what it crosses.
pub fn intersect_ray(ray: &Ray, segments: &[Segment]) -> Vec<IntersectionResult> {
    intersecting_segments(&ray.to_segment(DISTANT_POINT), segments)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_4, PI};

    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn points_add_and_subtract() {
        let p = Point::new(1.0, 2.0) + Point::new(3.0, -4.0);
        assert_eq!(p, Point::new(4.0, -2.0));
        assert_eq!(p - Point::new(4.0, -2.0), Point::default());
    }

    #[test]
    fn in_range_absorbs_round_off() {
        assert!(in_range(0.0, 1.0, 1.000_000_05));
        assert!(in_range(0.0, 1.0, -0.000_000_05));
        assert!(!in_range(0.0, 1.0, 1.000_001));
        assert!(seg(0.0, 0.0, 1.0, 1.0).in_bounds(Point::new(0.5, 1.000_000_01)));
    }

    #[test]
    fn segment_extent() {
        let s = seg(3.0, -1.0, -2.0, 4.0);
        assert_eq!((s.min_x(), s.max_x()), (-2.0, 3.0));
        assert_eq!((s.min_y(), s.max_y()), (-1.0, 4.0));
    }

    #[test]
    fn equality_includes_color() {
        let white = seg(0.0, 0.0, 1.0, 0.0);
        let red = white.with_color(Rgb::new(255, 0, 0));
        assert_ne!(white, red);
        assert_eq!(red, seg(0.0, 0.0, 1.0, 0.0).with_color(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn crossing_segments_meet_exactly_at_origin() {
        let horizontal = seg(-1.0, 0.0, 1.0, 0.0);
        let vertical = seg(0.0, -1.0, 0.0, 1.0);
        assert_eq!(horizontal.intersection(&vertical), Some(Point::new(0.0, 0.0)));
        assert_eq!(vertical.intersection(&horizontal), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn touching_endpoints_count_as_intersection() {
        let a = seg(0.0, 0.0, 1.0, 0.0);
        let b = seg(1.0, 0.0, 1.0, 1.0);
        assert_eq!(a.intersection(&b), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn disjoint_bounding_boxes_never_intersect() {
        assert_eq!(seg(0.0, 0.0, 1.0, 1.0).intersection(&seg(2.0, 2.0, 3.0, 0.0)), None);
    }

    #[test]
    fn collinear_overlap_is_not_reported() {
        let a = seg(0.0, 0.0, 2.0, 0.0);
        let b = seg(1.0, 0.0, 3.0, 0.0);
        assert!(a.parallel(&b));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn zero_length_query_never_intersects() {
        let point = seg(0.5, 0.0, 0.5, 0.0);
        assert!(intersecting_segments(&point, &[seg(0.0, 0.0, 1.0, 0.0)]).is_empty());
    }

    #[test]
    fn degenerate_segment_has_no_ray() {
        assert_eq!(
            seg(2.0, 3.0, 2.0, 3.0).to_ray(),
            Err(GeometryError::DegenerateSegment { x: 2.0, y: 3.0 })
        );
        assert!(seg(0.0, 0.0, 1.0, 2.0).to_ray().is_ok());
    }

    #[rstest]
    #[case::north(0.0, 1.0, 0.0)]
    #[case::east(1.0, 0.0, PI / 2.0)]
    #[case::south(0.0, -1.0, PI)]
    #[case::west(-1.0, 0.0, 3.0 * PI / 2.0)]
    #[case::north_west(-1.0, 1.0, 7.0 * PI / 4.0)]
    fn to_ray_uses_compass_angles(#[case] dx: f64, #[case] dy: f64, #[case] expected: f64) {
        let ray = seg(0.0, 0.0, dx, dy).to_ray().unwrap();
        assert_relative_eq!(ray.angle, expected, epsilon = 1e-12);
    }

    #[test]
    fn to_ray_only_wraps_negative_angles() {
        // South-east: the raw angle 3π/4 is non-negative and comes back untouched.
        let raw = -(-1.0_f64).atan2(1.0) + FRAC_PI_2;
        let ray = seg(0.0, 0.0, 1.0, -1.0).to_ray().unwrap();
        assert_eq!(ray.angle.to_bits(), raw.to_bits());

        // West-north-west: the raw angle is negative and gets wrapped.
        let raw = -(0.5_f64).atan2(-1.0) + FRAC_PI_2;
        assert!(raw < 0.0);
        let ray = seg(0.0, 0.0, -1.0, 0.5).to_ray().unwrap();
        assert_eq!(ray.angle.to_bits(), (raw % TAU + TAU).to_bits());
    }

    #[rstest]
    #[case(0.0, Point::new(0.0, DISTANT_POINT))]
    #[case(PI / 2.0, Point::new(DISTANT_POINT, 0.0))]
    #[case(PI, Point::new(0.0, -DISTANT_POINT))]
    #[case(3.0 * PI / 2.0, Point::new(-DISTANT_POINT, 0.0))]
    fn ray_projects_along_sin_cos(#[case] angle: f64, #[case] end: Point) {
        let segment = Ray::new(Point::default(), angle).to_segment(DISTANT_POINT);
        assert_eq!(segment.start, Point::default());
        assert_relative_eq!(segment.end.x, end.x, epsilon = 1e-9);
        assert_relative_eq!(segment.end.y, end.y, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.0)]
    #[case(FRAC_PI_4)]
    #[case(PI / 2.0)]
    #[case(PI)]
    #[case(3.0 * PI / 2.0)]
    #[case(TAU + FRAC_PI_4)]
    fn ray_segment_round_trip(#[case] angle: f64) {
        let ray = Ray::new(Point::default(), angle);
        let back = ray.to_segment(DISTANT_POINT).to_ray().unwrap();
        assert_eq!(back.start, ray.start);
        assert_relative_eq!(back.angle, angle % TAU, epsilon = 1e-9);
    }

    #[test]
    fn ray_hits_perpendicular_walls() {
        let down = Ray::new(Point::new(10.0, 5.0), PI);
        let hits = intersect_ray(&down, &[seg(0.0, 0.0, 20.0, 0.0)]);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].intersection.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(hits[0].intersection.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(hits[0].distance, 5.0, epsilon = 1e-9);

        let right = Ray::new(Point::default(), PI / 2.0);
        let hits = intersect_ray(&right, &[seg(4.0, -10.0, 4.0, 10.0)]);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].intersection.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(hits[0].intersection.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn ray_hits_diagonal_wall() {
        let down = Ray::new(Point::new(10.0, 5.0), PI);
        assert_eq!(intersect_ray(&down, &[seg(0.0, 0.0, 20.0, -20.0)]).len(), 1);
    }

    #[test]
    fn results_keep_input_order() {
        let query = seg(0.0, 0.0, 10.0, 0.0);
        let walls = [seg(8.0, -1.0, 8.0, 1.0), seg(2.0, -1.0, 2.0, 1.0), seg(5.0, 1.0, 5.0, 2.0)];
        let hits = intersecting_segments(&query, &walls);
        let distances: Vec<f64> = hits.iter().map(|hit| hit.distance).collect();
        assert_eq!(distances, vec![8.0, 2.0]);
        assert_eq!(hits[0].segment, walls[0]);
    }

    #[test]
    fn rectangle_containment_is_strict() {
        let cell = Rectangle::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0));
        assert!(cell.intersects(Point::new(1.5, 1.5)));
        assert!(!cell.intersects(Point::new(1.0, 1.5)));
        assert!(!cell.intersects(Point::new(1.5, 2.0)));
        assert_eq!(cell.center(), Point::new(1.5, 1.5));
    }
}
