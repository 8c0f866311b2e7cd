use std::f64::consts::{FRAC_PI_4, TAU};
use std::iter::FusedIterator;

use crate::error::GeometryError;
use crate::geometry::{Point, Ray, Segment, intersecting_segments};

/// Horizontal field of view for a `width` x `height` frame, assuming
/// square pixels.
pub fn horizontal_fov(width: usize, height: usize) -> f64 {
    2.0 * (width as f64 / (2.0 * height as f64)).atan() * FRAC_PI_4.tan()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub location: Point, // world position
    pub direction: f64,  // compass angle, kept within (-2π, 2π)
}

impl Camera {
    pub const fn new(location: Point, direction: f64) -> Self {
        Self {
            location,
            direction,
        }
    }

    /// Unit vector along the current heading.
    #[inline]
    fn heading(&self) -> Point {
        Point::new(self.direction.sin(), self.direction.cos())
    }

    /// Moves `distance` along the heading unless the path crosses a wall.
    ///
    /// A blocked move leaves the camera exactly where it was.
    pub fn try_move(&mut self, distance: f64, walls: &[Segment]) {
        let heading = self.heading();
        let new_location = self.location + Point::new(distance * heading.x, distance * heading.y);

        let proposed_move = Segment::new(self.location, new_location);
        if intersecting_segments(&proposed_move, walls).is_empty() {
            self.location = new_location;
        } else {
            log::trace!(
                "move of {distance} from ({}, {}) blocked",
                self.location.x,
                self.location.y
            );
        }
    }

    /// Turns by `angle`. Keeps the sign of the sum, so turning left of
    /// north gives a negative direction.
    pub fn rotate(&mut self, angle: f64) {
        self.direction = (self.direction + angle) % TAU;
    }

    #[inline]
    pub fn start_angle(&self, fov: f64) -> f64 {
        self.direction - fov / 2.0
    }

    #[inline]
    pub fn end_angle(&self, fov: f64) -> f64 {
        self.start_angle(fov) + fov
    }

    /// `count` rays spread across `fov`, left to right.
    ///
    /// The rays pass through evenly spaced points of a flat viewing plane one
    /// unit in front of the camera, so they are even in screen space rather
    /// than in angle. Each item pairs the ray with its plane point. The first
    /// ray goes through the left end of the plane, the plane's right end is
    /// never sampled.
    pub fn rays(&self, count: usize, fov: f64) -> Rays {
        let plane_start = self.location + unit(self.start_angle(fov));
        let plane_end = self.location + unit(self.end_angle(fov));

        Rays {
            location: self.location,
            plane_start,
            step: Point::new(
                (plane_end.x - plane_start.x) / count as f64,
                (plane_end.y - plane_start.y) / count as f64,
            ),
            next: 0,
            count,
        }
    }
}

#[inline]
fn unit(angle: f64) -> Point {
    Point::new(angle.sin(), angle.cos())
}

/// Ray fan produced by [`Camera::rays`].
///
/// A clone continues from the same position. Calling [`Camera::rays`] again,
/// or cloning before the first `next`, replays the whole fan.
#[derive(Debug, Clone)]
pub struct Rays {
    location: Point,
    plane_start: Point,
    step: Point,
    next: usize,
    count: usize,
}

impl Iterator for Rays {
    type Item = Result<(Ray, Point), GeometryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let i = self.next as f64;
        self.next += 1;

        let plane_point = Point::new(
            self.plane_start.x + self.step.x * i,
            self.plane_start.y + self.step.y * i,
        );
        Some(
            Segment::new(self.location, plane_point)
                .to_ray()
                .map(|ray| (ray, plane_point)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rays {}

impl FusedIterator for Rays {}
