//! Overhead view of the walls around the camera.

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::geometry::{Point, Ray, Segment};

/// Length of the field-of-view indicator lines, in world units.
pub const FOV_LINE_LENGTH: f64 = 2.0;

/// World units visible across the minimap at zoom 1.
pub const DEFAULT_SPAN: f64 = 20.0;

/// Smallest radius of the camera disc in pixels. Below this the disc would
/// cover no pixel centre at low zoom.
pub const MIN_MARKER_RADIUS: f64 = 1.0;

/// Projection from world coordinates to minimap pixels, `center` in the
/// middle and +y pointing up the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Map2D {
    pub width: usize,
    pub height: usize,
    /// Pixels per world unit.
    pub scale: f64,
    pub center: Point,
}

impl Map2D {
    pub fn translate_and_scale(&self, p: Point) -> Point {
        let offset = p - self.center;
        let x = offset.x * self.scale;
        let y = self.height as f64 - offset.y * self.scale;
        Point::new(x, y) + Point::new(self.width as f64 * 0.5, -(self.height as f64) * 0.5)
    }
}

/// Clears `canvas` and draws the walls, the camera, and the edges of its view.
pub fn draw_minimap<C: Canvas + ?Sized>(
    canvas: &mut C,
    walls: &[Segment],
    camera: &Camera,
    fov: f64,
    zoom: f64,
) {
    let map2d = Map2D {
        width: canvas.width(),
        height: canvas.height(),
        scale: canvas.width() as f64 / DEFAULT_SPAN * zoom,
        center: camera.location,
    };

    canvas.clear();

    for segment in walls {
        draw_line(
            canvas,
            map2d.translate_and_scale(segment.start),
            map2d.translate_and_scale(segment.end),
            Rgb::WHITE,
        );
    }

    draw_circle(
        canvas,
        map2d.translate_and_scale(camera.location),
        (map2d.scale / 10.0).max(MIN_MARKER_RADIUS),
        Rgb::BLUE,
    );

    for angle in [camera.start_angle(fov), camera.end_angle(fov)] {
        let edge = Ray::new(camera.location, angle).to_segment(FOV_LINE_LENGTH);
        draw_line(
            canvas,
            map2d.translate_and_scale(edge.start),
            map2d.translate_and_scale(edge.end),
            Rgb::GRAY,
        );
    }
}

#[inline]
fn plot<C: Canvas + ?Sized>(canvas: &mut C, x: i64, y: i64, color: Rgb) {
    if x >= 0 && y >= 0 && (x as usize) < canvas.width() && (y as usize) < canvas.height() {
        canvas.draw((x as usize, y as usize), color);
    }
}

/// Single-pixel Bresenham line. Pixels off the canvas are skipped.
pub fn draw_line<C: Canvas + ?Sized>(canvas: &mut C, start: Point, end: Point, color: Rgb) {
    let Some((start, end)) = clip_line(start, end, canvas.width(), canvas.height()) else {
        return;
    };
    let (mut x0, mut y0) = (start.x.floor() as i64, start.y.floor() as i64);
    let (mut x1, mut y1) = (end.x.floor() as i64, end.y.floor() as i64);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let y_step = if y0 < y1 { 1 } else { -1 };
    let mut error = dx / 2;
    let mut y = y0;

    for x in x0..=x1 {
        if steep {
            plot(canvas, y, x, color);
        } else {
            plot(canvas, x, y, color);
        }
        error -= dy;
        if error < 0 {
            y += y_step;
            error += dx;
        }
    }
}

/// Cohen-Sutherland clip of `start..end` to `[0, width] x [0, height]`.
///
/// Returns `None` when nothing of the line is left, or when a coordinate is
/// not finite.
fn clip_line(
    mut start: Point,
    mut end: Point,
    width: usize,
    height: usize,
) -> Option<(Point, Point)> {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const BOTTOM: u8 = 4;
    const TOP: u8 = 8;
    // converges in at most four rounds for finite input
    const MAX_ROUNDS: usize = 8;

    let (w, h) = (width as f64, height as f64);
    let finite = |p: Point| p.x.is_finite() && p.y.is_finite();
    let outcode = |p: Point| {
        let mut code = 0;
        if p.x < 0.0 {
            code |= LEFT;
        } else if p.x > w {
            code |= RIGHT;
        }
        if p.y < 0.0 {
            code |= TOP;
        } else if p.y > h {
            code |= BOTTOM;
        }
        code
    };

    for _ in 0..MAX_ROUNDS {
        if !(finite(start) && finite(end)) {
            return None;
        }
        let (code0, code1) = (outcode(start), outcode(end));
        if code0 | code1 == 0 {
            return Some((start, end));
        }
        if code0 & code1 != 0 {
            return None;
        }

        let out = if code0 != 0 { code0 } else { code1 };
        let (dx, dy) = (end.x - start.x, end.y - start.y);
        let moved = if out & TOP != 0 {
            Point::new(start.x + dx * ((0.0 - start.y) / dy), 0.0)
        } else if out & BOTTOM != 0 {
            Point::new(start.x + dx * ((h - start.y) / dy), h)
        } else if out & LEFT != 0 {
            Point::new(0.0, start.y + dy * ((0.0 - start.x) / dx))
        } else {
            Point::new(w, start.y + dy * ((w - start.x) / dx))
        };

        if out == code0 {
            start = moved;
        } else {
            end = moved;
        }
    }
    None
}

/// Fills every pixel within `radius` of `center`.
pub fn draw_circle<C: Canvas + ?Sized>(canvas: &mut C, center: Point, radius: f64, color: Rgb) {
    if !(center.x.is_finite() && center.y.is_finite() && radius >= 0.0) {
        return;
    }
    let r2 = radius * radius;
    // bounding box, clipped to the canvas
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let x_min = (center.x - radius).floor().max(0.0) as i64;
    let x_max = (center.x + radius).ceil().min(w - 1.0) as i64;
    let y_min = (center.y - radius).floor().max(0.0) as i64;
    let y_max = (center.y + radius).ceil().min(h - 1.0) as i64;

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            if dx * dx + dy * dy <= r2 {
                plot(canvas, x, y, color);
            }
        }
    }
}
