use std::cmp::Ordering;

use rayon::prelude::*;

use crate::camera::{Camera, horizontal_fov};
use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::error::GeometryError;
use crate::geometry::{IntersectionResult, Ray, Segment, intersect_ray};

/// Share of the frame height filled by a wall one unit away.
const WALL_SCALE: f64 = 0.75;

/// Closest wall along `ray`, if any. A wall at distance zero means the eye is
/// inside it and does not count.
pub fn nearest_hit(ray: &Ray, walls: &[Segment]) -> Option<IntersectionResult> {
    let mut matches = intersect_ray(ray, walls);
    matches.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    matches.into_iter().next().filter(|hit| hit.distance != 0.0)
}

/// Rows `[start, end)` covered by a wall at `corrected_distance` in a frame
/// `height` rows tall, centred vertically.
pub fn wall_span(height: usize, corrected_distance: f64) -> (usize, usize) {
    // float to int casts saturate: negative and NaN give 0, infinity gives usize::MAX
    let wall_height = ((height as f64 * WALL_SCALE) / corrected_distance).floor() as usize;
    let wall_height = wall_height.min(height);
    let start = (height - wall_height) / 2;
    (start, start + wall_height)
}

/// What the previous column drew.
#[derive(Debug, Clone, Copy)]
struct Drawn {
    segment: Segment,
    start: usize,
    end: usize,
    edge: Rgb,
}

/// Draws the first-person view of `walls` from `camera`, one ray per column.
///
/// `fov` defaults to [`horizontal_fov`] of the canvas. Columns where the view
/// switches to a different wall, or between wall and empty space, get an
/// outline instead of a fill.
pub fn render<C: Canvas + ?Sized>(
    canvas: &mut C,
    walls: &[Segment],
    camera: &Camera,
    fov: Option<f64>,
) -> Result<(), GeometryError> {
    let width = canvas.width();
    let height = canvas.height();
    let fov = fov.unwrap_or_else(|| horizontal_fov(width, height));

    canvas.clear();

    let rays = camera
        .rays(width, fov)
        .map(|item| item.map(|(ray, _)| ray))
        .collect::<Result<Vec<_>, _>>()?;

    // columns are independent until the edge pass below
    let hits: Vec<Option<IntersectionResult>> =
        rays.par_iter().map(|ray| nearest_hit(ray, walls)).collect();

    let mut last: Option<Drawn> = None;

    for (col, (ray, hit)) in rays.iter().zip(hits).enumerate() {
        let Some(hit) = hit else {
            // wall to empty space: close off the silhouette
            if let Some(prev) = last.take() {
                edge_line(canvas, prev.edge, col, prev.start, prev.end);
            }
            continue;
        };

        let distance_from_eye = hit.distance;
        // project onto the view axis, otherwise walls bulge towards the centre
        let corrected_distance = distance_from_eye * (camera.direction - ray.angle).cos();
        let (start, end) = wall_span(height, corrected_distance);

        let edge = hit.segment.color.edge(distance_from_eye);

        match last {
            Some(prev) if prev.segment == hit.segment => {
                let fill = hit.segment.color.shaded(distance_from_eye);
                if end > start {
                    canvas.draw_vertical_line(fill, col, start, end - 1);
                }
                if end - start < height {
                    canvas.draw((col, start), edge);
                    canvas.draw((col, end), edge);
                }
            }
            Some(prev) => edge_line(canvas, edge, col, start.min(prev.start), end.max(prev.end)),
            None => edge_line(canvas, edge, col, start, end),
        }

        last = Some(Drawn {
            segment: hit.segment,
            start,
            end,
            edge,
        });
    }

    Ok(())
}

/// Vertical outline over rows `start..=end`, clipped to the canvas.
fn edge_line<C: Canvas + ?Sized>(canvas: &mut C, color: Rgb, col: usize, start: usize, end: usize) {
    let height = canvas.height();
    if height == 0 || start >= height {
        return;
    }
    canvas.draw_vertical_line(color, col, start, end.min(height - 1));
}
