#![allow(dead_code)]

use raycaster::canvas::Canvas;
use raycaster::color::Rgb;
use raycaster::geometry::{Point, Segment};

/// Canvas that remembers every call instead of painting.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub width: usize,
    pub height: usize,
    pub cleared: bool,
    pub pixels: Vec<((usize, usize), Rgb)>,
    pub vertical_lines: Vec<(Rgb, usize, usize, usize)>,
}

impl RecordingCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Vertical lines drawn in `column`, in call order.
    pub fn lines_in(&self, column: usize) -> Vec<(Rgb, usize, usize)> {
        self.vertical_lines
            .iter()
            .filter(|line| line.1 == column)
            .map(|&(color, _, start, end)| (color, start, end))
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self) {
        self.cleared = true;
    }

    fn draw(&mut self, pixel: (usize, usize), color: Rgb) {
        self.pixels.push((pixel, color));
    }

    fn draw_vertical_line(&mut self, color: Rgb, column: usize, start_row: usize, end_row: usize) {
        self.vertical_lines.push((color, column, start_row, end_row));
    }
}

pub fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::new(Point::new(x1, y1), Point::new(x2, y2))
}

/// Four walls enclosing `(x1, y1)`..`(x2, y2)`: bottom, top, left, right.
pub fn box_walls(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Segment> {
    vec![
        segment(x1, y1, x2, y1),
        segment(x1, y2, x2, y2),
        segment(x1, y1, x1, y2),
        segment(x2, y1, x2, y2),
    ]
}
