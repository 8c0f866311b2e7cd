//! Where rendered pixels go.

use crate::color::Rgb;

/// A pixel sink the renderers draw into.
///
/// Coordinates are `(column, row)` with the origin at the top left. Callers
/// keep their writes inside `[0, width) x [0, height)`.
pub trait Canvas {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn clear(&mut self);
    fn draw(&mut self, pixel: (usize, usize), color: Rgb);

    /// Paints rows `start_row..=end_row` of `column`.
    fn draw_vertical_line(&mut self, color: Rgb, column: usize, start_row: usize, end_row: usize) {
        for row in start_row..=end_row {
            self.draw((column, row), color);
        }
    }
}

/// Row-major buffer of colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    /// Copies `other` with its top-left corner at `(x, y)`, clipping what
    /// falls outside this buffer.
    pub fn blit(&mut self, other: &Self, x: usize, y: usize) {
        for (row, line) in other.pixels.chunks(other.width.max(1)).enumerate() {
            for (column, &color) in line.iter().enumerate() {
                if let Some(i) = self.idx(x + column, y + row) {
                    self.pixels[i] = color;
                }
            }
        }
    }
}

impl Canvas for FrameBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgb::BLACK);
    }

    fn draw(&mut self, (x, y): (usize, usize), color: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    fn draw_vertical_line(&mut self, color: Rgb, column: usize, start_row: usize, end_row: usize) {
        if column >= self.width || self.height == 0 {
            return;
        }
        for row in start_row..=end_row.min(self.height - 1) {
            self.pixels[row * self.width + column] = color;
        }
    }
}
