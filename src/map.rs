//! Wall segments, named regions, and the ASCII grid they are built from.
//!
//! Each character of a map row is one unit cell. Rows run top to bottom with
//! the first row at the largest `y`. Characters with a [`WallType`] become
//! wall shapes, everything else (spaces included) becomes a named region
//! covering its cell.
//!
//! ```text
//!  /  ###   # or *  ###   &  ###   %    #   `  #
//!     ##            ###       ##       ##      ##
//!     #             ###        #      ###      ###
//! ```

use std::collections::HashMap;

use crate::color::Rgb;
use crate::geometry::{Point, Rectangle, Segment};

/// The map the demo starts in. `s` marks the spawn cell.
pub const DEMO_MAP: &str = "\
###########`&#######
#           ` / /  #
#/%#/&`&/&`& % `%`&#
# / %  / `/% &  /  #
#& / `   & / & /%/%#
# `&  & `& ` `% ` &#
#  % # / `%&  # `& #
#% /% %`` / %/& &  #
#/% /   &`%/ % /%& #
# # //& s  %& %`&  #
#  % %`  %/     % &#
####################";

/// Outline of a solid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    /// Right triangle filling the upper-left half of the cell.
    UpperLeft,
    UpperRight,
    LowerRight,
    LowerLeft,
}

impl Shape {
    /// Edges of this shape in the cell whose upper-left corner is `ul`.
    pub fn segments(self, ul: Point) -> Vec<Segment> {
        let edge = |x1: f64, y1: f64, x2: f64, y2: f64| {
            Segment::new(ul + Point::new(x1, y1), ul + Point::new(x2, y2))
        };

        match self {
            Shape::Box => vec![
                edge(0.0, 0.0, 1.0, 0.0),
                edge(1.0, 0.0, 1.0, -1.0),
                edge(0.0, 0.0, 0.0, -1.0),
                edge(0.0, -1.0, 1.0, -1.0),
            ],
            Shape::UpperLeft => vec![
                edge(0.0, 0.0, 1.0, 0.0),
                edge(1.0, 0.0, 0.0, -1.0),
                edge(0.0, 0.0, 0.0, -1.0),
            ],
            Shape::UpperRight => vec![
                edge(0.0, 0.0, 1.0, 0.0),
                edge(1.0, 0.0, 1.0, -1.0),
                edge(0.0, 0.0, 1.0, -1.0),
            ],
            Shape::LowerRight => vec![
                edge(0.0, -1.0, 1.0, -1.0),
                edge(1.0, 0.0, 1.0, -1.0),
                edge(0.0, -1.0, 1.0, 0.0),
            ],
            Shape::LowerLeft => vec![
                edge(0.0, 0.0, 1.0, -1.0),
                edge(0.0, -1.0, 1.0, -1.0),
                edge(0.0, 0.0, 0.0, -1.0),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallType {
    pub color: Rgb,
    pub shape: Shape,
}

impl WallType {
    pub const fn new(color: Rgb, shape: Shape) -> Self {
        Self { color, shape }
    }
}

pub fn default_wall_types() -> HashMap<char, WallType> {
    HashMap::from([
        ('#', WallType::new(Rgb::WHITE, Shape::Box)),
        ('*', WallType::new(Rgb::WHITE, Shape::Box)),
        ('/', WallType::new(Rgb::new(255, 200, 200), Shape::UpperLeft)),
        ('&', WallType::new(Rgb::new(200, 255, 200), Shape::UpperRight)),
        ('%', WallType::new(Rgb::new(200, 200, 255), Shape::LowerRight)),
        ('`', WallType::new(Rgb::new(255, 255, 200), Shape::LowerLeft)),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedLocation {
    pub location: Rectangle,
    pub name: char,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub segments: Vec<Segment>,
    pub named_locations: Vec<NamedLocation>,
    pub wall_types: HashMap<char, WallType>,
}

impl Map {
    /// Builds a map from raw wall edges, dropping the edges shared by two
    /// solid cells.
    pub fn new(segments: Vec<Segment>, named_locations: Vec<NamedLocation>) -> Self {
        Self {
            segments: remove_shared_edges(segments),
            named_locations,
            wall_types: default_wall_types(),
        }
    }

    /// Parses an ASCII map with [`default_wall_types`].
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, default_wall_types())
    }

    pub fn parse_with(text: &str, wall_types: HashMap<char, WallType>) -> Self {
        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let mut segments = Vec::new();
        let mut named_locations = Vec::new();

        // start from the top of the map and work down
        let mut y = lines.len() as f64;
        for line in &lines {
            for (x, ch) in line.chars().enumerate() {
                let x = x as f64;
                match wall_types.get(&ch) {
                    Some(wall) => segments.extend(
                        wall.shape
                            .segments(Point::new(x, y))
                            .into_iter()
                            .map(|segment| segment.with_color(wall.color)),
                    ),
                    None => named_locations.push(NamedLocation {
                        location: Rectangle::new(Point::new(x, y - 1.0), Point::new(x + 1.0, y)),
                        name: ch,
                    }),
                }
            }
            y -= 1.0;
        }

        let generated = segments.len();
        let segments = remove_shared_edges(segments);
        log::debug!(
            "map parsed: {} rows, {} wall segments ({} interior edges removed), {} named regions",
            lines.len(),
            segments.len(),
            generated - segments.len(),
            named_locations.len()
        );

        Self {
            segments,
            named_locations,
            wall_types,
        }
    }

    pub fn get_named_location(&self, name: char) -> Option<Rectangle> {
        self.named_locations
            .iter()
            .find(|location| location.name == name)
            .map(|location| location.location)
    }

    /// Name of the first region strictly containing `point`.
    pub fn get_first_intersection(&self, point: Point) -> Option<char> {
        self.named_locations
            .iter()
            .find(|location| location.location.intersects(point))
            .map(|location| location.name)
    }
}

type EdgeKey = [u64; 4];

fn edge_key(segment: &Segment) -> EdgeKey {
    // + 0.0 folds -0.0 into 0.0 so bit equality matches `==`
    [
        (segment.start.x + 0.0).to_bits(),
        (segment.start.y + 0.0).to_bits(),
        (segment.end.x + 0.0).to_bits(),
        (segment.end.y + 0.0).to_bits(),
    ]
}

/// Keeps only the segments whose directed endpoints occur exactly once,
/// whatever their colour. An edge shared by two touching cells is inside a
/// solid and can never be seen or hit.
pub fn remove_shared_edges(segments: Vec<Segment>) -> Vec<Segment> {
    let mut counts: HashMap<EdgeKey, usize> = HashMap::with_capacity(segments.len());
    for segment in &segments {
        *counts.entry(edge_key(segment)).or_default() += 1;
    }

    segments
        .into_iter()
        .filter(|segment| counts.get(&edge_key(segment)) == Some(&1))
        .collect()
}
