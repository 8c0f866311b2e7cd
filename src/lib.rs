//! Segment-based raycasting engine.
//!
//! A map is a set of wall [`Segment`](geometry::Segment)s. Each frame the
//! [`Camera`](camera::Camera) fans out one ray per screen column, the
//! [`renderer`] turns the nearest hit of every ray into a vertical wall span,
//! and the [`minimap`] draws the same walls from above. Both draw into any
//! [`Canvas`](canvas::Canvas).

pub mod camera;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod map;
pub mod minimap;
pub mod renderer;
pub mod scaler;
pub mod world;

pub use camera::Camera;
pub use canvas::{Canvas, FrameBuffer};
pub use color::Rgb;
pub use error::{ConfigError, GeometryError, MapError};
pub use geometry::{IntersectionResult, Point, Ray, Rectangle, Segment};
pub use map::Map;
pub use world::{Command, World};
