use thiserror::Error;

/// Geometry that cannot be turned into what the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// A segment with identical endpoints has no direction, so it has no ray.
    #[error("cannot create a ray from a zero-length segment at ({x}, {y})")]
    DegenerateSegment { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map has no region named '{0}' to spawn in")]
    MissingSpawn(char),
}

/// Command-line settings the engine cannot run with.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("frame size {width}x{height} has no pixels")]
    EmptyFrame { width: usize, height: usize },
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("minimap zoom {0} must be positive")]
    BadZoom(f64),
}
