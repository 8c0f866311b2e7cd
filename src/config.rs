use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;
use crate::world::Steps;

/// Segment raycaster: walk a 2D wall map in a first-person view
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// ASCII map file; the built-in map is used when omitted
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// Region the camera starts in
    #[arg(long, default_value_t = 's')]
    pub spawn: char,

    /// Internal frame width, one ray per column
    #[arg(long, default_value_t = 160)]
    pub render_width: usize,

    /// Internal frame height
    #[arg(long, default_value_t = 120)]
    pub render_height: usize,

    /// Horizontal field of view in degrees; derived from the frame size when omitted
    #[arg(long)]
    pub fov: Option<f64>,

    /// Distance covered by one movement step
    #[arg(long, default_value_t = 0.1)]
    pub move_step: f64,

    /// Radians turned by one rotation step
    #[arg(long, default_value_t = 0.1)]
    pub turn_step: f64,

    /// Side of the square minimap in internal pixels, 0 to hide it
    #[arg(long, default_value_t = 48)]
    pub minimap_size: usize,

    /// Minimap zoom factor
    #[arg(long, default_value_t = 1.0)]
    pub minimap_zoom: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Rejects settings the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_width == 0 || self.render_height == 0 {
            return Err(ConfigError::EmptyFrame {
                width: self.render_width,
                height: self.render_height,
            });
        }
        if !self.move_step.is_finite() {
            return Err(ConfigError::NotFinite("move step"));
        }
        if !self.turn_step.is_finite() {
            return Err(ConfigError::NotFinite("turn step"));
        }
        if self.fov.is_some_and(|fov| !fov.is_finite()) {
            return Err(ConfigError::NotFinite("field of view"));
        }
        if !self.minimap_zoom.is_finite() || self.minimap_zoom <= 0.0 {
            return Err(ConfigError::BadZoom(self.minimap_zoom));
        }
        Ok(())
    }

    /// Field of view in radians, if one was given.
    pub fn fov_radians(&self) -> Option<f64> {
        self.fov.map(f64::to_radians)
    }

    pub fn steps(&self) -> Steps {
        Steps {
            movement: self.move_step,
            rotation: self.turn_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cli = Cli::try_parse_from(["raycaster"]).unwrap();
        assert_eq!(cli.spawn, 's');
        assert_eq!((cli.render_width, cli.render_height), (160, 120));
        assert_eq!(cli.fov_radians(), None);
        assert_eq!(cli.steps(), Steps::default());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn fov_is_given_in_degrees() {
        let cli = Cli::try_parse_from(["raycaster", "--fov", "90"]).unwrap();
        let fov = cli.fov_radians().unwrap();
        approx::assert_relative_eq!(fov, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let cli = Cli::try_parse_from(["raycaster", "--render-width", "0"]).unwrap();
        assert_eq!(
            cli.validate(),
            Err(ConfigError::EmptyFrame {
                width: 0,
                height: 120
            })
        );
    }

    #[test]
    fn bad_zoom_is_rejected() {
        let cli = Cli::try_parse_from(["raycaster", "--minimap-zoom", "0"]).unwrap();
        assert_eq!(cli.validate(), Err(ConfigError::BadZoom(0.0)));
    }
}
