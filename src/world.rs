use std::f64::consts::FRAC_PI_2;

use crate::camera::Camera;
use crate::error::MapError;
use crate::map::Map;

/// One discrete input, applied once per simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

/// How far a single command moves or turns the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub movement: f64, // world units
    pub rotation: f64, // radians
}

impl Default for Steps {
    fn default() -> Self {
        Self {
            movement: 0.1,
            rotation: 0.1,
        }
    }
}

#[derive(Debug)]
pub struct World {
    pub map: Map,
    pub camera: Camera,
    pub steps: Steps,
    region: Option<char>, // named region the camera is standing in
}

impl World {
    /// Places the camera at the centre of the region named `spawn`, facing +x.
    pub fn new(map: Map, spawn: char) -> Result<Self, MapError> {
        let location = map
            .get_named_location(spawn)
            .ok_or(MapError::MissingSpawn(spawn))?
            .center();
        let camera = Camera::new(location, FRAC_PI_2);
        let region = map.get_first_intersection(camera.location);

        Ok(Self {
            map,
            camera,
            steps: Steps::default(),
            region,
        })
    }

    pub fn with_steps(mut self, steps: Steps) -> Self {
        self.steps = steps;
        self
    }

    pub fn region(&self) -> Option<char> {
        self.region
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Forward => self.camera.try_move(self.steps.movement, &self.map.segments),
            Command::Backward => self.camera.try_move(-self.steps.movement, &self.map.segments),
            Command::TurnLeft => self.camera.rotate(-self.steps.rotation),
            Command::TurnRight => self.camera.rotate(self.steps.rotation),
        }

        let region = self.map.get_first_intersection(self.camera.location);
        if region != self.region {
            log::info!("entered region {:?}", region.unwrap_or(' '));
            self.region = region;
        }
    }
}
