//! Runtime settings of the tower demo.
//!
//! Every value defaults to the classic 18-layer tower on a 40x40 ground plate.
//! [`JengaConfig::from_env`] lets a few of them be changed without recompiling.

use crate::prefabs::TowerLayout;
use log::{info, warn};
use nalgebra::{Vector2, Vector3};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_GROUND_TEXTURE: &str = "assets/textures/grid.png";

pub const ENV_LAYERS: &str = "JENGA_LAYERS";
pub const ENV_BRICK_MASS: &str = "JENGA_BRICK_MASS";
pub const ENV_GROUND_TEXTURE: &str = "JENGA_GROUND_TEXTURE";

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsSettings {
    pub gravity: Vector3<f32>,
    /// Length of one internal solver step in seconds.
    pub fixed_timestep: f32,
    /// Upper bound of solver steps taken per frame. Zero means one variable step per frame.
    pub max_sub_steps: u32,
    /// Rounding radius of every box collider. It is carved out of the box, not added on top.
    pub collision_margin: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Divisor applied to the frame delta while slow motion is held.
    pub slow_motion_dilation: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        PhysicsSettings {
            gravity: Vector3::new(0.0, -9.8, 0.0),
            fixed_timestep: 1.0 / 60.0,
            max_sub_steps: 10,
            collision_margin: 0.05,
            friction: 0.5,
            restitution: 0.0,
            slow_motion_dilation: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroundSettings {
    pub extent: Vector3<f32>,
    pub position: Vector3<f32>,
    pub color: u32,
    pub texture: Option<PathBuf>,
    pub texture_repeat: Vector2<f32>,
}

impl Default for GroundSettings {
    fn default() -> Self {
        GroundSettings {
            extent: Vector3::new(40.0, 1.0, 40.0),
            position: Vector3::new(0.0, -0.5, 0.0),
            color: 0xFFFFFF,
            texture: Some(PathBuf::from(DEFAULT_GROUND_TEXTURE)),
            texture_repeat: Vector2::new(40.0, 40.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JengaConfig {
    pub tower: TowerLayout,
    pub physics: PhysicsSettings,
    pub ground: GroundSettings,
}

impl JengaConfig {
    /// Default configuration with overrides read from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key-value source. Values that don't parse are
    /// logged and skipped, so a typo never prevents the demo from starting.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(layers) = parse_override::<u32>(&lookup, ENV_LAYERS) {
            self.tower.layers = layers;
        }

        match parse_override::<f32>(&lookup, ENV_BRICK_MASS) {
            Some(mass) if mass.is_finite() && mass > 0.0 => self.tower.brick_mass = mass,
            Some(mass) => {
                warn!("Ignoring config override {ENV_BRICK_MASS}={mass}: bricks need a positive mass")
            }
            None => {}
        }

        if let Some(path) = lookup(ENV_GROUND_TEXTURE) {
            let path = path.trim();
            info!("Config override {ENV_GROUND_TEXTURE}={path:?}");
            self.ground.texture = (!path.is_empty()).then(|| PathBuf::from(path));
        }

        self
    }
}

fn parse_override<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            info!("Config override {key}={raw}");
            Some(value)
        }
        Err(e) => {
            warn!("Ignoring config override {key}={raw:?}: {e}");
            None
        }
    }
}
