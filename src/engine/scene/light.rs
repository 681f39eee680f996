use crate::utils::hex_to_rgb;
use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        AmbientLight {
            color: hex_to_rgb(0xBBBBBB),
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: Vector3<f32>,
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        DirectionalLight {
            color: Vector3::new(1.0, 1.0, 1.0),
            intensity: 3.0,
            position: Point3::new(-10.0, 10.0, 5.0),
            target: Point3::origin(),
        }
    }
}

impl DirectionalLight {
    /// Direction the light travels in.
    pub fn direction(&self) -> Vector3<f32> {
        (self.target - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| -Vector3::y())
    }
}
