use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};
use std::f32::consts::FRAC_PI_2;

/// nalgebra projects depth into `-1..1`, wgpu expects `0..1`.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Perspective camera circling around a target point.
///
/// Dragging rotates the camera around the target, scrolling moves it closer or
/// further away. The camera always looks at the target with +Y as up.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3<f32>,
    yaw: f32,
    pitch: f32,
    distance: f32,
    aspect: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per pixel of mouse movement
    pub rotate_speed: f32,
    /// Distance factor per wheel line
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        OrbitCamera::looking_at(Point3::new(-7.0, 5.0, 8.0), Point3::new(0.0, 2.0, 0.0))
    }
}

impl OrbitCamera {
    pub fn looking_at(eye: Point3<f32>, target: Point3<f32>) -> Self {
        let offset = eye - target;
        let distance = offset.norm().max(f32::EPSILON);

        OrbitCamera {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            aspect: 16.0 / 9.0,
            fov_y: 60f32.to_radians(),
            near: 0.2,
            far: 2000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.95,
            min_distance: 1.0,
            max_distance: 500.0,
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vector3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        self.target + offset * self.distance
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Rotates around the target by a mouse movement given in pixels.
    pub fn orbit(&mut self, delta: &Vector2<f32>) {
        self.yaw -= delta.x * self.rotate_speed;
        self.pitch = (self.pitch + delta.y * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive wheel values zoom in.
    pub fn zoom(&mut self, wheel: f32) {
        self.distance = (self.distance * self.zoom_speed.powf(wheel))
            .clamp(self.min_distance, self.max_distance);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.aspect = width / height;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::y()).to_homogeneous()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let projection = Perspective3::new(self.aspect, self.fov_y, self.near, self.far);
        OPENGL_TO_WGPU_MATRIX * projection.to_homogeneous()
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}
