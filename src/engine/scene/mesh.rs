use crate::scene::Material;
use nalgebra::{Isometry3, Matrix4, Vector3};

/// A box drawn by the renderer. The unit cube is stretched to `extent` and then
/// placed by `transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    pub extent: Vector3<f32>,
    pub transform: Isometry3<f32>,
    pub material: Material,
}

impl RenderMesh {
    pub fn new(extent: Vector3<f32>, transform: Isometry3<f32>, material: Material) -> Self {
        RenderMesh {
            extent,
            transform,
            material,
        }
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.transform.to_homogeneous() * Matrix4::new_nonuniform_scaling(&self.extent)
    }
}
