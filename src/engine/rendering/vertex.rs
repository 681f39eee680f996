use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Vector2, Vector3, Vector4};
use static_assertions::const_assert_eq;
use std::mem::size_of;
use wgpu::{BufferAddress, VertexAttribute, VertexBufferLayout, VertexStepMode, vertex_attr_array};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
}

const_assert_eq!(size_of::<Vertex>(), 32);

impl Vertex {
    const ATTRIBUTES: [VertexAttribute; 3] =
        vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub const fn new(position: Vector3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Vertex {
            position,
            normal,
            uv,
        }
    }

    pub const fn layout() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-box data: placement, color and texture parameters.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: Matrix4<f32>,
    /// Linear RGB, alpha unused
    pub color: Vector4<f32>,
    /// Texture repeat in `xy`, shininess in `z`
    pub params: Vector4<f32>,
}

const_assert_eq!(size_of::<InstanceRaw>(), 96);

impl InstanceRaw {
    const ATTRIBUTES: [VertexAttribute; 6] = vertex_attr_array![
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
    ];

    pub const fn layout() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: size_of::<InstanceRaw>() as BufferAddress,
            step_mode: VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: Matrix4<f32>,
    pub camera_pos: Vector4<f32>,
    /// Direction towards the sun
    pub light_dir: Vector4<f32>,
    /// Linear sun color premultiplied by its intensity
    pub light_color: Vector4<f32>,
    /// Linear ambient color premultiplied by its intensity
    pub ambient: Vector4<f32>,
}

const_assert_eq!(size_of::<Globals>(), 128);

/// A cube from -0.5 to 0.5 with one set of vertices per face, so every face has its
/// own normal and uvs. Faces wind counter-clockwise when seen from outside.
pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    let faces: [(Vector3<f32>, Vector3<f32>, Vector3<f32>); 6] = [
        (Vector3::x(), -Vector3::z(), Vector3::y()),
        (-Vector3::x(), Vector3::z(), Vector3::y()),
        (Vector3::y(), Vector3::x(), -Vector3::z()),
        (-Vector3::y(), Vector3::x(), Vector3::z()),
        (Vector3::z(), Vector3::x(), Vector3::y()),
        (-Vector3::z(), -Vector3::x(), Vector3::y()),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, right, up) in faces {
        let base = vertices.len() as u16;
        let center = normal * 0.5;
        let corners = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];
        for (u, v) in corners {
            vertices.push(Vertex::new(
                center + right * u + up * v,
                normal,
                Vector2::new(u + 0.5, 0.5 - v),
            ));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}
