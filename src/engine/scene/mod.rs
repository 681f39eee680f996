//! Render-side scene graph.
//!
//! The [`Scene`] owns everything the renderer draws: box meshes with their materials,
//! decoded textures, the camera and the lights. Meshes and textures live in
//! generational arenas, so a [`MeshKey`] handed out before a tower reset can never
//! alias a mesh created after it.

pub mod camera;
pub mod light;
pub mod material;
pub mod mesh;

pub use camera::*;
pub use light::*;
pub use material::*;
pub use mesh::*;

use crate::utils::hex_to_rgb;
use image::RgbaImage;
use log::trace;
use nalgebra::Vector3;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct MeshKey;
    pub struct TextureKey;
}

#[derive(Debug, Clone)]
pub struct TextureData {
    pub name: String,
    pub image: RgbaImage,
}

pub struct Scene {
    meshes: SlotMap<MeshKey, RenderMesh>,
    textures: SlotMap<TextureKey, TextureData>,
    pub camera: OrbitCamera,
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
    /// sRGB clear color
    pub background: Vector3<f32>,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            meshes: SlotMap::with_key(),
            textures: SlotMap::with_key(),
            camera: OrbitCamera::default(),
            ambient: AmbientLight::default(),
            sun: DirectionalLight::default(),
            background: hex_to_rgb(0xBFD1E5),
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, mesh: RenderMesh) -> MeshKey {
        let key = self.meshes.insert(mesh);
        trace!("Attached mesh {key:?}");
        key
    }

    pub fn detach(&mut self, key: MeshKey) -> Option<RenderMesh> {
        self.meshes.remove(key)
    }

    pub fn contains(&self, key: MeshKey) -> bool {
        self.meshes.contains_key(key)
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&RenderMesh> {
        self.meshes.get(key)
    }

    pub fn mesh_mut(&mut self, key: MeshKey) -> Option<&mut RenderMesh> {
        self.meshes.get_mut(key)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshKey, &RenderMesh)> {
        self.meshes.iter()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn add_texture(&mut self, name: impl Into<String>, image: RgbaImage) -> TextureKey {
        self.textures.insert(TextureData {
            name: name.into(),
            image,
        })
    }

    pub fn texture(&self, key: TextureKey) -> Option<&TextureData> {
        self.textures.get(key)
    }

    pub fn textures(&self) -> impl Iterator<Item = (TextureKey, &TextureData)> {
        self.textures.iter()
    }
}
