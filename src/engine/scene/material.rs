use crate::scene::TextureKey;
use crate::utils::hex_to_rgb;
use bon::Builder;
use nalgebra::{Vector2, Vector3};

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Material {
    #[builder(into)]
    pub name: String,
    /// sRGB base color, multiplied with the diffuse texture when one is set
    #[builder(default = Vector3::new(0.7, 0.7, 0.7))]
    pub color: Vector3<f32>,
    pub diffuse_texture: Option<TextureKey>,
    /// How often the diffuse texture tiles across each face
    #[builder(default = Vector2::new(1.0, 1.0))]
    pub texture_repeat: Vector2<f32>,
    #[builder(default = 30.0)]
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Material::builder().name("Default Material").build()
    }
}

impl Material {
    pub fn from_hex(name: impl Into<String>, hex: u32) -> Self {
        Material::builder()
            .name(name)
            .color(hex_to_rgb(hex))
            .build()
    }
}
