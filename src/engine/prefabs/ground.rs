use crate::World;
use crate::config::GroundSettings;
use crate::prefabs::{BodyError, BoxBodyPrefab, Prefab};
use crate::registry::BodyPair;
use crate::scene::Material;
use crate::utils::hex_to_rgb;
use nalgebra::{Isometry3, UnitQuaternion};

/// The static plate the tower stands on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundPrefab {
    pub settings: GroundSettings,
}

impl GroundPrefab {
    pub const fn new(settings: GroundSettings) -> Self {
        GroundPrefab { settings }
    }
}

impl Prefab for GroundPrefab {
    type Output = BodyPair;

    #[inline]
    fn prefab_name(&self) -> &'static str {
        "Ground"
    }

    fn build(&self, world: &mut World) -> Result<BodyPair, BodyError> {
        let material = Material::builder()
            .name("Ground")
            .color(hex_to_rgb(self.settings.color))
            .texture_repeat(self.settings.texture_repeat)
            .build();
        let pose = Isometry3::from_parts(self.settings.position.into(), UnitQuaternion::identity());

        BoxBodyPrefab::new(self.settings.extent, 0.0, pose, material).build(world)
    }
}
