use crate::World;
use crate::prefabs::{BodyError, BoxBodyPrefab, Brick, Prefab, TowerLayout};
use crate::registry::BodyPair;
use crate::scene::Material;

/// The full brick tower described by a [`TowerLayout`].
///
/// Every brick is checked before the first one is created, so a bad layout leaves the
/// world untouched instead of producing half a tower.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TowerPrefab {
    pub layout: TowerLayout,
}

impl TowerPrefab {
    pub const fn new(layout: TowerLayout) -> Self {
        TowerPrefab { layout }
    }

    pub fn brick_prefab(brick: &Brick) -> BoxBodyPrefab {
        let material = Material::from_hex(
            format!("Brick {}.{}", brick.layer, brick.slot),
            brick.color.hex(),
        );
        BoxBodyPrefab::new(brick.extent, brick.mass, brick.pose, material)
    }

    pub fn brick_prefabs(&self) -> Vec<BoxBodyPrefab> {
        self.layout
            .bricks()
            .map(|brick| Self::brick_prefab(&brick))
            .collect()
    }

    /// Checks every brick without touching any world. Bricks must be dynamic, a
    /// static brick would never be registered and so never be removed on reset.
    pub fn validate(&self, margin: f32) -> Result<(), BodyError> {
        self.layout.bricks().try_for_each(|brick| {
            let prefab = Self::brick_prefab(&brick);
            prefab.validate(margin)?;
            match prefab.is_dynamic() {
                true => Ok(()),
                false => Err(BodyError::StaticBrick { mass: prefab.mass }),
            }
        })
    }
}

impl Prefab for TowerPrefab {
    type Output = Vec<BodyPair>;

    #[inline]
    fn prefab_name(&self) -> &'static str {
        "Tower"
    }

    fn build(&self, world: &mut World) -> Result<Vec<BodyPair>, BodyError> {
        self.validate(world.config().physics.collision_margin)?;

        self.brick_prefabs()
            .iter()
            .map(|brick| brick.build(world))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGIN: f32 = 0.05;

    #[test]
    fn default_tower_is_valid() {
        assert!(TowerPrefab::default().validate(MARGIN).is_ok());
    }

    #[test]
    fn massless_bricks_are_rejected() {
        let layout = TowerLayout::builder().brick_mass(0.0).build();
        assert!(matches!(
            TowerPrefab::new(layout).validate(MARGIN),
            Err(BodyError::StaticBrick { mass }) if mass == 0.0
        ));
    }

    #[test]
    fn negative_mass_fails_as_invalid() {
        let layout = TowerLayout::builder().brick_mass(-1.0).build();
        assert!(matches!(
            TowerPrefab::new(layout).validate(MARGIN),
            Err(BodyError::InvalidMass { .. })
        ));
    }
}
