//! Creation of box shaped bodies: one render mesh and one rigid body per box.

use crate::World;
use crate::prefabs::Prefab;
use crate::registry::BodyPair;
use crate::scene::{Material, RenderMesh};
use nalgebra::{Isometry3, Point3, Vector3};
use rapier3d::prelude::*;
use snafu::{Snafu, ensure};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum BodyError {
    #[snafu(display("Box extent {extent:?} must be finite and positive on every axis"))]
    InvalidExtent { extent: Vector3<f32> },

    #[snafu(display("Box extent {extent:?} is too thin for a collision margin of {margin}"))]
    ExtentBelowMargin { extent: Vector3<f32>, margin: f32 },

    #[snafu(display("Body mass {mass} must be finite and not negative"))]
    InvalidMass { mass: f32 },

    #[snafu(display("Body pose {pose} is not finite"))]
    InvalidPose { pose: Isometry3<f32> },

    #[snafu(display("Brick mass {mass} must be positive, a brick can't be static"))]
    StaticBrick { mass: f32 },
}

/// Principal moments of inertia of a solid box.
pub fn box_inertia(mass: f32, half_extents: &Vector3<f32>) -> Vector3<f32> {
    let size = half_extents * 2.0;
    let sq = size.component_mul(&size);
    Vector3::new(sq.y + sq.z, sq.x + sq.z, sq.x + sq.y) * (mass / 12.0)
}

/// A box with a matching collider. A mass of zero makes it static.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxBodyPrefab {
    pub extent: Vector3<f32>,
    pub mass: f32,
    pub pose: Isometry3<f32>,
    pub material: Material,
}

impl BoxBodyPrefab {
    pub fn new(extent: Vector3<f32>, mass: f32, pose: Isometry3<f32>, material: Material) -> Self {
        BoxBodyPrefab {
            extent,
            mass,
            pose,
            material,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }

    pub fn validate(&self, margin: f32) -> Result<(), BodyError> {
        let extent = self.extent;
        ensure!(
            extent.iter().all(|e| e.is_finite() && *e > 0.0),
            InvalidExtentErr { extent }
        );
        ensure!(
            extent.iter().all(|e| *e > margin * 2.0),
            ExtentBelowMarginErr { extent, margin }
        );
        ensure!(
            self.mass.is_finite() && self.mass >= 0.0,
            InvalidMassErr { mass: self.mass }
        );

        let pose = self.pose;
        ensure!(
            pose.translation.vector.iter().all(|c| c.is_finite())
                && pose.rotation.coords.iter().all(|c| c.is_finite()),
            InvalidPoseErr { pose }
        );

        Ok(())
    }

    fn collider(&self, world: &World) -> Collider {
        let settings = &world.config().physics;
        let margin = settings.collision_margin;
        let core = self.extent / 2.0 - Vector3::repeat(margin);

        // mass comes from the body, the collider only contributes its shape
        ColliderBuilder::round_cuboid(core.x, core.y, core.z, margin)
            .density(0.0)
            .friction(settings.friction)
            .restitution(settings.restitution)
            .build()
    }

    fn rigid_body(&self) -> RigidBody {
        let builder = if self.is_dynamic() {
            let inertia = box_inertia(self.mass, &(self.extent / 2.0));
            RigidBodyBuilder::dynamic()
                .can_sleep(false)
                .additional_mass_properties(MassProperties::new(
                    Point3::origin(),
                    self.mass,
                    inertia,
                ))
        } else {
            RigidBodyBuilder::fixed()
        };

        builder.position(self.pose).build()
    }
}

impl Prefab for BoxBodyPrefab {
    type Output = BodyPair;

    #[inline]
    fn prefab_name(&self) -> &'static str {
        "Box Body"
    }

    fn build(&self, world: &mut World) -> Result<BodyPair, BodyError> {
        self.validate(world.config().physics.collision_margin)?;

        let collider = self.collider(world);
        let body = world.physics.add_rigid_body(self.rigid_body(), collider);
        let mesh = world.scene.attach(RenderMesh::new(
            self.extent,
            self.pose,
            self.material.clone(),
        ));

        let pair = BodyPair::new(mesh, body);
        if self.is_dynamic() {
            world.registry.push(pair);
        }

        Ok(pair)
    }
}
