use crate::config::PhysicsSettings;
use log::{trace, warn};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use rapier3d::prelude::*;

pub struct PhysicsManager {
    pub gravity: Vector3<f32>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    fixed_timestep: f32,
    /// Time fed in but not yet simulated, always below one fixed step.
    local_time: f32,
    elapsed: f64,
    simulated: f64,
    steps_taken: u64,
}

impl Default for PhysicsManager {
    fn default() -> Self {
        PhysicsManager::new(&PhysicsSettings::default())
    }
}

impl PhysicsManager {
    pub fn new(settings: &PhysicsSettings) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: settings.fixed_timestep,
            ..IntegrationParameters::default()
        };

        PhysicsManager {
            gravity: settings.gravity,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            fixed_timestep: settings.fixed_timestep,
            local_time: 0.0,
            elapsed: 0.0,
            simulated: 0.0,
            steps_taken: 0,
        }
    }

    /// Inserts a body together with its single collider.
    pub fn add_rigid_body(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.rigid_body_set.insert(body);
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Removes a body and every collider attached to it. Returns false if the body was
    /// already gone.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    pub fn contains_body(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Total time handed to [`PhysicsManager::step_simulation`], including time that was
    /// dropped because a frame needed more sub-steps than allowed.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Time the solver actually integrated.
    pub fn simulated_time(&self) -> f64 {
        self.simulated
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Advances the world by `time_step` seconds.
    ///
    /// The time is accumulated and consumed in fixed steps. At most `max_sub_steps`
    /// steps are taken, anything beyond that is dropped so a long hitch can't stall the
    /// following frames. With `max_sub_steps == 0` a single step of exactly `time_step`
    /// is taken instead. Returns the number of solver steps performed.
    pub fn step_simulation(&mut self, time_step: f32, max_sub_steps: u32) -> u32 {
        if !time_step.is_finite() || time_step < 0.0 {
            warn!("Ignoring invalid physics time step {time_step}");
            return 0;
        }

        self.elapsed += time_step as f64;

        if max_sub_steps == 0 {
            self.local_time = 0.0;
            if time_step <= f32::EPSILON {
                return 0;
            }
            self.integration_parameters.dt = time_step;
            self.step();
            self.integration_parameters.dt = self.fixed_timestep;
            return 1;
        }

        self.local_time += time_step;
        let mut sub_steps = 0;
        if self.local_time >= self.fixed_timestep {
            sub_steps = (self.local_time / self.fixed_timestep) as u32;
            self.local_time -= sub_steps as f32 * self.fixed_timestep;
        }

        let clamped = sub_steps.min(max_sub_steps);
        if clamped < sub_steps {
            trace!("Dropped {} physics sub-steps", sub_steps - clamped);
        }

        for _ in 0..clamped {
            self.step();
        }

        clamped
    }

    /// Runs a single solver step of `integration_parameters.dt`.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.simulated += self.integration_parameters.dt as f64;
        self.steps_taken += 1;
    }

    /// Pose of a body as it should be displayed, extrapolated over the time that is
    /// still waiting in the accumulator. `None` if the body doesn't exist.
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<Isometry3<f32>> {
        let body = self.rigid_body_set.get(handle)?;
        let pose = *body.position();

        if self.local_time <= 0.0 || !body.is_dynamic() {
            return Some(pose);
        }

        let dt = self.local_time;
        let translation = pose.translation.vector + body.linvel() * dt;
        let rotation = UnitQuaternion::new(body.angvel() * dt) * pose.rotation;

        Some(Isometry3::from_parts(Translation3::from(translation), rotation))
    }
}
