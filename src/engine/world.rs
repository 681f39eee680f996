//! The [`World`] owns everything a running tower needs: the render scene, the physics
//! simulation, the registry linking the two, and the input state driving them.
//!
//! It is a plain value. Nothing in here is global, so tests can build as many worlds
//! side by side as they like and drive them with [`World::step`] without a window.

use crate::assets::PendingTexture;
use crate::config::JengaConfig;
use crate::input::{InputManager, SimulationFlags};
use crate::physics::PhysicsManager;
use crate::prefabs::{BodyError, GroundPrefab, Prefab, TowerPrefab};
use crate::registry::{BodyPair, DynamicBodyRegistry};
use crate::scene::{MeshKey, Scene};
use log::{info, trace, warn};
use snafu::{ResultExt, Snafu};
use std::time::{Duration, Instant};
use winit::event::MouseButton;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum WorldError {
    #[snafu(display("Failed to create the ground: {source}"))]
    Ground { source: BodyError },

    #[snafu(display("Failed to build the tower: {source}"))]
    Tower { source: BodyError },
}

pub struct World {
    pub scene: Scene,
    pub physics: PhysicsManager,
    pub registry: DynamicBodyRegistry,
    pub flags: SimulationFlags,
    pub input: InputManager,

    config: JengaConfig,
    ground: Option<BodyPair>,
    pending_textures: Vec<(MeshKey, PendingTexture)>,

    delta_time: Duration,
    last_frame_time: Instant,
    requested_shutdown: bool,
}

impl Default for World {
    fn default() -> Self {
        World::new(JengaConfig::default())
    }
}

impl World {
    /// Creates an empty world. Nothing is spawned until [`World::build_scene`].
    pub fn new(config: JengaConfig) -> World {
        World {
            scene: Scene::new(),
            physics: PhysicsManager::new(&config.physics),
            registry: DynamicBodyRegistry::default(),
            flags: SimulationFlags::new(config.physics.slow_motion_dilation),
            input: InputManager::default(),
            config,
            ground: None,
            pending_textures: Vec::new(),
            delta_time: Duration::default(),
            last_frame_time: Instant::now(),
            requested_shutdown: false,
        }
    }

    pub fn config(&self) -> &JengaConfig {
        &self.config
    }

    /// Spawns the ground, unless it already exists, and a fresh tower.
    pub fn build_scene(&mut self) -> Result<(), WorldError> {
        if self.ground.is_none() {
            self.spawn_ground()?;
        }
        let bricks = self.spawn_tower()?;

        info!(
            "Built a tower of {} bricks in {} layers",
            bricks.len(),
            self.config.tower.layers
        );

        Ok(())
    }

    pub fn spawn_ground(&mut self) -> Result<BodyPair, WorldError> {
        let prefab = GroundPrefab::new(self.config.ground.clone());
        let ground = self.spawn(&prefab).context(GroundErr)?;
        self.ground = Some(ground);

        if let Some(path) = self.config.ground.texture.clone() {
            match PendingTexture::spawn(path) {
                Ok(pending) => self.pending_textures.push((ground.mesh, pending)),
                Err(e) => warn!("{e}, the ground keeps its flat color"),
            }
        }

        Ok(ground)
    }

    pub fn spawn_tower(&mut self) -> Result<Vec<BodyPair>, WorldError> {
        let prefab = TowerPrefab::new(self.config.tower.clone());
        self.spawn(&prefab).context(TowerErr)
    }

    pub fn spawn<P: Prefab>(&mut self, prefab: &P) -> Result<P::Output, BodyError> {
        prefab.spawn(self)
    }

    /// Removes every dynamic body from the simulation and its mesh from the scene.
    /// Returns how many pairs were removed.
    pub fn clear_tower(&mut self) -> usize {
        let mut removed = 0;
        for pair in self.registry.drain() {
            if !self.physics.remove_rigid_body(pair.body) {
                warn!("Body {:?} was already gone from the simulation", pair.body);
            }
            if self.scene.detach(pair.mesh).is_none() {
                warn!("Mesh {:?} was already gone from the scene", pair.mesh);
            }
            removed += 1;
        }
        removed
    }

    /// Replaces the tower with a new one in its starting layout.
    ///
    /// The new layout is checked before the old tower is removed, so a failing reset
    /// leaves the current tower in place. Returns the number of new bricks.
    pub fn reset_tower(&mut self) -> Result<usize, WorldError> {
        let prefab = TowerPrefab::new(self.config.tower.clone());
        prefab
            .validate(self.config.physics.collision_margin)
            .context(TowerErr)?;

        let removed = self.clear_tower();
        let bricks = self.spawn(&prefab).context(TowerErr)?.len();

        info!("Reset the tower, replaced {removed} bricks with {bricks}");
        Ok(bricks)
    }

    /// Advances the simulation by a frame of `delta` seconds and copies the new body
    /// poses onto their meshes. The frame time is divided by the current time dilation
    /// first. Returns the number of solver steps taken.
    pub fn step(&mut self, delta: f32) -> u32 {
        let dilated = delta / self.flags.time_dilation();
        let steps = self
            .physics
            .step_simulation(dilated, self.config.physics.max_sub_steps);

        self.sync_meshes();
        steps
    }

    /// Copies every registered body pose onto its mesh. Pairs where either half is
    /// missing are skipped.
    pub fn sync_meshes(&mut self) {
        for pair in &self.registry {
            let Some(pose) = self.physics.body_pose(pair.body) else {
                trace!("Skipping sync of missing body {:?}", pair.body);
                continue;
            };
            let Some(mesh) = self.scene.mesh_mut(pair.mesh) else {
                trace!("Skipping sync of missing mesh {:?}", pair.mesh);
                continue;
            };
            mesh.transform = pose;
        }
    }

    /// Runs one frame: finished textures, input, a pending reset and the physics step.
    pub fn update(&mut self) -> Result<(), WorldError> {
        self.tick_delta_time();
        self.poll_assets();
        self.handle_input();

        if self.flags.take_reset_request() {
            self.reset_tower()?;
        }

        let delta = self.delta_time.as_secs_f32();
        self.step(delta);

        self.input.next_frame();
        Ok(())
    }

    /// Applies textures whose loading finished since the last call.
    pub fn poll_assets(&mut self) {
        self.pending_textures.retain_mut(|(mesh, pending)| {
            let Some(result) = pending.poll() else {
                return true;
            };

            match result {
                Ok(image) => {
                    let name = pending.path().display().to_string();
                    info!("Texture {name} loaded ({}x{})", image.width(), image.height());
                    let texture = self.scene.add_texture(name, image);
                    match self.scene.mesh_mut(*mesh) {
                        Some(mesh) => mesh.material.diffuse_texture = Some(texture),
                        None => warn!("Mesh for texture {} no longer exists", pending.path().display()),
                    }
                }
                Err(e) => warn!("{e}, the ground keeps its flat color"),
            }

            false
        });
    }

    pub fn pending_texture_count(&self) -> usize {
        self.pending_textures.len()
    }

    fn handle_input(&mut self) {
        for event in self.input.frame_events() {
            self.flags.handle_event(event);
        }

        if self.input.is_button_pressed(MouseButton::Left) {
            self.scene.camera.orbit(self.input.get_mouse_delta());
        }

        let wheel = self.input.get_wheel_delta();
        if wheel != 0.0 {
            self.scene.camera.zoom(wheel);
        }
    }

    pub fn ground(&self) -> Option<BodyPair> {
        self.ground
    }

    pub fn brick_count(&self) -> usize {
        self.registry.len()
    }

    fn tick_delta_time(&mut self) {
        self.delta_time = self.last_frame_time.elapsed();
        self.last_frame_time = Instant::now();
    }

    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    pub fn shutdown(&mut self) {
        self.requested_shutdown = true;
    }

    pub fn is_shutting_down(&self) -> bool {
        self.requested_shutdown
    }
}
