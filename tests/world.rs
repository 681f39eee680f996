use image::{Rgba, RgbaImage};
use jenga::input::InputEvent;
use jenga::config::ENV_BRICK_MASS;
use jenga::prefabs::{BodyError, TowerLayout};
use jenga::scene::MeshKey;
use jenga::{JengaConfig, World, WorldError};
use nalgebra::{Isometry3, Vector3};
use rapier3d::prelude::RigidBodyHandle;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

fn config_without_texture() -> JengaConfig {
    let mut config = JengaConfig::default();
    config.ground.texture = None;
    config
}

fn built_world() -> World {
    let mut world = World::new(config_without_texture());
    world.build_scene().unwrap();
    world
}

fn brick_poses(world: &World) -> Vec<Isometry3<f32>> {
    world
        .registry
        .iter()
        .map(|pair| world.scene.mesh(pair.mesh).unwrap().transform)
        .collect()
}

fn wait_for_textures(world: &mut World) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while world.pending_texture_count() > 0 {
        assert!(Instant::now() < deadline, "texture loading timed out");
        world.poll_assets();
        std::thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn initial_scene_has_54_bricks_and_a_static_ground() {
    let world = built_world();

    assert_eq!(world.brick_count(), 54);
    assert_eq!(world.physics.body_count(), 55);
    assert_eq!(world.physics.collider_count(), 55);
    assert_eq!(world.scene.mesh_count(), 55);

    let ground = world.ground().unwrap();
    assert!(!world.registry.contains_body(ground.body));
    let body = world.physics.rigid_body_set.get(ground.body).unwrap();
    assert!(body.is_fixed());
}

#[test]
fn every_registered_pair_is_alive() {
    let world = built_world();
    for pair in &world.registry {
        assert!(world.physics.contains_body(pair.body));
        assert!(world.scene.contains(pair.mesh));
        assert!(world.physics.rigid_body_set[pair.body].is_dynamic());
    }
}

#[test]
fn bricks_start_at_their_layout_poses() {
    let world = built_world();
    let layout = TowerLayout::default();

    let expected: Vec<_> = layout.bricks().map(|brick| brick.pose).collect();
    assert_eq!(brick_poses(&world), expected);
}

#[test]
fn reset_replaces_every_brick() {
    let mut world = built_world();
    let initial = brick_poses(&world);
    let old: Vec<(MeshKey, RigidBodyHandle)> =
        world.registry.iter().map(|pair| (pair.mesh, pair.body)).collect();

    for _ in 0..30 {
        world.step(1.0 / 60.0);
    }

    assert_eq!(world.reset_tower().unwrap(), 54);

    assert_eq!(world.brick_count(), 54);
    assert_eq!(world.physics.body_count(), 55);
    assert_eq!(world.scene.mesh_count(), 55);
    for (mesh, body) in old {
        assert!(!world.physics.contains_body(body));
        assert!(!world.scene.contains(mesh));
        assert!(!world.registry.contains_body(body));
    }
    assert_eq!(brick_poses(&world), initial);
}

#[test]
fn reset_keeps_the_ground() {
    let mut world = built_world();
    let ground = world.ground().unwrap();

    world.reset_tower().unwrap();
    world.reset_tower().unwrap();

    assert_eq!(world.ground(), Some(ground));
    assert!(world.physics.contains_body(ground.body));
    assert!(world.scene.contains(ground.mesh));
    assert_eq!(world.physics.body_count(), 55);
}

#[test]
fn space_key_resets_on_the_next_update() {
    let mut world = built_world();
    let old: Vec<_> = world.registry.iter().map(|pair| pair.body).collect();

    world.input.key_input(KeyCode::Space, ElementState::Pressed);
    world.update().unwrap();

    assert_eq!(world.brick_count(), 54);
    assert!(old.iter().all(|body| !world.physics.contains_body(*body)));
    assert!(!world.flags.is_reset_requested());
}

#[test]
fn mouse_button_slows_time_down_tenfold() {
    let mut world = built_world();

    world.flags.handle_event(&InputEvent::MouseButton {
        button: MouseButton::Left,
        state: ElementState::Pressed,
    });
    world.step(0.5);
    assert!((world.physics.elapsed() - 0.05).abs() < 1e-6);

    world.flags.handle_event(&InputEvent::MouseButton {
        button: MouseButton::Left,
        state: ElementState::Released,
    });
    world.step(0.5);
    assert!((world.physics.elapsed() - 0.55).abs() < 1e-6);
}

#[test]
fn mouse_input_reaches_the_flags_through_update() {
    let mut world = built_world();
    world.input.mouse_input(MouseButton::Right, ElementState::Pressed);
    world.update().unwrap();
    assert_eq!(world.flags.time_dilation(), 10.0);

    world.input.mouse_input(MouseButton::Right, ElementState::Released);
    world.update().unwrap();
    assert_eq!(world.flags.time_dilation(), 1.0);
}

#[test]
fn step_copies_body_poses_onto_meshes() {
    let mut world = built_world();
    for _ in 0..20 {
        world.step(1.0 / 45.0);
    }

    for pair in &world.registry {
        let pose = world.physics.body_pose(pair.body).unwrap();
        assert_eq!(world.scene.mesh(pair.mesh).unwrap().transform, pose);
    }
}

#[test]
fn tower_stays_standing_without_input() {
    let mut world = built_world();
    let top_before = brick_poses(&world).last().unwrap().translation.y;

    for _ in 0..60 {
        world.step(1.0 / 60.0);
    }

    let poses = brick_poses(&world);
    assert!(poses.iter().all(|pose| pose.translation.y > 0.0));
    let top_after = poses.last().unwrap().translation.y;
    assert!((top_before - top_after).abs() < 0.5);
}

#[test]
fn invalid_bricks_never_create_half_a_tower() {
    let mut config = config_without_texture();
    config.tower.brick_mass = f32::NAN;

    let mut world = World::new(config);
    let result = world.build_scene();

    assert!(matches!(result, Err(WorldError::Tower { .. })));
    assert_eq!(world.brick_count(), 0);
    assert_eq!(world.physics.body_count(), 1);
    assert_eq!(world.scene.mesh_count(), 1);
}

#[test]
fn massless_bricks_are_refused_instead_of_left_static() {
    let mut config = config_without_texture();
    config.tower.brick_mass = 0.0;

    let mut world = World::new(config);
    let result = world.build_scene();

    assert!(matches!(
        result,
        Err(WorldError::Tower {
            source: BodyError::StaticBrick { .. }
        })
    ));
    assert!(world.reset_tower().is_err());
    assert_eq!(world.brick_count(), 0);
    assert_eq!(world.physics.body_count(), 1);
    assert_eq!(world.scene.mesh_count(), 1);
}

#[test]
fn zero_mass_override_never_leaks_bodies_on_reset() {
    let mut config = JengaConfig::default()
        .with_overrides(|key| (key == ENV_BRICK_MASS).then(|| "0".to_string()));
    config.ground.texture = None;

    let mut world = World::new(config);
    world.build_scene().unwrap();
    world.reset_tower().unwrap();
    world.reset_tower().unwrap();

    assert_eq!(world.brick_count(), 54);
    assert_eq!(world.physics.body_count(), 55);
    assert_eq!(world.scene.mesh_count(), 55);
}

#[test]
fn bricks_are_awake_weighted_and_rounded_inside_their_extent() {
    let mut world = built_world();
    let layout = TowerLayout::default();
    let margin = world.config().physics.collision_margin;
    let half_extent = layout.brick_extent() / 2.0;

    for _ in 0..300 {
        world.step(1.0 / 60.0);
    }

    for pair in &world.registry {
        let body = &world.physics.rigid_body_set[pair.body];
        assert!(!body.is_sleeping());
        assert!((body.mass() - layout.brick_mass).abs() < 1e-4);

        assert_eq!(body.colliders().len(), 1);
        let collider = &world.physics.collider_set[body.colliders()[0]];
        let shape = collider.shape().as_round_cuboid().unwrap();
        assert!((shape.border_radius - margin).abs() < 1e-6);

        let outer = shape.inner_shape.half_extents + Vector3::repeat(shape.border_radius);
        assert!((outer - half_extent).abs().max() < 1e-5);
    }
}

#[test]
fn missing_ground_texture_keeps_the_flat_color() {
    let mut config = JengaConfig::default();
    config.ground.texture = Some(PathBuf::from("does/not/exist/grid.png"));

    let mut world = World::new(config);
    world.build_scene().unwrap();
    wait_for_textures(&mut world);

    let ground = world.ground().unwrap();
    let material = &world.scene.mesh(ground.mesh).unwrap().material;
    assert!(material.diffuse_texture.is_none());
    assert_eq!(world.scene.textures().count(), 0);
}

#[test]
fn loaded_ground_texture_is_applied() {
    let path = std::env::temp_dir().join(format!("jenga-grid-{}.png", std::process::id()));
    RgbaImage::from_pixel(8, 8, Rgba([200, 200, 200, 255]))
        .save(&path)
        .unwrap();

    let mut config = JengaConfig::default();
    config.ground.texture = Some(path.clone());

    let mut world = World::new(config);
    world.build_scene().unwrap();
    wait_for_textures(&mut world);
    let _ = std::fs::remove_file(&path);

    let ground = world.ground().unwrap();
    let texture = world.scene.mesh(ground.mesh).unwrap().material.diffuse_texture;
    let texture = world.scene.texture(texture.unwrap()).unwrap();
    assert_eq!(texture.image.dimensions(), (8, 8));
}

#[test]
fn delta_time_advances() {
    let mut world = World::new(config_without_texture());
    std::thread::sleep(Duration::from_millis(1));
    world.update().unwrap();
    assert!(world.delta_time() > Duration::ZERO);
}
