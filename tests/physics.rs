use jenga::config::PhysicsSettings;
use jenga::physics::PhysicsManager;
use jenga::prefabs::box_inertia;
use nalgebra::{Isometry3, Vector3};
use rapier3d::prelude::*;

const STEP: f32 = 1.0 / 60.0;

fn falling_box(physics: &mut PhysicsManager) -> RigidBodyHandle {
    let body = RigidBodyBuilder::dynamic()
        .position(Isometry3::translation(0.0, 10.0, 0.0))
        .build();
    let collider = ColliderBuilder::cuboid(0.5, 0.5, 0.5).build();
    physics.add_rigid_body(body, collider)
}

#[test]
fn accumulates_time_into_fixed_steps() {
    let mut physics = PhysicsManager::default();

    assert_eq!(physics.step_simulation(STEP * 0.5, 10), 0);
    assert_eq!(physics.step_simulation(STEP * 0.75, 10), 1);
    assert_eq!(physics.step_simulation(STEP * 2.0, 10), 2);
    assert_eq!(physics.steps_taken(), 3);
    assert!((physics.simulated_time() - 3.0 * STEP as f64).abs() < 1e-6);
}

#[test]
fn sub_steps_are_clamped_and_excess_dropped() {
    let mut physics = PhysicsManager::default();

    assert_eq!(physics.step_simulation(STEP * 20.5, 10), 10);
    assert!((physics.elapsed() - 20.5 * STEP as f64).abs() < 1e-5);
    assert!((physics.simulated_time() - 10.0 * STEP as f64).abs() < 1e-5);

    // the dropped time doesn't come back on the next frame
    assert_eq!(physics.step_simulation(STEP * 0.25, 10), 0);
}

#[test]
fn zero_sub_steps_takes_one_variable_step() {
    let mut physics = PhysicsManager::default();

    assert_eq!(physics.step_simulation(0.1, 0), 1);
    assert!((physics.simulated_time() - 0.1).abs() < 1e-6);
    assert_eq!(physics.step_simulation(0.0, 0), 0);
}

#[test]
fn invalid_time_steps_are_ignored() {
    let mut physics = PhysicsManager::default();

    assert_eq!(physics.step_simulation(f32::NAN, 10), 0);
    assert_eq!(physics.step_simulation(-1.0, 10), 0);
    assert_eq!(physics.elapsed(), 0.0);
}

#[test]
fn gravity_pulls_dynamic_bodies_down() {
    let settings = PhysicsSettings::default();
    let mut physics = PhysicsManager::new(&settings);
    let handle = falling_box(&mut physics);

    physics.step_simulation(0.5, 60);

    let pose = physics.body_pose(handle).unwrap();
    assert!(pose.translation.y < 10.0);
}

#[test]
fn removed_bodies_take_their_colliders_along() {
    let mut physics = PhysicsManager::default();
    let handle = falling_box(&mut physics);
    assert_eq!(physics.body_count(), 1);
    assert_eq!(physics.collider_count(), 1);

    assert!(physics.remove_rigid_body(handle));
    assert!(!physics.contains_body(handle));
    assert_eq!(physics.collider_count(), 0);
    assert!(physics.body_pose(handle).is_none());
    assert!(!physics.remove_rigid_body(handle));
}

#[test]
fn box_inertia_matches_solid_cuboid() {
    let inertia = box_inertia(12.0, &Vector3::new(0.5, 1.0, 1.5));
    assert!((inertia - Vector3::new(13.0, 10.0, 5.0)).norm() < 1e-5);
}
