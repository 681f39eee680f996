//! Physics simulation powered by `rapier`.
//!
//! The [`PhysicsManager`] owns the rigid bodies and colliders and advances them with a
//! fixed timestep, taking as many sub-steps per frame as the frame time requires.

pub mod simulator;

pub use simulator::*;
