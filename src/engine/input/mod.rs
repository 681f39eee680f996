//! Keyboard and mouse handling.
//!
//! The [`InputManager`] collects raw window events for the current frame, the
//! [`SimulationFlags`] turn them into the few switches the simulation reacts to.

pub mod flags;
pub mod input_manager;

pub use flags::*;
pub use input_manager::*;
