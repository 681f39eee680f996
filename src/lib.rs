#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
pub mod config;
pub mod engine;
pub mod utils;
pub mod windowing;

pub use config::*;
pub use engine::*;
pub use windowing::*;

pub use ::log;
pub use ::nalgebra;
pub use ::rapier3d;
pub use ::winit;

#[cfg(feature = "derive")]
pub use ::env_logger;

#[cfg(feature = "derive")]
pub use ::jenga_macros;

#[cfg(feature = "derive")]
pub use ::jenga_macros::JengaApp;
