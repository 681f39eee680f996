//! Assets that arrive after the scene is built.

pub mod texture_loader;

pub use texture_loader::*;
