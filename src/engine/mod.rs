pub mod assets;
pub mod input;
pub mod physics;
pub mod prefabs;
pub mod registry;
pub mod rendering;
pub mod scene;
pub mod world;

pub use self::world::{World, WorldError};
