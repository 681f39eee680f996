//! Draws a [`Scene`](crate::scene::Scene) with wgpu.
//!
//! Every mesh is the same unit cube, so a frame is a handful of instanced draw calls,
//! one per diffuse texture.

mod error;
pub mod renderer;
pub mod state;
pub mod texture;
pub mod vertex;

pub use error::{RenderError, Result};
pub use renderer::*;
pub use state::*;
pub use texture::*;
pub use vertex::*;
