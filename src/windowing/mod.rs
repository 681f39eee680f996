//! Window creation and the event loop.
//!
//! [`AppSettings::run`] opens the window, builds the [`World`](crate::World) and drives
//! one update and one redraw per frame until the window closes.

pub mod app;
pub mod state;

pub use app::*;
pub use state::*;
