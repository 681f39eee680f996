pub mod box_body;
pub mod ground;
pub mod layout;
pub mod prefab;
pub mod tower;

pub use box_body::*;
pub use ground::*;
pub use layout::*;
pub use prefab::*;
pub use tower::*;
