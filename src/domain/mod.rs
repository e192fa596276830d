//! Domain layer: the in-memory hierarchy model
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod render;
pub mod store;

pub use entities::*;
pub use render::TreeConvert;
pub use store::HierarchyStore;
