//! Domain layer: entities and the item tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod text;
pub mod value;

pub use arena::{ItemArena, TreeItem};
pub use entities::*;
pub use error::DomainError;
pub use text::html_text;
pub use value::{RowKind, Value};
