//! Model layer: index-based navigation over the item tree
//!
//! [`TreeModel`] is the generic adapter a tree or table view talks to; the
//! `flatten` and `tables` modules are the strategies that fill it from domain
//! records.

pub mod events;
pub mod flatten;
pub mod index;
pub mod render;
pub mod tables;
pub mod tree_model;

pub use events::{EventLog, ModelEvent, ModelObserver};
pub use flatten::{company_tree, reload_company_tree, FlattenOptions};
pub use index::{ItemFlags, ItemRole, ModelIndex, Orientation};
pub use tables::{interviews_table, persons_table, roles_table};
pub use tree_model::TreeModel;
