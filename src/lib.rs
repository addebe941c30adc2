//! Job application tracker core.
//!
//! Companies, roles, interviews and people are flattened into an arena-backed
//! item tree ([`domain::ItemArena`]) and exposed through an index-based
//! [`model::TreeModel`] that a tree or table view can navigate and edit.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod model;
pub mod util;
