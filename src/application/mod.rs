//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on the record source trait.

pub mod error;
pub mod error_ext;
pub mod ordering;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::ResultExt;
pub use ordering::sort_recent_first;
pub use services::{BoardOptions, JobBoard};
