//! Infrastructure layer: record storage behind the repository trait

pub mod json_store;
pub mod traits;

pub use json_store::JsonStore;
pub use traits::CompanyRepository;
