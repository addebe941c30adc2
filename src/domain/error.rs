//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent lookups that found no matching record.
///
/// Tree navigation never produces these; it reports misses through `Option`
/// and `bool` returns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("company not found: {0}")]
    CompanyNotFound(String),

    #[error("role not found: {0}")]
    RoleNotFound(String),

    #[error("interview not found: {0}")]
    InterviewNotFound(String),

    #[error("person not found: {0}")]
    PersonNotFound(String),
}
