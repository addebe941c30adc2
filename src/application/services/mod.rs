//! Application services

pub mod job_board;

pub use job_board::{BoardOptions, JobBoard};
