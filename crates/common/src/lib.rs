//! Common types, task payload definitions, and errors shared across `task-envelope` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
