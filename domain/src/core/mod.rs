//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - completion model / deployment identifiers
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
