//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] — a validated, trimmed user query
//! - [`credential::Credential`] — the backend secret, redacted in output
//! - [`error::DomainError`] — domain-level errors

pub mod credential;
pub mod error;
pub mod query;
pub mod string;
