//! Use cases (application services)
//!
//! - [`fetch_responses`] — one backend call → one persona response set
//! - [`session`] — request lifecycle and consensus reveal
//! - [`export_report`] — plain-text report export

pub mod export_report;
pub mod fetch_responses;
pub mod session;
