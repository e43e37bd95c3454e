//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod credential;
pub mod director_gateway;
pub mod report_sink;
