//! Application-level configuration.
//!
//! - [`BehaviorConfig`] — fixed delays applied by the fetcher and session controller

pub mod behavior;

pub use behavior::BehaviorConfig;
