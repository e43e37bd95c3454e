//! Infrastructure layer for consilium
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credential;
pub mod gemini;
pub mod report;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileBehaviorConfig, FileConfig,
    FileCredentialConfig, FileOutputConfig, FileReplConfig,
};
pub use credential::EnvCredentialResolver;
pub use gemini::{GeminiGateway, GeminiSettings};
pub use report::FileReportSink;
