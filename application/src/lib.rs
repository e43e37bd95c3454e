//! Application layer for consilium
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    credential::{CredentialSource, StaticCredential},
    director_gateway::{DirectorGateway, GatewayError},
    report_sink::{ReportSink, ReportSinkError},
};
pub use use_cases::export_report::{
    ExportReportError, ExportReportInput, ExportReportUseCase, ExportedReport,
};
pub use use_cases::fetch_responses::{FetchResponsesUseCase, FetchResult, ResponseSource};
pub use use_cases::session::{RejectReason, SessionController, SubmitOutcome};
