//! Report sink port
//!
//! Where exported report artifacts end up (a file on disk for the CLI).

use consilium_domain::ReportArtifact;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportSinkError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for rendered reports.
pub trait ReportSink: Send + Sync {
    /// Persist the artifact, returning where it was written.
    fn write(&self, artifact: &ReportArtifact) -> Result<PathBuf, ReportSinkError>;
}
