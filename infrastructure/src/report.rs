//! Filesystem report sink

use consilium_application::{ReportSink, ReportSinkError};
use consilium_domain::ReportArtifact;
use std::path::PathBuf;
use tracing::info;

/// Writes report artifacts into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for FileReportSink {
    fn write(&self, artifact: &ReportArtifact) -> Result<PathBuf, ReportSinkError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ReportSinkError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(&artifact.file_name);
        std::fs::write(&path, artifact.contents.as_bytes()).map_err(|source| {
            ReportSinkError::Write {
                path: path.clone(),
                source,
            }
        })?;

        info!(path = %path.display(), bytes = artifact.contents.len(), "Report written");
        Ok(path)
    }
}
