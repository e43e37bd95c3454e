//! Export Report use case
//!
//! Renders a finished session into a plain-text report and hands it to a
//! [`ReportSink`].

use crate::ports::report_sink::{ReportSink, ReportSinkError};
use chrono::{DateTime, Local};
use consilium_domain::{
    ConsensusState, PersonaResponseSet, Query, Report, SessionSnapshot, SessionState,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while exporting a report
#[derive(Error, Debug)]
pub enum ExportReportError {
    #[error("Nothing to export: the session has no finished result")]
    NotFinished,

    #[error("Export is only available once the council reaches AGREEMENT")]
    NotAgreed,

    #[error(transparent)]
    Sink(#[from] ReportSinkError),
}

/// Input for the ExportReport use case
#[derive(Debug, Clone)]
pub struct ExportReportInput {
    pub query: Query,
    pub responses: PersonaResponseSet,
    pub consensus: Option<ConsensusState>,
}

impl ExportReportInput {
    pub fn new(
        query: Query,
        responses: PersonaResponseSet,
        consensus: Option<ConsensusState>,
    ) -> Self {
        Self {
            query,
            responses,
            consensus,
        }
    }

    /// Take the input from a session snapshot; only `DONE` snapshots qualify.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Result<Self, ExportReportError> {
        match (&snapshot.state, &snapshot.query) {
            (SessionState::Done, Some(query)) => Ok(Self::new(
                query.clone(),
                snapshot.responses.clone(),
                snapshot.consensus,
            )),
            _ => Err(ExportReportError::NotFinished),
        }
    }

    /// Like [`from_snapshot`](Self::from_snapshot), but also requires the
    /// revealed consensus to be `AGREEMENT`.
    pub fn from_agreed_snapshot(snapshot: &SessionSnapshot) -> Result<Self, ExportReportError> {
        let input = Self::from_snapshot(snapshot)?;
        match input.consensus {
            Some(ConsensusState::Agreement) => Ok(input),
            _ => Err(ExportReportError::NotAgreed),
        }
    }
}

/// Where a report was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    pub path: PathBuf,
    pub file_name: String,
}

/// Use case for exporting a session report
pub struct ExportReportUseCase<S: ReportSink + 'static> {
    sink: Arc<S>,
}

impl<S: ReportSink + 'static> ExportReportUseCase<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    /// Export with the current local time as the generation timestamp
    pub fn execute(&self, input: ExportReportInput) -> Result<ExportedReport, ExportReportError> {
        self.execute_at(input, Local::now())
    }

    pub fn execute_at(
        &self,
        input: ExportReportInput,
        generated_at: DateTime<Local>,
    ) -> Result<ExportedReport, ExportReportError> {
        let report = Report::new(input.query, input.responses, input.consensus, generated_at);
        let artifact = report.artifact();
        let path = self.sink.write(&artifact)?;

        info!("Report exported to {}", path.display());
        Ok(ExportedReport {
            path,
            file_name: artifact.file_name,
        })
    }
}
