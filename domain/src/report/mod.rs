//! Plain-text session report

use crate::consensus::ConsensusState;
use crate::core::query::Query;
use crate::persona::{Persona, PersonaResponseSet};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// MIME type of exported reports
pub const REPORT_MIME_TYPE: &str = "text/plain";

const HEAVY_RULE: &str = "═══════════════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────────────";

/// A finished session, ready to be written out.
#[derive(Debug, Clone)]
pub struct Report {
    pub query: Query,
    pub responses: PersonaResponseSet,
    pub consensus: Option<ConsensusState>,
    pub generated_at: DateTime<Local>,
}

/// A rendered report plus the metadata needed to save it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl Report {
    pub fn new(
        query: Query,
        responses: PersonaResponseSet,
        consensus: Option<ConsensusState>,
        generated_at: DateTime<Local>,
    ) -> Self {
        Self {
            query,
            responses,
            consensus,
            generated_at,
        }
    }

    /// Render the report text. Section order is fixed: query, the four
    /// personas in canonical order, then the consensus label.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("CONSILIUM AI REPORT\n");
        let _ = writeln!(
            out,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out, "Query: {}", self.query);
        let _ = writeln!(out, "\n{}\n", HEAVY_RULE);

        for (index, persona) in Persona::all().enumerate() {
            if index > 0 {
                let _ = writeln!(out, "\n{}\n", LIGHT_RULE);
            }
            let _ = writeln!(out, "{}:", persona.report_heading());
            let _ = writeln!(out, "{}", self.responses.get(persona.id));
        }

        let _ = writeln!(out, "\n{}\n", HEAVY_RULE);
        let _ = writeln!(out, "CONSENSUS STATUS: {}", self.consensus_label());
        let _ = writeln!(out, "\n{}", LIGHT_RULE);
        out.push_str("Generated by CONSILIUM - consilium.ai\n");

        out
    }

    /// `consilium-report-<unix millis>.txt`
    pub fn file_name(&self) -> String {
        format!(
            "consilium-report-{}.txt",
            self.generated_at.timestamp_millis()
        )
    }

    pub fn artifact(&self) -> ReportArtifact {
        ReportArtifact {
            file_name: self.file_name(),
            mime_type: REPORT_MIME_TYPE,
            contents: self.render(),
        }
    }

    fn consensus_label(&self) -> &'static str {
        self.consensus.map(|c| c.label()).unwrap_or("PENDING")
    }
}
