//! Session lifecycle domain.
//!
//! - [`SessionState`] — `IDLE` → `ANALYZING` → `DONE`
//! - [`SessionSnapshot`] — the observable record of one session

use crate::consensus::ConsensusState;
use crate::core::query::Query;
use crate::persona::PersonaResponseSet;
use serde::{Deserialize, Serialize};

/// Request lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    #[default]
    Idle,
    Analyzing,
    Done,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "IDLE",
            SessionState::Analyzing => "ANALYZING",
            SessionState::Done => "DONE",
        }
    }

    /// Whether a new submission may start from this state
    pub fn accepts_submission(&self) -> bool {
        !matches!(self, SessionState::Analyzing)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the presentation layer needs to render a session.
///
/// Replaced wholesale on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Submission counter; 0 before the first submission
    pub cycle: u64,
    pub state: SessionState,
    pub query: Option<Query>,
    pub responses: PersonaResponseSet,
    pub consensus: Option<ConsensusState>,
}

impl SessionSnapshot {
    /// Snapshot published when a new cycle starts
    pub fn analyzing(cycle: u64, query: Query) -> Self {
        Self {
            cycle,
            state: SessionState::Analyzing,
            query: Some(query),
            responses: PersonaResponseSet::empty(),
            consensus: None,
        }
    }

    /// Snapshot published when the fetch resolves (consensus not yet revealed)
    pub fn done(&self, responses: PersonaResponseSet) -> Self {
        Self {
            cycle: self.cycle,
            state: SessionState::Done,
            query: self.query.clone(),
            responses,
            consensus: None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.state == SessionState::Analyzing
    }
}
