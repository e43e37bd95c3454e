//! Consensus classification
//!
//! A completed [`PersonaResponseSet`] is classified into one of two end
//! states. The classification is derived, never set independently.

use crate::director::fallback::LOCKED_MARKER;
use crate::persona::PersonaResponseSet;
use serde::{Deserialize, Serialize};

/// Derived consensus over a completed response set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsensusState {
    /// Every persona answered with genuine (non-locked) content
    Agreement,
    /// At least one persona is empty or the backend is locked
    SystemLock,
}

impl ConsensusState {
    /// Canonical label, as written to reports
    pub fn label(&self) -> &'static str {
        match self {
            ConsensusState::Agreement => "AGREEMENT",
            ConsensusState::SystemLock => "SYSTEM LOCK",
        }
    }

    /// Badge text shown to the user
    pub fn badge(&self) -> &'static str {
        match self {
            ConsensusState::Agreement => "AGREEMENT",
            ConsensusState::SystemLock => "AUTH REQUIRED",
        }
    }

    pub fn is_agreement(&self) -> bool {
        matches!(self, ConsensusState::Agreement)
    }
}

impl std::fmt::Display for ConsensusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a completed response set.
///
/// `Agreement` iff all four values are non-empty and none contains
/// [`LOCKED_MARKER`]; otherwise `SystemLock`.
///
/// # Examples
///
/// ```
/// use consilium_domain::consensus::{evaluate, ConsensusState};
/// use consilium_domain::director::locked_responses;
/// use consilium_domain::PersonaResponseSet;
///
/// let set = PersonaResponseSet::new("A", "B", "C", "D");
/// assert_eq!(evaluate(&set), ConsensusState::Agreement);
/// assert_eq!(evaluate(&locked_responses()), ConsensusState::SystemLock);
/// ```
pub fn evaluate(responses: &PersonaResponseSet) -> ConsensusState {
    let all_answered = responses
        .iter()
        .all(|(_, text)| !text.is_empty() && !text.contains(LOCKED_MARKER));

    if all_answered {
        ConsensusState::Agreement
    } else {
        ConsensusState::SystemLock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::director::fallback::{
        connection_failed_responses, locked_responses, unrecognized_responses,
    };

    #[test]
    fn test_full_set_is_agreement() {
        let set = PersonaResponseSet::new("A", "B", "C", "D");
        assert_eq!(evaluate(&set), ConsensusState::Agreement);
    }

    #[test]
    fn test_locked_set_is_system_lock() {
        assert_eq!(evaluate(&locked_responses()), ConsensusState::SystemLock);
    }

    #[test]
    fn test_any_empty_value_is_system_lock() {
        let set = PersonaResponseSet::new("A", "B", "", "D");
        assert_eq!(evaluate(&set), ConsensusState::SystemLock);
        assert_eq!(
            evaluate(&PersonaResponseSet::empty()),
            ConsensusState::SystemLock
        );
    }

    #[test]
    fn test_marker_in_any_persona_is_system_lock() {
        let set = PersonaResponseSet::new("A", "B", "C", "Grok says SYSTEM LOCKED lol");
        assert_eq!(evaluate(&set), ConsensusState::SystemLock);
    }

    #[test]
    fn test_failure_placeholders_are_not_locked() {
        // Only the credential-absent set carries the marker
        assert!(evaluate(&connection_failed_responses()).is_agreement());
        assert!(evaluate(&unrecognized_responses()).is_agreement());
    }

    #[test]
    fn test_labels() {
        assert_eq!(ConsensusState::Agreement.to_string(), "AGREEMENT");
        assert_eq!(ConsensusState::SystemLock.to_string(), "SYSTEM LOCK");
        assert_eq!(ConsensusState::SystemLock.badge(), "AUTH REQUIRED");
        assert_eq!(
            serde_json::to_string(&ConsensusState::SystemLock).unwrap(),
            "\"SYSTEM_LOCK\""
        );
    }
}
