//! Session timing parameters.
//!
//! [`BehaviorConfig`] groups the fixed delays the use cases apply.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pause before returning the locked set when no credential exists
pub const DEFAULT_LOCKED_DELAY: Duration = Duration::from_millis(1500);

/// Default pause between `DONE` and the consensus reveal
pub const DEFAULT_CONSENSUS_REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// Timing parameters for the fetch pipeline and session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Pause taken instead of the network call when the credential is absent.
    pub locked_delay: Duration,
    /// Pause between publishing `DONE` and attaching the consensus state.
    pub consensus_reveal_delay: Duration,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            locked_delay: DEFAULT_LOCKED_DELAY,
            consensus_reveal_delay: DEFAULT_CONSENSUS_REVEAL_DELAY,
        }
    }
}

impl BehaviorConfig {
    // ==================== Builder Methods ====================

    pub fn with_locked_delay(mut self, delay: Duration) -> Self {
        self.locked_delay = delay;
        self
    }

    pub fn with_consensus_reveal_delay(mut self, delay: Duration) -> Self {
        self.consensus_reveal_delay = delay;
        self
    }

    /// No delays at all
    pub fn immediate() -> Self {
        Self {
            locked_delay: Duration::ZERO,
            consensus_reveal_delay: Duration::ZERO,
        }
    }
}
