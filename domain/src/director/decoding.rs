//! Decoding of the backend's text payload into a [`PersonaResponseSet`].
//!
//! Pure domain logic with a fixed fallback chain:
//!
//! | Tier | Input | Outcome |
//! |------|-------|---------|
//! | 1 | raw text as JSON | [`DecodeOutcome::Parsed`] |
//! | 2 | text with code fences removed | [`DecodeOutcome::ParsedAfterCleanup`] |
//! | 3 | — | [`DecodeOutcome::Fallback`] with placeholder text |

use super::fallback::unrecognized_responses;
use crate::persona::PersonaResponseSet;
use serde::Serialize;

/// Which tier of the decoder produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeTier {
    Direct,
    Cleanup,
    Fallback,
}

/// Result of decoding a payload. Every variant carries a complete set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The raw payload parsed as-is
    Parsed(PersonaResponseSet),
    /// The payload parsed after stripping code fences
    ParsedAfterCleanup(PersonaResponseSet),
    /// Nothing parsed; placeholder set
    Fallback(PersonaResponseSet),
}

impl DecodeOutcome {
    pub fn tier(&self) -> DecodeTier {
        match self {
            DecodeOutcome::Parsed(_) => DecodeTier::Direct,
            DecodeOutcome::ParsedAfterCleanup(_) => DecodeTier::Cleanup,
            DecodeOutcome::Fallback(_) => DecodeTier::Fallback,
        }
    }

    pub fn responses(&self) -> &PersonaResponseSet {
        match self {
            DecodeOutcome::Parsed(set)
            | DecodeOutcome::ParsedAfterCleanup(set)
            | DecodeOutcome::Fallback(set) => set,
        }
    }

    pub fn into_responses(self) -> PersonaResponseSet {
        match self {
            DecodeOutcome::Parsed(set)
            | DecodeOutcome::ParsedAfterCleanup(set)
            | DecodeOutcome::Fallback(set) => set,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, DecodeOutcome::Fallback(_))
    }
}

/// Decode a backend payload. Never fails.
///
/// # Examples
///
/// ```
/// use consilium_domain::director::decoding::{decode, DecodeTier};
///
/// let raw = r#"{"gemini": "a", "claude": "b", "gpt": "c", "grok": "d"}"#;
/// assert_eq!(decode(raw).tier(), DecodeTier::Direct);
///
/// let fenced = format!("```json\n{}\n```", raw);
/// assert_eq!(decode(&fenced).tier(), DecodeTier::Cleanup);
///
/// assert_eq!(decode("not json").tier(), DecodeTier::Fallback);
/// ```
pub fn decode(raw: &str) -> DecodeOutcome {
    if let Ok(set) = serde_json::from_str::<PersonaResponseSet>(raw) {
        return DecodeOutcome::Parsed(set);
    }

    if let Ok(set) = serde_json::from_str::<PersonaResponseSet>(&strip_code_fences(raw)) {
        return DecodeOutcome::ParsedAfterCleanup(set);
    }

    DecodeOutcome::Fallback(unrecognized_responses())
}

/// Remove every "```json" and "```" marker, then trim.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}
