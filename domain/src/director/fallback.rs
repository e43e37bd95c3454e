//! Canned response sets substituted when the pipeline cannot produce
//! genuine content.
//!
//! | Set | Used when |
//! |-----|-----------|
//! | [`locked_responses`] | No credential configured |
//! | [`connection_failed_responses`] | HTTP failure, empty payload, transport error |
//! | [`unrecognized_responses`] | Payload could not be decoded |

use crate::persona::PersonaResponseSet;

/// Marker carried by the locked set and looked for by the consensus
/// evaluator. Only [`locked_responses`] may contain it.
pub const LOCKED_MARKER: &str = "SYSTEM LOCKED";

/// Canned set for the credential-absent branch.
pub fn locked_responses() -> PersonaResponseSet {
    PersonaResponseSet::new(
        format!("{LOCKED_MARKER}. Environment variable VITE_GEMINI_API_KEY not found."),
        "Access Denied. Please configure API credentials.",
        "Neural link offline. Check deployment configuration.",
        "404 Brain Not Found. Did you forget to set the API key?",
    )
}

/// Canned set for any transport or backend failure, one line per persona
/// voice.
pub fn connection_failed_responses() -> PersonaResponseSet {
    PersonaResponseSet::new(
        "Connection Error: Unable to reach Google AI servers. Check your API key and network.",
        "Unable to establish secure link. The service may be temporarily unavailable.",
        "API Request Failed. Please verify your credentials and try again.",
        "Something broke. Either your key is wrong or the internet died. Check the logs for details.",
    )
}

/// Placeholder set returned when the payload is unparsable.
pub fn unrecognized_responses() -> PersonaResponseSet {
    PersonaResponseSet::new(
        "Processing data stream...",
        "Analyzing parameters...",
        "Computing response...",
        "Accessing feed...",
    )
}
