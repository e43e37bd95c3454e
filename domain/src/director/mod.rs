//! Director mode
//!
//! One backend call answers for all four personas. This module holds the
//! pure pieces of that exchange:
//!
//! - [`prompt`] — builds the director prompt from a query
//! - [`decoding`] — turns the returned text into a response set
//! - [`fallback`] — canned sets used when no genuine content is available

pub mod decoding;
pub mod fallback;
pub mod prompt;

pub use decoding::{DecodeOutcome, DecodeTier, decode, strip_code_fences};
pub use fallback::{
    LOCKED_MARKER, connection_failed_responses, locked_responses, unrecognized_responses,
};
pub use prompt::DirectorPrompt;
