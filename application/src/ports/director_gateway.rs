//! Director gateway port
//!
//! Defines the single outbound call to the generative backend.

use async_trait::async_trait;
use consilium_domain::{Credential, DirectorPrompt};
use thiserror::Error;

/// Errors that can occur while calling the backend.
///
/// None of these reach the user; the fetcher logs them and substitutes a
/// canned response set.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Backend returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("Backend returned no text payload")]
    EmptyPayload,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid response envelope: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// HTTP status code, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Gateway to the content-generation backend.
///
/// Implementations perform exactly one request per call and return the
/// text payload of the first candidate's first part. The credential is
/// request-scoped and must never be logged or embedded in the prompt.
#[async_trait]
pub trait DirectorGateway: Send + Sync {
    async fn generate(
        &self,
        prompt: &DirectorPrompt,
        credential: &Credential,
    ) -> Result<String, GatewayError>;
}
