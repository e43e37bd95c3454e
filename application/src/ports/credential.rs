//! Credential source port
//!
//! The backend secret comes from the hosting environment. Absence is a
//! valid state: every consumer handles `None` explicitly.

use consilium_domain::Credential;

/// Supplies the backend credential, if one is configured.
pub trait CredentialSource: Send + Sync {
    /// The resolved credential, or `None` when not configured
    fn credential(&self) -> Option<Credential>;

    /// Whether a credential is available (the online/offline indicator)
    fn is_configured(&self) -> bool {
        self.credential().is_some()
    }
}

/// A fixed credential value, for tests and explicit wiring.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<Credential>);

impl StaticCredential {
    pub fn new(credential: Option<Credential>) -> Self {
        Self(credential)
    }

    /// No credential configured
    pub fn absent() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredential {
    fn credential(&self) -> Option<Credential> {
        self.0.clone()
    }
}
