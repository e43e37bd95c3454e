//! Credential resolution from the process environment
//!
//! The credential is read once at construction and kept for the life of the
//! process. Only the variable *name* that supplied it is ever logged.

use consilium_application::CredentialSource;
use consilium_domain::Credential;
use tracing::{debug, info};

/// Resolves the backend credential from a list of environment variables.
///
/// Variables are checked in order; the first non-blank value wins.
#[derive(Debug, Clone)]
pub struct EnvCredentialResolver {
    credential: Option<Credential>,
}

impl EnvCredentialResolver {
    /// Resolve from the real process environment
    pub fn from_env<S: AsRef<str>>(names: &[S]) -> Self {
        Self::from_lookup(names, |name| std::env::var(name).ok())
    }

    /// Resolve through an arbitrary lookup function
    pub fn from_lookup<S, F>(names: &[S], lookup: F) -> Self
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        for name in names {
            let name = name.as_ref();
            if let Some(credential) = lookup(name).and_then(Credential::new) {
                info!(variable = name, "Backend credential found");
                return Self {
                    credential: Some(credential),
                };
            }
            debug!(variable = name, "Credential variable not set");
        }

        info!("No backend credential configured; running offline");
        Self { credential: None }
    }
}

impl CredentialSource for EnvCredentialResolver {
    fn credential(&self) -> Option<Credential> {
        self.credential.clone()
    }
}
