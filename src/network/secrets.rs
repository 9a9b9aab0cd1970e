//! Secret resolution at the process boundary.
//!
//! # Security
//! - The mnemonic and API key are loaded ONLY from environment variables
//! - Neither value is ever logged or serialized
//!
//! Resolution happens once, at the boundary, and hands a complete
//! [`Secrets`] value to provider construction. A remote provider can only
//! be built from a fully resolved value, never from partial state.

use thiserror::Error;

use crate::config::schema::MissingSecretPolicy;

/// Environment variable holding the wallet mnemonic phrase.
pub const MNEMONIC_ENV_VAR: &str = "MNEMONIC";

/// Environment variable holding the hosted node provider's API key.
pub const INFURA_API_KEY_ENV_VAR: &str = "INFURA_API_KEY";

/// Diagnostic written to stderr before a fail-fast exit. Names both
/// variables regardless of which one is absent.
pub const MISSING_SECRETS_DIAGNOSTIC: &str =
    "Environment variables MNEMONIC and INFURA_API_KEY are required";

/// Error raised when required secrets cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretsError {
    /// One or more required environment variables are unset or empty.
    #[error("missing required environment variables: {}", .missing.join(", "))]
    Missing { missing: Vec<&'static str> },
}

/// The two secrets a remote-signed network needs.
#[derive(Clone)]
pub struct Secrets {
    mnemonic: String,
    infura_api_key: String,
}

impl Secrets {
    /// Build a secrets value from already-resolved strings.
    ///
    /// Neither value is validated here; a malformed mnemonic or key is
    /// passed through to the downstream signer and endpoint construction.
    pub fn new(mnemonic: impl Into<String>, infura_api_key: impl Into<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            infura_api_key: infura_api_key.into(),
        }
    }

    /// Resolve both secrets from the process environment.
    ///
    /// Unset and empty variables are both treated as missing. The error
    /// names every absent variable, not just the first.
    pub fn from_env() -> Result<Self, SecretsError> {
        let mnemonic = non_empty_var(MNEMONIC_ENV_VAR);
        let infura_api_key = non_empty_var(INFURA_API_KEY_ENV_VAR);

        match (mnemonic, infura_api_key) {
            (Some(mnemonic), Some(infura_api_key)) => Ok(Self {
                mnemonic,
                infura_api_key,
            }),
            (mnemonic, infura_api_key) => {
                let mut missing = Vec::new();
                if mnemonic.is_none() {
                    missing.push(MNEMONIC_ENV_VAR);
                }
                if infura_api_key.is_none() {
                    missing.push(INFURA_API_KEY_ENV_VAR);
                }
                Err(SecretsError::Missing { missing })
            }
        }
    }

    /// Resolve both secrets from the environment under the given policy.
    ///
    /// Under [`MissingSecretPolicy::Exit`] an unresolvable environment
    /// writes [`MISSING_SECRETS_DIAGNOSTIC`] to stderr and terminates the
    /// process with status 1; no transport is constructed and no error
    /// reaches the caller. Under [`MissingSecretPolicy::Error`] the
    /// [`SecretsError`] is returned instead.
    pub fn resolve(policy: MissingSecretPolicy) -> Result<Self, SecretsError> {
        match Self::from_env() {
            Ok(secrets) => Ok(secrets),
            Err(err) => match policy {
                MissingSecretPolicy::Error => Err(err),
                MissingSecretPolicy::Exit => {
                    tracing::error!(error = %err, "cannot resolve signing secrets");
                    eprintln!("{}", MISSING_SECRETS_DIAGNOSTIC);
                    std::process::exit(1);
                }
            },
        }
    }

    /// The wallet mnemonic phrase.
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// The hosted node provider's API key.
    pub fn infura_api_key(&self) -> &str {
        &self.infura_api_key
    }
}

// Secrets never appear in Debug output.
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("mnemonic", &"<redacted>")
            .field("infura_api_key", &"<redacted>")
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Run `f` with the two secret variables set or unset. Environment
/// mutation is process-wide, so every test touching them serializes on one
/// lock; shared with the provider tests.
#[cfg(test)]
pub(crate) fn with_env(mnemonic: Option<&str>, api_key: Option<&str>, f: impl FnOnce()) {
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    match mnemonic {
        Some(value) => std::env::set_var(MNEMONIC_ENV_VAR, value),
        None => std::env::remove_var(MNEMONIC_ENV_VAR),
    }
    match api_key {
        Some(value) => std::env::set_var(INFURA_API_KEY_ENV_VAR, value),
        None => std::env::remove_var(INFURA_API_KEY_ENV_VAR),
    }
    f();
    std::env::remove_var(MNEMONIC_ENV_VAR);
    std::env::remove_var(INFURA_API_KEY_ENV_VAR);
}
