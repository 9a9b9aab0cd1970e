//! Network-specific types and error definitions.

use thiserror::Error;

use crate::network::secrets::SecretsError;

// Re-export network descriptors from the config module to avoid duplication
pub use crate::config::schema::{LocalNetwork, NetworkConfig, RemoteEndpoint, RemoteNetwork};

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur while constructing a network provider.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Required secrets were not resolvable.
    #[error(transparent)]
    Secrets(#[from] SecretsError),

    /// Wallet derivation failed downstream. The mnemonic is passed through
    /// unvalidated, so this surfaces the signer library's own rules.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// The interpolated endpoint did not form a valid URL.
    #[error("endpoint error: {0}")]
    Endpoint(String),

    /// The named network is dialed directly and has no signing provider.
    #[error("network '{network}' is a local node and has no signing provider")]
    NotRemote { network: String },
}

/// Result type for network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;
