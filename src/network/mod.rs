//! Network target subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (MNEMONIC, INFURA_API_KEY)
//!     → secrets.rs (boundary resolution, missing-secret policy)
//!     → provider.rs (endpoint interpolation, wallet derivation, binding)
//!     → SignedTransport (signer + endpoint URL + chain id)
//! ```
//!
//! # Security Constraints
//! - Secrets ONLY from environment variables
//! - Never log the mnemonic, the API key, or a URL embedding the key
//! - Providers are constructed lazily, only for the selected network

pub mod provider;
pub mod secrets;
pub mod types;

pub use provider::SignedTransport;
pub use secrets::{Secrets, SecretsError};
pub use types::{ChainId, NetworkError, NetworkResult};
