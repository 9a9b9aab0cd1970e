//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! standard profile (ProjectConfig::default)
//!     or config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProjectConfig (validated, immutable)
//!     → read once by the harness at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults, so an empty file is a complete profile
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::MissingSecretPolicy;
pub use schema::NetworkConfig;
pub use schema::NetworkId;
pub use schema::ProjectConfig;
pub use schema::RemoteEndpoint;
