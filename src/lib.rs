//! Configuration provider for a Solidity build/test harness.
//!
//! Supplies compiler settings, named network targets, test-runner options,
//! and the plugin list as one immutable structure read at startup. Remote
//! networks construct their signing transport lazily from secrets resolved
//! at the environment boundary.

pub mod config;
pub mod network;

pub use config::schema::ProjectConfig;
pub use network::provider::SignedTransport;
pub use network::secrets::Secrets;
