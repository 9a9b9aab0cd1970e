//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure handed to the
//! build harness at startup. All types derive Serde traits so a profile can
//! be deserialized from a config file; `Default` reproduces the standard
//! profile the harness ships with.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Root configuration for the build harness.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Solidity compiler settings.
    pub compiler: CompilerConfig,

    /// Named network targets. Names are unique by construction.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Test-runner settings.
    pub test_runner: TestRunnerConfig,

    /// Enabled harness plugins.
    pub plugins: Vec<String>,

    /// Secret resolution behavior.
    pub secrets: SecretsConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            compiler: CompilerConfig::default(),
            networks: standard_networks(),
            test_runner: TestRunnerConfig::default(),
            plugins: vec!["solidity-coverage".to_string()],
            secrets: SecretsConfig::default(),
        }
    }
}

/// The three canonical network targets: a local development node plus the
/// two public networks reached through the hosted node provider.
pub fn standard_networks() -> BTreeMap<String, NetworkConfig> {
    let mut networks = BTreeMap::new();
    networks.insert(
        "development".to_string(),
        NetworkConfig::Local(LocalNetwork::default()),
    );
    networks.insert(
        "mainnet".to_string(),
        NetworkConfig::RemoteSigned(RemoteNetwork {
            endpoint: RemoteEndpoint::MainnetHttps,
            chain_id: 1,
            gas_price_wei: None,
        }),
    );
    networks.insert(
        "kovan".to_string(),
        NetworkConfig::RemoteSigned(RemoteNetwork {
            endpoint: RemoteEndpoint::KovanWss,
            chain_id: 42,
            // 2 gwei, below the node default of 20.
            gas_price_wei: Some(2_000_000_000),
        }),
    );
    networks
}

/// Solidity compiler configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Compiler version pin (e.g., "0.7.5").
    pub version: String,

    /// Bytecode optimizer settings.
    pub optimizer: OptimizerConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            version: "0.7.5".to_string(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// Bytecode optimizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Enable the optimizer.
    pub enabled: bool,

    /// Estimated number of contract invocations the optimizer tunes for.
    /// Higher values trade deploy-time bytecode size for runtime gas.
    pub runs: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: 10_000,
        }
    }
}

/// A network target the harness can be pointed at.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkConfig {
    /// A local node dialed directly over plain HTTP.
    Local(LocalNetwork),

    /// A public network reached through the hosted node provider, with
    /// transactions signed by a wallet derived from the configured
    /// mnemonic.
    RemoteSigned(RemoteNetwork),
}

/// Local development node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalNetwork {
    /// Node hostname.
    pub host: String,

    /// Node RPC port.
    pub port: u16,

    /// Expected network identifier. The wildcard accepts whatever chain
    /// the local node happens to be running.
    pub network_id: NetworkId,
}

impl Default for LocalNetwork {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8545,
            network_id: NetworkId::Any,
        }
    }
}

/// Remote-signed network target.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RemoteNetwork {
    /// Which hosted endpoint to interpolate the API key into.
    pub endpoint: RemoteEndpoint,

    /// Chain ID for EIP-155 replay protection. Must match the endpoint's
    /// actual network.
    pub chain_id: u64,

    /// Optional gas price override in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_wei: Option<u64>,
}

/// Fixed endpoint templates at the hosted node provider. Only the API key
/// is interpolated; the host and path are not configurable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteEndpoint {
    /// Ethereum mainnet over HTTPS.
    MainnetHttps,

    /// Kovan testnet over secure WebSocket.
    KovanWss,
}

/// Expected network identifier: a specific chain, or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkId {
    /// Matches any chain (serialized as `"*"`).
    Any,

    /// A specific chain ID.
    Id(u64),
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Any => f.write_str("*"),
            NetworkId::Id(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NetworkId::Any => serializer.serialize_str("*"),
            NetworkId::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NetworkIdVisitor;

        impl<'de> Visitor<'de> for NetworkIdVisitor {
            type Value = NetworkId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"*\" or a numeric network id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NetworkId, E> {
                if v == "*" {
                    Ok(NetworkId::Any)
                } else {
                    v.parse()
                        .map(NetworkId::Id)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NetworkId, E> {
                Ok(NetworkId::Id(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NetworkId, E> {
                u64::try_from(v)
                    .map(NetworkId::Id)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(NetworkIdVisitor)
    }
}

/// Behavior when required secrets are absent from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSecretPolicy {
    /// Log a diagnostic and terminate the process with status 1. This is
    /// the harness convention: never run against a half-configured
    /// network.
    #[default]
    Exit,

    /// Return a structured error to the caller.
    Error,
}

/// Secret resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// What to do when a required secret is missing.
    pub on_missing: MissingSecretPolicy,
}

/// Test-runner settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TestRunnerConfig {
    /// Per-suite timeout in milliseconds. Contract suites deploy against a
    /// live node, so this is generous.
    pub timeout_ms: u64,

    /// Reporter name passed through to the runner.
    pub reporter: String,
}

impl Default for TestRunnerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2_000_000,
            reporter: "Spec".to_string(),
        }
    }
}
