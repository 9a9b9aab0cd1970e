//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check remote descriptors against their endpoint's fixed chain ID
//! - Validate value ranges (ports, timeouts, optimizer runs)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProjectConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{NetworkConfig, ProjectConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("network '{network}': host must not be empty")]
    EmptyHost { network: String },

    #[error("network '{network}': port must not be 0")]
    ZeroPort { network: String },

    #[error(
        "network '{network}': chain id {configured} does not match the \
         endpoint's network (chain id {expected})"
    )]
    ChainIdMismatch {
        network: String,
        configured: u64,
        expected: u64,
    },

    #[error("optimizer is enabled but runs is 0")]
    ZeroOptimizerRuns,

    #[error("compiler version must not be empty")]
    EmptyCompilerVersion,

    #[error("test runner timeout must not be 0")]
    ZeroTestTimeout,

    #[error("test runner reporter must not be empty")]
    EmptyReporter,

    #[error("plugin name at index {index} is empty")]
    EmptyPluginName { index: usize },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProjectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.compiler.version.is_empty() {
        errors.push(ValidationError::EmptyCompilerVersion);
    }
    if config.compiler.optimizer.enabled && config.compiler.optimizer.runs == 0 {
        errors.push(ValidationError::ZeroOptimizerRuns);
    }

    for (name, network) in &config.networks {
        match network {
            NetworkConfig::Local(local) => {
                if local.host.is_empty() {
                    errors.push(ValidationError::EmptyHost {
                        network: name.clone(),
                    });
                }
                if local.port == 0 {
                    errors.push(ValidationError::ZeroPort {
                        network: name.clone(),
                    });
                }
            }
            NetworkConfig::RemoteSigned(remote) => {
                let expected = remote.endpoint.expected_chain_id();
                if remote.chain_id != expected.0 {
                    errors.push(ValidationError::ChainIdMismatch {
                        network: name.clone(),
                        configured: remote.chain_id,
                        expected: expected.0,
                    });
                }
            }
        }
    }

    if config.test_runner.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTestTimeout);
    }
    if config.test_runner.reporter.is_empty() {
        errors.push(ValidationError::EmptyReporter);
    }
    for (index, plugin) in config.plugins.iter().enumerate() {
        if plugin.is_empty() {
            errors.push(ValidationError::EmptyPluginName { index });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LocalNetwork, RemoteEndpoint, RemoteNetwork};

    #[test]
    fn standard_profile_is_valid() {
        assert_eq!(validate_config(&ProjectConfig::default()), Ok(()));
    }

    #[test]
    fn rejects_chain_id_mismatch() {
        let mut config = ProjectConfig::default();
        config.networks.insert(
            "mainnet".to_string(),
            NetworkConfig::RemoteSigned(RemoteNetwork {
                endpoint: RemoteEndpoint::MainnetHttps,
                chain_id: 42,
                gas_price_wei: None,
            }),
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ChainIdMismatch {
                network: "mainnet".to_string(),
                configured: 42,
                expected: 1,
            }]
        );
    }

    #[test]
    fn rejects_zero_runs_only_when_optimizer_enabled() {
        let mut config = ProjectConfig::default();
        config.compiler.optimizer.runs = 0;
        assert!(validate_config(&config)
            .unwrap_err()
            .contains(&ValidationError::ZeroOptimizerRuns));

        config.compiler.optimizer.enabled = false;
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn rejects_degenerate_local_network() {
        let mut config = ProjectConfig::default();
        config.networks.insert(
            "development".to_string(),
            NetworkConfig::Local(LocalNetwork {
                host: String::new(),
                port: 0,
                ..LocalNetwork::default()
            }),
        );
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyHost {
            network: "development".to_string()
        }));
        assert!(errors.contains(&ValidationError::ZeroPort {
            network: "development".to_string()
        }));
    }

    #[test]
    fn collects_every_error() {
        let mut config = ProjectConfig::default();
        config.compiler.version.clear();
        config.test_runner.timeout_ms = 0;
        config.test_runner.reporter.clear();
        config.plugins.push(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyPluginName { index: 1 }));
    }
}
