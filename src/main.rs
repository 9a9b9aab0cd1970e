//! Harness entry point.
//!
//! Loads the configuration the way the hosting framework does at startup:
//! the standard profile, or a TOML file overriding it, validated before
//! anything else runs. Signing providers are constructed only for the
//! network named on the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solcfg::config::loader::load_config;
use solcfg::config::{NetworkConfig, ProjectConfig};

#[derive(Parser)]
#[command(name = "solcfg")]
#[command(about = "Configuration provider for the Solidity build harness", long_about = None)]
struct Cli {
    /// TOML profile overriding the standard configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration
    Show {
        /// Emit JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// List configured network targets
    Networks,
    /// Resolve secrets and construct the signing provider for a network
    Provider {
        /// Network name (e.g. "mainnet")
        name: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solcfg=info".into()),
        )
        // Logs go to stderr; stdout carries the requested output only.
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProjectConfig::default(),
    };

    tracing::info!(
        solc = %config.compiler.version,
        optimizer_runs = config.compiler.optimizer.runs,
        networks = config.networks.len(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Commands::Networks => {
            for (name, network) in &config.networks {
                match network {
                    NetworkConfig::Local(local) => {
                        println!(
                            "{:<12} local          {} (network id {})",
                            name,
                            local.rpc_url(),
                            local.network_id
                        );
                    }
                    NetworkConfig::RemoteSigned(remote) => {
                        let gas = remote
                            .gas_price_wei
                            .map(|wei| format!(", gas price {} wei", wei))
                            .unwrap_or_default();
                        println!(
                            "{:<12} remote-signed  {} endpoint, chain id {}{}",
                            name,
                            remote.endpoint.scheme(),
                            remote.chain_id,
                            gas
                        );
                    }
                }
            }
        }
        Commands::Provider { name } => {
            let network = config
                .networks
                .get(&name)
                .ok_or_else(|| format!("unknown network '{}'", name))?;

            match network {
                NetworkConfig::Local(local) => {
                    println!(
                        "'{}' is a local node at {}; it is dialed directly and needs no signing provider",
                        name,
                        local.rpc_url()
                    );
                }
                NetworkConfig::RemoteSigned(remote) => {
                    // Secrets are read only on this path, and under the
                    // default policy a missing one never returns here.
                    let transport = remote.provider_from_env(config.secrets.on_missing)?;
                    println!("address:  {}", transport.address());
                    println!("endpoint: {}", transport.endpoint());
                    println!("chain id: {}", transport.chain_id());
                }
            }
        }
    }

    Ok(())
}
