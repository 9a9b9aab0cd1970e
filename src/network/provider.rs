//! Signing provider construction.
//!
//! # Responsibilities
//! - Interpolate the API key into the fixed endpoint templates
//! - Derive the signing wallet from the mnemonic (delegated to alloy)
//! - Bind signer, endpoint URL, and chain ID into a transport descriptor
//!
//! # Security
//! - The endpoint URL embeds the API key; it is never logged, only its host
//! - Construction is synchronous and performs no I/O; dialing the endpoint
//!   is the consumer's concern

use alloy::primitives::Address;
use alloy::signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use alloy::signers::Signer;
use url::Url;

use crate::config::schema::MissingSecretPolicy;
use crate::network::secrets::Secrets;
use crate::network::types::{
    ChainId, LocalNetwork, NetworkConfig, NetworkError, NetworkResult, RemoteEndpoint,
    RemoteNetwork,
};

const MAINNET_HTTPS_PREFIX: &str = "https://mainnet.infura.io/v3/";
const KOVAN_WSS_PREFIX: &str = "wss://kovan.infura.io/ws/v3/";

impl RemoteEndpoint {
    /// Interpolate the API key into this endpoint's template. The key is
    /// inserted verbatim; a malformed key fails URL formation downstream.
    pub fn rpc_url(&self, api_key: &str) -> NetworkResult<Url> {
        let raw = match self {
            RemoteEndpoint::MainnetHttps => format!("{}{}", MAINNET_HTTPS_PREFIX, api_key),
            RemoteEndpoint::KovanWss => format!("{}{}", KOVAN_WSS_PREFIX, api_key),
        };
        Url::parse(&raw)
            .map_err(|e| NetworkError::Endpoint(format!("invalid endpoint URL: {}", e)))
    }

    /// The chain ID of the network behind this endpoint.
    pub fn expected_chain_id(&self) -> ChainId {
        match self {
            RemoteEndpoint::MainnetHttps => ChainId(1),
            RemoteEndpoint::KovanWss => ChainId(42),
        }
    }

    /// URL scheme of this endpoint's transport.
    pub fn scheme(&self) -> &'static str {
        match self {
            RemoteEndpoint::MainnetHttps => "https",
            RemoteEndpoint::KovanWss => "wss",
        }
    }
}

impl LocalNetwork {
    /// Plain HTTP URL of the local node.
    pub fn rpc_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// A signing transport bound to a remote endpoint.
///
/// Holds the wallet signer derived from the mnemonic, the endpoint URL with
/// the API key interpolated, and the chain ID the signer is locked to.
#[derive(Clone)]
pub struct SignedTransport {
    signer: PrivateKeySigner,
    endpoint: Url,
    chain_id: ChainId,
}

impl SignedTransport {
    /// Address of the derived signing key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Full endpoint URL, API key included.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Chain ID the signer is bound to.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// The underlying signer.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Consume the transport, keeping only the signer.
    pub fn into_signer(self) -> PrivateKeySigner {
        self.signer
    }
}

// The endpoint URL embeds the API key, so Debug shows only its host.
impl std::fmt::Debug for SignedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedTransport")
            .field("address", &self.signer.address())
            .field("host", &self.endpoint.host_str().unwrap_or(""))
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

impl RemoteNetwork {
    /// Construct the signing transport for this network.
    ///
    /// Derivation of the signing key from the mnemonic is delegated to the
    /// signer library (default derivation path, account index 0); neither
    /// the mnemonic nor the API key is validated here. The signer is bound
    /// to this network's chain ID for replay protection.
    pub fn provider(&self, secrets: &Secrets) -> NetworkResult<SignedTransport> {
        let endpoint = self.endpoint.rpc_url(secrets.infura_api_key())?;

        let signer = MnemonicBuilder::<English>::default()
            .phrase(secrets.mnemonic())
            .build()
            .map_err(|e| NetworkError::Wallet(e.to_string()))?
            .with_chain_id(Some(self.chain_id));

        tracing::info!(
            address = %signer.address(),
            chain_id = self.chain_id,
            host = endpoint.host_str().unwrap_or(""),
            "signing provider constructed"
        );

        Ok(SignedTransport {
            signer,
            endpoint,
            chain_id: ChainId(self.chain_id),
        })
    }

    /// Resolve secrets from the environment under `policy`, then construct
    /// the transport. This is the path the harness takes when this network
    /// is the one selected for a run; under the default policy a missing
    /// secret terminates the process instead of returning.
    pub fn provider_from_env(&self, policy: MissingSecretPolicy) -> NetworkResult<SignedTransport> {
        let secrets = Secrets::resolve(policy)?;
        self.provider(&secrets)
    }
}

impl NetworkConfig {
    /// Construct the signing provider for this network, if it has one.
    ///
    /// Local development networks are dialed directly by the harness and
    /// return [`NetworkError::NotRemote`].
    pub fn provider(&self, name: &str, secrets: &Secrets) -> NetworkResult<SignedTransport> {
        match self {
            NetworkConfig::Local(_) => Err(NetworkError::NotRemote {
                network: name.to_string(),
            }),
            NetworkConfig::RemoteSigned(remote) => remote.provider(secrets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::standard_networks;

    // Canonical English test phrase; derives the well-known dev account.
    const TEST_MNEMONIC: &str =
        "test test test test test test test test test test test junk";

    fn test_secrets() -> Secrets {
        Secrets::new(TEST_MNEMONIC, "abc123")
    }

    fn remote(endpoint: RemoteEndpoint, chain_id: u64) -> RemoteNetwork {
        RemoteNetwork {
            endpoint,
            chain_id,
            gas_price_wei: None,
        }
    }

    #[test]
    fn mainnet_url_interpolates_key_verbatim() {
        let url = RemoteEndpoint::MainnetHttps.rpc_url("abc123").unwrap();
        assert_eq!(url.as_str(), "https://mainnet.infura.io/v3/abc123");
    }

    #[test]
    fn kovan_url_uses_websocket_scheme() {
        let url = RemoteEndpoint::KovanWss.rpc_url("abc123").unwrap();
        assert_eq!(url.as_str(), "wss://kovan.infura.io/ws/v3/abc123");
        assert_eq!(RemoteEndpoint::KovanWss.scheme(), "wss");
    }

    #[test]
    fn expected_chain_ids_are_fixed() {
        assert_eq!(RemoteEndpoint::MainnetHttps.expected_chain_id(), ChainId(1));
        assert_eq!(RemoteEndpoint::KovanWss.expected_chain_id(), ChainId(42));
    }

    #[test]
    fn mainnet_provider_binds_key_and_chain() {
        let transport = remote(RemoteEndpoint::MainnetHttps, 1)
            .provider(&test_secrets())
            .unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "https://mainnet.infura.io/v3/abc123"
        );
        assert_eq!(transport.chain_id(), ChainId(1));
        // Account 0 of the canonical test phrase.
        assert_eq!(
            transport.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn kovan_provider_targets_chain_42() {
        let transport = remote(RemoteEndpoint::KovanWss, 42)
            .provider(&test_secrets())
            .unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "wss://kovan.infura.io/ws/v3/abc123"
        );
        assert_eq!(transport.chain_id(), ChainId(42));
    }

    #[test]
    fn malformed_mnemonic_surfaces_wallet_error() {
        let secrets = Secrets::new("definitely not a valid phrase", "abc123");
        let err = remote(RemoteEndpoint::MainnetHttps, 1)
            .provider(&secrets)
            .unwrap_err();
        assert!(matches!(err, NetworkError::Wallet(_)));
    }

    #[test]
    fn local_network_has_no_provider() {
        let networks = standard_networks();
        let err = networks["development"]
            .provider("development", &test_secrets())
            .unwrap_err();
        assert!(matches!(err, NetworkError::NotRemote { .. }));
    }

    #[test]
    fn local_rpc_url() {
        let local = LocalNetwork::default();
        assert_eq!(local.rpc_url(), "http://localhost:8545");
    }

    #[test]
    fn transport_debug_hides_api_key() {
        let transport = remote(RemoteEndpoint::MainnetHttps, 1)
            .provider(&test_secrets())
            .unwrap();
        let rendered = format!("{:?}", transport);
        assert!(!rendered.contains("abc123"));
        assert!(rendered.contains("mainnet.infura.io"));
    }

    #[test]
    fn provider_from_env_under_error_policy() {
        use crate::network::secrets::with_env;

        with_env(None, None, || {
            let err = remote(RemoteEndpoint::MainnetHttps, 1)
                .provider_from_env(MissingSecretPolicy::Error)
                .unwrap_err();
            assert!(matches!(err, NetworkError::Secrets(_)));
        });

        with_env(Some(TEST_MNEMONIC), Some("abc123"), || {
            let transport = remote(RemoteEndpoint::MainnetHttps, 1)
                .provider_from_env(MissingSecretPolicy::Error)
                .unwrap();
            assert_eq!(
                transport.endpoint().as_str(),
                "https://mainnet.infura.io/v3/abc123"
            );
        });
    }

    #[tokio::test]
    async fn transport_signer_signs_messages() {
        let transport = remote(RemoteEndpoint::MainnetHttps, 1)
            .provider(&test_secrets())
            .unwrap();
        let address = transport.address();
        let signature = transport
            .signer()
            .sign_message(b"Hello, World!")
            .await
            .unwrap();
        // r, s, v
        assert_eq!(signature.as_bytes().len(), 65);

        let signer = transport.into_signer();
        assert_eq!(signer.address(), address);
    }
}
