// src/config.rs

use std::collections::HashMap;
use std::env;

use dotenvy::dotenv;

use crate::chain::Address;

/// Story Protocol network identifiers this deployment serves.
pub const AENEID_CHAIN_ID: u64 = 1315;
pub const MAINNET_CHAIN_ID: u64 = 1514;

const AENEID_RPC_URL: &str = "https://aeneid.storyrpc.io";
const MAINNET_RPC_URL: &str = "https://mainnet.storyrpc.io";

// QuizManager deployments; overridable per environment.
const AENEID_QUIZ_MANAGER: &str = "0x5fb0726f0b98c56f09deaf9727465746a36930db";
const MAINNET_QUIZ_MANAGER: &str = "0x89a1e327e7bd896cbe5c8236b39b03d49d790c2a";

/// Network configuration for one supported chain.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub rpc_url: String,
    pub quiz_manager: Address,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Symmetric secret protecting quiz answer keys. Absence surfaces as a
    /// runtime error on the endpoints that need it, not a startup failure.
    pub quiz_secret_key: Option<String>,

    /// Hex private key of the account that signs score-recording transactions.
    pub relayer_private_key: Option<String>,

    /// Gateway base for resolving ipfs:// URIs. Must end with a slash.
    pub ipfs_gateway: String,

    pub pinata_api_url: String,
    pub pinata_jwt: Option<String>,

    /// chainId -> network configuration for the supported networks.
    pub chains: HashMap<u64, ChainConfig>,

    pub rust_log: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let quiz_secret_key = env::var("QUIZ_SECRET_KEY").ok();
        let relayer_private_key = env::var("RELAYER_PRIVATE_KEY").ok();
        let pinata_jwt = env::var("PINATA_JWT").ok();

        let ipfs_gateway = env::var("IPFS_GATEWAY")
            .unwrap_or_else(|_| "https://gateway.pinata.cloud/ipfs/".to_string());

        let pinata_api_url =
            env::var("PINATA_API_URL").unwrap_or_else(|_| "https://api.pinata.cloud".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let mut chains = HashMap::new();
        chains.insert(
            AENEID_CHAIN_ID,
            ChainConfig {
                chain_id: AENEID_CHAIN_ID,
                rpc_url: env::var("AENEID_RPC_URL")
                    .unwrap_or_else(|_| AENEID_RPC_URL.to_string()),
                quiz_manager: env::var("AENEID_QUIZ_MANAGER")
                    .unwrap_or_else(|_| AENEID_QUIZ_MANAGER.to_string())
                    .parse()
                    .expect("AENEID_QUIZ_MANAGER must be a valid address"),
            },
        );
        chains.insert(
            MAINNET_CHAIN_ID,
            ChainConfig {
                chain_id: MAINNET_CHAIN_ID,
                rpc_url: env::var("MAINNET_RPC_URL")
                    .unwrap_or_else(|_| MAINNET_RPC_URL.to_string()),
                quiz_manager: env::var("MAINNET_QUIZ_MANAGER")
                    .unwrap_or_else(|_| MAINNET_QUIZ_MANAGER.to_string())
                    .parse()
                    .expect("MAINNET_QUIZ_MANAGER must be a valid address"),
            },
        );

        Self {
            quiz_secret_key,
            relayer_private_key,
            ipfs_gateway,
            pinata_api_url,
            pinata_jwt,
            chains,
            rust_log,
            port,
        }
    }
}
