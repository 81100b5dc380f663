// src/chain/mod.rs

pub mod abi;
pub mod registry;
pub mod rpc;
pub mod tx;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{config::ChainConfig, error::AppError};

pub use registry::RpcQuizRegistry;
pub use tx::Signer;

/// A 20-byte EVM account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl FromStr for Address {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|_| AppError::Validation(format!("Invalid address: {}", s)))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AppError::Validation(format!("Invalid address: {}", s)))?;
        Ok(Address(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The quiz registry contract's `quizzes(uint256)` tuple, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainQuiz {
    pub max_trials: u64,
    pub min_score: u64,
    pub exists: bool,
    pub deadline: u64,
    pub prize_amount: u128,
    pub metadata_uri: String,
}

/// Seam over the on-chain quiz registry (QuizManager).
///
/// The production implementation talks JSON-RPC to the network named by the
/// `ChainConfig`; tests substitute an in-memory fake.
#[async_trait]
pub trait QuizRegistry: Send + Sync {
    /// Reads the quiz tuple for `quiz_id` from the registry contract.
    async fn quiz(&self, chain: &ChainConfig, quiz_id: u64) -> Result<OnChainQuiz, AppError>;

    /// Records a scored attempt on-chain via `setHasTried(user, score, quizId)`,
    /// signed by the relayer account. Returns the transaction hash.
    async fn record_attempt(
        &self,
        chain: &ChainConfig,
        user: Address,
        score: u64,
        quiz_id: u64,
    ) -> Result<String, AppError>;
}
