// src/chain/registry.rs

use async_trait::async_trait;
use serde_json::json;

use super::{Address, OnChainQuiz, QuizRegistry, abi, rpc::RpcClient, tx::Signer};
use crate::{config::ChainConfig, error::AppError};

const QUIZZES_SIGNATURE: &str = "quizzes(uint256)";
const SET_HAS_TRIED_SIGNATURE: &str = "setHasTried(address,uint256,uint256)";

/// `QuizRegistry` backed by Ethereum JSON-RPC against the QuizManager
/// deployment named in each `ChainConfig`.
pub struct RpcQuizRegistry {
    rpc: RpcClient,
    signer: Option<Signer>,
}

impl RpcQuizRegistry {
    pub fn new(http: reqwest::Client, signer: Option<Signer>) -> Self {
        Self {
            rpc: RpcClient::new(http),
            signer,
        }
    }
}

/// Decodes the `quizzes(uint256)` return tuple:
/// `(uint256 maxTrials, uint256 minScore, bool exists, uint256 deadline,
///   uint256 prizeAmount, string metadataURI)`.
pub fn decode_quiz(data: &[u8]) -> Result<OnChainQuiz, AppError> {
    Ok(OnChainQuiz {
        max_trials: abi::decode_u64(abi::word(data, 0)?)?,
        min_score: abi::decode_u64(abi::word(data, 1)?)?,
        exists: abi::decode_bool(abi::word(data, 2)?)?,
        deadline: abi::decode_u64(abi::word(data, 3)?)?,
        prize_amount: abi::decode_uint(abi::word(data, 4)?)?,
        metadata_uri: abi::decode_string(data, 5)?,
    })
}

#[async_trait]
impl QuizRegistry for RpcQuizRegistry {
    async fn quiz(&self, chain: &ChainConfig, quiz_id: u64) -> Result<OnChainQuiz, AppError> {
        let mut calldata = abi::selector(QUIZZES_SIGNATURE).to_vec();
        calldata.extend_from_slice(&abi::encode_uint(quiz_id as u128));

        let result = self
            .rpc
            .call_hex(
                &chain.rpc_url,
                "eth_call",
                json!([
                    {
                        "to": chain.quiz_manager.to_string(),
                        "data": abi::encode_hex(&calldata),
                    },
                    "latest"
                ]),
            )
            .await?;

        decode_quiz(&abi::decode_hex(&result)?)
    }

    async fn record_attempt(
        &self,
        chain: &ChainConfig,
        user: Address,
        score: u64,
        quiz_id: u64,
    ) -> Result<String, AppError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Relayer private key not set".to_string()))?;

        let mut calldata = abi::selector(SET_HAS_TRIED_SIGNATURE).to_vec();
        calldata.extend_from_slice(&abi::encode_address(&user));
        calldata.extend_from_slice(&abi::encode_uint(score as u128));
        calldata.extend_from_slice(&abi::encode_uint(quiz_id as u128));

        let nonce = self
            .rpc
            .call_u64(
                &chain.rpc_url,
                "eth_getTransactionCount",
                json!([signer.address.to_string(), "pending"]),
            )
            .await?;

        let gas_price = self
            .rpc
            .call_u128(&chain.rpc_url, "eth_gasPrice", json!([]))
            .await?;

        let estimate = self
            .rpc
            .call_u64(
                &chain.rpc_url,
                "eth_estimateGas",
                json!([
                    {
                        "from": signer.address.to_string(),
                        "to": chain.quiz_manager.to_string(),
                        "data": abi::encode_hex(&calldata),
                    }
                ]),
            )
            .await?;
        let gas_limit = estimate.saturating_add(estimate / 5);

        let raw = signer.sign_legacy(
            chain.chain_id,
            nonce,
            gas_price,
            gas_limit,
            chain.quiz_manager,
            0,
            &calldata,
        )?;

        let tx_hash = self
            .rpc
            .call_hex(&chain.rpc_url, "eth_sendRawTransaction", json!([raw]))
            .await?;

        tracing::info!(
            "Recorded attempt on chain {}: user={} score={} quiz={} tx={}",
            chain.chain_id,
            user,
            score,
            quiz_id,
            tx_hash
        );

        Ok(tx_hash)
    }
}
