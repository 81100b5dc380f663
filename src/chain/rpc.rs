// src/chain/rpc.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Minimal Ethereum JSON-RPC client over a shared HTTP connection pool.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub async fn call(&self, url: &str, method: &str, params: Value) -> Result<Value, AppError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Chain(format!("RPC transport error: {}", e)))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| AppError::Chain(format!("Invalid RPC response: {}", e)))?;

        if let Some(err) = body.error {
            return Err(AppError::Chain(format!(
                "RPC error {} for {}: {}",
                err.code, method, err.message
            )));
        }

        body.result
            .ok_or_else(|| AppError::Chain(format!("RPC response for {} missing result", method)))
    }

    /// Calls a method whose result is a hex quantity or hex data string.
    pub async fn call_hex(&self, url: &str, method: &str, params: Value) -> Result<String, AppError> {
        let result = self.call(url, method, params).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Chain(format!("RPC result for {} is not a string", method)))
    }

    /// Calls a method and parses the hex quantity result as u64.
    pub async fn call_u64(&self, url: &str, method: &str, params: Value) -> Result<u64, AppError> {
        let hex = self.call_hex(url, method, params).await?;
        parse_quantity_u64(&hex)
    }

    /// Calls a method and parses the hex quantity result as u128.
    pub async fn call_u128(&self, url: &str, method: &str, params: Value) -> Result<u128, AppError> {
        let hex = self.call_hex(url, method, params).await?;
        parse_quantity_u128(&hex)
    }
}

pub fn parse_quantity_u64(value: &str) -> Result<u64, AppError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    u64::from_str_radix(stripped, 16)
        .map_err(|_| AppError::Chain(format!("Invalid hex quantity: {}", value)))
}

pub fn parse_quantity_u128(value: &str) -> Result<u128, AppError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    u128::from_str_radix(stripped, 16)
        .map_err(|_| AppError::Chain(format!("Invalid hex quantity: {}", value)))
}
