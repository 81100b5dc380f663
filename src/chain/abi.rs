// src/chain/abi.rs

use sha3::{Digest, Keccak256};

use super::Address;
use crate::error::AppError;

pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(result.as_slice());
    out
}

/// First four bytes of the Keccak-256 hash of the canonical signature,
/// e.g. `selector("setHasTried(address,uint256,uint256)")`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encodes an unsigned integer as a left-padded 32-byte word.
pub fn encode_uint(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encodes an address as a left-padded 32-byte word.
pub fn encode_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(&address.0);
    word
}

fn malformed() -> AppError {
    AppError::Chain("Malformed ABI response from contract".to_string())
}

/// Returns the `index`-th 32-byte word of an ABI-encoded response.
pub fn word(data: &[u8], index: usize) -> Result<&[u8], AppError> {
    data.get(index * 32..index * 32 + 32).ok_or_else(malformed)
}

pub fn decode_uint(word: &[u8]) -> Result<u128, AppError> {
    if word.len() != 32 || word[..16].iter().any(|b| *b != 0) {
        return Err(malformed());
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(bytes))
}

pub fn decode_u64(word: &[u8]) -> Result<u64, AppError> {
    u64::try_from(decode_uint(word)?).map_err(|_| malformed())
}

pub fn decode_bool(word: &[u8]) -> Result<bool, AppError> {
    if word.len() != 32 {
        return Err(malformed());
    }
    Ok(word[31] != 0)
}

/// Decodes a dynamic string whose offset lives in the `index`-th head word.
pub fn decode_string(data: &[u8], index: usize) -> Result<String, AppError> {
    let offset = usize::try_from(decode_uint(word(data, index)?)?).map_err(|_| malformed())?;
    let len_word = data.get(offset..offset + 32).ok_or_else(malformed)?;
    let len = usize::try_from(decode_uint(len_word)?).map_err(|_| malformed())?;
    let bytes = data
        .get(offset + 32..offset + 32 + len)
        .ok_or_else(malformed)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| malformed())
}

/// Strips the `0x` prefix and decodes an RPC hex payload.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, AppError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(|_| AppError::Chain(format!("Invalid hex in RPC response: {}", value)))
}

pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
