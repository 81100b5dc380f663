// src/chain/tx.rs

use k256::ecdsa::SigningKey;

use super::{Address, abi};
use crate::error::AppError;

/// The relayer account: a secp256k1 key plus its derived address.
#[derive(Clone)]
pub struct Signer {
    key: SigningKey,
    pub address: Address,
}

impl Signer {
    /// Builds a signer from a hex-encoded 32-byte private key.
    pub fn from_hex(private_key: &str) -> Result<Self, AppError> {
        let stripped = private_key.strip_prefix("0x").unwrap_or(private_key);
        let bytes = hex::decode(stripped)
            .map_err(|_| AppError::Configuration("Relayer private key is not valid hex".to_string()))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| AppError::Configuration("Relayer private key is invalid".to_string()))?;

        // keccak256 of the uncompressed public key (minus the 0x04 tag),
        // last 20 bytes.
        let public = key.verifying_key().to_encoded_point(false);
        let hash = abi::keccak256(&public.as_bytes()[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);

        Ok(Self {
            key,
            address: Address(address),
        })
    }

    /// Signs a legacy (EIP-155) transaction and returns the raw RLP payload
    /// as a 0x-prefixed hex string ready for `eth_sendRawTransaction`.
    pub fn sign_legacy(
        &self,
        chain_id: u64,
        nonce: u64,
        gas_price: u128,
        gas_limit: u64,
        to: Address,
        value: u128,
        data: &[u8],
    ) -> Result<String, AppError> {
        let mut payload = Vec::new();
        rlp_uint(&mut payload, nonce as u128);
        rlp_uint(&mut payload, gas_price);
        rlp_uint(&mut payload, gas_limit as u128);
        rlp_bytes(&mut payload, &to.0);
        rlp_uint(&mut payload, value);
        rlp_bytes(&mut payload, data);
        rlp_uint(&mut payload, chain_id as u128);
        rlp_uint(&mut payload, 0);
        rlp_uint(&mut payload, 0);

        let digest = abi::keccak256(&rlp_list(payload));
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| AppError::Chain(format!("Failed to sign transaction: {}", e)))?;

        let v = chain_id * 2 + 35 + u64::from(recovery_id.to_byte());
        let r = signature.r().to_bytes();
        let s = signature.s().to_bytes();

        let mut signed = Vec::new();
        rlp_uint(&mut signed, nonce as u128);
        rlp_uint(&mut signed, gas_price);
        rlp_uint(&mut signed, gas_limit as u128);
        rlp_bytes(&mut signed, &to.0);
        rlp_uint(&mut signed, value);
        rlp_bytes(&mut signed, data);
        rlp_uint(&mut signed, v as u128);
        rlp_integer_bytes(&mut signed, r.as_slice());
        rlp_integer_bytes(&mut signed, s.as_slice());

        Ok(abi::encode_hex(&rlp_list(signed)))
    }
}

// Minimal RLP encoding: the only shapes a legacy transaction needs are byte
// strings, unsigned integers, and one outer list.

fn rlp_bytes(out: &mut Vec<u8>, data: &[u8]) {
    if data.len() == 1 && data[0] < 0x80 {
        out.push(data[0]);
    } else if data.len() <= 55 {
        out.push(0x80 + data.len() as u8);
        out.extend_from_slice(data);
    } else {
        let len_be = (data.len() as u64).to_be_bytes();
        let len_bytes = trim_leading_zeros(&len_be);
        out.push(0xb7 + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes);
        out.extend_from_slice(data);
    }
}

fn rlp_uint(out: &mut Vec<u8>, value: u128) {
    rlp_bytes(out, trim_leading_zeros(&value.to_be_bytes()));
}

/// Big-endian integer bytes (such as signature r/s) must drop leading zeros
/// before RLP encoding.
fn rlp_integer_bytes(out: &mut Vec<u8>, data: &[u8]) {
    rlp_bytes(out, trim_leading_zeros(data));
}

fn rlp_list(payload: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    if payload.len() <= 55 {
        out.push(0xc0 + payload.len() as u8);
    } else {
        let len_be = (payload.len() as u64).to_be_bytes();
        let len_bytes = trim_leading_zeros(&len_be);
        out.push(0xf7 + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes);
    }
    out.extend(payload);
    out
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}
