// src/utils/crypto.rs

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

use crate::error::AppError;

const NONCE_LEN: usize = 12;

fn cipher_for(secret: &str) -> Result<Aes256Gcm, AppError> {
    // The configured secret is a passphrase, not raw key material.
    let key = Sha256::digest(secret.as_bytes());
    Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| AppError::Internal(format!("Failed to build cipher: {}", e)))
}

/// Encrypts a plaintext answer set under the server secret.
///
/// Output is base64 over `nonce || ciphertext`; the nonce is random per
/// call, so two encryptions of the same input differ.
pub fn encrypt(plaintext: &str, secret: &str) -> Result<String, AppError> {
    let cipher = cipher_for(secret)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| AppError::Internal(format!("Encryption failed: {}", e)))?;

    let mut combined = nonce.to_vec();
    combined.extend(ciphertext);
    Ok(STANDARD.encode(combined))
}

/// Reverses `encrypt`. Fails on malformed base64, a truncated payload, a
/// wrong secret, or tampered ciphertext.
pub fn decrypt(encoded: &str, secret: &str) -> Result<String, AppError> {
    let combined = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::Decryption("Encrypted payload is not valid base64".to_string()))?;

    if combined.len() < NONCE_LEN {
        return Err(AppError::Decryption(
            "Encrypted payload is too short".to_string(),
        ));
    }

    let (nonce, ciphertext) = combined.split_at(NONCE_LEN);
    let cipher = cipher_for(secret)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| AppError::Decryption("Failed to decrypt answer key".to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| AppError::Decryption("Decrypted payload is not valid UTF-8".to_string()))
}
