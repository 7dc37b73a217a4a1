// Messaging crypto: AES-256-GCM keyed by SHA-256 of a shared mesh password.
//
// Wire format: hex(nonce[12]) ":" hex(ciphertext || tag[16]). Hex is written
// lowercase and accepted in either case.

use crate::domain::errors::{DecryptError, EncryptError};
use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const NONCE_LEN: usize = 12;
pub const MESH_KEY_LEN: usize = 16;

fn cipher_for(password: &str) -> Option<Aes256Gcm> {
    let digest = Sha256::digest(password.as_bytes());
    Aes256Gcm::new_from_slice(digest.as_slice()).ok()
}

/// Encrypts `plaintext` under `password` with a fresh random nonce.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String, EncryptError> {
    if password.is_empty() {
        return Err(EncryptError::EmptyPassword);
    }
    let cipher = cipher_for(password).ok_or(EncryptError::Cipher)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|_| EncryptError::Cipher)?;

    Ok(format!(
        "{}:{}",
        hex::encode(nonce_bytes),
        hex::encode(ciphertext)
    ))
}

/// Decrypts an envelope produced by [`encrypt`] (or any compatible encoder).
pub fn decrypt(envelope: &str, password: &str) -> Result<String, DecryptError> {
    if password.is_empty() {
        return Err(DecryptError::EmptyPassword);
    }

    let mut parts = envelope.split(':');
    let (nonce_hex, body_hex) = match (parts.next(), parts.next(), parts.next()) {
        (Some(nonce), Some(body), None) if !nonce.is_empty() && !body.is_empty() => (nonce, body),
        _ => return Err(DecryptError::MalformedEnvelope),
    };

    let nonce_bytes = hex::decode(nonce_hex).map_err(|_| DecryptError::InvalidHex)?;
    let ciphertext = hex::decode(body_hex).map_err(|_| DecryptError::InvalidHex)?;
    // Nonce::from_slice panics on the wrong length.
    if nonce_bytes.len() != NONCE_LEN {
        return Err(DecryptError::InvalidNonceLength(nonce_bytes.len()));
    }

    let cipher = cipher_for(password).ok_or(DecryptError::Authentication)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
        .map_err(|_| DecryptError::Authentication)?;

    String::from_utf8(plaintext).map_err(|_| DecryptError::InvalidUtf8)
}

/// Best-effort shape check for `nonce:ciphertext` envelopes.
///
/// Plaintext that happens to look like `<24 hex>:<hex>` is also reported as
/// encrypted; callers must treat a later decrypt failure as a normal outcome.
pub fn is_encrypted_envelope(content: &str) -> bool {
    let parts: Vec<&str> = content.split(':').collect();
    let [nonce_hex, body_hex] = parts.as_slice() else {
        return false;
    };

    nonce_hex.len() == NONCE_LEN * 2
        && is_hex(nonce_hex)
        && !body_hex.is_empty()
        && is_hex(body_hex)
}

fn is_hex(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Returns a shareable mesh password: 16 random bytes as 32 lowercase hex chars.
pub fn generate_mesh_key() -> String {
    let mut bytes = [0u8; MESH_KEY_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
