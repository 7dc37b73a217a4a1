// Domain-level errors for the store and the messaging crypto.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncryptError {
    #[error("encryption password must not be empty")]
    EmptyPassword,
    #[error("failed to encrypt message")]
    Cipher,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecryptError {
    #[error("decryption password must not be empty")]
    EmptyPassword,
    #[error("envelope must be two non-empty fields separated by a single ':'")]
    MalformedEnvelope,
    #[error("envelope contains invalid hex")]
    InvalidHex,
    #[error("nonce must be 12 bytes, got {0}")]
    InvalidNonceLength(usize),
    #[error("authentication failed (wrong key or tampered message)")]
    Authentication,
    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unit id {0} already exists")]
    DuplicateUnit(String),
    #[error("command requires at least one target unit")]
    EmptyTargets,
    #[error("message content must not be empty")]
    EmptyContent,
    #[error("message {0} not found")]
    MessageNotFound(String),
    #[error("command {0} not found")]
    CommandNotFound(String),
    #[error(transparent)]
    Encrypt(#[from] EncryptError),
}
