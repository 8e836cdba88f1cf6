//! Error types for order construction and signing.

use auth::AuthError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid key material: {message}")]
    InvalidKeyMaterial { message: String },

    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    #[error("Invalid size: {message}")]
    InvalidSize { message: String },

    #[error("Unsupported tick size: {0}")]
    UnsupportedTickSize(String),

    #[error("No exchange contract configured for chain id {chain_id}")]
    UnsupportedChain { chain_id: u64 },

    #[error("Typed data hashing failed: {message}")]
    HashingFailure { message: String },

    #[error("Signing error: {message}")]
    SigningFailure { message: String },

    #[error("Secure random source unavailable: {message}")]
    RandomnessFailure { message: String },

    #[error("Invalid API secret encoding: {message}")]
    InvalidSecret { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidKeyMaterial { message } => Error::InvalidKeyMaterial { message },
            AuthError::InvalidSecret { message } => Error::InvalidSecret { message },
            AuthError::Config { message } => Error::Config { message },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
