//! Error types for wallet and session authentication.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid key material: {message}")]
    InvalidKeyMaterial { message: String },

    #[error("Invalid API secret encoding: {message}")]
    InvalidSecret { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, AuthError>;
