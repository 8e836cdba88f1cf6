//! Private key material and address derivation.
//!
//! Keys are held in a [`PrivateKey`] that wipes its bytes on drop. A
//! [`PrivateKeySigner`] is only materialized for the duration of a single
//! signing call and dropped right after.

use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{AuthError, Result};

/// Length of a secp256k1 private scalar in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// A secp256k1 private key, zeroed from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_LEN],
}

impl PrivateKey {
    /// Parse a hex-encoded private key.
    ///
    /// Accepts 64 hex characters, optionally prefixed with "0x" and
    /// surrounded by whitespace. The value must be a valid non-zero scalar
    /// below the curve order.
    pub fn from_hex(key: &str) -> Result<Self> {
        let trimmed = key.trim();
        let key_clean = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if key_clean.len() != PRIVATE_KEY_LEN * 2 {
            return Err(invalid_key(format!(
                "expected {} hex characters, got {}",
                PRIVATE_KEY_LEN * 2,
                key_clean.len()
            )));
        }

        let mut key = Self {
            bytes: [0u8; PRIVATE_KEY_LEN],
        };
        hex::decode_to_slice(key_clean, &mut key.bytes)
            .map_err(|e| invalid_key(format!("not valid hex: {}", e)))?;

        // Reject zero and out-of-range scalars up front
        key.signer()?;
        Ok(key)
    }

    /// Build a private key from raw big-endian scalar bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(invalid_key(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_LEN,
                bytes.len()
            )));
        }

        let mut key = Self {
            bytes: [0u8; PRIVATE_KEY_LEN],
        };
        key.bytes.copy_from_slice(bytes);
        key.signer()?;
        Ok(key)
    }

    /// Materialize a signer for this key.
    ///
    /// The returned signer owns its own copy of the scalar; drop it as soon
    /// as the signing call is done.
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        PrivateKeySigner::from_slice(&self.bytes)
            .map_err(|e| invalid_key(format!("not a valid secp256k1 scalar: {}", e)))
    }

    /// Derive the Ethereum address controlled by this key.
    pub fn address(&self) -> Result<Address> {
        derive_address(self)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

impl std::str::FromStr for PrivateKey {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Derive the Ethereum address for a private key.
///
/// Deterministic: the same key always yields the same address.
pub fn derive_address(key: &PrivateKey) -> Result<Address> {
    let signer = key.signer()?;
    Ok(signer.address())
}

/// Check whether a string is a 20-byte hex address (with or without "0x").
pub fn is_valid_address(address: &str) -> bool {
    address.parse::<Address>().is_ok()
}

fn invalid_key(message: String) -> AuthError {
    AuthError::InvalidKeyMaterial { message }
}

/// A trading wallet: private key plus its derived address.
#[derive(Clone)]
pub struct TradingWallet {
    key: PrivateKey,
    address: Address,
}

impl TradingWallet {
    /// Load wallet from the `WALLET_PRIVATE_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or
    /// if the private key format is invalid.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let private_key = std::env::var("WALLET_PRIVATE_KEY").map_err(|_| AuthError::Config {
            message: "WALLET_PRIVATE_KEY environment variable not set".to_string(),
        })?;

        Self::from_private_key(&private_key)
    }

    /// Create a wallet from a hex-encoded private key.
    pub fn from_private_key(key: &str) -> Result<Self> {
        let key = PrivateKey::from_hex(key)?;
        let address = derive_address(&key)?;
        tracing::debug!(address = %address, "Loaded trading wallet");

        Ok(Self { key, address })
    }

    /// Get the wallet's Ethereum address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the wallet address as an EIP-55 checksummed hex string.
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Borrow the key for a signing call.
    pub fn key(&self) -> &PrivateKey {
        &self.key
    }
}

impl std::fmt::Debug for TradingWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the private key in debug output
        f.debug_struct("TradingWallet")
            .field("address", &self.address_string())
            .finish()
    }
}
