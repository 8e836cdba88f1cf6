//! Authentication primitives
//!
//! Private key handling, address derivation, and HMAC session signing.

pub mod error;
pub mod session;
pub mod wallet;

pub use error::{AuthError, Result};
pub use session::{build_hmac_signature, ApiCredentials};
pub use wallet::{derive_address, is_valid_address, PrivateKey, TradingWallet};
