//! clob-signer: order construction and request signing for the Polymarket CLOB
//!
//! This is the root crate that ties the workspace together for integration
//! tests, benchmarks and the demo. For actual functionality, use the
//! individual crates directly:
//!
//! - `clob-core`: amount rounding, EIP-712 order and auth signing, order
//!   builder, authentication headers
//! - `auth`: private key handling, address derivation, HMAC session signing

pub use auth;
pub use clob_core as core;
