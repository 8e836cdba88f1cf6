//! EIP-712 signing for Polymarket CLOB orders and authentication.
//!
//! # Architecture
//!
//! ```text
//! PrivateKey (auth crate)
//!       │
//!       ▼
//! OrderSigner ─── signs ──► SignedOrder
//!       │
//!       └── ClobAuth ──► L1 headers
//! ```
//!
//! # Example
//!
//! ```ignore
//! use clob_core::signing::{ExchangeDomain, OrderSigner};
//!
//! let signer = OrderSigner::new(ExchangeDomain::ctf_exchange());
//! let signed = signer.sign_order(&key, &unsigned)?;
//! ```

pub mod domain;
pub mod order_types;
pub mod signer;

pub use domain::{
    ClobAuthDomain, ExchangeDomain, ExchangeRegistry, AMOY_CTF_EXCHANGE_ADDRESS,
    CTF_EXCHANGE_ADDRESS, NEG_RISK_CTF_EXCHANGE_ADDRESS, POLYGON_AMOY_CHAIN_ID, POLYGON_CHAIN_ID,
};

pub use order_types::{PostOrderRequest, SignedOrder, UnsignedOrder};

pub use signer::{
    build_clob_auth_signature, clob_auth_digest, compute_typed_data_hash, recover_signer,
    sign_digest, OrderSigner, CLOB_AUTH_MESSAGE,
};
