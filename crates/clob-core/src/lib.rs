//! CLOB Core Library
//!
//! Order construction, amount rounding, EIP-712 signing and authentication
//! headers for the Polymarket CLOB. Everything here is synchronous and
//! performs no I/O.

pub mod amounts;
pub mod config;
pub mod error;
pub mod headers;
pub mod order_builder;
pub mod salt;
pub mod signing;
pub mod types;

pub use amounts::{calculate_order_amounts, round_decimal, validate_price, RoundConfig, TickSize};
pub use config::ClobConfig;
pub use error::{Error, Result};
pub use headers::{
    create_l1_headers, create_l1_headers_at, create_l2_headers, create_l2_headers_at,
    inject_builder_headers, BuilderHeaders, L1Headers, L2Headers,
};
pub use order_builder::OrderBuilder;
pub use salt::{generate_salt, OsRandom, RandomSource};
pub use signing::{ExchangeRegistry, OrderSigner, PostOrderRequest, SignedOrder, UnsignedOrder};
pub use types::{CreateOrderOptions, OrderType, Side, SignatureType, UserMarketOrder, UserOrder};
