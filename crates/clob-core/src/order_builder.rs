//! Order construction.
//!
//! Turns a human-facing [`UserOrder`] into a signed exchange order: resolves
//! maker and signer, rounds and scales the amounts, draws a salt, fills in
//! defaults and signs.

use std::sync::Arc;

use alloy_primitives::Address;
use auth::PrivateKey;
use tracing::{debug, info};

use crate::amounts::{calculate_order_amounts, validate_price};
use crate::config::ClobConfig;
use crate::salt::{generate_salt, OsRandom, RandomSource};
use crate::signing::domain::ExchangeRegistry;
use crate::signing::order_types::{SignedOrder, UnsignedOrder};
use crate::signing::signer::OrderSigner;
use crate::types::{CreateOrderOptions, SignatureType, UserMarketOrder, UserOrder};
use crate::Result;

/// Builds and signs orders for one chain.
///
/// Holds no key material and no per-order state, so one builder can be
/// shared across threads.
#[derive(Clone)]
pub struct OrderBuilder {
    chain_id: u64,
    signature_type: SignatureType,
    funder: Option<Address>,
    exchanges: ExchangeRegistry,
    rng: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for OrderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBuilder")
            .field("chain_id", &self.chain_id)
            .field("signature_type", &self.signature_type)
            .field("funder", &self.funder)
            .field("exchanges", &self.exchanges)
            .finish_non_exhaustive()
    }
}

impl OrderBuilder {
    /// Create a builder using the default exchange registry and the OS CSPRNG.
    pub fn new(chain_id: u64, signature_type: SignatureType, funder: Option<Address>) -> Self {
        Self {
            chain_id,
            signature_type,
            funder,
            exchanges: ExchangeRegistry::default(),
            rng: Arc::new(OsRandom),
        }
    }

    /// Create a builder from loaded configuration.
    pub fn from_config(config: &ClobConfig) -> Self {
        Self::new(config.chain_id, config.signature_type, config.funder)
            .with_exchanges(config.exchange_registry())
    }

    pub fn with_exchanges(mut self, exchanges: ExchangeRegistry) -> Self {
        self.exchanges = exchanges;
        self
    }

    /// Replace the salt source, e.g. with a seeded one in tests.
    pub fn with_random_source(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn signature_type(&self) -> SignatureType {
        self.signature_type
    }

    pub fn funder(&self) -> Option<Address> {
        self.funder
    }

    /// The order signer for the given market options.
    pub fn signer_for(&self, options: &CreateOrderOptions) -> Result<OrderSigner> {
        let domain = self.exchanges.domain(self.chain_id, options.neg_risk)?;
        Ok(OrderSigner::new(domain))
    }

    /// Build the unsigned order without signing it.
    pub fn build_unsigned(
        &self,
        key: &PrivateKey,
        order: &UserOrder,
        options: &CreateOrderOptions,
    ) -> Result<UnsignedOrder> {
        let signer = key.address()?;
        let maker = self.funder.unwrap_or(signer);

        let tick_size = options.tick_size;
        validate_price(order.price, tick_size)?;
        let (maker_amount, taker_amount) =
            calculate_order_amounts(order.price, order.size, order.side, tick_size.round_config())?;

        let salt = generate_salt(self.rng.as_ref())?;

        Ok(UnsignedOrder {
            salt,
            maker,
            signer,
            taker: order.taker.unwrap_or(Address::ZERO),
            token_id: order.token_id.clone(),
            maker_amount,
            taker_amount,
            expiration: order.expiration.unwrap_or(0).to_string(),
            nonce: order.nonce.unwrap_or(0).to_string(),
            fee_rate_bps: order.fee_rate_bps.unwrap_or(0).to_string(),
            side: order.side,
            signature_type: self.signature_type,
        })
    }

    /// Build and sign a limit order.
    pub fn build_order(
        &self,
        key: &PrivateKey,
        order: &UserOrder,
        options: &CreateOrderOptions,
    ) -> Result<SignedOrder> {
        // Resolve the domain first so an unsupported chain fails before any work
        let signer = self.signer_for(options)?;
        let unsigned = self.build_unsigned(key, order, options)?;

        debug!(
            token_id = %unsigned.token_id,
            side = %unsigned.side,
            maker_amount = %unsigned.maker_amount,
            taker_amount = %unsigned.taker_amount,
            salt = unsigned.salt,
            "Order amounts computed"
        );

        let signed = signer.sign_order(key, &unsigned)?;

        info!(
            maker = %signed.maker,
            signer = %signed.signer,
            chain_id = self.chain_id,
            neg_risk = options.neg_risk,
            side = %signed.side,
            price = %order.price,
            size = %order.size,
            "Order signed"
        );

        Ok(signed)
    }

    /// Build and sign a market order.
    ///
    /// The order is priced at the worst acceptable price and sized from the
    /// requested amount; see [`UserMarketOrder::to_user_order`].
    pub fn build_market_order(
        &self,
        key: &PrivateKey,
        order: &UserMarketOrder,
        options: &CreateOrderOptions,
    ) -> Result<SignedOrder> {
        let limit = order.to_user_order(options.tick_size)?;
        self.build_order(key, &limit, options)
    }
}
