//! User-facing order request types.

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amounts::TickSize;
use crate::{Error, Result};

/// Side of the order (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Numeric value used in the signed order (`uint8 side`).
    pub fn as_u8(&self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// How the maker's funds are held, as understood by the exchange contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SignatureType {
    /// Externally owned account signing for itself.
    #[default]
    Eoa,
    /// EOA signing on behalf of a Polymarket proxy wallet.
    PolyProxy,
    /// EOA signing on behalf of a Gnosis Safe.
    PolyGnosisSafe,
}

impl SignatureType {
    /// Numeric value used in the signed order (`uint8 signatureType`).
    pub fn as_u8(&self) -> u8 {
        match self {
            SignatureType::Eoa => 0,
            SignatureType::PolyProxy => 1,
            SignatureType::PolyGnosisSafe => 2,
        }
    }
}

impl TryFrom<u8> for SignatureType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SignatureType::Eoa),
            1 => Ok(SignatureType::PolyProxy),
            2 => Ok(SignatureType::PolyGnosisSafe),
            other => Err(Error::Config {
                message: format!("unknown signature type {}", other),
            }),
        }
    }
}

impl From<SignatureType> for u8 {
    fn from(value: SignatureType) -> Self {
        value.as_u8()
    }
}

/// Time-in-force of a posted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Good-till-cancelled limit order.
    #[default]
    Gtc,
    /// Fill-or-kill market order.
    Fok,
    /// Good-till-date limit order.
    Gtd,
    /// Fill-and-kill: fill what is available, cancel the rest.
    Fak,
}

/// A limit order as requested by a user.
///
/// Optional fields fall back to the exchange defaults when the order is
/// built: no taker restriction, nonce 0, no expiration, fee rate 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrder {
    /// Outcome token id (decimal string).
    #[serde(rename = "tokenID")]
    pub token_id: String,
    /// Price per token in (0, 1].
    pub price: Decimal,
    /// Number of outcome tokens.
    pub size: Decimal,
    pub side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_rate_bps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    /// Unix seconds; `None` means the order never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u64>,
    /// Restrict the order to a single counterparty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taker: Option<Address>,
}

impl UserOrder {
    pub fn new(token_id: impl Into<String>, price: Decimal, size: Decimal, side: Side) -> Self {
        Self {
            token_id: token_id.into(),
            price,
            size,
            side,
            fee_rate_bps: None,
            nonce: None,
            expiration: None,
            taker: None,
        }
    }

    pub fn with_fee_rate_bps(mut self, fee_rate_bps: u32) -> Self {
        self.fee_rate_bps = Some(fee_rate_bps);
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_expiration(mut self, expiration: u64) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn with_taker(mut self, taker: Address) -> Self {
        self.taker = Some(taker);
        self
    }
}

/// A market order as requested by a user.
///
/// For BUY orders `amount` is collateral to spend; for SELL orders it is the
/// number of tokens to sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMarketOrder {
    #[serde(rename = "tokenID")]
    pub token_id: String,
    /// Worst acceptable price. Defaults to 1 for BUY and one tick for SELL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    pub amount: Decimal,
    pub side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_rate_bps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taker: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
}

impl UserMarketOrder {
    pub fn new(token_id: impl Into<String>, amount: Decimal, side: Side) -> Self {
        Self {
            token_id: token_id.into(),
            price: None,
            amount,
            side,
            fee_rate_bps: None,
            nonce: None,
            taker: None,
            order_type: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Convert to a limit-style order at the resolved worst price.
    pub fn to_user_order(&self, tick_size: TickSize) -> Result<UserOrder> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidSize {
                message: format!("amount {} must be positive", self.amount),
            });
        }

        let price = self.price.unwrap_or(match self.side {
            Side::Buy => Decimal::ONE,
            Side::Sell => tick_size.as_decimal(),
        });

        let size = match self.side {
            Side::Buy => {
                if price <= Decimal::ZERO {
                    return Err(Error::InvalidPrice {
                        message: format!("price {} must be in (0, 1]", price),
                    });
                }
                self.amount.checked_div(price).ok_or_else(|| Error::InvalidSize {
                    message: format!("amount {} / price {} overflows", self.amount, price),
                })?
            }
            Side::Sell => self.amount,
        };

        Ok(UserOrder {
            token_id: self.token_id.clone(),
            price,
            size,
            side: self.side,
            fee_rate_bps: self.fee_rate_bps,
            nonce: self.nonce,
            expiration: None,
            taker: self.taker,
        })
    }
}

/// Per-market options that affect how an order is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderOptions {
    pub tick_size: TickSize,
    /// Sign against the neg-risk exchange contract.
    #[serde(default)]
    pub neg_risk: bool,
}

impl CreateOrderOptions {
    pub fn new(tick_size: TickSize) -> Self {
        Self {
            tick_size,
            neg_risk: false,
        }
    }

    pub fn neg_risk(mut self, neg_risk: bool) -> Self {
        self.neg_risk = neg_risk;
        self
    }
}
