//! Price validation and maker/taker amount calculation.
//!
//! Human-facing price and size are rounded to the precision implied by the
//! market's tick size, then scaled to 6-decimal base units. The two rounding
//! passes are intentional and must match what the exchange expects.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::Side;
use crate::{Error, Result};

/// USDC and outcome tokens both use 6 decimals.
pub const BASE_UNIT_DECIMALS: u32 = 6;

/// Minimum price increment of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TickSize {
    /// 0.1
    Tenth,
    /// 0.01
    #[default]
    Hundredth,
    /// 0.001
    Thousandth,
    /// 0.0001
    TenThousandth,
}

impl TickSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickSize::Tenth => "0.1",
            TickSize::Hundredth => "0.01",
            TickSize::Thousandth => "0.001",
            TickSize::TenThousandth => "0.0001",
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        match self {
            TickSize::Tenth => Decimal::new(1, 1),
            TickSize::Hundredth => Decimal::new(1, 2),
            TickSize::Thousandth => Decimal::new(1, 3),
            TickSize::TenThousandth => Decimal::new(1, 4),
        }
    }

    /// Fixed rounding precision for this tick size.
    pub fn round_config(&self) -> RoundConfig {
        let digits = match self {
            TickSize::Tenth => 1,
            TickSize::Hundredth => 2,
            TickSize::Thousandth => 3,
            TickSize::TenThousandth => 4,
        };
        RoundConfig {
            price: digits,
            size: digits,
            amount: digits,
        }
    }
}

impl std::fmt::Display for TickSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TickSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0.1" => Ok(TickSize::Tenth),
            "0.01" => Ok(TickSize::Hundredth),
            "0.001" => Ok(TickSize::Thousandth),
            "0.0001" => Ok(TickSize::TenThousandth),
            other => Err(Error::UnsupportedTickSize(other.to_string())),
        }
    }
}

impl TryFrom<String> for TickSize {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TickSize> for String {
    fn from(tick: TickSize) -> Self {
        tick.as_str().to_string()
    }
}

/// Decimal precision for the price, size and notional legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub price: u32,
    pub size: u32,
    pub amount: u32,
}

/// Round to `precision` decimal digits, half away from zero.
pub fn round_decimal(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate that a price lies in (0, 1] and sits on the tick grid.
///
/// A remainder within `tick / 100` of either grid line is accepted.
pub fn validate_price(price: Decimal, tick_size: TickSize) -> Result<()> {
    check_price_range(price)?;

    let tick = tick_size.as_decimal();
    let epsilon = tick / Decimal::from(100u32);
    let remainder = price % tick;

    if remainder > epsilon && (tick - remainder) > epsilon {
        return Err(Error::InvalidPrice {
            message: format!("price {} must be a multiple of tick size {}", price, tick_size),
        });
    }

    Ok(())
}

fn check_price_range(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO || price > Decimal::ONE {
        return Err(Error::InvalidPrice {
            message: format!("price {} must be in (0, 1]", price),
        });
    }
    Ok(())
}

/// Compute the human-readable maker and taker legs.
///
/// BUY: maker gives `price * size` collateral, receives `size` tokens.
/// SELL: maker gives `size` tokens, receives `price * size` collateral.
pub fn compute_legs(
    price: Decimal,
    size: Decimal,
    side: Side,
    round_config: RoundConfig,
) -> Result<(Decimal, Decimal)> {
    check_price_range(price)?;

    if size <= Decimal::ZERO {
        return Err(Error::InvalidSize {
            message: format!("size {} must be positive", size),
        });
    }

    let notional = price.checked_mul(size).ok_or_else(|| Error::InvalidSize {
        message: format!("price {} * size {} overflows", price, size),
    })?;

    let notional_leg = round_decimal(notional, round_config.amount);
    let size_leg = round_decimal(size, round_config.size);

    Ok(match side {
        Side::Buy => (notional_leg, size_leg),
        Side::Sell => (size_leg, notional_leg),
    })
}

/// Scale a decimal amount to base units and round to the nearest integer.
pub fn to_base_units(value: Decimal) -> Result<String> {
    let scale = Decimal::from(10u64.pow(BASE_UNIT_DECIMALS));
    let scaled = value.checked_mul(scale).ok_or_else(|| Error::InvalidSize {
        message: format!("amount {} overflows base units", value),
    })?;

    Ok(round_decimal(scaled, 0).to_string())
}

/// Compute both legs and convert them to base-unit integer strings.
pub fn calculate_order_amounts(
    price: Decimal,
    size: Decimal,
    side: Side,
    round_config: RoundConfig,
) -> Result<(String, String)> {
    let (maker, taker) = compute_legs(price, size, side, round_config)?;
    Ok((to_base_units(maker)?, to_base_units(taker)?))
}
