//! Build, sign and authenticate a single order without sending it.
//!
//! Run with:
//! ```
//! WALLET_PRIVATE_KEY=0x... cargo run --example sign_order -- <token_id> <BUY|SELL> <price> <size>
//! ```
//!
//! Optional: `CLOB_*` variables for chain, signature type and funder, and
//! `POLY_API_KEY` / `POLY_API_SECRET` / `POLY_API_PASSPHRASE` to also print
//! the L2 headers for posting the order.

use std::str::FromStr;

use anyhow::{bail, Context};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::{ApiCredentials, TradingWallet};
use clob_core::signing::PostOrderRequest;
use clob_core::{
    create_l1_headers, create_l2_headers, ClobConfig, CreateOrderOptions, OrderBuilder, OrderType,
    Side, TickSize, UserOrder,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sign_order=info,clob_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 4 {
        bail!("usage: sign_order <token_id> <BUY|SELL> <price> <size>");
    }

    let side = match args[1].to_uppercase().as_str() {
        "BUY" => Side::Buy,
        "SELL" => Side::Sell,
        other => bail!("side must be BUY or SELL, got {}", other),
    };
    let price = Decimal::from_str(&args[2]).context("price is not a decimal")?;
    let size = Decimal::from_str(&args[3]).context("size is not a decimal")?;
    let tick_size = match std::env::var("CLOB_TICK_SIZE") {
        Ok(tick) => TickSize::from_str(&tick)?,
        Err(_) => TickSize::default(),
    };

    let wallet = TradingWallet::from_env().context("loading WALLET_PRIVATE_KEY")?;
    info!(address = %wallet.address_string(), "Wallet loaded");

    let config = ClobConfig::from_env()?;
    let builder = OrderBuilder::from_config(&config);

    let order = UserOrder::new(args[0].clone(), price, size, side);
    let signed = builder.build_order(wallet.key(), &order, &CreateOrderOptions::new(tick_size))?;
    println!("{}", serde_json::to_string_pretty(&signed)?);

    let l1 = create_l1_headers(config.chain_id, wallet.key(), "0")?;
    println!("\nL1 headers:");
    for (name, value) in l1.to_pairs() {
        println!("  {}: {}", name, value);
    }

    match ApiCredentials::from_env() {
        Ok(creds) => {
            let body = PostOrderRequest::new(signed, creds.api_key.clone(), OrderType::Gtc)
                .to_body()?;
            let l2 = create_l2_headers(wallet.key(), &creds, "POST", "/order", &body)?;
            println!("\nPOST /order body:\n  {}", body);
            println!("\nL2 headers:");
            for (name, value) in l2.to_pairs() {
                println!("  {}: {}", name, value);
            }
        }
        Err(e) => warn!("Skipping L2 headers: {}", e),
    }

    Ok(())
}
