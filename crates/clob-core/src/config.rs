//! Configuration for order construction.

use std::env;
use std::path::Path;

use alloy_primitives::Address;
use serde::Deserialize;

use crate::signing::domain::{ExchangeRegistry, POLYGON_CHAIN_ID};
use crate::types::SignatureType;
use crate::{Error, Result};

/// Order builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClobConfig {
    /// Chain the orders are signed for.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// How the maker's funds are held.
    #[serde(default)]
    pub signature_type: SignatureType,
    /// Proxy or Safe address that holds the funds; the signer's own
    /// address is used when unset.
    #[serde(default)]
    pub funder: Option<Address>,
    /// Overrides the exchange contract for `chain_id`.
    #[serde(default)]
    pub exchange_address: Option<Address>,
    /// Overrides the neg-risk exchange contract for `chain_id`.
    #[serde(default)]
    pub neg_risk_exchange_address: Option<Address>,
}

fn default_chain_id() -> u64 {
    POLYGON_CHAIN_ID
}

impl Default for ClobConfig {
    fn default() -> Self {
        Self {
            chain_id: POLYGON_CHAIN_ID,
            signature_type: SignatureType::Eoa,
            funder: None,
            exchange_address: None,
            neg_risk_exchange_address: None,
        }
    }
}

impl ClobConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `CLOB_CHAIN_ID`, `CLOB_SIGNATURE_TYPE`, `CLOB_FUNDER_ADDRESS`,
    /// `CLOB_EXCHANGE_ADDRESS` and `CLOB_NEG_RISK_EXCHANGE_ADDRESS`; all are
    /// optional.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let chain_id = match env::var("CLOB_CHAIN_ID") {
            Ok(value) => value.trim().parse().map_err(|_| Error::Config {
                message: format!("CLOB_CHAIN_ID is not a chain id: {}", value),
            })?,
            Err(_) => POLYGON_CHAIN_ID,
        };

        let signature_type = match env::var("CLOB_SIGNATURE_TYPE") {
            Ok(value) => {
                let raw: u8 = value.trim().parse().map_err(|_| Error::Config {
                    message: format!("CLOB_SIGNATURE_TYPE is not an integer: {}", value),
                })?;
                SignatureType::try_from(raw)?
            }
            Err(_) => SignatureType::Eoa,
        };

        Ok(Self {
            chain_id,
            signature_type,
            funder: env_address("CLOB_FUNDER_ADDRESS")?,
            exchange_address: env_address("CLOB_EXCHANGE_ADDRESS")?,
            neg_risk_exchange_address: env_address("CLOB_NEG_RISK_EXCHANGE_ADDRESS")?,
        })
    }

    /// Load configuration from a file (TOML, YAML or JSON by extension).
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from a TOML document.
    #[allow(clippy::result_large_err)]
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Exchange registry with any configured overrides applied.
    pub fn exchange_registry(&self) -> ExchangeRegistry {
        let mut registry = ExchangeRegistry::default();
        if let Some(exchange) = self.exchange_address {
            registry = registry.with_exchange(self.chain_id, exchange);
        }
        if let Some(exchange) = self.neg_risk_exchange_address {
            registry = registry.with_neg_risk_exchange(self.chain_id, exchange);
        }
        registry
    }
}

fn env_address(name: &str) -> Result<Option<Address>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            let address = value.trim().parse().map_err(|_| Error::Config {
                message: format!("{} is not a valid address: {}", name, value),
            })?;
            Ok(Some(address))
        }
        _ => Ok(None),
    }
}
