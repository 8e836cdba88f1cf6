//! EIP-712 domain separators for Polymarket CLOB.
//!
//! Orders are signed against the CTF Exchange domain, which names the
//! exchange contract as `verifyingContract`. Authentication challenges use
//! the `ClobAuthDomain`, which has no verifying contract.

use std::collections::HashMap;

use alloy_primitives::{address, keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;

use crate::{Error, Result};

/// Chain ID for Polygon mainnet.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Chain ID for Polygon Amoy testnet.
pub const POLYGON_AMOY_CHAIN_ID: u64 = 80002;

/// CTF Exchange contract on Polygon mainnet.
pub const CTF_EXCHANGE_ADDRESS: Address = address!("4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E");

/// CTF Exchange contract on Polygon Amoy.
pub const AMOY_CTF_EXCHANGE_ADDRESS: Address =
    address!("dFE02Eb6733538f8Ea35D585af8DE5958AD99E40");

/// Neg Risk CTF Exchange contract on Polygon mainnet.
pub const NEG_RISK_CTF_EXCHANGE_ADDRESS: Address =
    address!("C5d563A36AE78145C45a50134d48A1215220f80a");

/// Name of the exchange's signing domain.
pub const EXCHANGE_DOMAIN_NAME: &str = "Polymarket CTF Exchange";

/// Name of the authentication signing domain.
pub const CLOB_AUTH_DOMAIN_NAME: &str = "ClobAuthDomain";

/// Version shared by both signing domains.
pub const DOMAIN_VERSION: &str = "1";

/// Exchange contract addresses per chain.
///
/// Chains without an entry are rejected rather than defaulting to mainnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRegistry {
    exchanges: HashMap<u64, Address>,
    neg_risk_exchanges: HashMap<u64, Address>,
}

impl ExchangeRegistry {
    /// An empty registry; every lookup fails until entries are added.
    pub fn empty() -> Self {
        Self {
            exchanges: HashMap::new(),
            neg_risk_exchanges: HashMap::new(),
        }
    }

    /// Register the standard exchange contract for a chain.
    pub fn with_exchange(mut self, chain_id: u64, exchange: Address) -> Self {
        self.exchanges.insert(chain_id, exchange);
        self
    }

    /// Register the neg-risk exchange contract for a chain.
    pub fn with_neg_risk_exchange(mut self, chain_id: u64, exchange: Address) -> Self {
        self.neg_risk_exchanges.insert(chain_id, exchange);
        self
    }

    /// Resolve the verifying contract for a chain.
    pub fn exchange_address(&self, chain_id: u64, neg_risk: bool) -> Result<Address> {
        let table = if neg_risk {
            &self.neg_risk_exchanges
        } else {
            &self.exchanges
        };

        table
            .get(&chain_id)
            .copied()
            .ok_or(Error::UnsupportedChain { chain_id })
    }

    /// Build the order-signing domain for a chain.
    pub fn domain(&self, chain_id: u64, neg_risk: bool) -> Result<ExchangeDomain> {
        let verifying_contract = self.exchange_address(chain_id, neg_risk)?;
        Ok(ExchangeDomain::new(chain_id, verifying_contract))
    }
}

impl Default for ExchangeRegistry {
    fn default() -> Self {
        Self::empty()
            .with_exchange(POLYGON_CHAIN_ID, CTF_EXCHANGE_ADDRESS)
            .with_exchange(POLYGON_AMOY_CHAIN_ID, AMOY_CTF_EXCHANGE_ADDRESS)
            .with_neg_risk_exchange(POLYGON_CHAIN_ID, NEG_RISK_CTF_EXCHANGE_ADDRESS)
    }
}

/// EIP-712 domain for order signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeDomain {
    /// Domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain ID.
    pub chain_id: U256,
    /// Verifying contract address.
    pub verifying_contract: Address,
}

impl ExchangeDomain {
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: EXCHANGE_DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// CTF Exchange on Polygon mainnet.
    pub fn ctf_exchange() -> Self {
        Self::new(POLYGON_CHAIN_ID, CTF_EXCHANGE_ADDRESS)
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let domain_type_hash = keccak256(
            b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
        );

        let name_hash = keccak256(self.name.as_bytes());
        let version_hash = keccak256(self.version.as_bytes());
        // encodeData pads the 20-byte address to a full word
        let contract_padded = B256::left_padding_from(self.verifying_contract.as_slice());

        let encoded = (
            domain_type_hash,
            name_hash,
            version_hash,
            self.chain_id,
            contract_padded,
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }
}

/// EIP-712 domain for CLOB authentication (no verifyingContract).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClobAuthDomain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
}

impl ClobAuthDomain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            name: CLOB_AUTH_DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id: U256::from(chain_id),
        }
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let domain_type_hash =
            keccak256(b"EIP712Domain(string name,string version,uint256 chainId)");

        let name_hash = keccak256(self.name.as_bytes());
        let version_hash = keccak256(self.version.as_bytes());

        let encoded =
            (domain_type_hash, name_hash, version_hash, self.chain_id).abi_encode_packed();

        keccak256(&encoded)
    }
}
