//! Order types for Polymarket CLOB signing.
//!
//! [`UnsignedOrder`] mirrors the `Order` struct of the CTF Exchange contract
//! and knows how to hash itself. [`SignedOrder`] is its wire form.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};

use crate::types::{OrderType, Side, SignatureType};
use crate::{Error, Result};

/// EIP-712 type string of the exchange's `Order` struct.
pub const ORDER_TYPE: &str = "Order(uint256 salt,address maker,address signer,address taker,uint256 tokenId,uint256 makerAmount,uint256 takerAmount,uint256 expiration,uint256 nonce,uint256 feeRateBps,uint8 side,uint8 signatureType)";

/// Order data for EIP-712 signing.
///
/// Numeric fields are carried as decimal strings, exactly as they go out on
/// the wire, and parsed to `uint256` only when hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedOrder {
    /// Random salt for uniqueness.
    pub salt: u64,
    /// Address whose funds back the order.
    pub maker: Address,
    /// Address that signs the order.
    pub signer: Address,
    /// Allowed counterparty; zero for any taker.
    pub taker: Address,
    /// Outcome token id.
    pub token_id: String,
    /// Amount the maker gives, in base units.
    pub maker_amount: String,
    /// Amount the maker receives, in base units.
    pub taker_amount: String,
    /// Expiration timestamp (unix seconds), "0" for none.
    pub expiration: String,
    /// Nonce for onchain cancellations.
    pub nonce: String,
    /// Fee rate in basis points.
    pub fee_rate_bps: String,
    pub side: Side,
    pub signature_type: SignatureType,
}

impl UnsignedOrder {
    /// Compute the EIP-712 struct hash for this order.
    pub fn struct_hash(&self) -> Result<B256> {
        let order_type_hash = keccak256(ORDER_TYPE.as_bytes());

        // encodeData pads every member to 32 bytes; addresses are left-padded
        let maker_padded = B256::left_padding_from(self.maker.as_slice());
        let signer_padded = B256::left_padding_from(self.signer.as_slice());
        let taker_padded = B256::left_padding_from(self.taker.as_slice());

        let encoded = (
            order_type_hash,
            U256::from(self.salt),
            maker_padded,
            signer_padded,
            taker_padded,
            parse_uint("tokenId", &self.token_id)?,
            parse_uint("makerAmount", &self.maker_amount)?,
            parse_uint("takerAmount", &self.taker_amount)?,
            parse_uint("expiration", &self.expiration)?,
            parse_uint("nonce", &self.nonce)?,
            parse_uint("feeRateBps", &self.fee_rate_bps)?,
            U256::from(self.side.as_u8()),
            U256::from(self.signature_type.as_u8()),
        )
            .abi_encode_packed();

        Ok(keccak256(&encoded))
    }
}

fn parse_uint(field: &str, value: &str) -> Result<U256> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::HashingFailure {
            message: format!("{} must be a decimal integer, got {:?}", field, value),
        });
    }

    U256::from_str_radix(value, 10).map_err(|e| Error::HashingFailure {
        message: format!("{} does not fit in uint256: {}", field, e),
    })
}

fn parse_address(field: &str, value: &str) -> Result<Address> {
    value.parse::<Address>().map_err(|e| Error::HashingFailure {
        message: format!("{} is not an address: {}", field, e),
    })
}

/// A signed order ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
    /// Order salt (must be a JSON number).
    pub salt: u64,
    /// Maker address as checksummed hex.
    pub maker: String,
    /// Signer address as checksummed hex.
    pub signer: String,
    /// Taker address as checksummed hex.
    pub taker: String,
    pub token_id: String,
    pub maker_amount: String,
    pub taker_amount: String,
    pub expiration: String,
    pub nonce: String,
    pub fee_rate_bps: String,
    /// Side ("BUY" or "SELL").
    pub side: Side,
    /// Signature type as its integer value.
    pub signature_type: SignatureType,
    /// EIP-712 signature as 0x-prefixed hex.
    pub signature: String,
}

impl SignedOrder {
    /// Attach a signature to an unsigned order.
    pub fn from_unsigned(order: &UnsignedOrder, signature: String) -> Self {
        Self {
            salt: order.salt,
            maker: order.maker.to_checksum(None),
            signer: order.signer.to_checksum(None),
            taker: order.taker.to_checksum(None),
            token_id: order.token_id.clone(),
            maker_amount: order.maker_amount.clone(),
            taker_amount: order.taker_amount.clone(),
            expiration: order.expiration.clone(),
            nonce: order.nonce.clone(),
            fee_rate_bps: order.fee_rate_bps.clone(),
            side: order.side,
            signature_type: order.signature_type,
            signature,
        }
    }

    /// Recover the signed fields, e.g. to verify a received order.
    pub fn unsigned(&self) -> Result<UnsignedOrder> {
        Ok(UnsignedOrder {
            salt: self.salt,
            maker: parse_address("maker", &self.maker)?,
            signer: parse_address("signer", &self.signer)?,
            taker: parse_address("taker", &self.taker)?,
            token_id: self.token_id.clone(),
            maker_amount: self.maker_amount.clone(),
            taker_amount: self.taker_amount.clone(),
            expiration: self.expiration.clone(),
            nonce: self.nonce.clone(),
            fee_rate_bps: self.fee_rate_bps.clone(),
            side: self.side,
            signature_type: self.signature_type,
        })
    }
}

/// Request body for posting an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOrderRequest {
    pub order: SignedOrder,
    /// API key of the session posting the order.
    pub owner: String,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
}

impl PostOrderRequest {
    pub fn new(order: SignedOrder, owner: impl Into<String>, order_type: OrderType) -> Self {
        Self {
            order,
            owner: owner.into(),
            order_type,
            post_only: None,
        }
    }

    /// Serialize to the exact body string that is also HMAC-signed.
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::{eip712_domain, SolStruct};

    use crate::signing::domain::{ExchangeDomain, CTF_EXCHANGE_ADDRESS};
    use crate::signing::signer::compute_typed_data_hash;

    mod reference {
        alloy_sol_types::sol! {
            struct Order {
                uint256 salt;
                address maker;
                address signer;
                address taker;
                uint256 tokenId;
                uint256 makerAmount;
                uint256 takerAmount;
                uint256 expiration;
                uint256 nonce;
                uint256 feeRateBps;
                uint8 side;
                uint8 signatureType;
            }
        }
    }

    const MAKER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn sample_order() -> UnsignedOrder {
        let maker = MAKER.parse::<Address>().unwrap();
        UnsignedOrder {
            salt: 479249096354,
            maker,
            signer: maker,
            taker: Address::ZERO,
            token_id: "71321045679252212594626385532706912750332728571942532289631379312455583992563"
                .to_string(),
            maker_amount: "5200000".to_string(),
            taker_amount: "10000000".to_string(),
            expiration: "0".to_string(),
            nonce: "0".to_string(),
            fee_rate_bps: "0".to_string(),
            side: Side::Buy,
            signature_type: SignatureType::Eoa,
        }
    }

    fn reference_order(order: &UnsignedOrder) -> reference::Order {
        reference::Order {
            salt: U256::from(order.salt),
            maker: order.maker,
            signer: order.signer,
            taker: order.taker,
            tokenId: U256::from_str_radix(&order.token_id, 10).unwrap(),
            makerAmount: U256::from_str_radix(&order.maker_amount, 10).unwrap(),
            takerAmount: U256::from_str_radix(&order.taker_amount, 10).unwrap(),
            expiration: U256::from_str_radix(&order.expiration, 10).unwrap(),
            nonce: U256::from_str_radix(&order.nonce, 10).unwrap(),
            feeRateBps: U256::from_str_radix(&order.fee_rate_bps, 10).unwrap(),
            side: order.side.as_u8(),
            signatureType: order.signature_type.as_u8(),
        }
    }

    #[test]
    fn test_order_type_string_matches_reference() {
        let order = reference_order(&sample_order());
        assert_eq!(order.eip712_type_hash(), keccak256(ORDER_TYPE.as_bytes()));
    }

    #[test]
    fn test_struct_hash_matches_reference() {
        let order = sample_order();
        let expected = reference_order(&order).eip712_hash_struct();
        assert_eq!(order.struct_hash().unwrap(), expected);
    }

    #[test]
    fn test_signing_hash_matches_reference() {
        let mut order = sample_order();
        order.side = Side::Sell;
        order.signature_type = SignatureType::PolyGnosisSafe;
        order.taker = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap();
        order.fee_rate_bps = "100".to_string();

        let domain = ExchangeDomain::ctf_exchange();
        let digest = compute_typed_data_hash(domain.separator(), order.struct_hash().unwrap());

        let reference_domain = eip712_domain! {
            name: "Polymarket CTF Exchange",
            version: "1",
            chain_id: 137,
            verifying_contract: CTF_EXCHANGE_ADDRESS,
        };
        let expected = reference_order(&order).eip712_signing_hash(&reference_domain);
        assert_eq!(digest, expected);
    }

    #[test]
    fn test_struct_hash_is_deterministic_and_salted() {
        let order = sample_order();
        assert_eq!(order.struct_hash().unwrap(), order.clone().struct_hash().unwrap());

        let mut other = order.clone();
        other.salt += 1;
        assert_ne!(order.struct_hash().unwrap(), other.struct_hash().unwrap());
    }

    #[test]
    fn test_malformed_numeric_field() {
        let mut order = sample_order();
        order.token_id = "12abc".to_string();
        assert!(matches!(order.struct_hash(), Err(Error::HashingFailure { .. })));

        let mut order = sample_order();
        order.maker_amount = "-5".to_string();
        assert!(matches!(order.struct_hash(), Err(Error::HashingFailure { .. })));

        let mut order = sample_order();
        order.nonce = String::new();
        assert!(matches!(order.struct_hash(), Err(Error::HashingFailure { .. })));

        let mut order = sample_order();
        order.token_id = "9".repeat(80);
        assert!(matches!(order.struct_hash(), Err(Error::HashingFailure { .. })));
    }

    #[test]
    fn test_signed_order_wire_format() {
        let signed = SignedOrder::from_unsigned(&sample_order(), "0xsignature".to_string());
        let json: serde_json::Value = serde_json::to_value(&signed).unwrap();

        assert_eq!(json["salt"], serde_json::json!(479249096354u64));
        assert_eq!(json["maker"], MAKER);
        assert_eq!(json["taker"], "0x0000000000000000000000000000000000000000");
        assert_eq!(json["makerAmount"], "5200000");
        assert_eq!(json["takerAmount"], "10000000");
        assert_eq!(json["feeRateBps"], "0");
        assert_eq!(json["side"], "BUY");
        assert_eq!(json["signatureType"], 0);
        assert_eq!(json["signature"], "0xsignature");
        assert!(json.get("tokenId").is_some());
    }

    #[test]
    fn test_signed_order_unsigned_round_trip() {
        let order = sample_order();
        let signed = SignedOrder::from_unsigned(&order, "0x".to_string());
        assert_eq!(signed.unsigned().unwrap(), order);

        let mut broken = signed.clone();
        broken.maker = "0x1234".to_string();
        assert!(matches!(broken.unsigned(), Err(Error::HashingFailure { .. })));
    }

    #[test]
    fn test_post_order_request_body() {
        let signed = SignedOrder::from_unsigned(&sample_order(), "0xsig".to_string());
        let request = PostOrderRequest::new(signed, "api-key", OrderType::Gtc);
        let body = request.to_body().unwrap();

        assert!(body.contains(r#""owner":"api-key""#));
        assert!(body.contains(r#""orderType":"GTC""#));
        assert!(!body.contains("postOnly"));
    }
}
