//! EIP-712 signing for Polymarket CLOB.
//!
//! Provides typed data signing for orders and the L1 `ClobAuth` challenge.
//! Signing is deterministic (RFC 6979), so the same key and payload always
//! produce the same signature.

use alloy_primitives::{keccak256, Address, Signature, B256};
use alloy_signer::SignerSync;
use alloy_sol_types::SolValue;
use auth::PrivateKey;

use super::domain::{ClobAuthDomain, ExchangeDomain};
use super::order_types::{SignedOrder, UnsignedOrder};
use crate::{Error, Result};

/// Fixed phrase embedded in every authentication challenge.
pub const CLOB_AUTH_MESSAGE: &str = "Signing in to ClobAuth";

/// EIP-712 type string of the authentication challenge.
pub const CLOB_AUTH_TYPE: &str =
    "ClobAuth(address address,string timestamp,string nonce,string message)";

/// Order signer bound to one exchange domain.
///
/// Holds no key material; the key is passed to each call and only lives
/// for the duration of that call.
#[derive(Debug, Clone)]
pub struct OrderSigner {
    domain: ExchangeDomain,
    separator: B256,
}

impl OrderSigner {
    pub fn new(domain: ExchangeDomain) -> Self {
        let separator = domain.separator();
        Self { domain, separator }
    }

    pub fn domain(&self) -> &ExchangeDomain {
        &self.domain
    }

    /// The EIP-712 digest an order is signed over.
    pub fn order_digest(&self, order: &UnsignedOrder) -> Result<B256> {
        Ok(compute_typed_data_hash(self.separator, order.struct_hash()?))
    }

    /// Sign an order and return it ready for submission.
    pub fn sign_order(&self, key: &PrivateKey, order: &UnsignedOrder) -> Result<SignedOrder> {
        let digest = self.order_digest(order)?;
        let signature = sign_digest(key, &digest)?;
        Ok(SignedOrder::from_unsigned(order, signature))
    }

    /// Check a signed order against an expected signer.
    pub fn verify_order(&self, order: &SignedOrder, expected: Address) -> Result<bool> {
        let digest = self.order_digest(&order.unsigned()?)?;
        Ok(recover_signer(&digest, &order.signature)? == expected)
    }
}

/// Compute the EIP-712 typed data hash.
///
/// `keccak256("\x19\x01" ++ domainSeparator ++ structHash)`
pub fn compute_typed_data_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let prefix = [0x19u8, 0x01u8];
    let data = (prefix, domain_separator, struct_hash).abi_encode_packed();
    keccak256(&data)
}

/// Compute the EIP-712 struct hash for a `ClobAuth` challenge.
///
/// String members are hashed; the address is left-padded to 32 bytes.
pub fn clob_auth_struct_hash(address: Address, timestamp: i64, nonce: &str) -> B256 {
    let type_hash = keccak256(CLOB_AUTH_TYPE.as_bytes());
    let address_padded = B256::left_padding_from(address.as_slice());
    let timestamp_hash = keccak256(timestamp.to_string().as_bytes());
    let nonce_hash = keccak256(nonce.as_bytes());
    let message_hash = keccak256(CLOB_AUTH_MESSAGE.as_bytes());

    let encoded = (
        type_hash,
        address_padded,
        timestamp_hash,
        nonce_hash,
        message_hash,
    )
        .abi_encode_packed();

    keccak256(&encoded)
}

/// The digest signed for an authentication challenge.
pub fn clob_auth_digest(chain_id: u64, address: Address, timestamp: i64, nonce: &str) -> B256 {
    let domain = ClobAuthDomain::new(chain_id);
    compute_typed_data_hash(
        domain.separator(),
        clob_auth_struct_hash(address, timestamp, nonce),
    )
}

/// Sign an authentication challenge (L1 authentication).
pub fn build_clob_auth_signature(
    chain_id: u64,
    key: &PrivateKey,
    timestamp: i64,
    nonce: &str,
) -> Result<String> {
    let address = key.address()?;
    let digest = clob_auth_digest(chain_id, address, timestamp, nonce);
    sign_digest(key, &digest)
}

/// Sign a 32-byte digest and encode as `0x` + r ‖ s ‖ v.
///
/// `v` is always 27 or 28.
pub fn sign_digest(key: &PrivateKey, digest: &B256) -> Result<String> {
    let signer = key.signer()?;
    let signature = signer
        .sign_hash_sync(digest)
        .map_err(|e| Error::SigningFailure {
            message: e.to_string(),
        })?;

    let mut bytes = signature.as_bytes();
    if bytes[64] < 27 {
        bytes[64] += 27;
    }

    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Recover the address that produced `signature` over `digest`.
pub fn recover_signer(digest: &B256, signature: &str) -> Result<Address> {
    let raw = signature.strip_prefix("0x").unwrap_or(signature);
    let bytes = hex::decode(raw).map_err(|e| Error::SigningFailure {
        message: format!("signature is not hex: {}", e),
    })?;

    let signature = Signature::from_raw(&bytes).map_err(|e| Error::SigningFailure {
        message: format!("malformed signature: {}", e),
    })?;

    signature
        .recover_address_from_prehash(digest)
        .map_err(|e| Error::SigningFailure {
            message: format!("recovery failed: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use alloy_sol_types::{eip712_domain, SolStruct};

    use crate::signing::domain::{POLYGON_AMOY_CHAIN_ID, POLYGON_CHAIN_ID};
    use crate::types::{Side, SignatureType};

    mod reference {
        alloy_sol_types::sol! {
            struct ClobAuth {
                address address;
                string timestamp;
                string nonce;
                string message;
            }
        }
    }

    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn test_key() -> PrivateKey {
        PrivateKey::from_hex(TEST_KEY).unwrap()
    }

    fn test_address() -> Address {
        TEST_ADDRESS.parse().unwrap()
    }

    fn sample_order() -> UnsignedOrder {
        UnsignedOrder {
            salt: 12345,
            maker: test_address(),
            signer: test_address(),
            taker: Address::ZERO,
            token_id: "1234567890".to_string(),
            maker_amount: "5200000".to_string(),
            taker_amount: "10000000".to_string(),
            expiration: "0".to_string(),
            nonce: "0".to_string(),
            fee_rate_bps: "0".to_string(),
            side: Side::Buy,
            signature_type: SignatureType::Eoa,
        }
    }

    #[test]
    fn test_signature_format() {
        let signer = OrderSigner::new(ExchangeDomain::ctf_exchange());
        let signed = signer.sign_order(&test_key(), &sample_order()).unwrap();

        assert!(signed.signature.starts_with("0x"));
        assert_eq!(signed.signature.len(), 132);

        let v = u8::from_str_radix(&signed.signature[130..], 16).unwrap();
        assert!(v == 27 || v == 28, "v = {}", v);
    }

    #[test]
    fn test_order_signature_recovers_signer() {
        let signer = OrderSigner::new(ExchangeDomain::ctf_exchange());
        let order = sample_order();
        let signed = signer.sign_order(&test_key(), &order).unwrap();

        let digest = signer.order_digest(&order).unwrap();
        assert_eq!(recover_signer(&digest, &signed.signature).unwrap(), test_address());
        assert!(signer.verify_order(&signed, test_address()).unwrap());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = OrderSigner::new(ExchangeDomain::ctf_exchange());
        let a = signer.sign_order(&test_key(), &sample_order()).unwrap();
        let b = signer.sign_order(&test_key(), &sample_order()).unwrap();
        assert_eq!(a.signature, b.signature);
    }

    #[test]
    fn test_tampered_order_fails_verification() {
        let signer = OrderSigner::new(ExchangeDomain::ctf_exchange());
        let mut signed = signer.sign_order(&test_key(), &sample_order()).unwrap();
        signed.maker_amount = "5200001".to_string();
        assert!(!signer.verify_order(&signed, test_address()).unwrap());
    }

    #[test]
    fn test_domain_binds_signature() {
        let order = sample_order();
        let mainnet = OrderSigner::new(ExchangeDomain::ctf_exchange());
        let amoy = OrderSigner::new(ExchangeDomain::new(
            POLYGON_AMOY_CHAIN_ID,
            mainnet.domain().verifying_contract,
        ));

        let signed = mainnet.sign_order(&test_key(), &order).unwrap();
        assert!(!amoy.verify_order(&signed, test_address()).unwrap());
    }

    #[test]
    fn test_clob_auth_hash_matches_reference() {
        let message = reference::ClobAuth {
            address: test_address(),
            timestamp: "1700000000".to_string(),
            nonce: "0".to_string(),
            message: CLOB_AUTH_MESSAGE.to_string(),
        };

        assert_eq!(message.eip712_type_hash(), keccak256(CLOB_AUTH_TYPE.as_bytes()));
        assert_eq!(
            clob_auth_struct_hash(test_address(), 1_700_000_000, "0"),
            message.eip712_hash_struct()
        );

        let domain = eip712_domain! {
            name: "ClobAuthDomain",
            version: "1",
            chain_id: 137,
        };
        assert_eq!(
            clob_auth_digest(POLYGON_CHAIN_ID, test_address(), 1_700_000_000, "0"),
            message.eip712_signing_hash(&domain)
        );
    }

    #[test]
    fn test_clob_auth_signature_recovers_signer() {
        let signature =
            build_clob_auth_signature(POLYGON_CHAIN_ID, &test_key(), 1_700_000_000, "7").unwrap();
        let digest = clob_auth_digest(POLYGON_CHAIN_ID, test_address(), 1_700_000_000, "7");
        assert_eq!(recover_signer(&digest, &signature).unwrap(), test_address());
    }

    #[test]
    fn test_clob_auth_binds_nonce_and_chain() {
        let base = clob_auth_digest(POLYGON_CHAIN_ID, test_address(), 1_700_000_000, "0");
        assert_ne!(
            base,
            clob_auth_digest(POLYGON_CHAIN_ID, test_address(), 1_700_000_000, "1")
        );
        assert_ne!(
            base,
            clob_auth_digest(POLYGON_AMOY_CHAIN_ID, test_address(), 1_700_000_000, "0")
        );
        assert_ne!(
            base,
            clob_auth_digest(POLYGON_CHAIN_ID, test_address(), 1_700_000_001, "0")
        );
    }

    #[test]
    fn test_typed_data_hash_prefix() {
        let separator = B256::repeat_byte(0x11);
        let struct_hash = B256::repeat_byte(0x22);

        let mut expected = vec![0x19, 0x01];
        expected.extend_from_slice(separator.as_slice());
        expected.extend_from_slice(struct_hash.as_slice());

        assert_eq!(
            compute_typed_data_hash(separator, struct_hash),
            keccak256(&expected)
        );
    }

    #[test]
    fn test_recover_rejects_garbage() {
        let digest = B256::from(U256::from(1u64));
        assert!(matches!(
            recover_signer(&digest, "0xzz"),
            Err(Error::SigningFailure { .. })
        ));
        assert!(matches!(
            recover_signer(&digest, "0x1234"),
            Err(Error::SigningFailure { .. })
        ));
    }
}
