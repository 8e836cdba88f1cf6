//! Authentication header sets for CLOB requests.
//!
//! L1 headers prove wallet ownership with a `ClobAuth` signature and are used
//! to create or derive API credentials. L2 headers sign each request with the
//! credential secret. Header names are part of the wire contract.

use auth::{ApiCredentials, PrivateKey};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::signing::build_clob_auth_signature;
use crate::Result;

/// Wallet-signed (L1) headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1Headers {
    #[serde(rename = "POLY_ADDRESS")]
    pub address: String,
    #[serde(rename = "POLY_SIGNATURE")]
    pub signature: String,
    #[serde(rename = "POLY_TIMESTAMP")]
    pub timestamp: String,
    #[serde(rename = "POLY_NONCE")]
    pub nonce: String,
}

impl L1Headers {
    /// Header name/value pairs in wire order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("POLY_ADDRESS", self.address.clone()),
            ("POLY_SIGNATURE", self.signature.clone()),
            ("POLY_TIMESTAMP", self.timestamp.clone()),
            ("POLY_NONCE", self.nonce.clone()),
        ]
    }
}

/// Builder attribution headers, signed with the builder's own secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderHeaders {
    #[serde(rename = "POLY_BUILDER_API_KEY")]
    pub api_key: String,
    #[serde(rename = "POLY_BUILDER_TIMESTAMP")]
    pub timestamp: String,
    #[serde(rename = "POLY_BUILDER_PASSPHRASE")]
    pub passphrase: String,
    #[serde(rename = "POLY_BUILDER_SIGNATURE")]
    pub signature: String,
}

/// Session-signed (L2) headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Headers {
    #[serde(rename = "POLY_ADDRESS")]
    pub address: String,
    #[serde(rename = "POLY_SIGNATURE")]
    pub signature: String,
    #[serde(rename = "POLY_TIMESTAMP")]
    pub timestamp: String,
    #[serde(rename = "POLY_API_KEY")]
    pub api_key: String,
    #[serde(rename = "POLY_PASSPHRASE")]
    pub passphrase: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderHeaders>,
}

impl L2Headers {
    /// Header name/value pairs in wire order, builder headers last.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("POLY_ADDRESS", self.address.clone()),
            ("POLY_SIGNATURE", self.signature.clone()),
            ("POLY_TIMESTAMP", self.timestamp.clone()),
            ("POLY_API_KEY", self.api_key.clone()),
            ("POLY_PASSPHRASE", self.passphrase.clone()),
        ];

        if let Some(builder) = &self.builder {
            pairs.push(("POLY_BUILDER_API_KEY", builder.api_key.clone()));
            pairs.push(("POLY_BUILDER_TIMESTAMP", builder.timestamp.clone()));
            pairs.push(("POLY_BUILDER_PASSPHRASE", builder.passphrase.clone()));
            pairs.push(("POLY_BUILDER_SIGNATURE", builder.signature.clone()));
        }

        pairs
    }

    /// Attach builder headers for the same request.
    pub fn with_builder(
        mut self,
        builder_creds: &ApiCredentials,
        method: &str,
        request_path: &str,
        body: &str,
        timestamp: i64,
    ) -> Result<Self> {
        self.builder = Some(create_builder_headers(
            builder_creds,
            method,
            request_path,
            body,
            timestamp,
        )?);
        Ok(self)
    }
}

/// Current unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Create L1 headers stamped with the current time.
pub fn create_l1_headers(chain_id: u64, key: &PrivateKey, nonce: &str) -> Result<L1Headers> {
    create_l1_headers_at(chain_id, key, nonce, current_timestamp())
}

/// Create L1 headers for an explicit timestamp.
pub fn create_l1_headers_at(
    chain_id: u64,
    key: &PrivateKey,
    nonce: &str,
    timestamp: i64,
) -> Result<L1Headers> {
    let address = key.address()?;
    let signature = build_clob_auth_signature(chain_id, key, timestamp, nonce)?;

    debug!(
        address = %address,
        chain_id = chain_id,
        timestamp = timestamp,
        "Created L1 headers"
    );

    Ok(L1Headers {
        address: address.to_checksum(None),
        signature,
        timestamp: timestamp.to_string(),
        nonce: nonce.to_string(),
    })
}

/// Create L2 headers stamped with the current time.
pub fn create_l2_headers(
    key: &PrivateKey,
    creds: &ApiCredentials,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<L2Headers> {
    create_l2_headers_at(key, creds, method, request_path, body, current_timestamp())
}

/// Create L2 headers for an explicit timestamp.
pub fn create_l2_headers_at(
    key: &PrivateKey,
    creds: &ApiCredentials,
    method: &str,
    request_path: &str,
    body: &str,
    timestamp: i64,
) -> Result<L2Headers> {
    let address = key.address()?;
    let signature = creds.sign_request(timestamp, method, request_path, body)?;

    debug!(
        address = %address,
        method = method,
        path = request_path,
        timestamp = timestamp,
        "Created L2 headers"
    );

    Ok(L2Headers {
        address: address.to_checksum(None),
        signature,
        timestamp: timestamp.to_string(),
        api_key: creds.api_key.clone(),
        passphrase: creds.api_passphrase.clone(),
        builder: None,
    })
}

/// Sign the builder attribution headers for a request.
pub fn create_builder_headers(
    builder_creds: &ApiCredentials,
    method: &str,
    request_path: &str,
    body: &str,
    timestamp: i64,
) -> Result<BuilderHeaders> {
    let signature = builder_creds.sign_request(timestamp, method, request_path, body)?;

    Ok(BuilderHeaders {
        api_key: builder_creds.api_key.clone(),
        timestamp: timestamp.to_string(),
        passphrase: builder_creds.api_passphrase.clone(),
        signature,
    })
}

/// Add builder headers to an existing L2 header set.
pub fn inject_builder_headers(
    headers: L2Headers,
    builder_creds: &ApiCredentials,
    method: &str,
    request_path: &str,
    body: &str,
    timestamp: i64,
) -> Result<L2Headers> {
    headers.with_builder(builder_creds, method, request_path, body, timestamp)
}
