//! HMAC-SHA256 request signing for authenticated (L2) sessions.
//!
//! Once a wallet has exchanged an L1 signature for API credentials, every
//! REST call is signed with the credential secret. The signed message is the
//! plain concatenation `timestamp + method + path + body`; the verifier
//! rebuilds the identical string, so field order matters.

use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{AuthError, Result};

type HmacSha256 = Hmac<Sha256>;

/// API credentials for authenticated CLOB requests.
///
/// Also used for builder credentials, which share the same shape.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ApiCredentials {
    /// API key (derived from wallet).
    #[serde(rename = "key", alias = "apiKey")]
    pub api_key: String,
    /// Base64-encoded secret for HMAC signing.
    #[serde(rename = "secret")]
    pub api_secret: String,
    /// Passphrase sent alongside every request.
    #[serde(rename = "passphrase")]
    pub api_passphrase: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("api_passphrase", &"[REDACTED]")
            .finish()
    }
}

impl ApiCredentials {
    /// Create new API credentials.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        api_passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_passphrase: api_passphrase.into(),
        }
    }

    /// Load from the `POLY_API_KEY`, `POLY_API_SECRET` and
    /// `POLY_API_PASSPHRASE` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_prefix("POLY_API")
    }

    /// Load builder credentials from the `POLY_BUILDER_API_*` variables.
    pub fn builder_from_env() -> Result<Self> {
        Self::from_env_with_prefix("POLY_BUILDER_API")
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let read = |suffix: &str| {
            let name = format!("{}_{}", prefix, suffix);
            std::env::var(&name).map_err(|_| AuthError::Config {
                message: format!("{} environment variable not set", name),
            })
        };

        Ok(Self {
            api_key: read("KEY")?,
            api_secret: read("SECRET")?,
            api_passphrase: read("PASSPHRASE")?,
        })
    }

    /// Sign a request with this credential's secret.
    pub fn sign_request(
        &self,
        timestamp: i64,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> Result<String> {
        build_hmac_signature(&self.api_secret, timestamp, method, request_path, body)
    }
}

/// Build the HMAC signature for an authenticated request.
///
/// The message is `{timestamp}{method}{request_path}{body}` with no
/// delimiters. The digest is URL-safe base64 with the trailing `=` padding
/// stripped.
pub fn build_hmac_signature(
    secret: &str,
    timestamp: i64,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<String> {
    let message = format!("{}{}{}{}", timestamp, method, request_path, body);

    let key = decode_secret(secret)?;
    let mut mac = HmacSha256::new_from_slice(&key).map_err(|e| AuthError::InvalidSecret {
        message: format!("Failed to create HMAC: {}", e),
    })?;
    mac.update(message.as_bytes());
    let digest = mac.finalize().into_bytes();

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest))
}

/// Decode an API secret.
///
/// Secrets are issued as URL-safe base64; unpadded and standard-alphabet
/// forms are accepted as well.
fn decode_secret(secret: &str) -> Result<Zeroizing<Vec<u8>>> {
    use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};

    URL_SAFE
        .decode(secret)
        .or_else(|_| URL_SAFE_NO_PAD.decode(secret))
        .or_else(|_| STANDARD.decode(secret))
        .map(Zeroizing::new)
        .map_err(|e| AuthError::InvalidSecret {
            message: e.to_string(),
        })
}
