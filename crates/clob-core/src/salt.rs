//! Order salt generation.
//!
//! Randomness is injected through [`RandomSource`] so callers can swap the
//! OS generator for a deterministic one in tests.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::{Error, Result};

/// Largest salt the exchange accepts (`i64::MAX`).
pub const MAX_SALT: u64 = i64::MAX as u64;

/// Draws that come back zero are retried this many times before giving up.
const MAX_SALT_ATTEMPTS: usize = 16;

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe to share between threads without extra
/// locking.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        let mut rng = OsRng;
        rng.try_fill_bytes(dest)
            .map_err(|e| Error::RandomnessFailure {
                message: e.to_string(),
            })
    }
}

/// Generate a salt uniformly distributed over `[1, MAX_SALT]`.
pub fn generate_salt<R: RandomSource + ?Sized>(rng: &R) -> Result<u64> {
    for _ in 0..MAX_SALT_ATTEMPTS {
        let mut buf = [0u8; 8];
        rng.fill_bytes(&mut buf)?;

        let salt = u64::from_be_bytes(buf) & MAX_SALT;
        if salt != 0 {
            return Ok(salt);
        }
    }

    Err(Error::RandomnessFailure {
        message: format!("no non-zero salt after {} draws", MAX_SALT_ATTEMPTS),
    })
}
