//! SHA-512 implementation of `SecretHasher` (RustCrypto `sha2`).

use sha2::{Digest, Sha512};

use crate::domain::errors::HashError;
use crate::ports::SecretHasher;

/// Default upper bound on secret size (1 MiB).
pub const DEFAULT_MAX_SECRET_LEN: usize = 1024 * 1024;

/// SHA-512 over the raw secret bytes.
///
/// Secrets above `max_len` are rejected instead of hashed, so an oversized
/// submission ends up Failed rather than tying up a blocking thread.
#[derive(Debug, Clone)]
pub struct Sha512Hasher {
    max_len: usize,
}

impl Sha512Hasher {
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_SECRET_LEN)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl Default for Sha512Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretHasher for Sha512Hasher {
    fn digest(&self, secret: &[u8]) -> Result<Vec<u8>, HashError> {
        if secret.len() > self.max_len {
            return Err(HashError::InputTooLarge {
                len: secret.len(),
                limit: self.max_len,
            });
        }
        Ok(Sha512::digest(secret).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_sha512_known_value() {
        let digest = Sha512Hasher::new().digest(b"abc").unwrap();
        assert_eq!(
            hex(&digest),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_sha512_deterministic() {
        let hasher = Sha512Hasher::new();
        let a = hasher.digest(b"angryMonkey").unwrap();
        let b = hasher.digest(b"angryMonkey").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_empty_secret_is_hashed() {
        let digest = Sha512Hasher::new().digest(b"").unwrap();
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_oversized_secret_is_rejected() {
        let hasher = Sha512Hasher::with_max_len(4);
        assert_eq!(
            hasher.digest(b"12345").unwrap_err(),
            HashError::InputTooLarge { len: 5, limit: 4 }
        );
        assert!(hasher.digest(b"1234").is_ok());
    }
}
