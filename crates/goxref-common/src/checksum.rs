//! Content digests for cache entry naming

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a string, used as the cache key of a URL
pub fn digest_str(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}
