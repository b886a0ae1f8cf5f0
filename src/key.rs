//! Cache key derivation.
//!
//! Keys combine a caller-supplied logical key, a fingerprint of the
//! generator's definition and (optionally) the call arguments. Folding the
//! fingerprint in means changing the computation transparently invalidates
//! entries produced by the old definition; folding the arguments in means
//! the same logical key never collides across distinct argument lists.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Combine a logical key with a generator fingerprint.
///
/// Format: `{logical_key}:{fingerprint}`.
pub fn base_key(logical_key: &str, fingerprint: &str) -> String {
    format!("{}:{}", logical_key, fingerprint)
}

/// Extend a base key with an ordered argument list.
///
/// Arguments are hashed rather than embedded so keys stay fixed-length
/// regardless of argument size. Each argument is length-prefixed before
/// hashing, so `["ab"]` and `["a", "b"]` cannot collide. An empty argument
/// list leaves the base key unchanged.
pub fn full_key(base_key: &str, args: &[Value]) -> String {
    if args.is_empty() {
        return base_key.to_string();
    }

    let mut hasher = Sha256::new();
    for arg in args {
        let bytes = arg.to_string().into_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }
    format!("{}:{}", base_key, hex::encode(hasher.finalize()))
}

/// SHA-256 hash of a generator definition, hex-encoded.
pub fn fingerprint(definition: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(definition.as_bytes());
    hex::encode(hasher.finalize())
}
