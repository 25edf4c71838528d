//! # Hashing
//!
//! SHA-256 is the only hash the protocol uses: mnemonic-to-seed and child-key
//! derivation both go through it. Ed25519 hashes internally with SHA-512, which
//! is ed25519-dalek's business, not ours.

use sha2::{Digest, Sha256};

/// SHA-256 of `data` as a fixed-size array.
///
/// ```
/// use physicscoin_protocol::crypto::sha256;
///
/// let digest = sha256(b"abc");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 over the concatenation of `parts`, without materializing it.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
