//! # Seed Derivation
//!
//! Mnemonic phrase → 32-byte [`Seed`] → child [`Keypair`]s by index.
//!
//! **This scheme is proprietary, not a standard.** It is not BIP-39 (no
//! salt, no PBKDF2 iterations, no wordlist or checksum validation) and not
//! BIP-32/SLIP-10 (no chain codes, no hardened paths). A phrase used here
//! will not restore the same accounts in any other wallet, and a
//! low-entropy phrase is cheap to brute-force because the only stretching is
//! a single SHA-256. To move to a standard scheme, replace the bodies of
//! [`mnemonic_to_seed`] and [`derive_keypair_from_seed`]; the signatures stay.
//!
//! ```text
//! seed      = SHA-256(utf8(mnemonic))
//! secret(i) = SHA-256(seed ‖ u32_le(i))
//! ```

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::hash::{sha256, sha256_concat};
use super::keys::Keypair;
use crate::config::SEED_LENGTH;

/// 32 bytes of derivation seed. Wiped on drop and never persisted here.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    pub fn from_bytes(bytes: [u8; SEED_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// Hashes a mnemonic phrase into a seed. The phrase is taken byte-for-byte;
/// no whitespace or Unicode normalization is applied.
pub fn mnemonic_to_seed(mnemonic: &str) -> Seed {
    Seed(sha256(mnemonic.as_bytes()))
}

/// Derives the child keypair at `index`. Same `(seed, index)`, same keypair.
pub fn derive_keypair_from_seed(seed: &Seed, index: u32) -> Keypair {
    let secret = Zeroizing::new(sha256_concat(&[
        seed.as_bytes().as_slice(),
        index.to_le_bytes().as_slice(),
    ]));
    Keypair::from_seed_bytes(&secret)
}
