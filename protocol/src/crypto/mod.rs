//! # Cryptographic Primitives
//!
//! Thin, typed wrappers over audited implementations. Nothing here is novel:
//!
//! - **Ed25519** (`ed25519-dalek`) for keys and signatures.
//! - **SHA-256** (`sha2`) for seed derivation.
//! - **zeroize** for wiping secret material on drop.
//!
//! The seed derivation scheme in [`derivation`] is proprietary and not
//! interoperable with standard HD wallets; read its module docs before
//! relying on it.

pub mod derivation;
pub mod hash;
pub mod keys;

pub use derivation::{derive_keypair_from_seed, mnemonic_to_seed, Seed};
pub use hash::{sha256, sha256_concat};
pub use keys::{KeyError, Keypair, PublicKey, SecretKey, Signature};

/// Generates a fresh random keypair from the OS CSPRNG.
pub fn generate_keypair() -> Keypair {
    Keypair::generate()
}
