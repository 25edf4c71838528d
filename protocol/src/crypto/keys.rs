//! # Key Management
//!
//! Ed25519 keypairs, public keys, signatures, and the secret-key wrapper.
//!
//! The public key is the account address, so [`Keypair::address`] and
//! [`PublicKey::from_address`] are the bridge between this module and
//! [`crate::address`].
//!
//! ## Secret material
//!
//! - [`SecretKey`] zeroizes its bytes on drop, and `ed25519_dalek::SigningKey`
//!   does the same for the key held inside a [`Keypair`].
//! - Hex export goes through [`zeroize::Zeroizing`] so the string copy is
//!   wiped too.
//! - No `Debug` impl in this module prints secret bytes, and nothing here logs.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::address::{decode_hex_array, Address, EncodingError};
use crate::config::{EXPANDED_SECRET_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};

/// Malformed or inconsistent key material.
///
/// Variants say *what* was wrong, never *which bytes*.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key: expected 64 or 128 hex characters")]
    InvalidSecretKey,

    #[error("invalid public key: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("keypair validation failed: public half does not match secret key")]
    KeypairMismatch,
}

// ---------------------------------------------------------------------------
// SecretKey
// ---------------------------------------------------------------------------

/// 32 bytes of Ed25519 secret key material. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_LENGTH]);

impl SecretKey {
    pub fn from_bytes(bytes: [u8; SECRET_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses exactly 64 hex characters.
    pub fn from_hex(input: &str) -> Result<Self, KeyError> {
        let mut bytes = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        hex::decode_to_slice(input, &mut bytes[..]).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self(*bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Lower-case hex. The returned string is wiped when dropped.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// An Ed25519 signing identity.
///
/// Deliberately not `Serialize`: exporting a secret is an explicit call to
/// [`Keypair::secret_key`], never a side effect of putting a keypair in a
/// response body.
///
/// ```
/// use physicscoin_protocol::crypto::Keypair;
///
/// let kp = Keypair::generate();
/// let sig = kp.sign(b"send 100 coins to bob");
/// assert!(kp.verify(b"send 100 coins to bob", &sig));
/// ```
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Fresh keypair from the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic keypair from 32 bytes of secret material. The bytes are
    /// used directly as the Ed25519 secret key.
    pub fn from_seed_bytes(bytes: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(bytes),
        }
    }

    pub fn from_secret_key(secret: &SecretKey) -> Self {
        Self::from_seed_bytes(secret.as_bytes())
    }

    /// Parses a hex secret key in either of the two common export forms:
    ///
    /// - 64 hex characters: the 32-byte secret alone.
    /// - 128 hex characters: secret ‖ public key. The public half must match
    ///   the one derived from the secret, or [`KeyError::KeypairMismatch`].
    pub fn from_secret_key_hex(input: &str) -> Result<Self, KeyError> {
        match input.len() {
            len if len == SECRET_KEY_LENGTH * 2 => {
                SecretKey::from_hex(input).map(|secret| Self::from_secret_key(&secret))
            }
            len if len == EXPANDED_SECRET_KEY_LENGTH * 2 => {
                let mut bytes = Zeroizing::new([0u8; EXPANDED_SECRET_KEY_LENGTH]);
                hex::decode_to_slice(input, &mut bytes[..])
                    .map_err(|_| KeyError::InvalidSecretKey)?;

                let (secret, public) = bytes.split_at(SECRET_KEY_LENGTH);
                let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
                seed.copy_from_slice(secret);

                let keypair = Self::from_seed_bytes(&seed);
                if keypair.public_key().as_bytes()[..] != *public {
                    return Err(KeyError::KeypairMismatch);
                }
                Ok(keypair)
            }
            _ => Err(KeyError::InvalidSecretKey),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key())
    }

    /// The account address: the public key bytes.
    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// Exports the secret key. Every copy is another thing to protect.
    pub fn secret_key(&self) -> SecretKey {
        SecretKey(self.signing_key.to_bytes())
    }

    /// Signs `message`. Ed25519 is deterministic: same key and message,
    /// same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key().verify(message, signature)
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair(pub={})", self.address().to_hex())
    }
}

impl PartialEq for Keypair {
    /// Compares public keys only; secret bytes are never compared.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for Keypair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A validated Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Interprets an address as a public key. Fails if the bytes do not
    /// decompress to a curve point.
    pub fn from_address(address: &Address) -> Result<Self, KeyError> {
        VerifyingKey::from_bytes(address.as_bytes())
            .map(Self)
            .map_err(|_| KeyError::InvalidPublicKey)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    pub fn address(&self) -> Address {
        Address::from_bytes(self.0.to_bytes())
    }

    /// Strict verification: rejects small-order keys and non-canonical
    /// signature encodings in addition to plain mismatches.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let sig = DalekSignature::from_bytes(&signature.0);
        self.0.verify_strict(message, &sig).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.address().to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature; 128 hex characters on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(input: &str) -> Result<Self, EncodingError> {
        decode_hex_array("signature", input).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Signature {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
