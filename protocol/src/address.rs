//! # Addresses
//!
//! An address is the 32-byte Ed25519 public key, written as 64 hex
//! characters. Upper- and lower-case hex are both accepted on input; output
//! is always lower-case.
//!
//! Validation here is purely syntactic. Whether the bytes are a valid curve
//! point, or whether an account exists, is for signature verification and the
//! node to decide.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ADDRESS_HEX_LENGTH, PUBLIC_KEY_LENGTH};

/// Malformed hex input at the encoding boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("{field}: expected {expected} hex characters, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field}: invalid hex: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },
}

/// Returns `true` iff `address` is exactly 64 characters of `[0-9a-fA-F]`.
pub fn is_valid_address(address: &str) -> bool {
    address.len() == ADDRESS_HEX_LENGTH && address.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decodes exactly `N` bytes from a hex string, naming `field` in errors.
pub(crate) fn decode_hex_array<const N: usize>(
    field: &'static str,
    input: &str,
) -> Result<[u8; N], EncodingError> {
    if input.len() != N * 2 {
        return Err(EncodingError::InvalidLength {
            field,
            expected: N * 2,
            actual: input.len(),
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(input, &mut out)
        .map_err(|source| EncodingError::InvalidHex { field, source })?;
    Ok(out)
}

/// Shortens an address for display: the first `length` characters and an
/// ellipsis. Addresses no longer than `length` are returned as-is.
pub fn format_address(address: &str, length: usize) -> String {
    match address.get(..length) {
        Some(prefix) if address.len() > length => format!("{prefix}..."),
        _ => address.to_string(),
    }
}

/// A 32-byte account address (the raw Ed25519 public key).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; PUBLIC_KEY_LENGTH]);

impl Address {
    /// Wraps raw public key bytes.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a 64-character hex address, naming `field` in any error.
    pub fn parse(field: &'static str, input: &str) -> Result<Self, EncodingError> {
        decode_hex_array(field, input).map(Self)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Lower-case hex form, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Address {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("address", s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", &self.to_hex()[..16])
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
