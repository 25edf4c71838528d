//! # Protocol Configuration & Constants
//!
//! Every magic number in the authorization protocol lives here. The signer
//! and the validating node must agree on all of these byte-for-byte, so a
//! change here is a protocol change, not a refactor.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The full protocol version string.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Fixed-Point Parameters
// ---------------------------------------------------------------------------

/// Number of fractional decimal digits a coin amount can carry losslessly.
pub const FEMTO_DECIMALS: u32 = 15;

/// Femto-units per whole coin (10^15).
pub const FEMTO_PER_COIN: u128 = 1_000_000_000_000_000;

/// Smallest transferable amount, in femto-units. One femto is 10^-15 coins.
pub const MIN_AMOUNT_FEMTO: u128 = 1;

/// Largest femto amount with an exact decimal coin form (2^96 - 1, the
/// `rust_decimal` mantissa limit). About 79.2 trillion coins.
pub const MAX_AMOUNT_FEMTO: u128 = 79_228_162_514_264_337_593_543_950_335;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 is the only signature scheme the protocol accepts.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Ed25519 secret key (seed) length in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of the expanded secret key form: 32-byte seed followed by the
/// 32-byte public key. Some toolchains export keys this way.
pub const EXPANDED_SECRET_KEY_LENGTH: usize = 64;

/// Public key length in bytes. The public key doubles as the address.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Seed length produced by mnemonic hashing.
pub const SEED_LENGTH: usize = 32;

/// Address length in hex characters (32 bytes, two characters per byte).
pub const ADDRESS_HEX_LENGTH: usize = PUBLIC_KEY_LENGTH * 2;

/// Signature length in hex characters.
pub const SIGNATURE_HEX_LENGTH: usize = SIGNATURE_LENGTH * 2;

// ---------------------------------------------------------------------------
// Canonical Message Layout
// ---------------------------------------------------------------------------

/// Width of each fixed-size numeric field in the canonical message: the
/// amount (f64) and the nonce and timestamp (u64).
pub const MESSAGE_NUMBER_FIELD_LENGTH: usize = 8;

/// Total canonical message length: from(32) + to(32) + amount(8) +
/// nonce(8) + timestamp(8). No prefixes, no separators.
pub const CANONICAL_MESSAGE_LENGTH: usize =
    PUBLIC_KEY_LENGTH * 2 + MESSAGE_NUMBER_FIELD_LENGTH * 3;

// ---------------------------------------------------------------------------
// Client Defaults
// ---------------------------------------------------------------------------

/// Default node API endpoint.
pub const DEFAULT_NODE_URL: &str = "http://localhost:8545";

/// Default per-request timeout for calls to the node.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`crate::client::NodeClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the node API, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a config for `base_url` with the default timeout.
    ///
    /// Trailing slashes are stripped so endpoint paths can be appended
    /// verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_URL)
    }
}
