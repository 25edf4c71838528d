//! The canonical 88-byte signing message.
//!
//! ```text
//! offset  len  field
//!      0   32  from (sender public key)
//!     32   32  to (recipient public key)
//!     64    8  amount, coins, IEEE-754 f64 little-endian
//!     72    8  nonce, u64 little-endian
//!     80    8  timestamp, Unix seconds, u64 little-endian
//! ```
//!
//! No prefixes, no separators, no version byte. Byte order is fixed to
//! little-endian regardless of host.
//!
//! Callers hand over the femto amount, never a float. The float in the
//! message is derived from it here, once, and only when it converts back to
//! the same femto value ([`femto_to_exact_f64`]). Two different signable
//! amounts therefore never share message bytes, and amounts of any size up
//! to the total supply fit in the eight bytes.

use std::fmt;

use super::types::UnsignedTransaction;
use crate::address::Address;
use crate::amount::{exact_femto_from_f64, femto_to_exact_f64, AmountError};
use crate::config::{CANONICAL_MESSAGE_LENGTH, MESSAGE_NUMBER_FIELD_LENGTH, PUBLIC_KEY_LENGTH};

const FROM_OFFSET: usize = 0;
const TO_OFFSET: usize = FROM_OFFSET + PUBLIC_KEY_LENGTH;
const AMOUNT_OFFSET: usize = TO_OFFSET + PUBLIC_KEY_LENGTH;
const NONCE_OFFSET: usize = AMOUNT_OFFSET + MESSAGE_NUMBER_FIELD_LENGTH;
const TIMESTAMP_OFFSET: usize = NONCE_OFFSET + MESSAGE_NUMBER_FIELD_LENGTH;

/// The exact input to Ed25519 signing and verification.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CanonicalMessage([u8; CANONICAL_MESSAGE_LENGTH]);

impl CanonicalMessage {
    /// Encodes a transfer. Fails with [`AmountError::Inexact`] when
    /// `amount_femto` has no exact float coin value.
    pub fn encode(
        from: &Address,
        to: &Address,
        amount_femto: u128,
        nonce: u64,
        timestamp: u64,
    ) -> Result<Self, AmountError> {
        let coins = femto_to_exact_f64(amount_femto).ok_or(AmountError::Inexact(amount_femto))?;

        let mut buf = [0u8; CANONICAL_MESSAGE_LENGTH];
        buf[FROM_OFFSET..TO_OFFSET].copy_from_slice(from.as_bytes());
        buf[TO_OFFSET..AMOUNT_OFFSET].copy_from_slice(to.as_bytes());
        buf[AMOUNT_OFFSET..NONCE_OFFSET].copy_from_slice(&coins.to_le_bytes());
        buf[NONCE_OFFSET..TIMESTAMP_OFFSET].copy_from_slice(&nonce.to_le_bytes());
        buf[TIMESTAMP_OFFSET..].copy_from_slice(&timestamp.to_le_bytes());
        Ok(Self(buf))
    }

    /// Splits a message back into its fields. `None` unless `bytes` is
    /// exactly 88 bytes long and the amount is a float that [`encode`]
    /// could have produced.
    ///
    /// [`encode`]: Self::encode
    pub fn decode(bytes: &[u8]) -> Option<UnsignedTransaction> {
        let bytes: &[u8; CANONICAL_MESSAGE_LENGTH] = bytes.try_into().ok()?;
        let coins = f64::from_le_bytes(read_array(bytes, AMOUNT_OFFSET)?);
        Some(UnsignedTransaction {
            from: Address::from_bytes(read_array(bytes, FROM_OFFSET)?),
            to: Address::from_bytes(read_array(bytes, TO_OFFSET)?),
            amount_femto: exact_femto_from_f64(coins)?,
            nonce: u64::from_le_bytes(read_array(bytes, NONCE_OFFSET)?),
            timestamp: u64::from_le_bytes(read_array(bytes, TIMESTAMP_OFFSET)?),
        })
    }

    pub fn as_bytes(&self) -> &[u8; CANONICAL_MESSAGE_LENGTH] {
        &self.0
    }

    /// Always [`CANONICAL_MESSAGE_LENGTH`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
    bytes.get(offset..offset + N)?.try_into().ok()
}

impl AsRef<[u8]> for CanonicalMessage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CanonicalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalMessage({})", hex::encode(self.0))
    }
}
