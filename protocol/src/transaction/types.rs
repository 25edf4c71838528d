//! Draft and signed transaction types.
//!
//! A transfer exists in exactly two states, and each has its own type:
//!
//! - [`UnsignedTransaction`] is a draft. Plain data, freely editable, and
//!   not accepted by anything that submits to a node.
//! - [`Transaction`] is the signed, immutable result. Fields are private and
//!   read through accessors; changing anything means building a new draft
//!   and signing again.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::message::CanonicalMessage;
use super::signing::SigningError;
use super::verification::InvalidReason;
use crate::address::{Address, EncodingError};
use crate::amount::{from_femto, serde_coins, AmountError};
use crate::crypto::{Keypair, Signature};

/// An unsigned transfer. Must not be sent anywhere until signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub from: Address,
    pub to: Address,
    pub amount_femto: u128,
    pub nonce: u64,
    pub timestamp: u64,
}

impl UnsignedTransaction {
    pub fn new(from: Address, to: Address, amount_femto: u128, nonce: u64, timestamp: u64) -> Self {
        Self {
            from,
            to,
            amount_femto,
            nonce,
            timestamp,
        }
    }

    /// Fails with [`AmountError::Inexact`] when the amount cannot be put in
    /// the message without changing it.
    pub fn canonical_message(&self) -> Result<CanonicalMessage, AmountError> {
        CanonicalMessage::encode(
            &self.from,
            &self.to,
            self.amount_femto,
            self.nonce,
            self.timestamp,
        )
    }

    /// Signs the draft. Refuses with [`SigningError::SenderMismatch`] when
    /// `keypair` does not own `from`: a signature that can never verify is
    /// a bug, not a transaction.
    pub fn sign(&self, keypair: &Keypair) -> Result<Transaction, SigningError> {
        let signer = keypair.address();
        if signer != self.from {
            return Err(SigningError::SenderMismatch {
                sender: self.from,
                signer,
            });
        }

        let message = self.canonical_message()?;
        let signature = keypair.sign(message.as_bytes());
        Ok(Transaction {
            from_address: self.from.to_hex(),
            to_address: self.to.to_hex(),
            amount_femto: self.amount_femto,
            nonce: self.nonce,
            timestamp: self.timestamp,
            signature: signature.to_hex(),
        })
    }
}

/// A signed transfer, in its wire form.
///
/// Addresses and the signature are kept as the hex strings they travel as,
/// so a transaction received from elsewhere can be deserialized as-is and
/// handed to [`verify_transaction`](super::verify_transaction), which
/// rejects malformed hex instead of the parser.
///
/// ```json
/// {"from":"<64 hex>","to":"<64 hex>","amount":100.5,"nonce":0,
///  "timestamp":1700000000,"signature":"<128 hex>"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "from")]
    pub(super) from_address: String,
    #[serde(rename = "to")]
    pub(super) to_address: String,
    #[serde(rename = "amount", with = "serde_coins")]
    pub(super) amount_femto: u128,
    pub(super) nonce: u64,
    pub(super) timestamp: u64,
    pub(super) signature: String,
}

impl Transaction {
    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    pub fn to_address(&self) -> &str {
        &self.to_address
    }

    pub fn amount_femto(&self) -> u128 {
        self.amount_femto
    }

    /// The amount in coins, exact. Fails only above
    /// [`MAX_AMOUNT_FEMTO`](crate::config::MAX_AMOUNT_FEMTO), which neither
    /// signing nor deserialization lets through.
    pub fn amount_coins(&self) -> Result<Decimal, AmountError> {
        from_femto(self.amount_femto)
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Hex-encoded signature, 128 characters when well-formed.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Parses the signed fields back into a draft.
    pub fn unsigned(&self) -> Result<UnsignedTransaction, EncodingError> {
        Ok(UnsignedTransaction {
            from: Address::parse("from", &self.from_address)?,
            to: Address::parse("to", &self.to_address)?,
            amount_femto: self.amount_femto,
            nonce: self.nonce,
            timestamp: self.timestamp,
        })
    }

    /// Rebuilds the message the signature is supposed to cover.
    pub fn canonical_message(&self) -> Result<CanonicalMessage, InvalidReason> {
        Ok(self.unsigned()?.canonical_message()?)
    }

    pub fn parsed_signature(&self) -> Result<Signature, EncodingError> {
        Signature::from_hex(&self.signature)
    }

    /// Shorthand for [`verify_transaction`](super::verify_transaction).
    pub fn verify(&self) -> bool {
        super::verify_transaction(self)
    }
}
