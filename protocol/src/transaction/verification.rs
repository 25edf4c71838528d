//! Signature verification for signed transactions.
//!
//! The public contract is a bare `bool`: [`verify_transaction`] answers
//! `false` for a forged signature and for a transaction it could not even
//! parse, and callers cannot tell the two apart. The reason is still
//! computed, as a [`Verification`], so it can be logged for operators and
//! inspected through [`check_transaction`] in diagnostics and tests.

use thiserror::Error;

use super::types::Transaction;
use crate::address::{format_address, EncodingError};
use crate::amount::AmountError;
use crate::crypto::PublicKey;

/// Why a transaction failed verification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidReason {
    #[error("malformed field: {0}")]
    Malformed(#[from] EncodingError),

    #[error("amount cannot be part of a signed message: {0}")]
    UnsignableAmount(#[from] AmountError),

    #[error("sender address is not a valid Ed25519 public key")]
    InvalidSenderKey,

    #[error("signature does not match the sender and message")]
    SignatureMismatch,
}

/// Outcome of checking a transaction's signature.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Valid,
    Invalid(InvalidReason),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Checks `tx` and reports why it failed, if it did.
///
/// 1. Parse `from`, `to`, and `signature` from hex.
/// 2. Decompress the sender address into a public key.
/// 3. Rebuild the canonical message and run strict Ed25519 verification.
pub fn check_transaction(tx: &Transaction) -> Verification {
    match try_verify(tx) {
        Ok(()) => Verification::Valid,
        Err(reason) => Verification::Invalid(reason),
    }
}

fn try_verify(tx: &Transaction) -> Result<(), InvalidReason> {
    let draft = tx.unsigned()?;
    let signature = tx.parsed_signature()?;
    let sender = PublicKey::from_address(&draft.from).map_err(|_| InvalidReason::InvalidSenderKey)?;
    let message = draft.canonical_message()?;

    if sender.verify(message.as_bytes(), &signature) {
        Ok(())
    } else {
        Err(InvalidReason::SignatureMismatch)
    }
}

/// Returns `true` only if `tx` carries a valid signature by its sender over
/// its own five fields. Every failure is `false`; the reason goes to the
/// `debug` log and nowhere else.
pub fn verify_transaction(tx: &Transaction) -> bool {
    match check_transaction(tx) {
        Verification::Valid => true,
        Verification::Invalid(reason) => {
            tracing::debug!(
                from = %format_address(tx.from_address(), 16),
                nonce = tx.nonce(),
                %reason,
                "transaction failed verification"
            );
            false
        }
    }
}
