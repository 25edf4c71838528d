//! Building and signing transactions from boundary inputs.
//!
//! [`sign_transaction`] takes everything as it arrives from a user or a
//! config file: hex addresses, a hex secret key, and an amount already in
//! femto-units. [`sign_transfer`] does the same for a decimal coin amount,
//! converting it exactly once before anything is encoded.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{Transaction, UnsignedTransaction};
use crate::address::{Address, EncodingError};
use crate::amount::{to_femto, AmountError};
use crate::crypto::{KeyError, Keypair};

/// Why a transaction could not be signed. Never produced by verification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SigningError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    KeyFormat(#[from] KeyError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("secret key belongs to {signer}, not to sender {sender}")]
    SenderMismatch { sender: Address, signer: Address },
}

/// Signs a transfer of `amount_femto` from `from` to `to`.
///
/// The amount must have an exact float coin value (any amount with at most
/// 15 significant digits does); otherwise [`AmountError::Inexact`] comes
/// back and nothing is signed.
///
/// `secret_key` is 64 hex characters (the 32-byte secret) or 128 (secret
/// followed by its public key). Inputs are checked in order: `from`, `to`,
/// then the key, and the first failure is returned.
pub fn sign_transaction(
    from: &str,
    to: &str,
    amount_femto: u128,
    nonce: u64,
    timestamp: u64,
    secret_key: &str,
) -> Result<Transaction, SigningError> {
    let from = Address::parse("from", from)?;
    let to = Address::parse("to", to)?;
    let keypair = Keypair::from_secret_key_hex(secret_key)?;

    let tx = UnsignedTransaction::new(from, to, amount_femto, nonce, timestamp).sign(&keypair)?;
    tracing::debug!(
        from = %from,
        to = %to,
        amount_femto = %amount_femto,
        nonce,
        "signed transaction"
    );
    Ok(tx)
}

/// Like [`sign_transaction`], with the amount in coins.
///
/// Digits past the 15th fractional place are truncated (and a warning is
/// logged) before signing; the signed amount is what
/// [`Transaction::amount_coins`] reports afterwards.
pub fn sign_transfer(
    from: &str,
    to: &str,
    amount: Decimal,
    nonce: u64,
    timestamp: u64,
    secret_key: &str,
) -> Result<Transaction, SigningError> {
    let amount_femto = to_femto(amount)?;
    sign_transaction(from, to, amount_femto, nonce, timestamp, secret_key)
}
