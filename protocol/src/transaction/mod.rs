//! # Transaction Module
//!
//! Canonical encoding, signing, and verification of transfers.
//!
//! ## Architecture
//!
//! ```text
//! message.rs      : the fixed 88-byte canonical signing message
//! types.rs        : UnsignedTransaction (draft) and Transaction (signed)
//! signing.rs      : sign_transaction / sign_transfer from boundary inputs
//! verification.rs : fail-closed signature verification
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Draft**: fill in an [`UnsignedTransaction`], converting the coin
//!    amount to femto-units once with [`crate::amount::to_femto`].
//! 2. **Sign**: [`UnsignedTransaction::sign`], or [`sign_transaction`]
//!    straight from hex inputs.
//! 3. **Submit**: hand the [`Transaction`] to the node client.
//! 4. **Verify**: anyone holding the transaction runs
//!    [`verify_transaction`]; the node does the same before applying it.
//!
//! Nonces and timestamps are supplied by the caller. Allocating nonces and
//! judging staleness belong to the ledger.

pub mod message;
pub mod signing;
pub mod types;
pub mod verification;

pub use message::CanonicalMessage;
pub use signing::{sign_transaction, sign_transfer, SigningError};
pub use types::{Transaction, UnsignedTransaction};
pub use verification::{check_transaction, verify_transaction, InvalidReason, Verification};
