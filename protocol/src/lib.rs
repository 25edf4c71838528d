// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # PhysicsCoin Protocol: Transaction Authorization Core
//!
//! Two things in this crate carry real correctness obligations, and
//! everything else exists to serve them:
//!
//! 1. **The canonical message.** A transfer is encoded into exactly 88 bytes
//!    and signed with Ed25519. Signer and verifier must produce the same
//!    bytes or every transaction fails, so the layout is fixed down to the
//!    byte order.
//! 2. **Fixed-point amounts.** Humans write `100.5`; the protocol holds
//!    `100_500_000_000_000_000` femto-units. The conversion is exact decimal
//!    arithmetic, and any precision it has to drop is reported. The signed
//!    message carries the coin value as a float, derived from the femto
//!    amount and only when it maps back to that same amount.
//!
//! ## Modules
//!
//! - **config**: Protocol constants and client settings.
//! - **amount**: Coin ↔ femto conversion, validation, zero fee.
//! - **address**: 64-hex-character addresses and hex decoding errors.
//! - **crypto**: Ed25519 keys, SHA-256, seed derivation.
//! - **transaction**: Canonical message, draft/signed types, sign, verify.
//! - **client**: Thin HTTP façade over a node's API.
//!
//! ## Quick start
//!
//! ```
//! use physicscoin_protocol::amount::to_femto;
//! use physicscoin_protocol::crypto::Keypair;
//! use physicscoin_protocol::transaction::{verify_transaction, UnsignedTransaction};
//! use rust_decimal::Decimal;
//!
//! let alice = Keypair::generate();
//! let bob = Keypair::generate();
//!
//! let amount = to_femto(Decimal::new(1005, 1)).unwrap(); // 100.5 coins
//! let tx = UnsignedTransaction::new(alice.address(), bob.address(), amount, 0, 1_700_000_000)
//!     .sign(&alice)
//!     .unwrap();
//!
//! assert!(verify_transaction(&tx));
//! ```
//!
//! Everything except the client is synchronous and free of shared state, so
//! it can be called from any number of threads without coordination.

pub mod address;
pub mod amount;
pub mod client;
pub mod config;
pub mod crypto;
pub mod transaction;

pub use address::{is_valid_address, Address, EncodingError};
pub use crypto::{generate_keypair, KeyError, Keypair};
pub use transaction::{sign_transaction, verify_transaction, Transaction};
