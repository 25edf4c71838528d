//! # Fixed-Point Amounts
//!
//! Humans think in coins with decimals; the protocol accounts in integer
//! femto-units. One coin is 10^15 femto-units, and every conversion between
//! the two goes through exact decimal arithmetic (`rust_decimal`), never
//! binary floating point.
//!
//! ```text
//! convert.rs : to_femto / from_femto, precision-loss reporting, serde adapter
//! policy.rs  : amount validation and the (always zero) fee
//! ```
//!
//! ## Precision loss
//!
//! Amounts with more than 15 fractional digits cannot be represented. They
//! are truncated toward zero, never rounded, and the truncation is reported
//! through [`FemtoConversion::truncated`] and a `tracing` warning.
//!
//! A second limit applies to signing: the signed message carries the amount
//! as an `f64`, so only amounts whose float converts back to the same femto
//! value can be signed. Every amount with at most 15 significant digits
//! qualifies. [`validate_amount`] checks both limits.

pub mod convert;
pub mod policy;

pub use convert::{
    convert_str_to_femto, convert_to_femto, exact_femto_from_f64, femto_to_exact_f64, format_coins,
    from_femto, from_femto_f64, serde_coins, to_femto, to_femto_f64, to_femto_str, AmountError,
    FemtoConversion,
};
pub use policy::{calculate_fee, min_amount, validate_amount, validate_amount_with_min, validate_femto};
