//! Amount validation and fees.
//!
//! The protocol has no fee concept: value is conserved exactly between
//! sender and recipient. [`calculate_fee`] exists so callers have one place
//! to ask, and it always answers zero.

use rust_decimal::Decimal;

use super::convert::{convert_to_femto, femto_to_exact_f64};
use crate::config::{FEMTO_DECIMALS, MIN_AMOUNT_FEMTO};

/// The default minimum transferable amount in coins (10^-15).
pub fn min_amount() -> Decimal {
    Decimal::from_i128_with_scale(MIN_AMOUNT_FEMTO as i128, FEMTO_DECIMALS)
}

/// Returns `true` if `amount` is at least the default minimum of 10^-15
/// and can be signed.
///
/// Zero is rejected: the default minimum is one femto, not zero. Callers
/// whose context allows zero transfers use [`validate_amount_with_min`].
pub fn validate_amount(amount: Decimal) -> bool {
    validate_amount_with_min(amount, min_amount())
}

/// Returns `true` if `amount >= min_amount` and the amount can be signed:
/// it fits the femto range and its coin value survives the signed
/// message's float encoding. Fails closed for anything else, including
/// negative values.
pub fn validate_amount_with_min(amount: Decimal, min_amount: Decimal) -> bool {
    amount >= min_amount
        && convert_to_femto(amount)
            .map(|conversion| femto_to_exact_f64(conversion.femto).is_some())
            .unwrap_or(false)
}

/// Femto-unit counterpart of [`validate_amount`].
pub fn validate_femto(femto: u128) -> bool {
    femto >= MIN_AMOUNT_FEMTO && femto_to_exact_f64(femto).is_some()
}

/// Transaction fee for `amount`. Always exactly zero.
pub fn calculate_fee(_amount: Decimal) -> Decimal {
    Decimal::ZERO
}
