//! Decimal coin values to femto-units and back.
//!
//! `to_femto(100.5) == 100_500_000_000_000_000`. Femto amounts are `u128`,
//! bounded by [`MAX_AMOUNT_FEMTO`], so every genesis supply fits with room
//! to spare. The forward direction truncates past the 15th fractional digit;
//! the reverse direction is exact and returns a normalized [`Decimal`].
//!
//! The signed message and the wire carry the amount as an `f64` coin value.
//! [`femto_to_exact_f64`] gives that float only when it converts back to the
//! very same femto amount, which holds for anything with at most 15
//! significant digits.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::config::{FEMTO_DECIMALS, FEMTO_PER_COIN, MAX_AMOUNT_FEMTO};

/// Errors converting between coin amounts and femto-units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount must not be negative, got {0}")]
    Negative(Decimal),

    #[error("amount {0} exceeds the largest representable amount")]
    Overflow(Decimal),

    #[error("femto amount {0} exceeds the largest representable amount")]
    OutOfRange(u128),

    #[error("femto amount {0} has no exact 64-bit float coin value and cannot be signed")]
    Inexact(u128),

    #[error("cannot parse {input:?} as a decimal coin amount")]
    Parse { input: String },
}

/// Result of a decimal-to-femto conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FemtoConversion {
    /// The amount in femto-units.
    pub femto: u128,
    /// `true` when digits beyond the 15th fractional place were dropped.
    pub truncated: bool,
}

/// Converts a coin amount to femto-units, reporting whether precision was
/// lost. Does not log; see [`to_femto`] for the logging variant.
pub fn convert_to_femto(coins: Decimal) -> Result<FemtoConversion, AmountError> {
    if coins < Decimal::ZERO {
        return Err(AmountError::Negative(coins));
    }

    let kept = coins.round_dp_with_strategy(FEMTO_DECIMALS, RoundingStrategy::ToZero);
    let truncated = kept != coins;

    // `kept` has at most 15 fractional digits, so scaling its mantissa up to
    // exactly 15 is integer-only arithmetic.
    let shift = FEMTO_DECIMALS - kept.scale();
    let femto = kept
        .mantissa()
        .checked_mul(10i128.pow(shift))
        .and_then(|v| u128::try_from(v).ok())
        .filter(|&v| v <= MAX_AMOUNT_FEMTO)
        .ok_or(AmountError::Overflow(coins))?;

    Ok(FemtoConversion { femto, truncated })
}

/// Parses a decimal string and converts it to femto-units.
///
/// Fractional digits past the 15th are cut off textually before parsing, so
/// inputs longer than `Decimal`'s 28-digit precision still truncate exactly
/// instead of being rounded by the parser. Scientific notation is accepted.
/// At least one digit is required: `""`, `"."` and `"-"` are parse errors,
/// not zero.
pub fn convert_str_to_femto(input: &str) -> Result<FemtoConversion, AmountError> {
    let parse_error = || AmountError::Parse {
        input: input.to_string(),
    };
    let text = input.trim();

    if text.contains(|c| c == 'e' || c == 'E') {
        let coins = Decimal::from_scientific(text).map_err(|_| parse_error())?;
        return convert_to_femto(coins);
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(parse_error());
    }

    let keep = fraction.len().min(FEMTO_DECIMALS as usize);
    let (kept, dropped) = fraction.split_at(keep);
    let dropped_nonzero = dropped.bytes().any(|b| b != b'0');

    let whole = if whole.is_empty() { "0" } else { whole };
    let exact = if kept.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{kept}")
    };

    let coins = Decimal::from_str_exact(&exact).map_err(|_| parse_error())?;
    let mut conversion = convert_to_femto(coins)?;
    conversion.truncated |= dropped_nonzero;
    Ok(conversion)
}

/// Converts a coin amount to femto-units.
///
/// Digits past the 15th fractional place are truncated and a warning is
/// emitted. The conversion still succeeds.
pub fn to_femto(coins: Decimal) -> Result<u128, AmountError> {
    let conversion = convert_to_femto(coins)?;
    warn_if_truncated(&coins.to_string(), &conversion);
    Ok(conversion.femto)
}

/// Parses a decimal string and converts it to femto-units. Truncation is
/// reported the same way as [`to_femto`].
pub fn to_femto_str(input: &str) -> Result<u128, AmountError> {
    let conversion = convert_str_to_femto(input)?;
    warn_if_truncated(input, &conversion);
    Ok(conversion.femto)
}

/// Converts a float coin amount to femto-units.
///
/// The float is first rendered as its shortest round-trip decimal string
/// (`100.5` stays `"100.5"`), and that string is converted exactly. The
/// binary value is never multiplied directly.
pub fn to_femto_f64(coins: f64) -> Result<u128, AmountError> {
    if !coins.is_finite() {
        return Err(AmountError::Parse {
            input: coins.to_string(),
        });
    }
    to_femto_str(&coins.to_string())
}

/// Converts femto-units back to an exact, normalized coin amount.
pub fn from_femto(femto: u128) -> Result<Decimal, AmountError> {
    i128::try_from(femto)
        .ok()
        .filter(|_| femto <= MAX_AMOUNT_FEMTO)
        .and_then(|v| Decimal::try_from_i128_with_scale(v, FEMTO_DECIMALS).ok())
        .map(|coins| coins.normalize())
        .ok_or(AmountError::OutOfRange(femto))
}

/// Converts femto-units to the nearest float coin amount. Exactness may be
/// lost here and only here.
///
/// The exact decimal text is parsed, so the result is correctly rounded and
/// identical on every platform.
pub fn from_femto_f64(femto: u128) -> f64 {
    // Digits with at most one point always parse; overflow gives infinity.
    femto_to_text(&femto).parse().unwrap_or(f64::NAN)
}

/// The float coin value of `femto`, if that float converts back to exactly
/// `femto`. This is the value the canonical message and the wire carry.
pub fn femto_to_exact_f64(femto: u128) -> Option<f64> {
    let coins = from_femto_f64(femto);
    (exact_femto_from_f64(coins) == Some(femto)).then_some(coins)
}

/// The femto amount a float coin value stands for, if its shortest decimal
/// form has at most 15 fractional digits. Negative and non-finite values
/// give `None`. Does not log.
pub fn exact_femto_from_f64(coins: f64) -> Option<u128> {
    if !coins.is_finite() {
        return None;
    }
    convert_str_to_femto(&coins.to_string())
        .ok()
        .filter(|conversion| !conversion.truncated)
        .map(|conversion| conversion.femto)
}

/// Formats a femto amount as coins with a fixed number of decimal places.
pub fn format_coins(femto: u128, decimals: u32) -> Result<String, AmountError> {
    let coins = from_femto(femto)?.round_dp(decimals);
    Ok(format!("{:.*}", decimals as usize, coins))
}

/// Exact, normalized decimal text of a femto amount: `"100.5"`, `"0"`.
fn femto_to_text(femto: &u128) -> String {
    let whole = femto / FEMTO_PER_COIN;
    let fraction = femto % FEMTO_PER_COIN;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{fraction:015}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

fn warn_if_truncated(input: &str, conversion: &FemtoConversion) {
    if conversion.truncated {
        tracing::warn!(
            amount = input,
            femto = %conversion.femto,
            "amount has more than 15 fractional digits; truncated toward zero"
        );
    }
}

/// Serde adapter for femto amounts carried as coins on the wire.
///
/// Serializes as a JSON number when the float reproduces the exact femto
/// value, which is always the case for a signed transaction. Anything else
/// goes out as a decimal string and logs a warning: nodes that read
/// `amount` only as a JSON number see such a payload as zero and reject it.
/// Deserializes from either form; empty or malformed strings are errors.
///
/// ```ignore
/// #[serde(with = "crate::amount::serde_coins")]
/// amount: u128,
/// ```
pub mod serde_coins {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{femto_to_exact_f64, femto_to_text, to_femto_f64, to_femto_str};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireAmount {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(femto: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        match femto_to_exact_f64(*femto) {
            Some(coins) => serializer.serialize_f64(coins),
            None => {
                tracing::warn!(
                    femto = %femto,
                    "amount has no exact float form; sending it as a decimal string"
                );
                serializer.serialize_str(&femto_to_text(femto))
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let femto = match WireAmount::deserialize(deserializer)? {
            WireAmount::Number(coins) => to_femto_f64(coins),
            WireAmount::Text(coins) => to_femto_str(&coins),
        };
        femto.map_err(de::Error::custom)
    }
}
