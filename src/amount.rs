//! Amount Conversion Helpers
//!
//! Decimal-text to smallest-unit conversion and the scaled destination
//! amount shown during review. Arithmetic goes through `BigDecimal` and
//! fixed-point integer math; floats never touch amounts.

use anyhow::{Context, Result};
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::{BigDecimal, RoundingMode};
use ethereum_types::{U256, U512};

use crate::token::model::Token;

/// Fixed-point precision for scale conversion.
const PRECISION_FACTOR: u64 = 100_000;

/// Converts decimal text into smallest units (`toWei`).
///
/// Truncates excess fractional digits. Errors on unparseable or negative
/// input.
pub fn to_units(amount: &str, decimals: u32) -> Result<U256> {
    let value: BigDecimal = amount
        .trim()
        .parse()
        .with_context(|| format!("Invalid decimal amount '{}'", amount))?;
    if value.sign() == Sign::Minus {
        anyhow::bail!("Amount must not be negative: {}", amount);
    }

    // Shift the decimal point right by `decimals`, then truncate.
    let shift = BigDecimal::new(BigInt::from(1), -(decimals as i64));
    let shifted = (value * shift).with_scale_round(0, RoundingMode::Down);
    let (int, _) = shifted.into_bigint_and_exponent();
    U256::from_dec_str(&int.to_string()).context("Amount exceeds 256 bits")
}

/// Renders smallest units as decimal text (`fromWei`), trimming trailing
/// zeros.
pub fn from_units(units: U256, decimals: u32) -> String {
    let raw = units.to_string();
    if decimals == 0 {
        return raw;
    }

    let decimals = decimals as usize;
    let padded = if raw.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - raw.len()), raw)
    } else {
        raw
    };
    let split = padded.len() - decimals;
    let (int_part, frac_part) = padded.split_at(split);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Converts an origin smallest-unit amount into its destination-equivalent
/// and renders it with the origin token's decimals.
///
/// Used only for review display, never for execution. Returns `None` when
/// either scale is unset or the scales are equal (no conversion needed).
pub fn scaled_destination_amount(
    origin_token: &Token,
    destination_token: &Token,
    origin_units: U256,
) -> Option<String> {
    let origin_scale = origin_token.scale?;
    let destination_scale = destination_token.scale?;
    if origin_scale == destination_scale || origin_scale == 0 {
        return None;
    }

    // Fixed-point multiply/divide to avoid floating-point drift.
    let multiplier = (destination_scale as u128 * PRECISION_FACTOR as u128) / origin_scale as u128;
    let product = origin_units.full_mul(U256::from(multiplier));
    let scaled = product / U512::from(PRECISION_FACTOR);
    let scaled = U256::try_from(scaled).ok()?;
    Some(from_units(scaled, origin_token.decimals))
}
