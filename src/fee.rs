//! Origin-Fee Helpers
//!
//! Transfers leaving a fee-charging origin pay a per-destination bridge fee
//! in a designated fee token. Transfers of the fee token itself absorb the
//! fee into the sent amount (the contract deducts it); other tokens pay via
//! a separate approval, built by the executor.

use anyhow::{Context, Result};
use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode};
use ethereum_types::U256;

use crate::config::ClientConfig;

/// Whether the fee bonus applies: fee mode enabled, origin carries the
/// fee-charging prefix, destination does not, the transferred token is the
/// fee token, and the configured per-destination fee is positive.
pub fn should_apply_fee_bonus(
    config: &ClientConfig,
    origin: &str,
    destination: &str,
    token_symbol: &str,
) -> bool {
    let fee = &config.origin_fee;
    fee.enabled
        && !fee.origin_prefix.is_empty()
        && origin.starts_with(&fee.origin_prefix)
        && !destination.starts_with(&fee.origin_prefix)
        && token_symbol == fee.fee_token_symbol
        && config.fee_for_destination(destination) > 0.0
}

/// Adds the configured fee to a decimal amount when the bonus applies.
///
/// Non-numeric input passes through unchanged; the validator owns amount
/// format errors.
pub fn amount_with_fee_bonus(
    config: &ClientConfig,
    amount: &str,
    origin: &str,
    destination: &str,
    token_symbol: &str,
) -> String {
    if !should_apply_fee_bonus(config, origin, destination, token_symbol) {
        return amount.to_string();
    }
    let fee = config.fee_for_destination(destination);

    let value: BigDecimal = match amount.trim().parse() {
        Ok(v) => v,
        Err(_) => return amount.to_string(),
    };
    let fee_value: BigDecimal = match format!("{}", fee).parse() {
        Ok(v) => v,
        Err(_) => return amount.to_string(),
    };

    (value + fee_value).normalized().to_string()
}

/// Expresses the configured per-destination fee in the fee token's smallest
/// unit.
pub fn fee_units(config: &ClientConfig, destination: &str) -> Result<U256> {
    let fee = config.fee_for_destination(destination);
    let value: BigDecimal = format!("{}", fee)
        .parse()
        .with_context(|| format!("Invalid configured fee {} for {}", fee, destination))?;

    let shift = BigDecimal::new(BigInt::from(1), -(config.origin_fee.fee_token_decimals as i64));
    let scaled = (value * shift).with_scale_round(0, RoundingMode::Down);
    let (int, _) = scaled.into_bigint_and_exponent();
    U256::from_dec_str(&int.to_string()).context("Configured fee exceeds 256 bits")
}
