//! Form Validator
//!
//! Validates submitted form values against the route registry, configured
//! policy, and the SDK's own semantic checks, and resolves the effective
//! transfer token. Returns a field-keyed error mapping (or `None`) together
//! with the route override, when best-route selection picked a different
//! router than the user's nominal selection.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::error;

use crate::amount::{from_units, to_units};
use crate::chains::{account_address_and_pub_key, ActiveAccounts, ChainDirectory};
use crate::config::ClientConfig;
use crate::token::model::{eq_address, Token};
use crate::token::registry::TokenRegistry;
use crate::transfer::form::TransferFormValues;
use crate::transfer::route;
use crate::warp::{ValidateTransferParams, WarpCoreApi};

/// Max length of the generic message surfaced for unrecognized errors.
const FORM_ERROR_MAX_LEN: usize = 40;

/// Validation outcome: field-keyed errors (or `None` when valid) plus the
/// route-override token, when one applies.
pub type ValidationOutcome = (Option<HashMap<String, String>>, Option<Token>);

/// Validates the transfer form.
///
/// Never returns an error: exceptions from the SDK or arithmetic are caught,
/// logged, and surfaced as a `form`-keyed message.
pub async fn validate_form(
    warp: &dyn WarpCoreApi,
    registry: &TokenRegistry,
    directory: &ChainDirectory,
    config: &ClientConfig,
    values: &TransferFormValues,
    accounts: &ActiveAccounts,
) -> ValidationOutcome {
    match run_validation(warp, registry, directory, config, values, accounts).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Error validating form: {:#}", e);
            (Some(field_error("form", form_error_message(&e))), None)
        }
    }
}

async fn run_validation(
    warp: &dyn WarpCoreApi,
    registry: &TokenRegistry,
    directory: &ChainDirectory,
    config: &ClientConfig,
    values: &TransferFormValues,
    accounts: &ActiveAccounts,
) -> Result<ValidationOutcome> {
    let token = match registry.token_by_index(values.token_index) {
        Some(token) => token,
        None => return Ok((Some(field_error("token", "Token is required".into())), None)),
    };
    let destination_token = match token.connection_for_chain(&values.destination) {
        Some(token) => token.clone(),
        None => return Ok((Some(field_error("token", "Token is required".into())), None)),
    };

    if config.is_router_recipient(&values.destination, &values.recipient) {
        return Ok((
            Some(field_error(
                "recipient",
                "Router address is not valid as recipient".into(),
            )),
            None,
        ));
    }

    // For fee-token transfers out of the fee-charging origin, the contract
    // deducts the fee from the sent amount, so the input must exceed it.
    let fee = &config.origin_fee;
    if fee.enabled && values.origin == fee.origin_chain && token.symbol == fee.fee_token_symbol {
        let input: f64 = values.amount.parse().unwrap_or(f64::NAN);
        let minimum = config.fee_for_destination(&values.destination);
        if minimum > 0.0 && input <= minimum {
            return Ok((
                Some(field_error(
                    "amount",
                    format!("Amount must be greater than {}", minimum),
                )),
                None,
            ));
        }
    }

    let transfer_token = route::transfer_token(warp, registry, token, &destination_token).await;
    let amount_units = to_units(&values.amount, transfer_token.decimals)?;

    let limit = warp
        .multi_collateral_limit(token, &values.destination, amount_units)
        .await
        .context("Transfer limit check failed")?;
    if let Some(limit) = limit {
        return Ok((
            Some(field_error(
                "amount",
                format!(
                    "Transfer limit is {} {}",
                    from_units(limit, token.decimals),
                    token.symbol
                ),
            )),
            None,
        ));
    }

    let (address, public_key) =
        account_address_and_pub_key(directory, &values.origin, accounts);

    let result = warp
        .validate_transfer(ValidateTransferParams {
            origin_token_amount: transfer_token.amount(amount_units),
            destination: values.destination.clone(),
            recipient: values.recipient.clone(),
            sender: address.unwrap_or_default(),
            sender_pub_key: public_key,
        })
        .await
        .context("Transfer validation failed")?;
    if let Some(errors) = result {
        return Ok((Some(errors), None));
    }

    if eq_address(&transfer_token.address_or_denom, &token.address_or_denom) {
        return Ok((None, None));
    }
    Ok((None, Some(transfer_token)))
}

fn field_error(field: &str, message: String) -> HashMap<String, String> {
    HashMap::from([(field.to_string(), message)])
}

/// Maps an unexpected validation error to a user-facing message.
///
/// Insufficient-funds and missing-account patterns are matched against the
/// full lowercased error chain; everything else is truncated for display.
fn form_error_message(error: &anyhow::Error) -> String {
    let full = format!("{:#}", error);
    let lowered = full.to_lowercase();
    if lowered.contains("insufficient funds")
        || lowered.contains("insufficient lamports")
        || lowered.contains("accountnotfound")
    {
        return "Insufficient funds for gas fees".to_string();
    }
    full.chars().take(FORM_ERROR_MAX_LEN).collect()
}
