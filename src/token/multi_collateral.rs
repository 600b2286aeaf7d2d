//! Multi-Collateral Token Resolution
//!
//! Different routers on one chain may wrap the same underlying collateral.
//! The selection list must not show duplicate routes, but every underlying
//! router has to stay recoverable so the transfer can pick the one with the
//! best destination-side liquidity.

use std::collections::HashMap;

use tracing::debug;

use crate::token::model::{normalize_address, Token};
use crate::token::registry::TokenRegistry;

/// Destination reference: either a chain name or an already-resolved
/// destination token.
#[derive(Debug, Clone, Copy)]
pub enum TokenDestination<'a> {
    Chain(&'a str),
    Token(&'a Token),
}

/// An origin token paired with its destination-side counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPairRoute {
    pub origin_token: Token,
    pub destination_token: Token,
}

/// A selectable token with its disabled flag, as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry {
    pub token: Token,
    pub disabled: bool,
}

/// Normalized origin collateral address -> normalized destination collateral
/// address -> all origin tokens sharing that pair.
pub type MultiCollateralTokenMap = HashMap<String, HashMap<String, Vec<Token>>>;

/// Result of route deduplication.
#[derive(Debug, Clone, Default)]
pub struct DedupedTokens {
    pub tokens: Vec<TokenEntry>,
    pub multi_collateral_token_map: MultiCollateralTokenMap,
}

/// Whether a token is eligible for multi-collateral route selection.
///
/// The origin token must carry a collateral address and a collateralized
/// standard, and its connection to the destination (or the given resolved
/// destination token) must be similarly collateralized.
pub fn is_valid_multi_collateral_token(token: &Token, destination: TokenDestination<'_>) -> bool {
    let has_collateral = token
        .collateral_address_or_denom
        .as_deref()
        .map(|a| !a.is_empty())
        .unwrap_or(false);
    if !has_collateral || !token.is_collateralized() {
        return false;
    }

    let destination_token = match destination {
        TokenDestination::Chain(chain) => match token.connection_for_chain(chain) {
            Some(t) => t,
            None => return false,
        },
        TokenDestination::Token(t) => t,
    };

    let destination_has_collateral = destination_token
        .collateral_address_or_denom
        .as_deref()
        .map(|a| !a.is_empty())
        .unwrap_or(false);
    destination_has_collateral && destination_token.is_collateralized()
}

/// Collects every route candidate on the origin chain wrapping the same
/// collateral as `origin_token`, paired with its own connection to the
/// destination chain.
pub fn tokens_with_same_collateral_addresses(
    registry: &TokenRegistry,
    origin_token: &Token,
    destination_token: &Token,
) -> Vec<TokenPairRoute> {
    let origin_collateral = match origin_token.collateral_address_or_denom.as_deref() {
        Some(addr) if !addr.is_empty() => normalize_address(addr),
        _ => return Vec::new(),
    };
    let destination_chain = destination_token.chain_name.as_str();

    registry
        .tokens_for_route(&origin_token.chain_name, destination_chain)
        .into_iter()
        .filter(|candidate| {
            is_valid_multi_collateral_token(candidate, TokenDestination::Chain(destination_chain))
        })
        .filter_map(|candidate| {
            let candidate_collateral =
                normalize_address(candidate.collateral_address_or_denom.as_deref()?);
            if candidate_collateral != origin_collateral {
                return None;
            }
            let paired = candidate.connection_for_chain(destination_chain)?;
            Some(TokenPairRoute {
                origin_token: candidate.clone(),
                destination_token: paired.clone(),
            })
        })
        .collect()
}

/// Deduplicates a selectable token list for a destination chain.
///
/// Tokens sharing a (normalized origin collateral, normalized destination
/// collateral) pair collapse to one list entry; the full group stays
/// retrievable from the returned map. Ineligible tokens pass through
/// unchanged and contribute nothing to the map.
pub fn dedupe_multi_collateral_tokens(entries: Vec<TokenEntry>, destination: &str) -> DedupedTokens {
    let mut result = DedupedTokens::default();

    for entry in entries {
        if !is_valid_multi_collateral_token(&entry.token, TokenDestination::Chain(destination)) {
            result.tokens.push(entry);
            continue;
        }

        // Eligibility guarantees both collateral addresses are present.
        let origin_address = match entry.token.collateral_address_or_denom.as_deref() {
            Some(addr) => normalize_address(addr),
            None => {
                result.tokens.push(entry);
                continue;
            }
        };
        let destination_address = match entry
            .token
            .connection_for_chain(destination)
            .and_then(|t| t.collateral_address_or_denom.as_deref())
        {
            Some(addr) => normalize_address(addr),
            None => {
                result.tokens.push(entry);
                continue;
            }
        };

        let group = result
            .multi_collateral_token_map
            .entry(origin_address)
            .or_default()
            .entry(destination_address)
            .or_default();

        if group.is_empty() {
            group.push(entry.token.clone());
            result.tokens.push(entry);
        } else {
            debug!(
                symbol = %entry.token.symbol,
                chain = %entry.token.chain_name,
                "Collapsing duplicate multi-collateral route"
            );
            group.push(entry.token);
        }
    }

    result
}
