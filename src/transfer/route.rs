//! Best-Route Selection
//!
//! When several routers wrap the same collateral, pick the route whose
//! destination side holds the most collateral at transfer time. Balance
//! probes are best-effort: failed probes drop out of consideration and the
//! user's nominal selection wins when nothing can be probed.

use ethereum_types::U256;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::token::model::Token;
use crate::token::multi_collateral::{
    is_valid_multi_collateral_token, tokens_with_same_collateral_addresses, TokenDestination,
};
use crate::token::registry::TokenRegistry;
use crate::warp::WarpCoreApi;

/// Resolves the effective transfer token for a chosen origin/destination
/// pair.
///
/// Non-multi-collateral tokens, and groups with a single candidate, return
/// the origin token unchanged. Otherwise every candidate's destination-side
/// collateral is probed concurrently and the candidate with the highest
/// balance wins; ties keep probe order.
pub async fn transfer_token(
    warp: &dyn WarpCoreApi,
    registry: &TokenRegistry,
    origin_token: &Token,
    destination_token: &Token,
) -> Token {
    if !is_valid_multi_collateral_token(origin_token, TokenDestination::Token(destination_token)) {
        return origin_token.clone();
    }

    let candidates =
        tokens_with_same_collateral_addresses(registry, origin_token, destination_token);
    if candidates.len() <= 1 {
        return origin_token.clone();
    }

    debug!(
        count = candidates.len(),
        collateral = origin_token.collateral_address_or_denom.as_deref().unwrap_or(""),
        "Multiple multi-collateral routes found, probing destination balances"
    );

    let probes = candidates.iter().map(|pair| async {
        match warp.token_collateral(&pair.destination_token).await {
            Ok(balance) => Some((pair.origin_token.clone(), balance)),
            Err(e) => {
                warn!(
                    chain = %pair.destination_token.chain_name,
                    "Collateral probe failed, excluding route: {}",
                    e
                );
                None
            }
        }
    });

    let mut balances: Vec<(Token, U256)> = join_all(probes).await.into_iter().flatten().collect();
    if balances.is_empty() {
        return origin_token.clone();
    }

    // Stable sort: equal balances keep probe order.
    balances.sort_by(|a, b| b.1.cmp(&a.1));

    let (best, balance) = &balances[0];
    if best.address_or_denom != origin_token.address_or_denom {
        debug!(
            route = %best.address_or_denom,
            %balance,
            "Found route with higher destination collateral, switching route"
        );
    }
    best.clone()
}
