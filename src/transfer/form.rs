//! Transfer Form Values
//!
//! The form state produced by defaults and query params, mutated by user
//! input, and consumed at submit time.

use serde::{Deserialize, Serialize};

use crate::chains::ChainDirectory;
use crate::config::ClientConfig;
use crate::token::model::ChainName;
use crate::token::registry::TokenRegistry;

/// User-entered transfer parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFormValues {
    pub origin: ChainName,
    pub destination: ChainName,
    /// Index of the selected token in the registry
    pub token_index: Option<usize>,
    /// Index of the selected fee token, when a fee token was requested
    pub fee_token_index: Option<usize>,
    /// Decimal amount text, or a literal NFT id
    pub amount: String,
    pub recipient: String,
}

/// Query-parameter inputs to the initial form values.
#[derive(Debug, Clone, Default)]
pub struct FormQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub token: Option<String>,
    pub fee_token: Option<String>,
}

/// Builds the initial form values from query params and configured
/// defaults.
///
/// Query chain names are only honored when both origin and destination are
/// valid registered chains. The token index prefers the query token, then
/// the default origin chain's first routable token.
pub fn initial_form_values(
    registry: &TokenRegistry,
    directory: &ChainDirectory,
    config: &ClientConfig,
    query: &FormQuery,
) -> TransferFormValues {
    let origin_query = query
        .origin
        .as_deref()
        .filter(|c| directory.is_valid_chain(c));
    let destination_query = query
        .destination
        .as_deref()
        .filter(|c| directory.is_valid_chain(c));

    let default_origin_token = config
        .default_origin_chain
        .as_deref()
        .and_then(|chain| registry.tokens_for_chain(chain).into_iter().next())
        .cloned();

    let token_index = registry.initial_token_index(
        query.token.as_deref(),
        origin_query,
        destination_query,
        config.default_origin_chain.as_deref(),
    );
    let fee_token_index = query.fee_token.as_deref().and_then(|fee_token| {
        registry.initial_token_index(
            Some(fee_token),
            origin_query,
            destination_query,
            config.default_origin_chain.as_deref(),
        )
    });

    let first_token = default_origin_token
        .as_ref()
        .or_else(|| registry.tokens.first());
    let connected_chain = first_token
        .and_then(|t| t.connections.first())
        .map(|t| t.chain_name.clone());

    let chains_valid = origin_query.is_some() && destination_query.is_some();
    let origin = if chains_valid {
        origin_query.unwrap_or_default().to_string()
    } else {
        first_token.map(|t| t.chain_name.clone()).unwrap_or_default()
    };
    let destination = if chains_valid {
        destination_query.unwrap_or_default().to_string()
    } else {
        config
            .default_destination_chain
            .clone()
            .or(connected_chain)
            .unwrap_or_default()
    };

    TransferFormValues {
        origin,
        destination,
        token_index,
        fee_token_index,
        amount: String::new(),
        recipient: String::new(),
    }
}
