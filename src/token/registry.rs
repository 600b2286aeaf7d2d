//! Token Registry
//!
//! Holds the registered token set and answers route queries: token by form
//! index, tokens on a chain, tokens routable between a chain pair, and the
//! initial token index used by form defaults. Also assembles the
//! per-symbol/per-chain grouping the selection UI consumes.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::chains::ChainDirectory;
use crate::token::model::{eq_address, ChainName, Token};

/// The registered token set.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    pub tokens: Vec<Token>,
}

impl TokenRegistry {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Returns the token at a form index.
    pub fn token_by_index(&self, index: Option<usize>) -> Option<&Token> {
        index.and_then(|i| self.tokens.get(i))
    }

    /// Returns all tokens on `chain`.
    pub fn tokens_for_chain(&self, chain: &str) -> Vec<&Token> {
        self.tokens.iter().filter(|t| t.chain_name == chain).collect()
    }

    /// Returns tokens on `origin` that can route to `destination`.
    pub fn tokens_for_route(&self, origin: &str, destination: &str) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|t| t.chain_name == origin && t.connection_for_chain(destination).is_some())
            .collect()
    }

    /// Resolves the initial token index for form defaults.
    ///
    /// Prefers a token on `origin` matching the query value by address or
    /// symbol, then the first routable token on the default origin chain,
    /// then the first token with any connection.
    pub fn initial_token_index(
        &self,
        query_token: Option<&str>,
        origin: Option<&str>,
        destination: Option<&str>,
        default_origin_chain: Option<&str>,
    ) -> Option<usize> {
        if let (Some(query), Some(origin)) = (query_token, origin) {
            let matched = self.tokens.iter().position(|t| {
                t.chain_name == origin
                    && (eq_address(&t.address_or_denom, query) || t.symbol == query)
                    && destination
                        .map(|d| t.connection_for_chain(d).is_some())
                        .unwrap_or(true)
            });
            if matched.is_some() {
                return matched;
            }
            debug!(query, origin, "No token matched query params, falling back to defaults");
        }

        if let Some(chain) = default_origin_chain {
            let matched = self
                .tokens
                .iter()
                .position(|t| t.chain_name == chain && !t.connections.is_empty());
            if matched.is_some() {
                return matched;
            }
        }

        self.tokens.iter().position(|t| !t.connections.is_empty())
    }
}

/// A token grouped under its chain, with the chain's display name.
#[derive(Debug, Clone)]
pub struct ChainTokenEntry {
    pub token: Token,
    pub chain_display_name: String,
}

/// Tokens sharing a symbol, mapped by chain.
#[derive(Debug, Clone)]
pub struct TokensBySymbol {
    /// Representative token for symbol-level display
    pub token_information: Token,
    /// Tokens by chain name; disabled chains are absent
    pub chains: HashMap<ChainName, ChainTokenEntry>,
}

/// Groups tokens by symbol and chain for the selection UI.
///
/// Each token lands under its own chain within its symbol group. Tokens on
/// disabled chains still create the symbol group but contribute no chain
/// entry. Chain metadata is looked up once per token.
pub fn assemble_tokens_by_symbol_chain_map(
    tokens: &[Token],
    directory: &ChainDirectory,
    disabled_chains: &HashSet<ChainName>,
) -> HashMap<String, TokensBySymbol> {
    let mut map: HashMap<String, TokensBySymbol> = HashMap::new();

    for token in tokens {
        let metadata = directory.metadata(&token.chain_name);
        let group = map
            .entry(token.symbol.clone())
            .or_insert_with(|| TokensBySymbol {
                token_information: token.clone(),
                chains: HashMap::new(),
            });

        if disabled_chains.contains(&token.chain_name) {
            continue;
        }

        let chain_display_name = metadata
            .map(|m| m.display_name.clone())
            .unwrap_or_else(|| token.chain_name.clone());
        group.chains.insert(
            token.chain_name.clone(),
            ChainTokenEntry {
                token: token.clone(),
                chain_display_name,
            },
        );
    }

    map
}
