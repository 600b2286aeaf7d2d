//! Token Module
//!
//! Token model, route registry, and multi-collateral route resolution.

pub mod model;
pub mod multi_collateral;
pub mod registry;

pub use model::{
    eq_address, normalize_address, ChainName, ChainProtocol, Token, TokenAmount, TokenStandard,
};
pub use multi_collateral::{
    dedupe_multi_collateral_tokens, is_valid_multi_collateral_token,
    tokens_with_same_collateral_addresses, DedupedTokens, MultiCollateralTokenMap,
    TokenDestination, TokenEntry, TokenPairRoute,
};
pub use registry::{assemble_tokens_by_symbol_chain_map, TokenRegistry, TokensBySymbol};
