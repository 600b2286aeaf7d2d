//! Token Model
//!
//! Core token and chain types shared across the crate. Tokens are entries in
//! the route registry; each token may carry connections to paired tokens on
//! other chains, at most one connection per chain name.

use ethereum_types::U256;
use serde::{Deserialize, Serialize};

/// Chain identifier (registry chain name, e.g. "basesepolia").
pub type ChainName = String;

/// Chain protocol family. Selects account resolution and the transaction
/// sender implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainProtocol {
    /// EVM chains
    Ethereum,
    /// Solana-style chains
    Sealevel,
    /// Cosmos SDK chains
    Cosmos,
    /// Starknet chains (batched transaction submission)
    Starknet,
}

/// Token standard. Determines collateralization and NFT handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    /// EVM router wrapping an ERC20 collateral
    EvmHypCollateral,
    /// EVM synthetic (minted, no underlying collateral)
    EvmHypSynthetic,
    /// EVM router wrapping the native gas token
    EvmHypNative,
    /// CosmWasm router wrapping a collateral token
    CwHypCollateral,
    /// Sealevel router wrapping an SPL collateral
    SealevelHypCollateral,
    /// IBC-denominated token (not collateralized by a router)
    CosmosIbc,
    /// EVM NFT router (amounts are token ids, not quantities)
    EvmHypNft,
}

impl TokenStandard {
    /// Whether routers of this standard hold underlying collateral.
    pub fn is_collateralized(&self) -> bool {
        !matches!(
            self,
            TokenStandard::CosmosIbc | TokenStandard::EvmHypSynthetic | TokenStandard::EvmHypNative
        )
    }
}

/// A token registered on a chain, with its cross-chain connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Chain the token lives on
    pub chain_name: ChainName,
    /// Protocol family of that chain
    pub protocol: ChainProtocol,
    /// Token standard
    pub standard: TokenStandard,
    /// Router address or denom identifying the token on its chain
    pub address_or_denom: String,
    /// Display symbol (e.g. "USDC")
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Decimal places of the smallest unit
    pub decimals: u32,
    /// Optional per-token scaling factor for cross-chain amount conversion
    #[serde(default)]
    pub scale: Option<u32>,
    /// Address of the underlying collateral asset, if any
    #[serde(default)]
    pub collateral_address_or_denom: Option<String>,
    /// Paired tokens on other chains (at most one per chain name)
    #[serde(default)]
    pub connections: Vec<Token>,
}

impl Token {
    /// Returns the paired token on `chain`, if a connection exists.
    ///
    /// Connections are unique per chain name; the first match is the only
    /// match.
    pub fn connection_for_chain(&self, chain: &str) -> Option<&Token> {
        self.connections.iter().find(|t| t.chain_name == chain)
    }

    /// Whether this token is an NFT standard (amounts are literal ids).
    pub fn is_nft(&self) -> bool {
        matches!(self.standard, TokenStandard::EvmHypNft)
    }

    /// Whether this token's router holds underlying collateral.
    pub fn is_collateralized(&self) -> bool {
        self.standard.is_collateralized()
    }

    /// Pairs this token with a smallest-unit amount.
    pub fn amount(&self, units: U256) -> TokenAmount {
        TokenAmount {
            token: self.clone(),
            units,
        }
    }
}

/// A token together with a smallest-unit amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    pub token: Token,
    pub units: U256,
}

/// Normalizes an address or denom for comparison (lowercase).
pub fn normalize_address(addr: &str) -> String {
    addr.to_lowercase()
}

/// Case-insensitive address comparison.
pub fn eq_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
