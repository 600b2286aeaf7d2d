//! Chains Module
//!
//! Chain metadata directory, wallet account state, and the transaction
//! sender seam. Account and sender state is supplied by the external wallet
//! layer; this crate only resolves which account/sender serves a chain.

pub mod sender;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::token::model::{ChainName, ChainProtocol};

pub use sender::{SenderRegistry, SubmittedTx, TransactionSender, TxReceipt};

/// Provider type carried on constructed transactions. Starknet providers
/// support batched submission of a whole transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    EthersV5,
    SolanaWeb3,
    CosmJs,
    Starknet,
}

/// Metadata for a registered chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainMetadata {
    /// Registry chain name
    pub name: ChainName,
    /// Human-readable display name
    pub display_name: String,
    /// Protocol family
    pub protocol: ChainProtocol,
}

/// Directory of known chains, keyed by chain name.
#[derive(Debug, Clone, Default)]
pub struct ChainDirectory {
    metadata: HashMap<ChainName, ChainMetadata>,
}

impl ChainDirectory {
    /// Creates a directory from a list of chain metadata entries.
    pub fn new(chains: Vec<ChainMetadata>) -> Self {
        let metadata = chains.into_iter().map(|m| (m.name.clone(), m)).collect();
        Self { metadata }
    }

    /// Returns metadata for a chain, if registered.
    pub fn metadata(&self, chain: &str) -> Option<&ChainMetadata> {
        self.metadata.get(chain)
    }

    /// Returns the display name for a chain, falling back to the raw name.
    pub fn display_name(&self, chain: &str) -> String {
        self.metadata
            .get(chain)
            .map(|m| m.display_name.clone())
            .unwrap_or_else(|| chain.to_string())
    }

    /// Returns the protocol family for a chain, if registered.
    pub fn protocol(&self, chain: &str) -> Option<ChainProtocol> {
        self.metadata.get(chain).map(|m| m.protocol)
    }

    /// Whether `chain` is a registered chain name.
    pub fn is_valid_chain(&self, chain: &str) -> bool {
        self.metadata.contains_key(chain)
    }
}

/// A connected wallet account for one protocol family.
#[derive(Debug, Clone, Default)]
pub struct AccountInfo {
    /// Account address, if connected
    pub address: Option<String>,
    /// Account public key, where the protocol exposes one
    pub public_key: Option<String>,
}

/// Connected accounts, one per protocol family.
#[derive(Debug, Clone, Default)]
pub struct ActiveAccounts {
    pub accounts: HashMap<ChainProtocol, AccountInfo>,
}

impl ActiveAccounts {
    /// Returns the account for a protocol family, if connected.
    pub fn account(&self, protocol: ChainProtocol) -> Option<&AccountInfo> {
        self.accounts.get(&protocol)
    }
}

/// Active (wallet-selected) chain per protocol family.
#[derive(Debug, Clone, Default)]
pub struct ActiveChains {
    pub chains: HashMap<ChainProtocol, ChainName>,
}

impl ActiveChains {
    /// Returns the active chain name for a protocol family, if any.
    pub fn active_chain(&self, protocol: ChainProtocol) -> Option<&ChainName> {
        self.chains.get(&protocol)
    }
}

/// Resolves the connected account address for a chain.
///
/// Looks up the chain's protocol family in the directory, then the account
/// connected for that family. Returns `None` when the chain is unknown or
/// no account is connected.
pub fn account_address_for_chain(
    directory: &ChainDirectory,
    chain: &str,
    accounts: &ActiveAccounts,
) -> Option<String> {
    let protocol = directory.protocol(chain)?;
    accounts.account(protocol)?.address.clone()
}

/// Resolves the connected account address and public key for a chain.
pub fn account_address_and_pub_key(
    directory: &ChainDirectory,
    chain: &str,
    accounts: &ActiveAccounts,
) -> (Option<String>, Option<String>) {
    match directory.protocol(chain).and_then(|p| accounts.account(p)) {
        Some(info) => (info.address.clone(), info.public_key.clone()),
        None => (None, None),
    }
}
