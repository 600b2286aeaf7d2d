//! External SDK Seam
//!
//! The cross-chain messaging SDK performs all protocol work: route-aware
//! transfer validation, transaction construction, and collateral queries.
//! This crate drives it through the `WarpCoreApi` trait so the orchestration
//! logic can be exercised without chain access.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use ethereum_types::U256;
use serde_json::Value;

use crate::chains::{ProviderType, TxReceipt};
use crate::token::model::{ChainName, Token, TokenAmount};

/// Category of a constructed transaction. Determines which signing and
/// confirming statuses the executor shows while the transaction is in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxCategory {
    Approval,
    Revoke,
    Transfer,
}

impl TxCategory {
    /// Title-cased label used in confirmation notices.
    pub fn label(&self) -> &'static str {
        match self {
            TxCategory::Approval => "Approval",
            TxCategory::Revoke => "Revoke",
            TxCategory::Transfer => "Transfer",
        }
    }
}

/// A transaction constructed by the SDK. The payload is opaque to this
/// layer and is handed to the matching sender unchanged.
#[derive(Debug, Clone)]
pub struct WarpTransaction {
    pub category: TxCategory,
    pub provider_type: ProviderType,
    pub payload: Value,
}

/// Parameters for SDK-side transfer validation.
#[derive(Debug, Clone)]
pub struct ValidateTransferParams {
    pub origin_token_amount: TokenAmount,
    pub destination: ChainName,
    pub recipient: String,
    pub sender: String,
    pub sender_pub_key: Option<String>,
}

/// Parameters for remote-transfer transaction construction.
#[derive(Debug, Clone)]
pub struct TransferTxsParams {
    pub origin_token_amount: TokenAmount,
    pub destination: ChainName,
    pub sender: String,
    pub recipient: String,
}

/// The external cross-chain SDK.
///
/// Collateral and limit queries are best-effort from the caller's point of
/// view where noted; implementations should not retry internally.
#[async_trait]
pub trait WarpCoreApi: Send + Sync {
    /// Runs the SDK's own semantic validation (route existence, solvency
    /// estimate, recipient format per protocol). Returns a field-keyed
    /// error mapping, or `None` when the transfer is valid.
    async fn validate_transfer(
        &self,
        params: ValidateTransferParams,
    ) -> Result<Option<HashMap<String, String>>>;

    /// Constructs the ordered transaction list for a remote transfer. May
    /// include an approval ahead of the transfer itself.
    async fn transfer_remote_txs(&self, params: TransferTxsParams) -> Result<Vec<WarpTransaction>>;

    /// Whether the destination side holds enough collateral to honor the
    /// transfer.
    async fn is_destination_collateral_sufficient(
        &self,
        origin_token_amount: &TokenAmount,
        destination: &str,
    ) -> Result<bool>;

    /// Collateral balance held by `token`'s router on its own chain.
    async fn token_collateral(&self, token: &Token) -> Result<U256>;

    /// Per-route transfer limit check. Returns `Some(limit)` when `units`
    /// exceeds the configured limit for this token/destination route.
    async fn multi_collateral_limit(
        &self,
        token: &Token,
        destination: &str,
        units: U256,
    ) -> Result<Option<U256>>;

    /// Builds an ERC20-style approval transaction on `origin` granting
    /// `spender` an allowance of `units` of the token at `token_address`.
    async fn populate_approve_tx(
        &self,
        origin: &str,
        token_address: &str,
        spender: &str,
        units: U256,
    ) -> Result<WarpTransaction>;

    /// Extracts the cross-chain message id from a transfer receipt.
    /// Best-effort: absence is not an error.
    fn try_msg_id_from_receipt(&self, origin: &str, receipt: &TxReceipt) -> Option<String>;
}
