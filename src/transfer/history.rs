//! Transfer History Store
//!
//! Append-only, session-scoped log of transfers. Entries are created when a
//! transfer begins and mutated only through status updates keyed by index;
//! nothing is ever removed. The executor is the only writer while a
//! transfer is in flight.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::token::model::ChainName;
use crate::transfer::status::TransferStatus;

/// One transfer in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferContext {
    /// Creation time, epoch milliseconds
    pub timestamp_ms: i64,
    /// Current lifecycle status
    pub status: TransferStatus,
    pub origin: ChainName,
    pub destination: ChainName,
    pub origin_token_address_or_denom: String,
    pub dest_token_address_or_denom: String,
    pub sender: String,
    pub recipient: String,
    /// User-entered decimal amount (or NFT id)
    pub amount: String,
    /// Hash of the final origin-chain transaction, once confirmed
    #[serde(default)]
    pub origin_tx_hash: Option<String>,
    /// Cross-chain message id extracted from the final receipt, if any
    #[serde(default)]
    pub msg_id: Option<String>,
}

impl TransferContext {
    /// Creates a Preparing-status entry timestamped now.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin: ChainName,
        destination: ChainName,
        origin_token_address_or_denom: String,
        dest_token_address_or_denom: String,
        sender: String,
        recipient: String,
        amount: String,
    ) -> Self {
        Self {
            timestamp_ms: Utc::now().timestamp_millis(),
            status: TransferStatus::Preparing,
            origin,
            destination,
            origin_token_address_or_denom,
            dest_token_address_or_denom,
            sender,
            recipient,
            amount,
            origin_tx_hash: None,
            msg_id: None,
        }
    }
}

/// Outcome details attached when a transfer reaches a final status.
#[derive(Debug, Clone, Default)]
pub struct TransferDetails {
    pub origin_tx_hash: Option<String>,
    pub msg_id: Option<String>,
}

/// Ordered, append-only transfer log.
#[derive(Debug, Default)]
pub struct TransferHistory {
    entries: RwLock<Vec<TransferContext>>,
}

impl TransferHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new entry, returning its index.
    pub async fn append(&self, context: TransferContext) -> usize {
        let mut entries = self.entries.write().await;
        entries.push(context);
        entries.len() - 1
    }

    /// Updates the status of the entry at `index`.
    ///
    /// Rejects unknown indices and backward transitions: status only moves
    /// forward or to Failed.
    pub async fn update_status(
        &self,
        index: usize,
        status: TransferStatus,
        details: Option<TransferDetails>,
    ) -> Result<()> {
        let mut entries = self.entries.write().await;
        let entry = match entries.get_mut(index) {
            Some(entry) => entry,
            None => anyhow::bail!("Transfer not found at index {}", index),
        };

        if entry.status != status && !entry.status.can_transition_to(status) {
            anyhow::bail!(
                "Illegal transfer status transition {} -> {} at index {}",
                entry.status,
                status,
                index
            );
        }

        entry.status = status;
        if let Some(details) = details {
            if details.origin_tx_hash.is_some() {
                entry.origin_tx_hash = details.origin_tx_hash;
            }
            if details.msg_id.is_some() {
                entry.msg_id = details.msg_id;
            }
        }
        Ok(())
    }

    /// Snapshot of all entries in append order.
    pub async fn snapshot(&self) -> Vec<TransferContext> {
        self.entries.read().await.clone()
    }

    /// Number of entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the history is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
