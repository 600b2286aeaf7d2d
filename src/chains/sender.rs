//! Transaction Sender Seam
//!
//! The wallet layer submits transactions; this crate only orders them and
//! tracks their status. One `TransactionSender` implementation exists per
//! protocol family, selected through the typed `ChainProtocol` enum.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::chains::ProviderType;
use crate::token::model::{ChainName, ChainProtocol};
use crate::warp::WarpTransaction;

/// A submitted transaction, identified by its hash.
#[derive(Debug, Clone)]
pub struct SubmittedTx {
    pub hash: String,
}

/// A confirmation receipt. The payload is opaque to this layer; the SDK
/// seam extracts message ids from it best-effort.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub provider_type: ProviderType,
    pub payload: Value,
}

/// Submits and confirms transactions for one protocol family.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Signs and submits a single transaction on `chain`.
    ///
    /// `active_chain` is the wallet's currently selected chain for this
    /// protocol family; implementations may switch networks before signing.
    async fn send(
        &self,
        tx: &WarpTransaction,
        chain: &str,
        active_chain: Option<&ChainName>,
    ) -> Result<SubmittedTx>;

    /// Awaits the confirmation receipt for a previously submitted hash.
    async fn confirm(&self, hash: &str, chain: &str) -> Result<TxReceipt>;

    /// Signs and submits a transaction list atomically.
    ///
    /// Only providers with batched submission support this; the default
    /// implementation rejects the call.
    async fn send_batch(
        &self,
        _txs: &[WarpTransaction],
        chain: &str,
        _active_chain: Option<&ChainName>,
    ) -> Result<SubmittedTx> {
        anyhow::bail!("Batched submission is not supported on {}", chain)
    }
}

/// Registry of transaction senders, one per protocol family.
#[derive(Default, Clone)]
pub struct SenderRegistry {
    senders: HashMap<ChainProtocol, Arc<dyn TransactionSender>>,
}

impl SenderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the sender for a protocol family, replacing any previous one.
    pub fn register(&mut self, protocol: ChainProtocol, sender: Arc<dyn TransactionSender>) {
        self.senders.insert(protocol, sender);
    }

    /// Returns the sender for a protocol family, if registered.
    pub fn sender_for(&self, protocol: ChainProtocol) -> Option<&Arc<dyn TransactionSender>> {
        self.senders.get(&protocol)
    }
}
