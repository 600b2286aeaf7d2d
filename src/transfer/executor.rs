//! Transfer Executor
//!
//! Drives a transfer to completion or failure: resolves the route, applies
//! the origin fee, gates on destination collateral, requests the transaction
//! list from the SDK, submits the transactions in order (batched where the
//! provider supports it), and records every status transition in the shared
//! history.
//!
//! At most one transfer runs at a time; a second call while one is in
//! flight fails fast without touching the history. Once signing begins the
//! flow runs to completion or failure; there is no mid-flight cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use ethereum_types::U256;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::amount::to_units;
use crate::chains::{
    account_address_for_chain, ActiveAccounts, ActiveChains, ChainDirectory, ProviderType,
    SenderRegistry, TxReceipt,
};
use crate::config::ClientConfig;
use crate::fee;
use crate::token::model::{ChainProtocol, Token, TokenAmount};
use crate::token::registry::TokenRegistry;
use crate::transfer::events::{EventSink, NoticeLevel, TransferEvent};
use crate::transfer::form::TransferFormValues;
use crate::transfer::history::{TransferContext, TransferDetails, TransferHistory};
use crate::transfer::status::{statuses_for_category, TransferStatus};
use crate::warp::{TransferTxsParams, TxCategory, WarpCoreApi};

const CHAIN_MISMATCH_ERROR: &str = "ChainMismatchError";
const TRANSFER_TIMEOUT_ERROR_1: &str = "block height exceeded";
const TRANSFER_TIMEOUT_ERROR_2: &str = "timeout";

/// Terminal failures the executor raises itself.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("No token route found between chains")]
    NoRoute,
    #[error("No active account found for origin chain")]
    NoActiveAccount,
    #[error("Insufficient destination collateral")]
    InsufficientCollateral,
    #[error("No transaction sender registered for {0:?}")]
    NoSender(ChainProtocol),
    #[error("A transfer is already in flight")]
    AlreadyInFlight,
}

/// Optional callback run when execution finishes, success or not. The UI
/// uses it to leave review mode and drop any route override.
pub type OnDone = Box<dyn FnOnce() + Send>;

/// Orchestrates transfer submission.
pub struct TransferExecutor {
    warp: Arc<dyn WarpCoreApi>,
    registry: TokenRegistry,
    directory: ChainDirectory,
    config: ClientConfig,
    senders: SenderRegistry,
    history: Arc<TransferHistory>,
    events: Arc<dyn EventSink>,
    in_flight: AtomicBool,
}

impl TransferExecutor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        warp: Arc<dyn WarpCoreApi>,
        registry: TokenRegistry,
        directory: ChainDirectory,
        config: ClientConfig,
        senders: SenderRegistry,
        history: Arc<TransferHistory>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            warp,
            registry,
            directory,
            config,
            senders,
            history,
            events,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a transfer is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Executes a transfer for the given form values.
    ///
    /// Returns the history index of the transfer. Failures during execution
    /// are recorded as Failed status and surfaced as notice events, not as
    /// an `Err`; the only error is a second call while a transfer is in
    /// flight.
    pub async fn execute(
        &self,
        values: &TransferFormValues,
        active_accounts: &ActiveAccounts,
        active_chains: &ActiveChains,
        on_done: Option<OnDone>,
    ) -> Result<usize> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(TransferError::AlreadyInFlight.into());
        }

        debug!("Preparing transfer transaction(s)");
        let index = self.history.len().await;
        let mut status = TransferStatus::Preparing;
        self.events.emit(TransferEvent::StatusChanged { index, status });

        let mut appended = false;
        let result = self
            .run(values, active_accounts, active_chains, index, &mut status, &mut appended)
            .await;

        if let Err(e) = result {
            error!("Error at stage {}: {:#}", status, e);
            if appended {
                if let Err(update_err) = self
                    .history
                    .update_status(index, TransferStatus::Failed, None)
                    .await
                {
                    warn!("Failed to record failure in history: {:#}", update_err);
                }
            }
            self.events.emit(TransferEvent::StatusChanged {
                index,
                status: TransferStatus::Failed,
            });
            self.events.emit(TransferEvent::Notice {
                level: NoticeLevel::Error,
                message: self.failure_message(&e, status, &values.origin),
            });
        }

        self.in_flight.store(false, Ordering::SeqCst);
        if let Some(on_done) = on_done {
            on_done();
        }
        Ok(index)
    }

    async fn run(
        &self,
        values: &TransferFormValues,
        active_accounts: &ActiveAccounts,
        active_chains: &ActiveChains,
        index: usize,
        status: &mut TransferStatus,
        appended: &mut bool,
    ) -> Result<()> {
        let origin = &values.origin;
        let destination = &values.destination;

        let origin_token = self
            .registry
            .token_by_index(values.token_index)
            .ok_or(TransferError::NoRoute)?
            .clone();
        let connection = origin_token
            .connection_for_chain(destination)
            .ok_or(TransferError::NoRoute)?
            .clone();

        let origin_token_amount =
            self.resolve_transfer_amount(&origin_token, values, origin, destination)?;

        let protocol = origin_token.protocol;
        let sender_fns = self
            .senders
            .sender_for(protocol)
            .ok_or(TransferError::NoSender(protocol))?
            .clone();
        let active_chain = active_chains.active_chain(protocol).cloned();
        let sender = account_address_for_chain(&self.directory, origin, active_accounts)
            .ok_or(TransferError::NoActiveAccount)?;

        let collateral_sufficient = self
            .warp
            .is_destination_collateral_sufficient(&origin_token_amount, destination)
            .await
            .context("Destination collateral check failed")?;
        if !collateral_sufficient {
            self.events.emit(TransferEvent::Notice {
                level: NoticeLevel::Error,
                message: "Insufficient collateral on destination for transfer".to_string(),
            });
            return Err(TransferError::InsufficientCollateral.into());
        }

        self.history
            .append(TransferContext::new(
                origin.clone(),
                destination.clone(),
                origin_token.address_or_denom.clone(),
                connection.address_or_denom.clone(),
                sender.clone(),
                values.recipient.clone(),
                values.amount.clone(),
            ))
            .await;
        *appended = true;

        self.advance(index, status, TransferStatus::CreatingTxs).await?;

        let mut txs = self
            .warp
            .transfer_remote_txs(TransferTxsParams {
                origin_token_amount,
                destination: destination.clone(),
                sender,
                recipient: values.recipient.clone(),
            })
            .await
            .context("Transaction construction failed")?;

        // Cross-domain fee routes pay the bridge fee via a separate approval
        // unless the transferred token is the fee token itself (then the fee
        // is already folded into the amount).
        let fee_config = &self.config.origin_fee;
        let should_charge_fee = fee_config.enabled
            && !fee_config.origin_prefix.is_empty()
            && origin.starts_with(&fee_config.origin_prefix)
            && !destination.starts_with(&fee_config.origin_prefix);
        if should_charge_fee && origin_token.symbol != fee_config.fee_token_symbol {
            let fee_units = fee::fee_units(&self.config, destination)?;
            if !fee_units.is_zero() {
                let approval = self
                    .warp
                    .populate_approve_tx(
                        origin,
                        &fee_config.fee_token_address,
                        &origin_token.address_or_denom,
                        fee_units,
                    )
                    .await
                    .context("Fee approval construction failed")?;
                txs.insert(0, approval);
            }
        }

        let mut hashes: Vec<String> = Vec::new();
        let mut last_receipt: Option<TxReceipt> = None;

        let batchable =
            txs.len() > 1 && txs.iter().all(|tx| tx.provider_type == ProviderType::Starknet);
        if batchable {
            let (signing, confirming) = statuses_for_category(TxCategory::Transfer);
            self.advance(index, status, signing).await?;
            let submitted = sender_fns
                .send_batch(&txs, origin, active_chain.as_ref())
                .await?;
            self.advance(index, status, confirming).await?;
            let receipt = sender_fns.confirm(&submitted.hash, origin).await?;
            self.notify_confirmed(TxCategory::Transfer, &submitted.hash, origin);
            hashes.push(submitted.hash);
            last_receipt = Some(receipt);
        } else {
            for tx in &txs {
                let (signing, confirming) = statuses_for_category(tx.category);
                self.advance(index, status, signing).await?;
                let submitted = sender_fns.send(tx, origin, active_chain.as_ref()).await?;
                self.advance(index, status, confirming).await?;
                let receipt = sender_fns.confirm(&submitted.hash, origin).await?;
                self.notify_confirmed(tx.category, &submitted.hash, origin);
                hashes.push(submitted.hash);
                last_receipt = Some(receipt);
            }
        }

        // Best-effort: a missing message id is not an error.
        let msg_id = last_receipt
            .as_ref()
            .and_then(|receipt| self.warp.try_msg_id_from_receipt(origin, receipt));

        self.history
            .update_status(
                index,
                TransferStatus::ConfirmedTransfer,
                Some(TransferDetails {
                    origin_tx_hash: hashes.last().cloned(),
                    msg_id,
                }),
            )
            .await?;
        *status = TransferStatus::ConfirmedTransfer;
        self.events.emit(TransferEvent::StatusChanged {
            index,
            status: TransferStatus::ConfirmedTransfer,
        });

        Ok(())
    }

    /// Computes the smallest-unit transfer amount. NFT ids pass through
    /// literally; fungible amounts pick up the origin fee bonus before unit
    /// conversion.
    fn resolve_transfer_amount(
        &self,
        origin_token: &Token,
        values: &TransferFormValues,
        origin: &str,
        destination: &str,
    ) -> Result<TokenAmount> {
        let units = if origin_token.is_nft() {
            U256::from_dec_str(values.amount.trim()).context("Invalid token id")?
        } else {
            let amount_for_transfer = fee::amount_with_fee_bonus(
                &self.config,
                &values.amount,
                origin,
                destination,
                &origin_token.symbol,
            );
            to_units(&amount_for_transfer, origin_token.decimals)?
        };
        Ok(origin_token.amount(units))
    }

    /// Records a forward status transition and emits the matching event.
    async fn advance(
        &self,
        index: usize,
        status: &mut TransferStatus,
        next: TransferStatus,
    ) -> Result<()> {
        self.history.update_status(index, next, None).await?;
        *status = next;
        self.events
            .emit(TransferEvent::StatusChanged { index, status: next });
        Ok(())
    }

    fn notify_confirmed(&self, category: TxCategory, hash: &str, origin: &str) {
        debug!("{} transaction confirmed, hash: {}", category.label(), hash);
        self.events.emit(TransferEvent::TxConfirmed {
            category,
            hash: hash.to_string(),
            chain: origin.to_string(),
        });
        self.events.emit(TransferEvent::Notice {
            level: NoticeLevel::Info,
            message: format!("{} transaction sent!", category.label()),
        });
    }

    /// Selects the user-facing failure message for an error at `stage`.
    fn failure_message(
        &self,
        error: &anyhow::Error,
        stage: TransferStatus,
        origin: &str,
    ) -> String {
        let details = format!("{:#}", error);
        if details.contains(CHAIN_MISMATCH_ERROR) {
            // Network-switch prompts help prevent this but aren't foolproof
            return "Wallet must be connected to origin chain".to_string();
        }
        if details.contains(TRANSFER_TIMEOUT_ERROR_1) || details.contains(TRANSFER_TIMEOUT_ERROR_2)
        {
            return format!(
                "Transaction timed out, {} may be busy. Please try again.",
                self.directory.display_name(origin)
            );
        }
        stage
            .stage_error_message()
            .unwrap_or("Unable to transfer tokens.")
            .to_string()
    }
}
