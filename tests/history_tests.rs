//! Transfer history tests
//!
//! What is tested:
//! - Append ordering and index stability
//! - Forward-only status updates, with Failed reachable from any
//!   non-terminal status
//! - Rejection of unknown indices and backward or terminal-leaving updates
//! - Outcome details attached on confirmation
//!
//! Why: the history is append-only and indices are handed out to callers;
//! a regressing or reordered entry would corrupt what users see.

use bridge_client::transfer::history::{TransferContext, TransferDetails, TransferHistory};
use bridge_client::transfer::TransferStatus;

#[path = "helpers.rs"]
mod test_helpers;
use test_helpers::*;

fn context(origin: &str) -> TransferContext {
    TransferContext::new(
        origin.to_string(),
        DEST_CHAIN.to_string(),
        "0xorigin1".to_string(),
        "0xdest1".to_string(),
        DUMMY_SENDER.to_string(),
        DUMMY_RECIPIENT.to_string(),
        "10".to_string(),
    )
}

#[tokio::test]
async fn test_append_preserves_order_and_returns_indices() {
    let history = TransferHistory::new();
    assert!(history.is_empty().await);

    assert_eq!(history.append(context("chain-a")).await, 0);
    assert_eq!(history.append(context("chain-b")).await, 1);
    assert_eq!(history.append(context("chain-c")).await, 2);

    let entries = history.snapshot().await;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].origin, "chain-a");
    assert_eq!(entries[1].origin, "chain-b");
    assert_eq!(entries[2].origin, "chain-c");
    for entry in &entries {
        assert_eq!(entry.status, TransferStatus::Preparing);
        assert!(entry.origin_tx_hash.is_none());
        assert!(entry.msg_id.is_none());
    }
}

#[tokio::test]
async fn test_status_moves_forward_and_skips_optional_stages() {
    let history = TransferHistory::new();
    let index = history.append(context(ORIGIN_CHAIN)).await;

    history
        .update_status(index, TransferStatus::CreatingTxs, None)
        .await
        .unwrap();
    // Approve/revoke stages are optional and may be skipped entirely
    history
        .update_status(index, TransferStatus::SigningTransfer, None)
        .await
        .unwrap();
    history
        .update_status(index, TransferStatus::ConfirmingTransfer, None)
        .await
        .unwrap();

    let entries = history.snapshot().await;
    assert_eq!(entries[index].status, TransferStatus::ConfirmingTransfer);
}

#[tokio::test]
async fn test_backward_updates_are_rejected() {
    let history = TransferHistory::new();
    let index = history.append(context(ORIGIN_CHAIN)).await;
    history
        .update_status(index, TransferStatus::SigningTransfer, None)
        .await
        .unwrap();

    let err = history
        .update_status(index, TransferStatus::CreatingTxs, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Illegal transfer status transition"));

    // The entry is unchanged
    let entries = history.snapshot().await;
    assert_eq!(entries[index].status, TransferStatus::SigningTransfer);
}

#[tokio::test]
async fn test_same_status_update_is_a_no_op() {
    let history = TransferHistory::new();
    let index = history.append(context(ORIGIN_CHAIN)).await;
    history
        .update_status(index, TransferStatus::CreatingTxs, None)
        .await
        .unwrap();
    history
        .update_status(index, TransferStatus::CreatingTxs, None)
        .await
        .unwrap();

    let entries = history.snapshot().await;
    assert_eq!(entries[index].status, TransferStatus::CreatingTxs);
}

#[tokio::test]
async fn test_unknown_index_is_rejected() {
    let history = TransferHistory::new();
    let err = history
        .update_status(3, TransferStatus::CreatingTxs, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Transfer not found at index 3"));
}

#[tokio::test]
async fn test_failed_is_reachable_from_any_stage_but_not_left() {
    let history = TransferHistory::new();
    let index = history.append(context(ORIGIN_CHAIN)).await;
    history
        .update_status(index, TransferStatus::ConfirmingTransfer, None)
        .await
        .unwrap();
    history
        .update_status(index, TransferStatus::Failed, None)
        .await
        .unwrap();

    let err = history
        .update_status(index, TransferStatus::ConfirmedTransfer, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Illegal transfer status transition"));
}

#[tokio::test]
async fn test_confirmed_entries_cannot_be_updated() {
    let history = TransferHistory::new();
    let index = history.append(context(ORIGIN_CHAIN)).await;
    history
        .update_status(index, TransferStatus::ConfirmedTransfer, None)
        .await
        .unwrap();

    assert!(history
        .update_status(index, TransferStatus::Failed, None)
        .await
        .is_err());
}

#[tokio::test]
async fn test_details_are_attached_on_confirmation() {
    let history = TransferHistory::new();
    let index = history.append(context(ORIGIN_CHAIN)).await;

    history
        .update_status(
            index,
            TransferStatus::ConfirmedTransfer,
            Some(TransferDetails {
                origin_tx_hash: Some("0xhash1".to_string()),
                msg_id: Some("0xmsg1".to_string()),
            }),
        )
        .await
        .unwrap();

    let entries = history.snapshot().await;
    assert_eq!(entries[index].origin_tx_hash.as_deref(), Some("0xhash1"));
    assert_eq!(entries[index].msg_id.as_deref(), Some("0xmsg1"));
}

#[tokio::test]
async fn test_absent_details_do_not_clear_existing_values() {
    let history = TransferHistory::new();
    let index = history.append(context(ORIGIN_CHAIN)).await;

    history
        .update_status(
            index,
            TransferStatus::ConfirmingTransfer,
            Some(TransferDetails {
                origin_tx_hash: Some("0xhash1".to_string()),
                msg_id: None,
            }),
        )
        .await
        .unwrap();
    history
        .update_status(index, TransferStatus::ConfirmedTransfer, None)
        .await
        .unwrap();

    let entries = history.snapshot().await;
    assert_eq!(entries[index].origin_tx_hash.as_deref(), Some("0xhash1"));
    assert!(entries[index].msg_id.is_none());
}
