//! Transfer Status Machine
//!
//! Tracks the lifecycle of a transfer from preparation through transaction
//! signing and confirmation. Status moves strictly forward; Failed is
//! reachable from every non-terminal status; nothing leaves a terminal
//! status except a brand-new transfer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::warp::TxCategory;

/// Lifecycle status of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Resolving tokens, sender, and collateral before anything is signed
    Preparing,
    /// Requesting the transaction list from the SDK
    CreatingTxs,
    /// Waiting on the wallet to sign the approval transaction
    SigningApprove,
    /// Awaiting the approval confirmation receipt
    ConfirmingApprove,
    /// Waiting on the wallet to sign the revoke transaction
    SigningRevoke,
    /// Awaiting the revoke confirmation receipt
    ConfirmingRevoke,
    /// Waiting on the wallet to sign the transfer transaction
    SigningTransfer,
    /// Awaiting the transfer confirmation receipt
    ConfirmingTransfer,
    /// Transfer confirmed on the origin chain
    ConfirmedTransfer,
    /// Transfer failed at some stage
    Failed,
}

impl TransferStatus {
    /// Position in the linear progression. Failed sits past everything so a
    /// transfer can fail from any non-terminal stage.
    fn rank(&self) -> u8 {
        match self {
            TransferStatus::Preparing => 0,
            TransferStatus::CreatingTxs => 1,
            TransferStatus::SigningApprove => 2,
            TransferStatus::ConfirmingApprove => 3,
            TransferStatus::SigningRevoke => 4,
            TransferStatus::ConfirmingRevoke => 5,
            TransferStatus::SigningTransfer => 6,
            TransferStatus::ConfirmingTransfer => 7,
            TransferStatus::ConfirmedTransfer => 8,
            TransferStatus::Failed => 9,
        }
    }

    /// Whether no further transitions are allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferStatus::ConfirmedTransfer | TransferStatus::Failed
        )
    }

    /// Whether moving to `next` is a legal forward transition.
    ///
    /// Optional stages (approve, revoke) may be skipped, so any strictly
    /// higher rank is legal from a non-terminal status.
    pub fn can_transition_to(&self, next: TransferStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == TransferStatus::Failed {
            return true;
        }
        next.rank() > self.rank()
    }

    /// Canned per-stage error message shown when submission fails without a
    /// recognized error pattern.
    pub fn stage_error_message(&self) -> Option<&'static str> {
        match self {
            TransferStatus::Preparing => Some("Error while preparing the transactions."),
            TransferStatus::CreatingTxs => Some("Error while creating the transactions."),
            TransferStatus::SigningApprove => Some("Error while signing the approve transaction."),
            TransferStatus::ConfirmingApprove => {
                Some("Error while confirming the approve transaction.")
            }
            TransferStatus::SigningTransfer => {
                Some("Error while signing the transfer transaction.")
            }
            TransferStatus::ConfirmingTransfer => {
                Some("Error while confirming the transfer transaction.")
            }
            _ => None,
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransferStatus::Preparing => "preparing",
            TransferStatus::CreatingTxs => "creating-txs",
            TransferStatus::SigningApprove => "signing-approve",
            TransferStatus::ConfirmingApprove => "confirming-approve",
            TransferStatus::SigningRevoke => "signing-revoke",
            TransferStatus::ConfirmingRevoke => "confirming-revoke",
            TransferStatus::SigningTransfer => "signing-transfer",
            TransferStatus::ConfirmingTransfer => "confirming-transfer",
            TransferStatus::ConfirmedTransfer => "confirmed-transfer",
            TransferStatus::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// The (signing, confirming) status pair shown while a transaction of the
/// given category is in flight.
pub fn statuses_for_category(category: TxCategory) -> (TransferStatus, TransferStatus) {
    match category {
        TxCategory::Approval => (
            TransferStatus::SigningApprove,
            TransferStatus::ConfirmingApprove,
        ),
        TxCategory::Revoke => (
            TransferStatus::SigningRevoke,
            TransferStatus::ConfirmingRevoke,
        ),
        TxCategory::Transfer => (
            TransferStatus::SigningTransfer,
            TransferStatus::ConfirmingTransfer,
        ),
    }
}
