//! Transfer Events
//!
//! The executor reports progress as structured events; rendering them (as
//! toasts, banners, or logs) is the consumer's concern. The default sink
//! writes them to the tracing log.

use tracing::{error, info};

use crate::transfer::status::TransferStatus;
use crate::warp::TxCategory;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A structured progress event emitted during transfer execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    /// The transfer at `index` in the history moved to `status`
    StatusChanged {
        index: usize,
        status: TransferStatus,
    },
    /// A transaction was confirmed on the origin chain
    TxConfirmed {
        category: TxCategory,
        hash: String,
        chain: String,
    },
    /// A user-facing message
    Notice {
        level: NoticeLevel,
        message: String,
    },
}

/// Consumes transfer events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: TransferEvent);
}

/// Default sink: writes events to the tracing log.
#[derive(Debug, Default, Clone)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: TransferEvent) {
        match event {
            TransferEvent::StatusChanged { index, status } => {
                info!(index, %status, "Transfer status changed");
            }
            TransferEvent::TxConfirmed {
                category,
                hash,
                chain,
            } => {
                info!(category = category.label(), %hash, %chain, "Transaction confirmed");
            }
            TransferEvent::Notice { level, message } => match level {
                NoticeLevel::Info => info!("{}", message),
                NoticeLevel::Error => error!("{}", message),
            },
        }
    }
}
