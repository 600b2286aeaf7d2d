//! Bridge client library
//!
//! Transfer orchestration for cross-chain token bridging: form validation
//! against SDK-reported routes and limits, multi-collateral route
//! deduplication and balance-based selection, fee and scaling arithmetic,
//! and a status state machine driving an append-only transfer history. All
//! protocol work (route discovery, transaction construction, chain
//! execution) stays behind the `WarpCoreApi` and `TransactionSender` seams.

pub mod amount;
pub mod chains;
pub mod config;
pub mod fee;
pub mod token;
pub mod transfer;
pub mod warp;

// Re-export public types for convenience
pub use chains::{
    account_address_for_chain, ActiveAccounts, ActiveChains, ChainDirectory, ChainMetadata,
    ProviderType, SenderRegistry, SubmittedTx, TransactionSender, TxReceipt,
};
pub use config::{ClientConfig, OriginFeeConfig};
pub use token::{
    ChainName, ChainProtocol, Token, TokenAmount, TokenRegistry, TokenStandard,
};
pub use transfer::{
    initial_form_values, validate_form, EventSink, TracingEventSink, TransferContext,
    TransferEvent, TransferExecutor, TransferFormValues, TransferHistory, TransferStatus,
};
pub use warp::{
    TransferTxsParams, TxCategory, ValidateTransferParams, WarpCoreApi, WarpTransaction,
};
