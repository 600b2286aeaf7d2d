//! Shared test helpers for bridge-client tests
//!
//! Provides constants, token/config builders, and mock implementations of
//! the SDK and transaction-sender seams.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use ethereum_types::U256;
use serde_json::json;

use bridge_client::chains::{
    ActiveAccounts, ActiveChains, ChainDirectory, ChainMetadata, ProviderType, SubmittedTx,
    TransactionSender, TxReceipt,
};
use bridge_client::config::{ClientConfig, OriginFeeConfig};
use bridge_client::token::model::{normalize_address, ChainProtocol, Token, TokenStandard};
use bridge_client::transfer::events::{EventSink, TransferEvent};
use bridge_client::warp::{
    TransferTxsParams, TxCategory, ValidateTransferParams, WarpCoreApi, WarpTransaction,
};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Origin test chain
pub const ORIGIN_CHAIN: &str = "test1";

/// Destination test chain
pub const DEST_CHAIN: &str = "test2";

/// Fee-charging origin chain
pub const FEE_ORIGIN_CHAIN: &str = "pruvtest";

/// Fee-route destination chain
pub const FEE_DEST_CHAIN: &str = "basesepolia";

/// Default origin-side collateral address (mixed case on purpose)
pub const MOCK_COLLATERAL: &str = "0xCoLLaTeRaLaDDreSS";

/// Default destination-side collateral address (mixed case on purpose)
pub const DEST_COLLATERAL: &str = "0xDeStCoLLaTeRaL";

/// Dummy recipient address
pub const DUMMY_RECIPIENT: &str = "0x00000000000000000000000000000000000000aa";

/// Dummy connected sender address
pub const DUMMY_SENDER: &str = "0x00000000000000000000000000000000000000bb";

/// Fee token contract address on the fee-charging origin
pub const FEE_TOKEN_ADDRESS: &str = "0x00000000000000000000000000000000000000fe";

/// Initializes test logging. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Creates a token with no connections.
pub fn make_token(
    chain: &str,
    symbol: &str,
    standard: TokenStandard,
    address: &str,
    collateral: Option<&str>,
) -> Token {
    Token {
        chain_name: chain.to_string(),
        protocol: ChainProtocol::Ethereum,
        standard,
        address_or_denom: address.to_string(),
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        decimals: 6,
        scale: None,
        collateral_address_or_denom: collateral.map(|c| c.to_string()),
        connections: vec![],
    }
}

/// Adds a connection to a token.
pub fn with_connection(mut token: Token, connection: Token) -> Token {
    token.connections.push(connection);
    token
}

/// Default destination-side counterpart on DEST_CHAIN.
pub fn mock_connection() -> Token {
    make_token(
        DEST_CHAIN,
        "MOCK",
        TokenStandard::EvmHypCollateral,
        "0xdest1",
        Some(DEST_COLLATERAL),
    )
}

/// Default multi-collateral-eligible token on ORIGIN_CHAIN, connected to
/// DEST_CHAIN.
pub fn mock_multi_collateral_token() -> Token {
    with_connection(
        make_token(
            ORIGIN_CHAIN,
            "MOCK",
            TokenStandard::EvmHypCollateral,
            "0xorigin1",
            Some(MOCK_COLLATERAL),
        ),
        mock_connection(),
    )
}

/// Directory covering all chains the tests touch.
pub fn directory() -> ChainDirectory {
    ChainDirectory::new(vec![
        ChainMetadata {
            name: ORIGIN_CHAIN.to_string(),
            display_name: "Test Chain 1".to_string(),
            protocol: ChainProtocol::Ethereum,
        },
        ChainMetadata {
            name: DEST_CHAIN.to_string(),
            display_name: "Test Chain 2".to_string(),
            protocol: ChainProtocol::Ethereum,
        },
        ChainMetadata {
            name: FEE_ORIGIN_CHAIN.to_string(),
            display_name: "Pruv Testnet".to_string(),
            protocol: ChainProtocol::Ethereum,
        },
        ChainMetadata {
            name: FEE_DEST_CHAIN.to_string(),
            display_name: "Base Sepolia".to_string(),
            protocol: ChainProtocol::Ethereum,
        },
        ChainMetadata {
            name: "starktest".to_string(),
            display_name: "Stark Test".to_string(),
            protocol: ChainProtocol::Starknet,
        },
    ])
}

/// Accounts with a connected EVM wallet.
pub fn connected_accounts() -> ActiveAccounts {
    let mut accounts = ActiveAccounts::default();
    accounts.accounts.insert(
        ChainProtocol::Ethereum,
        bridge_client::chains::AccountInfo {
            address: Some(DUMMY_SENDER.to_string()),
            public_key: None,
        },
    );
    accounts
}

/// Active chains with the EVM wallet on the origin chain.
pub fn active_chains_on(chain: &str) -> ActiveChains {
    let mut chains = ActiveChains::default();
    chains
        .chains
        .insert(ChainProtocol::Ethereum, chain.to_string());
    chains
}

/// Config with the origin-fee mode enabled (prefix "pruv", USDC fee token,
/// 2.0 fee to basesepolia).
pub fn fee_enabled_config() -> ClientConfig {
    ClientConfig {
        default_origin_chain: Some(ORIGIN_CHAIN.to_string()),
        default_destination_chain: Some(DEST_CHAIN.to_string()),
        origin_fee: OriginFeeConfig {
            enabled: true,
            origin_prefix: "pruv".to_string(),
            origin_chain: FEE_ORIGIN_CHAIN.to_string(),
            fee_token_symbol: "USDC".to_string(),
            fee_token_address: FEE_TOKEN_ADDRESS.to_string(),
            fee_token_decimals: 6,
            fee_by_destination: [(FEE_DEST_CHAIN.to_string(), 2.0)].into_iter().collect(),
        },
        router_addresses_by_chain: HashMap::new(),
        disabled_chains: HashSet::new(),
    }
}

/// Config with the fee mode disabled and no routers or defaults.
pub fn plain_config() -> ClientConfig {
    ClientConfig::default()
}

// ============================================================================
// MOCK SDK
// ============================================================================

/// Configurable mock of the external SDK seam.
#[derive(Default)]
pub struct MockWarpCore {
    /// Collateral balance per normalized token address; `None` makes the
    /// probe fail
    pub collateral_balances: HashMap<String, Option<U256>>,
    /// Result of the destination collateral sufficiency check
    pub collateral_sufficient: bool,
    /// Transfer limit: exceeded when the requested units are above this
    pub limit: Option<U256>,
    /// Field errors returned by validate_transfer
    pub validate_errors: Option<HashMap<String, String>>,
    /// Error message thrown by validate_transfer, when set
    pub validate_fails: Option<String>,
    /// Transaction list returned by transfer_remote_txs
    pub txs: Vec<WarpTransaction>,
    /// Error message thrown by transfer_remote_txs, when set
    pub txs_fail: Option<String>,
    /// Message id extracted from the final receipt
    pub msg_id: Option<String>,
    /// Recorded transfer_remote_txs calls, in order
    pub transfer_requests: Mutex<Vec<TransferTxsParams>>,
}

impl MockWarpCore {
    pub fn sufficient() -> Self {
        Self {
            collateral_sufficient: true,
            ..Default::default()
        }
    }

    pub fn with_balance(mut self, token_address: &str, balance: Option<U256>) -> Self {
        self.collateral_balances
            .insert(normalize_address(token_address), balance);
        self
    }

    pub fn recorded_transfer_requests(&self) -> Vec<TransferTxsParams> {
        self.transfer_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WarpCoreApi for MockWarpCore {
    async fn validate_transfer(
        &self,
        _params: ValidateTransferParams,
    ) -> anyhow::Result<Option<HashMap<String, String>>> {
        if let Some(message) = &self.validate_fails {
            anyhow::bail!("{}", message);
        }
        Ok(self.validate_errors.clone())
    }

    async fn transfer_remote_txs(
        &self,
        params: TransferTxsParams,
    ) -> anyhow::Result<Vec<WarpTransaction>> {
        if let Some(message) = &self.txs_fail {
            anyhow::bail!("{}", message);
        }
        self.transfer_requests.lock().unwrap().push(params);
        Ok(self.txs.clone())
    }

    async fn is_destination_collateral_sufficient(
        &self,
        _origin_token_amount: &bridge_client::token::model::TokenAmount,
        _destination: &str,
    ) -> anyhow::Result<bool> {
        Ok(self.collateral_sufficient)
    }

    async fn token_collateral(&self, token: &Token) -> anyhow::Result<U256> {
        match self
            .collateral_balances
            .get(&normalize_address(&token.address_or_denom))
        {
            Some(Some(balance)) => Ok(*balance),
            Some(None) => anyhow::bail!("Collateral probe failed"),
            None => Ok(U256::zero()),
        }
    }

    async fn multi_collateral_limit(
        &self,
        _token: &Token,
        _destination: &str,
        units: U256,
    ) -> anyhow::Result<Option<U256>> {
        match self.limit {
            Some(limit) if units > limit => Ok(Some(limit)),
            _ => Ok(None),
        }
    }

    async fn populate_approve_tx(
        &self,
        _origin: &str,
        token_address: &str,
        spender: &str,
        units: U256,
    ) -> anyhow::Result<WarpTransaction> {
        Ok(WarpTransaction {
            category: TxCategory::Approval,
            provider_type: ProviderType::EthersV5,
            payload: json!({
                "token": token_address,
                "spender": spender,
                "amount": units.to_string(),
            }),
        })
    }

    fn try_msg_id_from_receipt(&self, _origin: &str, _receipt: &TxReceipt) -> Option<String> {
        self.msg_id.clone()
    }
}

/// Builds a plain transfer transaction for the mock SDK.
pub fn transfer_tx(provider_type: ProviderType) -> WarpTransaction {
    WarpTransaction {
        category: TxCategory::Transfer,
        provider_type,
        payload: json!({"kind": "transfer"}),
    }
}

/// Builds a plain approval transaction for the mock SDK.
pub fn approval_tx(provider_type: ProviderType) -> WarpTransaction {
    WarpTransaction {
        category: TxCategory::Approval,
        provider_type,
        payload: json!({"kind": "approval"}),
    }
}

// ============================================================================
// MOCK SENDER
// ============================================================================

/// Recording mock of the transaction-sender seam.
#[derive(Default)]
pub struct MockSender {
    /// Transactions submitted individually, in order
    pub sent: Mutex<Vec<WarpTransaction>>,
    /// Transaction lists submitted as batches
    pub batches: Mutex<Vec<Vec<WarpTransaction>>>,
    /// Fail the nth individual send (0-based) with this message
    pub fail_send_at: Option<(usize, String)>,
    /// Delay applied before each individual send
    pub send_delay_ms: Option<u64>,
}

impl MockSender {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent_txs(&self) -> Vec<WarpTransaction> {
        self.sent.lock().unwrap().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionSender for MockSender {
    async fn send(
        &self,
        tx: &WarpTransaction,
        _chain: &str,
        _active_chain: Option<&String>,
    ) -> anyhow::Result<SubmittedTx> {
        if let Some(delay) = self.send_delay_ms {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        let mut sent = self.sent.lock().unwrap();
        if let Some((at, message)) = &self.fail_send_at {
            if sent.len() == *at {
                anyhow::bail!("{}", message);
            }
        }
        sent.push(tx.clone());
        Ok(SubmittedTx {
            hash: format!("0xhash{}", sent.len()),
        })
    }

    async fn confirm(&self, _hash: &str, _chain: &str) -> anyhow::Result<TxReceipt> {
        Ok(TxReceipt {
            provider_type: ProviderType::EthersV5,
            payload: json!({"status": 1}),
        })
    }

    async fn send_batch(
        &self,
        txs: &[WarpTransaction],
        _chain: &str,
        _active_chain: Option<&String>,
    ) -> anyhow::Result<SubmittedTx> {
        let mut batches = self.batches.lock().unwrap();
        batches.push(txs.to_vec());
        Ok(SubmittedTx {
            hash: format!("0xbatch{}", batches.len()),
        })
    }
}

// ============================================================================
// EVENT SINK
// ============================================================================

/// Collects emitted events for assertions.
#[derive(Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<TransferEvent>>,
}

impl CollectingEventSink {
    pub fn events(&self) -> Vec<TransferEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for CollectingEventSink {
    fn emit(&self, event: TransferEvent) {
        self.events.lock().unwrap().push(event);
    }
}
