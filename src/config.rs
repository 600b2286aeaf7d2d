//! Configuration Management Module
//!
//! Loads and validates client configuration: default chains, the origin-fee
//! mode (fee token metadata, per-destination fees, the chain-name prefix
//! that marks fee-charging origins), per-chain disallowed recipient sets,
//! and disabled chains.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::token::model::ChainName;

/// Main configuration structure for the bridge client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Default origin chain used for form initial values
    #[serde(default)]
    pub default_origin_chain: Option<ChainName>,
    /// Default destination chain used for form initial values
    #[serde(default)]
    pub default_destination_chain: Option<ChainName>,
    /// Origin-fee mode configuration
    #[serde(default)]
    pub origin_fee: OriginFeeConfig,
    /// Per-chain router addresses that must never be used as recipients
    #[serde(default)]
    pub router_addresses_by_chain: HashMap<ChainName, HashSet<String>>,
    /// Chains excluded from token grouping and selection
    #[serde(default)]
    pub disabled_chains: HashSet<ChainName>,
}

/// Origin-fee mode: transfers leaving a fee-charging origin carry a bridge
/// fee denominated in a designated fee token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OriginFeeConfig {
    /// Global flag for the fee mode
    #[serde(default)]
    pub enabled: bool,
    /// Chain-name prefix identifying fee-charging origins
    #[serde(default)]
    pub origin_prefix: String,
    /// Exact origin chain the minimum-amount validation rule applies to
    #[serde(default)]
    pub origin_chain: ChainName,
    /// Symbol of the fee token (transfers of this token absorb the fee
    /// into the amount instead of a separate approval)
    #[serde(default)]
    pub fee_token_symbol: String,
    /// Contract address of the fee token on the origin chain
    #[serde(default)]
    pub fee_token_address: String,
    /// Decimal places of the fee token
    #[serde(default)]
    pub fee_token_decimals: u32,
    /// Fee per destination chain, in whole fee-token units
    #[serde(default)]
    pub fee_by_destination: HashMap<ChainName, f64>,
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Uses the provided path, or the `BRIDGE_CONFIG_PATH` env var, or
    /// `config/client.toml`. Missing files produce an error pointing at the
    /// shipped template.
    pub fn load_from_path(path: Option<&str>) -> anyhow::Result<Self> {
        let config_path = path
            .map(|p| p.to_string())
            .or_else(|| std::env::var("BRIDGE_CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/client.toml".to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: ClientConfig = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/client.template.toml config/client.toml\n\
                Then edit config/client.toml with your actual values.",
                config_path
            ))
        }
    }

    /// Loads configuration from the default path.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(None)
    }

    /// Validates the configuration for consistency and correctness.
    ///
    /// Checks:
    /// - Fee mode has a prefix, symbol, and address when enabled
    /// - Per-destination fees are non-negative and finite
    /// - Fee token decimals are within a plausible range
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.origin_fee.enabled {
            if self.origin_fee.origin_prefix.is_empty() {
                return Err(anyhow::anyhow!(
                    "Configuration error: origin_fee.origin_prefix must be set when the fee mode is enabled"
                ));
            }
            if self.origin_fee.fee_token_symbol.is_empty() {
                return Err(anyhow::anyhow!(
                    "Configuration error: origin_fee.fee_token_symbol must be set when the fee mode is enabled"
                ));
            }
            if self.origin_fee.fee_token_address.is_empty() {
                return Err(anyhow::anyhow!(
                    "Configuration error: origin_fee.fee_token_address must be set when the fee mode is enabled"
                ));
            }
        }

        if self.origin_fee.fee_token_decimals > 36 {
            return Err(anyhow::anyhow!(
                "Configuration error: origin_fee.fee_token_decimals {} is out of range",
                self.origin_fee.fee_token_decimals
            ));
        }

        for (destination, fee) in &self.origin_fee.fee_by_destination {
            if !fee.is_finite() || *fee < 0.0 {
                return Err(anyhow::anyhow!(
                    "Configuration error: invalid fee {} for destination {}",
                    fee,
                    destination
                ));
            }
        }

        Ok(())
    }

    /// Configured fee for a destination chain, in whole fee-token units.
    /// Defaults to zero for destinations without an entry.
    pub fn fee_for_destination(&self, destination: &str) -> f64 {
        self.origin_fee
            .fee_by_destination
            .get(destination)
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether `recipient` is a known router address on `chain`.
    pub fn is_router_recipient(&self, chain: &str, recipient: &str) -> bool {
        self.router_addresses_by_chain
            .get(chain)
            .map(|set| set.contains(recipient))
            .unwrap_or(false)
    }
}
