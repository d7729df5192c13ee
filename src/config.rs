//! Connector configuration - passed from higher layers

use crate::error::{ExternalApiError, WalletResult};
use serde::{Deserialize, Serialize};

/// Ledger protocol parameters used by the transaction builder.
///
/// Defaults match the epoch profile the connector shipped with; deployments
/// targeting another epoch or a testnet load their own via [`ProtocolParams::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtocolParams {
    pub min_fee_a: u64,
    pub min_fee_b: u64,
    pub min_utxo: u64,
    pub pool_deposit: u64,
    pub key_deposit: u64,
    pub max_value_size: u32,
    pub max_tx_size: u32,
    pub price_mem: f64,
    pub price_step: f64,
    pub coins_per_utxo_word: u64,
    pub prefer_pure_change: bool,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            min_fee_a: 44,
            min_fee_b: 155_381,
            min_utxo: 34_482,
            pool_deposit: 500_000_000,
            key_deposit: 2_000_000,
            max_value_size: 5_000,
            max_tx_size: 16_384,
            price_mem: 0.0577,
            price_step: 0.0000721,
            coins_per_utxo_word: 34_482,
            prefer_pure_change: true,
        }
    }
}

impl ProtocolParams {
    pub fn from_json(raw: &str) -> WalletResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Byte-denominated min-UTxO constant (a word is eight bytes).
    pub fn coins_per_utxo_byte(&self) -> u64 {
        self.coins_per_utxo_word / 8
    }

    pub fn with_linear_fee(mut self, min_fee_a: u64, min_fee_b: u64) -> Self {
        self.min_fee_a = min_fee_a;
        self.min_fee_b = min_fee_b;
        self
    }

    pub fn with_deposits(mut self, pool: u64, key: u64) -> Self {
        self.pool_deposit = pool;
        self.key_deposit = key;
        self
    }

    pub fn with_coins_per_utxo_word(mut self, coins: u64) -> Self {
        self.coins_per_utxo_word = coins;
        self
    }

    pub fn with_max_sizes(mut self, value: u32, tx: u32) -> Self {
        self.max_value_size = value;
        self.max_tx_size = tx;
        self
    }
}

/// Blockfrost ledger-index endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockfrostConfig {
    pub base_url: String,
    pub project_id: String,
}

impl BlockfrostConfig {
    pub const URL_ENV: &'static str = "BLOCKFROST_URL";
    pub const PROJECT_ID_ENV: &'static str = "PUBLIC_BLOCKFROST_PROJECT_ID";

    pub fn new(base_url: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), project_id: project_id.into() }
    }

    /// Missing variables become empty strings; see [`BlockfrostConfig::validate`].
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(Self::URL_ENV).unwrap_or_default(),
            project_id: std::env::var(Self::PROJECT_ID_ENV).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), ExternalApiError> {
        if self.base_url.trim().is_empty() {
            return Err(ExternalApiError::UrlNotDefined);
        }
        if self.project_id.trim().is_empty() {
            return Err(ExternalApiError::ProjectIdNotDefined);
        }
        Ok(())
    }
}
