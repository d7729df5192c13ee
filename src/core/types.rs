//! Value types exchanged with callers.

use super::keys::{WalletKey, LOVELACE_PER_ADA};
use crate::error::WalletError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Integer amount of base units. Never passes through floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lovelace(pub u64);

impl Lovelace {
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Display units. Informational only, never fed back into transaction building.
    pub fn to_ada(&self) -> f64 {
        let whole = self.0 / LOVELACE_PER_ADA;
        let frac = self.0 % LOVELACE_PER_ADA;
        whole as f64 + frac as f64 / LOVELACE_PER_ADA as f64
    }

    /// Exact decimal rendering, e.g. `5.000000`.
    pub fn to_ada_string(&self) -> String {
        let whole = self.0 / LOVELACE_PER_ADA;
        let frac = self.0 % LOVELACE_PER_ADA;
        format!("{}.{:06}", whole, frac)
    }
}

impl fmt::Display for Lovelace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Lovelace {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Lovelace)
            .map_err(|_| WalletError::InvalidArgument(format!("invalid lovelace amount: {s}")))
    }
}

impl From<u64> for Lovelace {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Serialize for Lovelace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Lovelace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Number(n) => Ok(Lovelace(n)),
        }
    }
}

/// Asset name as found on chain: text when the bytes are valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum AssetName {
    Text(String),
    Bytes(Vec<u8>),
}

impl AssetName {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => AssetName::Text(text.to_string()),
            Err(_) => AssetName::Bytes(bytes.to_vec()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AssetName::Text(text) => text.as_bytes(),
            AssetName::Bytes(bytes) => bytes,
        }
    }

    /// Best-effort rendering; invalid sequences become U+FFFD.
    pub fn display(&self) -> String {
        match self {
            AssetName::Text(text) => text.clone(),
            AssetName::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, AssetName::Text(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub policy_id: String,
    pub name: AssetName,
    pub name_hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    pub tx_id: String,
    pub tx_index: u32,
    pub lovelace_amount: Lovelace,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    pub address: String,
    pub lovelace_amount: Lovelace,
}

impl OutputSpec {
    pub fn new(address: impl Into<String>, lovelace_amount: impl Into<Lovelace>) -> Self {
        Self { address: address.into(), lovelace_amount: lovelace_amount.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOutputSpec {
    #[serde(flatten)]
    pub output: OutputSpec,
    pub change_address: String,
}

impl ChangeOutputSpec {
    pub fn new(output: OutputSpec, change_address: impl Into<String>) -> Self {
        Self { output, change_address: change_address.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTransactionInput {
    #[serde(rename = "paymentDetails")]
    pub payment: ChangeOutputSpec,
    #[serde(rename = "feeDetails", default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<OutputSpec>,
}

impl BuildTransactionInput {
    pub fn new(payment: ChangeOutputSpec) -> Self {
        Self { payment, fee: None }
    }

    pub fn with_fee(mut self, fee: OutputSpec) -> Self {
        self.fee = Some(fee);
        self
    }
}

/// Unsigned transaction produced by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltTransaction {
    pub tx_hash: String,
    pub tx: String,
}

/// CIP-30 pagination passed through to `getUtxos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginate {
    pub page: u32,
    pub limit: u32,
}

/// Persisted record of the last connected wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDescriptor {
    pub name: String,
    pub icon: String,
    pub api_version: String,
    pub key: WalletKey,
    /// Application data merged in after connect.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
