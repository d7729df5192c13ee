//! Wallet keys and protocol constants
//!
//! Centralized registry for the supported CIP-30 providers and the fixed
//! values the bridge relies on.

use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key owned by the connector.
pub const STORAGE_KEY: &str = "cardanoWallet";

/// Network id reported by CIP-30 `getNetworkId` on mainnet.
pub const MAINNET_NETWORK_ID: u8 = 1;

/// Base units per display unit (lovelace per ADA).
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

/// Supported wallet providers, keyed by their `window.cardano` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKey {
    Nami,
    Eternl,
    GeroWallet,
    Flint,
    Yoroi,
    NuFi,
    Typhon,
    Begin,
    Exodus,
}

impl WalletKey {
    pub const ALL: [WalletKey; 9] = [
        WalletKey::Nami,
        WalletKey::Eternl,
        WalletKey::GeroWallet,
        WalletKey::Flint,
        WalletKey::Yoroi,
        WalletKey::NuFi,
        WalletKey::Typhon,
        WalletKey::Begin,
        WalletKey::Exodus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WalletKey::Nami => "nami",
            WalletKey::Eternl => "eternl",
            WalletKey::GeroWallet => "gerowallet",
            WalletKey::Flint => "flint",
            WalletKey::Yoroi => "yoroi",
            WalletKey::NuFi => "nufi",
            WalletKey::Typhon => "typhon",
            WalletKey::Begin => "begin",
            WalletKey::Exodus => "exodus",
        }
    }

    /// Comma separated list used in user-facing messages.
    pub fn supported_list() -> String {
        Self::ALL.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// Exact-match lookup; anything outside the supported set is rejected.
    pub fn parse(value: &str) -> WalletResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == value)
            .ok_or_else(|| WalletError::UnsupportedWallet {
                key: value.to_string(),
                supported: Self::supported_list(),
            })
    }
}

impl FromStr for WalletKey {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
