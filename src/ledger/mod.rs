//! Ledger engine seam
//!
//! Binary encode/decode, hashing and fee-aware building of ledger structures
//! belong to an external serialization engine. This module fixes the surface
//! the connector needs from it.
//!
//! ```text
//! inventory ──► decode_utxo
//! session   ──► address_to_bech32, value_coin
//! tx builder ─► new_tx_builder ─► add_output / add_inputs_from / add_change_if_needed / build
//! signing   ──► vkey_witnesses_only, assemble_transaction
//! ```
//!
//! With the `csl` feature, [`csl::CslEngine`] implements the seam on top of
//! `cardano-serialization-lib`.

#[cfg(feature = "csl")]
pub mod csl;

use crate::config::ProtocolParams;
use crate::core::Lovelace;
use crate::error::WalletResult;
use serde::{Deserialize, Serialize};

/// Assets of one minting policy, in the bundle's native order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAssets {
    pub policy_id: Vec<u8>,
    /// `(asset name bytes, quantity)` pairs.
    pub assets: Vec<(Vec<u8>, u64)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodedValue {
    pub coin: Lovelace,
    pub multiasset: Option<Vec<PolicyAssets>>,
}

/// Structured view of a `TransactionUnspentOutput`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedUtxo {
    pub tx_id: Vec<u8>,
    pub index: u32,
    pub address: Vec<u8>,
    pub amount: DecodedValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub hash: Vec<u8>,
    pub bytes: Vec<u8>,
}

/// CIP-2 input selection strategies, by engine index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoinSelectionStrategy {
    #[default]
    LargestFirst,
    RandomImprove,
    LargestFirstMultiAsset,
    RandomImproveMultiAsset,
}

impl CoinSelectionStrategy {
    pub fn index(&self) -> u8 {
        match self {
            Self::LargestFirst => 0,
            Self::RandomImprove => 1,
            Self::LargestFirstMultiAsset => 2,
            Self::RandomImproveMultiAsset => 3,
        }
    }
}

pub trait LedgerEngine {
    fn decode_utxo(&self, raw: &[u8]) -> WalletResult<DecodedUtxo>;

    /// Raw address bytes to bech32 text.
    fn address_to_bech32(&self, raw: &[u8]) -> WalletResult<String>;

    /// Coin component of a CBOR `Value`.
    fn value_coin(&self, raw: &[u8]) -> WalletResult<Lovelace>;

    fn new_tx_builder(&self, params: &ProtocolParams) -> WalletResult<Box<dyn LedgerTxBuilder>>;

    /// Fresh witness set holding only the vkey witnesses of `witness_set`.
    fn vkey_witnesses_only(&self, witness_set: &[u8]) -> WalletResult<Vec<u8>>;

    /// Body (and auxiliary data) of `tx` combined with `witness_set`.
    fn assemble_transaction(&self, tx: &[u8], witness_set: &[u8]) -> WalletResult<Vec<u8>>;
}

pub trait LedgerTxBuilder {
    fn add_output(&mut self, address_bech32: &str, amount: Lovelace) -> WalletResult<()>;

    fn add_inputs_from(&mut self, utxos: &[Vec<u8>], strategy: CoinSelectionStrategy) -> WalletResult<()>;

    /// Returns whether a change output was appended.
    fn add_change_if_needed(&mut self, change_address_bech32: &str) -> WalletResult<bool>;

    /// Body hash plus the transaction bytes with an empty witness set.
    fn build(self: Box<Self>) -> WalletResult<UnsignedTransaction>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strategy_is_index_zero() {
        assert_eq!(CoinSelectionStrategy::default().index(), 0);
        assert_eq!(CoinSelectionStrategy::RandomImproveMultiAsset.index(), 3);
    }
}
