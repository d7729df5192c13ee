//! AssetInventory: hex-encoded CIP-30 UTxOs → structured multi-asset listing
//!
//! Pure and stateless. One [`Utxo`] per input record, in input order; assets
//! are flattened policy-first, then by asset name, each tagged with its policy.

use crate::core::{Asset, AssetName, Utxo};
use crate::error::WalletResult;
use crate::ledger::{DecodedUtxo, LedgerEngine};

/// Decode every record; the first malformed record aborts the whole call.
pub fn decode_utxos<S: AsRef<str>>(engine: &dyn LedgerEngine, raw_utxos: &[S]) -> WalletResult<Vec<Utxo>> {
    raw_utxos.iter().map(|raw| decode_utxo(engine, raw.as_ref())).collect()
}

pub fn decode_utxo(engine: &dyn LedgerEngine, raw_hex: &str) -> WalletResult<Utxo> {
    let bytes = hex::decode(raw_hex)?;
    let decoded = engine.decode_utxo(&bytes)?;
    Ok(flatten(decoded))
}

fn flatten(decoded: DecodedUtxo) -> Utxo {
    let assets = decoded
        .amount
        .multiasset
        .unwrap_or_default()
        .into_iter()
        .flat_map(|policy| {
            let policy_id = hex::encode(&policy.policy_id);
            policy.assets.into_iter().map(move |(name, _quantity)| Asset {
                policy_id: policy_id.clone(),
                name_hex: hex::encode(&name),
                name: AssetName::from_bytes(&name),
            })
        })
        .collect();

    Utxo {
        tx_id: hex::encode(&decoded.tx_id),
        tx_index: decoded.index,
        lovelace_amount: decoded.amount.coin,
        assets,
    }
}
