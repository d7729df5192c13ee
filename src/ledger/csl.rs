//! CslEngine - ledger engine over cardano-serialization-lib
//!
//! Thin wrapper: every call decodes from bytes, performs one library
//! operation and encodes back. No state survives between calls except the
//! transaction builder handed to the caller.

use super::{
    CoinSelectionStrategy, DecodedUtxo, DecodedValue, LedgerEngine, LedgerTxBuilder, PolicyAssets,
    UnsignedTransaction,
};
use crate::config::ProtocolParams;
use crate::core::Lovelace;
use crate::error::{WalletError, WalletResult};
use blake2::{digest::consts::U32, Blake2b, Digest};
use cardano_serialization_lib as csl;

type Blake2b256 = Blake2b<U32>;

fn ledger_err<E: std::fmt::Debug>(e: E) -> WalletError {
    WalletError::ledger(format!("{:?}", e))
}

fn to_bignum(amount: u64) -> WalletResult<csl::BigNum> {
    csl::BigNum::from_str(&amount.to_string()).map_err(ledger_err)
}

fn from_bignum(value: &csl::BigNum) -> WalletResult<u64> {
    value.to_str().parse::<u64>().map_err(ledger_err)
}

fn to_cip2(strategy: CoinSelectionStrategy) -> csl::CoinSelectionStrategyCIP2 {
    match strategy {
        CoinSelectionStrategy::LargestFirst => csl::CoinSelectionStrategyCIP2::LargestFirst,
        CoinSelectionStrategy::RandomImprove => csl::CoinSelectionStrategyCIP2::RandomImprove,
        CoinSelectionStrategy::LargestFirstMultiAsset => csl::CoinSelectionStrategyCIP2::LargestFirstMultiAsset,
        CoinSelectionStrategy::RandomImproveMultiAsset => csl::CoinSelectionStrategyCIP2::RandomImproveMultiAsset,
    }
}

fn decode_value(value: &csl::Value) -> WalletResult<DecodedValue> {
    let coin = Lovelace(from_bignum(&value.coin())?);
    let multiasset = match value.multiasset() {
        None => None,
        Some(bundle) => {
            let policies = bundle.keys();
            let mut decoded = Vec::with_capacity(policies.len());
            for i in 0..policies.len() {
                let policy = policies.get(i);
                let mut assets = Vec::new();
                if let Some(entries) = bundle.get(&policy) {
                    let names = entries.keys();
                    for j in 0..names.len() {
                        let name = names.get(j);
                        let quantity = match entries.get(&name) {
                            Some(q) => from_bignum(&q)?,
                            None => 0,
                        };
                        assets.push((name.name(), quantity));
                    }
                }
                decoded.push(PolicyAssets { policy_id: policy.to_bytes(), assets });
            }
            Some(decoded)
        }
    };
    Ok(DecodedValue { coin, multiasset })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CslEngine;

impl CslEngine {
    pub fn new() -> Self {
        Self
    }
}

impl LedgerEngine for CslEngine {
    fn decode_utxo(&self, raw: &[u8]) -> WalletResult<DecodedUtxo> {
        let utxo = csl::TransactionUnspentOutput::from_bytes(raw.to_vec()).map_err(ledger_err)?;
        let input = utxo.input();
        let output = utxo.output();
        Ok(DecodedUtxo {
            tx_id: input.transaction_id().to_bytes(),
            index: input.index(),
            address: output.address().to_bytes(),
            amount: decode_value(&output.amount())?,
        })
    }

    fn address_to_bech32(&self, raw: &[u8]) -> WalletResult<String> {
        csl::Address::from_bytes(raw.to_vec())
            .map_err(ledger_err)?
            .to_bech32(None)
            .map_err(ledger_err)
    }

    fn value_coin(&self, raw: &[u8]) -> WalletResult<Lovelace> {
        let value = csl::Value::from_bytes(raw.to_vec()).map_err(ledger_err)?;
        Ok(Lovelace(from_bignum(&value.coin())?))
    }

    fn new_tx_builder(&self, params: &ProtocolParams) -> WalletResult<Box<dyn LedgerTxBuilder>> {
        let fee = csl::LinearFee::new(&to_bignum(params.min_fee_a)?, &to_bignum(params.min_fee_b)?);
        let config = csl::TransactionBuilderConfigBuilder::new()
            .fee_algo(&fee)
            .pool_deposit(&to_bignum(params.pool_deposit)?)
            .key_deposit(&to_bignum(params.key_deposit)?)
            .coins_per_utxo_byte(&to_bignum(params.coins_per_utxo_byte())?)
            .max_value_size(params.max_value_size)
            .max_tx_size(params.max_tx_size)
            .prefer_pure_change(params.prefer_pure_change)
            .build()
            .map_err(ledger_err)?;
        Ok(Box::new(CslTxBuilder { inner: csl::TransactionBuilder::new(&config) }))
    }

    fn vkey_witnesses_only(&self, witness_set: &[u8]) -> WalletResult<Vec<u8>> {
        let partial = csl::TransactionWitnessSet::from_bytes(witness_set.to_vec()).map_err(ledger_err)?;
        let mut fresh = csl::TransactionWitnessSet::new();
        if let Some(vkeys) = partial.vkeys() {
            fresh.set_vkeys(&vkeys);
        }
        Ok(fresh.to_bytes())
    }

    fn assemble_transaction(&self, tx: &[u8], witness_set: &[u8]) -> WalletResult<Vec<u8>> {
        let original = csl::Transaction::from_bytes(tx.to_vec()).map_err(ledger_err)?;
        let witnesses = csl::TransactionWitnessSet::from_bytes(witness_set.to_vec()).map_err(ledger_err)?;
        let signed = csl::Transaction::new(&original.body(), &witnesses, original.auxiliary_data());
        Ok(signed.to_bytes())
    }
}

struct CslTxBuilder {
    inner: csl::TransactionBuilder,
}

impl LedgerTxBuilder for CslTxBuilder {
    fn add_output(&mut self, address_bech32: &str, amount: Lovelace) -> WalletResult<()> {
        let address = csl::Address::from_bech32(address_bech32).map_err(ledger_err)?;
        let value = csl::Value::new(&to_bignum(amount.as_u64())?);
        self.inner
            .add_output(&csl::TransactionOutput::new(&address, &value))
            .map_err(ledger_err)
    }

    fn add_inputs_from(&mut self, utxos: &[Vec<u8>], strategy: CoinSelectionStrategy) -> WalletResult<()> {
        let mut pool = csl::TransactionUnspentOutputs::new();
        for raw in utxos {
            pool.add(&csl::TransactionUnspentOutput::from_bytes(raw.clone()).map_err(ledger_err)?);
        }
        self.inner.add_inputs_from(&pool, to_cip2(strategy)).map_err(ledger_err)
    }

    fn add_change_if_needed(&mut self, change_address_bech32: &str) -> WalletResult<bool> {
        let address = csl::Address::from_bech32(change_address_bech32).map_err(ledger_err)?;
        self.inner.add_change_if_needed(&address).map_err(ledger_err)
    }

    fn build(self: Box<Self>) -> WalletResult<UnsignedTransaction> {
        let body = self.inner.build().map_err(ledger_err)?;
        let hash = Blake2b256::digest(body.to_bytes()).to_vec();
        let tx = csl::Transaction::new(&body, &csl::TransactionWitnessSet::new(), None);
        Ok(UnsignedTransaction { hash, bytes: tx.to_bytes() })
    }
}
