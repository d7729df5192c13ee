//! Shared test doubles: scripted CIP-30 provider, recording enabled API and a
//! JSON-fixture ledger engine.
//!
//! Fixture encoding used throughout:
//! - UTxO record  = hex(JSON(DecodedUtxo))
//! - balance      = hex(decimal lovelace string)
//! - witness set  = hex(JSON(WitnessFixture))
//! - address      = raw bytes, rendered as `addr_fixture1<hex>`

#![allow(dead_code)]

use async_trait::async_trait;
use cardano_wallets::ledger::{DecodedUtxo, DecodedValue, PolicyAssets, UnsignedTransaction};
use cardano_wallets::{
    CoinSelectionStrategy, ConnectionManager, EnabledApi, InjectedWallets, KeyValueStore, LedgerEngine,
    LedgerTxBuilder, Lovelace, MemoryStorage, Paginate, ProtocolParams, WalletError, WalletProvider, WalletResult,
    WalletSession,
};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const BECH32_PREFIX: &str = "addr_fixture1";

// =============================================================================
// Fixtures
// =============================================================================

pub fn utxo_hex(tx_byte: u8, index: u32, coin: u64, multiasset: Option<Vec<PolicyAssets>>) -> String {
    let decoded = DecodedUtxo {
        tx_id: vec![tx_byte; 32],
        index,
        address: vec![0x01, tx_byte],
        amount: DecodedValue { coin: Lovelace(coin), multiasset },
    };
    hex::encode(serde_json::to_vec(&decoded).expect("fixture"))
}

pub fn policy(byte: u8, assets: Vec<(Vec<u8>, u64)>) -> PolicyAssets {
    PolicyAssets { policy_id: vec![byte; 28], assets }
}

pub fn balance_hex(lovelace: u64) -> String {
    hex::encode(lovelace.to_string())
}

pub fn bech32_of(raw_hex: &str) -> String {
    format!("{BECH32_PREFIX}{raw_hex}")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WitnessFixture {
    pub vkeys: Vec<String>,
    pub scripts: Vec<String>,
}

pub fn witness_hex(vkeys: &[&str], scripts: &[&str]) -> String {
    let set = WitnessFixture {
        vkeys: vkeys.iter().map(|s| s.to_string()).collect(),
        scripts: scripts.iter().map(|s| s.to_string()).collect(),
    };
    hex::encode(serde_json::to_vec(&set).expect("fixture"))
}

/// What the fixture engine's `assemble_transaction` produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedFixture {
    pub body: String,
    pub witnesses: WitnessFixture,
}

pub fn decode_signed(signed_hex: &str) -> SignedFixture {
    serde_json::from_slice(&hex::decode(signed_hex).expect("hex")).expect("signed fixture")
}

/// What the fixture tx builder serializes as the unsigned transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxFixture {
    pub outputs: Vec<(String, u64)>,
    pub selected_inputs: usize,
    pub strategy: u8,
    pub change: Option<(String, u64)>,
}

pub fn decode_tx(tx_hex: &str) -> TxFixture {
    serde_json::from_slice(&hex::decode(tx_hex).expect("hex")).expect("tx fixture")
}

// =============================================================================
// Ledger engine
// =============================================================================

#[derive(Default)]
pub struct FixtureEngine {
    pub builder_params: RefCell<Option<ProtocolParams>>,
}

impl FixtureEngine {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

fn fixture_err(e: impl std::fmt::Display) -> WalletError {
    WalletError::Ledger(e.to_string())
}

impl LedgerEngine for FixtureEngine {
    fn decode_utxo(&self, raw: &[u8]) -> WalletResult<DecodedUtxo> {
        serde_json::from_slice(raw).map_err(fixture_err)
    }

    fn address_to_bech32(&self, raw: &[u8]) -> WalletResult<String> {
        if raw.is_empty() {
            return Err(WalletError::Ledger("empty address".into()));
        }
        Ok(bech32_of(&hex::encode(raw)))
    }

    fn value_coin(&self, raw: &[u8]) -> WalletResult<Lovelace> {
        let text = std::str::from_utf8(raw).map_err(fixture_err)?;
        text.parse()
    }

    fn new_tx_builder(&self, params: &ProtocolParams) -> WalletResult<Box<dyn LedgerTxBuilder>> {
        *self.builder_params.borrow_mut() = Some(params.clone());
        Ok(Box::new(FixtureTxBuilder::default()))
    }

    fn vkey_witnesses_only(&self, witness_set: &[u8]) -> WalletResult<Vec<u8>> {
        let mut set: WitnessFixture = serde_json::from_slice(witness_set).map_err(fixture_err)?;
        set.scripts.clear();
        serde_json::to_vec(&set).map_err(fixture_err)
    }

    fn assemble_transaction(&self, tx: &[u8], witness_set: &[u8]) -> WalletResult<Vec<u8>> {
        let witnesses: WitnessFixture = serde_json::from_slice(witness_set).map_err(fixture_err)?;
        let signed = SignedFixture { body: hex::encode(tx), witnesses };
        serde_json::to_vec(&signed).map_err(fixture_err)
    }
}

/// Largest-first over coin only; a flat 170_000 fee.
#[derive(Default)]
struct FixtureTxBuilder {
    tx: TxFixture,
    input_total: u64,
}

const FIXTURE_FEE: u64 = 170_000;

impl FixtureTxBuilder {
    fn required(&self) -> u64 {
        self.tx.outputs.iter().map(|(_, amount)| amount).sum::<u64>() + FIXTURE_FEE
    }
}

impl LedgerTxBuilder for FixtureTxBuilder {
    fn add_output(&mut self, address_bech32: &str, amount: Lovelace) -> WalletResult<()> {
        if !address_bech32.starts_with("addr") {
            return Err(WalletError::Ledger(format!("invalid address: {address_bech32}")));
        }
        self.tx.outputs.push((address_bech32.to_string(), amount.as_u64()));
        Ok(())
    }

    fn add_inputs_from(&mut self, utxos: &[Vec<u8>], strategy: CoinSelectionStrategy) -> WalletResult<()> {
        let mut coins = utxos
            .iter()
            .map(|raw| serde_json::from_slice::<DecodedUtxo>(raw).map(|u| u.amount.coin.as_u64()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(fixture_err)?;
        coins.sort_unstable_by(|a, b| b.cmp(a));

        let required = self.required();
        for coin in coins {
            if self.input_total >= required {
                break;
            }
            self.input_total += coin;
            self.tx.selected_inputs += 1;
        }
        if self.input_total < required {
            return Err(WalletError::Ledger("Insufficient input in transaction".into()));
        }
        self.tx.strategy = strategy.index();
        Ok(())
    }

    fn add_change_if_needed(&mut self, change_address_bech32: &str) -> WalletResult<bool> {
        let surplus = self.input_total.saturating_sub(self.required());
        if surplus == 0 {
            return Ok(false);
        }
        self.tx.change = Some((change_address_bech32.to_string(), surplus));
        Ok(true)
    }

    fn build(self: Box<Self>) -> WalletResult<UnsignedTransaction> {
        let bytes = serde_json::to_vec(&self.tx).map_err(fixture_err)?;
        Ok(UnsignedTransaction { hash: vec![0x7a; 32], bytes })
    }
}

// =============================================================================
// CIP-30 doubles
// =============================================================================

/// Enabled API with scripted answers and a call log.
pub struct RecordingApi {
    pub balance: RefCell<String>,
    pub network_id: Cell<u8>,
    pub utxos: RefCell<Vec<String>>,
    pub collateral: RefCell<Vec<String>>,
    pub unused_addresses: RefCell<Vec<String>>,
    pub change_address: RefCell<String>,
    pub reward_addresses: RefCell<Vec<String>>,
    pub sign_result: RefCell<Result<String, String>>,
    pub submit_result: RefCell<Result<String, String>>,
    pub calls: RefCell<Vec<String>>,
    pub last_utxo_args: RefCell<Option<(Option<String>, Option<Paginate>)>>,
}

impl Default for RecordingApi {
    fn default() -> Self {
        Self {
            balance: RefCell::new(balance_hex(0)),
            network_id: Cell::new(1),
            utxos: RefCell::new(Vec::new()),
            collateral: RefCell::new(Vec::new()),
            unused_addresses: RefCell::new(Vec::new()),
            change_address: RefCell::new("00aa".into()),
            reward_addresses: RefCell::new(Vec::new()),
            sign_result: RefCell::new(Ok(witness_hex(&["vk1"], &[]))),
            submit_result: RefCell::new(Ok("f".repeat(64))),
            calls: RefCell::new(Vec::new()),
            last_utxo_args: RefCell::new(None),
        }
    }
}

impl RecordingApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn called(&self, method: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == method)
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, method: &str) {
        self.calls.borrow_mut().push(method.to_string());
    }
}

#[async_trait(?Send)]
impl EnabledApi for RecordingApi {
    async fn get_balance(&self) -> WalletResult<String> {
        self.record("getBalance");
        Ok(self.balance.borrow().clone())
    }

    async fn get_network_id(&self) -> WalletResult<u8> {
        self.record("getNetworkId");
        Ok(self.network_id.get())
    }

    async fn get_utxos(&self, amount: Option<&str>, paginate: Option<Paginate>) -> WalletResult<Vec<String>> {
        self.record("getUtxos");
        *self.last_utxo_args.borrow_mut() = Some((amount.map(str::to_string), paginate));
        Ok(self.utxos.borrow().clone())
    }

    async fn get_collateral(&self) -> WalletResult<Vec<String>> {
        self.record("getCollateral");
        Ok(self.collateral.borrow().clone())
    }

    async fn get_unused_addresses(&self) -> WalletResult<Vec<String>> {
        self.record("getUnusedAddresses");
        Ok(self.unused_addresses.borrow().clone())
    }

    async fn get_change_address(&self) -> WalletResult<String> {
        self.record("getChangeAddress");
        Ok(self.change_address.borrow().clone())
    }

    async fn get_reward_addresses(&self) -> WalletResult<Vec<String>> {
        self.record("getRewardAddresses");
        Ok(self.reward_addresses.borrow().clone())
    }

    async fn sign_tx(&self, _tx: &str, partial_sign: bool) -> WalletResult<String> {
        self.record(if partial_sign { "signTx(partial)" } else { "signTx" });
        self.sign_result.borrow().clone().map_err(WalletError::Provider)
    }

    async fn submit_tx(&self, _tx: &str) -> WalletResult<String> {
        self.record("submitTx");
        self.submit_result.borrow().clone().map_err(WalletError::Provider)
    }
}

/// Provider whose `enable()` hands out a shared [`RecordingApi`], or rejects.
pub struct ScriptedProvider {
    pub name: String,
    pub api: Rc<RecordingApi>,
    pub reject_enable: Option<String>,
    pub enable_calls: Cell<usize>,
    pub enabled: Cell<bool>,
}

impl ScriptedProvider {
    pub fn new(name: &str, api: Rc<RecordingApi>) -> Rc<Self> {
        Rc::new(Self { name: name.into(), api, reject_enable: None, enable_calls: Cell::new(0), enabled: Cell::new(false) })
    }

    pub fn rejecting(name: &str, reason: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            api: RecordingApi::new(),
            reject_enable: Some(reason.into()),
            enable_calls: Cell::new(0),
            enabled: Cell::new(false),
        })
    }
}

#[async_trait(?Send)]
impl WalletProvider for ScriptedProvider {
    fn api_version(&self) -> String {
        "0.1.0".into()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn icon(&self) -> String {
        format!("data:image/svg+xml,{}", self.name.to_lowercase())
    }

    async fn enable(&self) -> WalletResult<Rc<dyn EnabledApi>> {
        self.enable_calls.set(self.enable_calls.get() + 1);
        if let Some(reason) = &self.reject_enable {
            return Err(WalletError::Provider(reason.clone()));
        }
        self.enabled.set(true);
        Ok(self.api.clone() as Rc<dyn EnabledApi>)
    }

    async fn is_enabled(&self) -> WalletResult<bool> {
        Ok(self.enabled.get())
    }
}

// =============================================================================
// Wiring
// =============================================================================

pub struct Harness {
    pub manager: ConnectionManager,
    pub storage: MemoryStorage,
    pub session: WalletSession,
    pub engine: Rc<FixtureEngine>,
}

impl Harness {
    pub fn with_host(host: InjectedWallets) -> Self {
        let storage = MemoryStorage::new();
        let engine = FixtureEngine::new();
        let manager = ConnectionManager::new(Some(Rc::new(host)), Rc::new(storage.clone()) as Rc<dyn KeyValueStore>);
        let session = WalletSession::new(engine.clone());
        Self { manager, storage, session, engine }
    }
}

/// A session already connected to a "Nami" provider backed by `api`.
pub async fn connected(api: Rc<RecordingApi>) -> Harness {
    let provider = ScriptedProvider::new("Nami", api);
    let mut harness = Harness::with_host(InjectedWallets::new().with("nami", provider));
    harness.manager.connect(&mut harness.session, "nami").await.expect("connect");
    harness
}
