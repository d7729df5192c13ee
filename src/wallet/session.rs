//! WalletSession - caller-owned handle to the connected wallet
//!
//! Every CIP-30 call is forwarded unchanged to the enabled API, except the
//! address getters, which decode to bech32 through the ledger engine. Calls
//! made before `enable()` succeeded fail fast with `SessionNotEnabled`.

use std::rc::Rc;
use tracing::debug;

use super::connection::ConnectionState;
use super::provider::{EnabledApi, WalletProvider};
use crate::core::{Lovelace, Paginate, Utxo, WalletKey, MAINNET_NETWORK_ID};
use crate::error::{WalletError, WalletResult};
use crate::inventory;
use crate::ledger::LedgerEngine;

#[derive(Clone)]
pub struct WalletSession {
    engine: Rc<dyn LedgerEngine>,
    wallet: Option<Rc<dyn WalletProvider>>,
    wallet_key: Option<WalletKey>,
    enabled: Option<Rc<dyn EnabledApi>>,
    state: ConnectionState,
}

impl WalletSession {
    pub fn new(engine: Rc<dyn LedgerEngine>) -> Self {
        Self { engine, wallet: None, wallet_key: None, enabled: None, state: ConnectionState::Disconnected }
    }

    pub fn engine(&self) -> &dyn LedgerEngine {
        self.engine.as_ref()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The raw provider of the last successful connect.
    pub fn wallet(&self) -> Option<&Rc<dyn WalletProvider>> {
        self.wallet.as_ref()
    }

    pub fn wallet_key(&self) -> Option<WalletKey> {
        self.wallet_key
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.is_some()
    }

    pub(crate) fn set_state(&mut self, state: ConnectionState) {
        debug!(from = ?self.state, to = ?state, "session state");
        self.state = state;
    }

    pub(crate) fn install(&mut self, key: WalletKey, wallet: Rc<dyn WalletProvider>, enabled: Rc<dyn EnabledApi>) {
        self.enabled = Some(enabled);
        self.wallet = Some(wallet);
        self.wallet_key = Some(key);
        self.set_state(ConnectionState::Connected);
    }

    pub(crate) fn clear(&mut self) {
        self.enabled = None;
        self.wallet = None;
        self.wallet_key = None;
        self.set_state(ConnectionState::Disconnected);
    }

    fn api(&self) -> WalletResult<&Rc<dyn EnabledApi>> {
        self.enabled.as_ref().ok_or(WalletError::SessionNotEnabled)
    }

    // =========================================================================
    // CIP-30 passthrough
    // =========================================================================

    /// Capability-level check on the provider, independent of the session handle.
    pub async fn is_wallet_enabled(&self) -> WalletResult<bool> {
        let wallet = self.wallet.as_ref().ok_or(WalletError::SessionNotEnabled)?;
        wallet.is_enabled().await
    }

    pub async fn get_balance(&self) -> WalletResult<String> {
        self.api()?.get_balance().await
    }

    pub async fn get_network_id(&self) -> WalletResult<u8> {
        self.api()?.get_network_id().await
    }

    pub async fn get_utxos(&self, amount: Option<&str>, paginate: Option<Paginate>) -> WalletResult<Vec<String>> {
        let api = self.api()?;
        debug!(?amount, ?paginate, "getUtxos");
        api.get_utxos(amount, paginate).await
    }

    pub async fn get_collateral(&self) -> WalletResult<Vec<String>> {
        self.api()?.get_collateral().await
    }

    pub async fn get_unused_addresses(&self) -> WalletResult<Vec<String>> {
        self.api()?.get_unused_addresses().await
    }

    /// Change address in bech32 form.
    pub async fn get_change_address(&self) -> WalletResult<String> {
        let raw = self.api()?.get_change_address().await?;
        self.engine.address_to_bech32(&hex::decode(raw)?)
    }

    /// Reward addresses in bech32 form.
    pub async fn get_reward_addresses(&self) -> WalletResult<Vec<String>> {
        let raw = self.api()?.get_reward_addresses().await?;
        raw.iter()
            .map(|addr| self.engine.address_to_bech32(&hex::decode(addr)?))
            .collect()
    }

    pub async fn sign_tx(&self, tx: &str, partial_sign: bool) -> WalletResult<String> {
        let api = self.api()?;
        debug!(partial_sign, "signTx");
        api.sign_tx(tx, partial_sign).await
    }

    pub async fn submit_tx(&self, tx: &str) -> WalletResult<String> {
        self.api()?.submit_tx(tx).await
    }

    // =========================================================================
    // Derived operations
    // =========================================================================

    pub async fn is_mainnet(&self) -> WalletResult<bool> {
        Ok(self.get_network_id().await? == MAINNET_NETWORK_ID)
    }

    /// Exact coin balance in base units.
    pub async fn get_lovelace_balance(&self) -> WalletResult<Lovelace> {
        let raw = self.get_balance().await?;
        self.engine.value_coin(&hex::decode(raw)?)
    }

    /// Balance in display units. Not for transaction construction.
    pub async fn get_ada_balance(&self) -> WalletResult<f64> {
        Ok(self.get_lovelace_balance().await?.to_ada())
    }

    /// Fails unless the balance is strictly above `minimum` (display units).
    pub async fn verify_balance(&self, minimum: f64) -> WalletResult<()> {
        if minimum.is_nan() || minimum <= 0.0 {
            return Err(WalletError::InvalidArgument("Minimum balance must be greater than 0.".into()));
        }
        let balance = self.get_ada_balance().await?;
        if balance <= minimum {
            return Err(WalletError::InsufficientBalance);
        }
        Ok(())
    }

    /// Bech32 address of every UTxO output.
    pub async fn get_utxo_bech32_addresses(&self) -> WalletResult<Vec<String>> {
        let raw = self.get_utxos(None, None).await?;
        raw.iter()
            .map(|utxo| {
                let decoded = self.engine.decode_utxo(&hex::decode(utxo)?)?;
                self.engine.address_to_bech32(&decoded.address)
            })
            .collect()
    }

    /// All UTxOs decoded into the structured inventory.
    pub async fn get_utxo_inventory(&self) -> WalletResult<Vec<Utxo>> {
        let raw = self.get_utxos(None, None).await?;
        inventory::decode_utxos(self.engine(), &raw)
    }
}
