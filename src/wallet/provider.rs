//! CIP-30 capability interfaces
//!
//! A provider is what a wallet injects under `window.cardano.<key>`; enabling
//! it yields the [`EnabledApi`] through which all ledger operations go.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::core::Paginate;
use crate::error::WalletResult;

#[async_trait(?Send)]
pub trait WalletProvider {
    fn api_version(&self) -> String;
    fn name(&self) -> String;
    fn icon(&self) -> String;

    /// Provider-specific extensions, when the wallet exposes any.
    fn experimental(&self) -> Option<serde_json::Value> {
        None
    }

    async fn enable(&self) -> WalletResult<Rc<dyn EnabledApi>>;
    async fn is_enabled(&self) -> WalletResult<bool>;
}

/// Values are hex-encoded CBOR, exactly as CIP-30 defines them.
#[async_trait(?Send)]
pub trait EnabledApi {
    async fn get_balance(&self) -> WalletResult<String>;
    async fn get_network_id(&self) -> WalletResult<u8>;
    async fn get_utxos(&self, amount: Option<&str>, paginate: Option<Paginate>) -> WalletResult<Vec<String>>;
    async fn get_collateral(&self) -> WalletResult<Vec<String>>;
    async fn get_unused_addresses(&self) -> WalletResult<Vec<String>>;
    async fn get_change_address(&self) -> WalletResult<String>;
    async fn get_reward_addresses(&self) -> WalletResult<Vec<String>>;
    async fn sign_tx(&self, tx: &str, partial_sign: bool) -> WalletResult<String>;
    async fn submit_tx(&self, tx: &str) -> WalletResult<String>;
}

/// The environment providers are injected into.
pub trait WalletHost {
    /// Whether the host exposes a wallet namespace at all.
    fn has_wallet_namespace(&self) -> bool;
    fn provider(&self, key: &str) -> Option<Rc<dyn WalletProvider>>;
    fn injected_keys(&self) -> Vec<String>;
}

/// In-memory host for native embedding and tests.
#[derive(Clone, Default)]
pub struct InjectedWallets {
    namespace: Option<BTreeMap<String, Rc<dyn WalletProvider>>>,
}

impl InjectedWallets {
    /// Host without any wallet namespace.
    pub fn empty() -> Self {
        Self { namespace: None }
    }

    /// Host with an (initially empty) wallet namespace.
    pub fn new() -> Self {
        Self { namespace: Some(BTreeMap::new()) }
    }

    pub fn with(mut self, key: impl Into<String>, provider: Rc<dyn WalletProvider>) -> Self {
        self.inject(key, provider);
        self
    }

    pub fn inject(&mut self, key: impl Into<String>, provider: Rc<dyn WalletProvider>) {
        self.namespace.get_or_insert_with(BTreeMap::new).insert(key.into(), provider);
    }
}

impl WalletHost for InjectedWallets {
    fn has_wallet_namespace(&self) -> bool {
        self.namespace.is_some()
    }

    fn provider(&self, key: &str) -> Option<Rc<dyn WalletProvider>> {
        self.namespace.as_ref()?.get(key).cloned()
    }

    fn injected_keys(&self) -> Vec<String> {
        self.namespace
            .as_ref()
            .map(|ns| ns.keys().cloned().collect())
            .unwrap_or_default()
    }
}
