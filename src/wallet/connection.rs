//! ConnectionManager - discovery, validation, enabling and persistence
//!
//! ```text
//! Disconnected ──connect──► Validating ──► Enabling ──► Connected
//!      ▲                        │              │            │
//!      └────── failure (previous state restored) ◄──────────┘
//!      └──────────────────────── disconnect ◄───────────────┘
//! ```
//!
//! `connect` holds `&mut WalletSession` for its whole duration, so the
//! intermediate states are never observable from outside.

use serde_json::{Map, Value};
use std::rc::Rc;
use tracing::{debug, info, warn};

use super::provider::{WalletHost, WalletProvider};
use super::session::WalletSession;
use super::storage::KeyValueStore;
use crate::core::{WalletDescriptor, WalletKey, STORAGE_KEY};
use crate::error::{WalletError, WalletResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Validating,
    Enabling,
    Connected,
}

pub struct ConnectionManager {
    /// `None` when no host environment (e.g. no `window`) exists.
    host: Option<Rc<dyn WalletHost>>,
    storage: Rc<dyn KeyValueStore>,
}

impl ConnectionManager {
    pub fn new(host: Option<Rc<dyn WalletHost>>, storage: Rc<dyn KeyValueStore>) -> Self {
        Self { host, storage }
    }

    fn resolve(&self, wallet_key: &str) -> WalletResult<Rc<dyn WalletProvider>> {
        let host = self.host.as_ref().ok_or(WalletError::HostEnvironmentUnavailable)?;
        if !host.has_wallet_namespace() {
            return Err(WalletError::NoWalletsFound);
        }
        host.provider(wallet_key).ok_or(WalletError::SpecificWalletNotFound)
    }

    /// Pre-flight check that `wallet_key` is injected in the host.
    pub fn validate_wallet(&self, wallet_key: &str) -> WalletResult<()> {
        self.resolve(wallet_key).map(|_| ())
    }

    /// Supported wallets currently injected in the host.
    pub fn available_wallets(&self) -> Vec<WalletKey> {
        let Some(host) = self.host.as_ref() else { return Vec::new() };
        let mut keys: Vec<WalletKey> = host
            .injected_keys()
            .iter()
            .filter_map(|k| WalletKey::parse(k).ok())
            .collect();
        keys.sort();
        keys
    }

    /// Enable `wallet_key` and install it into `session`.
    ///
    /// The descriptor is written only when none is stored yet: the first
    /// successful connect wins, later connects leave it untouched.
    pub async fn connect(&self, session: &mut WalletSession, wallet_key: &str) -> WalletResult<Rc<dyn WalletProvider>> {
        let key = WalletKey::parse(wallet_key)?;
        let previous = session.state();

        session.set_state(ConnectionState::Validating);
        let provider = match self.resolve(key.as_str()) {
            Ok(provider) => provider,
            Err(e) => {
                session.set_state(previous);
                return Err(e);
            }
        };

        session.set_state(ConnectionState::Enabling);
        let enabled = match provider.enable().await {
            Ok(enabled) => enabled,
            Err(e) => {
                debug!(wallet = %key, error = %e, "enable rejected");
                session.set_state(previous);
                return Err(e);
            }
        };

        session.install(key, provider.clone(), enabled);
        if let Err(e) = self.remember(key, provider.as_ref()) {
            warn!(wallet = %key, error = %e, "could not persist wallet selection");
        }
        info!(wallet = %key, name = %provider.name(), "wallet connected");
        Ok(provider)
    }

    fn remember(&self, key: WalletKey, provider: &dyn WalletProvider) -> WalletResult<()> {
        if let Some(existing) = self.wallet_details_from_storage() {
            debug!(stored = %existing.key, "wallet selection already stored");
            return Ok(());
        }
        let descriptor = WalletDescriptor {
            name: provider.name(),
            icon: provider.icon(),
            api_version: provider.api_version(),
            key,
            extra: Map::new(),
        };
        self.storage.set(STORAGE_KEY, &serde_json::to_string(&descriptor)?)
    }

    /// Stored descriptor, or `None` when absent or unparsable. Never re-enables.
    pub fn wallet_details_from_storage(&self) -> Option<WalletDescriptor> {
        let raw = match self.storage.get(STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "wallet storage unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!(error = %e, "stored wallet descriptor is not valid");
                None
            }
        }
    }

    /// Merge application data into the stored descriptor.
    pub fn set_additional_wallet_data(&self, data: Map<String, Value>) -> WalletResult<()> {
        let raw = self
            .storage
            .get(STORAGE_KEY)?
            .ok_or_else(|| WalletError::MissingStoredWallet(STORAGE_KEY.into()))?;
        let mut item: Map<String, Value> = serde_json::from_str(&raw)?;
        item.extend(data);
        self.storage.set(STORAGE_KEY, &serde_json::to_string(&item)?)
    }

    /// Forget the stored selection. The in-memory session is left as is;
    /// use [`ConnectionManager::disconnect`] to drop it too.
    pub async fn disable_wallet(&self) -> WalletResult<()> {
        self.storage.remove(STORAGE_KEY)
    }

    pub async fn disconnect(&self, session: &mut WalletSession) -> WalletResult<()> {
        self.disable_wallet().await?;
        session.clear();
        info!("wallet disconnected");
        Ok(())
    }
}
