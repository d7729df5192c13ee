//! Staking verification against a chain index (Blockfrost)

mod blockfrost;

pub use blockfrost::{BlockfrostClient, API_VERSION};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::Lovelace;
use crate::error::{WalletError, WalletResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationAction {
    Registered,
    Deregistered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsRegistration {
    pub tx_hash: String,
    pub action: RegistrationAction,
}

/// One epoch of stake history for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsHistory {
    pub active_epoch: u64,
    pub amount: Lovelace,
    pub pool_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockfrostError {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

/// Either the payload or the index's own error body; never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockfrostResult<T> {
    pub data: Option<T>,
    pub error: Option<BlockfrostError>,
}

impl<T> BlockfrostResult<T> {
    pub fn data(data: T) -> Self {
        Self { data: Some(data), error: None }
    }

    pub fn error(error: BlockfrostError) -> Self {
        Self { data: None, error: Some(error) }
    }
}

/// Read access to per-account chain history.
///
/// Transport failures surface as `WalletError::ExternalApi`; an error
/// answered by the index itself comes back inside `BlockfrostResult::error`.
#[async_trait(?Send)]
pub trait LedgerIndex {
    async fn accounts_registrations(&self, stake_address: &str) -> WalletResult<BlockfrostResult<Vec<AccountsRegistration>>>;

    async fn accounts_history(&self, stake_address: &str) -> WalletResult<BlockfrostResult<Vec<AccountsHistory>>>;
}

/// Succeeds when the reward address has any registration history at all.
///
/// Only presence is checked: an account whose latest action is a
/// deregistration still passes.
pub async fn verify_staking(index: &dyn LedgerIndex, reward_address: &str) -> WalletResult<()> {
    let result = index.accounts_registrations(reward_address).await?;
    if let Some(error) = &result.error {
        debug!(status = error.status_code, message = %error.message, "registrations lookup answered with error");
        return Err(WalletError::NotDelegated);
    }
    match result.data {
        Some(rows) if !rows.is_empty() => {
            info!(reward_address, registrations = rows.len(), "staking verified");
            Ok(())
        }
        _ => Err(WalletError::NotDelegated),
    }
}
