//! Blockfrost client - account registrations and history over HTTPS

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AccountsHistory, AccountsRegistration, BlockfrostError, BlockfrostResult, LedgerIndex};
use crate::config::BlockfrostConfig;
use crate::error::{ExternalApiError, WalletError, WalletResult};

pub const API_VERSION: &str = "v0";
const PROJECT_ID_HEADER: &str = "project_id";

#[derive(Deserialize)]
#[serde(untagged)]
enum Body<T> {
    Data(T),
    Error(BlockfrostError),
}

#[derive(Debug, Clone)]
pub struct BlockfrostClient {
    config: BlockfrostConfig,
    http: reqwest::Client,
}

impl BlockfrostClient {
    pub fn new(config: BlockfrostConfig) -> WalletResult<Self> {
        config.validate()?;
        Ok(Self { config, http: reqwest::Client::new() })
    }

    /// Reads `BLOCKFROST_URL` and `PUBLIC_BLOCKFROST_PROJECT_ID`.
    pub fn from_env() -> WalletResult<Self> {
        Self::new(BlockfrostConfig::from_env())
    }

    pub fn config(&self) -> &BlockfrostConfig {
        &self.config
    }

    fn endpoint(&self, stake_address: &str, resource: &str) -> String {
        format!(
            "{}/api/{}/accounts/{}/{}?order=desc",
            self.config.base_url.trim_end_matches('/'),
            API_VERSION,
            stake_address,
            resource
        )
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, failure: ExternalApiError) -> WalletResult<BlockfrostResult<T>> {
        debug!(%url, "blockfrost request");
        let response = self
            .http
            .get(url)
            .header(PROJECT_ID_HEADER, self.config.project_id.as_str())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "blockfrost unreachable");
                WalletError::from(failure)
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "blockfrost request rejected");
            return Err(failure.into());
        }

        let body: Body<T> = response.json().await.map_err(|e| {
            warn!(error = %e, "blockfrost body not understood");
            WalletError::from(failure)
        })?;
        Ok(match body {
            Body::Data(data) => BlockfrostResult { data: Some(data), error: None },
            Body::Error(error) => BlockfrostResult { data: None, error: Some(error) },
        })
    }
}

#[async_trait(?Send)]
impl LedgerIndex for BlockfrostClient {
    async fn accounts_registrations(&self, stake_address: &str) -> WalletResult<BlockfrostResult<Vec<AccountsRegistration>>> {
        let url = self.endpoint(stake_address, "registrations");
        self.fetch(&url, ExternalApiError::GetRegistrations).await
    }

    async fn accounts_history(&self, stake_address: &str) -> WalletResult<BlockfrostResult<Vec<AccountsHistory>>> {
        let url = self.endpoint(stake_address, "history");
        self.fetch(&url, ExternalApiError::GetRewardsHistory).await
    }
}
