//! Error taxonomy shared by every public operation.

use thiserror::Error;

pub type WalletResult<T> = Result<T, WalletError>;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("{key} is not supported. Only {supported} are supported.")]
    UnsupportedWallet { key: String, supported: String },

    #[error("window is not defined")]
    HostEnvironmentUnavailable,

    #[error("No wallets found")]
    NoWalletsFound,

    #[error("Specific wallet not found")]
    SpecificWalletNotFound,

    #[error("Wallet session is not enabled")]
    SessionNotEnabled,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Not delegated")]
    NotDelegated,

    #[error("Failed to build transaction: {0}")]
    TransactionBuild(Box<WalletError>),

    #[error(transparent)]
    ExternalApi(#[from] ExternalApiError),

    /// Rejection from the wallet provider, message passed through as-is.
    #[error("{0}")]
    Provider(String),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("No data saved to local storage. Missing {0}")]
    MissingStoredWallet(String),

    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Ledger-index failures. Messages are fixed so provider detail never leaks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalApiError {
    #[error("Error getting registrations")]
    GetRegistrations,
    #[error("Error getting rewards history")]
    GetRewardsHistory,
    #[error("Blockfrost URL not defined")]
    UrlNotDefined,
    #[error("Blockfrost project ID not defined")]
    ProjectIdNotDefined,
}

/// Payload-free mirror of [`WalletError`] for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletErrorKind {
    UnsupportedWallet,
    HostEnvironmentUnavailable,
    NoWalletsFound,
    SpecificWalletNotFound,
    SessionNotEnabled,
    InvalidArgument,
    InsufficientBalance,
    NotDelegated,
    TransactionBuild,
    ExternalApi,
    Provider,
    Ledger,
    Storage,
}

impl WalletError {
    pub fn kind(&self) -> WalletErrorKind {
        match self {
            Self::UnsupportedWallet { .. } => WalletErrorKind::UnsupportedWallet,
            Self::HostEnvironmentUnavailable => WalletErrorKind::HostEnvironmentUnavailable,
            Self::NoWalletsFound => WalletErrorKind::NoWalletsFound,
            Self::SpecificWalletNotFound => WalletErrorKind::SpecificWalletNotFound,
            Self::SessionNotEnabled => WalletErrorKind::SessionNotEnabled,
            Self::InvalidArgument(_) => WalletErrorKind::InvalidArgument,
            Self::InsufficientBalance => WalletErrorKind::InsufficientBalance,
            Self::NotDelegated => WalletErrorKind::NotDelegated,
            Self::TransactionBuild(_) => WalletErrorKind::TransactionBuild,
            Self::ExternalApi(_) => WalletErrorKind::ExternalApi,
            Self::Provider(_) => WalletErrorKind::Provider,
            Self::Ledger(_) | Self::Hex(_) => WalletErrorKind::Ledger,
            Self::Storage(_) | Self::MissingStoredWallet(_) | Self::Json(_) => WalletErrorKind::Storage,
        }
    }

    #[cfg(any(feature = "csl", test))]
    pub(crate) fn ledger(message: impl std::fmt::Display) -> Self {
        Self::Ledger(message.to_string())
    }

    pub(crate) fn build(cause: WalletError) -> Self {
        match cause {
            already @ Self::TransactionBuild(_) => already,
            other => Self::TransactionBuild(Box::new(other)),
        }
    }
}
