//! cardano-wallets: CIP-30 browser wallet connector. Connect, inspect, build, sign, submit.
//!
//! # Architecture
//!
//! ```text
//! ConnectionManager (validate → enable → remember)
//!   │
//!   ├── WalletHost ("window.cardano") → WalletProvider → EnabledApi
//!   ├── KeyValueStore ("cardanoWallet" descriptor)
//!   │
//!   ▼
//! WalletSession (caller-owned, one per connected wallet)
//!   │
//!   ├── inventory   hex UTxOs → Utxo { lovelace, assets }
//!   ├── tx          TransactionBuilder, sign → merge vkeys → submit
//!   └── ledger      LedgerEngine (CBOR, bech32, coin selection)
//!
//! staking: LedgerIndex (Blockfrost) → verify_staking
//! ```
//!
//! # Features
//!
//! - `native` - `tracing-subscriber` logging initialiser (default)
//! - `wasm` - browser host, CIP-30 JS bridge, `localStorage`
//! - `csl` - ledger engine backed by `cardano-serialization-lib`
//!
//! # Usage
//!
//! ```ignore
//! use cardano_wallets::{BuildTransactionInput, ChangeOutputSpec, OutputSpec, TransactionBuilder,
//!     WalletSession};
//!
//! let mut session = WalletSession::new(engine);
//! manager.connect(&mut session, "nami").await?;
//! session.verify_balance(5.0).await?;
//!
//! let input = BuildTransactionInput::new(ChangeOutputSpec::new(OutputSpec::new(to, 2_000_000u64), change));
//! let built = TransactionBuilder::default().build_transaction(&session, &input).await?;
//! let tx_id = cardano_wallets::sign_and_submit_transaction(&session, &built.tx).await?;
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod staking;
pub mod tx;
pub mod wallet;

#[cfg(feature = "native")]
pub mod logging;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{BlockfrostConfig, ProtocolParams};
pub use crate::core::{
    Asset, AssetName, BuildTransactionInput, BuiltTransaction, ChangeOutputSpec, Lovelace, OutputSpec, Paginate,
    Utxo, WalletDescriptor, WalletKey,
};
pub use error::{ExternalApiError, WalletError, WalletErrorKind, WalletResult};
pub use ledger::{CoinSelectionStrategy, LedgerEngine, LedgerTxBuilder};
pub use staking::{verify_staking, BlockfrostClient, LedgerIndex};
pub use tx::{sign_and_submit_transaction, sign_transaction, submit_signed_transaction, TransactionBuilder};
pub use wallet::{
    ConnectionManager, ConnectionState, EnabledApi, InjectedWallets, KeyValueStore, MemoryStorage, WalletHost,
    WalletProvider, WalletSession,
};

#[cfg(feature = "csl")]
pub use ledger::csl::CslEngine;

#[cfg(feature = "native")]
pub use logging::init_logging;

#[cfg(feature = "wasm")]
pub use wasm::{browser_connection_manager, BrowserHost, LocalStorage};
