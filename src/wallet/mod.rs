//! Wallet module - CIP-30 connection lifecycle and capability passthrough
//!
//! # Architecture
//!
//! ```text
//! ConnectionManager ──(host: WalletHost)──► WalletProvider.enable()
//!     │                                          │
//!     ├── KeyValueStore ("cardanoWallet")        ▼
//!     │                                     EnabledApi
//!     ▼                                          │
//! WalletSession (caller-owned) ◄─────────────────┘
//!     │
//!     └── getBalance, getUtxos, signTx, submitTx, ... (+ LedgerEngine for bech32)
//! ```

mod connection;
mod provider;
mod session;
mod storage;

pub use connection::{ConnectionManager, ConnectionState};
pub use provider::{EnabledApi, InjectedWallets, WalletHost, WalletProvider};
pub use session::WalletSession;
pub use storage::{KeyValueStore, MemoryStorage};
