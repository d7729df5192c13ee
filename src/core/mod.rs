//! Shared vocabulary: provider keys, protocol constants and value types.

pub mod keys;
pub mod types;

pub use keys::{WalletKey, LOVELACE_PER_ADA, MAINNET_NETWORK_ID, STORAGE_KEY};
pub use types::{
    Asset, AssetName, BuildTransactionInput, BuiltTransaction, ChangeOutputSpec, Lovelace,
    OutputSpec, Paginate, Utxo, WalletDescriptor,
};
