//! `window.localStorage` as a KeyValueStore

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::{WalletError, WalletResult};
use crate::wallet::KeyValueStore;

fn storage_error(value: JsValue) -> WalletError {
    WalletError::Storage(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[derive(Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// `None` when there is no window or the browser denies storage access.
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> WalletResult<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> WalletResult<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> WalletResult<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}
