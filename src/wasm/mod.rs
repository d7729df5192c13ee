//! WASM module: browser adapters
//!
//! ```text
//! window.cardano.<key>  ──►  BrowserHost / JsWalletProvider / JsEnabledApi
//! window.localStorage   ──►  LocalStorage
//!                                  │
//!                                  ▼
//!                          ConnectionManager
//! ```

mod bridge;
mod storage;

pub use bridge::{BrowserHost, JsEnabledApi, JsWalletProvider};
pub use storage::LocalStorage;

use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::wallet::{ConnectionManager, KeyValueStore, MemoryStorage, WalletHost};

/// Routes Rust panics to the browser console once the module loads.
#[wasm_bindgen(start)]
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}

const CONSOLE_PREFIX: &str = "[cardano-wallets]";

/// Warnings that have no `tracing` subscriber in the browser.
pub(crate) fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("{CONSOLE_PREFIX} {message}")));
}

/// Connection manager over the page's wallets and `localStorage`.
///
/// Without a `window` the manager has no host, so `connect` reports
/// `HostEnvironmentUnavailable`; storage then falls back to memory.
pub fn browser_connection_manager() -> ConnectionManager {
    let host = BrowserHost::detect().map(|h| Rc::new(h) as Rc<dyn WalletHost>);
    let storage: Rc<dyn KeyValueStore> = match LocalStorage::open() {
        Some(local) => Rc::new(local),
        None => {
            console_warn("localStorage unavailable, wallet choice will not persist");
            Rc::new(MemoryStorage::new())
        }
    };
    ConnectionManager::new(host, storage)
}
