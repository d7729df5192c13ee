//! `window.cardano` bridge: CIP-30 objects seen through the wallet traits

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::core::Paginate;
use crate::error::{WalletError, WalletResult};
use crate::wallet::{EnabledApi, WalletHost, WalletProvider};

const WALLET_NAMESPACE: &str = "cardano";

/// CIP-30 rejects with `{ code, info }`; plain `Error`s and strings also occur.
fn provider_error(value: JsValue) -> WalletError {
    let message = Reflect::get(&value, &JsValue::from_str("info"))
        .ok()
        .and_then(|info| info.as_string())
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    WalletError::Provider(message)
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn field(target: &JsValue, key: &str) -> WalletResult<JsValue> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(provider_error)
}

fn string_field(target: &JsValue, key: &str) -> String {
    field(target, key).ok().and_then(|v| v.as_string()).unwrap_or_default()
}

async fn call(target: &JsValue, method: &str, args: &[JsValue]) -> WalletResult<JsValue> {
    let function: Function = field(target, method)?
        .dyn_into()
        .map_err(|_| WalletError::Provider(format!("{method} is not a function")))?;
    let returned = function.apply(target, &Array::from_iter(args.iter())).map_err(provider_error)?;
    match returned.dyn_into::<Promise>() {
        Ok(promise) => JsFuture::from(promise).await.map_err(provider_error),
        Err(value) => Ok(value),
    }
}

fn expect_string(value: JsValue, method: &str) -> WalletResult<String> {
    value
        .as_string()
        .ok_or_else(|| WalletError::Provider(format!("{method} did not return a string")))
}

/// `null`/`undefined` read as an empty list.
fn expect_strings(value: JsValue, method: &str) -> WalletResult<Vec<String>> {
    if is_absent(&value) {
        return Ok(Vec::new());
    }
    let array: Array = value
        .dyn_into()
        .map_err(|_| WalletError::Provider(format!("{method} did not return an array")))?;
    array.iter().map(|item| expect_string(item, method)).collect()
}

fn optional_arg(value: Option<&str>) -> JsValue {
    value.map(JsValue::from_str).unwrap_or(JsValue::UNDEFINED)
}

/// A provider object as injected under `window.cardano.<key>`.
#[derive(Clone)]
pub struct JsWalletProvider {
    inner: JsValue,
}

impl JsWalletProvider {
    pub fn new(inner: JsValue) -> Self {
        Self { inner }
    }
}

#[async_trait(?Send)]
impl WalletProvider for JsWalletProvider {
    fn api_version(&self) -> String {
        string_field(&self.inner, "apiVersion")
    }

    fn name(&self) -> String {
        string_field(&self.inner, "name")
    }

    fn icon(&self) -> String {
        string_field(&self.inner, "icon")
    }

    fn experimental(&self) -> Option<serde_json::Value> {
        let value = field(&self.inner, "experimental").ok()?;
        if is_absent(&value) {
            return None;
        }
        serde_wasm_bindgen::from_value(value).ok()
    }

    async fn enable(&self) -> WalletResult<Rc<dyn EnabledApi>> {
        let api = call(&self.inner, "enable", &[]).await?;
        Ok(Rc::new(JsEnabledApi { inner: api }))
    }

    async fn is_enabled(&self) -> WalletResult<bool> {
        Ok(call(&self.inner, "isEnabled", &[]).await?.is_truthy())
    }
}

/// The object a JS provider's `enable()` resolves to.
#[derive(Clone)]
pub struct JsEnabledApi {
    inner: JsValue,
}

#[async_trait(?Send)]
impl EnabledApi for JsEnabledApi {
    async fn get_balance(&self) -> WalletResult<String> {
        expect_string(call(&self.inner, "getBalance", &[]).await?, "getBalance")
    }

    async fn get_network_id(&self) -> WalletResult<u8> {
        let id = call(&self.inner, "getNetworkId", &[]).await?;
        id.as_f64()
            .filter(|n| n.fract() == 0.0 && (0.0..=255.0).contains(n))
            .map(|n| n as u8)
            .ok_or_else(|| WalletError::Provider("getNetworkId did not return a network id".into()))
    }

    async fn get_utxos(&self, amount: Option<&str>, paginate: Option<Paginate>) -> WalletResult<Vec<String>> {
        let paginate = match paginate {
            Some(p) => serde_wasm_bindgen::to_value(&p).map_err(|e| WalletError::Provider(e.to_string()))?,
            None => JsValue::UNDEFINED,
        };
        let utxos = call(&self.inner, "getUtxos", &[optional_arg(amount), paginate]).await?;
        expect_strings(utxos, "getUtxos")
    }

    async fn get_collateral(&self) -> WalletResult<Vec<String>> {
        // Older wallets only expose collateral under `experimental`.
        let target = if is_absent(&field(&self.inner, "getCollateral")?) {
            field(&self.inner, "experimental")?
        } else {
            self.inner.clone()
        };
        expect_strings(call(&target, "getCollateral", &[]).await?, "getCollateral")
    }

    async fn get_unused_addresses(&self) -> WalletResult<Vec<String>> {
        expect_strings(call(&self.inner, "getUnusedAddresses", &[]).await?, "getUnusedAddresses")
    }

    async fn get_change_address(&self) -> WalletResult<String> {
        expect_string(call(&self.inner, "getChangeAddress", &[]).await?, "getChangeAddress")
    }

    async fn get_reward_addresses(&self) -> WalletResult<Vec<String>> {
        expect_strings(call(&self.inner, "getRewardAddresses", &[]).await?, "getRewardAddresses")
    }

    async fn sign_tx(&self, tx: &str, partial_sign: bool) -> WalletResult<String> {
        let args = [JsValue::from_str(tx), JsValue::from_bool(partial_sign)];
        expect_string(call(&self.inner, "signTx", &args).await?, "signTx")
    }

    async fn submit_tx(&self, tx: &str) -> WalletResult<String> {
        expect_string(call(&self.inner, "submitTx", &[JsValue::from_str(tx)]).await?, "submitTx")
    }
}

/// The browser's `window`. Wallet extensions inject `window.cardano` after
/// page load, so the namespace is looked up again on every query.
#[derive(Clone)]
pub struct BrowserHost {
    window: web_sys::Window,
}

impl BrowserHost {
    /// `None` outside a browser (no `window`).
    pub fn detect() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }

    fn namespace(&self) -> Option<JsValue> {
        Reflect::get(self.window.as_ref(), &JsValue::from_str(WALLET_NAMESPACE))
            .ok()
            .filter(|ns| !is_absent(ns))
    }
}

impl WalletHost for BrowserHost {
    fn has_wallet_namespace(&self) -> bool {
        self.namespace().is_some()
    }

    fn provider(&self, key: &str) -> Option<Rc<dyn WalletProvider>> {
        let provider = Reflect::get(&self.namespace()?, &JsValue::from_str(key)).ok()?;
        if is_absent(&provider) {
            return None;
        }
        Some(Rc::new(JsWalletProvider::new(provider)))
    }

    fn injected_keys(&self) -> Vec<String> {
        self.namespace()
            .and_then(|ns| ns.dyn_into::<Object>().ok())
            .map(|ns| Object::keys(&ns).iter().filter_map(|k| k.as_string()).collect())
            .unwrap_or_default()
    }
}
