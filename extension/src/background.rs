// Background service worker for the Wplace overlay extension
// Minimal dependencies - no UI, works with --target no-modules
// All business logic in Rust, JavaScript is just glue to Chrome APIs

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wplace_overlay_extension::{
    Background, ChangeInfo, ExtensionConfig, ExtensionError, InstalledDetails, Response,
    SystemClock, Tab,
};

// Dummy main for binary target
fn main() {}

thread_local! {
    static BACKGROUND: RefCell<Option<Background>> = const { RefCell::new(None) };
}

fn boot() -> Background {
    console_error_panic_hook::set_once();

    let (config, config_error) = match ExtensionConfig::embedded() {
        Ok(config) => (config, None),
        Err(e) => (ExtensionConfig::default(), Some(e)),
    };

    let level = config.log_level().unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));

    if let Some(e) = config_error {
        log::warn!("Falling back to default configuration: {}", e);
    }

    Background::new(config, Rc::new(SystemClock))
}

/// Shared background, created on first use. Cloned out so no borrow is held
/// while host callbacks run.
fn background() -> Background {
    BACKGROUND.with(|cell| cell.borrow_mut().get_or_insert_with(boot).clone())
}

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, ExtensionError> {
    if value.is_undefined() || value.is_null() {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }

    let text = js_sys::JSON::stringify(value)
        .map_err(|e| ExtensionError::Bridge(format!("stringify failed: {:?}", e)))?
        .as_string()
        .ok_or_else(|| ExtensionError::Bridge("value is not JSON-representable".to_string()))?;

    Ok(serde_json::from_str(&text)?)
}

fn to_js(response: &Response) -> Result<JsValue, ExtensionError> {
    let text = response.to_json()?;
    js_sys::JSON::parse(&text)
        .map_err(|e| ExtensionError::Bridge(format!("parse failed: {:?}", e)))
}

/// Initialize background service worker
/// Called from JavaScript glue once the wasm module is loaded
#[wasm_bindgen]
pub fn init_background() {
    let background = background();
    log::info!(
        "Wplace overlay background initialized (target: {})",
        background.config().target_origin
    );
}

/// Handle `chrome.runtime.onMessage`
/// Returns `true` when a response was sent, `undefined` otherwise
#[wasm_bindgen]
pub fn handle_message(message: JsValue, send_response: js_sys::Function) -> JsValue {
    let request: serde_json::Value = match from_js(&message) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Dropping unreadable message: {}", e);
            return JsValue::UNDEFINED;
        }
    };

    let mut responder = |response: Response| match to_js(&response) {
        Ok(value) => {
            if let Err(e) = send_response.call1(&JsValue::NULL, &value) {
                log::warn!("sendResponse failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("Could not encode response: {}", e),
    };

    let dispatch = background().handle_message(&request, &mut responder);
    if dispatch.keeps_channel_open() {
        JsValue::TRUE
    } else {
        JsValue::UNDEFINED
    }
}

/// Handle `chrome.tabs.onUpdated`
#[wasm_bindgen]
pub fn handle_tab_updated(tab_id: i32, change_info: JsValue, tab: JsValue) {
    let change_info: ChangeInfo = match from_js::<Option<ChangeInfo>>(&change_info) {
        Ok(change_info) => change_info.unwrap_or_default(),
        Err(e) => {
            log::warn!("Unreadable changeInfo for tab {}: {}", tab_id, e);
            return;
        }
    };
    let tab: Tab = match from_js::<Option<Tab>>(&tab) {
        Ok(tab) => tab.unwrap_or_default(),
        Err(e) => {
            log::warn!("Unreadable tab {}: {}", tab_id, e);
            return;
        }
    };

    let outcome = background().handle_tab_updated(tab_id, &change_info, &tab);
    log::trace!("Tab {} update: {:?}", tab_id, outcome);
}

/// Handle `chrome.runtime.onStartup`
#[wasm_bindgen]
pub fn handle_startup() {
    background().handle_startup();
}

/// Handle `chrome.runtime.onInstalled` (install or update)
#[wasm_bindgen]
pub fn handle_install(details: JsValue) {
    let details = from_js::<Option<InstalledDetails>>(&details)
        .unwrap_or_else(|e| {
            log::warn!("Unreadable install details: {}", e);
            None
        })
        .unwrap_or_default();

    background().handle_install(&details);
}

/// Rolling checksum, exposed for page-data comparison from JavaScript
#[wasm_bindgen(js_name = hashString)]
pub fn hash_string(input: &str) -> String {
    wplace_overlay_extension::hash_string(input)
}
