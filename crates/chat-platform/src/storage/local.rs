//! localStorage backend.
//! Persistent across page reloads, synchronous, string-valued and capped by
//! the browser (typically ~5 MB per origin).

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

use chat_core::ports::StoragePort;
use chat_types::{ChatError, Result};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Grab `window.localStorage`. Fails outside a browser window or when
    /// storage is disabled (e.g. some private browsing modes).
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| ChatError::JsInterop(format!("{:?}", e)))?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.storage
            .get_item(key)
            .map(|v| v.map(String::into_bytes))
            .map_err(|e| ChatError::Storage(format!("{:?}", e)))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| ChatError::Serialization(format!("localStorage holds text only: {}", e)))?;
        self.storage
            .set_item(key, text)
            .map_err(|e| write_error(key, value.len(), e))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| ChatError::Storage(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}

/// Map a failed `setItem` to `QuotaExceeded` when the browser says so.
fn write_error(key: &str, bytes: usize, err: JsValue) -> ChatError {
    let name = err.dyn_ref::<DomException>().map(|e| e.name());
    match name.as_deref() {
        Some("QuotaExceededError") | Some("NS_ERROR_DOM_QUOTA_REACHED") => ChatError::QuotaExceeded {
            key: key.to_string(),
            bytes,
        },
        _ => ChatError::Storage(format!("{:?}", err)),
    }
}
