//! Persistence adapter — loads and saves the thread list and active id.
//!
//! Storage is a best-effort cache: every failure degrades to "less history",
//! nothing here returns an error to the caller.

use std::rc::Rc;
use chat_types::config::{ChatConfig, HistoryConfig, StorageConfig};
use chat_types::thread::ChatThread;
use crate::ports::StoragePort;

/// Key holding user overrides of [`ChatConfig`]
pub const CONFIG_KEY: &str = "chatgpt-config";

/// Read the stored config. Absent, malformed or invalid data yields the defaults.
pub async fn load_config(storage: &dyn StoragePort) -> ChatConfig {
    let data = match storage.get(CONFIG_KEY).await {
        Ok(Some(data)) => data,
        Ok(None) => return ChatConfig::default(),
        Err(e) => {
            log::warn!("Failed to read config: {}", e);
            return ChatConfig::default();
        }
    };
    let config = match serde_json::from_slice::<ChatConfig>(&data) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Discarding malformed config: {}", e);
            return ChatConfig::default();
        }
    };
    match config.validate() {
        Ok(()) => {
            log::info!("Config restored from storage");
            config
        }
        Err(e) => {
            log::error!("Invalid stored config ({}), using defaults", e);
            ChatConfig::default()
        }
    }
}

#[derive(Clone)]
pub struct HistoryStore {
    storage: Rc<dyn StoragePort>,
    keys: StorageConfig,
    limits: HistoryConfig,
}

impl HistoryStore {
    pub fn new(storage: Rc<dyn StoragePort>, keys: StorageConfig, limits: HistoryConfig) -> Self {
        Self { storage, keys, limits }
    }

    pub fn backend_name(&self) -> &str {
        self.storage.backend_name()
    }

    /// Read the stored threads. Absent or malformed data yields an empty list.
    pub async fn load(&self) -> Vec<ChatThread> {
        let data = match self.storage.get(&self.keys.history_key).await {
            Ok(Some(data)) => data,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read chat history: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_slice::<Vec<ChatThread>>(&data) {
            Ok(threads) => {
                log::info!("Loaded {} chats from {}", threads.len(), self.backend_name());
                threads
            }
            Err(e) => {
                log::warn!("Discarding malformed chat history: {}", e);
                Vec::new()
            }
        }
    }

    /// Write the newest `limit` threads, retrying once with a smaller tail
    /// when the first write fails.
    pub async fn save(&self, threads: &[ChatThread]) {
        let kept = tail(threads, self.limits.limit);
        let err = match self.write(kept).await {
            Ok(()) => return,
            Err(e) => e,
        };
        log::error!("Saving chat history failed ({}), dropping oldest chats", err);

        if threads.len() > self.limits.retry_threshold {
            let reduced = tail(threads, self.limits.reduced_limit);
            if let Err(e) = self.write(reduced).await {
                log::debug!("Reduced history write also failed: {}", e);
            }
        }
    }

    async fn write(&self, threads: &[ChatThread]) -> chat_types::Result<()> {
        let json = serde_json::to_vec(threads)?;
        self.storage.set(&self.keys.history_key, &json).await
    }

    /// Persist the active thread id, or clear it for the draft state.
    pub async fn save_active_thread_id(&self, id: Option<&str>) {
        let result = match id {
            Some(id) => self.storage.set(&self.keys.active_key, id.as_bytes()).await,
            None => self.storage.delete(&self.keys.active_key).await,
        };
        if let Err(e) = result {
            log::warn!("Failed to persist active chat: {}", e);
        }
    }

    pub async fn load_active_thread_id(&self) -> Option<String> {
        match self.storage.get(&self.keys.active_key).await {
            Ok(Some(data)) => String::from_utf8(data).ok(),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read active chat: {}", e);
                None
            }
        }
    }
}

/// The last `n` entries of `items`, in their original order.
fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
