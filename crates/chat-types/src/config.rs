use serde::{Deserialize, Serialize};
use crate::{ChatError, Result};

/// Top-level chat client configuration. Missing fields take their defaults,
/// so a stored override may name only what it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub storage: StorageConfig,
    pub history: HistoryConfig,
    pub reply: ReplyConfig,
}

impl ChatConfig {
    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.history.validate()?;
        self.reply.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Key holding the JSON array of threads
    pub history_key: String,
    /// Key holding the active thread id
    pub active_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
            history_key: "chatgpt-history".to_string(),
            active_key: "chatgpt-active-chat".to_string(),
        }
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.history_key.is_empty() || self.active_key.is_empty() {
            return Err(ChatError::Config("storage keys must not be empty".to_string()));
        }
        if self.history_key == self.active_key {
            return Err(ChatError::Config(format!(
                "history and active keys collide: {}",
                self.history_key
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// localStorage when available, memory otherwise
    Auto,
    LocalStorage,
    Memory,
}

/// Retention rules for the persisted thread list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Threads kept on a normal save (newest tail)
    pub limit: usize,
    /// Threads kept when retrying after a failed write
    pub reduced_limit: usize,
    /// The reduced retry only happens above this many threads
    pub retry_threshold: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: 100,
            reduced_limit: 50,
            retry_threshold: 10,
        }
    }
}

impl HistoryConfig {
    fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(ChatError::Config("history limit must be positive".to_string()));
        }
        if self.reduced_limit > self.limit {
            return Err(ChatError::Config(format!(
                "reduced limit {} exceeds limit {}",
                self.reduced_limit, self.limit
            )));
        }
        Ok(())
    }
}

/// Think-time window for the simulated assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    pub min_delay_ms: u32,
    pub max_delay_ms: u32,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 2000,
        }
    }
}

impl ReplyConfig {
    fn validate(&self) -> Result<()> {
        if self.min_delay_ms > self.max_delay_ms {
            return Err(ChatError::Config(format!(
                "reply delay window is inverted: {}..{}",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        Ok(())
    }
}
