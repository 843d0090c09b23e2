//! In-memory storage backend.
//! Used when localStorage is unavailable; nothing survives a page reload.
//! An optional byte quota mimics the browser's storage limit.

use std::cell::RefCell;
use std::collections::HashMap;
use async_trait::async_trait;
use chat_core::ports::StoragePort;
use chat_types::{ChatError, Result};

pub struct MemoryStorage {
    data: RefCell<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            data: RefCell::new(HashMap::new()),
            quota: None,
        }
    }

    /// Reject writes that would push the total of keys and values past `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            data: RefCell::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Bytes currently held, counting keys and values.
    pub fn used_bytes(&self) -> usize {
        self.data
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl StoragePort for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        if let Some(quota) = self.quota {
            let replaced = self
                .data
                .borrow()
                .get(key)
                .map(|v| key.len() + v.len())
                .unwrap_or(0);
            let after = self.used_bytes() - replaced + key.len() + value.len();
            if after > quota {
                return Err(ChatError::QuotaExceeded {
                    key: key.to_string(),
                    bytes: value.len(),
                });
            }
        }
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
