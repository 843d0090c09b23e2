//! Pick the storage backend named in the config.
//!
//! Priority for `Auto`: localStorage → Memory (fallback)

use std::rc::Rc;
use chat_core::ports::StoragePort;
use chat_types::config::StorageBackendType;
use chat_types::Result;
use super::{LocalStorage, MemoryStorage};

/// Open the requested backend as a trait object so callers are
/// backend-agnostic.
///
/// `Auto` degrades to memory when localStorage is unavailable. An explicit
/// `LocalStorage` request fails instead, leaving the caller to decide.
pub fn open_storage(backend: &StorageBackendType) -> Result<Rc<dyn StoragePort>> {
    match backend {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Ok(Rc::new(MemoryStorage::new()))
        }
        StorageBackendType::LocalStorage => {
            let local = LocalStorage::open()?;
            log::info!("Storage backend: localStorage");
            Ok(Rc::new(local))
        }
        StorageBackendType::Auto => match LocalStorage::open() {
            Ok(local) => {
                log::info!("Storage backend: localStorage");
                Ok(Rc::new(local))
            }
            Err(e) => {
                log::warn!("localStorage unavailable ({}), chat history will not persist", e);
                Ok(Rc::new(MemoryStorage::new()))
            }
        },
    }
}
