//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chat_types::Result;

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value. Fails with `ChatError::QuotaExceeded` when the store is full.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Random Port ─────────────────────────────────────────────

/// Source of uniform randomness, injectable so tests can pin outcomes.
pub trait RandomPort {
    /// Next value, uniformly distributed in `[0, 1)`.
    fn next_f64(&self) -> f64;
}

/// Map a uniform sample onto an index in `0..len`. `len` must be non-zero.
pub fn pick_index(sample: f64, len: usize) -> usize {
    let idx = (sample.clamp(0.0, 1.0) * len as f64).floor() as usize;
    idx.min(len.saturating_sub(1))
}

/// Map a uniform sample onto a delay in `min_ms..=max_ms`.
pub fn delay_in(sample: f64, min_ms: u32, max_ms: u32) -> u32 {
    let span = max_ms.saturating_sub(min_ms) as f64;
    min_ms + (sample.clamp(0.0, 1.0) * span).floor() as u32
}

// ─── Timer Port ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TimerPort {
    /// Suspend the current task for `ms` milliseconds.
    async fn sleep(&self, ms: u32);
}
