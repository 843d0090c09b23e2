//! setTimeout-backed [`TimerPort`]; never blocks the UI thread.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use chat_core::ports::TimerPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl TimerPort for BrowserTimer {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}
