//! `Math.random()` as a [`RandomPort`].

use chat_core::ports::RandomPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsRandom;

impl RandomPort for JsRandom {
    fn next_f64(&self) -> f64 {
        js_sys::Math::random()
    }
}
