//! Chat core — conversation state, persistence and the reply heuristic.
//!
//! Everything here is platform-agnostic; browser adapters implement the
//! traits in [`ports`].

pub mod ports;
pub mod event_bus;
pub mod persistence;
pub mod reply;
pub mod conversation;
