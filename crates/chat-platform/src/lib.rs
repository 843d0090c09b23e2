//! Browser adapters for the chat-core ports.

pub mod storage;
pub mod random;
pub mod timer;
