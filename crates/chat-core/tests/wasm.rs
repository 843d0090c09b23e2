//! WASM-target tests for chat-core.
//!
//! Runs the conversation flow and persistence adapter under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_core::conversation::ConversationState;
use chat_core::event_bus::EventBus;
use chat_core::persistence::HistoryStore;
use chat_core::ports::*;
use chat_core::reply::{ReplyGenerator, GREETING};
use chat_types::config::ChatConfig;
use chat_types::event::ChatEvent;
use chat_types::{ChatError, Result};

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct MapStorage {
    data: RefCell<HashMap<String, Vec<u8>>>,
    full: bool,
}

impl MapStorage {
    fn new(full: bool) -> Self {
        Self { data: RefCell::new(HashMap::new()), full }
    }
}

#[async_trait(?Send)]
impl StoragePort for MapStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        if self.full {
            return Err(ChatError::QuotaExceeded { key: key.to_string(), bytes: value.len() });
        }
        self.data.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "map"
    }
}

struct Fixed(f64);

impl RandomPort for Fixed {
    fn next_f64(&self) -> f64 {
        self.0
    }
}

struct NoWait;

#[async_trait(?Send)]
impl TimerPort for NoWait {
    async fn sleep(&self, _ms: u32) {}
}

fn state_over(storage: Rc<MapStorage>) -> (ConversationState, EventBus) {
    let config = ChatConfig::default();
    let bus = EventBus::new();
    let store = HistoryStore::new(storage, config.storage, config.history);
    (ConversationState::new(store, bus.clone()), bus)
}

#[wasm_bindgen_test]
async fn hello_creates_thread_and_persists() {
    let storage = Rc::new(MapStorage::new(false));
    let (mut state, bus) = state_over(storage.clone());
    let replies = ReplyGenerator::new(Rc::new(Fixed(0.0)), ChatConfig::default().reply);

    assert!(state.send_message("Hello there", &replies, &NoWait).await);
    assert_eq!(state.threads().len(), 1);
    assert_eq!(state.threads()[0].title, "Hello there");
    assert_eq!(state.current_messages()[1].content, GREETING);
    assert!(storage.data.borrow().contains_key("chatgpt-history"));

    let events = bus.drain();
    assert!(events
        .iter()
        .any(|e| matches!(e, ChatEvent::ViewChanged { messages, .. } if messages.len() == 2)));
    assert!(!events.iter().any(|e| matches!(e, ChatEvent::MessageAppended { .. })));
}

#[wasm_bindgen_test]
async fn restore_after_reload() {
    let storage = Rc::new(MapStorage::new(false));
    let replies = ReplyGenerator::new(Rc::new(Fixed(0.0)), ChatConfig::default().reply);
    let id = {
        let (mut state, _) = state_over(storage.clone());
        state.send_message("hello", &replies, &NoWait).await;
        state.active_thread_id().unwrap().to_string()
    };

    let (mut reloaded, _) = state_over(storage);
    reloaded.restore().await;
    assert_eq!(reloaded.active_thread_id(), Some(id.as_str()));
    assert_eq!(reloaded.current_messages().len(), 2);
}

#[wasm_bindgen_test]
async fn full_storage_never_surfaces() {
    let storage = Rc::new(MapStorage::new(true));
    let (mut state, _) = state_over(storage);
    let replies = ReplyGenerator::new(Rc::new(Fixed(0.5)), ChatConfig::default().reply);

    assert!(state.send_message("tell me more", &replies, &NoWait).await);
    assert_eq!(state.threads().len(), 1);
}
