//! Event queue between the conversation state and the UI.
//!
//! The bus is single-threaded (WASM constraint) and uses interior mutability
//! via RefCell. Events are buffered and drained by the UI on each frame.
//!
//! Replaying a drained batch in order must leave the UI showing exactly the
//! state the conversation holds. Snapshot events therefore supersede what is
//! still queued for the same slice of state:
//! - `ViewChanged` drops queued `ViewChanged` and `MessageAppended` events
//! - `ThreadsChanged` drops a queued `ThreadsChanged`
//! - `TypingChanged` drops a queued `TypingChanged`
//!
//! `MessageAppended` is incremental and never replaces anything.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chat_types::event::ChatEvent;

/// Shared event queue — clone-cheap via Rc.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event, dropping the queued events it supersedes.
    pub fn emit(&self, event: ChatEvent) {
        let mut queue = self.queue.borrow_mut();
        queue.retain(|queued| !supersedes(&event, queued));
        queue.push_back(event);
    }

    /// Take every queued event, oldest first. Called by the UI layer each frame.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

/// True when applying `next` makes applying `queued` first redundant.
fn supersedes(next: &ChatEvent, queued: &ChatEvent) -> bool {
    match next {
        ChatEvent::ViewChanged { .. } => matches!(
            queued,
            ChatEvent::ViewChanged { .. } | ChatEvent::MessageAppended { .. }
        ),
        ChatEvent::ThreadsChanged { .. } => matches!(queued, ChatEvent::ThreadsChanged { .. }),
        ChatEvent::TypingChanged { .. } => matches!(queued, ChatEvent::TypingChanged { .. }),
        ChatEvent::MessageAppended { .. } => false,
    }
}
