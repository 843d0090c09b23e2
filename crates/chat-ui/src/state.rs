//! UI-level state that drives rendering.
//! This is a read-only projection of the conversation state,
//! updated each frame by draining the EventBus.

use chat_types::event::ChatEvent;
use chat_types::message::Message;
use chat_types::thread::ThreadSummary;

/// Something the user asked for; the app forwards it to the conversation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    NewChat,
    SelectChat(String),
    DeleteChat(String),
    Send(String),
}

/// State visible to UI panels
pub struct UiState {
    /// Messages of the displayed conversation
    pub messages: Vec<Message>,
    /// A reply is pending; input is disabled
    pub is_typing: bool,
    /// All threads, in storage order
    pub threads: Vec<ThreadSummary>,
    pub active_thread_id: Option<String>,
    /// Input field content
    pub input_text: String,
    /// Thread awaiting delete confirmation
    pub pending_delete: Option<String>,
    /// Status line text
    pub status_text: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            is_typing: false,
            threads: Vec::new(),
            active_thread_id: None,
            input_text: String::new(),
            pending_delete: None,
            status_text: "Ready".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::ThreadsChanged { threads } => {
                    if let Some(id) = &self.pending_delete {
                        if !threads.iter().any(|t| &t.id == id) {
                            self.pending_delete = None;
                        }
                    }
                    self.threads = threads;
                }
                ChatEvent::ViewChanged {
                    active_thread_id,
                    messages,
                } => {
                    self.active_thread_id = active_thread_id;
                    self.messages = messages;
                }
                ChatEvent::MessageAppended { message } => {
                    self.messages.push(message);
                }
                ChatEvent::TypingChanged { is_typing } => {
                    self.is_typing = is_typing;
                    self.status_text = if is_typing {
                        "Assistant is typing...".to_string()
                    } else {
                        "Ready".to_string()
                    };
                }
            }
        }
    }

    /// Threads sorted newest first
    pub fn threads_by_recency(&self) -> Vec<&ThreadSummary> {
        let mut sorted: Vec<&ThreadSummary> = self.threads.iter().collect();
        sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sorted
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_thread_id.as_deref() == Some(id)
    }

    /// Input is accepted only when non-blank and no reply is pending.
    pub fn can_send(&self) -> bool {
        !self.is_typing && !self.input_text.trim().is_empty()
    }

    /// Take the input text for sending, clearing the field.
    pub fn take_input(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        Some(std::mem::take(&mut self.input_text))
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
