use serde::{Deserialize, Serialize};
use crate::message::Message;
use crate::thread::ThreadSummary;

/// Events emitted by the conversation state.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// The set of threads changed (created, updated, deleted or restored)
    ThreadsChanged { threads: Vec<ThreadSummary> },

    /// The displayed conversation was replaced wholesale
    ViewChanged {
        active_thread_id: Option<String>,
        messages: Vec<Message>,
    },

    /// A message was appended to the displayed conversation
    MessageAppended { message: Message },

    /// A reply started or stopped pending
    TypingChanged { is_typing: bool },
}
