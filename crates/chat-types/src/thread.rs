use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Maximum number of characters kept in a derived title
pub const TITLE_MAX_CHARS: usize = 50;
const TITLE_ELLIPSIS: &str = "...";

/// A persisted conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    /// Time of the last mutation; stored under `timestamp` on disk.
    #[serde(rename = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl ChatThread {
    /// Start a thread from the messages of its first exchange.
    /// The title is derived from `first_input`.
    pub fn new(first_input: &str, messages: Vec<Message>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: derive_title(first_input),
            messages,
            updated_at: Utc::now(),
        }
    }

    /// Replace the message list and bump `updated_at`.
    pub fn touch(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> ThreadSummary {
        ThreadSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            updated_at: self.updated_at,
            message_count: self.messages.len(),
        }
    }
}

/// Summary of a thread for listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}

/// Derive a thread title from the first user message.
///
/// The input is trimmed; anything past [`TITLE_MAX_CHARS`] characters is cut
/// and replaced by `...`.
pub fn derive_title(first_message: &str) -> String {
    let trimmed = first_message.trim();
    match trimmed.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &trimmed[..cut], TITLE_ELLIPSIS),
        None => trimmed.to_string(),
    }
}
