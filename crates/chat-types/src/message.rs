use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a message. There is no system or tool role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// A single message in a chat thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a user message from raw input.
    ///
    /// Returns `None` when the input is empty after trimming; the stored
    /// content is the trimmed text.
    pub fn user(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            role: Role::User,
            content: trimmed.to_string(),
            timestamp: Utc::now(),
        })
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
