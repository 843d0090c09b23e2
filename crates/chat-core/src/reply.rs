//! Canned-reply heuristic standing in for a real assistant.
//!
//! First match wins, all checks are case-insensitive substring tests:
//! 1. "hello" or "hi"           → greeting
//! 2. "how are you"             → well-being reply
//! 3. "what" and "?"            → question prefix + random pool entry
//! 4. anything else             → random pool entry + disclaimer

use std::rc::Rc;
use chat_types::config::ReplyConfig;
use crate::ports::{RandomPort, delay_in, pick_index};

pub const GREETING: &str = "Hello! How can I assist you today?";
pub const WELL_BEING: &str = "I'm doing well, thank you for asking! How can I help you today?";
pub const QUESTION_PREFIX: &str = "That's a great question! ";
pub const DISCLAIMER: &str = " I'm a demo assistant, so my responses are simulated. \
In a real implementation, this would connect to an AI API.";

pub const RESPONSE_POOL: [&str; 5] = [
    "I understand your question. Let me help you with that.",
    "That's an interesting point. Here's what I think...",
    "Great question! Based on what you've asked, I would say...",
    "I can help you with that. Let me explain...",
    "Thank you for your message. Here's my response...",
];

#[derive(Clone)]
pub struct ReplyGenerator {
    random: Rc<dyn RandomPort>,
    config: ReplyConfig,
}

impl ReplyGenerator {
    pub fn new(random: Rc<dyn RandomPort>, config: ReplyConfig) -> Self {
        Self { random, config }
    }

    /// Pick the reply text for a user input.
    pub fn reply_to(&self, input: &str) -> String {
        let text = input.trim().to_lowercase();

        if text.contains("hello") || text.contains("hi") {
            return GREETING.to_string();
        }
        if text.contains("how are you") {
            return WELL_BEING.to_string();
        }
        if text.contains("what") && text.contains('?') {
            return format!("{}{}", QUESTION_PREFIX, self.pick_response());
        }
        format!("{}{}", self.pick_response(), DISCLAIMER)
    }

    /// Think time before the reply, uniform over the configured window.
    pub fn next_delay_ms(&self) -> u32 {
        delay_in(
            self.random.next_f64(),
            self.config.min_delay_ms,
            self.config.max_delay_ms,
        )
    }

    fn pick_response(&self) -> &'static str {
        RESPONSE_POOL[pick_index(self.random.next_f64(), RESPONSE_POOL.len())]
    }
}
