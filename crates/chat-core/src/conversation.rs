//! Conversation state — owns the threads, the active pointer and the
//! displayed message list, and keeps them in sync with storage.
//!
//! Sending is split in two so the UI can render the user's message before
//! the think-time delay:
//! 1. [`ConversationState::begin_send`] appends the user message and enters
//!    the typing state, returning a [`PendingReply`] ticket
//! 2. [`ConversationState::finish_reply`] appends the reply, leaves the
//!    typing state, creates or updates the thread and persists
//!
//! [`ConversationState::send_message`] runs both with a timer in between.

use std::collections::HashSet;
use chat_types::{
    event::ChatEvent,
    message::Message,
    thread::{ChatThread, ThreadSummary},
};
use crate::event_bus::EventBus;
use crate::persistence::HistoryStore;
use crate::ports::TimerPort;
use crate::reply::ReplyGenerator;

/// Where a pending reply will land
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOrigin {
    /// Sent from the draft state; `epoch` identifies that particular draft
    Draft { epoch: u64 },
    /// Sent into an existing thread
    Thread(String),
}

/// A reply scheduled by `begin_send`, redeemed by `finish_reply`.
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub ticket: u64,
    pub origin: ReplyOrigin,
    /// Trimmed user input, used for the reply heuristic and the title
    pub input: String,
    /// The conversation up to and including the user message
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone)]
struct PendingSlot {
    ticket: u64,
    origin: ReplyOrigin,
}

pub struct ConversationState {
    threads: Vec<ChatThread>,
    active_thread_id: Option<String>,
    current_messages: Vec<Message>,
    pending: Option<PendingSlot>,
    next_ticket: u64,
    draft_epoch: u64,
    store: HistoryStore,
    event_bus: EventBus,
}

impl ConversationState {
    /// Create an empty state in draft mode. Call [`restore`](Self::restore)
    /// to pull in persisted history.
    pub fn new(store: HistoryStore, event_bus: EventBus) -> Self {
        Self {
            threads: Vec::new(),
            active_thread_id: None,
            current_messages: Vec::new(),
            pending: None,
            next_ticket: 0,
            draft_epoch: 0,
            store,
            event_bus,
        }
    }

    pub fn threads(&self) -> &[ChatThread] {
        &self.threads
    }

    pub fn thread(&self, id: &str) -> Option<&ChatThread> {
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn active_thread_id(&self) -> Option<&str> {
        self.active_thread_id.as_deref()
    }

    pub fn current_messages(&self) -> &[Message] {
        &self.current_messages
    }

    /// True while a reply is pending; the input surface must stay disabled.
    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_draft(&self) -> bool {
        self.active_thread_id.is_none()
    }

    /// Load persisted threads and re-activate the stored thread if it still exists.
    pub async fn restore(&mut self) {
        let mut seen = HashSet::new();
        let loaded = self.store.load().await;
        let total = loaded.len();
        self.threads = loaded
            .into_iter()
            .filter(|t| seen.insert(t.id.clone()))
            .collect();
        if self.threads.len() != total {
            log::warn!("Dropped {} chats with duplicate ids", total - self.threads.len());
        }

        let stored_active = self.store.load_active_thread_id().await;
        let restored = stored_active
            .as_deref()
            .and_then(|id| self.thread(id))
            .map(|t| (t.id.clone(), t.messages.clone()));

        match restored {
            Some((id, messages)) => {
                self.active_thread_id = Some(id);
                self.current_messages = messages;
            }
            None => {
                if let Some(stale) = stored_active {
                    log::warn!("Active chat {} no longer exists, starting a new chat", stale);
                    self.store.save_active_thread_id(None).await;
                }
                self.active_thread_id = None;
                self.current_messages.clear();
            }
        }

        self.publish_threads();
        self.publish_view();
    }

    /// Switch to the draft state. No thread is created until the first send.
    pub async fn create_draft(&mut self) {
        self.enter_draft();
        self.store.save_active_thread_id(None).await;
        self.publish_view();
    }

    /// Make `id` the active thread. Returns false (and changes nothing) for
    /// unknown ids.
    pub async fn select_thread(&mut self, id: &str) -> bool {
        let messages = match self.thread(id) {
            Some(t) => t.messages.clone(),
            None => {
                log::debug!("select_thread: unknown chat {}", id);
                return false;
            }
        };
        self.active_thread_id = Some(id.to_string());
        self.current_messages = messages;
        self.store.save_active_thread_id(Some(id)).await;
        self.publish_view();
        true
    }

    /// Remove a thread. Deleting the active thread reverts to the draft state;
    /// a reply pending for the deleted thread is cancelled.
    pub async fn delete_thread(&mut self, id: &str) -> bool {
        let Some(pos) = self.threads.iter().position(|t| t.id == id) else {
            log::debug!("delete_thread: unknown chat {}", id);
            return false;
        };
        self.threads.remove(pos);

        if matches!(&self.pending, Some(slot) if slot.origin == ReplyOrigin::Thread(id.to_string())) {
            self.cancel_pending();
        }

        if self.active_thread_id.as_deref() == Some(id) {
            self.enter_draft();
            self.store.save_active_thread_id(None).await;
            self.publish_view();
        }

        self.store.save(&self.threads).await;
        self.publish_threads();
        true
    }

    /// Append the user message and enter the typing state.
    ///
    /// Returns `None` for blank input or while another reply is pending.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingReply> {
        if self.is_typing() {
            log::debug!("begin_send: reply already pending, ignoring input");
            return None;
        }
        let message = Message::user(text)?;
        let input = message.content.clone();

        self.current_messages.push(message.clone());
        self.event_bus.emit(ChatEvent::MessageAppended { message });

        let origin = match &self.active_thread_id {
            Some(id) => ReplyOrigin::Thread(id.clone()),
            None => ReplyOrigin::Draft { epoch: self.draft_epoch },
        };
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.pending = Some(PendingSlot { ticket, origin: origin.clone() });
        self.event_bus.emit(ChatEvent::TypingChanged { is_typing: true });

        Some(PendingReply {
            ticket,
            origin,
            input,
            messages: self.current_messages.clone(),
        })
    }

    /// Apply a reply scheduled by [`begin_send`](Self::begin_send).
    ///
    /// Returns false when the ticket was cancelled or superseded; the reply
    /// is then dropped. A reply whose origin is no longer on screen is
    /// written to its thread without touching the displayed messages.
    pub async fn finish_reply(&mut self, pending: PendingReply, reply: Message) -> bool {
        match &self.pending {
            Some(slot) if slot.ticket == pending.ticket => {}
            _ => {
                log::debug!("Dropping reply for cancelled ticket {}", pending.ticket);
                return false;
            }
        }
        self.pending = None;

        let mut messages = pending.messages;
        messages.push(reply);

        match pending.origin {
            ReplyOrigin::Thread(id) => {
                let Some(thread) = self.threads.iter_mut().find(|t| t.id == id) else {
                    log::warn!("Reply target {} disappeared", id);
                    self.event_bus.emit(ChatEvent::TypingChanged { is_typing: false });
                    return false;
                };
                thread.touch(messages.clone());
                if self.active_thread_id.as_deref() == Some(id.as_str()) {
                    // The view may have been reloaded from the stored thread
                    // while the reply was pending, so resend it whole.
                    self.current_messages = messages;
                    self.publish_view();
                }
                self.event_bus.emit(ChatEvent::TypingChanged { is_typing: false });
            }
            ReplyOrigin::Draft { epoch } => {
                let thread = ChatThread::new(&pending.input, messages.clone());
                let id = thread.id.clone();
                self.threads.push(thread);
                self.event_bus.emit(ChatEvent::TypingChanged { is_typing: false });

                if self.is_draft() && epoch == self.draft_epoch {
                    log::info!("Created chat {}", id);
                    self.active_thread_id = Some(id.clone());
                    self.current_messages = messages;
                    self.store.save_active_thread_id(Some(&id)).await;
                    self.publish_view();
                } else {
                    log::info!("Created chat {} in the background", id);
                }
            }
        }

        self.store.save(&self.threads).await;
        self.publish_threads();
        true
    }

    /// Send `text` and wait out the think time before applying the reply.
    /// Returns false when the input was rejected.
    pub async fn send_message(
        &mut self,
        text: &str,
        replies: &ReplyGenerator,
        timer: &dyn TimerPort,
    ) -> bool {
        let Some(pending) = self.begin_send(text) else {
            return false;
        };
        timer.sleep(replies.next_delay_ms()).await;
        let reply = Message::assistant(replies.reply_to(&pending.input));
        self.finish_reply(pending, reply).await
    }

    /// Drop the pending reply, if any, and leave the typing state.
    pub fn cancel_pending(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.event_bus.emit(ChatEvent::TypingChanged { is_typing: false });
        true
    }

    pub fn summaries(&self) -> Vec<ThreadSummary> {
        self.threads.iter().map(ChatThread::summary).collect()
    }

    fn enter_draft(&mut self) {
        self.active_thread_id = None;
        self.current_messages.clear();
        self.draft_epoch += 1;
    }

    fn publish_threads(&self) {
        self.event_bus.emit(ChatEvent::ThreadsChanged {
            threads: self.summaries(),
        });
    }

    fn publish_view(&self) {
        self.event_bus.emit(ChatEvent::ViewChanged {
            active_thread_id: self.active_thread_id.clone(),
            messages: self.current_messages.clone(),
        });
    }
}
