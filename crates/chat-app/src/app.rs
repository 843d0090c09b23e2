//! Main egui application — composes the panels and drives the conversation state.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use chat_core::conversation::ConversationState;
use chat_core::event_bus::EventBus;
use chat_core::persistence::{self, HistoryStore};
use chat_core::ports::{StoragePort, TimerPort};
use chat_core::reply::ReplyGenerator;
use chat_platform::random::JsRandom;
use chat_platform::storage::{open_storage, MemoryStorage};
use chat_platform::timer::BrowserTimer;
use chat_types::config::{ChatConfig, StorageBackendType};
use chat_types::message::Message;
use chat_ui::panels::{chat, input, sidebar};
use chat_ui::state::{UiAction, UiState};
use chat_ui::theme;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    event_bus: EventBus,
    conversation: Rc<RefCell<ConversationState>>,
    replies: ReplyGenerator,
    timer: Rc<dyn TimerPort>,
    backend_name: String,
    first_frame: bool,
}

/// Read the stored config through the default backend, then open the
/// backend it names.
pub async fn bootstrap() -> (ChatConfig, Rc<dyn StoragePort>) {
    let default_storage: Rc<dyn StoragePort> = open_storage(&StorageBackendType::Auto)
        .unwrap_or_else(|_| Rc::new(MemoryStorage::new()) as Rc<dyn StoragePort>);
    let config = persistence::load_config(default_storage.as_ref()).await;

    let storage: Rc<dyn StoragePort> = match &config.storage.backend {
        StorageBackendType::Auto => default_storage,
        backend => match open_storage(backend) {
            Ok(storage) => storage,
            Err(e) => {
                log::error!(
                    "Configured storage backend unavailable ({}), chat history will not persist",
                    e
                );
                Rc::new(MemoryStorage::new())
            }
        },
    };
    (config, storage)
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: ChatConfig,
        storage: Rc<dyn StoragePort>,
    ) -> Self {
        let event_bus = EventBus::new();
        let backend_name = storage.backend_name().to_string();
        let store = HistoryStore::new(storage, config.storage.clone(), config.history.clone());
        let conversation = Rc::new(RefCell::new(ConversationState::new(store, event_bus.clone())));

        Self::restore_history(conversation.clone());

        Self {
            ui_state: UiState::new(),
            event_bus,
            conversation,
            replies: ReplyGenerator::new(Rc::new(JsRandom), config.reply),
            timer: Rc::new(BrowserTimer),
            backend_name,
            first_frame: true,
        }
    }

    /// Load persisted chats (async)
    fn restore_history(conversation: Rc<RefCell<ConversationState>>) {
        wasm_bindgen_futures::spawn_local(async move {
            conversation.borrow_mut().restore().await;
        });
    }

    fn dispatch(&self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::Send(text) => self.dispatch_message(&text, ctx),
            UiAction::NewChat => {
                let conversation = self.conversation.clone();
                let ctx = ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    conversation.borrow_mut().create_draft().await;
                    ctx.request_repaint();
                });
            }
            UiAction::SelectChat(id) => {
                let conversation = self.conversation.clone();
                let ctx = ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    conversation.borrow_mut().select_thread(&id).await;
                    ctx.request_repaint();
                });
            }
            UiAction::DeleteChat(id) => {
                let conversation = self.conversation.clone();
                let ctx = ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    conversation.borrow_mut().delete_thread(&id).await;
                    ctx.request_repaint();
                });
            }
        }
    }

    /// Show the user's message now, then apply the reply after the think time.
    fn dispatch_message(&self, text: &str, ctx: &egui::Context) {
        let Some(pending) = self.conversation.borrow_mut().begin_send(text) else {
            return;
        };
        ctx.request_repaint();

        let conversation = self.conversation.clone();
        let replies = self.replies.clone();
        let timer = self.timer.clone();
        let delay = replies.next_delay_ms();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            timer.sleep(delay).await;
            let reply = Message::assistant(replies.reply_to(&pending.input));
            conversation.borrow_mut().finish_reply(pending, reply).await;
            ctx.request_repaint();
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the conversation state
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        let mut actions = Vec::new();

        // ── Thread list ──────────────────────────────────────
        SidePanel::left("thread_list")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .frame(egui::Frame::default().fill(theme::BG_SIDEBAR).inner_margin(theme::PANEL_PADDING))
            .show(ctx, |ui| {
                if let Some(action) = sidebar::sidebar_panel(ui, &mut self.ui_state) {
                    actions.push(action);
                }
            });

        // ── Status bar ───────────────────────────────────────
        TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Chat").strong().color(theme::ACCENT));
                ui.separator();
                ui.label(
                    RichText::new(&self.ui_state.status_text)
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("Storage: {}", self.backend_name))
                            .color(theme::TEXT_SECONDARY)
                            .small(),
                    );
                });
            });
        });

        // ── Input ────────────────────────────────────────────
        TopBottomPanel::bottom("input_bar")
            .frame(egui::Frame::default().fill(theme::BG_PRIMARY).inner_margin(theme::PANEL_PADDING))
            .show(ctx, |ui| {
                if let Some(text) = input::input_panel(ui, &mut self.ui_state) {
                    actions.push(UiAction::Send(text));
                }
            });

        // ── Messages ─────────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            chat::chat_panel(ui, &self.ui_state);
        });

        for action in actions {
            self.dispatch(action, ctx);
        }
    }
}
