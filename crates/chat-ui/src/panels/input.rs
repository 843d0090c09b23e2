//! Input surface — Enter sends, Shift+Enter inserts a newline.
//! Disabled while a reply is pending.

use egui::{self, RichText, Vec2};
use crate::state::UiState;
use crate::theme::*;

const INPUT_ID: &str = "chat_input";

/// Render the input bar. Returns Some(text) when the user submits.
pub fn input_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;
    let input_id = egui::Id::new(INPUT_ID);

    // Take Enter before the text edit turns it into a newline
    let enter = ui.memory(|m| m.has_focus(input_id))
        && ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));

    egui::Frame::default()
        .fill(BG_INPUT)
        .corner_radius(BUBBLE_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let edit = egui::TextEdit::multiline(&mut state.input_text)
                    .id(input_id)
                    .hint_text("Send a message...")
                    .desired_rows(1)
                    .frame(false)
                    .desired_width(ui.available_width() - 70.0)
                    .font(egui::FontId::proportional(14.0));
                let response = ui.add_enabled(!state.is_typing, edit);

                let send_enabled = state.can_send();
                let send_btn = ui.add_enabled(
                    send_enabled,
                    egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                        .fill(if send_enabled { ACCENT } else { BG_SIDEBAR })
                        .corner_radius(BUBBLE_ROUNDING)
                        .min_size(Vec2::new(60.0, 0.0)),
                );

                if enter || send_btn.clicked() {
                    submitted = state.take_input();
                    response.request_focus();
                }
            });
        });

    submitted
}
