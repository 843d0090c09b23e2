//! Message area — the displayed conversation plus a typing indicator.

use egui::{self, Align, Layout, RichText, ScrollArea};
use chat_types::message::Message;
use crate::state::UiState;
use crate::theme::*;

/// Render the conversation, pinned to the newest message.
pub fn chat_panel(ui: &mut egui::Ui, state: &UiState) {
    if state.messages.is_empty() && !state.is_typing {
        empty_state(ui);
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);
            for message in &state.messages {
                render_message(ui, message);
                ui.add_space(6.0);
            }
            if state.is_typing {
                typing_indicator(ui);
            }
        });
}

fn empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.label(RichText::new("💬").size(40.0));
        ui.heading(RichText::new("Start a conversation").color(TEXT_PRIMARY).strong());
        ui.label(RichText::new("Type a message below to begin").color(TEXT_SECONDARY));
    });
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let (layout, bg) = if message.is_user() {
        (Layout::right_to_left(Align::Min), BUBBLE_USER)
    } else {
        (Layout::left_to_right(Align::Min), BUBBLE_ASSISTANT)
    };
    let max_width = ui.available_width() * 0.75;

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(PANEL_PADDING)
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(message.role.label())
                            .color(if message.is_user() { TEXT_SECONDARY } else { ACCENT })
                            .strong()
                            .small(),
                    );
                    ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
                });
            });
    });
}

fn typing_indicator(ui: &mut egui::Ui) {
    ui.with_layout(Layout::left_to_right(Align::Min), |ui| {
        egui::Frame::default()
            .fill(BUBBLE_ASSISTANT)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(PANEL_PADDING)
            .show(ui, |ui| {
                ui.spinner();
            });
    });
}
