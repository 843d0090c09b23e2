//! Thread list — new chat button, threads newest first, delete with confirmation.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use crate::state::{UiAction, UiState};
use crate::theme::*;

/// Render the thread list. Returns the action the user picked, if any.
pub fn sidebar_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    ui.add_space(8.0);
    let new_chat = ui.add_sized(
        Vec2::new(ui.available_width(), 36.0),
        egui::Button::new(RichText::new("+  New chat").color(TEXT_PRIMARY))
            .fill(BG_SIDEBAR)
            .stroke(egui::Stroke::new(1.0, TEXT_SECONDARY))
            .corner_radius(BUBBLE_ROUNDING),
    );
    if new_chat.clicked() {
        action = Some(UiAction::NewChat);
    }

    ui.add_space(8.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if state.threads.is_empty() {
                ui.label(RichText::new("No chat history yet").color(TEXT_SECONDARY).small());
                return;
            }

            let rows: Vec<(String, String, bool)> = state
                .threads_by_recency()
                .into_iter()
                .map(|t| (t.id.clone(), t.title.clone(), state.is_active(&t.id)))
                .collect();

            for (id, title, active) in rows {
                egui::Frame::default()
                    .fill(if active { ROW_ACTIVE } else { BG_SIDEBAR })
                    .corner_radius(BUBBLE_ROUNDING)
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                let delete = ui.add(
                                    egui::Button::new(RichText::new("🗑").color(TEXT_SECONDARY))
                                        .frame(false),
                                );
                                if delete.on_hover_text("Delete chat").clicked() {
                                    state.pending_delete = Some(id.clone());
                                }

                                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                                    let label = ui.add(
                                        egui::Label::new(
                                            RichText::new(&title).color(TEXT_PRIMARY),
                                        )
                                        .truncate()
                                        .sense(egui::Sense::click()),
                                    );
                                    if label.clicked() {
                                        action = Some(UiAction::SelectChat(id.clone()));
                                    }
                                });
                            });
                        });
                    });
                ui.add_space(2.0);
            }
        });

    if let Some(confirmed) = confirm_delete(ui.ctx(), state) {
        action = Some(UiAction::DeleteChat(confirmed));
    }

    action
}

/// Modal asking to confirm a delete. Returns the id once confirmed.
fn confirm_delete(ctx: &egui::Context, state: &mut UiState) -> Option<String> {
    let id = state.pending_delete.clone()?;
    let mut confirmed = None;
    let mut cancelled = false;

    egui::Window::new("Delete chat")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(RichText::new("Delete this chat?").color(TEXT_PRIMARY));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add(egui::Button::new(RichText::new("Delete").color(TEXT_PRIMARY)).fill(DANGER))
                    .clicked()
                {
                    confirmed = Some(id.clone());
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if let Some(id) = &confirmed {
        log::debug!("Delete confirmed for chat {}", id);
    }
    if confirmed.is_some() || cancelled {
        state.pending_delete = None;
    }
    confirmed
}
