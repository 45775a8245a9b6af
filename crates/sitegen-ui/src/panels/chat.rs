//! Chat panel — transcript, error banner, attachments and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use sitegen_types::message::{ChatMessage, ChatRole};
use crate::state::UiState;
use crate::theme::*;

/// What the caller should do after rendering the chat panel
pub enum ChatAction {
    None,
    /// Send the input text and pending attachments
    Submit,
    /// Open the file dialog
    PickFiles,
}

/// Render the chat panel. Returns an action for the caller to handle.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> ChatAction {
    let mut action = ChatAction::None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Chat").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.error.is_some() {
                            ERROR
                        } else if state.is_busy() {
                            WARNING
                        } else {
                            SUCCESS
                        };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                let footer = if state.pending_files.is_empty() { 70.0 } else { 100.0 };
                let banner = if state.error.is_some() { 50.0 } else { 0.0 };
                let available_height = ui.available_height() - footer - banner;
                ScrollArea::vertical()
                    .max_height(available_height.max(80.0))
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if state.messages.is_empty() {
                            ui.add_space(12.0);
                            ui.label(
                                RichText::new("Describe the website you want to build.")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }
                        for message in &state.messages {
                            render_message(ui, message);
                            ui.add_space(4.0);
                        }
                        if state.is_busy() {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Thinking...").color(TEXT_SECONDARY));
                            });
                        }
                    });

                if let Some(error) = &state.error {
                    egui::Frame::default()
                        .fill(ERROR_BG)
                        .stroke(egui::Stroke::new(1.0, ERROR))
                        .inner_margin(6.0)
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(RichText::new(error).color(ERROR).small());
                        });
                }

                ui.add_space(8.0);

                // Pending attachments
                if !state.pending_files.is_empty() {
                    let mut remove = None;
                    ui.horizontal_wrapped(|ui| {
                        for (i, file) in state.pending_files.iter().enumerate() {
                            let chip = egui::Button::new(
                                RichText::new(format!("📎 {}  ✕", file.name))
                                    .color(TEXT_SECONDARY)
                                    .small(),
                            )
                            .fill(BG_SURFACE)
                            .corner_radius(PANEL_ROUNDING);
                            if ui.add(chip).on_hover_text(&file.mime_type).clicked() {
                                remove = Some(i);
                            }
                        }
                    });
                    if let Some(i) = remove {
                        state.pending_files.remove(i);
                    }
                }

                // Input area
                ui.horizontal(|ui| {
                    let attach_btn = ui.add_enabled(
                        !state.is_busy(),
                        egui::Button::new(RichText::new("📎").color(TEXT_PRIMARY))
                            .fill(BG_SURFACE)
                            .corner_radius(PANEL_ROUNDING),
                    );
                    if attach_btn.on_hover_text("Attach files").clicked() {
                        action = ChatAction::PickFiles;
                    }

                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Describe a site or ask for changes...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let has_content =
                        !state.input_text.trim().is_empty() || !state.pending_files.is_empty();
                    let send_enabled = has_content && !state.is_busy();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && send_enabled) || send_btn.clicked() {
                        action = ChatAction::Submit;
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    let (label, label_color, bg) = match message.role {
        ChatRole::User => ("You", ACCENT, BG_SECONDARY),
        ChatRole::Model => ("Sitegen", SUCCESS, BG_SECONDARY),
    };

    egui::Frame::default()
        .fill(bg)
        .stroke(egui::Stroke::new(1.0, BORDER))
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(label).color(label_color).strong().small());
                if message.is_code {
                    ui.label(RichText::new("files updated").color(ACCENT).small());
                }
            });
            if !message.text.is_empty() {
                ui.label(RichText::new(&message.text).color(TEXT_PRIMARY));
            }
            for attachment in &message.attachments {
                ui.label(
                    RichText::new(format!("📎 {} ({})", attachment.name, attachment.mime_type))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            }
        });
}
