//! Settings panel — API key, model, request spacing and retry policy.
//! Changes apply when the user clicks Save.

use egui::{self, RichText, Vec2};
use sitegen_types::config::{GenerationConfig, DEFAULT_MODEL};
use crate::theme::*;

/// Editable copy of the settings
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub api_key: String,
    pub config: GenerationConfig,
}

/// What the caller should do after rendering the settings panel
pub enum SettingsAction {
    None,
    /// The user clicked the Save button
    SaveClicked,
    /// The user asked for the defaults back (not yet saved)
    ResetDefaults,
}

/// Save feedback passed in from the app layer
#[derive(Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

/// Render the settings panel. Returns an action for the caller to handle.
pub fn settings_panel(
    ui: &mut egui::Ui,
    form: &mut SettingsForm,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut action = SettingsAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Model Section ────────────────────────────────
            ui.label(RichText::new("Gemini").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("API Key").color(TEXT_SECONDARY).small());
            ui.add(
                egui::TextEdit::singleline(&mut form.api_key)
                    .password(true)
                    .hint_text("Stored in this browser only"),
            );
            ui.label(
                RichText::new("Leave empty to use the key built into this deployment.")
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            ui.add_space(4.0);

            ui.label(RichText::new("Model").color(TEXT_SECONDARY).small());
            ui.add(egui::TextEdit::singleline(&mut form.config.model).hint_text(DEFAULT_MODEL));

            ui.add_space(4.0);

            ui.label(RichText::new("API Base URL").color(TEXT_SECONDARY).small());
            ui.text_edit_singleline(&mut form.config.api_base);

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Rate Limit Section ───────────────────────────
            ui.label(RichText::new("Rate limiting").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Minimum spacing between requests (s)").color(TEXT_SECONDARY).small());
            seconds_slider(ui, &mut form.config.min_request_spacing_ms, 0..=120);

            ui.label(RichText::new("Attempts per message").color(TEXT_SECONDARY).small());
            ui.add(egui::Slider::new(&mut form.config.retry.max_attempts, 1..=10));

            ui.label(RichText::new("Backoff step (s)").color(TEXT_SECONDARY).small());
            seconds_slider(ui, &mut form.config.retry.base_delay_ms, 1..=120);

            ui.label(RichText::new("Backoff cap (s)").color(TEXT_SECONDARY).small());
            seconds_slider(ui, &mut form.config.retry.max_delay_ms, 1..=600);

            // ── Save Button ──────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(RichText::new("Save Settings").color(TEXT_PRIMARY).strong())
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    action = SettingsAction::SaveClicked;
                }
                if ui.button("Defaults").clicked() {
                    action = SettingsAction::ResetDefaults;
                }
            });

            if let Some(fb) = save_feedback {
                let color = if fb.success { SUCCESS } else { ERROR };
                ui.label(RichText::new(&fb.message).color(color).small());
            }
        });

    action
}

/// Slider over whole seconds backed by a millisecond field.
fn seconds_slider(ui: &mut egui::Ui, millis: &mut u64, range: std::ops::RangeInclusive<u64>) {
    let mut secs = *millis / 1000;
    if ui.add(egui::Slider::new(&mut secs, range)).changed() {
        *millis = secs * 1000;
    }
}
