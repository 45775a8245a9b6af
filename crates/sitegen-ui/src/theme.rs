//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(18, 18, 18);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(30, 30, 30);
pub const BG_SURFACE: Color32 = Color32::from_rgb(44, 44, 44);
pub const BORDER: Color32 = Color32::from_rgb(64, 64, 64);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 236, 236);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 150, 150);
pub const ACCENT: Color32 = Color32::from_rgb(255, 92, 0);
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
pub const ERROR_BG: Color32 = Color32::from_rgb(50, 20, 20);
pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);
pub const CODE_BG: Color32 = Color32::from_rgb(12, 12, 12);

/// Square corners throughout
pub const PANEL_ROUNDING: CornerRadius = CornerRadius::ZERO;
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);

/// Apply the dark theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;
    style.visuals.extreme_bg_color = CODE_BG;
    style.visuals.window_stroke = Stroke::new(1.0, BORDER);

    style.visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER);
    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.corner_radius = PANEL_ROUNDING;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.bg_fill = BG_SURFACE;
    style.visuals.widgets.hovered.corner_radius = PANEL_ROUNDING;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.corner_radius = PANEL_ROUNDING;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
