//! Workspace panel — preview surface, file tree and source view.
//!
//! The preview itself is an iframe owned by the app layer; this panel only
//! reserves the rectangle it should cover.

use egui::{self, Align, Layout, Rect, RichText, ScrollArea, Vec2};
use sitegen_core::preview::PREVIEW_PLACEHOLDER;
use sitegen_core::tree::TreeNode;
use sitegen_types::bundle::language_for;
use crate::state::{UiState, WorkspaceTab};
use crate::theme::*;

pub enum WorkspaceAction {
    None,
    /// Pack the bundle and save it
    Download,
    /// Reload the preview document, restarting its scripts
    ReloadPreview,
}

pub struct WorkspaceOutput {
    pub action: WorkspaceAction,
    /// Screen rectangle the preview frame should cover, when it is visible
    pub preview_rect: Option<Rect>,
}

pub fn workspace_panel(ui: &mut egui::Ui, state: &mut UiState) -> WorkspaceOutput {
    let mut action = WorkspaceAction::None;
    let mut preview_rect = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            // Tabs and actions
            ui.horizontal(|ui| {
                ui.selectable_value(&mut state.tab, WorkspaceTab::Preview, "Preview");
                ui.selectable_value(&mut state.tab, WorkspaceTab::Code, "Code");

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let download = ui.add_enabled(
                        state.has_code() && !state.is_busy(),
                        egui::Button::new(RichText::new("Download .zip").color(TEXT_PRIMARY))
                            .fill(ACCENT)
                            .corner_radius(PANEL_ROUNDING),
                    );
                    if download.clicked() {
                        action = WorkspaceAction::Download;
                    }

                    if state.tab == WorkspaceTab::Preview
                        && ui
                            .add_enabled(state.preview_document.is_some(), egui::Button::new("Reload"))
                            .clicked()
                    {
                        action = WorkspaceAction::ReloadPreview;
                    }
                });
            });

            ui.separator();

            if !state.has_code() {
                empty_workspace(ui, state.is_busy());
                return;
            }

            match state.tab {
                WorkspaceTab::Preview => {
                    if state.preview_document.is_some() {
                        let size = ui.available_size();
                        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                        ui.painter().rect_filled(rect, PANEL_ROUNDING, egui::Color32::WHITE);
                        preview_rect = Some(rect);
                    } else {
                        ui.centered_and_justified(|ui| {
                            ui.label(RichText::new(PREVIEW_PLACEHOLDER).color(TEXT_SECONDARY));
                        });
                    }
                }
                WorkspaceTab::Code => code_view(ui, state),
            }
        });

    WorkspaceOutput { action, preview_rect }
}

fn empty_workspace(ui: &mut egui::Ui, busy: bool) {
    ui.centered_and_justified(|ui| {
        let text = if busy {
            "Generating your project..."
        } else {
            "Your generated site will appear here."
        };
        ui.label(RichText::new(text).color(TEXT_SECONDARY).italics());
    });
}

fn code_view(ui: &mut egui::Ui, state: &mut UiState) {
    let mut clicked: Option<String> = None;

    ui.horizontal_top(|ui| {
        let tree_width = (ui.available_width() * 0.25).clamp(160.0, 260.0);
        let height = ui.available_height();

        ui.allocate_ui(Vec2::new(tree_width, height), |ui| {
            egui::Frame::default()
                .fill(BG_SECONDARY)
                .inner_margin(6.0)
                .show(ui, |ui| {
                    ui.set_min_size(Vec2::new(tree_width, height - 12.0));
                    ScrollArea::vertical().id_salt("file_tree").show(ui, |ui| {
                        render_nodes(ui, &state.tree.roots, state.selected_file.as_deref(), &mut clicked);
                    });
                });
        });

        ui.vertical(|ui| match state.selected_source() {
            Some((path, content)) => {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(path).color(TEXT_PRIMARY).monospace());
                    ui.label(RichText::new(language_for(path)).color(TEXT_SECONDARY).small());
                });
                egui::Frame::default()
                    .fill(CODE_BG)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ScrollArea::both()
                            .id_salt("source")
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                let mut text = content;
                                ui.add(
                                    egui::TextEdit::multiline(&mut text)
                                        .code_editor()
                                        .desired_width(f32::INFINITY),
                                );
                            });
                    });
            }
            None => {
                ui.label(RichText::new("Select a file to view its source.").color(TEXT_SECONDARY));
            }
        });
    });

    if let Some(path) = clicked {
        state.select_file(&path);
    }
}

fn render_nodes(
    ui: &mut egui::Ui,
    nodes: &[TreeNode],
    selected: Option<&str>,
    clicked: &mut Option<String>,
) {
    for node in nodes {
        match node {
            TreeNode::Group { name, children } => {
                egui::CollapsingHeader::new(RichText::new(name).color(TEXT_SECONDARY))
                    .id_salt(("group", name, children.len()))
                    .default_open(true)
                    .show(ui, |ui| render_nodes(ui, children, selected, clicked));
            }
            TreeNode::Leaf { name, path } => {
                let is_selected = selected == Some(path.as_str());
                if ui
                    .selectable_label(is_selected, RichText::new(name).monospace())
                    .on_hover_text(path)
                    .clicked()
                {
                    *clicked = Some(path.clone());
                }
            }
        }
    }
}
