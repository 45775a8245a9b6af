//! Main egui application — composes all panels and manages the workspace.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use sitegen_core::archive::ZipArchiver;
use sitegen_core::client::GenerationClient;
use sitegen_core::credentials::StoredCredential;
use sitegen_core::event_bus::EventBus;
use sitegen_core::ports::StoragePort;
use sitegen_core::workspace::Workspace;
use sitegen_platform::clock::BrowserClock;
use sitegen_platform::download::download_bytes;
use sitegen_platform::file_picker::pick_files;
use sitegen_platform::llm::GeminiProvider;
use sitegen_platform::preview::IframePreview;
use sitegen_platform::storage::auto_detect_storage;
use sitegen_types::config::{GenerationConfig, API_KEY_STORAGE_KEY, CONFIG_STORAGE_KEY};
use sitegen_types::message::ChatFile;
use sitegen_ui::panels::chat::{self, ChatAction};
use sitegen_ui::panels::settings::{self, SaveFeedback, SettingsAction, SettingsForm};
use sitegen_ui::panels::workspace::{self, WorkspaceAction};
use sitegen_ui::state::UiState;
use sitegen_ui::theme;

const ATTACHMENT_TYPES: &str = "image/*,application/pdf,text/*";

/// Values read back from storage after startup
#[derive(Default)]
struct Restored {
    config: Option<GenerationConfig>,
    api_key: Option<String>,
}

/// The main application state
pub struct SitegenApp {
    ui_state: UiState,
    settings_form: SettingsForm,
    save_feedback: Option<SaveFeedback>,
    event_bus: EventBus,
    workspace: Rc<RefCell<Workspace>>,
    storage: Rc<dyn StoragePort>,
    credentials: Rc<StoredCredential>,
    archiver: ZipArchiver,
    preview: Option<IframePreview>,
    canvas: web_sys::HtmlCanvasElement,
    picked_files: Rc<RefCell<Vec<ChatFile>>>,
    restored: Rc<RefCell<Restored>>,
    first_frame: bool,
}

impl SitegenApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, canvas: web_sys::HtmlCanvasElement) -> Self {
        let config = GenerationConfig::default();
        let event_bus = EventBus::new();
        let storage = auto_detect_storage();
        let credentials = Rc::new(StoredCredential::new(
            storage.clone(),
            sitegen_platform::build_time_api_key(),
        ));

        let client = Self::build_client(&config, credentials.clone(), &event_bus);
        let workspace = Workspace::new(client, event_bus.clone());

        let preview = match IframePreview::new() {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("Preview frame unavailable: {}", e);
                None
            }
        };

        let app = Self {
            ui_state: UiState::new(),
            settings_form: SettingsForm {
                api_key: String::new(),
                config,
            },
            save_feedback: None,
            event_bus,
            workspace: Rc::new(RefCell::new(workspace)),
            storage: storage.clone(),
            credentials,
            archiver: ZipArchiver::new(),
            preview,
            canvas,
            picked_files: Rc::new(RefCell::new(Vec::new())),
            restored: Rc::new(RefCell::new(Restored::default())),
            first_frame: true,
        };

        Self::restore_settings(storage, app.restored.clone());
        app
    }

    fn build_client(
        config: &GenerationConfig,
        credentials: Rc<StoredCredential>,
        event_bus: &EventBus,
    ) -> GenerationClient {
        let model = Rc::new(GeminiProvider::new(config.api_base.clone()));
        GenerationClient::new(config.clone(), model, credentials, Rc::new(BrowserClock::new()))
            .with_event_bus(event_bus.clone())
    }

    /// Restore config and API key from storage (async)
    fn restore_settings(storage: Rc<dyn StoragePort>, slot: Rc<RefCell<Restored>>) {
        wasm_bindgen_futures::spawn_local(async move {
            match storage.get(CONFIG_STORAGE_KEY).await {
                Ok(Some(data)) => match serde_json::from_slice::<GenerationConfig>(&data) {
                    Ok(config) => {
                        slot.borrow_mut().config = Some(config);
                        log::info!("Config restored from storage");
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                },
                Ok(None) => {}
                Err(e) => log::warn!("Config lookup failed: {}", e),
            }
            if let Ok(Some(key)) = storage.get(API_KEY_STORAGE_KEY).await {
                slot.borrow_mut().api_key = Some(String::from_utf8_lossy(&key).into_owned());
            }
        });
    }

    fn apply_restored(&mut self) {
        let restored = std::mem::take(&mut *self.restored.borrow_mut());
        if let Some(key) = restored.api_key {
            self.settings_form.api_key = key;
        }
        if let Some(config) = restored.config {
            self.apply_config(config);
        }
    }

    /// Swap in a new configuration. Refused while a submission is running.
    fn apply_config(&mut self, config: GenerationConfig) -> bool {
        let Ok(mut ws) = self.workspace.try_borrow_mut() else {
            return false;
        };
        if ws.client.config().api_base != config.api_base {
            ws.client.set_model(Rc::new(GeminiProvider::new(config.api_base.clone())));
        }
        ws.client.set_config(config.clone());
        self.settings_form.config = config;
        true
    }

    fn save_settings(&mut self) {
        let config = self.settings_form.config.clone();
        if !self.apply_config(config.clone()) {
            self.save_feedback = Some(SaveFeedback {
                message: "Wait for the current request to finish".to_string(),
                success: false,
            });
            return;
        }

        let storage = self.storage.clone();
        let credentials = self.credentials.clone();
        let api_key = self.settings_form.api_key.clone();
        match serde_json::to_vec(&config) {
            Ok(json) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = storage.set(CONFIG_STORAGE_KEY, &json).await {
                        log::error!("Failed to save config: {}", e);
                    }
                    if let Err(e) = credentials.store(&api_key).await {
                        log::error!("Failed to save API key: {}", e);
                    }
                    log::info!("Settings saved to {}", storage.backend_name());
                });
                self.save_feedback = Some(SaveFeedback {
                    message: "Saved".to_string(),
                    success: true,
                });
            }
            Err(e) => {
                self.save_feedback = Some(SaveFeedback {
                    message: format!("Could not save: {}", e),
                    success: false,
                });
            }
        }
    }

    fn new_project(&mut self) {
        if let Ok(mut ws) = self.workspace.try_borrow_mut() {
            ws.reset();
            self.ui_state.reset();
            log::info!("Started a new project");
        }
    }

    fn download(&mut self) {
        let Ok(ws) = self.workspace.try_borrow() else {
            return;
        };
        let result = ws.export(&self.archiver).and_then(|archive| match archive {
            Some(a) => download_bytes(&a.bytes, &a.file_name, &a.mime_type),
            None => Ok(()),
        });
        if let Err(e) = result {
            log::error!("Download failed: {}", e);
            self.ui_state.error = Some(e.to_string());
        }
    }

    /// Keep the iframe over the rectangle the workspace panel reserved.
    fn place_preview(&self, ctx: &egui::Context, rect: Option<egui::Rect>, reload: bool) {
        let Some(preview) = &self.preview else {
            return;
        };
        let (Some(rect), Some(document)) = (rect, self.ui_state.preview_document.as_deref()) else {
            preview.set_visible(false);
            return;
        };

        let canvas = self.canvas.get_bounding_client_rect();
        let zoom = ctx.zoom_factor();
        preview.set_bounds(
            canvas.left() as f32 + rect.min.x * zoom,
            canvas.top() as f32 + rect.min.y * zoom,
            rect.width() * zoom,
            rect.height() * zoom,
        );
        if reload {
            preview.reload(document);
        } else {
            preview.show_document(document);
        }
        preview.set_visible(true);
    }
}

impl eframe::App for SitegenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        self.apply_restored();

        let picked = std::mem::take(&mut *self.picked_files.borrow_mut());
        self.ui_state.pending_files.extend(picked);

        if self.event_bus.has_pending() {
            self.ui_state.process_events(self.event_bus.drain());
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        let mut new_project = false;
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Sitegen").strong().color(theme::ACCENT).size(16.0));
                ui.separator();
                ui.label(
                    RichText::new(format!("Model: {}", self.settings_form.config.model))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                        self.save_feedback = None;
                    }
                    if ui
                        .add_enabled(!self.ui_state.is_busy(), egui::Button::new("New project"))
                        .clicked()
                    {
                        new_project = true;
                    }
                });
            });
        });
        if new_project {
            self.new_project();
        }

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            let mut action = SettingsAction::None;
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    action = settings::settings_panel(
                        ui,
                        &mut self.settings_form,
                        self.save_feedback.as_ref(),
                    );
                });
            match action {
                SettingsAction::SaveClicked => self.save_settings(),
                SettingsAction::ResetDefaults => {
                    self.settings_form.config = GenerationConfig::default();
                    self.save_feedback = None;
                }
                SettingsAction::None => {}
            }
        }

        // ── Chat side panel ──────────────────────────────────
        let mut chat_action = ChatAction::None;
        SidePanel::left("chat_panel")
            .default_width(380.0)
            .min_width(300.0)
            .show(ctx, |ui| {
                chat_action = chat::chat_panel(ui, &mut self.ui_state);
            });
        match chat_action {
            ChatAction::Submit => self.dispatch_submission(ctx),
            ChatAction::PickFiles => self.dispatch_file_dialog(ctx),
            ChatAction::None => {}
        }

        // ── Workspace ────────────────────────────────────────
        let output = CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| workspace::workspace_panel(ui, &mut self.ui_state))
            .inner;

        let reload = matches!(output.action, WorkspaceAction::ReloadPreview);
        if matches!(output.action, WorkspaceAction::Download) {
            self.download();
        }
        self.place_preview(ctx, output.preview_rect, reload);
    }
}

impl SitegenApp {
    /// Hand the input to the workspace (async)
    fn dispatch_submission(&mut self, ctx: &egui::Context) {
        let Some((text, files)) = self.ui_state.take_submission() else {
            return;
        };
        // Busy until the workspace reports TurnEnd
        self.ui_state.generating = true;
        let workspace = self.workspace.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let result = {
                let Ok(mut ws) = workspace.try_borrow_mut() else {
                    log::warn!("Workspace busy, submission dropped");
                    return;
                };
                ws.submit(&text, files).await
            };
            if let Err(e) = result {
                log::error!("Submission failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    /// Open the file dialog (async); picked files land in the next frame.
    fn dispatch_file_dialog(&self, ctx: &egui::Context) {
        let slot = self.picked_files.clone();
        let event_bus = self.event_bus.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match pick_files(ATTACHMENT_TYPES).await {
                Ok(files) => slot.borrow_mut().extend(files),
                Err(e) => {
                    event_bus.emit(sitegen_types::event::GenerationEvent::Error {
                        message: format!("Could not read attachment: {}", e),
                    });
                }
            }
            ctx.request_repaint();
        });
    }
}
