//! UI-level state that drives rendering.
//! This is a read-only projection of the workspace, updated each frame by
//! draining the EventBus, plus the view state the panels own (input text,
//! pending attachments, selected file, active tab).

use sitegen_core::preview::build_preview_document;
use sitegen_core::tree::FileTree;
use sitegen_types::{
    GeneratedCode,
    event::GenerationEvent,
    message::{ChatFile, ChatMessage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceTab {
    Preview,
    Code,
}

/// State visible to UI panels
pub struct UiState {
    /// Transcript as appended by the workspace
    pub messages: Vec<ChatMessage>,
    /// A submission is in flight
    pub generating: bool,
    /// Status line text
    pub status_text: String,
    /// Inline error banner; cleared by the next submission
    pub error: Option<String>,
    /// Input field content
    pub input_text: String,
    /// Files chosen for the next submission
    pub pending_files: Vec<ChatFile>,
    /// Whether settings panel is open
    pub show_settings: bool,

    pub code: Option<GeneratedCode>,
    pub tree: FileTree,
    pub selected_file: Option<String>,
    pub preview_document: Option<String>,
    pub tab: WorkspaceTab,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            generating: false,
            status_text: "Ready".to_string(),
            error: None,
            input_text: String::new(),
            pending_files: Vec::new(),
            show_settings: false,
            code: None,
            tree: FileTree::default(),
            selected_file: None,
            preview_document: None,
            tab: WorkspaceTab::Preview,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<GenerationEvent>) {
        for event in events {
            match event {
                GenerationEvent::TurnStart { .. } => {
                    self.generating = true;
                    self.error = None;
                    self.status_text = "Generating...".to_string();
                }
                GenerationEvent::MessageAppended { message } => {
                    self.messages.push(message);
                }
                GenerationEvent::Throttled { wait_ms } => {
                    self.status_text =
                        format!("Waiting {}s between requests...", wait_ms.div_ceil(1000));
                }
                GenerationEvent::Retrying { attempt, max_attempts, delay_ms } => {
                    self.status_text = format!(
                        "Rate limited, retrying in {}s (attempt {}/{})",
                        delay_ms.div_ceil(1000),
                        attempt + 1,
                        max_attempts
                    );
                }
                GenerationEvent::BundleReady { code } => {
                    self.show_bundle(code);
                }
                GenerationEvent::TurnEnd { .. } => {
                    self.generating = false;
                    if self.error.is_none() {
                        self.status_text = "Ready".to_string();
                    }
                }
                GenerationEvent::Error { message } => {
                    self.status_text = "Error".to_string();
                    self.error = Some(message);
                }
            }
        }
    }

    fn show_bundle(&mut self, code: GeneratedCode) {
        log::debug!("Showing bundle with {} file(s)", code.len());
        self.tree = FileTree::build(&code);
        self.preview_document = build_preview_document(&code);

        let keep = self
            .selected_file
            .as_deref()
            .is_some_and(|path| code.contains(path));
        if !keep {
            self.selected_file = code.default_selection().map(str::to_string);
        }
        self.code = Some(code);
    }

    pub fn select_file(&mut self, path: &str) {
        self.selected_file = Some(path.to_string());
        self.tab = WorkspaceTab::Code;
    }

    /// (path, content) of the file shown in the code view.
    pub fn selected_source(&self) -> Option<(&str, &str)> {
        let path = self.selected_file.as_deref()?;
        let content = self.code.as_ref()?.get(path)?;
        Some((path, content))
    }

    /// Take the input and attachments for dispatch, or `None` if there is
    /// nothing to send or a submission is already running.
    pub fn take_submission(&mut self) -> Option<(String, Vec<ChatFile>)> {
        let text = self.input_text.trim().to_string();
        if self.is_busy() || (text.is_empty() && self.pending_files.is_empty()) {
            return None;
        }
        self.input_text.clear();
        Some((text, std::mem::take(&mut self.pending_files)))
    }

    /// Back to an empty project; settings visibility is kept.
    pub fn reset(&mut self) {
        let show_settings = self.show_settings;
        *self = Self::new();
        self.show_settings = show_settings;
    }

    pub fn is_busy(&self) -> bool {
        self.generating
    }

    pub fn has_code(&self) -> bool {
        self.code.as_ref().is_some_and(|c| !c.is_empty())
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
