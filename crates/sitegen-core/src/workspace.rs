//! Workspace runtime — one project session.
//!
//! Each submission runs: record user message → ask the model → parse reply →
//! either replace the bundle (code reply) or record prose.

use sitegen_types::{
    GeneratedCode, Result,
    event::GenerationEvent,
    message::{ChatFile, ChatMessage},
};
use crate::archive::archive_file_name;
use crate::client::GenerationClient;
use crate::event_bus::EventBus;
use crate::parser::parse_code_response;
use crate::ports::ArchivePort;
use crate::preview::build_preview_document;
use crate::tree::FileTree;

/// Transcript text used in place of the raw JSON when a reply carried code.
pub const CODE_GENERATED_REPLY: &str = "I've generated the project files as you requested. \
     You can browse the code and see the preview in the workspace.";

const PROJECT_NAME_WORDS: usize = 4;
const PROJECT_DESCRIPTION_CHARS: usize = 100;

/// Naming context derived from the prompt that started the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub name: String,
    pub description: String,
    pub prompt: String,
}

impl ProjectContext {
    pub fn from_prompt(prompt: &str) -> Self {
        let prompt = prompt.trim();
        let name = prompt
            .split_whitespace()
            .take(PROJECT_NAME_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        let description = if prompt.chars().count() > PROJECT_DESCRIPTION_CHARS {
            let head: String = prompt.chars().take(PROJECT_DESCRIPTION_CHARS).collect();
            format!("{}...", head)
        } else {
            prompt.to_string()
        };
        Self {
            name: format!("{}...", name),
            description,
            prompt: prompt.to_string(),
        }
    }
}

/// A packed bundle ready to hand to the browser
#[derive(Debug, Clone)]
pub struct ExportedArchive {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceState {
    Idle,
    Generating,
    Error(String),
}

pub struct Workspace {
    pub transcript: Vec<ChatMessage>,
    pub code: Option<GeneratedCode>,
    pub project: Option<ProjectContext>,
    pub state: WorkspaceState,
    pub client: GenerationClient,
    event_bus: EventBus,
    turn_counter: u64,
}

impl Workspace {
    pub fn new(client: GenerationClient, event_bus: EventBus) -> Self {
        Self {
            transcript: Vec::new(),
            code: None,
            project: None,
            state: WorkspaceState::Idle,
            client,
            event_bus,
            turn_counter: 0,
        }
    }

    /// Process one user submission.
    ///
    /// This is async and must be spawned via `wasm_bindgen_futures::spawn_local`.
    /// Blank text without attachments is ignored.
    pub async fn submit(&mut self, text: &str, files: Vec<ChatFile>) -> Result<()> {
        let text = text.trim();
        if text.is_empty() && files.is_empty() {
            return Ok(());
        }

        self.turn_counter += 1;
        let turn_id = self.turn_counter;

        if self.project.is_none() && !text.is_empty() {
            self.project = Some(ProjectContext::from_prompt(text));
        }

        self.append(ChatMessage::user(text, &files));
        self.state = WorkspaceState::Generating;
        self.event_bus.emit(GenerationEvent::TurnStart { turn_id });

        let reply = match self.client.send_message(text, &files).await {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("Generation failed: {}", e);
                self.state = WorkspaceState::Error(e.to_string());
                self.event_bus.emit(GenerationEvent::Error {
                    message: e.to_string(),
                });
                self.event_bus.emit(GenerationEvent::TurnEnd { turn_id });
                return Err(e);
            }
        };
        // Payloads are dropped here; only name/type stay in the transcript.
        drop(files);

        match parse_code_response(&reply) {
            Some(code) => {
                log::info!("Received bundle with {} file(s)", code.len());
                self.append(ChatMessage::model_code(CODE_GENERATED_REPLY));
                self.event_bus.emit(GenerationEvent::BundleReady { code: code.clone() });
                self.code = Some(code);
            }
            None => self.append(ChatMessage::model(reply)),
        }

        self.state = WorkspaceState::Idle;
        self.event_bus.emit(GenerationEvent::TurnEnd { turn_id });
        Ok(())
    }

    fn append(&mut self, message: ChatMessage) {
        self.transcript.push(message.clone());
        self.event_bus.emit(GenerationEvent::MessageAppended { message });
    }

    pub fn preview_document(&self) -> Option<String> {
        self.code.as_ref().and_then(build_preview_document)
    }

    pub fn file_tree(&self) -> FileTree {
        self.code.as_ref().map(FileTree::build).unwrap_or_default()
    }

    /// Pack the current bundle; `None` when nothing was generated yet.
    pub fn export(&self, archiver: &dyn ArchivePort) -> Result<Option<ExportedArchive>> {
        let Some(code) = self.code.as_ref().filter(|c| !c.is_empty()) else {
            return Ok(None);
        };
        let bytes = archiver.build_archive(code)?;
        Ok(Some(ExportedArchive {
            file_name: archive_file_name(self.project.as_ref().map(|p| p.name.as_str())),
            mime_type: archiver.mime_type().to_string(),
            bytes,
        }))
    }

    /// Start over: clear transcript, bundle and the model session.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.code = None;
        self.project = None;
        self.state = WorkspaceState::Idle;
        self.turn_counter = 0;
        self.client.reset();
    }
}
