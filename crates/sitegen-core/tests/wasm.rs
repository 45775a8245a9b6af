//! WASM-target tests for sitegen-core.
//!
//! Runs EventBus, parser, preview, tree, archive and Workspace tests
//! under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use sitegen_core::archive::{archive_file_name, ZipArchiver};
use sitegen_core::client::GenerationClient;
use sitegen_core::event_bus::EventBus;
use sitegen_core::parser::parse_code_response;
use sitegen_core::ports::*;
use sitegen_core::preview::build_preview_document;
use sitegen_core::tree::FileTree;
use sitegen_core::workspace::{Workspace, WorkspaceState};
use sitegen_types::config::GenerationConfig;
use sitegen_types::event::GenerationEvent;
use sitegen_types::message::ChatRole;
use sitegen_types::{GeneratedCode, SitegenError};

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_new_is_empty() {
    let bus = EventBus::new();
    assert!(!bus.has_pending());
    assert!(bus.drain().is_empty());
}

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(GenerationEvent::TurnStart { turn_id: 1 });
    bus.emit(GenerationEvent::Throttled { wait_ms: 1000 });

    let events = bus.drain();
    assert_eq!(events.len(), 2);
    assert!(!bus.has_pending());
}

// ─── Parser Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn parser_fenced_json() {
    let code = parse_code_response("```json\n{\"index.html\": \"<p>x</p>\"}\n```").unwrap();
    assert_eq!(code.get("index.html"), Some("<p>x</p>"));
}

#[wasm_bindgen_test]
fn parser_rejects_non_string_values() {
    assert!(parse_code_response(r#"{"a": 1}"#).is_none());
    assert!(parse_code_response("{}").is_none());
}

#[wasm_bindgen_test]
fn parser_prose() {
    assert!(parse_code_response("Happy to help!").is_none());
}

// ─── Preview / Tree Tests ────────────────────────────────

#[wasm_bindgen_test]
fn preview_inlines_assets() {
    let code: GeneratedCode = [
        ("index.html", "<link href=\"styles/a.css\"><script src=\"src/app.js\"></script>"),
        ("styles/a.css", "body{}"),
        ("src/app.js", "go()"),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        build_preview_document(&code).unwrap(),
        "<style>body{}</style><script type=\"module\">go()</script>"
    );
}

#[wasm_bindgen_test]
fn preview_without_entry_document() {
    let code: GeneratedCode = [("app.js", "x")].into_iter().collect();
    assert!(build_preview_document(&code).is_none());
}

#[wasm_bindgen_test]
fn tree_orders_groups_first() {
    let code: GeneratedCode = [("b.js", ""), ("a/x.js", ""), ("a/y.js", "")].into_iter().collect();
    let tree = FileTree::build(&code);
    assert_eq!(tree.leaf_paths(), vec!["a/x.js", "a/y.js", "b.js"]);
}

// ─── Archive Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn archive_has_zip_signatures() {
    let code: GeneratedCode = [("index.html", "hi")].into_iter().collect();
    let bytes = ZipArchiver::new().build_archive(&code).unwrap();
    assert_eq!(&bytes[..4], &[0x50, 0x4b, 0x03, 0x04]);
    let eocd = bytes.len() - 22;
    assert_eq!(&bytes[eocd..eocd + 4], &[0x50, 0x4b, 0x05, 0x06]);
    assert_eq!(u16::from_le_bytes([bytes[eocd + 10], bytes[eocd + 11]]), 1);
}

#[wasm_bindgen_test]
fn archive_name_from_project() {
    assert_eq!(archive_file_name(Some("Landing Page...")), "landing-page....zip");
}

// ─── Mock-based Workspace Tests (async) ──────────────────

struct InstantClock {
    now: Cell<u64>,
}

#[async_trait(?Send)]
impl ClockPort for InstantClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    async fn sleep_ms(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

struct MockModel {
    reply: sitegen_types::Result<String>,
    calls: RefCell<u32>,
}

#[async_trait(?Send)]
impl ModelPort for MockModel {
    async fn generate(&self, _req: &GenerateRequest) -> sitegen_types::Result<String> {
        *self.calls.borrow_mut() += 1;
        self.reply.clone()
    }
}

struct MockCredential;

#[async_trait(?Send)]
impl CredentialSource for MockCredential {
    async fn resolve(&self) -> sitegen_types::Result<String> {
        Ok("test-key".to_string())
    }
}

fn workspace(model: Rc<MockModel>, bus: &EventBus) -> Workspace {
    let clock = Rc::new(InstantClock { now: Cell::new(0) });
    let client = GenerationClient::new(GenerationConfig::default(), model, Rc::new(MockCredential), clock)
        .with_event_bus(bus.clone());
    Workspace::new(client, bus.clone())
}

#[wasm_bindgen_test]
async fn workspace_generates_bundle() {
    let bus = EventBus::new();
    let model = Rc::new(MockModel {
        reply: Ok(r#"{"index.html": "<h1>Hello</h1>"}"#.to_string()),
        calls: RefCell::new(0),
    });
    let mut ws = workspace(model.clone(), &bus);

    ws.submit("Create a hello page.", Vec::new()).await.unwrap();

    assert_eq!(ws.transcript.len(), 2);
    assert_eq!(ws.transcript[1].role, ChatRole::Model);
    assert!(ws.transcript[1].is_code);
    assert_eq!(ws.preview_document().unwrap(), "<h1>Hello</h1>");
    assert_eq!(ws.state, WorkspaceState::Idle);

    let export = ws.export(&ZipArchiver::new()).unwrap().unwrap();
    assert!(export.file_name.ends_with(".zip"));

    let events = bus.drain();
    assert!(events.iter().any(|e| matches!(e, GenerationEvent::BundleReady { .. })));
}

#[wasm_bindgen_test]
async fn workspace_multiple_turns_throttled() {
    let bus = EventBus::new();
    let model = Rc::new(MockModel { reply: Ok("Sure.".to_string()), calls: RefCell::new(0) });
    let mut ws = workspace(model.clone(), &bus);

    ws.submit("Turn 1", Vec::new()).await.unwrap();
    ws.submit("Turn 2", Vec::new()).await.unwrap();

    assert_eq!(ws.transcript.len(), 4);
    assert_eq!(*model.calls.borrow(), 2);
    let events = bus.drain();
    assert!(events.iter().any(|e| matches!(e, GenerationEvent::Throttled { wait_ms: 30_000 })));
}

#[wasm_bindgen_test]
async fn workspace_model_error() {
    let bus = EventBus::new();
    let model = Rc::new(MockModel {
        reply: Err(SitegenError::Model { status: Some(500), message: "boom".to_string() }),
        calls: RefCell::new(0),
    });
    let mut ws = workspace(model, &bus);

    let result = ws.submit("Hi", Vec::new()).await;
    assert!(matches!(result, Err(SitegenError::Request(_))));

    let events = bus.drain();
    let has_error = events.iter().any(|e| matches!(e, GenerationEvent::Error { .. }));
    assert!(has_error, "Missing Error event");
}
