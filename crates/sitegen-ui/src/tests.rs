#[cfg(test)]
mod tests {
    use crate::panels::settings::SettingsForm;
    use crate::state::*;
    use sitegen_types::event::GenerationEvent;
    use sitegen_types::message::{ChatFile, ChatMessage, ChatRole};
    use sitegen_types::GeneratedCode;

    fn bundle(pairs: &[(&str, &str)]) -> GeneratedCode {
        pairs.iter().copied().collect()
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert!(state.messages.is_empty());
        assert!(!state.is_busy());
        assert!(state.error.is_none());
        assert!(state.input_text.is_empty());
        assert!(state.pending_files.is_empty());
        assert!(!state.show_settings);
        assert_eq!(state.status_text, "Ready");
        assert!(!state.has_code());
        assert!(state.tree.is_empty());
        assert_eq!(state.tab, WorkspaceTab::Preview);
    }

    #[test]
    fn test_ui_state_process_turn_start() {
        let mut state = UiState::new();
        state.error = Some("old".to_string());
        state.process_events(vec![GenerationEvent::TurnStart { turn_id: 1 }]);

        assert!(state.is_busy());
        assert!(state.error.is_none());
        assert_eq!(state.status_text, "Generating...");
    }

    #[test]
    fn test_ui_state_message_appended() {
        let mut state = UiState::new();
        state.process_events(vec![
            GenerationEvent::MessageAppended { message: ChatMessage::user("hi", &[]) },
            GenerationEvent::MessageAppended { message: ChatMessage::model("hello") },
        ]);

        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, ChatRole::User);
        assert_eq!(state.messages[1].text, "hello");
    }

    #[test]
    fn test_ui_state_throttle_and_retry_status() {
        let mut state = UiState::new();
        state.process_events(vec![GenerationEvent::Throttled { wait_ms: 24_500 }]);
        assert_eq!(state.status_text, "Waiting 25s between requests...");

        state.process_events(vec![GenerationEvent::Retrying {
            attempt: 1,
            max_attempts: 5,
            delay_ms: 30_000,
        }]);
        assert_eq!(state.status_text, "Rate limited, retrying in 30s (attempt 2/5)");
    }

    #[test]
    fn test_ui_state_bundle_ready() {
        let mut state = UiState::new();
        let code = bundle(&[
            ("index.html", "<link href=\"a.css\">"),
            ("a.css", "p{}"),
        ]);
        state.process_events(vec![GenerationEvent::BundleReady { code }]);

        assert!(state.has_code());
        assert_eq!(state.selected_file.as_deref(), Some("index.html"));
        assert_eq!(state.preview_document.as_deref(), Some("<style>p{}</style>"));
        assert_eq!(state.tree.leaf_paths(), vec!["a.css", "index.html"]);
    }

    #[test]
    fn test_ui_state_bundle_without_index() {
        let mut state = UiState::new();
        state.process_events(vec![GenerationEvent::BundleReady {
            code: bundle(&[("src/app.js", "x"), ("about.html", "y")]),
        }]);

        assert!(state.preview_document.is_none());
        assert_eq!(state.selected_file.as_deref(), Some("about.html"));
    }

    #[test]
    fn test_ui_state_selection_survives_new_bundle() {
        let mut state = UiState::new();
        state.process_events(vec![GenerationEvent::BundleReady {
            code: bundle(&[("index.html", "a"), ("styles/main.css", "b")]),
        }]);
        state.select_file("styles/main.css");
        assert_eq!(state.tab, WorkspaceTab::Code);
        assert_eq!(state.selected_source(), Some(("styles/main.css", "b")));

        state.process_events(vec![GenerationEvent::BundleReady {
            code: bundle(&[("index.html", "a2"), ("styles/main.css", "b2")]),
        }]);
        assert_eq!(state.selected_source(), Some(("styles/main.css", "b2")));

        state.process_events(vec![GenerationEvent::BundleReady {
            code: bundle(&[("index.html", "a3")]),
        }]);
        assert_eq!(state.selected_source(), Some(("index.html", "a3")));
    }

    #[test]
    fn test_ui_state_process_error() {
        let mut state = UiState::new();
        state.process_events(vec![
            GenerationEvent::TurnStart { turn_id: 1 },
            GenerationEvent::Error { message: "API error".to_string() },
            GenerationEvent::TurnEnd { turn_id: 1 },
        ]);

        assert!(!state.is_busy());
        assert_eq!(state.error.as_deref(), Some("API error"));
        assert_eq!(state.status_text, "Error");
    }

    #[test]
    fn test_ui_state_full_turn_lifecycle() {
        let mut state = UiState::new();
        state.input_text = "  Create a hello page.  ".to_string();

        let (text, files) = state.take_submission().unwrap();
        assert_eq!(text, "Create a hello page.");
        assert!(files.is_empty());
        assert!(state.input_text.is_empty());

        state.process_events(vec![
            GenerationEvent::TurnStart { turn_id: 1 },
            GenerationEvent::MessageAppended { message: ChatMessage::user(&text, &[]) },
        ]);
        assert!(state.is_busy());

        state.process_events(vec![
            GenerationEvent::MessageAppended { message: ChatMessage::model_code("done") },
            GenerationEvent::BundleReady { code: bundle(&[("index.html", "<h1>Hi</h1>")]) },
            GenerationEvent::TurnEnd { turn_id: 1 },
        ]);

        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Ready");
        assert_eq!(state.messages.len(), 2);
        assert!(state.messages[1].is_code);
        assert_eq!(state.preview_document.as_deref(), Some("<h1>Hi</h1>"));
    }

    #[test]
    fn test_take_submission_rules() {
        let mut state = UiState::new();
        assert!(state.take_submission().is_none());

        state.input_text = "   ".to_string();
        assert!(state.take_submission().is_none());

        state.pending_files.push(ChatFile::from_bytes("a.png", "image/png", b"x"));
        let (text, files) = state.take_submission().unwrap();
        assert!(text.is_empty());
        assert_eq!(files.len(), 1);
        assert!(state.pending_files.is_empty());

        state.generating = true;
        state.input_text = "more".to_string();
        assert!(state.take_submission().is_none());
        assert_eq!(state.input_text, "more");
    }

    #[test]
    fn test_ui_state_reset_keeps_settings_visibility() {
        let mut state = UiState::new();
        state.show_settings = true;
        state.process_events(vec![
            GenerationEvent::MessageAppended { message: ChatMessage::user("x", &[]) },
            GenerationEvent::BundleReady { code: bundle(&[("index.html", "x")]) },
        ]);

        state.reset();
        assert!(state.messages.is_empty());
        assert!(!state.has_code());
        assert!(state.selected_file.is_none());
        assert!(state.show_settings);
    }

    #[test]
    fn test_settings_form_defaults() {
        let form = SettingsForm::default();
        assert!(form.api_key.is_empty());
        assert_eq!(form.config.min_request_spacing_ms, 30_000);
        assert_eq!(form.config.retry.max_attempts, 5);
    }
}
