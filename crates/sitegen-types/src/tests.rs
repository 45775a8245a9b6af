#[cfg(test)]
mod tests {
    use crate::Result;
    use crate::message::*;
    use crate::bundle::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user_without_files() {
        let msg = ChatMessage::user("Create a hello page.", &[]);
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.text, "Create a hello page.");
        assert!(msg.attachments.is_empty());
        assert!(!msg.is_code);
        assert!(!msg.created_at.is_empty());
    }

    #[test]
    fn test_message_user_keeps_only_attachment_meta() {
        let file = ChatFile::from_bytes("logo.png", "image/png", b"\x89PNG");
        let msg = ChatMessage::user("use this logo", &[file]);
        assert_eq!(msg.attachments.len(), 1);
        assert_eq!(msg.attachments[0].name, "logo.png");
        assert_eq!(msg.attachments[0].mime_type, "image/png");

        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("iVBORw"), "payload leaked into transcript: {}", json);
    }

    #[test]
    fn test_message_model_and_code_flag() {
        let prose = ChatMessage::model("Hello!");
        assert_eq!(prose.role, ChatRole::Model);
        assert!(!prose.is_code);

        let code = ChatMessage::model_code("Generated.");
        assert_eq!(code.role, ChatRole::Model);
        assert!(code.is_code);
        assert_eq!(code.text, "Generated.");
    }

    #[test]
    fn test_message_serialization_skips_empty_attachments() {
        let msg = ChatMessage::model("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("attachments"));
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, ChatRole::Model);
        assert_eq!(back.text, "hi");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&ChatRole::Model).unwrap(), r#""model""#);
        assert_eq!(ChatRole::Model.as_str(), "model");
    }

    #[test]
    fn test_chat_file_base64() {
        let file = ChatFile::from_bytes("a.txt", "text/plain", b"hello");
        assert_eq!(file.data, "aGVsbG8=");
        assert_eq!(file.meta().name, "a.txt");
    }

    // ─── Bundle Tests ────────────────────────────────────────

    #[test]
    fn test_bundle_json_is_flat_object() {
        let code: GeneratedCode = [("index.html", "<h1>Hi</h1>"), ("src/app.js", "")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, r#"{"index.html":"<h1>Hi</h1>","src/app.js":""}"#);

        let back: GeneratedCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn test_bundle_entry_document() {
        let mut code = GeneratedCode::new();
        assert!(code.entry_document().is_none());

        code.insert("index.html", "");
        assert!(code.entry_document().is_none(), "empty entry is not previewable");

        code.insert("index.html", "<p>x</p>");
        assert_eq!(code.entry_document(), Some("<p>x</p>"));
    }

    #[test]
    fn test_bundle_default_selection() {
        let code: GeneratedCode = [("src/app.js", ""), ("index.html", "")].into_iter().collect();
        assert_eq!(code.default_selection(), Some("index.html"));

        let code: GeneratedCode = [("z.css", ""), ("b/a.js", "")].into_iter().collect();
        assert_eq!(code.default_selection(), Some("b/a.js"));

        assert_eq!(GeneratedCode::new().default_selection(), None);
    }

    #[test]
    fn test_language_for() {
        assert_eq!(language_for("index.html"), "html");
        assert_eq!(language_for("styles/main.css"), "css");
        assert_eq!(language_for("src/app.js"), "js");
        assert_eq!(language_for("README"), "text");
        assert_eq!(language_for("v1.2/LICENSE"), "text");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_event_serialization() {
        let event = GenerationEvent::Retrying { attempt: 2, max_attempts: 5, delay_ms: 60_000 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Retrying"));
        assert!(json.contains("60000"));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.min_request_spacing_ms, 30_000);
        assert_eq!(config.retry.max_attempts, 5);
        assert!(config.system_instruction.contains("JSON object"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = GenerationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_retry_policy_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), 30_000);
        assert_eq!(policy.delay_for(2), 60_000);
        assert_eq!(policy.delay_for(4), 120_000);
        assert_eq!(policy.delay_for(10), 120_000);
        assert!(policy.allows_retry(4));
        assert!(!policy.allows_retry(5));
    }

    #[test]
    fn test_retry_policy_saturates() {
        let policy = RetryPolicy { max_attempts: 3, base_delay_ms: u64::MAX, max_delay_ms: 5 };
        assert_eq!(policy.delay_for(3), 5);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let e = SitegenError::Config("no key".to_string());
        assert_eq!(e.to_string(), "Configuration error: no key");

        let e = SitegenError::Model { status: Some(500), message: "boom".to_string() };
        assert_eq!(e.to_string(), "Model error (500): boom");

        let e = SitegenError::Model { status: None, message: "boom".to_string() };
        assert_eq!(e.to_string(), "Model error: boom");

        let e = SitegenError::Request(Box::new(SitegenError::Network("offline".to_string())));
        assert!(e.to_string().contains("offline"));

        let e = SitegenError::RetriesExhausted { attempts: 5 };
        assert!(e.to_string().contains("5 attempts"));
    }

    #[test]
    fn test_error_rate_limit_detection() {
        let by_code = SitegenError::Model { status: Some(429), message: String::new() };
        let by_status = SitegenError::Model { status: Some(400), message: "RESOURCE_EXHAUSTED".into() };
        let by_text = SitegenError::Model { status: None, message: "Quota exceeded for metric".into() };
        let other = SitegenError::Model { status: Some(500), message: "internal".into() };
        let network = SitegenError::Network("429".into());

        assert!(by_code.is_rate_limit());
        assert!(by_status.is_rate_limit());
        assert!(by_text.is_rate_limit());
        assert!(!other.is_rate_limit());
        assert!(!network.is_rate_limit());
    }

    #[test]
    fn test_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{{").unwrap_err();
        let e: SitegenError = err.into();
        assert!(matches!(e, SitegenError::Serialization(_)));
    }

    #[test]
    fn test_result_alias() {
        let ok: Result<u8> = Ok(1);
        assert_eq!(ok.unwrap(), 1);
    }
}
