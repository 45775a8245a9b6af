//! Generation client — owns the conversational session with the model endpoint.
//!
//! One client holds one session (credential + accumulated turns) and the
//! last-dispatch time used for request spacing. Callers serialize calls to
//! `send_message`; there is no internal queue.

use std::rc::Rc;
use sitegen_types::{
    Result, SitegenError,
    config::GenerationConfig,
    event::GenerationEvent,
    message::ChatFile,
};
use crate::event_bus::EventBus;
use crate::ports::*;
use crate::retry::retry_on;
use crate::throttle::Throttle;

/// Conversation state bound to one credential
#[derive(Debug, Clone)]
pub struct ChatSession {
    api_key: String,
    history: Vec<ModelTurn>,
}

impl ChatSession {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ModelTurn] {
        &self.history
    }
}

pub struct GenerationClient {
    config: GenerationConfig,
    model: Rc<dyn ModelPort>,
    credentials: Rc<dyn CredentialSource>,
    clock: Rc<dyn ClockPort>,
    throttle: Throttle,
    session: Option<ChatSession>,
    event_bus: Option<EventBus>,
}

impl GenerationClient {
    pub fn new(
        config: GenerationConfig,
        model: Rc<dyn ModelPort>,
        credentials: Rc<dyn CredentialSource>,
        clock: Rc<dyn ClockPort>,
    ) -> Self {
        let throttle = Throttle::new(config.min_request_spacing_ms);
        Self {
            config,
            model,
            credentials,
            clock,
            throttle,
            session: None,
            event_bus: None,
        }
    }

    /// Report throttle waits and retries on the given bus.
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Replace the configuration. The session and the last dispatch time
    /// carry over; only a credential change restarts the session.
    pub fn set_config(&mut self, config: GenerationConfig) {
        let throttle = Throttle::new(config.min_request_spacing_ms);
        if let Some(last) = self.throttle.last_dispatch_ms() {
            throttle.record_dispatch(last);
        }
        self.throttle = throttle;
        self.config = config;
    }

    /// Swap the endpoint adapter, e.g. after the API base changed.
    pub fn set_model(&mut self, model: Rc<dyn ModelPort>) {
        self.model = model;
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Resolve the credential and open a fresh session.
    pub async fn start(&mut self) -> Result<()> {
        let api_key = self.credentials.resolve().await?;
        self.session = Some(ChatSession::new(api_key));
        log::info!("Generation session started (model {})", self.config.model);
        Ok(())
    }

    /// Drop the session and the last-dispatch time.
    pub fn reset(&mut self) {
        self.session = None;
        self.throttle.reset();
    }

    /// Send one user turn and return the raw reply text.
    ///
    /// Starts the session on first use and restarts it when the stored
    /// credential no longer matches the one the session was opened with.
    pub async fn send_message(&mut self, text: &str, files: &[ChatFile]) -> Result<String> {
        if text.trim().is_empty() && files.is_empty() {
            return Err(SitegenError::EmptyMessage);
        }

        self.ensure_session().await?;
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| SitegenError::Other("Session not started".to_string()))?;

        let user_turn = ModelTurn::user(text, files);
        let mut contents = session.history.clone();
        contents.push(user_turn.clone());
        let request = GenerateRequest {
            model: self.config.model.clone(),
            api_key: session.api_key.clone(),
            system_instruction: self.config.system_instruction.clone(),
            contents,
        };

        log::info!(
            "Dispatching turn with {} attachment(s), {} previous turn(s)",
            files.len(),
            request.contents.len() - 1
        );

        let throttle = &self.throttle;
        let clock = self.clock.as_ref();
        let model = self.model.as_ref();
        let bus = self.event_bus.as_ref();
        let req = &request;
        let max_attempts = self.config.retry.max_attempts;

        let result = retry_on(
            &self.config.retry,
            clock,
            move |_attempt| async move {
                let wait = throttle.wait_needed(clock.now_ms());
                if wait > 0 {
                    if let Some(bus) = bus {
                        bus.emit(GenerationEvent::Throttled { wait_ms: wait });
                    }
                }
                throttle.acquire(clock).await;
                model.generate(req).await
            },
            SitegenError::is_rate_limit,
            move |attempt, delay_ms| {
                log::warn!(
                    "Rate limit hit, waiting {}s before attempt {}/{}",
                    delay_ms / 1000,
                    attempt + 1,
                    max_attempts
                );
                if let Some(bus) = bus {
                    bus.emit(GenerationEvent::Retrying {
                        attempt,
                        max_attempts,
                        delay_ms,
                    });
                }
            },
        )
        .await;

        match result {
            Ok(reply) => {
                if let Some(session) = self.session.as_mut() {
                    session.history.push(user_turn);
                    session.history.push(ModelTurn::model(reply.clone()));
                }
                Ok(reply)
            }
            Err(e @ SitegenError::RetriesExhausted { .. }) => Err(e),
            Err(e) => Err(SitegenError::Request(Box::new(e))),
        }
    }

    async fn ensure_session(&mut self) -> Result<()> {
        let api_key = self.credentials.resolve().await?;
        let same_key = self.session.as_ref().map(|s| s.api_key == api_key);
        match same_key {
            Some(true) => {}
            Some(false) => {
                log::info!("API key changed, restarting generation session");
                self.reset();
                self.session = Some(ChatSession::new(api_key));
            }
            None => {
                self.session = Some(ChatSession::new(api_key));
                log::info!("Generation session started (model {})", self.config.model);
            }
        }
        Ok(())
    }
}
