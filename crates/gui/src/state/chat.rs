//! Chat with the tutor: sends problems to the generator off the UI thread
//! and folds results back into sessions when polled.

use shared::{ChatMessage, ChatRole, GenerateError, GenerateRequest, ImageAttachment, ObjectId, Scene};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::scene::SceneState;
use super::sessions::{now_ms, SessionStore};
use crate::client::GeneratorClient;
use crate::i18n::t;

/// Generator answer for the session that asked
#[derive(Debug)]
pub struct GenerationResult {
    pub session_id: ObjectId,
    pub request: GenerateRequest,
    pub result: Result<Scene, GenerateError>,
}

/// Localized apology for a failed generation
pub fn apology(error: &GenerateError) -> &'static str {
    match error {
        GenerateError::MissingCredential => t("chat.error_credential"),
        GenerateError::Transport(_) => t("chat.error_offline"),
        _ => t("chat.error_generic"),
    }
}

pub struct ChatState {
    pub input: String,
    pub is_loading: bool,
    /// Prompt of the last failed request, shown next to the retry button
    pub last_failed_input: Option<String>,
    /// Photo to send with the next message
    pub pending_image: Option<ImageAttachment>,
    client: GeneratorClient,
    /// Built on first send
    runtime: Option<tokio::runtime::Runtime>,
    failed_request: Option<(ObjectId, GenerateRequest)>,
    tx: UnboundedSender<GenerationResult>,
    rx: UnboundedReceiver<GenerationResult>,
}

impl Default for ChatState {
    fn default() -> Self {
        let server = super::settings::ServerSettings::default();
        Self::new(&server.url, server.timeout_secs)
    }
}

impl ChatState {
    pub fn new(server_url: &str, timeout_secs: u64) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            input: String::new(),
            is_loading: false,
            last_failed_input: None,
            pending_image: None,
            client: GeneratorClient::new(server_url, timeout_secs),
            runtime: None,
            failed_request: None,
            tx,
            rx,
        }
    }

    /// Point at a different tutor server
    pub fn set_server(&mut self, server_url: &str, timeout_secs: u64) {
        self.client = GeneratorClient::new(server_url, timeout_secs);
    }

    pub fn server_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn can_retry(&self) -> bool {
        !self.is_loading && self.failed_request.is_some()
    }

    /// Post the input (and pending image) to the active session and build the
    /// generator request. Returns `None` when there is nothing to send.
    pub fn prepare_message(&mut self, sessions: &mut SessionStore) -> Option<(ObjectId, GenerateRequest)> {
        if self.is_loading {
            return None;
        }
        let text = self.input.trim().to_string();
        if text.is_empty() && self.pending_image.is_none() {
            return None;
        }
        let session = sessions.active()?;
        let session_id = session.id.clone();
        let history = session.history_text();

        sessions.update(&session_id, |s| s.messages.push(message(ChatRole::User, text.clone(), false)));
        sessions.save();
        self.input.clear();

        let request = GenerateRequest {
            prompt: text,
            history,
            image: self.pending_image.take(),
        };
        Some((session_id, request))
    }

    /// Send the input to the generator on behalf of the active session.
    pub fn send_message(&mut self, sessions: &mut SessionStore) {
        if let Some((session_id, request)) = self.prepare_message(sessions) {
            self.dispatch(session_id, request);
        }
    }

    /// Re-send the last failed request
    pub fn retry(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some((session_id, request)) = self.failed_request.take() {
            self.last_failed_input = None;
            self.dispatch(session_id, request);
        }
    }

    fn dispatch(&mut self, session_id: ObjectId, request: GenerateRequest) {
        self.is_loading = true;
        tracing::info!("Requesting scene for session {session_id}");

        if self.runtime.is_none() {
            match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
            {
                Ok(rt) => self.runtime = Some(rt),
                Err(e) => {
                    tracing::error!("Failed to start async runtime: {e}");
                    self.deliver(GenerationResult {
                        session_id,
                        request,
                        result: Err(GenerateError::Transport(e.to_string())),
                    });
                    return;
                }
            }
        }
        let Some(runtime) = &self.runtime else {
            return;
        };

        let client = self.client.clone();
        let tx = self.tx.clone();
        runtime.spawn(async move {
            let result = client.generate(&request).await;
            let _ = tx.send(GenerationResult {
                session_id,
                request,
                result,
            });
        });
    }

    /// Queue a result as if the generator had answered
    pub fn deliver(&mut self, result: GenerationResult) {
        self.is_loading = true;
        let _ = self.tx.send(result);
    }

    /// Apply finished generations. Returns true when the active session's
    /// scene was replaced.
    pub fn poll_responses(&mut self, sessions: &mut SessionStore, scene: &mut SceneState) -> bool {
        let mut active_changed = false;
        while let Ok(GenerationResult {
            session_id,
            request,
            result,
        }) = self.rx.try_recv()
        {
            self.is_loading = false;
            let is_active = sessions.active_id() == Some(session_id.as_str());

            match result {
                Ok(generated) => {
                    tracing::info!("Scene received: {}", generated.summary());
                    let reply = generated
                        .message
                        .clone()
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| t("chat.done").to_string());
                    if is_active {
                        scene.replace(Some(generated.clone()), 0);
                        active_changed = true;
                    }
                    sessions.update(&session_id, |s| {
                        s.messages.push(message(ChatRole::Model, reply, false));
                        s.scene = Some(generated);
                        s.current_step_index = 0;
                    });
                    self.last_failed_input = None;
                    self.failed_request = None;
                }
                Err(error) => {
                    // The last good scene stays on screen
                    tracing::error!("Scene generation failed: {error}");
                    sessions.update(&session_id, |s| {
                        s.messages.push(message(ChatRole::Model, apology(&error).to_string(), true));
                    });
                    self.last_failed_input = Some(request.prompt.clone());
                    self.failed_request = Some((session_id, request));
                }
            }
            sessions.save();
        }
        active_changed
    }
}

fn message(role: ChatRole, text: String, is_error: bool) -> ChatMessage {
    ChatMessage {
        id: uuid::Uuid::new_v4().to_string(),
        role,
        text,
        timestamp: now_ms(),
        is_error,
    }
}
