//! Tutoring sessions: named problems with their chat and last scene.
//!
//! The store is a plain list kept most-recent-first and saved as JSON next to
//! the settings file.

use std::path::PathBuf;

use shared::{ChatMessage, ChatRole, ObjectId, Session};

/// Milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    active: Option<ObjectId>,
    /// Where to persist; `None` keeps the store in memory (tests, harness)
    path: Option<PathBuf>,
}

impl SessionStore {
    /// In-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "geotutor", "geotutor")
            .map(|dirs| dirs.data_dir().join("sessions.json"))
    }

    /// Load persisted sessions and activate the most recent one.
    pub fn load() -> Self {
        let path = Self::default_path();
        let sessions = path
            .as_ref()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|json| match serde_json::from_str::<Vec<Session>>(&json) {
                Ok(sessions) => Some(sessions),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable sessions file: {e}");
                    None
                }
            })
            .unwrap_or_default();
        let mut store = Self::from_sessions(sessions);
        store.path = path;
        tracing::info!("Loaded {} session(s)", store.sessions.len());
        store
    }

    /// Store over existing sessions, most recent one active
    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        let active = sessions
            .iter()
            .max_by_key(|s| s.last_modified)
            .map(|s| s.id.clone());
        Self {
            sessions,
            active,
            path: None,
        }
    }

    /// Write all sessions to disk (no-op for in-memory stores)
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string(&self.sessions) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!("Failed to save sessions: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize sessions: {e}"),
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Session> {
        let id = self.active.as_ref()?;
        self.sessions.iter().find(|s| &s.id == id)
    }

    /// New session at the top of the list, greeted by the tutor and active.
    pub fn create(&mut self, name: impl Into<String>, welcome: &str) -> ObjectId {
        let now = now_ms();
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            0,
            Session {
                id: id.clone(),
                name: name.into(),
                scene: None,
                current_step_index: 0,
                messages: vec![ChatMessage {
                    id: uuid::Uuid::new_v4().to_string(),
                    role: ChatRole::Model,
                    text: welcome.to_string(),
                    timestamp: now,
                    is_error: false,
                }],
                last_modified: now,
            },
        );
        self.active = Some(id.clone());
        id
    }

    /// Activate a session; unknown ids are ignored.
    pub fn switch(&mut self, id: &str) -> bool {
        if self.sessions.iter().any(|s| s.id == id) {
            self.active = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Remove a session. Deleting the active one activates the first
    /// remaining session.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return false;
        }
        if self.active.as_deref() == Some(id) {
            self.active = self.sessions.first().map(|s| s.id.clone());
        }
        true
    }

    /// Modify a session and bump its timestamp; returns false for unknown ids.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut Session)) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                f(session);
                session.last_modified = now_ms();
                true
            }
            None => false,
        }
    }

    pub fn update_active(&mut self, f: impl FnOnce(&mut Session)) -> bool {
        match self.active.clone() {
            Some(id) => self.update(&id, f),
            None => false,
        }
    }
}
