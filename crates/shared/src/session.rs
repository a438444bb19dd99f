//! Session records: one tutoring conversation and its last scene.

use serde::{Deserialize, Serialize};

use crate::{ObjectId, Scene};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: ObjectId,
    pub role: ChatRole,
    pub text: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    #[serde(default)]
    pub is_error: bool,
}

/// A named problem with its conversation and last generated scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub scene: Option<Scene>,
    #[serde(default)]
    pub current_step_index: usize,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub last_modified: u64,
}

impl Session {
    /// Chat history formatted for the generator, one message per line
    pub fn history_text(&self) -> String {
        self.messages
            .iter()
            .filter(|m| !m.is_error)
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
