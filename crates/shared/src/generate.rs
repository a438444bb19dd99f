//! Contract of the scene generator: request shape and failure taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Photo of the problem statement, base64 encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: String,
}

impl ImageAttachment {
    /// Accepts either raw base64 or a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(input: &str) -> Self {
        match input.split_once("base64,") {
            Some((head, payload)) => {
                let mime_type = head
                    .strip_prefix("data:")
                    .map(|m| m.trim_end_matches(';'))
                    .filter(|m| !m.is_empty())
                    .unwrap_or("image/jpeg");
                Self {
                    mime_type: mime_type.to_string(),
                    data: payload.to_string(),
                }
            }
            None => Self {
                mime_type: "image/jpeg".to_string(),
                data: input.to_string(),
            },
        }
    }
}

/// Request sent to `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Earlier chat messages, one per line
    #[serde(default)]
    pub history: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,
}

/// Why a scene could not be generated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("the model returned no payload")]
    EmptyResponse,
    #[error("the model payload is not a scene: {0}")]
    MalformedPayload(String),
    #[error("model service error: {0}")]
    Upstream(String),
    #[error("could not reach the tutor server: {0}")]
    Transport(String),
}

/// Machine-readable error kind carried in error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateErrorKind {
    MissingCredential,
    EmptyResponse,
    MalformedPayload,
    Upstream,
    Transport,
}

/// JSON body of a failed `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateErrorBody {
    pub kind: GenerateErrorKind,
    pub message: String,
}

impl GenerateError {
    pub fn kind(&self) -> GenerateErrorKind {
        match self {
            GenerateError::MissingCredential => GenerateErrorKind::MissingCredential,
            GenerateError::EmptyResponse => GenerateErrorKind::EmptyResponse,
            GenerateError::MalformedPayload(_) => GenerateErrorKind::MalformedPayload,
            GenerateError::Upstream(_) => GenerateErrorKind::Upstream,
            GenerateError::Transport(_) => GenerateErrorKind::Transport,
        }
    }

    /// HTTP status used by the server for this failure
    pub fn http_status(&self) -> u16 {
        match self {
            GenerateError::MissingCredential => 503,
            GenerateError::EmptyResponse | GenerateError::Upstream(_) => 502,
            GenerateError::MalformedPayload(_) => 422,
            GenerateError::Transport(_) => 504,
        }
    }

    pub fn to_body(&self) -> GenerateErrorBody {
        GenerateErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

impl From<GenerateErrorBody> for GenerateError {
    fn from(body: GenerateErrorBody) -> Self {
        match body.kind {
            GenerateErrorKind::MissingCredential => GenerateError::MissingCredential,
            GenerateErrorKind::EmptyResponse => GenerateError::EmptyResponse,
            GenerateErrorKind::MalformedPayload => GenerateError::MalformedPayload(body.message),
            GenerateErrorKind::Upstream => GenerateError::Upstream(body.message),
            GenerateErrorKind::Transport => GenerateError::Transport(body.message),
        }
    }
}
