//! HTTP client for the tutor server's scene generator.

use std::path::Path;
use std::time::Duration;

use base64::Engine;
use shared::{GenerateError, GenerateErrorBody, GenerateRequest, ImageAttachment, Scene};

#[derive(Clone)]
pub struct GeneratorClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeneratorClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/generate`
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Scene, GenerateError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;
        decode_response(status, &body)
    }
}

/// Map a generator HTTP response back to a scene or a typed failure.
pub fn decode_response(status: u16, body: &str) -> Result<Scene, GenerateError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| GenerateError::MalformedPayload(e.to_string()));
    }
    match serde_json::from_str::<GenerateErrorBody>(body) {
        Ok(error) => Err(error.into()),
        Err(_) => Err(GenerateError::Upstream(format!("HTTP {status}: {}", body.trim()))),
    }
}

/// MIME type for a problem photo, from its file extension
pub fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// Encode raw image bytes for the generator request
pub fn encode_image(bytes: &[u8], mime_type: &str) -> ImageAttachment {
    ImageAttachment {
        mime_type: mime_type.to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}

/// Read a photo from disk as an attachment
pub fn load_image(path: &Path) -> Result<ImageAttachment, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    Ok(encode_image(&bytes, image_mime_type(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scene() {
        let scene = decode_response(200, r#"{"points": [{"id": "A", "x": 1, "y": 2}]}"#).unwrap();
        assert_eq!(scene.points.len(), 1);
        assert_eq!(scene.points[0].z, 0.0);
    }

    #[test]
    fn test_decode_typed_error() {
        let err = decode_response(503, r#"{"kind": "missing_credential", "message": "no key"}"#)
            .unwrap_err();
        assert_eq!(err, GenerateError::MissingCredential);

        let err = decode_response(422, r#"{"kind": "malformed_payload", "message": "bad"}"#)
            .unwrap_err();
        assert_eq!(err, GenerateError::MalformedPayload("bad".into()));
    }

    #[test]
    fn test_decode_untyped_error() {
        let err = decode_response(500, "Internal Server Error").unwrap_err();
        assert_eq!(
            err,
            GenerateError::Upstream("HTTP 500: Internal Server Error".into())
        );
    }

    #[test]
    fn test_decode_bad_success_body() {
        let err = decode_response(200, "{}").unwrap_err();
        assert!(matches!(err, GenerateError::MalformedPayload(_)));
    }

    #[test]
    fn test_base_url_trimmed() {
        let client = GeneratorClient::new("http://localhost:3001/", 5);
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn test_image_attachment() {
        assert_eq!(image_mime_type(Path::new("de_bai.PNG")), "image/png");
        assert_eq!(image_mime_type(Path::new("photo")), "image/jpeg");
        let image = encode_image(b"hi", "image/png");
        assert_eq!(image.data, "aGk=");
    }
}
