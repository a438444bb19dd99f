use shared::{GenerateError, GenerateRequest, Scene};

use crate::AppState;

const SYSTEM_PROMPT: &str = r#"
Bạn là "Gia Sư Toán THCS" chuyên nghiệp, am hiểu chương trình Toán lớp 6, 7, 8, 9 của Việt Nam.

Ngôn ngữ:
- Dùng thuật ngữ toán học chính thống ("Xét tam giác ABC", "Ta có", "Suy ra", "Theo định lý Py-ta-go").
- Trong 'mathSolution' dùng ký hiệu chuẩn: ∆ABC, ∠ABC, ⊥, ∥, ≡, ∽.
- Lời giải có lập luận từng bước, trích dẫn định lý trong ngoặc đơn, kết luận rõ cho từng ý.

Nhiệm vụ:
1. Vẽ hình chính xác, tỷ lệ chuẩn, gắn nhãn điểm đầy đủ (A, B, C...).
2. Đưa ra câu hỏi gợi ý (reasoning) để học sinh tự tư duy.
3. Trình bày lời giải chi tiết (mathSolution).
4. Với đường tròn: chọn tâm và bán kính sao cho hình vẽ cân đối.

Respond with a single JSON object and nothing else:
{
  "points":  [{ "id": str, "x": num, "y": num, "z": num (0 for 2D), "label"?: str, "color"?: hex }],
  "edges":   [{ "id": str, "from": pointId, "to": pointId, "color"?: hex, "label"?: str,
                "marker"?: "tick" | "double-tick" | "arrow" | "double-arrow" }],
  "faces":   [{ "id": str, "pointIds": [pointId], "color"?: hex, "opacity"?: num }],
  "angles":  [{ "id": str, "centerId": pointId, "arm1Id": pointId, "arm2Id": pointId,
                "type": "right" | "arc" | "double-arc", "label"?: str }],
  "circles": [{ "id": str, "centerId": pointId, "radius": num, "color"?: hex, "label"?: str, "isDashed"?: bool }],
  "steps":   [{ "stepNumber": int, "description": str, "activeElementIds": [id] }],
  "reasoning": [{ "id": str, "question": str, "answer": str }],
  "type": "2D" | "3D",
  "message": str,
  "mathSolution": str
}
"#;

/// Ask the hosted model for a scene describing the student's problem.
pub async fn generate_scene(
    state: &AppState,
    request: &GenerateRequest,
) -> Result<Scene, GenerateError> {
    let api_key = state
        .ai_api_key
        .as_ref()
        .ok_or(GenerateError::MissingCredential)?;

    let mut content = vec![serde_json::json!({
        "type": "text",
        "text": format!(
            "Lịch sử chat:\n{}\n\nYêu cầu mới của học sinh: {}",
            request.history, request.prompt
        ),
    })];
    if let Some(image) = &request.image {
        content.push(serde_json::json!({
            "type": "image",
            "source": {
                "type": "base64",
                "media_type": image.mime_type,
                "data": image.data,
            }
        }));
    }

    let response = state
        .http
        .post(&state.api_url)
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "model": state.model,
            "max_tokens": 8192,
            "temperature": 0.1,
            "system": SYSTEM_PROMPT,
            "messages": [{ "role": "user", "content": content }]
        }))
        .send()
        .await
        .map_err(|e| GenerateError::Upstream(e.to_string()))?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| GenerateError::Upstream(e.to_string()))?;

    if !status.is_success() {
        let detail = body["error"]["message"].as_str().unwrap_or("unknown error");
        return Err(GenerateError::Upstream(format!("{status}: {detail}")));
    }

    let text = extract_text(&body).ok_or(GenerateError::EmptyResponse)?;
    let scene = parse_scene_payload(text)?;
    tracing::info!(
        "Generated {} scene: {}",
        if scene.kind.is_3d() { "3D" } else { "2D" },
        scene.summary()
    );
    Ok(scene)
}

/// First non-empty text block of a messages API response
fn extract_text(body: &serde_json::Value) -> Option<&str> {
    body["content"]
        .as_array()?
        .iter()
        .filter_map(|block| block["text"].as_str())
        .map(str::trim)
        .find(|text| !text.is_empty())
}

/// Parse the model's JSON, tolerating a surrounding Markdown code fence.
pub fn parse_scene_payload(text: &str) -> Result<Scene, GenerateError> {
    let json = strip_code_fence(text);
    if json.is_empty() {
        return Err(GenerateError::EmptyResponse);
    }
    let scene: Scene =
        serde_json::from_str(json).map_err(|e| GenerateError::MalformedPayload(e.to_string()))?;
    Ok(normalize(scene))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Optional info word ("json"); the body may follow on the same line
    let body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    body.trim().trim_end_matches("```").trim()
}

/// Freehand strokes are user-authored only; step numbers default to list order.
fn normalize(mut scene: Scene) -> Scene {
    scene.drawings.clear();
    for (i, step) in scene.steps.iter_mut().enumerate() {
        if step.step_number == 0 {
            step.step_number = i as u32 + 1;
        }
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "points": [{"id": "A", "x": 0, "y": 0, "z": 0, "label": "A"},
                   {"id": "B", "x": 3, "y": 0, "z": 0, "label": "B"}],
        "edges": [{"id": "AB", "from": "A", "to": "B", "marker": "tick"}],
        "steps": [{"description": "Vẽ đoạn AB", "activeElementIds": ["AB"]}],
        "type": "2D",
        "message": "Xong!"
    }"#;

    #[test]
    fn test_parse_plain_payload() {
        let scene = parse_scene_payload(PAYLOAD).unwrap();
        assert_eq!(scene.points.len(), 2);
        assert_eq!(scene.edges.len(), 1);
        assert_eq!(scene.steps[0].step_number, 1);
        assert_eq!(scene.message.as_deref(), Some("Xong!"));
    }

    #[test]
    fn test_parse_fenced_payload() {
        let fenced = format!("```json\n{PAYLOAD}\n```");
        let scene = parse_scene_payload(&fenced).unwrap();
        assert_eq!(scene.points.len(), 2);

        let one_line = parse_scene_payload(r#"```json {"points": [{"id": "A", "x": 0, "y": 0}]}```"#).unwrap();
        assert_eq!(one_line.points.len(), 1);

        let bare = parse_scene_payload(r#"```{"points": []}```"#).unwrap();
        assert!(bare.points.is_empty());
    }

    #[test]
    fn test_parse_malformed_payload() {
        let err = parse_scene_payload("Xin lỗi, thầy chưa hiểu đề bài.").unwrap_err();
        assert!(matches!(err, GenerateError::MalformedPayload(_)));

        let err = parse_scene_payload(r#"{"edges": []}"#).unwrap_err();
        assert!(matches!(err, GenerateError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_empty_payload() {
        let err = parse_scene_payload("```json\n```").unwrap_err();
        assert_eq!(err, GenerateError::EmptyResponse);
    }

    #[test]
    fn test_model_drawings_are_dropped() {
        let json = r##"{"points": [], "drawings": [{"id": "d", "points": [], "color": "#000", "width": 2}]}"##;
        let scene = parse_scene_payload(json).unwrap();
        assert!(scene.drawings.is_empty());
    }

    #[test]
    fn test_extract_text() {
        let body = serde_json::json!({
            "content": [{"type": "text", "text": "  "}, {"type": "text", "text": "{}"}]
        });
        assert_eq!(extract_text(&body), Some("{}"));
        assert_eq!(extract_text(&serde_json::json!({"content": []})), None);
        assert_eq!(extract_text(&serde_json::json!({})), None);
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let state = AppState {
            ai_api_key: None,
            model: "test".into(),
            api_url: "http://127.0.0.1:9".into(),
            http: reqwest::Client::new(),
        };
        let request = GenerateRequest {
            prompt: "Cho hình vuông ABCD".into(),
            history: String::new(),
            image: None,
        };
        let err = generate_scene(&state, &request).await.unwrap_err();
        assert_eq!(err, GenerateError::MissingCredential);
    }
}
