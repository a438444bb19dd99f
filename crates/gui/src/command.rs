//! JSON command protocol for driving the drawing surface from an agent.
//!
//! Each command maps onto one [`TestHarness`] call; batches run in order.

use serde::{Deserialize, Serialize};
use shared::Scene;

use crate::harness::TestHarness;
use crate::interaction::{PointerId, DRAWING_COLORS};

fn mouse() -> PointerId {
    crate::harness::MOUSE
}

/// A command the agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Show a scene in the active session
    LoadScene { scene: Scene },
    /// Press at canvas pixel coordinates
    PointerDown {
        #[serde(default = "mouse")]
        pointer: PointerId,
        x: f32,
        y: f32,
    },
    PointerMove {
        #[serde(default = "mouse")]
        pointer: PointerId,
        x: f32,
        y: f32,
    },
    PointerUp {
        #[serde(default = "mouse")]
        pointer: PointerId,
    },
    PointerCancel {
        #[serde(default = "mouse")]
        pointer: PointerId,
    },
    ZoomIn,
    ZoomOut,
    /// Mouse wheel; positive zooms in
    Wheel { delta: f32 },
    /// Rotate a 3D scene by whole rotate-button steps
    Rotate { steps: i32 },
    Pan { dx: f32, dy: f32 },
    ResetView,
    ToggleDrawing,
    TogglePan,
    /// Pen color, one of the palette colors
    SetColor { color: String },
    EraseDrawings,
    Undo,
    Redo,
    NextStep,
    PrevStep,
    NewSession,
    /// Camera, gesture, selection and projected points
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::LoadScene { scene } => {
            let dangling = scene.dangling_references().len();
            harness.load_scene(scene);
            CommandResponse::ok_with_data(serde_json::json!({ "dangling": dangling }))
        }

        AgentCommand::PointerDown { pointer, x, y } => {
            if harness.scene().is_none() {
                return CommandResponse::err("No scene loaded");
            }
            harness.pointer_down(pointer, x, y);
            CommandResponse::ok_with_data(serde_json::json!({ "gesture": harness.gesture().name() }))
        }

        AgentCommand::PointerMove { pointer, x, y } => {
            harness.pointer_move(pointer, x, y);
            CommandResponse::ok()
        }

        AgentCommand::PointerUp { pointer } => {
            harness.pointer_up(pointer);
            CommandResponse::ok_with_data(serde_json::json!({ "strokes": harness.stroke_count() }))
        }

        AgentCommand::PointerCancel { pointer } => {
            harness.pointer_cancel(pointer);
            CommandResponse::ok()
        }

        AgentCommand::ZoomIn => {
            harness.zoom_in();
            CommandResponse::ok_with_data(serde_json::json!({ "scale": harness.view().scale }))
        }

        AgentCommand::ZoomOut => {
            harness.zoom_out();
            CommandResponse::ok_with_data(serde_json::json!({ "scale": harness.view().scale }))
        }

        AgentCommand::Wheel { delta } => {
            harness.wheel(delta);
            CommandResponse::ok_with_data(serde_json::json!({ "scale": harness.view().scale }))
        }

        AgentCommand::Rotate { steps } => {
            let rotated = harness.rotate(steps);
            CommandResponse::ok_with_data(serde_json::json!({ "rotated": rotated }))
        }

        AgentCommand::Pan { dx, dy } => {
            harness.pan(dx, dy);
            CommandResponse::ok()
        }

        AgentCommand::ResetView => {
            harness.reset_view();
            CommandResponse::ok()
        }

        AgentCommand::ToggleDrawing => {
            harness.state.canvas.toggle_drawing_mode();
            let on = harness.state.canvas.interaction.is_drawing_mode();
            CommandResponse::ok_with_data(serde_json::json!({ "drawing": on }))
        }

        AgentCommand::TogglePan => {
            harness.state.canvas.toggle_pan_mode();
            let on = harness.state.canvas.interaction.is_pan_mode();
            CommandResponse::ok_with_data(serde_json::json!({ "pan": on }))
        }

        AgentCommand::SetColor { color } => {
            if !DRAWING_COLORS.iter().any(|c| c.eq_ignore_ascii_case(&color)) {
                return CommandResponse::err(format!("Unknown pen color {color}"));
            }
            harness.state.canvas.interaction.set_drawing_color(color);
            CommandResponse::ok()
        }

        AgentCommand::EraseDrawings => {
            harness.erase_drawings();
            CommandResponse::ok_with_data(serde_json::json!({ "strokes": harness.stroke_count() }))
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::NextStep => {
            harness.state.next_step();
            CommandResponse::ok_with_data(serde_json::json!({ "step": harness.state.scene.current_step() }))
        }

        AgentCommand::PrevStep => {
            harness.state.prev_step();
            CommandResponse::ok_with_data(serde_json::json!({ "step": harness.state.scene.current_step() }))
        }

        AgentCommand::NewSession => {
            let id = harness.new_session();
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        AgentCommand::Inspect => inspect(harness),

        AgentCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

fn inspect(harness: &mut TestHarness) -> CommandResponse {
    let view = *harness.view();
    let mut points: Vec<serde_json::Value> = Vec::new();
    let ids: Vec<String> = harness
        .scene()
        .map(|s| s.points.iter().map(|p| p.id.clone()).collect())
        .unwrap_or_default();
    for id in ids {
        if let Some(pos) = harness.projection_of(&id) {
            points.push(serde_json::json!({ "id": id, "x": pos.x, "y": pos.y }));
        }
    }
    let frame = harness.frame();
    CommandResponse::ok_with_data(serde_json::json!({
        "has_scene": harness.scene().is_some(),
        "camera": {
            "rotation_x": view.rotation_x,
            "rotation_y": view.rotation_y,
            "scale": view.scale,
            "pan": [view.pan.x, view.pan.y],
        },
        "gesture": harness.gesture().name(),
        "selected": harness.selected_ids(),
        "points": points,
        "strokes": harness.stroke_count(),
        "step": harness.state.scene.current_step(),
        "draw_items": frame.items.len(),
        "skipped": frame.skipped,
    }))
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::Undo));
    }

    #[test]
    fn test_command_serde_pointer_default() {
        let json = r#"{"command": "pointer_down", "x": 10, "y": 20}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::PointerDown { pointer, x, y } => {
                assert_eq!(pointer, 0);
                assert_eq!((x, y), (10.0, 20.0));
            }
            _ => panic!("Expected PointerDown"),
        }
    }

    #[test]
    fn test_execute_load_scene() {
        let mut h = TestHarness::new();
        let json = serde_json::json!({
            "command": "load_scene",
            "scene": fixtures::dangling_edge(),
        })
        .to_string();
        let resp = execute_json(&mut h, &json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["dangling"], 1);
        assert!(h.scene().is_some());
    }

    #[test]
    fn test_pointer_without_scene_fails() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "pointer_down", "x": 1, "y": 1}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = TestHarness::new();
        h.load_scene(fixtures::triangle_abc());
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["points"].as_array().map(Vec::len), Some(3));
        assert_eq!(data["gesture"], "idle");
        assert_eq!(data["skipped"], 0);
    }

    #[test]
    fn test_set_color_validated() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r##"{"command": "set_color", "color": "#123456"}"##).unwrap();
        assert!(!resp.success);
        let resp = execute_json(&mut h, r##"{"command": "set_color", "color": "#3B82F6"}"##).unwrap();
        assert!(resp.success);
    }

    #[test]
    fn test_execute_export_scene() {
        let mut h = TestHarness::new();
        h.load_scene(fixtures::segment_ab());
        let resp = execute_json(&mut h, r#"{"command": "export_scene"}"#).unwrap();
        let data = resp.data.unwrap();
        let scene_json = data["scene_json"].as_str().unwrap();
        assert!(scene_json.contains("\"points\""));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}
