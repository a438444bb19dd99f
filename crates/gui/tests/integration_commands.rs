//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use geotutor_gui_lib::command::{execute_json, execute_json_batch};
use geotutor_gui_lib::fixtures;
use geotutor_gui_lib::harness::TestHarness;

fn load_command(scene: &shared::Scene) -> String {
    serde_json::json!({ "command": "load_scene", "scene": scene }).to_string()
}

#[test]
fn test_command_load_and_inspect() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, &load_command(&fixtures::triangle_abc())).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["dangling"], 0);

    let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["has_scene"], true);
    assert_eq!(data["camera"]["scale"], 30.0);
    assert_eq!(data["points"].as_array().unwrap().len(), 3);
    assert_eq!(data["gesture"], "idle");
    assert_eq!(data["skipped"], 0);
}

#[test]
fn test_command_reports_dangling() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, &load_command(&fixtures::dangling_edge())).unwrap();
    assert_eq!(resp.data.unwrap()["dangling"], 1);

    let data = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap().data.unwrap();
    assert_eq!(data["skipped"], 1);
}

#[test]
fn test_command_pointer_without_scene() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "pointer_down", "x": 10, "y": 10}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.is_some());
}

#[test]
fn test_command_invalid_json() {
    let mut h = TestHarness::new();
    assert!(execute_json(&mut h, r#"{"command": "fly_away"}"#).is_err());
    assert!(execute_json(&mut h, "not json").is_err());
}

#[test]
fn test_command_rejects_unknown_color() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, r##"{"command": "set_color", "color": "#123456"}"##).unwrap();
    assert!(!resp.success);

    let resp = execute_json(&mut h, r##"{"command": "set_color", "color": "#3b82f6"}"##).unwrap();
    assert!(resp.success);
    assert_eq!(h.state.canvas.interaction.drawing_color(), "#3b82f6");
}

#[test]
fn test_command_full_workflow_via_json_batch() {
    let mut h = TestHarness::new();
    execute_json(&mut h, &load_command(&fixtures::segment_ab())).unwrap();

    let json = r#"[
        {"command": "toggle_drawing"},
        {"command": "pointer_down", "x": 40, "y": 40},
        {"command": "pointer_move", "x": 60, "y": 45},
        {"command": "pointer_move", "x": 80, "y": 60},
        {"command": "pointer_up"},
        {"command": "undo"},
        {"command": "redo"},
        {"command": "export_scene"}
    ]"#;

    let results = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|r| r.success));

    assert_eq!(results[1].data.as_ref().unwrap()["gesture"], "drawing_stroke");
    assert_eq!(results[4].data.as_ref().unwrap()["strokes"], 1);
    assert_eq!(results[5].data.as_ref().unwrap()["undone"], true);
    assert_eq!(results[6].data.as_ref().unwrap()["redone"], true);

    let exported = results[7].data.as_ref().unwrap()["scene_json"].as_str().unwrap();
    let scene: shared::Scene = serde_json::from_str(exported).unwrap();
    assert_eq!(scene.drawings.len(), 1);
    assert_eq!(scene.drawings[0].points.len(), 3);
}

#[test]
fn test_command_camera_controls() {
    let mut h = TestHarness::new();
    execute_json(&mut h, &load_command(&fixtures::pyramid())).unwrap();

    let json = r#"[
        {"command": "rotate", "steps": 2},
        {"command": "zoom_in"},
        {"command": "pan", "dx": 10, "dy": 0},
        {"command": "inspect"},
        {"command": "reset_view"},
        {"command": "inspect"}
    ]"#;
    let results = execute_json_batch(&mut h, json).unwrap();

    let camera = &results[3].data.as_ref().unwrap()["camera"];
    assert_eq!(camera["rotation_y"], 75.0);
    assert!((camera["scale"].as_f64().unwrap() - 30.0).abs() < 1e-3);

    let camera = &results[5].data.as_ref().unwrap()["camera"];
    assert_eq!(camera["rotation_x"], 15.0);
    assert_eq!(camera["rotation_y"], 45.0);
    assert_eq!(camera["scale"], 25.0);
}

#[test]
fn test_command_steps_and_sessions() {
    let mut h = TestHarness::new();
    execute_json(&mut h, &load_command(&fixtures::pyramid())).unwrap();

    let json = r#"[
        {"command": "next_step"},
        {"command": "next_step"},
        {"command": "prev_step"},
        {"command": "new_session"},
        {"command": "inspect"}
    ]"#;
    let results = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(results[0].data.as_ref().unwrap()["step"], 1);
    // Clamped at the last step
    assert_eq!(results[1].data.as_ref().unwrap()["step"], 1);
    assert_eq!(results[2].data.as_ref().unwrap()["step"], 0);
    assert!(results[3].data.as_ref().unwrap()["id"].is_string());
    assert_eq!(results[4].data.as_ref().unwrap()["has_scene"], false);
    assert_eq!(h.state.sessions.len(), 2);
}
