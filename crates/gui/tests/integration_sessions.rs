//! Integration tests for sessions and generator results.
//!
//! Generator answers are fed straight into the chat channel, so no server is
//! needed.

use geotutor_gui_lib::fixtures;
use geotutor_gui_lib::harness::TestHarness;
use geotutor_gui_lib::state::chat::GenerationResult;
use shared::{ChatRole, GenerateError, GenerateRequest};

fn request(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        prompt: prompt.to_string(),
        history: String::new(),
        image: None,
    }
}

#[test]
fn test_new_harness_has_one_session() {
    let h = TestHarness::new();
    assert_eq!(h.state.sessions.len(), 1);
    let session = h.state.sessions.active().unwrap();
    assert!(session.scene.is_none());
    assert_eq!(session.messages.len(), 1);
    assert_eq!(session.messages[0].role, ChatRole::Model);
}

#[test]
fn test_generation_fills_active_session() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::triangle_abc());

    let session = h.state.sessions.active().unwrap();
    assert_eq!(session.scene.as_ref(), h.scene());
    // The scene's own message is the tutor's reply
    let last = session.messages.last().unwrap();
    assert_eq!(last.role, ChatRole::Model);
    assert_eq!(last.text, "Tam giác ABC vuông tại A");
    assert!(!h.state.chat.is_loading);
}

#[test]
fn test_failure_keeps_scene_and_allows_retry() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::segment_ab());
    h.fail_generation(GenerateError::Transport("connection refused".to_string()));

    assert_eq!(h.scene().unwrap().points.len(), 2);
    let last = h.state.sessions.active().unwrap().messages.last().unwrap();
    assert!(last.is_error);
    assert!(h.state.chat.can_retry());
    assert_eq!(h.state.chat.last_failed_input.as_deref(), Some("retry me"));
}

#[test]
fn test_result_for_background_session() {
    let mut h = TestHarness::new();
    let first = h.state.active_session_id().unwrap();
    let second = h.new_session();
    assert_ne!(first, second);

    // Answer arrives for the first session while the second is shown
    h.state.chat.deliver(GenerationResult {
        session_id: first.clone(),
        request: request("ve tam giac"),
        result: Ok(fixtures::triangle_abc()),
    });
    h.state.poll_chat();

    assert!(h.scene().is_none());
    let stored = h
        .state
        .sessions
        .sessions()
        .iter()
        .find(|s| s.id == first)
        .unwrap();
    assert_eq!(stored.scene.as_ref().unwrap().points.len(), 3);

    assert!(h.state.switch_session(&first));
    assert_eq!(h.scene().unwrap().points.len(), 3);
}

#[test]
fn test_switching_keeps_scenes_apart() {
    let mut h = TestHarness::new();
    let first = h.state.active_session_id().unwrap();
    h.load_scene(fixtures::segment_ab());

    let second = h.new_session();
    assert!(h.scene().is_none());
    h.load_scene(fixtures::pyramid());

    assert!(h.state.switch_session(&first));
    assert_eq!(h.scene().unwrap().points.len(), 2);
    assert!(!h.state.switch_session(&first));

    assert!(h.state.switch_session(&second));
    assert_eq!(h.scene().unwrap().points.len(), 5);
}

#[test]
fn test_session_switch_resets_camera() {
    let mut h = TestHarness::new();
    let first = h.state.active_session_id().unwrap();
    h.load_scene(fixtures::segment_ab());
    h.new_session();
    h.load_scene(fixtures::triangle_abc());
    h.zoom_in();
    h.zoom_in();

    h.state.switch_session(&first);
    h.state.canvas.prepare(h.state.scene.scene());
    assert_eq!(h.view().scale, 30.0);
}

#[test]
fn test_strokes_persist_per_session() {
    let mut h = TestHarness::new();
    let first = h.state.active_session_id().unwrap();
    h.load_scene(fixtures::with_stroke(fixtures::segment_ab()));
    assert_eq!(h.stroke_count(), 1);

    h.new_session();
    h.load_scene(fixtures::segment_ab());
    assert_eq!(h.stroke_count(), 0);

    h.state.switch_session(&first);
    assert_eq!(h.stroke_count(), 1);
}

#[test]
fn test_step_index_restored_on_switch() {
    let mut h = TestHarness::new();
    let first = h.state.active_session_id().unwrap();
    h.load_scene(fixtures::pyramid());
    h.state.next_step();
    assert_eq!(h.state.scene.current_step(), 1);

    h.new_session();
    assert_eq!(h.state.scene.current_step(), 0);

    h.state.switch_session(&first);
    assert_eq!(h.state.scene.current_step(), 1);
}
