//! Headless test harness for driving the drawing surface programmatically.
//!
//! Wraps an [`AppState`] over in-memory stores with a fixed canvas size, so
//! pointer gestures, camera controls and generator results can be replayed
//! without a window.

use std::collections::HashSet;

use glam::Vec2;
use shared::{GenerateError, GenerateRequest, ObjectId, Scene};

use crate::canvas::CanvasActions;
use crate::interaction::{GestureState, PointerId};
use crate::state::chat::GenerationResult;
use crate::state::{AppSettings, AppState, SessionStore};
use crate::viewport::controller::ViewportState;
use crate::viewport::frame::Frame;

/// Canvas size used unless a test asks otherwise
pub const DEFAULT_WIDTH: f32 = 400.0;
pub const DEFAULT_HEIGHT: f32 = 300.0;

/// Pointer id used by the single-pointer helpers
pub const MOUSE: PointerId = 0;

/// Headless test harness: app state plus a log of spoken texts
pub struct TestHarness {
    pub state: AppState,
    spoken: Vec<String>,
}

impl TestHarness {
    /// Create a harness with one empty session and a 400×300 canvas.
    pub fn new() -> Self {
        let mut state = AppState::with_stores(AppSettings::default(), SessionStore::new());
        state.canvas.set_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        Self {
            state,
            spoken: Vec::new(),
        }
    }

    // ── Scene ─────────────────────────────────────────────────

    /// Show a scene in the active session, as a generator answer would.
    pub fn load_scene(&mut self, scene: Scene) {
        let session_id = self.state.active_session_id().unwrap_or_default();
        self.state.chat.deliver(GenerationResult {
            session_id,
            request: GenerateRequest {
                prompt: String::new(),
                history: String::new(),
                image: None,
            },
            result: Ok(scene),
        });
        self.state.poll_chat();
        self.state.canvas.prepare(self.state.scene.scene());
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene: Scene = serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_scene(scene);
        Ok(())
    }

    /// Feed a generator failure to the active session.
    pub fn fail_generation(&mut self, error: GenerateError) {
        let session_id = self.state.active_session_id().unwrap_or_default();
        self.state.chat.deliver(GenerationResult {
            session_id,
            request: GenerateRequest {
                prompt: "retry me".to_string(),
                history: String::new(),
                image: None,
            },
            result: Err(error),
        });
        self.state.poll_chat();
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> String {
        self.state
            .scene
            .scene()
            .and_then(|s| serde_json::to_string_pretty(s).ok())
            .unwrap_or_default()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.state.scene.scene()
    }

    pub fn stroke_count(&self) -> usize {
        self.scene().map_or(0, |s| s.drawings.len())
    }

    pub fn undo(&mut self) -> bool {
        let can = self.state.scene.can_undo();
        self.state.undo();
        can
    }

    pub fn redo(&mut self) -> bool {
        let can = self.state.scene.can_redo();
        self.state.redo();
        can
    }

    pub fn erase_drawings(&mut self) {
        self.state.erase_drawings();
    }

    pub fn new_session(&mut self) -> ObjectId {
        self.state.new_session()
    }

    // ── Pointer input ─────────────────────────────────────────

    fn apply(&mut self, actions: CanvasActions) {
        self.spoken.extend(actions.spoken.iter().cloned());
        self.state.apply_canvas_actions(actions);
    }

    pub fn pointer_down(&mut self, pointer: PointerId, x: f32, y: f32) {
        let actions = self
            .state
            .canvas
            .pointer_down(self.state.scene.scene(), pointer, Vec2::new(x, y));
        self.apply(actions);
    }

    pub fn pointer_move(&mut self, pointer: PointerId, x: f32, y: f32) {
        let actions = self.state.canvas.pointer_move(pointer, Vec2::new(x, y));
        self.apply(actions);
    }

    pub fn pointer_up(&mut self, pointer: PointerId) {
        let actions = self.state.canvas.pointer_up(self.state.scene.scene(), pointer);
        self.apply(actions);
    }

    pub fn pointer_cancel(&mut self, pointer: PointerId) {
        self.state.canvas.pointer_cancel(pointer);
    }

    /// Press and release without moving
    pub fn tap(&mut self, x: f32, y: f32) {
        self.pointer_down(MOUSE, x, y);
        self.pointer_up(MOUSE);
    }

    /// Press, move in a straight line through `path`, release
    pub fn drag(&mut self, from: Vec2, path: &[Vec2]) {
        self.pointer_down(MOUSE, from.x, from.y);
        for p in path {
            self.pointer_move(MOUSE, p.x, p.y);
        }
        self.pointer_up(MOUSE);
    }

    // ── Camera ────────────────────────────────────────────────

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.state.canvas.set_dimensions(width, height);
        self.state.canvas.prepare(self.state.scene.scene());
    }

    pub fn zoom_in(&mut self) {
        self.state.canvas.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.state.canvas.zoom_out();
    }

    pub fn wheel(&mut self, delta: f32) {
        self.state.canvas.wheel_zoom(delta);
    }

    pub fn rotate(&mut self, steps: i32) -> bool {
        self.state.canvas.rotate(self.state.scene.scene(), steps)
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.state.canvas.pan(Vec2::new(dx, dy));
    }

    pub fn reset_view(&mut self) {
        self.state.canvas.reset_view(self.state.scene.scene());
        self.state.canvas.prepare(self.state.scene.scene());
    }

    pub fn view(&self) -> &ViewportState {
        self.state.canvas.viewport.view()
    }

    /// Put the camera somewhere explicit (pan stays as given).
    pub fn set_view(&mut self, rotation_x: f32, rotation_y: f32, scale: f32, pan: Vec2) {
        let view = self.state.canvas.viewport.view_mut();
        view.rotation_x = rotation_x;
        view.rotation_y = rotation_y;
        view.scale = scale;
        view.pan = pan;
    }

    // ── Inspection ────────────────────────────────────────────

    /// Screen position of a point under the current camera
    pub fn projection_of(&mut self, point_id: &str) -> Option<Vec2> {
        self.state.canvas.prepare(self.state.scene.scene());
        self.state.canvas.viewport.cached_projections().get(point_id).copied()
    }

    pub fn frame(&mut self) -> Frame {
        let highlight: HashSet<ObjectId> = self.state.highlight_ids();
        self.state.canvas.frame(self.state.scene.scene(), &highlight)
    }

    pub fn gesture(&self) -> &GestureState {
        self.state.canvas.interaction.gesture()
    }

    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.state
            .canvas
            .interaction
            .selection
            .all()
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    pub fn label_offset(&self, point_id: &str) -> Option<Vec2> {
        self.state.canvas.interaction.label_offset(point_id)
    }

    /// Everything the speech side-channel was asked to say
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
