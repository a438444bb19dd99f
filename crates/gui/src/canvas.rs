//! Drawing surface: one viewport controller plus one interaction engine.
//!
//! The scene is never owned here. Callers pass it in by reference on every
//! call and apply the returned [`CanvasActions`] themselves.

use std::collections::HashSet;

use glam::Vec2;
use shared::{ObjectId, Scene, SceneKind};

use crate::interaction::{InteractionEngine, PointerId, PointerResponse};
pub use crate::interaction::ScenePatch;
use crate::viewport::controller::{ViewportController, ROTATE_STEP};
use crate::viewport::frame::{build_frame, Frame, FrameInputs};

/// Effects to be applied by the owner of the scene
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CanvasActions {
    pub patch: Option<ScenePatch>,
    /// Texts for the speech side-channel
    pub spoken: Vec<String>,
}

impl CanvasActions {
    pub fn is_empty(&self) -> bool {
        self.patch.is_none() && self.spoken.is_empty()
    }
}

#[derive(Default)]
pub struct Canvas {
    pub viewport: ViewportController,
    pub interaction: InteractionEngine,
    scene_version: u64,
    loaded_kind: Option<SceneKind>,
    session_id: Option<ObjectId>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tell the canvas which scene it is showing.
    ///
    /// Resets the view when the session changes or when the scene's
    /// dimensionality differs from the previous one (an empty canvas counts
    /// as no dimensionality). Returns whether a reset happened.
    pub fn sync_scene(&mut self, scene: Option<&Scene>, version: u64, session_id: Option<&str>) -> bool {
        self.scene_version = version;

        let session_changed = self.session_id.as_deref() != session_id;
        if session_changed {
            self.session_id = session_id.map(str::to_string);
        }

        let kind = scene.map(|s| s.kind);
        let kind_changed = kind.is_some() && kind != self.loaded_kind;
        self.loaded_kind = kind;

        if session_changed || kind_changed {
            tracing::info!(
                "Canvas reset (session changed: {session_changed}, kind: {:?})",
                kind
            );
            self.reset_view(scene);
            true
        } else {
            false
        }
    }

    pub fn scene_version(&self) -> u64 {
        self.scene_version
    }

    pub fn set_dimensions(&mut self, width: f32, height: f32) {
        self.viewport.set_dimensions(width, height);
    }

    /// Default camera for the scene kind, no selection, labels in place.
    /// Centering happens on the next [`Self::prepare`].
    pub fn reset_view(&mut self, scene: Option<&Scene>) {
        let kind = scene.map(|s| s.kind).unwrap_or_default();
        self.viewport.reset_view(kind);
        self.interaction.reset();
    }

    pub fn center_view(&mut self, scene: Option<&Scene>) {
        if let Some(scene) = scene {
            self.viewport.center_view(&scene.points);
        }
    }

    /// Layout pass: run deferred centering and refresh projections.
    pub fn prepare(&mut self, scene: Option<&Scene>) {
        if let Some(scene) = scene {
            self.viewport.apply_pending_center(&scene.points);
        }
        self.viewport.projections(scene, self.scene_version);
    }

    // ── Pointer input ──

    pub fn pointer_down(&mut self, scene: Option<&Scene>, pointer: PointerId, pos: Vec2) -> CanvasActions {
        // Nothing to interact with on the placeholder
        let Some(scene) = scene else {
            return CanvasActions::default();
        };
        self.prepare(Some(scene));
        let projections = self.viewport.cached_projections();
        let response = self.interaction.pointer_down(scene, projections, pointer, pos);
        self.apply(response)
    }

    pub fn pointer_move(&mut self, pointer: PointerId, pos: Vec2) -> CanvasActions {
        let response = self.interaction.pointer_move(pointer, pos);
        self.apply(response)
    }

    pub fn pointer_up(&mut self, scene: Option<&Scene>, pointer: PointerId) -> CanvasActions {
        let response = self.interaction.pointer_up(scene, pointer);
        self.apply(response)
    }

    pub fn pointer_cancel(&mut self, pointer: PointerId) {
        self.interaction.pointer_cancel(pointer);
    }

    fn apply(&mut self, response: PointerResponse) -> CanvasActions {
        if let Some(delta) = response.pan_delta {
            self.viewport.pan(delta);
        }
        CanvasActions {
            patch: response.patch,
            spoken: response.spoken.into_iter().collect(),
        }
    }

    // ── Controls ──

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn wheel_zoom(&mut self, delta: f32) {
        self.viewport.wheel_zoom(delta);
    }

    /// Turn a 3D scene by `steps` rotate-button steps; flat scenes stay put.
    pub fn rotate(&mut self, scene: Option<&Scene>, steps: i32) -> bool {
        match scene {
            Some(scene) if scene.kind.is_3d() => {
                self.viewport.rotate(steps as f32 * ROTATE_STEP);
                true
            }
            _ => false,
        }
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
    }

    pub fn toggle_drawing_mode(&mut self) {
        self.interaction.toggle_drawing_mode();
    }

    pub fn toggle_pan_mode(&mut self) {
        self.interaction.toggle_pan_mode();
    }

    /// Remove every freehand stroke, if there are any.
    pub fn erase_drawings(&self, scene: Option<&Scene>) -> CanvasActions {
        CanvasActions {
            patch: scene
                .filter(|s| s.has_drawings())
                .map(|_| ScenePatch::ClearStrokes),
            spoken: Vec::new(),
        }
    }

    // ── Rendering ──

    /// Current frame; `highlight` holds the active step's element ids.
    pub fn frame(&mut self, scene: Option<&Scene>, highlight: &HashSet<ObjectId>) -> Frame {
        self.prepare(scene);
        build_frame(
            scene,
            &FrameInputs {
                view: self.viewport.view(),
                projections: self.viewport.cached_projections(),
                label_offsets: self.interaction.label_offsets(),
                selection: &self.interaction.selection,
                dragged_label: self.interaction.dragged_label(),
                current_stroke: self.interaction.current_stroke(),
                drawing_color: self.interaction.drawing_color(),
                highlight,
            },
        )
    }
}
