//! Pointer handling for the drawing surface.
//!
//! The engine owns transient UI state only (selection, modes, label offsets,
//! active pointers, the stroke being drawn). It never touches the scene:
//! stroke commits come back as a [`ScenePatch`] and pans as a pixel delta for
//! the caller to apply.

pub mod gesture;

use std::collections::HashMap;

use glam::Vec2;
use shared::{FreehandStroke, ObjectId, Scene, StrokePoint};

use crate::i18n::t;
use crate::state::selection::{SelectionKind, SelectionState};
use crate::viewport::picking::{pick_label, pick_point};
use crate::viewport::projection::centroid_2d;
pub use gesture::GestureState;
use gesture::{dispatch, PressContext, PressOutcome};

/// Stable identifier of a mouse button, pen or finger
pub type PointerId = u64;

/// Displacement (either axis) after which a press counts as a drag
pub const MOVE_THRESHOLD: f32 = 3.0;
/// Label offsets shorter than this snap back on release
pub const SNAP_BACK_DISTANCE: f32 = 5.0;
/// Width of committed freehand strokes
pub const STROKE_WIDTH: f32 = 2.0;

pub const DEFAULT_DRAWING_COLOR: &str = "#ef4444";
/// Colors offered for freehand drawing
pub const DRAWING_COLORS: [&str; 8] = [
    "#000000", "#ef4444", "#3b82f6", "#22c55e", "#eab308", "#a855f7", "#ec4899", "#cbd5e1",
];

/// The only two ways the drawing surface may change a scene
#[derive(Debug, Clone, PartialEq)]
pub enum ScenePatch {
    AppendStroke(FreehandStroke),
    ClearStrokes,
}

impl ScenePatch {
    /// Apply to `scene`; returns whether anything changed.
    pub fn apply(&self, scene: &mut Scene) -> bool {
        match self {
            ScenePatch::AppendStroke(stroke) => {
                scene.drawings.push(stroke.clone());
                true
            }
            ScenePatch::ClearStrokes => {
                if scene.drawings.is_empty() {
                    return false;
                }
                scene.drawings.clear();
                true
            }
        }
    }
}

/// Side effects of one pointer event, for the caller to apply
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointerResponse {
    /// Pixel delta to add to the viewport pan
    pub pan_delta: Option<Vec2>,
    pub patch: Option<ScenePatch>,
    /// "Point named" announcement
    pub spoken: Option<String>,
}

/// Transient interaction state plus the pointer state machine
pub struct InteractionEngine {
    pub selection: SelectionState,
    label_offsets: HashMap<ObjectId, Vec2>,
    drawing_mode: bool,
    pan_mode: bool,
    gesture: GestureState,
    stroke: Vec<StrokePoint>,
    pointers: HashMap<PointerId, Vec2>,
    /// Pointer and position of the latest press
    press: Option<(PointerId, Vec2)>,
    /// Latest press displaced past [`MOVE_THRESHOLD`]; a drag, not a tap
    moved: bool,
    /// Latest press hit nothing and started no gesture
    empty_press: bool,
    drawing_color: String,
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self {
            selection: SelectionState::default(),
            label_offsets: HashMap::new(),
            drawing_mode: false,
            pan_mode: false,
            gesture: GestureState::Idle,
            stroke: Vec::new(),
            pointers: HashMap::new(),
            press: None,
            moved: false,
            empty_press: false,
            drawing_color: DEFAULT_DRAWING_COLOR.to_string(),
        }
    }

    // ── Accessors ──

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn label_offsets(&self) -> &HashMap<ObjectId, Vec2> {
        &self.label_offsets
    }

    pub fn label_offset(&self, point_id: &str) -> Option<Vec2> {
        self.label_offsets.get(point_id).copied()
    }

    /// Point whose label is being dragged
    pub fn dragged_label(&self) -> Option<&str> {
        match &self.gesture {
            GestureState::DraggingLabel { point_id, .. } => Some(point_id),
            _ => None,
        }
    }

    pub fn current_stroke(&self) -> &[StrokePoint] {
        &self.stroke
    }

    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Whether the latest press travelled past [`MOVE_THRESHOLD`]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    pub fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    pub fn is_pan_mode(&self) -> bool {
        self.pan_mode
    }

    pub fn drawing_color(&self) -> &str {
        &self.drawing_color
    }

    // ── Modes ──

    /// Modes are exclusive; switching one on turns the other off.
    pub fn toggle_drawing_mode(&mut self) {
        self.drawing_mode = !self.drawing_mode;
        self.pan_mode = false;
    }

    pub fn toggle_pan_mode(&mut self) {
        self.pan_mode = !self.pan_mode;
        self.drawing_mode = false;
    }

    pub fn set_drawing_color(&mut self, color: impl Into<String>) {
        self.drawing_color = color.into();
    }

    /// Forget selection and label placement (view reset)
    pub fn reset(&mut self) {
        self.selection.clear();
        self.label_offsets.clear();
        if matches!(self.gesture, GestureState::DraggingLabel { .. }) {
            self.set_gesture(GestureState::Idle);
        }
    }

    // ── Pointer events ──

    /// Route a press through the gesture rules.
    pub fn pointer_down(
        &mut self,
        scene: &Scene,
        projections: &HashMap<ObjectId, Vec2>,
        pointer: PointerId,
        pos: Vec2,
    ) -> PointerResponse {
        self.pointers.insert(pointer, pos);
        self.press = Some((pointer, pos));
        self.moved = false;
        self.empty_press = false;

        // A label drag holds until its pointer lifts
        if matches!(self.gesture, GestureState::DraggingLabel { .. }) {
            return PointerResponse::default();
        }

        let label_hit = pick_label(scene, projections, &self.label_offsets, pos);
        let point_hit = pick_point(scene, projections, pos);
        let ctx = PressContext {
            label_hit: label_hit.map(|p| p.id.as_str()),
            point_hit: point_hit.map(|p| p.id.as_str()),
            drawing_mode: self.drawing_mode,
            pan_mode: self.pan_mode,
            pointer_count: self.pointers.len(),
        };

        let mut response = PointerResponse::default();
        match dispatch(&ctx) {
            PressOutcome::DragLabel(point_id) => {
                self.stroke.clear();
                self.set_gesture(GestureState::DraggingLabel { point_id, pointer });
            }
            PressOutcome::SelectPoint(point_id) => {
                response.spoken = point_hit
                    .and_then(|p| p.label.as_ref())
                    .map(|label| format!("{} {label}", t("speech.point")));
                self.selection.select(point_id, SelectionKind::Point);
            }
            PressOutcome::Pan => {
                // A second finger turns a stroke in progress into a pan
                self.stroke.clear();
                self.set_gesture(GestureState::Panning);
            }
            PressOutcome::Draw => {
                self.stroke = vec![StrokePoint { x: pos.x, y: pos.y }];
                self.set_gesture(GestureState::DrawingStroke { pointer });
            }
            PressOutcome::Ignore => {
                self.empty_press = true;
            }
        }
        response
    }

    pub fn pointer_move(&mut self, pointer: PointerId, pos: Vec2) -> PointerResponse {
        let Some(last) = self.pointers.get(&pointer).copied() else {
            return PointerResponse::default();
        };
        let centroid_before = centroid_2d(self.pointers.values().copied());
        self.pointers.insert(pointer, pos);

        if let Some((pressed, origin)) = self.press {
            let d = pos - origin;
            if pressed == pointer && (d.x.abs() > MOVE_THRESHOLD || d.y.abs() > MOVE_THRESHOLD) {
                self.moved = true;
            }
        }

        let mut response = PointerResponse::default();
        match &self.gesture {
            GestureState::DraggingLabel { point_id, pointer: owner } if *owner == pointer => {
                *self.label_offsets.entry(point_id.clone()).or_insert(Vec2::ZERO) += pos - last;
            }
            GestureState::Panning => {
                let centroid_after = centroid_2d(self.pointers.values().copied());
                response.pan_delta = Some(centroid_after - centroid_before);
            }
            GestureState::DrawingStroke { pointer: owner } if *owner == pointer => {
                self.stroke.push(StrokePoint { x: pos.x, y: pos.y });
            }
            _ => {}
        }
        response
    }

    /// Release: snap labels back, commit strokes, end pans.
    ///
    /// `scene` is only needed to decide whether a stroke can be committed.
    pub fn pointer_up(&mut self, scene: Option<&Scene>, pointer: PointerId) -> PointerResponse {
        self.pointers.remove(&pointer);
        let mut response = PointerResponse::default();

        match self.gesture.clone() {
            GestureState::DraggingLabel { point_id, pointer: owner } if owner == pointer => {
                self.snap_label(&point_id);
                self.set_gesture(GestureState::Idle);
            }
            GestureState::DrawingStroke { pointer: owner } if owner == pointer => {
                let samples = std::mem::take(&mut self.stroke);
                if !samples.is_empty() && scene.is_some() {
                    response.patch = Some(ScenePatch::AppendStroke(FreehandStroke {
                        id: format!("stroke-{}", uuid::Uuid::new_v4()),
                        points: samples,
                        color: self.drawing_color.clone(),
                        width: STROKE_WIDTH,
                    }));
                }
                self.set_gesture(GestureState::Idle);
            }
            GestureState::Panning if self.pointers.is_empty() => {
                self.set_gesture(GestureState::Idle);
            }
            // Tap on empty canvas; a drag that passed the threshold keeps the selection
            GestureState::Idle
                if self.empty_press && !self.moved && self.press.is_some_and(|(p, _)| p == pointer) =>
            {
                self.selection.clear();
            }
            _ => {}
        }
        response
    }

    /// Implicit release without committing anything.
    pub fn pointer_cancel(&mut self, pointer: PointerId) {
        self.pointers.remove(&pointer);
        match self.gesture.clone() {
            GestureState::DraggingLabel { point_id, pointer: owner } if owner == pointer => {
                self.snap_label(&point_id);
                self.set_gesture(GestureState::Idle);
            }
            GestureState::DrawingStroke { pointer: owner } if owner == pointer => {
                self.stroke.clear();
                self.set_gesture(GestureState::Idle);
            }
            GestureState::Panning if self.pointers.is_empty() => {
                self.set_gesture(GestureState::Idle);
            }
            _ => {}
        }
    }

    fn snap_label(&mut self, point_id: &str) {
        if let Some(offset) = self.label_offsets.get(point_id) {
            if offset.length() < SNAP_BACK_DISTANCE {
                self.label_offsets.remove(point_id);
            }
        }
    }

    fn set_gesture(&mut self, gesture: GestureState) {
        if self.gesture != gesture {
            tracing::debug!("Gesture {} -> {}", self.gesture.name(), gesture.name());
            self.gesture = gesture;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Point3D, SceneKind};

    /// A at (200,150) labeled, B at (290,150) labeled; labels at (178,150) and (312,150)
    fn fixture() -> (Scene, HashMap<ObjectId, Vec2>) {
        let mut scene = Scene::new(SceneKind::TwoD);
        scene.points = vec![
            Point3D::new("A", 0.0, 0.0, 0.0).with_label("A"),
            Point3D::new("B", 3.0, 0.0, 0.0).with_label("B"),
        ];
        let projections = HashMap::from([
            ("A".to_string(), Vec2::new(200.0, 150.0)),
            ("B".to_string(), Vec2::new(290.0, 150.0)),
        ]);
        (scene, projections)
    }

    #[test]
    fn test_select_point_and_speak() {
        let (scene, proj) = fixture();
        let mut engine = InteractionEngine::new();
        let r = engine.pointer_down(&scene, &proj, 1, Vec2::new(205.0, 155.0));
        assert_eq!(r.spoken.as_deref(), Some("Điểm A"));
        assert!(engine.selection.is_selected("A"));
        assert_eq!(engine.gesture(), &GestureState::Idle);
    }

    #[test]
    fn test_label_drag_snaps_back() {
        let (scene, proj) = fixture();
        let mut engine = InteractionEngine::new();
        engine.pointer_down(&scene, &proj, 1, Vec2::new(178.0, 150.0));
        assert_eq!(engine.dragged_label(), Some("A"));
        engine.pointer_move(1, Vec2::new(181.0, 153.0));
        assert!(!engine.has_moved());
        engine.pointer_up(Some(&scene), 1);
        assert!(engine.label_offset("A").is_none());
        assert_eq!(engine.gesture(), &GestureState::Idle);
    }

    #[test]
    fn test_label_drag_keeps_offset() {
        let (scene, proj) = fixture();
        let mut engine = InteractionEngine::new();
        engine.pointer_down(&scene, &proj, 1, Vec2::new(178.0, 150.0));
        engine.pointer_move(1, Vec2::new(183.0, 150.0));
        engine.pointer_move(1, Vec2::new(188.0, 150.0));
        assert!(engine.has_moved());
        engine.pointer_up(Some(&scene), 1);
        assert_eq!(engine.label_offset("A"), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_empty_tap_clears_selection_but_drag_does_not() {
        let (scene, proj) = fixture();
        let mut engine = InteractionEngine::new();
        engine.pointer_down(&scene, &proj, 1, Vec2::new(205.0, 155.0));
        engine.pointer_up(Some(&scene), 1);
        assert!(engine.selection.is_selected("A"));

        // Drag across empty canvas
        engine.pointer_down(&scene, &proj, 1, Vec2::new(50.0, 50.0));
        engine.pointer_move(1, Vec2::new(60.0, 50.0));
        assert!(engine.has_moved());
        engine.pointer_up(Some(&scene), 1);
        assert!(engine.selection.is_selected("A"));

        // Jitter below the threshold still counts as a tap
        engine.pointer_down(&scene, &proj, 1, Vec2::new(50.0, 50.0));
        engine.pointer_move(1, Vec2::new(52.0, 51.0));
        assert!(!engine.has_moved());
        engine.pointer_up(Some(&scene), 1);
        assert_eq!(engine.selection.count(), 0);
    }

    #[test]
    fn test_stroke_commit() {
        let (scene, proj) = fixture();
        let mut engine = InteractionEngine::new();
        engine.toggle_drawing_mode();
        engine.pointer_down(&scene, &proj, 1, Vec2::new(50.0, 50.0));
        engine.pointer_move(1, Vec2::new(60.0, 55.0));
        engine.pointer_move(1, Vec2::new(70.0, 60.0));
        let r = engine.pointer_up(Some(&scene), 1);
        let Some(ScenePatch::AppendStroke(stroke)) = r.patch else {
            panic!("expected stroke patch");
        };
        assert_eq!(stroke.points.len(), 3);
        assert_eq!(stroke.color, DEFAULT_DRAWING_COLOR);
        assert_eq!(stroke.width, STROKE_WIDTH);
        assert!(stroke.id.starts_with("stroke-"));
        assert!(engine.current_stroke().is_empty());
    }

    #[test]
    fn test_second_pointer_discards_stroke_and_pans() {
        let (scene, proj) = fixture();
        let mut engine = InteractionEngine::new();
        engine.toggle_drawing_mode();
        engine.pointer_down(&scene, &proj, 1, Vec2::new(50.0, 50.0));
        engine.pointer_down(&scene, &proj, 2, Vec2::new(100.0, 50.0));
        assert_eq!(engine.gesture(), &GestureState::Panning);
        assert!(engine.current_stroke().is_empty());

        // Centroid moves by half of one finger's motion
        let r = engine.pointer_move(2, Vec2::new(110.0, 70.0));
        assert_eq!(r.pan_delta, Some(Vec2::new(5.0, 10.0)));

        assert!(engine.pointer_up(Some(&scene), 1).patch.is_none());
        assert_eq!(engine.gesture(), &GestureState::Panning);
        engine.pointer_up(Some(&scene), 2);
        assert_eq!(engine.gesture(), &GestureState::Idle);
        assert_eq!(engine.active_pointers(), 0);
    }

    #[test]
    fn test_pan_mode_single_pointer() {
        let (scene, proj) = fixture();
        let mut engine = InteractionEngine::new();
        engine.toggle_pan_mode();
        engine.pointer_down(&scene, &proj, 1, Vec2::new(10.0, 10.0));
        let r = engine.pointer_move(1, Vec2::new(15.0, 7.0));
        assert_eq!(r.pan_delta, Some(Vec2::new(5.0, -3.0)));
    }

    #[test]
    fn test_modes_are_exclusive() {
        let mut engine = InteractionEngine::new();
        engine.toggle_drawing_mode();
        engine.toggle_pan_mode();
        assert!(engine.is_pan_mode());
        assert!(!engine.is_drawing_mode());
        engine.toggle_drawing_mode();
        assert!(!engine.is_pan_mode());
    }

    #[test]
    fn test_cancel_discards_stroke() {
        let (scene, proj) = fixture();
        let mut engine = InteractionEngine::new();
        engine.toggle_drawing_mode();
        engine.pointer_down(&scene, &proj, 7, Vec2::new(5.0, 5.0));
        engine.pointer_move(7, Vec2::new(25.0, 5.0));
        engine.pointer_cancel(7);
        assert!(engine.current_stroke().is_empty());
        assert_eq!(engine.gesture(), &GestureState::Idle);
        assert_eq!(engine.active_pointers(), 0);
    }

    #[test]
    fn test_move_of_unknown_pointer_is_ignored() {
        let mut engine = InteractionEngine::new();
        assert_eq!(engine.pointer_move(3, Vec2::ONE), PointerResponse::default());
    }

    #[test]
    fn test_clear_strokes_patch() {
        let mut scene = Scene::default();
        assert!(!ScenePatch::ClearStrokes.apply(&mut scene));
        scene.drawings.push(FreehandStroke {
            id: "s".into(),
            points: vec![StrokePoint { x: 0.0, y: 0.0 }],
            color: DEFAULT_DRAWING_COLOR.into(),
            width: STROKE_WIDTH,
        });
        assert!(ScenePatch::ClearStrokes.apply(&mut scene));
        assert!(scene.drawings.is_empty());
    }
}
