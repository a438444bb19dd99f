//! Camera state of the drawing surface and the memoized point projections.

use std::collections::HashMap;

use glam::Vec2;
use shared::{ObjectId, Point3D, Scene, SceneKind};

use super::projection::{centroid_3d, project, to_vec3};

pub const MIN_SCALE: f32 = 5.0;
pub const MAX_SCALE: f32 = 200.0;
/// Zoom button factor
pub const ZOOM_STEP: f32 = 1.2;
/// Rotate button step, degrees
pub const ROTATE_STEP: f32 = 15.0;
/// Wheel zoom sensitivity per scroll unit
const WHEEL_ZOOM_RATE: f32 = 0.001;

/// Camera and canvas geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Tilt about the X axis, degrees
    pub rotation_x: f32,
    /// Turn about the Y axis, degrees in [0, 360)
    pub rotation_y: f32,
    /// Scene units to pixels
    pub scale: f32,
    /// Pixel offset added after projection
    pub pan: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::initial(SceneKind::TwoD, 0.0, 0.0)
    }
}

impl ViewportState {
    /// Initial camera for a scene kind: flat for 2D, tilted for 3D
    pub fn initial(kind: SceneKind, width: f32, height: f32) -> Self {
        let (rotation_x, rotation_y, scale) = match kind {
            SceneKind::TwoD => (0.0, 0.0, 30.0),
            SceneKind::ThreeD => (15.0, 45.0, 25.0),
        };
        Self {
            rotation_x,
            rotation_y,
            scale,
            pan: Vec2::ZERO,
            width,
            height,
        }
    }

    /// Project without pan
    pub fn project_raw(&self, point: glam::Vec3) -> Vec2 {
        project(
            point,
            self.rotation_x,
            self.rotation_y,
            self.scale,
            self.width,
            self.height,
        )
    }

    /// Project to final canvas pixels
    pub fn project(&self, point: glam::Vec3) -> Vec2 {
        self.project_raw(point) + self.pan
    }

    pub fn has_size(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Everything the projection map depends on
#[derive(Debug, Clone, Copy, PartialEq)]
struct ProjectionKey {
    scene_version: u64,
    view: ViewportState,
}

/// Owns the camera and the derived point-id → pixel map.
pub struct ViewportController {
    view: ViewportState,
    projections: HashMap<ObjectId, Vec2>,
    key: Option<ProjectionKey>,
    recompute_count: u64,
    /// Center on the scene once the canvas has a size
    pending_center: bool,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportController {
    pub fn new() -> Self {
        Self {
            view: ViewportState::default(),
            projections: HashMap::new(),
            key: None,
            recompute_count: 0,
            pending_center: false,
        }
    }

    pub fn view(&self) -> &ViewportState {
        &self.view
    }

    /// Direct camera access; the projection map revalidates by value.
    pub fn view_mut(&mut self) -> &mut ViewportState {
        &mut self.view
    }

    pub fn set_dimensions(&mut self, width: f32, height: f32) {
        self.view.width = width.max(0.0);
        self.view.height = height.max(0.0);
    }

    /// Camera back to the kind's defaults with no pan; centering follows on
    /// the next [`Self::apply_pending_center`].
    pub fn reset_view(&mut self, kind: SceneKind) {
        self.view = ViewportState::initial(kind, self.view.width, self.view.height);
        self.pending_center = true;
        tracing::debug!("Viewport reset for {kind:?} scene");
    }

    pub fn is_center_pending(&self) -> bool {
        self.pending_center
    }

    /// Run a deferred centering once the canvas has been laid out.
    pub fn apply_pending_center(&mut self, points: &[Point3D]) {
        if self.pending_center && self.view.has_size() {
            self.center_view(points);
            self.pending_center = false;
        }
    }

    /// Pan so the 3D centroid of `points` lands on the canvas center.
    pub fn center_view(&mut self, points: &[Point3D]) {
        if points.is_empty() {
            return;
        }
        let center = centroid_3d(points.iter().map(to_vec3));
        let projected = self.view.project_raw(center);
        self.view.pan = Vec2::new(self.view.width / 2.0, self.view.height / 2.0) - projected;
    }

    /// Multiply the scale, clamped to [`MIN_SCALE`, `MAX_SCALE`].
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() {
            return;
        }
        self.view.scale = (self.view.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_in(&mut self) {
        self.zoom(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(1.0 / ZOOM_STEP);
    }

    /// Continuous zoom; positive `delta` (scroll up) zooms in.
    pub fn wheel_zoom(&mut self, delta: f32) {
        self.zoom(1.0 + delta * WHEEL_ZOOM_RATE);
    }

    pub fn rotate(&mut self, delta_degrees: f32) {
        self.view.rotation_y = (self.view.rotation_y + delta_degrees).rem_euclid(360.0);
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.view.pan += delta;
    }

    /// Projected position of every scene point, rebuilt only when the scene
    /// version or any camera/canvas value changed.
    pub fn projections(&mut self, scene: Option<&Scene>, scene_version: u64) -> &HashMap<ObjectId, Vec2> {
        let key = ProjectionKey {
            scene_version,
            view: self.view,
        };
        if self.key != Some(key) {
            let view = self.view;
            self.projections = scene
                .map(|s| {
                    s.points
                        .iter()
                        .map(|p| (p.id.clone(), view.project(to_vec3(p))))
                        .collect()
                })
                .unwrap_or_default();
            self.key = Some(key);
            self.recompute_count += 1;
        }
        &self.projections
    }

    /// Last computed map, possibly stale
    pub fn cached_projections(&self) -> &HashMap<ObjectId, Vec2> {
        &self.projections
    }

    /// How many times the projection map has been rebuilt
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }
}
