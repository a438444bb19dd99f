//! Scene model shared between the tutor server and the desktop front-end.
//!
//! The JSON shape of [`Scene`] is the contract with the language model: field
//! names are camelCase and every collection except `points` may be absent.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

mod generate;
mod session;

pub use generate::{GenerateError, GenerateErrorBody, GenerateErrorKind, GenerateRequest, ImageAttachment};
pub use session::{ChatMessage, ChatRole, Session};

/// Identifier of a scene element, unique within its collection
pub type ObjectId = String;

/// Scene dimensionality discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SceneKind {
    #[default]
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
}

impl SceneKind {
    pub fn is_3d(self) -> bool {
        self == SceneKind::ThreeD
    }
}

/// A named point in scene units (z is 0 for planar problems)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point3D {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Elements related to this point (used by hint panels)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_ids: Vec<ObjectId>,
}

impl Point3D {
    pub fn new(id: impl Into<ObjectId>, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            z,
            label: None,
            color: None,
            linked_ids: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Equality / parallel annotation drawn on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMarker {
    Tick,
    DoubleTick,
    Arrow,
    DoubleArrow,
}

/// Segment between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: ObjectId,
    pub from: ObjectId,
    pub to: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    /// Length label, e.g. "5cm"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<EdgeMarker>,
}

impl Edge {
    pub fn new(id: impl Into<ObjectId>, from: impl Into<ObjectId>, to: impl Into<ObjectId>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            color: None,
            thickness: None,
            label: None,
            marker: None,
        }
    }
}

/// Filled polygon over an ordered list of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Face {
    pub id: ObjectId,
    #[serde(default)]
    pub point_ids: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Angle mark style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngleKind {
    Right,
    Arc,
    DoubleArc,
}

/// Angle at `center_id` between the arms through `arm1_id` and `arm2_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Angle {
    pub id: ObjectId,
    pub center_id: ObjectId,
    pub arm1_id: ObjectId,
    pub arm2_id: ObjectId,
    #[serde(rename = "type")]
    pub kind: AngleKind,
    /// e.g. "60°"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Circle around a point, radius in scene units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub id: ObjectId,
    pub center_id: ObjectId,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub is_dashed: bool,
}

/// Canvas-space sample of a freehand stroke (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

/// Student annotation drawn on top of the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreehandStroke {
    pub id: ObjectId,
    pub points: Vec<StrokePoint>,
    pub color: String,
    pub width: f32,
}

/// One construction step with the elements it introduces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingStep {
    #[serde(default)]
    pub step_number: u32,
    pub description: String,
    #[serde(default)]
    pub active_element_ids: Vec<ObjectId>,
}

/// Guiding question/answer pair for backward reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningStep {
    #[serde(default)]
    pub id: ObjectId,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_element_ids: Vec<ObjectId>,
}

/// Complete geometric description of one problem
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub points: Vec<Point3D>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub faces: Vec<Face>,
    #[serde(default)]
    pub angles: Vec<Angle>,
    #[serde(default)]
    pub circles: Vec<Circle>,
    #[serde(default)]
    pub drawings: Vec<FreehandStroke>,
    #[serde(default)]
    pub steps: Vec<DrawingStep>,
    #[serde(default)]
    pub reasoning: Vec<ReasoningStep>,
    #[serde(rename = "type", default)]
    pub kind: SceneKind,
    /// Friendly message from the tutor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Detailed solution (Markdown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub math_solution: Option<String>,
}

/// Kind of element whose reference could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Edge,
    Face,
    Angle,
    Circle,
}

/// An element pointing at a point id that is not in the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub element_id: ObjectId,
    pub kind: ElementKind,
    pub missing_point: ObjectId,
}

impl Scene {
    pub fn new(kind: SceneKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn point(&self, id: &str) -> Option<&Point3D> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn has_drawings(&self) -> bool {
        !self.drawings.is_empty()
    }

    /// References to point ids absent from `points`. These elements are
    /// skipped at render time; this is purely a diagnostic.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let known: HashSet<&str> = self.points.iter().map(|p| p.id.as_str()).collect();
        let mut out = Vec::new();
        let mut check = |element_id: &ObjectId, kind: ElementKind, point: &ObjectId| {
            if !known.contains(point.as_str()) {
                out.push(DanglingReference {
                    element_id: element_id.clone(),
                    kind,
                    missing_point: point.clone(),
                });
            }
        };

        for e in &self.edges {
            check(&e.id, ElementKind::Edge, &e.from);
            check(&e.id, ElementKind::Edge, &e.to);
        }
        for f in &self.faces {
            for pid in &f.point_ids {
                check(&f.id, ElementKind::Face, pid);
            }
        }
        for a in &self.angles {
            check(&a.id, ElementKind::Angle, &a.center_id);
            check(&a.id, ElementKind::Angle, &a.arm1_id);
            check(&a.id, ElementKind::Angle, &a.arm2_id);
        }
        for c in &self.circles {
            check(&c.id, ElementKind::Circle, &c.center_id);
        }
        out
    }

    /// Short human summary, e.g. "4 points, 6 edges"
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} points", self.points.len())];
        if !self.edges.is_empty() {
            parts.push(format!("{} edges", self.edges.len()));
        }
        if !self.faces.is_empty() {
            parts.push(format!("{} faces", self.faces.len()));
        }
        if !self.circles.is_empty() {
            parts.push(format!("{} circles", self.circles.len()));
        }
        parts.join(", ")
    }
}
