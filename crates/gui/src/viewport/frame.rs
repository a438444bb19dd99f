//! Rendering pass: scene + camera + interaction state → flat list of primitives.
//!
//! Nothing here draws. The egui painter in the binary walks [`Frame::items`]
//! in order; tests inspect the same list headlessly.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use shared::{FreehandStroke, ObjectId, Scene, StrokePoint};

use super::controller::ViewportState;
use super::markers::{angle_label_anchor, angle_marks, edge_marker_polylines, AngleMark};
use super::picking::label_positions;
use super::projection::to_vec3;
use crate::state::selection::SelectionState;

/// RGBA, straight alpha
pub type Rgba = [u8; 4];

pub const INK: Rgba = [0x1e, 0x29, 0x3b, 0xff];
pub const FACE_DEFAULT: Rgba = [0xcb, 0xd5, 0xe1, 0xff];
pub const CIRCLE_LABEL: Rgba = [0x47, 0x55, 0x69, 0xff];
pub const SELECTED: Rgba = [0x3b, 0x82, 0xf6, 0xff];
pub const DRAGGED_LABEL: Rgba = [0x25, 0x63, 0xeb, 0xff];
pub const HIGHLIGHT: Rgba = [0xf9, 0x73, 0x16, 0xff];
const WHITE: Rgba = [0xff, 0xff, 0xff, 0xff];

const FACE_OPACITY: f64 = 0.2;
const EDGE_WIDTH: f32 = 2.0;
const CIRCLE_WIDTH: f32 = 1.8;
const POINT_RADIUS: f32 = 4.0;
const SELECTED_POINT_RADIUS: f32 = 6.0;
const LABEL_SIZE: f32 = 14.0;
const SMALL_LABEL_SIZE: f32 = 11.0;

/// Paint order; items are emitted sorted by layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Faces,
    Circles,
    Angles,
    Edges,
    Points,
    Strokes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polygon {
        points: Vec<Vec2>,
        fill: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        width: f32,
        dashed: bool,
    },
    Segment {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
    QuadCurve {
        start: Vec2,
        control: Vec2,
        end: Vec2,
        color: Rgba,
        width: f32,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Rgba,
        width: f32,
    },
    Dot {
        center: Vec2,
        radius: f32,
        fill: Rgba,
        outline: Rgba,
    },
    /// Centered text
    Text {
        pos: Vec2,
        text: String,
        color: Rgba,
        size: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub layer: Layer,
    pub element_id: ObjectId,
    pub primitive: Primitive,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub items: Vec<DrawItem>,
    /// No scene loaded; the host shows its prompt instead
    pub placeholder: bool,
    /// Elements omitted because they reference missing points
    pub skipped: usize,
}

impl Frame {
    pub fn items_for<'a>(&'a self, element_id: &'a str) -> impl Iterator<Item = &'a DrawItem> + 'a {
        self.items.iter().filter(move |i| i.element_id == element_id)
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawItem> + '_ {
        self.items.iter().filter(move |i| i.layer == layer)
    }
}

/// Interaction and camera state the frame depends on
pub struct FrameInputs<'a> {
    pub view: &'a ViewportState,
    pub projections: &'a HashMap<ObjectId, Vec2>,
    pub label_offsets: &'a HashMap<ObjectId, Vec2>,
    pub selection: &'a SelectionState,
    pub dragged_label: Option<&'a str>,
    pub current_stroke: &'a [StrokePoint],
    pub drawing_color: &'a str,
    /// Elements of the active drawing step
    pub highlight: &'a HashSet<ObjectId>,
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`; anything else yields `default`.
pub fn parse_hex_color(input: &str, default: Rgba) -> Rgba {
    let Some(hex) = input.trim().strip_prefix('#') else {
        return default;
    };
    if !hex.is_ascii() {
        return default;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let parsed = match hex.len() {
        3 => (|| Some([nibble(0)?, nibble(1)?, nibble(2)?, 0xff]))(),
        6 => (|| Some([byte(0)?, byte(2)?, byte(4)?, 0xff]))(),
        8 => (|| Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]))(),
        _ => None,
    };
    parsed.unwrap_or(default)
}

fn color_or(color: Option<&String>, default: Rgba) -> Rgba {
    color.map(|c| parse_hex_color(c, default)).unwrap_or(default)
}

fn with_alpha(mut color: Rgba, opacity: f64) -> Rgba {
    color[3] = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    color
}

fn to_vec2(p: &StrokePoint) -> Vec2 {
    Vec2::new(p.x, p.y)
}

struct FrameBuilder {
    items: Vec<DrawItem>,
    skipped: usize,
}

impl FrameBuilder {
    fn push(&mut self, layer: Layer, id: &str, primitive: Primitive) {
        self.items.push(DrawItem {
            layer,
            element_id: id.to_string(),
            primitive,
        });
    }
}

/// Build the frame for `scene` (or the placeholder frame when there is none).
pub fn build_frame(scene: Option<&Scene>, input: &FrameInputs) -> Frame {
    let Some(scene) = scene else {
        return Frame {
            placeholder: true,
            ..Frame::default()
        };
    };
    let proj = input.projections;
    let lit = |id: &str, color: Rgba| if input.highlight.contains(id) { HIGHLIGHT } else { color };
    let lit_width = |id: &str, width: f32| if input.highlight.contains(id) { width + 1.0 } else { width };

    let mut b = FrameBuilder {
        items: Vec::new(),
        skipped: 0,
    };

    // ── Faces ──
    for face in &scene.faces {
        let points: Option<Vec<Vec2>> = face.point_ids.iter().map(|id| proj.get(id).copied()).collect();
        let Some(points) = points.filter(|p| p.len() >= 3) else {
            b.skipped += 1;
            continue;
        };
        let fill = with_alpha(
            lit(&face.id, color_or(face.color.as_ref(), FACE_DEFAULT)),
            face.opacity.unwrap_or(FACE_OPACITY),
        );
        b.push(Layer::Faces, &face.id, Primitive::Polygon { points, fill });
    }

    // ── Circles ──
    for circle in &scene.circles {
        let Some(&center) = proj.get(&circle.center_id) else {
            b.skipped += 1;
            continue;
        };
        let radius = circle.radius as f32 * input.view.scale;
        b.push(
            Layer::Circles,
            &circle.id,
            Primitive::Circle {
                center,
                radius,
                color: lit(&circle.id, color_or(circle.color.as_ref(), INK)),
                width: lit_width(&circle.id, CIRCLE_WIDTH),
                dashed: circle.is_dashed,
            },
        );
        if let Some(label) = &circle.label {
            b.push(
                Layer::Circles,
                &circle.id,
                Primitive::Text {
                    pos: Vec2::new(center.x, center.y - radius - 8.0),
                    text: label.clone(),
                    color: CIRCLE_LABEL,
                    size: SMALL_LABEL_SIZE,
                },
            );
        }
    }

    // ── Angles ──
    for angle in &scene.angles {
        let (Some(center), Some(arm1), Some(arm2)) = (
            scene.point(&angle.center_id),
            scene.point(&angle.arm1_id),
            scene.point(&angle.arm2_id),
        ) else {
            b.skipped += 1;
            continue;
        };
        let marks = angle_marks(
            angle.kind,
            to_vec3(center),
            to_vec3(arm1),
            to_vec3(arm2),
            |p| input.view.project(p),
        );
        let color = lit(&angle.id, INK);
        for mark in &marks {
            let primitive = match *mark {
                AngleMark::Bracket(points) => Primitive::Polyline {
                    points: points.to_vec(),
                    color,
                    width: lit_width(&angle.id, 1.5),
                },
                AngleMark::Arc {
                    start,
                    control,
                    end,
                } => Primitive::QuadCurve {
                    start,
                    control,
                    end,
                    color,
                    width: lit_width(&angle.id, 1.0),
                },
            };
            b.push(Layer::Angles, &angle.id, primitive);
        }
        if let Some(label) = &angle.label {
            let vertex = input.view.project(to_vec3(center));
            if let Some(pos) = angle_label_anchor(vertex, &marks) {
                b.push(
                    Layer::Angles,
                    &angle.id,
                    Primitive::Text {
                        pos,
                        text: label.clone(),
                        color: CIRCLE_LABEL,
                        size: SMALL_LABEL_SIZE,
                    },
                );
            }
        }
    }

    // ── Edges ──
    for edge in &scene.edges {
        let (Some(&from), Some(&to)) = (proj.get(&edge.from), proj.get(&edge.to)) else {
            b.skipped += 1;
            continue;
        };
        let color = lit(&edge.id, color_or(edge.color.as_ref(), INK));
        let width = lit_width(&edge.id, edge.thickness.map(|t| t as f32).unwrap_or(EDGE_WIDTH));
        b.push(Layer::Edges, &edge.id, Primitive::Segment { from, to, color, width });
        if let Some(marker) = edge.marker {
            for points in edge_marker_polylines(marker, from, to) {
                b.push(
                    Layer::Edges,
                    &edge.id,
                    Primitive::Polyline {
                        points,
                        color,
                        width: EDGE_WIDTH,
                    },
                );
            }
        }
        if let Some(label) = &edge.label {
            let d = (to - from).normalize_or_zero();
            let pos = (from + to) * 0.5 + Vec2::new(d.y, -d.x) * 12.0;
            b.push(
                Layer::Edges,
                &edge.id,
                Primitive::Text {
                    pos,
                    text: label.clone(),
                    color: CIRCLE_LABEL,
                    size: SMALL_LABEL_SIZE,
                },
            );
        }
    }

    // ── Points and labels ──
    for point in &scene.points {
        let Some(&center) = proj.get(&point.id) else {
            continue;
        };
        let selected = input.selection.is_selected(&point.id);
        let (radius, fill) = if selected {
            (SELECTED_POINT_RADIUS, SELECTED)
        } else {
            (POINT_RADIUS, lit(&point.id, color_or(point.color.as_ref(), WHITE)))
        };
        b.push(
            Layer::Points,
            &point.id,
            Primitive::Dot {
                center,
                radius,
                fill,
                outline: INK,
            },
        );
    }
    for (point, pos) in label_positions(scene, proj, input.label_offsets) {
        let Some(text) = point.label.clone() else {
            continue;
        };
        let color = if input.dragged_label == Some(point.id.as_str()) {
            DRAGGED_LABEL
        } else {
            INK
        };
        b.push(
            Layer::Points,
            &point.id,
            Primitive::Text {
                pos,
                text,
                color,
                size: LABEL_SIZE,
            },
        );
    }

    // ── Freehand strokes ──
    for stroke in &scene.drawings {
        push_stroke(&mut b, stroke);
    }
    if !input.current_stroke.is_empty() {
        b.push(
            Layer::Strokes,
            "current-stroke",
            Primitive::Polyline {
                points: input.current_stroke.iter().map(to_vec2).collect(),
                color: parse_hex_color(input.drawing_color, INK),
                width: crate::interaction::STROKE_WIDTH,
            },
        );
    }

    Frame {
        items: b.items,
        placeholder: false,
        skipped: b.skipped,
    }
}

fn push_stroke(b: &mut FrameBuilder, stroke: &FreehandStroke) {
    if stroke.points.is_empty() {
        return;
    }
    b.push(
        Layer::Strokes,
        &stroke.id,
        Primitive::Polyline {
            points: stroke.points.iter().map(to_vec2).collect(),
            color: parse_hex_color(&stroke.color, INK),
            width: stroke.width,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Angle, AngleKind, Circle, Edge, EdgeMarker, Face, Point3D, SceneKind};

    struct Fixture {
        view: ViewportState,
        projections: HashMap<ObjectId, Vec2>,
        offsets: HashMap<ObjectId, Vec2>,
        selection: SelectionState,
        highlight: HashSet<ObjectId>,
    }

    impl Fixture {
        fn new(scene: &Scene) -> Self {
            let view = ViewportState::initial(SceneKind::TwoD, 400.0, 300.0);
            let projections = scene
                .points
                .iter()
                .map(|p| (p.id.clone(), view.project(to_vec3(p))))
                .collect();
            Self {
                view,
                projections,
                offsets: HashMap::new(),
                selection: SelectionState::default(),
                highlight: HashSet::new(),
            }
        }

        fn frame(&self, scene: Option<&Scene>) -> Frame {
            build_frame(
                scene,
                &FrameInputs {
                    view: &self.view,
                    projections: &self.projections,
                    label_offsets: &self.offsets,
                    selection: &self.selection,
                    dragged_label: None,
                    current_stroke: &[],
                    drawing_color: "#ef4444",
                    highlight: &self.highlight,
                },
            )
        }
    }

    fn triangle() -> Scene {
        let mut scene = Scene::new(SceneKind::TwoD);
        scene.points = vec![
            Point3D::new("A", 0.0, 0.0, 0.0).with_label("A"),
            Point3D::new("B", 3.0, 0.0, 0.0).with_label("B"),
            Point3D::new("C", 0.0, 4.0, 0.0).with_label("C"),
        ];
        scene.edges = vec![
            Edge::new("AB", "A", "B"),
            Edge::new("BC", "B", "C"),
            Edge::new("CA", "C", "A"),
        ];
        scene.faces = vec![Face {
            id: "ABC".into(),
            point_ids: vec!["A".into(), "B".into(), "C".into()],
            color: None,
            opacity: None,
        }];
        scene.angles = vec![Angle {
            id: "angA".into(),
            center_id: "A".into(),
            arm1_id: "B".into(),
            arm2_id: "C".into(),
            kind: AngleKind::Right,
            label: None,
        }];
        scene.circles = vec![Circle {
            id: "c".into(),
            center_id: "A".into(),
            radius: 1.0,
            color: None,
            label: Some("(O)".into()),
            is_dashed: true,
        }];
        scene
    }

    #[test]
    fn test_placeholder_without_scene() {
        let f = Fixture::new(&Scene::default());
        let frame = f.frame(None);
        assert!(frame.placeholder);
        assert!(frame.items.is_empty());
    }

    #[test]
    fn test_layer_order() {
        let scene = triangle();
        let f = Fixture::new(&scene);
        let frame = f.frame(Some(&scene));
        let layers: Vec<Layer> = frame.items.iter().map(|i| i.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);
        assert_eq!(frame.skipped, 0);
        assert_eq!(frame.layer(Layer::Faces).count(), 1);
        assert_eq!(frame.layer(Layer::Angles).count(), 1);
    }

    #[test]
    fn test_dangling_elements_are_skipped() {
        let mut scene = triangle();
        scene.edges.push(Edge::new("AX", "A", "X"));
        scene.faces[0].point_ids.push("Y".into());
        let f = Fixture::new(&scene);
        let frame = f.frame(Some(&scene));
        assert_eq!(frame.items_for("AX").count(), 0);
        assert_eq!(frame.items_for("ABC").count(), 0);
        assert_eq!(frame.skipped, 2);
        assert_eq!(frame.layer(Layer::Edges).count(), 3);
    }

    #[test]
    fn test_circle_radius_in_pixels() {
        let scene = triangle();
        let f = Fixture::new(&scene);
        let frame = f.frame(Some(&scene));
        let mut circle = frame.items_for("c");
        let Some(DrawItem {
            primitive: Primitive::Circle { radius, dashed, .. },
            ..
        }) = circle.next()
        else {
            panic!("expected circle");
        };
        assert_eq!(*radius, 30.0);
        assert!(*dashed);
        assert!(matches!(circle.next().map(|i| &i.primitive), Some(Primitive::Text { .. })));
    }

    #[test]
    fn test_selected_point_is_larger_and_blue() {
        let scene = triangle();
        let mut f = Fixture::new(&scene);
        f.selection
            .select("B".into(), crate::state::selection::SelectionKind::Point);
        let frame = f.frame(Some(&scene));
        let dot = frame
            .items_for("B")
            .find_map(|i| match &i.primitive {
                Primitive::Dot { radius, fill, .. } => Some((*radius, *fill)),
                _ => None,
            })
            .unwrap();
        assert_eq!(dot, (SELECTED_POINT_RADIUS, SELECTED));
    }

    #[test]
    fn test_highlighted_edge() {
        let scene = triangle();
        let mut f = Fixture::new(&scene);
        f.highlight.insert("AB".into());
        let frame = f.frame(Some(&scene));
        let Some(Primitive::Segment { color, width, .. }) =
            frame.items_for("AB").next().map(|i| &i.primitive)
        else {
            panic!("expected segment");
        };
        assert_eq!(*color, HIGHLIGHT);
        assert_eq!(*width, EDGE_WIDTH + 1.0);
    }

    #[test]
    fn test_tick_marker_item() {
        let mut scene = triangle();
        scene.edges[0].marker = Some(EdgeMarker::Tick);
        let f = Fixture::new(&scene);
        let frame = f.frame(Some(&scene));
        let tick = frame
            .items_for("AB")
            .find_map(|i| match &i.primitive {
                Primitive::Polyline { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        let mid = (tick[0] + tick[1]) * 0.5;
        assert!((mid - Vec2::new(245.0, 150.0)).length() < 1e-3);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ef4444", INK), [0xef, 0x44, 0x44, 0xff]);
        assert_eq!(parse_hex_color("#fff", INK), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(parse_hex_color("#00000080", INK), [0, 0, 0, 0x80]);
        assert_eq!(parse_hex_color("red", INK), INK);
        assert_eq!(parse_hex_color("#12345", INK), INK);
        assert_eq!(parse_hex_color("#zzzzzz", INK), INK);
    }
}
