//! Factory functions for creating test data.
//!
//! Small scenes the harness, the agent protocol and the tests share.

use shared::*;

// ── Element factories ───────────────────────────────────────────

/// Labeled point named after its id
pub fn point(id: &str, x: f64, y: f64, z: f64) -> Point3D {
    Point3D::new(id, x, y, z).with_label(id)
}

/// Edge with an equality marker
pub fn marked_edge(id: &str, from: &str, to: &str, marker: EdgeMarker) -> Edge {
    Edge {
        marker: Some(marker),
        ..Edge::new(id, from, to)
    }
}

pub fn angle(id: &str, center: &str, arm1: &str, arm2: &str, kind: AngleKind) -> Angle {
    Angle {
        id: id.to_string(),
        center_id: center.to_string(),
        arm1_id: arm1.to_string(),
        arm2_id: arm2.to_string(),
        kind,
        label: None,
    }
}

pub fn face(id: &str, point_ids: &[&str]) -> Face {
    Face {
        id: id.to_string(),
        point_ids: point_ids.iter().map(|p| p.to_string()).collect(),
        color: None,
        opacity: None,
    }
}

pub fn step(number: u32, description: &str, active: &[&str]) -> DrawingStep {
    DrawingStep {
        step_number: number,
        description: description.to_string(),
        active_element_ids: active.iter().map(|id| id.to_string()).collect(),
    }
}

// ── Scene factories ─────────────────────────────────────────────

/// Planar segment A(0,0)–B(3,0) with a tick mark
pub fn segment_ab() -> Scene {
    let mut scene = Scene::new(SceneKind::TwoD);
    scene.points = vec![point("A", 0.0, 0.0, 0.0), point("B", 3.0, 0.0, 0.0)];
    scene.edges = vec![marked_edge("AB", "A", "B", EdgeMarker::Tick)];
    scene
}

/// Right triangle at A with legs 3 and 4
pub fn triangle_abc() -> Scene {
    let mut scene = Scene::new(SceneKind::TwoD);
    scene.points = vec![
        point("A", 0.0, 0.0, 0.0),
        point("B", 3.0, 0.0, 0.0),
        point("C", 0.0, 4.0, 0.0),
    ];
    scene.edges = vec![
        Edge::new("AB", "A", "B"),
        Edge::new("BC", "B", "C"),
        Edge::new("CA", "C", "A"),
    ];
    scene.faces = vec![face("ABC", &["A", "B", "C"])];
    scene.angles = vec![angle("angA", "A", "B", "C", AngleKind::Right)];
    scene.message = Some("Tam giác ABC vuông tại A".to_string());
    scene
}

/// Square pyramid S.ABCD with apex above the base center, built in two steps
pub fn pyramid() -> Scene {
    let mut scene = Scene::new(SceneKind::ThreeD);
    scene.points = vec![
        point("A", -2.0, 0.0, -2.0),
        point("B", 2.0, 0.0, -2.0),
        point("C", 2.0, 0.0, 2.0),
        point("D", -2.0, 0.0, 2.0),
        point("S", 0.0, 4.0, 0.0),
    ];
    let base = [("AB", "A", "B"), ("BC", "B", "C"), ("CD", "C", "D"), ("DA", "D", "A")];
    let sides = [("SA", "S", "A"), ("SB", "S", "B"), ("SC", "S", "C"), ("SD", "S", "D")];
    scene.edges = base
        .iter()
        .chain(sides.iter())
        .map(|(id, from, to)| Edge::new(*id, *from, *to))
        .collect();
    scene.faces = vec![face("base", &["A", "B", "C", "D"])];
    scene.steps = vec![
        step(1, "Vẽ đáy ABCD", &["AB", "BC", "CD", "DA"]),
        step(2, "Nối đỉnh S với các đỉnh đáy", &["SA", "SB", "SC", "SD"]),
    ];
    scene
}

/// Edge pointing at a point that does not exist
pub fn dangling_edge() -> Scene {
    let mut scene = segment_ab();
    scene.edges.push(Edge::new("AZ", "A", "Z"));
    scene
}

/// Scene with one committed freehand stroke
pub fn with_stroke(mut scene: Scene) -> Scene {
    scene.drawings.push(FreehandStroke {
        id: "stroke-fixture".to_string(),
        points: vec![StrokePoint { x: 10.0, y: 10.0 }, StrokePoint { x: 40.0, y: 30.0 }],
        color: "#ef4444".to_string(),
        width: 2.0,
    });
    scene
}
