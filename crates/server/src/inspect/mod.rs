use serde_json::{json, Value};
use shared::{ElementKind, Scene};

/// Summarize a scene: element counts, bounds and unresolved references.
pub fn inspect_scene(scene: &Scene) -> Value {
    let bounds = bounds(scene).map(|(min, max)| json!({ "min": min, "max": max }));

    let dangling: Vec<Value> = scene
        .dangling_references()
        .into_iter()
        .map(|d| {
            json!({
                "element": d.element_id,
                "kind": kind_name(d.kind),
                "missing_point": d.missing_point,
            })
        })
        .collect();

    json!({
        "type": if scene.kind.is_3d() { "3D" } else { "2D" },
        "points": scene.points.len(),
        "labeled_points": scene.points.iter().filter(|p| p.label.is_some()).count(),
        "edges": scene.edges.len(),
        "faces": scene.faces.len(),
        "angles": scene.angles.len(),
        "circles": scene.circles.len(),
        "drawings": scene.drawings.len(),
        "steps": scene.steps.len(),
        "reasoning": scene.reasoning.len(),
        "bounds": bounds,
        "dangling": dangling,
    })
}

fn kind_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Edge => "edge",
        ElementKind::Face => "face",
        ElementKind::Angle => "angle",
        ElementKind::Circle => "circle",
    }
}

fn bounds(scene: &Scene) -> Option<([f64; 3], [f64; 3])> {
    let first = scene.points.first()?.position();
    let (mut min, mut max) = (first, first);
    for p in &scene.points {
        for (i, v) in p.position().into_iter().enumerate() {
            min[i] = min[i].min(v);
            max[i] = max[i].max(v);
        }
    }
    Some((min, max))
}
