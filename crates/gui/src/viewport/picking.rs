use std::collections::HashMap;

use glam::Vec2;
use shared::{ObjectId, Point3D, Scene};

use super::projection::{centroid_2d, label_anchor, LABEL_OFFSET};

/// Half-extent of the square grab area around a label
pub const LABEL_HIT_HALF_EXTENT: f32 = 20.0;
/// Half-extent of the square grab area around a point
pub const POINT_HIT_HALF_EXTENT: f32 = 15.0;

/// Axis-aligned square in canvas pixels
#[derive(Clone, Copy, Debug)]
pub struct HitBox {
    pub center: Vec2,
    pub half_extent: f32,
}

impl HitBox {
    pub fn new(center: Vec2, half_extent: f32) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Strict containment: a position exactly on the border misses.
    pub fn contains(&self, pos: Vec2) -> bool {
        (pos.x - self.center.x).abs() < self.half_extent
            && (pos.y - self.center.y).abs() < self.half_extent
    }
}

/// Centroid of every projected point; labels are pushed away from it.
pub fn projection_center(projections: &HashMap<ObjectId, Vec2>) -> Vec2 {
    centroid_2d(projections.values().copied())
}

/// Label position of every labeled, projected point in scene order,
/// including any user drag offset.
pub fn label_positions<'s, 'm>(
    scene: &'s Scene,
    projections: &'m HashMap<ObjectId, Vec2>,
    offsets: &'m HashMap<ObjectId, Vec2>,
) -> impl Iterator<Item = (&'s Point3D, Vec2)> + 'm
where
    's: 'm,
{
    let center = projection_center(projections);
    scene.points.iter().filter_map(move |p| {
        p.label.as_ref()?;
        let pt = *projections.get(&p.id)?;
        let offset = offsets.get(&p.id).copied().unwrap_or(Vec2::ZERO);
        Some((p, label_anchor(pt, center, LABEL_OFFSET) + offset))
    })
}

/// First labeled point (scene order) whose label box contains `pos`.
pub fn pick_label<'a>(
    scene: &'a Scene,
    projections: &HashMap<ObjectId, Vec2>,
    offsets: &HashMap<ObjectId, Vec2>,
    pos: Vec2,
) -> Option<&'a Point3D> {
    label_positions(scene, projections, offsets)
        .find(|(_, at)| HitBox::new(*at, LABEL_HIT_HALF_EXTENT).contains(pos))
        .map(|(p, _)| p)
}

/// First point (scene order) whose grab box contains `pos`.
pub fn pick_point<'a>(
    scene: &'a Scene,
    projections: &HashMap<ObjectId, Vec2>,
    pos: Vec2,
) -> Option<&'a Point3D> {
    scene.points.iter().find(|p| {
        projections
            .get(&p.id)
            .is_some_and(|pt| HitBox::new(*pt, POINT_HIT_HALF_EXTENT).contains(pos))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SceneKind;

    fn two_point_scene() -> (Scene, HashMap<ObjectId, Vec2>) {
        let mut scene = Scene::new(SceneKind::TwoD);
        scene.points = vec![
            Point3D::new("A", 0.0, 0.0, 0.0).with_label("A"),
            Point3D::new("B", 3.0, 0.0, 0.0),
        ];
        let projections = HashMap::from([
            ("A".to_string(), Vec2::new(200.0, 150.0)),
            ("B".to_string(), Vec2::new(290.0, 150.0)),
        ]);
        (scene, projections)
    }

    #[test]
    fn test_hitbox_is_strict() {
        let hb = HitBox::new(Vec2::ZERO, 15.0);
        assert!(hb.contains(Vec2::new(14.9, -14.9)));
        assert!(!hb.contains(Vec2::new(15.0, 0.0)));
    }

    #[test]
    fn test_label_sits_outside_centroid() {
        let (scene, projections) = two_point_scene();
        let offsets = HashMap::new();
        let labels: Vec<_> = label_positions(&scene, &projections, &offsets).collect();
        // Only A is labeled; centroid is (245,150) so A's label goes left
        assert_eq!(labels.len(), 1);
        assert!((labels[0].1 - Vec2::new(178.0, 150.0)).length() < 1e-3);
    }

    #[test]
    fn test_pick_label_uses_offset() {
        let (scene, projections) = two_point_scene();
        let mut offsets = HashMap::new();
        assert!(pick_label(&scene, &projections, &offsets, Vec2::new(178.0, 150.0)).is_some());

        offsets.insert("A".to_string(), Vec2::new(0.0, 100.0));
        assert!(pick_label(&scene, &projections, &offsets, Vec2::new(178.0, 150.0)).is_none());
        let hit = pick_label(&scene, &projections, &offsets, Vec2::new(178.0, 250.0));
        assert_eq!(hit.map(|p| p.id.as_str()), Some("A"));
    }

    #[test]
    fn test_hit_areas_are_half_extents() {
        let (scene, projections) = two_point_scene();
        let offsets = HashMap::new();
        // Label anchor at (178,150)
        assert!(pick_label(&scene, &projections, &offsets, Vec2::new(178.0, 169.0)).is_some());
        assert!(pick_label(&scene, &projections, &offsets, Vec2::new(178.0, 171.0)).is_none());

        assert!(pick_point(&scene, &projections, Vec2::new(290.0, 164.0)).is_some());
        assert!(pick_point(&scene, &projections, Vec2::new(290.0, 166.0)).is_none());
    }

    #[test]
    fn test_pick_point() {
        let (scene, projections) = two_point_scene();
        let hit = pick_point(&scene, &projections, Vec2::new(285.0, 160.0));
        assert_eq!(hit.map(|p| p.id.as_str()), Some("B"));
        assert!(pick_point(&scene, &projections, Vec2::new(245.0, 150.0)).is_none());
    }
}
