//! Derived annotation geometry: angle marks and edge markers.
//!
//! Angle marks are built in scene space (fixed distance along each arm) and
//! then projected; edge markers are built directly in pixel space around the
//! projected midpoint of the edge.

use glam::{Vec2, Vec3};
use shared::{AngleKind, EdgeMarker};

/// Distance (scene units) from the vertex to the inner angle mark
pub const ANGLE_MARK_SIZE: f32 = 0.3;
/// Distance of the outer arc of a double-arc mark
pub const DOUBLE_ARC_SIZE: f32 = 0.4;

/// Half length of a tick, pixels
const TICK_HALF: f32 = 6.0;
/// Offset of each tick from the midpoint for double ticks
const TICK_GAP: f32 = 3.0;
/// Chevron depth along the edge and half-width across it
const CHEVRON_DEPTH: f32 = 6.0;
const CHEVRON_HALF_WIDTH: f32 = 5.0;

/// The point `distance` units from `start` toward `end` (or `start` itself
/// when the two coincide)
pub fn point_on_vector(start: Vec3, end: Vec3, distance: f32) -> Vec3 {
    let d = end - start;
    let length = d.length();
    if length == 0.0 {
        return start;
    }
    start + d * (distance / length)
}

/// Pixel-space shape of one angle mark
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleMark {
    /// Right-angle bracket: arm1 → corner → arm2
    Bracket([Vec2; 3]),
    /// Quadratic curve from arm1 to arm2
    Arc { start: Vec2, control: Vec2, end: Vec2 },
}

/// Marks for an angle at `center` between the arms through `arm1` and `arm2`.
///
/// `project` maps scene space to pixels with the current camera and pan.
pub fn angle_marks(
    kind: AngleKind,
    center: Vec3,
    arm1: Vec3,
    arm2: Vec3,
    project: impl Fn(Vec3) -> Vec2,
) -> Vec<AngleMark> {
    let c = project(center);
    let arms_at = |size: f32| {
        (
            project(point_on_vector(center, arm1, size)),
            project(point_on_vector(center, arm2, size)),
        )
    };

    match kind {
        AngleKind::Right => {
            let (a1, a2) = arms_at(ANGLE_MARK_SIZE);
            // Fourth corner of the parallelogram c, a1, a2
            let corner = a1 + (a2 - c);
            vec![AngleMark::Bracket([a1, corner, a2])]
        }
        AngleKind::Arc => {
            let (a1, a2) = arms_at(ANGLE_MARK_SIZE);
            vec![arc_mark(c, a1, a2)]
        }
        AngleKind::DoubleArc => {
            let (a1, a2) = arms_at(ANGLE_MARK_SIZE);
            let (b1, b2) = arms_at(DOUBLE_ARC_SIZE);
            vec![arc_mark(c, a1, a2), arc_mark(c, b1, b2)]
        }
    }
}

/// Curve bulging away from the vertex so it reads as a circular arc.
///
/// The control point is where the tangents at both ends meet; for a
/// straight angle that point is at infinity and the chord is used instead.
fn arc_mark(c: Vec2, a1: Vec2, a2: Vec2) -> AngleMark {
    let mid = (a1 + a2) * 0.5;
    let m = mid - c;
    let m_len_sq = m.length_squared();
    let control = if m_len_sq < 1e-6 {
        mid
    } else {
        let r = ((a1 - c).length() + (a2 - c).length()) * 0.5;
        c + m * (r * r / m_len_sq)
    };
    AngleMark::Arc {
        start: a1,
        control,
        end: a2,
    }
}

/// Where an angle's text label goes: just outside its outermost mark
pub fn angle_label_anchor(center: Vec2, marks: &[AngleMark]) -> Option<Vec2> {
    let outer = marks.last()?;
    let (start, end) = match *outer {
        AngleMark::Bracket([a1, _, a2]) => (a1, a2),
        AngleMark::Arc { start, end, .. } => (start, end),
    };
    let m = (start + end) * 0.5 - center;
    let reach = (start - center).length().max((end - center).length());
    let dir = if m.length_squared() < 1e-6 {
        (start - center).perp().normalize_or_zero()
    } else {
        m.normalize()
    };
    Some(center + dir * (reach + 12.0))
}

/// Marker strokes for an edge between two projected points.
///
/// Each entry is a polyline: two points for a tick, three for a chevron.
/// A zero-length edge gets no marker.
pub fn edge_marker_polylines(marker: EdgeMarker, from: Vec2, to: Vec2) -> Vec<Vec<Vec2>> {
    let d = to - from;
    let length = d.length();
    if length == 0.0 {
        return Vec::new();
    }
    let dir = d / length;
    let normal = Vec2::new(-dir.y, dir.x);
    let mid = (from + to) * 0.5;

    let tick = |at: Vec2| vec![at - normal * TICK_HALF, at + normal * TICK_HALF];
    // Tip sits ahead of `at`, wings trail behind it
    let chevron = |at: Vec2| {
        let tip = at + dir * (CHEVRON_DEPTH * 0.5);
        let back = tip - dir * CHEVRON_DEPTH;
        vec![
            back + normal * CHEVRON_HALF_WIDTH,
            tip,
            back - normal * CHEVRON_HALF_WIDTH,
        ]
    };

    match marker {
        EdgeMarker::Tick => vec![tick(mid)],
        EdgeMarker::DoubleTick => vec![tick(mid - dir * TICK_GAP), tick(mid + dir * TICK_GAP)],
        EdgeMarker::Arrow => vec![chevron(mid)],
        EdgeMarker::DoubleArrow => vec![
            chevron(mid - dir * TICK_GAP),
            chevron(mid + dir * TICK_GAP),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn flat(p: Vec3) -> Vec2 {
        Vec2::new(p.x * 100.0, p.y * 100.0)
    }

    #[test]
    fn test_point_on_vector() {
        let p = point_on_vector(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0), 0.5);
        assert!((p - Vec3::new(0.3, 0.4, 0.0)).length() < 1e-5);
        let same = point_on_vector(Vec3::ONE, Vec3::ONE, 0.3);
        assert_eq!(same, Vec3::ONE);
    }

    #[test]
    fn test_right_angle_bracket() {
        let marks = angle_marks(
            AngleKind::Right,
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            flat,
        );
        let [a1, corner, a2] = match marks.as_slice() {
            [AngleMark::Bracket(pts)] => *pts,
            other => panic!("unexpected marks {other:?}"),
        };
        assert!(close(a1, Vec2::new(30.0, 0.0)));
        assert!(close(a2, Vec2::new(0.0, 30.0)));
        assert!(close(corner, Vec2::new(30.0, 30.0)));
    }

    #[test]
    fn test_arc_bulges_outward() {
        let marks = angle_marks(
            AngleKind::Arc,
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            flat,
        );
        let AngleMark::Arc { control, .. } = marks[0] else {
            panic!("expected arc");
        };
        // Tangents at (30,0) and (0,30) meet at (30,30)
        assert!(close(control, Vec2::new(30.0, 30.0)));
    }

    #[test]
    fn test_double_arc_has_two_radii() {
        let marks = angle_marks(
            AngleKind::DoubleArc,
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            flat,
        );
        assert_eq!(marks.len(), 2);
        let AngleMark::Arc { start, .. } = marks[1] else {
            panic!("expected arc");
        };
        assert!(close(start, Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn test_degenerate_arm_collapses_to_vertex() {
        let marks = angle_marks(
            AngleKind::Arc,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            flat,
        );
        let AngleMark::Arc { start, .. } = marks[0] else {
            panic!("expected arc");
        };
        assert!(close(start, Vec2::ZERO));
    }

    #[test]
    fn test_tick_is_perpendicular_at_midpoint() {
        let polylines = edge_marker_polylines(
            EdgeMarker::Tick,
            Vec2::new(200.0, 150.0),
            Vec2::new(290.0, 150.0),
        );
        assert_eq!(polylines.len(), 1);
        let tick = &polylines[0];
        assert!(close((tick[0] + tick[1]) * 0.5, Vec2::new(245.0, 150.0)));
        assert!((tick[0].x - tick[1].x).abs() < 1e-4);
        assert!(((tick[0] - tick[1]).length() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_double_tick_spacing() {
        let polylines = edge_marker_polylines(
            EdgeMarker::DoubleTick,
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 100.0),
        );
        assert_eq!(polylines.len(), 2);
        assert!((polylines[0][0].y - 47.0).abs() < 1e-4);
        assert!((polylines[1][0].y - 53.0).abs() < 1e-4);
    }

    #[test]
    fn test_arrow_points_toward_end() {
        let polylines =
            edge_marker_polylines(EdgeMarker::Arrow, Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        let chevron = &polylines[0];
        assert_eq!(chevron.len(), 3);
        assert!(chevron[1].x > chevron[0].x);
        assert!(chevron[1].x > chevron[2].x);
        assert_eq!(
            edge_marker_polylines(EdgeMarker::DoubleArrow, Vec2::ZERO, Vec2::X).len(),
            2
        );
    }

    #[test]
    fn test_zero_length_edge_has_no_marker() {
        assert!(edge_marker_polylines(EdgeMarker::Tick, Vec2::ONE, Vec2::ONE).is_empty());
    }

    #[test]
    fn test_angle_label_outside_mark() {
        let marks = angle_marks(
            AngleKind::Arc,
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            flat,
        );
        let anchor = angle_label_anchor(Vec2::ZERO, &marks).unwrap();
        assert!(anchor.length() > 30.0);
        assert!((anchor.x - anchor.y).abs() < 1e-3);
    }
}
