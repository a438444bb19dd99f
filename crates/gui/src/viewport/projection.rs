//! Weak-perspective projection and label placement.
//!
//! Everything here is a pure function of its arguments: rotate the point about
//! Y then X, drop the rotated depth, scale, and move the origin to the middle
//! of the canvas with screen Y pointing down.

use glam::{Vec2, Vec3};
use shared::Point3D;

/// Default distance (pixels) between a point and its label
pub const LABEL_OFFSET: f32 = 22.0;

/// Scene point as a glam vector
pub fn to_vec3(point: &Point3D) -> Vec3 {
    Vec3::new(point.x as f32, point.y as f32, point.z as f32)
}

/// Project a scene-space point to canvas pixels (without pan).
///
/// Angles are in degrees. A zero scale collapses everything onto the canvas
/// center rather than failing.
pub fn project(point: Vec3, angle_x: f32, angle_y: f32, scale: f32, width: f32, height: f32) -> Vec2 {
    let rad_x = angle_x.to_radians();
    let rad_y = angle_y.to_radians();
    let (sin_y, cos_y) = rad_y.sin_cos();
    let (sin_x, cos_x) = rad_x.sin_cos();

    // Around Y
    let x = point.x * cos_y - point.z * sin_y;
    let z = point.x * sin_y + point.z * cos_y;

    // Around X
    let y = point.y * cos_x - z * sin_x;

    Vec2::new(x * scale + width / 2.0, -y * scale + height / 2.0)
}

/// Mean of the points, origin when empty
pub fn centroid_3d<I: IntoIterator<Item = Vec3>>(points: I) -> Vec3 {
    let (sum, count) = points
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(s, n), p| (s + p, n + 1));
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / count as f32
    }
}

/// Mean of the points, origin when empty
pub fn centroid_2d<I: IntoIterator<Item = Vec2>>(points: I) -> Vec2 {
    let (sum, count) = points
        .into_iter()
        .fold((Vec2::ZERO, 0usize), |(s, n), p| (s + p, n + 1));
    if count == 0 {
        Vec2::ZERO
    } else {
        sum / count as f32
    }
}

/// Push a label `offset` pixels outward from `center` through `point`.
/// Points sitting on the center get a fixed up-right offset.
pub fn label_anchor(point: Vec2, center: Vec2, offset: f32) -> Vec2 {
    let d = point - center;
    let length = d.length();
    if length < 1.0 {
        return Vec2::new(point.x + offset, point.y - offset);
    }
    point + d / length * offset
}
