//! Paints a [`Frame`] with egui's painter
//!
//! The frame is in canvas-local pixels; `origin` is the canvas rect's top-left.

use egui::epaint::{PathShape, QuadraticBezierShape};
use egui::{Color32, Painter, Pos2, Stroke};
use glam::Vec2;

use geotutor_gui_lib::viewport::frame::{Frame, Primitive, Rgba};

const DASH_LENGTH: f32 = 6.0;
/// Segments used to approximate a dashed circle
const CIRCLE_SEGMENTS: usize = 64;

pub fn color(rgba: Rgba) -> Color32 {
    let [r, g, b, a] = rgba;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Paint every item in frame order
pub fn paint_frame(painter: &Painter, origin: Pos2, frame: &Frame) {
    let to_screen = |p: Vec2| origin + egui::vec2(p.x, p.y);

    for item in &frame.items {
        match &item.primitive {
            Primitive::Polygon { points, fill } => {
                let pts: Vec<Pos2> = points.iter().map(|p| to_screen(*p)).collect();
                painter.add(PathShape::convex_polygon(pts, color(*fill), Stroke::NONE));
            }
            Primitive::Circle {
                center,
                radius,
                color: c,
                width,
                dashed,
            } => {
                let stroke = Stroke::new(*width, color(*c));
                if *dashed {
                    draw_dashed_circle(painter, to_screen(*center), *radius, stroke);
                } else {
                    painter.circle_stroke(to_screen(*center), *radius, stroke);
                }
            }
            Primitive::Segment {
                from,
                to,
                color: c,
                width,
            } => {
                painter.line_segment([to_screen(*from), to_screen(*to)], Stroke::new(*width, color(*c)));
            }
            Primitive::QuadCurve {
                start,
                control,
                end,
                color: c,
                width,
            } => {
                painter.add(QuadraticBezierShape::from_points_stroke(
                    [to_screen(*start), to_screen(*control), to_screen(*end)],
                    false,
                    Color32::TRANSPARENT,
                    Stroke::new(*width, color(*c)),
                ));
            }
            Primitive::Polyline {
                points,
                color: c,
                width,
            } => {
                let pts: Vec<Pos2> = points.iter().map(|p| to_screen(*p)).collect();
                if pts.len() >= 2 {
                    painter.add(PathShape::line(pts, Stroke::new(*width, color(*c))));
                }
            }
            Primitive::Dot {
                center,
                radius,
                fill,
                outline,
            } => {
                painter.circle(to_screen(*center), *radius, color(*fill), Stroke::new(1.5, color(*outline)));
            }
            Primitive::Text {
                pos,
                text,
                color: c,
                size,
            } => {
                painter.text(
                    to_screen(*pos),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(*size),
                    color(*c),
                );
            }
        }
    }
}

/// Dashed circle as alternating arc chords
fn draw_dashed_circle(painter: &Painter, center: Pos2, radius: f32, stroke: Stroke) {
    if radius < 0.5 {
        return;
    }
    let point = |i: usize| {
        let a = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
        center + egui::vec2(a.cos(), a.sin()) * radius
    };
    // Chord length is about 2πr/N; group chords so dashes stay near DASH_LENGTH
    let chord = std::f32::consts::TAU * radius / CIRCLE_SEGMENTS as f32;
    let per_dash = ((DASH_LENGTH / chord).round() as usize).max(1);
    let mut i = 0;
    while i < CIRCLE_SEGMENTS {
        let end = (i + per_dash).min(CIRCLE_SEGMENTS);
        let pts: Vec<Pos2> = (i..=end).map(point).collect();
        painter.add(PathShape::line(pts, stroke));
        i = end + per_dash;
    }
}
