//! Viewport overlay drawing (placeholder prompt, camera info, captions)

use std::collections::VecDeque;

use egui::Painter;

use geotutor_gui_lib::viewport::controller::ViewportState;

use crate::i18n::t;

/// Prompt shown while no scene is loaded
pub fn draw_placeholder(painter: &Painter, rect: egui::Rect) {
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        t("canvas.placeholder"),
        egui::FontId::proportional(18.0),
        egui::Color32::from_rgb(148, 163, 184),
    );
}

/// Camera angles and scale in the top-right corner
pub fn draw_camera_info(painter: &Painter, rect: egui::Rect, view: &ViewportState) {
    let overlay_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - 150.0, rect.top() + 4.0),
        egui::vec2(146.0, 44.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        egui::Color32::from_rgba_unmultiplied(241, 245, 249, 220),
    );
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "{}: {:.0}° / {:.0}°\nScale: {:.1}  Pan: {:.0},{:.0}",
            t("canvas.camera"),
            view.rotation_x,
            view.rotation_y,
            view.scale,
            view.pan.x,
            view.pan.y,
        ),
        egui::FontId::monospace(10.0),
        egui::Color32::from_rgb(71, 85, 105),
    );
}

/// Spoken captions along the bottom edge, newest last
pub fn draw_captions(painter: &Painter, rect: egui::Rect, captions: &VecDeque<String>) {
    let mut y = rect.bottom() - 12.0;
    for caption in captions.iter().rev() {
        let galley = painter.layout_no_wrap(
            caption.clone(),
            egui::FontId::proportional(14.0),
            egui::Color32::WHITE,
        );
        let size = galley.size() + egui::vec2(16.0, 8.0);
        let bubble = egui::Rect::from_center_size(
            egui::pos2(rect.center().x, y - size.y / 2.0),
            size,
        );
        painter.rect_filled(bubble, 6.0, egui::Color32::from_rgba_unmultiplied(15, 23, 42, 200));
        painter.galley(bubble.min + egui::vec2(8.0, 4.0), galley, egui::Color32::WHITE);
        y = bubble.top() - 4.0;
    }
}
