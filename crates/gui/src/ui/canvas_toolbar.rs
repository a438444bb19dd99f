//! Drawing surface controls: zoom, rotation, pan and freehand tools

use egui::Ui;

use crate::i18n::t;
use crate::interaction::DRAWING_COLORS;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let has_scene = state.scene.scene().is_some();
    let is_3d = state.scene.scene().is_some_and(|s| s.kind.is_3d());

    ui.horizontal(|ui| {
        ui.add_enabled_ui(has_scene, |ui| {
            // ── Camera ──
            if ui.button("➕").on_hover_text(t("tb.zoom_in")).clicked() {
                state.canvas.zoom_in();
            }
            if ui.button("➖").on_hover_text(t("tb.zoom_out")).clicked() {
                state.canvas.zoom_out();
            }
            if is_3d {
                if ui.button("⟲").on_hover_text(t("tb.rotate_left")).clicked() {
                    state.canvas.rotate(state.scene.scene(), -1);
                }
                if ui.button("⟳").on_hover_text(t("tb.rotate_right")).clicked() {
                    state.canvas.rotate(state.scene.scene(), 1);
                }
            }
            if ui.button(t("tb.reset")).clicked() {
                state.canvas.reset_view(state.scene.scene());
            }

            ui.separator();

            // ── Modes ──
            let pan_on = state.canvas.interaction.is_pan_mode();
            if ui.selectable_label(pan_on, format!("✋ {}", t("tb.pan"))).clicked() {
                state.canvas.toggle_pan_mode();
            }
            let draw_on = state.canvas.interaction.is_drawing_mode();
            if ui.selectable_label(draw_on, format!("✏ {}", t("tb.draw"))).clicked() {
                state.canvas.toggle_drawing_mode();
            }

            if draw_on {
                show_palette(ui, state);
            }

            let has_drawings = state.scene.scene().is_some_and(|s| s.has_drawings());
            if ui
                .add_enabled(has_drawings, egui::Button::new(format!("🗑 {}", t("tb.erase"))))
                .clicked()
            {
                state.erase_drawings();
            }
        });
    });
}

fn show_palette(ui: &mut Ui, state: &mut AppState) {
    ui.label(t("tb.color"));
    let current = state.canvas.interaction.drawing_color().to_string();
    for hex in DRAWING_COLORS {
        let [r, g, b, _] = crate::viewport::parse_color(hex);
        let color = egui::Color32::from_rgb(r, g, b);
        let selected = current.eq_ignore_ascii_case(hex);
        let (rect, response) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::click());
        ui.painter().circle_filled(rect.center(), 7.0, color);
        if selected {
            ui.painter().circle_stroke(
                rect.center(),
                8.5,
                egui::Stroke::new(2.0, ui.visuals().selection.bg_fill),
            );
        }
        if response.clicked() {
            state.canvas.interaction.set_drawing_color(hex);
            state.settings.canvas.drawing_color = hex.to_string();
        }
    }
}
