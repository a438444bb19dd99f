use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState, skipped: usize) {
    ui.horizontal(|ui| {
        match state.scene.scene() {
            Some(scene) => ui.weak(scene.summary()),
            None => ui.weak(t("status.no_scene")),
        };

        if skipped > 0 {
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(180, 83, 9),
                format!("{skipped} {}", t("canvas.skipped")),
            );
        }

        ui.separator();

        let interaction = &state.canvas.interaction;
        if interaction.is_drawing_mode() {
            ui.label(t("status.drawing"));
        } else if interaction.is_pan_mode() {
            ui.label(t("status.panning"));
        } else if let Some(selected) = interaction.selection.primary() {
            ui.label(format!("{}: {}", t("status.selected"), selected.id));
        }

        if state.chat.is_loading {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(217, 119, 6), t("chat.thinking"));
        }

        // Right-aligned scale and version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("GeoTutor v0.1");
            ui.separator();
            let scale = state.canvas.viewport.view().scale;
            ui.weak(format!("{}: {scale:.0}", t("status.zoom")));
        });
    });
}
