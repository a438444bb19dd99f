//! Sessions sidebar: one entry per problem, most recent first

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(t("session.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button(t("session.new")).clicked() {
                state.new_session();
            }
        });
    });
    ui.separator();

    let mut switch_to = None;
    let mut delete = None;
    let active = state.active_session_id();

    egui::ScrollArea::vertical()
        .id_salt("session_scroll")
        .show(ui, |ui| {
            for session in state.sessions.sessions() {
                let is_active = active.as_deref() == Some(session.id.as_str());
                ui.horizontal(|ui| {
                    let response = ui.selectable_label(is_active, &session.name);
                    let response = match &session.scene {
                        Some(scene) => response.on_hover_text(scene.summary()),
                        None => response.on_hover_text(t("session.empty")),
                    };
                    if response.clicked() {
                        switch_to = Some(session.id.clone());
                    }
                    response.context_menu(|ui| {
                        if ui.button(t("session.delete")).clicked() {
                            delete = Some(session.id.clone());
                            ui.close_menu();
                        }
                    });
                });
            }
        });

    // Apply after the list so the store is not borrowed
    if let Some(id) = switch_to {
        state.switch_session(&id);
    }
    if let Some(id) = delete {
        state.delete_session(&id);
    }
}
