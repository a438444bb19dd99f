//! Application menu bar and settings window

use eframe::egui;

use crate::i18n::{lang, t, Lang};
use crate::state::AppState;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.new_session")).clicked() {
            state.new_session();
            ui.close_menu();
        }
        if ui.button(t("menu.open")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                if let Err(e) = state.open_scene_file(&path) {
                    tracing::error!("{e}");
                }
            }
        }
        if ui
            .add_enabled(state.scene.scene().is_some(), egui::Button::new(t("menu.save")))
            .clicked()
        {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.save_title"))
                .add_filter("JSON", &["json"])
                .set_file_name("scene.json")
                .save_file()
            {
                match state.scene.save_file(&path) {
                    Ok(()) => tracing::info!("Saved scene to {}", path.display()),
                    Err(e) => tracing::error!("{e}"),
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.edit"), |ui| {
        if ui
            .add_enabled(state.scene.can_undo(), egui::Button::new(t("menu.undo")))
            .clicked()
        {
            state.undo();
            ui.close_menu();
        }
        if ui
            .add_enabled(state.scene.can_redo(), egui::Button::new(t("menu.redo")))
            .clicked()
        {
            state.redo();
            ui.close_menu();
        }
        ui.separator();
        let has_drawings = state.scene.scene().is_some_and(|s| s.has_drawings());
        if ui
            .add_enabled(has_drawings, egui::Button::new(t("menu.erase")))
            .clicked()
        {
            state.erase_drawings();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.sessions, t("menu.sessions"));
        ui.checkbox(&mut state.panels.tutor, t("menu.tutor"));
        ui.checkbox(&mut state.panels.chat, t("menu.chat"));
        ui.separator();
        if ui.button(t("menu.reset_view")).clicked() {
            state.canvas.reset_view(state.scene.scene());
            ui.close_menu();
        }
        if ui.button(t("menu.center_view")).clicked() {
            state.canvas.center_view(state.scene.scene());
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.selectable_label(lang() == Lang::Vi, "Tiếng Việt").clicked() {
                state.set_language(Lang::Vi);
                ui.close_menu();
            }
            if ui.selectable_label(lang() == Lang::En, "English").clicked() {
                state.set_language(Lang::En);
                ui.close_menu();
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        let mut voice = state.settings.ui.voice;
        if ui.checkbox(&mut voice, t("menu.voice")).changed() {
            state.set_voice(voice);
        }
        ui.separator();
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_server_settings(ui, state);
                show_canvas_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
}

fn show_server_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.server"));
    ui.horizontal(|ui| {
        ui.label(t("settings.server_url"));
        ui.text_edit_singleline(&mut state.settings.server.url);
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.timeout"));
        ui.add(
            egui::DragValue::new(&mut state.settings.server.timeout_secs)
                .speed(1)
                .range(5..=600),
        );
    });
    ui.add_space(10.0);
}

fn show_canvas_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.canvas"));
    ui.horizontal(|ui| {
        ui.label(t("settings.bg_color"));
        let [r, g, b] = state.settings.canvas.background_color;
        let mut color = egui::Color32::from_rgb(r, g, b);
        if ui.color_edit_button_srgba(&mut color).changed() {
            state.settings.canvas.background_color = [color.r(), color.g(), color.b()];
        }
    });
    ui.checkbox(&mut state.settings.canvas.show_camera_info, t("settings.camera_info"));
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.apply_server_settings();
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = crate::state::AppSettings::default();
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
