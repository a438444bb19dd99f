//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{canvas_toolbar, chat_panel, session_list, status_bar, tutor_panel};
use crate::viewport::ViewportPanel;

/// Main application
pub struct TutorApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl TutorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_scene: Option<shared::Scene>) -> Self {
        let mut state = AppState::default();

        // CLI scene opens in its own session
        if let Some(scene) = initial_scene {
            state.load_scene_into_new_session(scene);
        }

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let last_font_size = state.settings.ui.font_size;
        Self {
            state,
            viewport: ViewportPanel::new(),
            last_font_size,
        }
    }
}

impl eframe::App for TutorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state);

        self.state.poll_chat();
        if self.state.chat.is_loading {
            // Keep polling while a generation is in flight
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Canvas toolbar ────────────────────────────────────
        egui::TopBottomPanel::top("canvas_toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                canvas_toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state, self.viewport.last_skipped());
            });

        // ── Left panel: sessions ─────────────────────────────
        if self.state.panels.sessions {
            egui::SidePanel::left("sessions")
                .default_width(200.0)
                .width_range(140.0..=360.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    session_list::show(ui, &mut self.state);
                });
        }

        // ── Right panel: tutor tabs + chat ───────────────────
        self.show_right_panel(ctx);

        // ── Central panel: drawing surface ───────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }
}

impl TutorApp {
    fn show_right_panel(&mut self, ctx: &egui::Context) {
        let show_tutor = self.state.panels.tutor;
        let show_chat = self.state.panels.chat;
        if !show_tutor && !show_chat {
            return;
        }

        egui::SidePanel::right("right_panel")
            .default_width(330.0)
            .width_range(240.0..=560.0)
            .resizable(true)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
            )
            .show(ctx, |ui| {
                if show_tutor && show_chat {
                    let total = ui.available_height();
                    let tutor_height = (total * 0.45).max(120.0);

                    egui::ScrollArea::vertical()
                        .id_salt("tutor_scroll")
                        .max_height(tutor_height)
                        .show(ui, |ui| {
                            tutor_panel::show(ui, &mut self.state);
                        });

                    ui.add_space(2.0);
                    ui.separator();
                    ui.add_space(2.0);

                    chat_panel::show(ui, &mut self.state);
                } else if show_tutor {
                    egui::ScrollArea::vertical()
                        .id_salt("tutor_scroll_full")
                        .show(ui, |ui| {
                            tutor_panel::show(ui, &mut self.state);
                        });
                } else {
                    chat_panel::show(ui, &mut self.state);
                }
            });
    }
}
