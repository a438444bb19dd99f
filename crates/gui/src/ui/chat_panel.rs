use egui::Ui;
use shared::{ChatMessage, ChatRole};

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("chat.title"));
    ui.separator();

    // Track whether we need a retry action after the scroll area
    let mut wants_retry = false;

    // Message history (scrollable)
    let scroll_height = (ui.available_height() - 60.0).max(60.0);
    egui::ScrollArea::vertical()
        .id_salt("chat_scroll")
        .max_height(scroll_height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            let can_retry = state.chat.can_retry();
            if let Some(session) = state.sessions.active() {
                let msg_count = session.messages.len();
                for (i, msg) in session.messages.iter().enumerate() {
                    let is_last = i + 1 == msg_count;
                    if show_message(ui, msg, is_last && msg.is_error && can_retry) {
                        wants_retry = true;
                    }
                }
            }

            if state.chat.is_loading {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak(t("chat.thinking"));
                });
            }
        });

    // Handle retry outside scroll area (to avoid borrow issues)
    if wants_retry {
        state.chat.retry();
    }

    // Attached photo
    if state.chat.pending_image.is_some() {
        ui.horizontal(|ui| {
            ui.weak(format!("📷 {}", t("chat.attached")));
            if ui.small_button(t("chat.remove_image")).clicked() {
                state.chat.pending_image = None;
            }
        });
    }

    // Input area
    ui.add_space(2.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!state.chat.is_loading, egui::Button::new("📷"))
            .on_hover_text(t("chat.attach"))
            .clicked()
        {
            pick_image(state);
        }

        let available_w = ui.available_width() - 52.0;
        let input_resp = ui.add_sized(
            [available_w.max(40.0), 22.0],
            egui::TextEdit::singleline(&mut state.chat.input)
                .hint_text(t("chat.hint"))
                .desired_width(available_w.max(40.0)),
        );

        let enter_pressed =
            input_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let has_content = !state.chat.input.trim().is_empty() || state.chat.pending_image.is_some();
        let can_send = !state.chat.is_loading && has_content;

        let send_clicked = ui
            .add_enabled(can_send, egui::Button::new(t("chat.send")))
            .clicked();

        if (send_clicked || enter_pressed) && can_send {
            state.send_message();
        }
    });
}

fn pick_image(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title(t("chat.attach_title"))
        .add_filter("Image", &["png", "jpg", "jpeg", "webp", "gif"])
        .pick_file()
    else {
        return;
    };
    match crate::client::load_image(&path) {
        Ok(image) => state.chat.pending_image = Some(image),
        Err(e) => tracing::error!("{e}"),
    }
}

/// Render a single chat message. Returns true if retry was clicked.
fn show_message(ui: &mut Ui, msg: &ChatMessage, can_retry: bool) -> bool {
    let mut retry_clicked = false;

    let (prefix, color, bg) = if msg.is_error {
        (
            t("chat.tutor"),
            egui::Color32::from_rgb(185, 28, 28),
            egui::Color32::from_rgb(254, 226, 226),
        )
    } else {
        match msg.role {
            ChatRole::User => (
                t("chat.you"),
                egui::Color32::from_rgb(29, 78, 216),
                egui::Color32::from_rgb(219, 234, 254),
            ),
            ChatRole::Model => (
                t("chat.tutor"),
                egui::Color32::from_rgb(21, 128, 61),
                egui::Color32::from_rgb(241, 245, 249),
            ),
        }
    };

    egui::Frame::NONE
        .fill(bg)
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(6))
        .outer_margin(egui::Margin::symmetric(0, 2))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.colored_label(color, format!("{prefix}:"));
                ui.label(&msg.text);
            });

            // Retry button for error messages
            if can_retry {
                ui.add_space(2.0);
                if ui.small_button(t("chat.retry")).clicked() {
                    retry_clicked = true;
                }
            }
        });

    retry_clicked
}
