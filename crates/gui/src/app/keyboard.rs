//! Keyboard shortcut handling

use eframe::egui;
use glam::Vec2;

use crate::state::AppState;

/// Arrow-key pan distance in pixels
const KEY_PAN_STEP: f32 = 20.0;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+Z: undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            state.undo();
        }
        // Ctrl+Shift+Z or Ctrl+Y: redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            state.redo();
        }
        // Ctrl+N: new problem
        if i.modifiers.command && i.key_pressed(egui::Key::N) {
            state.new_session();
        }
        // Home: reset camera
        if i.key_pressed(egui::Key::Home) {
            state.canvas.reset_view(state.scene.scene());
        }
        // D: toggle freehand drawing
        if i.key_pressed(egui::Key::D) && !i.modifiers.command {
            state.canvas.toggle_drawing_mode();
        }
        // Escape: leave drawing/pan mode
        if i.key_pressed(egui::Key::Escape) {
            if state.canvas.interaction.is_drawing_mode() {
                state.canvas.toggle_drawing_mode();
            } else if state.canvas.interaction.is_pan_mode() {
                state.canvas.toggle_pan_mode();
            }
        }
        // +/-: zoom
        if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
            state.canvas.zoom_in();
        }
        if i.key_pressed(egui::Key::Minus) {
            state.canvas.zoom_out();
        }
        // Q/E: rotate 3D scenes
        if i.key_pressed(egui::Key::Q) {
            state.canvas.rotate(state.scene.scene(), -1);
        }
        if i.key_pressed(egui::Key::E) {
            state.canvas.rotate(state.scene.scene(), 1);
        }
        // Arrows: pan
        let mut pan = Vec2::ZERO;
        if i.key_pressed(egui::Key::ArrowLeft) {
            pan.x -= KEY_PAN_STEP;
        }
        if i.key_pressed(egui::Key::ArrowRight) {
            pan.x += KEY_PAN_STEP;
        }
        if i.key_pressed(egui::Key::ArrowUp) {
            pan.y -= KEY_PAN_STEP;
        }
        if i.key_pressed(egui::Key::ArrowDown) {
            pan.y += KEY_PAN_STEP;
        }
        if pan != Vec2::ZERO {
            state.canvas.pan(pan);
        }
        // PageUp/PageDown: drawing steps
        if i.key_pressed(egui::Key::PageDown) {
            state.next_step();
        }
        if i.key_pressed(egui::Key::PageUp) {
            state.prev_step();
        }
    });
}
