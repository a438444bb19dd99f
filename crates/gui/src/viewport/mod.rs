//! Drawing surface panel: egui input in, painted frame out

mod overlays;
mod renderer;

use std::collections::HashSet;

use egui::Ui;
use glam::Vec2;

use crate::interaction::{GestureState, PointerId};
use crate::state::AppState;
use geotutor_gui_lib::viewport::frame::{parse_hex_color, Rgba, INK};
use geotutor_gui_lib::viewport::picking::pick_label;

/// Mouse pointer id; touches are numbered from 1
const MOUSE: PointerId = 0;

/// Palette swatch color for a hex string
pub fn parse_color(hex: &str) -> Rgba {
    parse_hex_color(hex, INK)
}

/// Drawing surface panel
pub struct ViewportPanel {
    /// Active touches; mouse events emulated from touches are ignored while set
    touches: HashSet<PointerId>,
    /// Elements skipped in the last painted frame
    last_skipped: usize,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            touches: HashSet::new(),
            last_skipped: 0,
        }
    }

    pub fn last_skipped(&self) -> usize {
        self.last_skipped
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        state.canvas.set_dimensions(rect.width(), rect.height());
        state.sync_canvas();

        // ── Pointer input ─────────────────────────────
        self.handle_pointer_events(ui, rect, state);

        // ── Wheel zoom ─────────────────────────────
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                state.canvas.wheel_zoom(scroll);
            }
        }

        self.update_cursor(ui, &response, rect, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        // ── Paint ─────────────────────────────
        let painter = ui.painter_at(rect);
        let [r, g, b] = state.settings.canvas.background_color;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(r, g, b));

        let highlight = state.highlight_ids();
        let frame = state.canvas.frame(state.scene.scene(), &highlight);
        self.last_skipped = frame.skipped;

        if frame.placeholder {
            overlays::draw_placeholder(&painter, rect);
        } else {
            renderer::paint_frame(&painter, rect.min, &frame);
        }

        if state.settings.canvas.show_camera_info {
            overlays::draw_camera_info(&painter, rect, state.canvas.viewport.view());
        }
        if state.settings.ui.voice && !state.captions.is_empty() {
            overlays::draw_captions(&painter, rect, &state.captions);
        }
    }

    fn handle_pointer_events(&mut self, ui: &Ui, rect: egui::Rect, state: &mut AppState) {
        let events = ui.input(|i| i.events.clone());
        let local = |pos: egui::Pos2| Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);
        // Presses only count when nothing else sits on top of the canvas
        let over_canvas = |pos: egui::Pos2| {
            rect.contains(pos) && ui.ctx().layer_id_at(pos) == Some(ui.layer_id())
        };

        for event in events {
            let actions = match event {
                egui::Event::Touch { id, phase, pos, .. } => {
                    let pointer = id.0.wrapping_add(1);
                    match phase {
                        egui::TouchPhase::Start if over_canvas(pos) => {
                            self.touches.insert(pointer);
                            state.canvas.pointer_down(state.scene.scene(), pointer, local(pos))
                        }
                        egui::TouchPhase::Move if self.touches.contains(&pointer) => {
                            state.canvas.pointer_move(pointer, local(pos))
                        }
                        egui::TouchPhase::End if self.touches.remove(&pointer) => {
                            state.canvas.pointer_up(state.scene.scene(), pointer)
                        }
                        egui::TouchPhase::Cancel if self.touches.remove(&pointer) => {
                            state.canvas.pointer_cancel(pointer);
                            continue;
                        }
                        _ => continue,
                    }
                }
                _ if !self.touches.is_empty() => continue,
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if pressed {
                        if !over_canvas(pos) {
                            continue;
                        }
                        state.canvas.pointer_down(state.scene.scene(), MOUSE, local(pos))
                    } else {
                        state.canvas.pointer_up(state.scene.scene(), MOUSE)
                    }
                }
                egui::Event::PointerMoved(pos) => state.canvas.pointer_move(MOUSE, local(pos)),
                egui::Event::PointerGone => {
                    state.canvas.pointer_cancel(MOUSE);
                    continue;
                }
                _ => continue,
            };
            state.apply_canvas_actions(actions);
        }
    }

    fn update_cursor(&self, ui: &Ui, response: &egui::Response, rect: egui::Rect, state: &AppState) {
        if !response.hovered() {
            return;
        }
        let interaction = &state.canvas.interaction;
        let icon = match interaction.gesture() {
            GestureState::DraggingLabel { .. } | GestureState::Panning => egui::CursorIcon::Grabbing,
            GestureState::DrawingStroke { .. } => egui::CursorIcon::Crosshair,
            GestureState::Idle if interaction.is_drawing_mode() => egui::CursorIcon::Crosshair,
            GestureState::Idle if interaction.is_pan_mode() => egui::CursorIcon::Grab,
            GestureState::Idle => {
                let over_label = match (state.scene.scene(), response.hover_pos()) {
                    (Some(scene), Some(pos)) => pick_label(
                        scene,
                        state.canvas.viewport.cached_projections(),
                        interaction.label_offsets(),
                        Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y),
                    )
                    .is_some(),
                    _ => false,
                };
                if over_label {
                    egui::CursorIcon::Grab
                } else {
                    egui::CursorIcon::Default
                }
            }
        };
        ui.ctx().set_cursor_icon(icon);
    }
}
