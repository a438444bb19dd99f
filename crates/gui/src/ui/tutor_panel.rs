//! Hints, solution and construction steps for the current scene

use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, SideTab};

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.selectable_value(&mut state.side_tab, SideTab::Hints, t("tutor.hints"));
        ui.selectable_value(&mut state.side_tab, SideTab::Solution, t("tutor.solution"));
        ui.selectable_value(&mut state.side_tab, SideTab::Steps, t("tutor.steps"));
    });
    ui.separator();

    match state.side_tab {
        SideTab::Hints => show_hints(ui, state),
        SideTab::Solution => show_solution(ui, state),
        SideTab::Steps => show_steps(ui, state),
    }
}

fn show_hints(ui: &mut Ui, state: &AppState) {
    let reasoning = state.scene.scene().map(|s| s.reasoning.as_slice()).unwrap_or_default();
    if reasoning.is_empty() {
        ui.weak(t("tutor.no_hints"));
        return;
    }
    for (i, step) in reasoning.iter().enumerate() {
        ui.label(egui::RichText::new(format!("{}. {}", i + 1, step.question)).strong());
        egui::CollapsingHeader::new(t("tutor.show_answer"))
            .id_salt(("hint", i))
            .default_open(false)
            .show(ui, |ui| {
                ui.label(&step.answer);
            });
        ui.add_space(4.0);
    }
}

fn show_solution(ui: &mut Ui, state: &AppState) {
    match state.scene.scene().and_then(|s| s.math_solution.as_deref()) {
        Some(solution) if !solution.trim().is_empty() => {
            ui.label(solution);
        }
        _ => {
            ui.weak(t("tutor.no_solution"));
        }
    }
}

fn show_steps(ui: &mut Ui, state: &mut AppState) {
    let count = state.scene.step_count();
    if count == 0 {
        ui.weak(t("tutor.no_steps"));
        return;
    }
    let current = state.scene.current_step();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(current > 0, egui::Button::new(t("tutor.prev")))
            .clicked()
        {
            state.prev_step();
        }
        ui.label(format!("{} {}/{count}", t("tutor.step"), current + 1));
        if ui
            .add_enabled(current + 1 < count, egui::Button::new(t("tutor.next")))
            .clicked()
        {
            state.next_step();
        }
    });
    ui.separator();

    let mut jump = None;
    if let Some(scene) = state.scene.scene() {
        for (i, step) in scene.steps.iter().enumerate() {
            let number = if step.step_number > 0 { step.step_number as usize } else { i + 1 };
            let text = format!("{number}. {}", step.description);
            if ui.selectable_label(i == current, text).clicked() {
                jump = Some(i);
            }
        }
    }
    if let Some(i) = jump {
        state.set_step(i);
    }
}
