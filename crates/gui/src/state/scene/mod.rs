//! Scene state management
//!
//! Holds the active session's scene with step navigation and undo/redo of
//! drawing-surface patches.

mod history;
mod persistence;

use std::collections::HashSet;

use shared::{DrawingStep, ObjectId, Scene};

use crate::interaction::ScenePatch;

/// Active scene with undo/redo history
#[derive(Default)]
pub struct SceneState {
    /// Current scene, `None` until the tutor has drawn something
    pub scene: Option<Scene>,
    /// Undo stack - previous states
    pub(crate) undo_stack: Vec<Scene>,
    /// Redo stack - undone states
    pub(crate) redo_stack: Vec<Scene>,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
    /// Index into `scene.steps`
    current_step: usize,
}

impl SceneState {
    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Replace the scene wholesale (new generation or session switch).
    /// History does not survive a replacement.
    pub fn replace(&mut self, scene: Option<Scene>, step: usize) {
        self.scene = scene;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_step = 0;
        self.set_step(step);
        self.version += 1;
    }

    /// Apply a drawing-surface patch; returns whether the scene changed.
    pub fn apply_patch(&mut self, patch: &ScenePatch) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        let before = scene.clone();
        if !patch.apply(scene) {
            return false;
        }
        self.undo_stack.push(before);
        if self.undo_stack.len() > 100 {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.version += 1;
        true
    }

    // ── Steps ──

    pub fn step_count(&self) -> usize {
        self.scene.as_ref().map_or(0, |s| s.steps.len())
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Jump to a step, clamped to the step list
    pub fn set_step(&mut self, index: usize) {
        self.current_step = index.min(self.step_count().saturating_sub(1));
    }

    pub fn next_step(&mut self) {
        self.set_step(self.current_step + 1);
    }

    pub fn prev_step(&mut self) {
        self.set_step(self.current_step.saturating_sub(1));
    }

    pub fn active_step(&self) -> Option<&DrawingStep> {
        self.scene.as_ref()?.steps.get(self.current_step)
    }

    /// Element ids introduced by the active step
    pub fn highlight_ids(&self) -> HashSet<ObjectId> {
        self.active_step()
            .map(|s| s.active_element_ids.iter().cloned().collect())
            .unwrap_or_default()
    }
}
