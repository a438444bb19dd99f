//! Undo/redo functionality

use super::SceneState;

impl SceneState {
    /// Undo last change
    pub fn undo(&mut self) {
        let Some(current) = self.scene.as_mut() else {
            return;
        };
        if let Some(prev) = self.undo_stack.pop() {
            self.redo_stack.push(std::mem::replace(current, prev));
            self.version += 1;
        }
    }

    /// Redo last undone change
    pub fn redo(&mut self) {
        let Some(current) = self.scene.as_mut() else {
            return;
        };
        if let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push(std::mem::replace(current, next));
            self.version += 1;
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
