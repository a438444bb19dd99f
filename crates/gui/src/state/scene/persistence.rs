//! Scene files: open/save a scene as JSON

use std::path::Path;

use shared::Scene;

use super::SceneState;

impl SceneState {
    /// Read a scene JSON file
    pub fn load_file(path: &Path) -> Result<Scene, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&json).map_err(|e| format!("Invalid scene JSON in {}: {e}", path.display()))
    }

    /// Write the current scene as pretty JSON
    pub fn save_file(&self, path: &Path) -> Result<(), String> {
        let scene = self.scene.as_ref().ok_or("No scene to save")?;
        let json = serde_json::to_string_pretty(scene).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }
}
