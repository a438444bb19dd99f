pub mod chat;
pub mod scene;
pub mod selection;
pub mod sessions;
pub mod settings;

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use shared::{ObjectId, Scene};

use crate::canvas::{Canvas, CanvasActions};
use crate::i18n::{set_lang, t, Lang};
use chat::ChatState;
pub use scene::SceneState;
pub use sessions::SessionStore;
pub use settings::AppSettings;

/// Spoken captions kept on screen
const MAX_CAPTIONS: usize = 3;

/// Panel visibility flags
pub struct PanelVisibility {
    pub sessions: bool,
    pub chat: bool,
    pub tutor: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            sessions: true,
            chat: true,
            tutor: true,
        }
    }
}

/// Tab of the tutor side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideTab {
    Hints,
    Solution,
    Steps,
}

/// Combined application state
pub struct AppState {
    pub scene: SceneState,
    pub sessions: SessionStore,
    pub chat: ChatState,
    pub canvas: Canvas,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    pub side_tab: SideTab,
    /// Recent speech side-channel texts, oldest first
    pub captions: VecDeque<String>,
    /// Show settings window
    pub show_settings_window: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_stores(AppSettings::load(), SessionStore::load())
    }
}

impl AppState {
    /// State over the given settings and sessions. An empty store gets a
    /// fresh session so there is always something active.
    pub fn with_stores(settings: AppSettings, sessions: SessionStore) -> Self {
        set_lang(settings.ui.language);
        let mut canvas = Canvas::new();
        canvas.interaction.set_drawing_color(settings.canvas.drawing_color.clone());

        let mut state = Self {
            scene: SceneState::default(),
            sessions,
            chat: ChatState::new(&settings.server.url, settings.server.timeout_secs),
            canvas,
            panels: PanelVisibility::default(),
            settings,
            side_tab: SideTab::Solution,
            captions: VecDeque::new(),
            show_settings_window: false,
        };
        if state.sessions.is_empty() {
            state.create_session();
        }
        state.load_active();
        state
    }

    pub fn active_session_id(&self) -> Option<ObjectId> {
        self.sessions.active_id().map(str::to_string)
    }

    /// Element ids highlighted by the active drawing step
    pub fn highlight_ids(&self) -> HashSet<ObjectId> {
        self.scene.highlight_ids()
    }

    /// Keep the canvas in step with the scene and the active session.
    pub fn sync_canvas(&mut self) {
        self.canvas
            .sync_scene(self.scene.scene(), self.scene.version(), self.sessions.active_id());
    }

    // ── Sessions ──

    /// Copy the scene and step back into the active session.
    fn store_current(&mut self) {
        let scene = self.scene.scene.clone();
        let step = self.scene.current_step();
        self.sessions.update_active(|s| {
            s.scene = scene;
            s.current_step_index = step;
        });
    }

    /// Show the active session's scene and step.
    fn load_active(&mut self) {
        let (scene, step) = self
            .sessions
            .active()
            .map(|s| (s.scene.clone(), s.current_step_index))
            .unwrap_or((None, 0));
        self.scene.replace(scene, step);
        self.auto_side_tab();
        self.sync_canvas();
    }

    fn create_session(&mut self) -> ObjectId {
        let name = format!("{} {}", t("session.default_name"), self.sessions.len() + 1);
        self.sessions.create(name, t("chat.welcome"))
    }

    pub fn new_session(&mut self) -> ObjectId {
        self.store_current();
        let id = self.create_session();
        tracing::info!("Created session {id}");
        self.load_active();
        self.sessions.save();
        id
    }

    pub fn switch_session(&mut self, id: &str) -> bool {
        if self.sessions.active_id() == Some(id) {
            return false;
        }
        self.store_current();
        if !self.sessions.switch(id) {
            return false;
        }
        self.load_active();
        self.sessions.save();
        true
    }

    pub fn delete_session(&mut self, id: &str) -> bool {
        let was_active = self.sessions.active_id() == Some(id);
        if !self.sessions.delete(id) {
            return false;
        }
        tracing::info!("Deleted session {id}");
        if self.sessions.is_empty() {
            self.create_session();
        }
        if was_active {
            self.load_active();
        }
        self.sessions.save();
        true
    }

    /// Open a scene (CLI argument or file dialog) in a fresh session.
    pub fn load_scene_into_new_session(&mut self, scene: Scene) {
        self.new_session();
        self.scene.replace(Some(scene), 0);
        self.store_current();
        self.auto_side_tab();
        self.sync_canvas();
        self.sessions.save();
    }

    pub fn open_scene_file(&mut self, path: &Path) -> Result<(), String> {
        let scene = SceneState::load_file(path)?;
        tracing::info!("Opened scene {}: {}", path.display(), scene.summary());
        self.load_scene_into_new_session(scene);
        Ok(())
    }

    // ── Scene edits ──

    /// Apply what the canvas asked for: scene patches and spoken texts.
    pub fn apply_canvas_actions(&mut self, actions: CanvasActions) {
        if let Some(patch) = actions.patch {
            if self.scene.apply_patch(&patch) {
                self.after_scene_edit();
            }
        }
        for text in actions.spoken {
            if self.settings.ui.voice {
                tracing::info!("Speaking: {text}");
                self.captions.push_back(text);
                while self.captions.len() > MAX_CAPTIONS {
                    self.captions.pop_front();
                }
            }
        }
    }

    pub fn erase_drawings(&mut self) {
        let actions = self.canvas.erase_drawings(self.scene.scene());
        self.apply_canvas_actions(actions);
    }

    pub fn undo(&mut self) {
        if self.scene.can_undo() {
            self.scene.undo();
            self.after_scene_edit();
        }
    }

    pub fn redo(&mut self) {
        if self.scene.can_redo() {
            self.scene.redo();
            self.after_scene_edit();
        }
    }

    fn after_scene_edit(&mut self) {
        self.store_current();
        self.sync_canvas();
        self.sessions.save();
    }

    // ── Steps ──

    pub fn next_step(&mut self) {
        self.scene.next_step();
        self.store_current();
    }

    pub fn prev_step(&mut self) {
        self.scene.prev_step();
        self.store_current();
    }

    pub fn set_step(&mut self, index: usize) {
        self.scene.set_step(index);
        self.store_current();
    }

    /// Hints when the scene carries reasoning, the solution otherwise
    fn auto_side_tab(&mut self) {
        let has_reasoning = self.scene.scene().is_some_and(|s| !s.reasoning.is_empty());
        self.side_tab = if has_reasoning { SideTab::Hints } else { SideTab::Solution };
    }

    // ── Chat ──

    pub fn send_message(&mut self) {
        self.chat.send_message(&mut self.sessions);
    }

    /// Fold finished generations in; true when the visible scene changed.
    pub fn poll_chat(&mut self) -> bool {
        let changed = self.chat.poll_responses(&mut self.sessions, &mut self.scene);
        if changed {
            self.auto_side_tab();
            self.sync_canvas();
        }
        changed
    }

    // ── Settings ──

    pub fn set_language(&mut self, lang: Lang) {
        self.settings.ui.language = lang;
        set_lang(lang);
        self.settings.save();
    }

    pub fn set_voice(&mut self, enabled: bool) {
        self.settings.ui.voice = enabled;
        if !enabled {
            self.captions.clear();
        }
        self.settings.save();
    }

    /// Push edited server settings to the chat client and persist them.
    pub fn apply_server_settings(&mut self) {
        let server = &self.settings.server;
        self.chat.set_server(&server.url, server.timeout_secs);
        self.settings.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ScenePatch;
    use crate::fixtures;
    use shared::{FreehandStroke, ReasoningStep, StrokePoint};

    fn app() -> AppState {
        AppState::with_stores(AppSettings::default(), SessionStore::new())
    }

    fn stroke() -> FreehandStroke {
        FreehandStroke {
            id: "s1".into(),
            points: vec![StrokePoint { x: 0.0, y: 0.0 }, StrokePoint { x: 5.0, y: 5.0 }],
            color: "#ef4444".into(),
            width: 2.0,
        }
    }

    #[test]
    fn test_empty_store_gets_session() {
        let state = app();
        assert_eq!(state.sessions.len(), 1);
        assert!(state.active_session_id().is_some());
        assert!(state.scene.scene().is_none());
    }

    #[test]
    fn test_switch_session_keeps_scenes_apart() {
        let mut state = app();
        let first = state.active_session_id().unwrap();
        state.load_scene_into_new_session(fixtures::triangle_abc());
        let second = state.active_session_id().unwrap();
        assert_ne!(first, second);
        assert!(state.scene.scene().is_some());

        assert!(state.switch_session(&first));
        assert!(state.scene.scene().is_none());
        assert!(!state.switch_session(&first));

        assert!(state.switch_session(&second));
        assert_eq!(state.scene.scene().map(|s| s.points.len()), Some(3));
    }

    #[test]
    fn test_delete_last_session_creates_one() {
        let mut state = app();
        let id = state.active_session_id().unwrap();
        assert!(state.delete_session(&id));
        assert_eq!(state.sessions.len(), 1);
        assert_ne!(state.active_session_id(), Some(id));
    }

    #[test]
    fn test_stroke_patch_stored_in_session() {
        let mut state = app();
        state.load_scene_into_new_session(fixtures::segment_ab());
        state.apply_canvas_actions(CanvasActions {
            patch: Some(ScenePatch::AppendStroke(stroke())),
            spoken: Vec::new(),
        });
        let stored = state.sessions.active().and_then(|s| s.scene.clone()).unwrap();
        assert_eq!(stored.drawings.len(), 1);

        state.undo();
        let stored = state.sessions.active().and_then(|s| s.scene.clone()).unwrap();
        assert!(stored.drawings.is_empty());
        state.redo();
        state.erase_drawings();
        assert_eq!(state.scene.scene().map(|s| s.drawings.len()), Some(0));
    }

    #[test]
    fn test_captions_only_with_voice() {
        let mut state = app();
        let spoken = || CanvasActions {
            patch: None,
            spoken: vec!["Điểm A".into()],
        };
        state.apply_canvas_actions(spoken());
        assert!(state.captions.is_empty());

        state.settings.ui.voice = true;
        for _ in 0..5 {
            state.apply_canvas_actions(spoken());
        }
        assert_eq!(state.captions.len(), MAX_CAPTIONS);
    }

    #[test]
    fn test_side_tab_follows_reasoning() {
        let mut state = app();
        let mut scene = fixtures::triangle_abc();
        state.load_scene_into_new_session(scene.clone());
        assert_eq!(state.side_tab, SideTab::Solution);

        scene.reasoning.push(ReasoningStep {
            id: "r1".into(),
            question: "Tam giác ABC là tam giác gì?".into(),
            answer: "Vuông tại A".into(),
            related_element_ids: Vec::new(),
        });
        state.load_scene_into_new_session(scene);
        assert_eq!(state.side_tab, SideTab::Hints);
    }

    #[test]
    fn test_step_index_persisted() {
        let mut state = app();
        state.load_scene_into_new_session(fixtures::pyramid());
        state.next_step();
        assert_eq!(state.scene.current_step(), 1);
        assert_eq!(state.sessions.active().map(|s| s.current_step_index), Some(1));
    }
}
