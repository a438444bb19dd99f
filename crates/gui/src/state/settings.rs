//! Application settings

use serde::{Deserialize, Serialize};

use crate::i18n::Lang;
use crate::interaction::DEFAULT_DRAWING_COLOR;

/// Tutor server connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL of the tutor server (without `/api/...`)
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:3001".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Drawing surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Freehand color selected at startup
    pub drawing_color: String,
    /// Show camera angles and scale in a corner
    pub show_camera_info: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            background_color: [255, 255, 255],
            drawing_color: DEFAULT_DRAWING_COLOR.to_string(),
            show_camera_info: false,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    #[serde(default)]
    pub language: Lang,
    /// Show spoken captions for named points
    #[serde(default)]
    pub voice: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Lang::default(),
            voice: false,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub canvas: CanvasSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    fn dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "geotutor", "geotutor")
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = Self::dirs() {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring invalid settings file: {e}"),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = Self::dirs() {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(config_path, json) {
                        tracing::warn!("Failed to save settings: {e}");
                    }
                }
            }
        }
    }
}
