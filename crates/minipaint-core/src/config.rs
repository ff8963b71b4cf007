//! Whiteboard configuration.

use crate::palette::DEFAULT_COLOR;
use crate::shapes::{SerializableColor, Text};
use crate::storage::{StorageKeys, DEFAULT_AUTOSAVE_INTERVAL_SECS, DEFAULT_RECENT_LIMIT};
use crate::tools::FillMode;
use serde::{Deserialize, Serialize};

/// Tunables for a whiteboard. Every field has a default, so a partial JSON
/// object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: SerializableColor,
    /// Color selected at start.
    pub color: SerializableColor,
    pub brush_width: f64,
    pub spray_radius: f64,
    /// Dots per spray sample.
    pub spray_density: usize,
    pub fill_mode: FillMode,
    /// Maximum snapshots kept; `None` keeps all.
    pub history_limit: Option<usize>,
    pub autosave_enabled: bool,
    pub autosave_interval_secs: u64,
    pub recent_limit: usize,
    pub storage_keys: StorageKeys,
    pub text_content: String,
    pub font_size: f64,
    /// Hit-test slack in world units for select, erase and fill.
    pub hit_tolerance: f64,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: SerializableColor::white(),
            color: DEFAULT_COLOR,
            brush_width: 3.0,
            spray_radius: 20.0,
            spray_density: 20,
            fill_mode: FillMode::OneShot,
            history_limit: None,
            autosave_enabled: true,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
            recent_limit: DEFAULT_RECENT_LIMIT,
            storage_keys: StorageKeys::default(),
            text_content: Text::DEFAULT_CONTENT.to_string(),
            font_size: Text::DEFAULT_FONT_SIZE,
            hit_tolerance: 4.0,
        }
    }
}

impl WhiteboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WhiteboardConfig::default();
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.canvas_height, 600);
        assert_eq!(config.color.to_hex(), "#9b87f5");
        assert!((config.brush_width - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.history_limit, None);
        assert_eq!(config.autosave_interval_secs, 30);
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.storage_keys.projects, "mini-paint-projects");
    }

    #[test]
    fn test_partial_json() {
        let config = WhiteboardConfig::from_json_str(
            r#"{"canvas_width": 1024, "fill_mode": "persistent", "history_limit": 25}"#,
        )
        .unwrap();
        assert_eq!(config.canvas_width, 1024);
        assert_eq!(config.canvas_height, 600);
        assert_eq!(config.fill_mode, FillMode::Persistent);
        assert_eq!(config.history_limit, Some(25));
    }

    #[test]
    fn test_bad_json() {
        assert!(WhiteboardConfig::from_json_str("{\"canvas_width\": \"wide\"}").is_err());
    }
}
