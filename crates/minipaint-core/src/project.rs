//! Projects: the saved form of a board, plus import and export.

use crate::layers::{Layer, LayerStack};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

/// Format version written into every project.
pub const PROJECT_VERSION: &str = "1.0.0";
/// Extension of exported project files.
pub const PROJECT_EXTENSION: &str = "minipaint";
/// Name of a project that was never given one.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("invalid project file format: {0}")]
    InvalidFormat(String),
    #[error("failed to parse project file: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize project: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Source of "now" for timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

/// A saved board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub active_layer_id: String,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_name() -> String {
    UNTITLED.to_string()
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_version() -> String {
    PROJECT_VERSION.to_string()
}

/// Entry of the recent-projects list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// A project rendered to a downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectExport {
    pub file_name: String,
    pub contents: String,
}

/// Fill in the layer fields a hand-written file may leave out. `visible`
/// and `opacity` fall back through serde defaults.
fn complete_layers(layers: &mut [serde_json::Value]) {
    for (i, layer) in layers.iter_mut().enumerate() {
        let Some(fields) = layer.as_object_mut() else {
            continue;
        };
        fields
            .entry("id")
            .or_insert_with(|| format!("layer-{}", Uuid::new_v4()).into());
        fields
            .entry("name")
            .or_insert_with(|| format!("Layer {}", i + 1).into());
        fields.entry("zIndex").or_insert_with(|| i.into());
    }
}

/// A fresh `project-<uuid>` identifier.
pub fn new_project_id() -> String {
    format!("project-{}", Uuid::new_v4())
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        layers: &LayerStack,
        canvas_width: u32,
        canvas_height: u32,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        Self {
            id: new_project_id(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            layers: layers.layers().to_vec(),
            active_layer_id: layers.active_id().to_string(),
            canvas_width,
            canvas_height,
            version: default_version(),
        }
    }

    pub fn metadata(&self) -> ProjectMetadata {
        ProjectMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            thumbnail: None,
        }
    }

    /// The project's layers as a stack.
    pub fn layer_stack(&self) -> LayerStack {
        LayerStack::from_parts(self.layers.clone(), &self.active_layer_id)
    }

    /// Pretty JSON under `<name>.minipaint`.
    pub fn export(&self) -> Result<ProjectExport, ProjectError> {
        let contents = serde_json::to_string_pretty(self).map_err(ProjectError::Serialization)?;
        let stem = if self.name.trim().is_empty() {
            "untitled"
        } else {
            self.name.as_str()
        };
        Ok(ProjectExport {
            file_name: format!("{stem}.{PROJECT_EXTENSION}"),
            contents,
        })
    }

    /// Parse an exported project (or plain JSON of the same shape).
    ///
    /// The text must carry a non-empty `id` and a `layers` array. The result
    /// gets a fresh id so it never overwrites the project it came from.
    pub fn import(text: &str, clock: &dyn Clock) -> Result<Self, ProjectError> {
        let text = text.trim_start_matches('\u{feff}');
        let mut value: serde_json::Value = serde_json::from_str(text).map_err(ProjectError::Parse)?;

        let has_id = value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|id| !id.is_empty());
        if !has_id {
            return Err(ProjectError::InvalidFormat("missing project id".to_string()));
        }
        match value.get_mut("layers").and_then(serde_json::Value::as_array_mut) {
            Some(layers) => complete_layers(layers),
            None => return Err(ProjectError::InvalidFormat("missing layer list".to_string())),
        }

        let mut project: Project = serde_json::from_value(value).map_err(ProjectError::Parse)?;
        project.id = new_project_id();
        project.updated_at = clock.now();
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_new_project_defaults() {
        let clock = clock();
        let project = Project::new("Sketch", &LayerStack::new(), 800, 600, &clock);
        assert!(project.id.starts_with("project-"));
        assert_eq!(project.version, "1.0.0");
        assert_eq!(project.created_at, project.updated_at);
        assert_eq!(project.active_layer_id, "layer-1");
        assert_eq!(project.layers.len(), 1);
    }

    #[test]
    fn test_export_file_name_and_format() {
        let project = Project::new("My Art", &LayerStack::new(), 800, 600, &clock());
        let export = project.export().unwrap();
        assert_eq!(export.file_name, "My Art.minipaint");
        assert!(export.contents.contains("\n  \"id\""));
        assert!(export.contents.contains("\"activeLayerId\""));
        assert!(export.contents.contains("\"createdAt\": \"2024-05-01T12:00:00Z\""));
    }

    #[test]
    fn test_import_regenerates_id() {
        let clock = clock();
        let project = Project::new("Trip", &LayerStack::new(), 800, 600, &clock);
        let text = project.export().unwrap().contents;
        clock.advance(Duration::minutes(5));

        let imported = Project::import(&text, &clock).unwrap();
        assert_ne!(imported.id, project.id);
        assert!(imported.id.starts_with("project-"));
        assert_eq!(imported.name, "Trip");
        assert_eq!(imported.created_at, project.created_at);
        assert_eq!(imported.updated_at, project.updated_at + Duration::minutes(5));
    }

    #[test]
    fn test_import_plain_json_with_defaults() {
        let text = r#"{"id":"x","name":"Old","layers":[]}"#;
        let project = Project::import(text, &clock()).unwrap();
        assert_eq!(project.canvas_width, 800);
        assert_eq!(project.version, "1.0.0");
    }

    #[test]
    fn test_import_bare_id_and_layers() {
        let project = Project::import(r#"{"id":"project-1","layers":[]}"#, &clock()).unwrap();
        assert_eq!(project.name, "Untitled");
        assert!(project.layers.is_empty());
        assert_eq!(project.layer_stack(), LayerStack::default());
    }

    #[test]
    fn test_import_sparse_layers() {
        let text = r#"{"id":"p","layers":[{"id":"sky","name":"Sky"},{"name":"Ground"}]}"#;
        let project = Project::import(text, &clock()).unwrap();
        let sky = &project.layers[0];
        assert_eq!(sky.id, "sky");
        assert!(sky.visible);
        assert_eq!(sky.opacity, 100);
        assert_eq!(sky.z_index, 0);
        assert!(sky.canvas_data.is_empty());
        let ground = &project.layers[1];
        assert!(ground.id.starts_with("layer-"));
        assert_eq!(ground.name, "Ground");
        assert_eq!(ground.z_index, 1);
        assert_eq!(project.layer_stack().active_id(), "sky");
    }

    #[test]
    fn test_import_rejects_missing_id() {
        let err = Project::import(r#"{"name":"x","layers":[]}"#, &clock()).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFormat(_)));
        let err = Project::import(r#"{"id":"","name":"x","layers":[]}"#, &clock()).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFormat(_)));
    }

    #[test]
    fn test_import_rejects_missing_layers() {
        let err = Project::import(r#"{"id":"p","name":"x"}"#, &clock()).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFormat(_)));
        let err = Project::import(r#"{"id":"p","name":"x","layers":{}}"#, &clock()).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFormat(_)));
    }

    #[test]
    fn test_import_rejects_garbage() {
        let err = Project::import("not json at all", &clock()).unwrap_err();
        assert!(matches!(err, ProjectError::Parse(_)));
    }

    #[test]
    fn test_metadata() {
        let project = Project::new("Meta", &LayerStack::new(), 800, 600, &clock());
        let meta = project.metadata();
        assert_eq!(meta.id, project.id);
        assert_eq!(meta.updated_at, project.updated_at);
        let json = serde_json::to_string(&meta).unwrap();
        assert!(!json.contains("thumbnail"));
    }
}
