//! Serializable views handed to the page.

use minipaint_core::evaluation::Rating;
use minipaint_core::project::{ProjectExport, ProjectMetadata};
use minipaint_core::shapes::ShapeId;
use minipaint_core::whiteboard::Whiteboard;
use serde::Serialize;

/// Everything the toolbar, layer panel and status bar need to redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub tool: &'static str,
    pub color: String,
    pub brush_width: f64,
    pub can_undo: bool,
    pub can_redo: bool,
    pub zoom_percent: u32,
    pub selection: Option<String>,
    pub object_count: usize,
    pub layers: Vec<LayerView>,
    pub project: Option<ProjectMetadata>,
    /// Unsaved changes since the last save.
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerView {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub opacity: u8,
    pub z_index: usize,
    pub active: bool,
}

impl BoardView {
    pub fn of(board: &Whiteboard) -> Self {
        let tools = board.tools();
        let layers = board.layers();
        Self {
            tool: tools.current_tool().name(),
            color: tools.color.to_hex(),
            brush_width: tools.brush_width,
            can_undo: board.can_undo(),
            can_redo: board.can_redo(),
            zoom_percent: board.camera().zoom_percent(),
            selection: board.selection().map(|id| id.to_string()),
            object_count: board.scene().len(),
            layers: layers
                .layers()
                .iter()
                .map(|l| LayerView {
                    id: l.id.clone(),
                    name: l.name.clone(),
                    visible: l.visible,
                    opacity: l.opacity,
                    z_index: l.z_index,
                    active: l.id == layers.active_id(),
                })
                .collect(),
            project: board.current_project().map(|p| p.metadata()),
            dirty: board.is_dirty(),
        }
    }
}

/// A project file ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

impl From<ProjectExport> for ExportFile {
    fn from(export: ProjectExport) -> Self {
        Self {
            file_name: export.file_name,
            contents: export.contents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingView {
    pub rating: u8,
    pub headline: &'static str,
}

impl From<Rating> for RatingView {
    fn from(rating: Rating) -> Self {
        Self {
            rating: rating.0,
            headline: rating.headline(),
        }
    }
}

/// Parse an object id coming back from the page.
pub fn parse_shape_id(id: &str) -> Option<ShapeId> {
    ShapeId::parse_str(id).ok()
}
