//! WebAssembly entry point and the page-facing whiteboard handle.

use crate::view::{BoardView, ExportFile, RatingView, parse_shape_id};
use kurbo::Point;
use minipaint_core::config::WhiteboardConfig;
use minipaint_core::input::{KeyEvent, Modifiers};
use minipaint_core::project::SystemClock;
use minipaint_core::storage::{KeyValueStore, LocalStorage, MemoryStore};
use minipaint_core::tools::ToolKind;
use minipaint_core::whiteboard::Whiteboard;
use serde::Serialize;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    log::info!("Starting Mini Paint (WASM)");
}

#[wasm_bindgen]
pub struct WebWhiteboard {
    board: Whiteboard,
}

#[wasm_bindgen]
impl WebWhiteboard {
    /// Create a board backed by `localStorage`. `config` is an optional
    /// partial JSON configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WebWhiteboard, JsValue> {
        let config = match config {
            Some(json) => WhiteboardConfig::from_json_str(&json).map_err(to_js)?,
            None => WhiteboardConfig::default(),
        };
        let store: Arc<dyn KeyValueStore> = match LocalStorage::new() {
            Ok(storage) => Arc::new(storage),
            Err(e) => {
                log::warn!("localStorage unavailable, projects will not persist: {}", e);
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self {
            board: Whiteboard::new(config, store, Arc::new(SystemClock)),
        })
    }

    // --- State for the page ---

    /// Toolbar, layer panel and status bar state.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_value(&BoardView::of(&self.board))
    }

    /// The scene as JSON for drawing.
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> Result<String, JsValue> {
        Ok(self.board.scene().snapshot().map_err(to_js)?.into_string())
    }

    /// The in-progress gesture as shape JSON, if any.
    #[wasm_bindgen(js_name = previewJson)]
    pub fn preview_json(&self) -> Result<Option<String>, JsValue> {
        self.board
            .preview()
            .map(|shape| serde_json::to_string(&shape).map_err(to_js))
            .transpose()
    }

    /// Current camera as `[a, b, c, d, e, f]` for `setTransform`.
    #[wasm_bindgen(js_name = viewTransform)]
    pub fn view_transform(&self) -> Vec<f64> {
        self.board.camera().transform().as_coeffs().to_vec()
    }

    #[wasm_bindgen(js_name = takeNotifications)]
    pub fn take_notifications(&mut self) -> Result<JsValue, JsValue> {
        to_value(&self.board.take_notifications())
    }

    // --- Tools ---

    #[wasm_bindgen(js_name = selectTool)]
    pub fn select_tool(&mut self, name: &str) -> Result<(), JsValue> {
        let tool = ToolKind::from_name(name).ok_or_else(|| to_js(format!("unknown tool: {name}")))?;
        self.board.select_tool(tool);
        Ok(())
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, hex: &str) -> bool {
        self.board.set_color_hex(hex)
    }

    #[wasm_bindgen(js_name = setBrushWidth)]
    pub fn set_brush_width(&mut self, width: f64) {
        self.board.set_brush_width(width);
    }

    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, id: &str, content: &str) -> bool {
        parse_shape_id(id).is_some_and(|id| self.board.set_text(id, content))
    }

    // --- Input ---

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.board.pointer_down(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.board.pointer_move(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.board.pointer_up(Point::new(x, y));
    }

    /// Returns true when the page should `preventDefault`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        self.board.handle_key(KeyEvent::Pressed {
            key: key.to_string(),
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) -> bool {
        self.board.handle_key(KeyEvent::Released {
            key: key.to_string(),
        })
    }

    // --- Edits ---

    pub fn undo(&mut self) -> bool {
        self.board.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.board.redo()
    }

    #[wasm_bindgen(js_name = deleteSelection)]
    pub fn delete_selection(&mut self) -> bool {
        self.board.delete_selection()
    }

    pub fn deselect(&mut self) {
        self.board.deselect();
    }

    #[wasm_bindgen(js_name = clearCanvas)]
    pub fn clear_canvas(&mut self) {
        self.board.clear_canvas();
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> Option<f64> {
        self.board.zoom_in()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> Option<f64> {
        self.board.zoom_out()
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self) {
        self.board.reset_zoom();
    }

    // --- Layers ---

    #[wasm_bindgen(js_name = addLayer)]
    pub fn add_layer(&mut self) -> String {
        self.board.add_layer()
    }

    #[wasm_bindgen(js_name = deleteLayer)]
    pub fn delete_layer(&mut self, id: &str) -> Result<(), JsValue> {
        self.board.delete_layer(id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setActiveLayer)]
    pub fn set_active_layer(&mut self, id: &str) -> Result<(), JsValue> {
        self.board.set_active_layer(id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = renameLayer)]
    pub fn rename_layer(&mut self, id: &str, name: &str) -> Result<(), JsValue> {
        self.board.rename_layer(id, name).map_err(to_js)
    }

    #[wasm_bindgen(js_name = toggleLayerVisibility)]
    pub fn toggle_layer_visibility(&mut self, id: &str) -> Result<bool, JsValue> {
        self.board.toggle_layer_visibility(id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setLayerOpacity)]
    pub fn set_layer_opacity(&mut self, id: &str, opacity: i32) -> Result<u8, JsValue> {
        self.board.set_layer_opacity(id, opacity).map_err(to_js)
    }

    #[wasm_bindgen(js_name = moveLayer)]
    pub fn move_layer(&mut self, id: &str, to: usize) -> Result<(), JsValue> {
        self.board.move_layer(id, to).map_err(to_js)
    }

    // --- Projects ---

    /// Start a project and return its id.
    #[wasm_bindgen(js_name = newProject)]
    pub fn new_project(&mut self, name: &str) -> String {
        self.board.new_project(name).id.clone()
    }

    #[wasm_bindgen(js_name = saveProject)]
    pub fn save_project(&mut self) -> Result<String, JsValue> {
        self.board.save_project().map(|p| p.id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = loadProject)]
    pub fn load_project(&mut self, id: &str) -> Result<(), JsValue> {
        self.board.load_project(id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = deleteProject)]
    pub fn delete_project(&mut self, id: &str) -> Result<bool, JsValue> {
        self.board.delete_project(id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = recentProjects)]
    pub fn recent_projects(&mut self) -> Result<JsValue, JsValue> {
        let recent = self.board.recent_projects().map_err(to_js)?;
        to_value(&recent)
    }

    #[wasm_bindgen(js_name = listProjects)]
    pub fn list_projects(&self) -> Result<JsValue, JsValue> {
        let all = self.board.list_projects().map_err(to_js)?;
        to_value(&all)
    }

    /// `{ fileName, contents }` for a `.minipaint` download.
    #[wasm_bindgen(js_name = exportProject)]
    pub fn export_project(&mut self) -> Result<JsValue, JsValue> {
        let export = self.board.export_project().map_err(to_js)?;
        to_value(&ExportFile::from(export))
    }

    #[wasm_bindgen(js_name = importProject)]
    pub fn import_project(&mut self, text: &str) -> Result<(), JsValue> {
        self.board.import_project(text).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setAutosave)]
    pub fn set_autosave(&mut self, enabled: bool) {
        self.board.set_autosave_enabled(enabled);
    }

    /// Call periodically; saves when auto-save is due.
    #[wasm_bindgen(js_name = autosaveTick)]
    pub fn autosave_tick(&mut self) -> Result<bool, JsValue> {
        self.board.autosave_tick().map_err(to_js)
    }

    // --- Image export ---

    #[wasm_bindgen(js_name = exportSvg)]
    pub fn export_svg(&self) -> String {
        minipaint_render::export_svg(self.board.scene())
    }

    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(&self, scale: f64) -> Result<js_sys::Uint8Array, JsValue> {
        let bytes = minipaint_render::export_png(self.board.scene(), scale).map_err(to_js)?;
        Ok(js_sys::Uint8Array::from(bytes.as_slice()))
    }

    // --- Evaluation ---

    pub fn evaluate(&mut self) -> Result<JsValue, JsValue> {
        match self.board.evaluate_drawing() {
            Some(evaluation) => to_value(evaluation),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn submit(&mut self) -> Result<JsValue, JsValue> {
        match self.board.submit_drawing() {
            Some(rating) => to_value(&RatingView::from(rating)),
            None => Ok(JsValue::NULL),
        }
    }
}
