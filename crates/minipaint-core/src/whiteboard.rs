//! The whiteboard controller.
//!
//! Owns the scene, its history, the tools, camera, layers and the current
//! project, and turns front-end input into scene mutations. Every completed
//! mutation is recorded as a history snapshot. User-facing outcomes are
//! queued as notifications for the front-end to drain.

use crate::camera::Camera;
use crate::config::WhiteboardConfig;
use crate::evaluation::{Evaluation, Evaluator, Rating};
use crate::history::History;
use crate::input::{KeyEvent, PointerEvent, SPACE_KEY};
use crate::layers::{LayerError, LayerStack};
use crate::notify::Notification;
use crate::project::{Clock, Project, ProjectError, ProjectExport, ProjectMetadata, UNTITLED};
use crate::scene::{Scene, SceneError, Snapshot};
use crate::shapes::{SerializableColor, Shape, ShapeId, ShapeStyle, Text};
use crate::shortcuts::{Command, ShortcutRegistry};
use crate::storage::{AutoSaveManager, KeyValueStore, ProjectStore, StorageError};
use crate::tools::{ToolAction, ToolKind, ToolManager};
use kurbo::{Point, Size};
use std::sync::Arc;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

#[derive(Debug, Error)]
pub enum WhiteboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Layer(#[from] LayerError),
    #[error("no project is open")]
    NoProject,
    #[error("project not found: {0}")]
    ProjectNotFound(String),
}

pub type WhiteboardResult<T> = Result<T, WhiteboardError>;

pub struct Whiteboard {
    config: WhiteboardConfig,
    scene: Scene,
    history: History,
    tools: ToolManager,
    camera: Camera,
    layers: LayerStack,
    selection: Option<ShapeId>,
    /// Whether the current drag or erase gesture changed the scene.
    gesture_changed: bool,
    space_held: bool,
    /// Last screen position of a space-drag pan.
    pan_anchor: Option<Point>,
    projects: ProjectStore,
    clock: Arc<dyn Clock>,
    current_project: Option<Project>,
    autosave: AutoSaveManager,
    evaluator: Evaluator,
    notifications: Vec<Notification>,
}

impl Whiteboard {
    pub fn new(
        config: WhiteboardConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let projects = ProjectStore::new(store, clock.clone())
            .with_keys(config.storage_keys.clone())
            .with_recent_limit(config.recent_limit);

        let mut tools = ToolManager::new();
        tools.color = config.color;
        tools.brush_width = config.brush_width;
        tools.fill_mode = config.fill_mode;
        tools.spray_radius = config.spray_radius;
        tools.spray_density = config.spray_density;
        tools.canvas_size = Size::new(config.canvas_width as f64, config.canvas_height as f64);

        let mut autosave = AutoSaveManager::new(Duration::from_secs(config.autosave_interval_secs));
        autosave.set_enabled(config.autosave_enabled);

        let mut board = Self {
            scene: Self::blank_scene(&config),
            history: History::with_limit(config.history_limit),
            tools,
            camera: Camera::new(),
            layers: LayerStack::new(),
            selection: None,
            gesture_changed: false,
            space_held: false,
            pan_anchor: None,
            projects,
            clock,
            current_project: None,
            autosave,
            evaluator: Evaluator::new(),
            notifications: Vec::new(),
            config,
        };
        board.commit();
        board.notify(
            Notification::success("Canvas ready! Start creating!")
                .with_description("Select a tool from the toolbar to begin"),
        );
        board
    }

    /// Replace the tool manager's random source with a fixed seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.tools = std::mem::take(&mut self.tools).with_seed(seed);
        self.evaluator = Evaluator::with_seed(seed);
        self
    }

    fn blank_scene(config: &WhiteboardConfig) -> Scene {
        Self::sized_scene(config, config.canvas_width, config.canvas_height)
    }

    /// An empty scene of the given size on the configured background.
    fn sized_scene(config: &WhiteboardConfig, width: u32, height: u32) -> Scene {
        let mut scene = Scene::new(width as f64, height as f64);
        scene.background = config.background;
        scene
    }

    pub fn config(&self) -> &WhiteboardConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.autosave.is_dirty()
    }

    /// Drain queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Record the current scene as the newest history entry.
    fn commit(&mut self) {
        match self.scene.snapshot() {
            Ok(snapshot) => {
                self.history.push(snapshot);
                self.autosave.mark_dirty();
            }
            Err(e) => {
                log::error!("failed to record history: {}", e);
                self.notify(Notification::error("Could not record change").with_description(e.to_string()));
            }
        }
    }

    // --- Tools ---

    pub fn select_tool(&mut self, tool: ToolKind) {
        if let Some(action) = self.tools.select_tool(tool) {
            if let ToolAction::Insert(shape) = &action {
                let name = shape.kind_name();
                let mut title = name.to_string();
                if let Some(first) = title.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                self.notify(
                    Notification::info(format!("{title} added"))
                        .with_description("Drag to reposition or resize"),
                );
            }
            self.apply(action);
        }
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.tools.color = color;
    }

    /// Set the color from CSS hex. Returns false when `hex` does not parse.
    pub fn set_color_hex(&mut self, hex: &str) -> bool {
        match SerializableColor::from_hex(hex) {
            Some(color) => {
                self.set_color(color);
                true
            }
            None => {
                log::warn!("ignoring invalid color {:?}", hex);
                false
            }
        }
    }

    pub fn set_brush_width(&mut self, width: f64) {
        self.tools.brush_width = width.max(0.5);
    }

    // --- Pointer and keyboard ---

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, .. } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position, .. } => self.pointer_up(position),
        }
    }

    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match event {
            KeyEvent::Pressed { key, .. } if key == SPACE_KEY => {
                self.space_held = true;
                true
            }
            KeyEvent::Released { key } if key == SPACE_KEY => {
                self.space_held = false;
                self.pan_anchor = None;
                true
            }
            KeyEvent::Released { .. } => false,
            KeyEvent::Pressed { key, modifiers } => {
                match ShortcutRegistry::resolve(&key, modifiers) {
                    Some(command) => {
                        self.run_command(command);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    pub fn run_command(&mut self, command: Command) {
        log::debug!("command {:?}", command);
        match command {
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::Save => {
                // Failures are reported as notifications.
                let _ = self.save_project();
            }
            Command::DeleteSelection => {
                self.delete_selection();
            }
            Command::Deselect => self.deselect(),
            Command::ZoomIn => {
                self.zoom_in();
            }
            Command::ZoomOut => {
                self.zoom_out();
            }
            Command::ResetZoom => self.reset_zoom(),
        }
    }

    /// Pointer pressed at a screen position.
    pub fn pointer_down(&mut self, screen: Point) {
        if self.space_held {
            self.pan_anchor = Some(screen);
            return;
        }
        let world = self.camera.screen_to_world(screen);
        if let Some(action) = self.tools.pointer_down(world) {
            self.apply(action);
        }
    }

    pub fn pointer_move(&mut self, screen: Point) {
        if let Some(anchor) = self.pan_anchor {
            self.camera.pan(screen - anchor);
            self.pan_anchor = Some(screen);
            return;
        }
        let world = self.camera.screen_to_world(screen);
        if let Some(action) = self.tools.pointer_move(world) {
            self.apply(action);
        }
    }

    pub fn pointer_up(&mut self, screen: Point) {
        if self.pan_anchor.take().is_some() {
            return;
        }
        self.pointer_move(screen);
        if let Some(action) = self.tools.pointer_up() {
            self.apply(action);
        }
    }

    /// Shape the active gesture would produce, for live preview.
    pub fn preview(&self) -> Option<Shape> {
        self.tools.preview_shape()
    }

    fn apply(&mut self, action: ToolAction) {
        let tolerance = self.config.hit_tolerance;
        match action {
            ToolAction::Insert(shape) => {
                self.selection = Some(self.scene.add(shape));
                self.commit();
            }
            ToolAction::SelectAt(at) => {
                self.selection = self.scene.top_object_at(at, tolerance);
                self.gesture_changed = false;
            }
            ToolAction::MoveSelection(delta) => {
                if let Some(shape) = self.selection.and_then(|id| self.scene.get_mut(id)) {
                    shape.translate(delta);
                    self.gesture_changed = true;
                }
            }
            ToolAction::FinishMove => {
                if std::mem::take(&mut self.gesture_changed) {
                    self.commit();
                }
            }
            ToolAction::EraseAt(at) => {
                if let Some(id) = self.scene.top_object_at(at, tolerance + self.tools.brush_width) {
                    self.scene.remove(id);
                    if self.selection == Some(id) {
                        self.selection = None;
                    }
                    self.gesture_changed = true;
                }
            }
            ToolAction::FinishErase => {
                if std::mem::take(&mut self.gesture_changed) {
                    self.commit();
                }
            }
            ToolAction::FillAt { at, color } => {
                let target = self.scene.top_object_at(at, tolerance);
                if let Some(shape) = target.and_then(|id| self.scene.get_mut(id)) {
                    shape.recolor(color);
                    self.commit();
                }
            }
            ToolAction::PlaceText(at) => {
                let mut text = Text::new(at, self.config.text_content.clone())
                    .with_font_size(self.config.font_size);
                text.style = ShapeStyle::filled(self.tools.color);
                self.selection = Some(self.scene.add(Shape::Text(text)));
                self.commit();
            }
        }
    }

    // --- Scene edits ---

    pub fn deselect(&mut self) {
        self.selection = None;
        self.tools.cancel();
    }

    /// Remove the selected object. Returns false when nothing is selected.
    pub fn delete_selection(&mut self) -> bool {
        let Some(id) = self.selection.take() else {
            return false;
        };
        if self.scene.remove(id).is_none() {
            return false;
        }
        self.commit();
        true
    }

    /// Replace a text object's content.
    pub fn set_text(&mut self, id: ShapeId, content: &str) -> bool {
        let Some(Shape::Text(text)) = self.scene.get_mut(id) else {
            return false;
        };
        if text.content == content {
            return true;
        }
        text.set_content(content);
        self.commit();
        true
    }

    pub fn clear_canvas(&mut self) {
        self.scene.clear();
        self.scene.background = self.config.background;
        self.selection = None;
        self.tools.cancel();
        self.commit();
        self.notify(
            Notification::success("Canvas cleared!")
                .with_description("Start fresh with a clean canvas"),
        );
    }

    // --- History ---

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => self.reload(&snapshot, "undo"),
            None => {
                self.notify(Notification::info("Nothing to undo"));
                false
            }
        }
    }

    /// Step forward one snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => self.reload(&snapshot, "redo"),
            None => {
                self.notify(Notification::info("Nothing to redo"));
                false
            }
        }
    }

    fn reload(&mut self, snapshot: &Snapshot, what: &str) -> bool {
        self.tools.cancel();
        match self.scene.restore(snapshot) {
            Ok(()) => {
                log::debug!("{} to history position {}", what, self.history.position());
                if self.selection.is_some_and(|id| !self.scene.contains(id)) {
                    self.selection = None;
                }
                self.autosave.mark_dirty();
                true
            }
            Err(e) => {
                log::error!("failed to {}: {}", what, e);
                self.notify(Notification::error(format!("Could not {what}")).with_description(e.to_string()));
                false
            }
        }
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self) -> Option<f64> {
        let zoom = self.camera.zoom_in()?;
        self.notify_zoom();
        Some(zoom)
    }

    pub fn zoom_out(&mut self) -> Option<f64> {
        let zoom = self.camera.zoom_out()?;
        self.notify_zoom();
        Some(zoom)
    }

    pub fn reset_zoom(&mut self) {
        self.camera.reset();
        self.notify(Notification::info("Zoom reset to 100%"));
    }

    fn notify_zoom(&mut self) {
        let percent = self.camera.zoom_percent();
        self.notify(Notification::info(format!("Zoom: {percent}%")));
    }

    // --- Layers ---

    pub fn add_layer(&mut self) -> String {
        let id = self.layers.add().id.clone();
        self.autosave.mark_dirty();
        id
    }

    pub fn delete_layer(&mut self, id: &str) -> WhiteboardResult<()> {
        match self.layers.delete(id) {
            Ok(_) => {
                self.autosave.mark_dirty();
                Ok(())
            }
            Err(e) => {
                log::warn!("refused to delete layer {}: {}", id, e);
                if e == LayerError::LastLayer {
                    self.notify(Notification::error("Cannot delete the last layer"));
                }
                Err(e.into())
            }
        }
    }

    pub fn set_active_layer(&mut self, id: &str) -> WhiteboardResult<()> {
        self.layers.set_active(id)?;
        Ok(())
    }

    pub fn rename_layer(&mut self, id: &str, name: &str) -> WhiteboardResult<()> {
        self.layers.rename(id, name)?;
        self.autosave.mark_dirty();
        Ok(())
    }

    pub fn toggle_layer_visibility(&mut self, id: &str) -> WhiteboardResult<bool> {
        let visible = self.layers.toggle_visibility(id)?;
        self.autosave.mark_dirty();
        Ok(visible)
    }

    pub fn set_layer_opacity(&mut self, id: &str, opacity: i32) -> WhiteboardResult<u8> {
        let opacity = self.layers.set_opacity(id, opacity)?;
        self.autosave.mark_dirty();
        Ok(opacity)
    }

    pub fn move_layer(&mut self, id: &str, to: usize) -> WhiteboardResult<()> {
        self.layers.move_layer(id, to)?;
        self.autosave.mark_dirty();
        Ok(())
    }

    // --- Projects ---

    /// Start a new project from the current board.
    pub fn new_project(&mut self, name: &str) -> &Project {
        let project = Project::new(
            name,
            &self.layers,
            self.config.canvas_width,
            self.config.canvas_height,
            self.clock.as_ref(),
        );
        log::info!("created project {} ({})", project.name, project.id);
        self.notify(Notification::success(format!("Project \"{}\" created", project.name)));
        self.current_project.insert(project)
    }

    /// The current project with the board's layers and drawing folded in.
    fn project_snapshot(&self) -> WhiteboardResult<Project> {
        let mut project = self
            .current_project
            .clone()
            .ok_or(WhiteboardError::NoProject)?;
        let mut layers = self.layers.clone();
        if let Some(active) = layers.active_mut() {
            active.canvas_data = self.scene.snapshot()?.into_string();
        }
        project.active_layer_id = layers.active_id().to_string();
        project.layers = layers.into_layers();
        project.canvas_width = self.scene.width.round() as u32;
        project.canvas_height = self.scene.height.round() as u32;
        Ok(project)
    }

    fn store_current(&mut self) -> WhiteboardResult<Project> {
        let project = self.project_snapshot()?;
        let saved = self.projects.save(&project)?;
        self.layers = saved.layer_stack();
        self.current_project = Some(saved.clone());
        self.autosave.mark_saved();
        Ok(saved)
    }

    /// Save the current project, creating an untitled one if none is open.
    pub fn save_project(&mut self) -> WhiteboardResult<Project> {
        if self.current_project.is_none() {
            self.new_project(UNTITLED);
        }
        match self.store_current() {
            Ok(saved) => {
                self.notify(Notification::success(format!("Project \"{}\" saved", saved.name)));
                Ok(saved)
            }
            Err(e) => {
                log::error!("save failed: {}", e);
                self.notify(Notification::error("Failed to save project").with_description(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn load_project(&mut self, id: &str) -> WhiteboardResult<()> {
        let loaded = match self.projects.load(id) {
            Ok(Some(project)) => project,
            Ok(None) => {
                self.notify(Notification::error("Project not found"));
                return Err(WhiteboardError::ProjectNotFound(id.to_string()));
            }
            Err(e) => {
                self.notify(Notification::error("Failed to load project").with_description(e.to_string()));
                return Err(e.into());
            }
        };
        let name = loaded.name.clone();
        self.open(loaded);
        self.notify(Notification::success(format!("Project \"{name}\" loaded")));
        Ok(())
    }

    /// Make `project` current and rebuild the board from it.
    fn open(&mut self, project: Project) {
        self.layers = project.layer_stack();
        let stored = self
            .layers
            .active()
            .map(|l| l.canvas_data.clone())
            .unwrap_or_default();
        let blank = Self::sized_scene(&self.config, project.canvas_width, project.canvas_height);
        self.scene = if stored.is_empty() {
            blank
        } else {
            match Scene::from_snapshot(&Snapshot::from(stored)) {
                Ok(scene) => scene,
                Err(e) => {
                    log::warn!("project {} has an unreadable drawing: {}", project.id, e);
                    self.notify(
                        Notification::error("Could not read the project drawing")
                            .with_description(e.to_string()),
                    );
                    blank
                }
            }
        };
        self.tools.canvas_size = Size::new(self.scene.width, self.scene.height);
        self.tools.cancel();
        self.selection = None;
        self.history.clear();
        self.commit();
        self.current_project = Some(project);
        self.autosave.mark_saved();
    }

    pub fn delete_project(&mut self, id: &str) -> WhiteboardResult<bool> {
        let existed = match self.projects.delete(id) {
            Ok(existed) => existed,
            Err(e) => {
                self.notify(Notification::error("Failed to delete project").with_description(e.to_string()));
                return Err(e.into());
            }
        };
        if self.current_project.as_ref().is_some_and(|p| p.id == id) {
            self.current_project = None;
        }
        if existed {
            self.notify(Notification::success("Project deleted"));
        } else {
            self.notify(Notification::error("Project not found"));
        }
        Ok(existed)
    }

    pub fn recent_projects(&mut self) -> WhiteboardResult<Vec<ProjectMetadata>> {
        match self.projects.recent() {
            Ok(recent) => Ok(recent),
            Err(e) => {
                self.notify(Notification::error("Could not read recent projects").with_description(e.to_string()));
                Err(e.into())
            }
        }
    }

    pub fn list_projects(&self) -> WhiteboardResult<Vec<ProjectMetadata>> {
        Ok(self.projects.list()?)
    }

    /// The current project as a downloadable `.minipaint` file.
    pub fn export_project(&mut self) -> WhiteboardResult<ProjectExport> {
        let result = self
            .project_snapshot()
            .and_then(|p| p.export().map_err(WhiteboardError::from));
        match &result {
            Ok(export) => self.notify(Notification::success(format!("Exported {}", export.file_name))),
            Err(e) => self.notify(Notification::error("Failed to export project").with_description(e.to_string())),
        }
        result
    }

    /// Open a project from exported text. Nothing changes when the text is
    /// rejected.
    pub fn import_project(&mut self, text: &str) -> WhiteboardResult<()> {
        match Project::import(text, self.clock.as_ref()) {
            Ok(project) => {
                log::info!("imported project {} as {}", project.name, project.id);
                let name = project.name.clone();
                self.open(project);
                self.autosave.mark_dirty();
                self.notify(Notification::success(format!("Project \"{name}\" imported")));
                Ok(())
            }
            Err(e) => {
                log::warn!("import rejected: {}", e);
                self.notify(Notification::error("Failed to import project").with_description(e.to_string()));
                Err(e.into())
            }
        }
    }

    pub fn set_autosave_enabled(&mut self, enabled: bool) {
        self.autosave.set_enabled(enabled);
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave.is_enabled()
    }

    /// Save silently if auto-save is due at `now`. Returns whether a save
    /// happened.
    pub fn autosave_tick_at(&mut self, now: Instant) -> WhiteboardResult<bool> {
        if self.current_project.is_none() || !self.autosave.should_save_at(now) {
            return Ok(false);
        }
        match self.store_current() {
            Ok(_) => {
                self.autosave.mark_saved_at(now);
                log::debug!("auto-saved");
                Ok(true)
            }
            Err(e) => {
                log::error!("auto-save failed: {}", e);
                self.notify(Notification::error("Auto-save failed").with_description(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn autosave_tick(&mut self) -> WhiteboardResult<bool> {
        self.autosave_tick_at(Instant::now())
    }

    // --- Evaluation ---

    /// Canned feedback on the drawing, `None` for an empty canvas.
    pub fn evaluate_drawing(&mut self) -> Option<&'static Evaluation> {
        if self.scene.is_empty() {
            self.notify(Notification::error("No drawing to evaluate"));
            return None;
        }
        Some(self.evaluator.evaluate())
    }

    /// Submit the drawing for a canned rating.
    pub fn submit_drawing(&mut self) -> Option<Rating> {
        if self.scene.is_empty() {
            self.notify(Notification::error("No drawing to submit!"));
            return None;
        }
        let rating = self.evaluator.rate();
        self.notify(rating.notification());
        Some(rating)
    }
}
