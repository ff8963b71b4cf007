//! Mini Paint Core Library
//!
//! Platform-agnostic data structures and logic for the Mini Paint board:
//! shapes, tools, snapshot history, layers and project storage.

pub mod camera;
pub mod config;
pub mod evaluation;
pub mod history;
pub mod input;
pub mod layers;
pub mod notify;
pub mod palette;
pub mod project;
pub mod random;
pub mod scene;
pub mod shapes;
pub mod shortcuts;
pub mod storage;
pub mod tools;
pub mod whiteboard;

pub use camera::Camera;
pub use config::WhiteboardConfig;
pub use evaluation::{Evaluation, Evaluator, Rating};
pub use history::History;
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use layers::{Layer, LayerError, LayerStack};
pub use notify::{Notification, NotificationLevel};
pub use project::{Clock, ManualClock, Project, ProjectError, ProjectExport, ProjectMetadata, SystemClock};
pub use scene::{Scene, SceneError, Snapshot};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeStyle};
pub use shortcuts::{Command, ShortcutRegistry};
pub use storage::{KeyValueStore, MemoryStore, ProjectStore, StorageError};
pub use tools::{FillMode, ToolAction, ToolKind, ToolManager};
pub use whiteboard::{Whiteboard, WhiteboardError, WhiteboardResult};
