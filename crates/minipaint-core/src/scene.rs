//! The drawing surface: ordered objects plus canvas-level properties.

use crate::shapes::{SerializableColor, Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while capturing or restoring a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to serialize scene: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to restore scene: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// A serialized copy of an entire scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Snapshot {
    fn from(json: String) -> Self {
        Self(json)
    }
}

/// Objects in back-to-front order plus canvas size and background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: SerializableColor,
    objects: Vec<Shape>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: SerializableColor::white(),
            objects: Vec::new(),
        }
    }

    /// Objects back to front.
    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add an object on top of everything else.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.objects.push(shape);
        id
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.objects.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.objects.iter_mut().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Remove every object and reset the background to white.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.background = SerializableColor::white();
    }

    /// The frontmost object under `point`.
    pub fn top_object_at(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.objects
            .iter()
            .rev()
            .find(|s| s.hit_test(point, tolerance))
            .map(Shape::id)
    }

    pub fn snapshot(&self) -> Result<Snapshot, SceneError> {
        serde_json::to_string(self)
            .map(Snapshot)
            .map_err(SceneError::Serialize)
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SceneError> {
        serde_json::from_str(snapshot.as_str()).map_err(SceneError::Deserialize)
    }

    /// Replace this scene with the contents of `snapshot`. On error the scene
    /// is left untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SceneError> {
        *self = Self::from_snapshot(snapshot)?;
        Ok(())
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.objects.iter().position(|s| s.id() == id)
    }
}
