//! Layer panel state. Layers are bookkeeping only; they are not composited.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayerError {
    #[error("layer not found: {0}")]
    NotFound(String),
    #[error("cannot delete the last layer")]
    LastLayer,
}

/// One entry in the layer panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: String,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Percent, 0 to 100.
    #[serde(default = "default_opacity")]
    pub opacity: u8,
    /// Serialized drawing owned by this layer.
    #[serde(default)]
    pub canvas_data: String,
    #[serde(default)]
    pub z_index: usize,
}

fn default_visible() -> bool {
    true
}

fn default_opacity() -> u8 {
    Layer::MAX_OPACITY
}

impl Layer {
    pub const MAX_OPACITY: u8 = 100;

    pub fn new(id: impl Into<String>, name: impl Into<String>, z_index: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            opacity: Self::MAX_OPACITY,
            canvas_data: String::new(),
            z_index,
        }
    }

    /// The layer every new board starts with.
    pub fn background() -> Self {
        Self::new("layer-1", "Background", 0)
    }
}

/// Ordered layers plus the active one.
///
/// Never empty: the last remaining layer cannot be deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStack {
    layers: Vec<Layer>,
    active_layer_id: String,
}

impl Default for LayerStack {
    fn default() -> Self {
        let background = Layer::background();
        Self {
            active_layer_id: background.id.clone(),
            layers: vec![background],
        }
    }
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a stack from stored layers. Falls back to the default stack
    /// when `layers` is empty and to the first layer when `active` is unknown.
    pub fn from_parts(layers: Vec<Layer>, active: &str) -> Self {
        let Some(first) = layers.first() else {
            return Self::default();
        };
        let active_layer_id = if layers.iter().any(|l| l.id == active) {
            active.to_string()
        } else {
            first.id.clone()
        };
        Self {
            layers,
            active_layer_id,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn into_layers(self) -> Vec<Layer> {
        self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn active_id(&self) -> &str {
        &self.active_layer_id
    }

    pub fn active(&self) -> Option<&Layer> {
        self.get(&self.active_layer_id)
    }

    pub fn active_mut(&mut self) -> Option<&mut Layer> {
        let id = self.active_layer_id.clone();
        self.get_mut(&id)
    }

    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Append `Layer N` on top and make it active.
    pub fn add(&mut self) -> &Layer {
        let z_index = self.layers.len();
        let layer = Layer::new(
            format!("layer-{}", Uuid::new_v4()),
            format!("Layer {}", z_index + 1),
            z_index,
        );
        self.active_layer_id = layer.id.clone();
        self.layers.push(layer);
        &self.layers[z_index]
    }

    /// Delete a layer and activate the first remaining one.
    pub fn delete(&mut self, id: &str) -> Result<Layer, LayerError> {
        let index = self.index_of(id)?;
        if self.layers.len() <= 1 {
            return Err(LayerError::LastLayer);
        }
        let removed = self.layers.remove(index);
        self.active_layer_id = self.layers[0].id.clone();
        self.renumber();
        Ok(removed)
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), LayerError> {
        self.index_of(id)?;
        self.active_layer_id = id.to_string();
        Ok(())
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<(), LayerError> {
        self.layer_mut(id)?.name = name.into();
        Ok(())
    }

    /// Flip visibility and return the new value.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool, LayerError> {
        let layer = self.layer_mut(id)?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// Set opacity, clamped to 0..=100.
    pub fn set_opacity(&mut self, id: &str, opacity: i32) -> Result<u8, LayerError> {
        let layer = self.layer_mut(id)?;
        layer.opacity = opacity.clamp(0, Layer::MAX_OPACITY as i32) as u8;
        Ok(layer.opacity)
    }

    /// Move a layer to `to` (clamped to the end) and renumber z-indices.
    pub fn move_layer(&mut self, id: &str, to: usize) -> Result<(), LayerError> {
        let from = self.index_of(id)?;
        let layer = self.layers.remove(from);
        let to = to.min(self.layers.len());
        self.layers.insert(to, layer);
        self.renumber();
        Ok(())
    }

    fn renumber(&mut self) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.z_index = i;
        }
    }

    fn index_of(&self, id: &str) -> Result<usize, LayerError> {
        self.layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| LayerError::NotFound(id.to_string()))
    }

    fn layer_mut(&mut self, id: &str) -> Result<&mut Layer, LayerError> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| LayerError::NotFound(id.to_string()))
    }
}
