//! Mini Paint Web
//!
//! wasm-bindgen facade over the whiteboard. The page forwards pointer and
//! keyboard events, renders the scene JSON, and shows the queued
//! notifications.

pub mod view;

pub use view::{BoardView, ExportFile, LayerView, RatingView};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebWhiteboard, start};
