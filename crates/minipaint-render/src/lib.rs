//! Mini Paint Render Library
//!
//! Turns a scene into SVG markup or PNG bytes. Bitmaps are rasterized on
//! the CPU with `vello_cpu`, so export works the same natively and in wasm.

mod raster;
mod svg;

pub use raster::{PngRenderResult, encode_png, export_png, rasterize};
pub use svg::export_svg;

use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the canvas has no area")]
    EmptyCanvas,
    #[error("Canvas too large to export: {width}x{height}")]
    CanvasTooLarge { width: f64, height: f64 },
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
