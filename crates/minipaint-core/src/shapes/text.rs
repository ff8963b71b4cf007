//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single- or multi-line text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Top-left corner of the text box.
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS font family.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Style properties. The fill color is the glyph color.
    pub style: ShapeStyle,
}

fn default_font_family() -> String {
    Text::DEFAULT_FONT_FAMILY.to_string()
}

impl Text {
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;
    pub const DEFAULT_FONT_FAMILY: &'static str = "Inter";
    /// Placeholder content of a freshly placed text box.
    pub const DEFAULT_CONTENT: &'static str = "Double click to edit";

    /// Average glyph advance as a fraction of the font size.
    const CHAR_WIDTH_FACTOR: f64 = 0.55;
    const LINE_HEIGHT: f64 = 1.2;
    const MIN_WIDTH: f64 = 20.0;

    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: default_font_family(),
            style: ShapeStyle::default(),
        }
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Rough width estimate; the real width depends on the font.
    fn approximate_width(&self) -> f64 {
        let widest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        (widest as f64 * self.font_size * Self::CHAR_WIDTH_FACTOR).max(Self::MIN_WIDTH)
    }

    fn approximate_height(&self) -> f64 {
        let mut lines = self.content.lines().count().max(1);
        if self.content.ends_with('\n') {
            lines += 1;
        }
        lines as f64 * self.font_size * Self::LINE_HEIGHT
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.approximate_width(),
            self.position.y + self.approximate_height(),
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    /// The bounding box; glyph outlines are left to the renderer.
    fn to_path(&self) -> BezPath {
        self.bounds().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.position = affine * self.position;
        let coeffs = affine.as_coeffs();
        let scale = (coeffs[0].abs() + coeffs[3].abs()) / 2.0;
        if (scale - 1.0).abs() > 0.01 {
            self.font_size *= scale;
        }
    }
}
