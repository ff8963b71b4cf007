//! Bitmap export through the CPU rasterizer.

use crate::{ExportError, ExportResult};
use kurbo::{Affine, BezPath, PathEl};
use minipaint_core::scene::Scene;
use minipaint_core::shapes::{BrushKind, Shape};
use peniko::Color;
use vello_cpu::kurbo as cpu;
use vello_cpu::{Pixmap, RenderContext};

/// Result of rasterizing a scene.
#[derive(Debug, Clone)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel, not premultiplied).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

fn affine_to_cpu(xf: Affine) -> cpu::Affine {
    cpu::Affine::new(xf.as_coeffs())
}

fn path_to_cpu(path: &BezPath) -> cpu::BezPath {
    let mut out = cpu::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to((p.x, p.y)),
            PathEl::LineTo(p) => out.line_to((p.x, p.y)),
            PathEl::QuadTo(a, b) => out.quad_to((a.x, a.y), (b.x, b.y)),
            PathEl::CurveTo(a, b, c) => out.curve_to((a.x, a.y), (b.x, b.y), (c.x, c.y)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Pixel size of the canvas at `scale`.
fn output_size(scene: &Scene, scale: f64) -> ExportResult<(u16, u16)> {
    let width = (scene.width * scale).round();
    let height = (scene.height * scale).round();
    if !(width >= 1.0 && height >= 1.0) {
        return Err(ExportError::EmptyCanvas);
    }
    if width > u16::MAX as f64 || height > u16::MAX as f64 {
        return Err(ExportError::CanvasTooLarge { width, height });
    }
    Ok((width as u16, height as u16))
}

fn render_shape(ctx: &mut RenderContext, shape: &Shape) {
    let style = shape.style();
    let path = path_to_cpu(&shape.to_path());

    // Spray dots take the brush color as their fill.
    if matches!(shape, Shape::Freehand(f) if f.brush == BrushKind::Spray) {
        ctx.set_paint(style.stroke_with_opacity());
        ctx.fill_path(&path);
        return;
    }

    if let Some(fill) = style.fill_with_opacity() {
        ctx.set_paint(fill);
        ctx.fill_path(&path);
    }
    if style.stroke_width > 0.0 {
        ctx.set_stroke(cpu::Stroke::new(style.stroke_width));
        ctx.set_paint(style.stroke_with_opacity());
        ctx.stroke_path(&path);
    }
}

/// Rasterize the whole canvas, background included, at `scale` pixels per
/// world unit.
///
/// Text objects are left out since there is no font shaping on this path.
pub fn rasterize(scene: &Scene, scale: f64) -> ExportResult<PngRenderResult> {
    let (width, height) = output_size(scene, scale)?;
    let mut ctx = RenderContext::new(width, height);

    ctx.set_transform(affine_to_cpu(Affine::IDENTITY));
    ctx.set_paint(Color::from(scene.background));
    ctx.fill_rect(&cpu::Rect::new(0.0, 0.0, width as f64, height as f64));

    ctx.set_transform(affine_to_cpu(Affine::scale(scale)));
    let mut skipped_text = 0;
    for shape in scene.objects() {
        if matches!(shape, Shape::Text(_)) {
            skipped_text += 1;
            continue;
        }
        render_shape(&mut ctx, shape);
    }
    if skipped_text > 0 {
        log::debug!("bitmap export skipped {} text objects", skipped_text);
    }

    let mut pixmap = Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let unpremul = pixmap.take_unpremultiplied();
    let mut rgba_data = Vec::with_capacity(unpremul.len() * 4);
    for p in unpremul {
        rgba_data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }

    Ok(PngRenderResult {
        rgba_data,
        width: u32::from(width),
        height: u32::from(height),
    })
}

/// Encode rasterized pixels as a PNG file.
pub fn encode_png(image: &PngRenderResult) -> ExportResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(|e| {
            log::error!("Failed to write PNG header: {:?}", e);
            ExportError::Encode(e.to_string())
        })?;
        writer.write_image_data(&image.rgba_data).map_err(|e| {
            log::error!("Failed to write PNG data: {:?}", e);
            ExportError::Encode(e.to_string())
        })?;
    }
    Ok(png_data)
}

/// Rasterize and encode in one step.
pub fn export_png(scene: &Scene, scale: f64) -> ExportResult<Vec<u8>> {
    let image = rasterize(scene, scale)?;
    log::info!("exporting {}x{} PNG", image.width, image.height);
    encode_png(&image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use minipaint_core::shapes::{Rectangle, SerializableColor, ShapeStyle, Text};

    const RED: SerializableColor = SerializableColor::new(255, 0, 0, 255);

    fn pixel(image: &PngRenderResult, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * image.width + x) * 4) as usize;
        [
            image.rgba_data[i],
            image.rgba_data[i + 1],
            image.rgba_data[i + 2],
            image.rgba_data[i + 3],
        ]
    }

    fn red_square_scene() -> Scene {
        let mut scene = Scene::new(64.0, 48.0);
        let mut rect = Rectangle::new(Point::new(8.0, 8.0), 24.0, 24.0);
        rect.style = ShapeStyle::filled(RED);
        scene.add(Shape::Rectangle(rect));
        scene
    }

    #[test]
    fn test_background_and_fill() {
        let image = rasterize(&red_square_scene(), 1.0).unwrap();
        assert_eq!((image.width, image.height), (64, 48));
        assert_eq!(image.rgba_data.len(), 64 * 48 * 4);
        assert_eq!(pixel(&image, 20, 20), [255, 0, 0, 255]);
        assert_eq!(pixel(&image, 50, 40), [255, 255, 255, 255]);
    }

    #[test]
    fn test_scale() {
        let image = rasterize(&red_square_scene(), 2.0).unwrap();
        assert_eq!((image.width, image.height), (128, 96));
        assert_eq!(pixel(&image, 40, 40), [255, 0, 0, 255]);
        assert_eq!(pixel(&image, 100, 80), [255, 255, 255, 255]);
    }

    #[test]
    fn test_text_is_skipped() {
        let mut scene = Scene::new(32.0, 32.0);
        scene.add(Shape::Text(Text::new(Point::new(4.0, 4.0), "hi")));
        let image = rasterize(&scene, 1.0).unwrap();
        assert!(image.rgba_data.chunks(4).all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_size_errors() {
        let scene = Scene::new(800.0, 600.0);
        assert!(matches!(rasterize(&scene, 0.0), Err(ExportError::EmptyCanvas)));
        assert!(matches!(rasterize(&scene, f64::NAN), Err(ExportError::EmptyCanvas)));
        assert!(matches!(
            rasterize(&scene, 100.0),
            Err(ExportError::CanvasTooLarge { .. })
        ));
    }

    #[test]
    fn test_png_signature() {
        let bytes = export_png(&red_square_scene(), 1.0).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}
