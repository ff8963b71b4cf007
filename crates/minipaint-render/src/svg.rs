//! Vector export.

use minipaint_core::scene::Scene;
use minipaint_core::shapes::{BrushKind, SerializableColor, Shape, ShapeStyle, Text};
use std::fmt::Write;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn rgb(color: SerializableColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// `name="#rrggbb"` plus a `name-opacity` attribute when not opaque.
fn paint(name: &str, color: SerializableColor, opacity: f64) -> String {
    let alpha = color.a as f64 / 255.0 * opacity.clamp(0.0, 1.0);
    if alpha >= 1.0 {
        format!(r#"{name}="{}""#, rgb(color))
    } else {
        format!(r#"{name}="{}" {name}-opacity="{:.3}""#, rgb(color), alpha)
    }
}

fn style_attrs(style: &ShapeStyle) -> String {
    let mut attrs = match style.fill_color {
        Some(fill) => paint("fill", fill, style.opacity),
        None => r#"fill="none""#.to_string(),
    };
    if style.stroke_width > 0.0 {
        let _ = write!(
            attrs,
            r#" {} stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            paint("stroke", style.stroke_color, style.opacity),
            style.stroke_width
        );
    }
    attrs
}

fn write_text(out: &mut String, text: &Text) {
    let color = text.style.fill_color.unwrap_or(text.style.stroke_color);
    let _ = writeln!(
        out,
        r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" dominant-baseline="hanging" {}>{}</text>"#,
        text.position.x,
        text.position.y,
        escape(&text.font_family),
        text.font_size,
        paint("fill", color, text.style.opacity),
        escape(&text.content)
    );
}

/// Render the scene as a standalone SVG document sized to the canvas.
pub fn export_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    );
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" {}/>"#,
        paint("fill", scene.background, 1.0)
    );

    for shape in scene.objects() {
        match shape {
            Shape::Text(text) => write_text(&mut out, text),
            Shape::Freehand(f) if f.brush == BrushKind::Spray => {
                let _ = writeln!(
                    out,
                    r#"  <path d="{}" {}/>"#,
                    shape.to_path().to_svg(),
                    paint("fill", f.style.stroke_color, f.style.opacity)
                );
            }
            shape => {
                let _ = writeln!(
                    out,
                    r#"  <path d="{}" {}/>"#,
                    shape.to_path().to_svg(),
                    style_attrs(shape.style())
                );
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use minipaint_core::shapes::{Ellipse, Freehand, Line};

    #[test]
    fn test_empty_scene() {
        let svg = export_svg(&Scene::new(800.0, 600.0));
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600""#));
        assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_filled_and_stroked() {
        let mut scene = Scene::default();
        let mut circle = Ellipse::circle(Point::new(50.0, 50.0), 20.0);
        circle.style = ShapeStyle::filled(SerializableColor::new(0x9b, 0x87, 0xf5, 255));
        scene.add(Shape::Ellipse(circle));
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        line.style = ShapeStyle::stroked(SerializableColor::black(), 3.0);
        line.style.opacity = 0.5;
        scene.add(Shape::Line(line));

        let svg = export_svg(&scene);
        assert!(svg.contains(r##"fill="#9b87f5""##));
        assert!(svg.contains(r##"fill="none" stroke="#000000" stroke-opacity="0.500" stroke-width="3""##));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn test_spray_dots_are_filled() {
        let mut scene = Scene::default();
        let mut spray = Freehand::from_points(
            BrushKind::Spray,
            vec![Point::new(1.0, 1.0), Point::new(5.0, 5.0)],
        );
        spray.style = ShapeStyle::stroked(SerializableColor::new(0xf9, 0x70, 0x66, 255), 3.0);
        scene.add(Shape::Freehand(spray));
        let svg = export_svg(&scene);
        assert!(svg.contains(r##"fill="#f97066"/>"##));
        assert!(!svg.contains("stroke-width"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut scene = Scene::default();
        scene.add(Shape::Text(Text::new(Point::new(10.0, 20.0), "a < b & \"c\"")));
        let svg = export_svg(&scene);
        assert!(svg.contains(r#"<text x="10" y="20" font-family="Inter" font-size="20""#));
        assert!(svg.contains("a &lt; b &amp; &quot;c&quot;</text>"));
    }
}
