//! Regular polygons and stars.

use super::{point_to_polyline_dist, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use uuid::Uuid;

/// Which member of the polygon family a shape is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonKind {
    Triangle,
    Pentagon,
    Hexagon,
    /// Five-pointed star.
    Star,
}

impl PolygonKind {
    pub fn name(self) -> &'static str {
        match self {
            PolygonKind::Triangle => "triangle",
            PolygonKind::Pentagon => "pentagon",
            PolygonKind::Hexagon => "hexagon",
            PolygonKind::Star => "star",
        }
    }

    /// Ratio between the inner and outer radius of a star.
    const STAR_INNER_RATIO: f64 = 0.4;

    /// Vertex positions relative to a unit circle, starting at the top and
    /// going clockwise in screen space.
    fn unit_vertices(self) -> Vec<(f64, f64)> {
        let (count, star) = match self {
            PolygonKind::Triangle => (3, false),
            PolygonKind::Pentagon => (5, false),
            PolygonKind::Hexagon => (6, false),
            PolygonKind::Star => (10, true),
        };
        (0..count)
            .map(|i| {
                let angle = -FRAC_PI_2 + TAU * i as f64 / count as f64;
                let r = if star && i % 2 == 1 {
                    Self::STAR_INNER_RATIO
                } else {
                    1.0
                };
                (r * angle.cos(), r * angle.sin())
            })
            .collect()
    }
}

/// A regular polygon or star inscribed in a circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Which polygon this is.
    pub kind: PolygonKind,
    /// Center of the circumscribed circle.
    pub center: Point,
    /// Horizontal radius of the circumscribed circle.
    pub radius_x: f64,
    /// Vertical radius of the circumscribed circle.
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    /// Radius used by the polygon-family tools.
    pub const PRESET_RADIUS: f64 = 50.0;

    pub fn new(kind: PolygonKind, center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            center,
            radius_x: radius,
            radius_y: radius,
            style: ShapeStyle::default(),
        }
    }

    /// Absolute vertex positions.
    pub fn vertices(&self) -> Vec<Point> {
        self.kind
            .unit_vertices()
            .into_iter()
            .map(|(x, y)| {
                Point::new(
                    self.center.x + x * self.radius_x,
                    self.center.y + y * self.radius_y,
                )
            })
            .collect()
    }

    /// Even-odd point-in-polygon test.
    fn contains(&self, point: Point) -> bool {
        let verts = self.vertices();
        let mut inside = false;
        let mut j = verts.len() - 1;
        for i in 0..verts.len() {
            let (a, b) = (verts[i], verts[j]);
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn closed_outline(&self) -> Vec<Point> {
        let mut pts = self.vertices();
        if let Some(first) = pts.first().copied() {
            pts.push(first);
        }
        pts
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let verts = self.vertices();
        let mut bounds = Rect::from_points(verts[0], verts[0]);
        for v in &verts[1..] {
            bounds = bounds.union_pt(*v);
        }
        bounds
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.style.fill_color.is_some() && self.contains(point) {
            return true;
        }
        point_to_polyline_dist(point, &self.closed_outline())
            <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let verts = self.vertices();
        path.move_to(verts[0]);
        for v in &verts[1..] {
            path.line_to(*v);
        }
        path.close_path();
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.center = affine * self.center;
        let scale = affine.as_coeffs();
        self.radius_x *= scale[0].abs();
        self.radius_y *= scale[3].abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;

    #[test]
    fn test_vertex_counts() {
        let c = Point::new(0.0, 0.0);
        assert_eq!(Polygon::new(PolygonKind::Triangle, c, 10.0).vertices().len(), 3);
        assert_eq!(Polygon::new(PolygonKind::Pentagon, c, 10.0).vertices().len(), 5);
        assert_eq!(Polygon::new(PolygonKind::Hexagon, c, 10.0).vertices().len(), 6);
        assert_eq!(Polygon::new(PolygonKind::Star, c, 10.0).vertices().len(), 10);
    }

    #[test]
    fn test_first_vertex_points_up() {
        let tri = Polygon::new(PolygonKind::Triangle, Point::new(50.0, 50.0), 10.0);
        let top = tri.vertices()[0];
        assert!((top.x - 50.0).abs() < 1e-10);
        assert!((top.y - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_filled_hit_inside() {
        let mut hex = Polygon::new(PolygonKind::Hexagon, Point::new(0.0, 0.0), 50.0);
        hex.style.fill_color = Some(SerializableColor::black());
        assert!(hex.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(!hex.hit_test(Point::new(80.0, 0.0), 0.0));
    }

    #[test]
    fn test_outline_hit_misses_center() {
        let tri = Polygon::new(PolygonKind::Triangle, Point::new(0.0, 0.0), 50.0);
        assert!(!tri.hit_test(Point::new(0.0, 0.0), 1.0));
        assert!(tri.hit_test(Point::new(0.0, -50.0), 1.0));
    }

    #[test]
    fn test_star_bounds_within_radius() {
        let star = Polygon::new(PolygonKind::Star, Point::new(0.0, 0.0), 50.0);
        let b = star.bounds();
        assert!(b.x0 >= -50.0 - 1e-9 && b.x1 <= 50.0 + 1e-9);
        assert!((b.y0 + 50.0).abs() < 1e-9);
    }
}
