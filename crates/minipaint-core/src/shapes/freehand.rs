//! Brush strokes: pencil lines and spray dot clouds.

use super::{point_to_polyline_dist, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the points of a stroke are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushKind {
    /// Points are joined into a polyline.
    #[default]
    Pencil,
    /// Every point is an individual dot.
    Spray,
}

/// A freehand stroke made of sampled pointer positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Brush the stroke was drawn with.
    #[serde(default)]
    pub brush: BrushKind,
    /// Points in the stroke.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Freehand {
    /// Radius of a single spray dot.
    pub const SPRAY_DOT_RADIUS: f64 = 1.0;

    pub fn new(brush: BrushKind) -> Self {
        Self::from_points(brush, Vec::new())
    }

    pub fn from_points(brush: BrushKind, points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            brush,
            points,
            style: ShapeStyle::default(),
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop redundant points from a pencil stroke. Spray clouds are left
    /// alone since every dot is visible.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.brush == BrushKind::Spray || self.points.len() < 3 {
            return;
        }
        self.points = rdp_simplify(&self.points, tolerance);
    }
}

/// Ramer-Douglas-Peucker line simplification.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let (max_index, max_dist) = points
        .iter()
        .enumerate()
        .skip(1)
        .take(points.len() - 2)
        .map(|(i, p)| (i, perpendicular_distance(*p, first, last)))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });

    if max_dist > tolerance {
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Distance from a point to the infinite line through `a` and `b`.
fn perpendicular_distance(point: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    let len = d.hypot();
    if len < f64::EPSILON {
        return (point - a).hypot();
    }
    ((point.x - a.x) * d.y - (point.y - a.y) * d.x).abs() / len
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        let bounds = self
            .points
            .iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p));
        match self.brush {
            BrushKind::Pencil => bounds,
            BrushKind::Spray => bounds.inflate(Self::SPRAY_DOT_RADIUS, Self::SPRAY_DOT_RADIUS),
        }
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = match self.brush {
            BrushKind::Pencil => tolerance + self.style.stroke_width / 2.0,
            BrushKind::Spray => tolerance + Self::SPRAY_DOT_RADIUS,
        };
        match (self.brush, self.points.as_slice()) {
            (_, []) => false,
            (BrushKind::Pencil, [only]) | (BrushKind::Spray, [only]) => {
                (point - *only).hypot() <= reach
            }
            (BrushKind::Pencil, pts) => point_to_polyline_dist(point, pts) <= reach,
            (BrushKind::Spray, pts) => pts.iter().any(|p| (point - *p).hypot() <= reach),
        }
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        match self.brush {
            BrushKind::Pencil => {
                if let Some(first) = self.points.first() {
                    path.move_to(*first);
                    for point in &self.points[1..] {
                        path.line_to(*point);
                    }
                }
            }
            BrushKind::Spray => {
                for point in &self.points {
                    path.extend(Circle::new(*point, Self::SPRAY_DOT_RADIUS).path_elements(0.1));
                }
            }
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        for point in &mut self.points {
            *point = affine * *point;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Freehand {
        Freehand::from_points(
            BrushKind::Pencil,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(20.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_bounds() {
        let bounds = zigzag().bounds();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_bounds_and_hit() {
        let empty = Freehand::new(BrushKind::Pencil);
        assert_eq!(empty.bounds(), Rect::ZERO);
        assert!(!empty.hit_test(Point::ZERO, 5.0));
    }

    #[test]
    fn test_pencil_hit_along_segment() {
        let stroke = zigzag();
        assert!(stroke.hit_test(Point::new(5.0, 5.0), 1.0));
        assert!(!stroke.hit_test(Point::new(10.0, 0.0), 1.0));
    }

    #[test]
    fn test_spray_hits_only_near_dots() {
        let spray = Freehand::from_points(
            BrushKind::Spray,
            vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0)],
        );
        assert!(spray.hit_test(Point::new(0.5, 0.0), 0.0));
        assert!(!spray.hit_test(Point::new(10.0, 0.0), 2.0));
    }

    #[test]
    fn test_simplify_collinear() {
        let mut stroke = Freehand::from_points(
            BrushKind::Pencil,
            (0..10).map(|i| Point::new(i as f64, 0.0)).collect(),
        );
        stroke.simplify(0.5);
        assert_eq!(stroke.len(), 2);
    }

    #[test]
    fn test_simplify_keeps_spray() {
        let mut spray = Freehand::from_points(
            BrushKind::Spray,
            (0..10).map(|i| Point::new(i as f64, 0.0)).collect(),
        );
        spray.simplify(0.5);
        assert_eq!(spray.len(), 10);
    }

    #[test]
    fn test_translate() {
        let mut stroke = zigzag();
        stroke.transform(Affine::translate((5.0, 5.0)));
        assert!((stroke.points[0].x - 5.0).abs() < f64::EPSILON);
        assert!((stroke.points[2].y - 5.0).abs() < f64::EPSILON);
    }
}
