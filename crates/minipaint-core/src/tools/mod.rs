//! Tool system: turns tool selection and pointer input into scene actions.

use crate::random::SplitMix32;
use crate::shapes::{
    BrushKind, Ellipse, Freehand, Line, Polygon, PolygonKind, Rectangle, SerializableColor, Shape,
    ShapeStyle,
};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Select,
    Pencil,
    Spray,
    Eraser,
    Fill,
    Rectangle,
    Circle,
    Triangle,
    Pentagon,
    Hexagon,
    Star,
    Line,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 13] = [
        ToolKind::Select,
        ToolKind::Pencil,
        ToolKind::Spray,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Pentagon,
        ToolKind::Hexagon,
        ToolKind::Star,
        ToolKind::Line,
        ToolKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pencil => "pencil",
            ToolKind::Spray => "spray",
            ToolKind::Eraser => "eraser",
            ToolKind::Fill => "fill",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Triangle => "triangle",
            ToolKind::Pentagon => "pentagon",
            ToolKind::Hexagon => "hexagon",
            ToolKind::Star => "star",
            ToolKind::Line => "line",
            ToolKind::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The polygon drawn by this tool, if it is one of the polygon family.
    pub fn polygon_kind(self) -> Option<PolygonKind> {
        match self {
            ToolKind::Triangle => Some(PolygonKind::Triangle),
            ToolKind::Pentagon => Some(PolygonKind::Pentagon),
            ToolKind::Hexagon => Some(PolygonKind::Hexagon),
            ToolKind::Star => Some(PolygonKind::Star),
            _ => None,
        }
    }

    /// Tools that drop a ready-made shape as soon as they are selected.
    pub fn inserts_on_select(self) -> bool {
        matches!(self, ToolKind::Rectangle | ToolKind::Circle) || self.polygon_kind().is_some()
    }
}

/// What the fill tool does after a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Go back to the select tool after one fill.
    #[default]
    OneShot,
    /// Stay on the fill tool.
    Persistent,
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    /// A pointer gesture is in progress.
    Active { start: Point, current: Point },
}

/// A scene change requested by the active tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    /// Add a finished object on top of the scene.
    Insert(Shape),
    /// Select the topmost object at the point (or clear the selection).
    SelectAt(Point),
    /// Drag the selection by a world-space delta.
    MoveSelection(Vec2),
    /// The drag is over.
    FinishMove,
    /// Remove the topmost object at the point.
    EraseAt(Point),
    /// The erase gesture is over.
    FinishErase,
    /// Recolor the topmost object at the point.
    FillAt { at: Point, color: SerializableColor },
    /// Start a text box at the point.
    PlaceText(Point),
}

/// Where rectangle and circle presets land.
pub const PRESET_ORIGIN: Point = Point::new(100.0, 100.0);

/// Largest deviation, in canvas units, dropped when a pencil stroke ends.
pub const STROKE_SIMPLIFY_TOLERANCE: f64 = 0.5;

/// Current tool, gesture state and the style applied to new objects.
#[derive(Debug, Clone)]
pub struct ToolManager {
    current_tool: ToolKind,
    state: ToolState,
    points: Vec<Point>,
    rng: SplitMix32,
    /// Color applied to created objects and fills.
    pub color: SerializableColor,
    /// Stroke width for pencil strokes and lines.
    pub brush_width: f64,
    pub fill_mode: FillMode,
    /// Radius of the spray nozzle.
    pub spray_radius: f64,
    /// Dots scattered per pointer sample.
    pub spray_density: usize,
    /// Area polygon presets are placed in.
    pub canvas_size: Size,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            points: Vec::new(),
            rng: SplitMix32::from_fresh_seed(),
            color: SerializableColor::black(),
            brush_width: 3.0,
            fill_mode: FillMode::default(),
            spray_radius: 20.0,
            spray_density: 20,
            canvas_size: Size::new(800.0, 600.0),
        }
    }
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed seed for placement and scatter.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng = SplitMix32::new(seed);
        self
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Switch tools. Any gesture in progress is dropped. Shape tools return
    /// the preset object to insert, every time they are selected.
    pub fn select_tool(&mut self, tool: ToolKind) -> Option<ToolAction> {
        self.cancel();
        if tool != self.current_tool {
            log::debug!("tool changed: {} -> {}", self.current_tool.name(), tool.name());
        }
        self.current_tool = tool;
        self.preset_shape().map(ToolAction::Insert)
    }

    pub fn pointer_down(&mut self, point: Point) -> Option<ToolAction> {
        match self.current_tool {
            ToolKind::Select => {
                self.begin(point);
                Some(ToolAction::SelectAt(point))
            }
            ToolKind::Pencil | ToolKind::Line => {
                self.begin(point);
                self.points.push(point);
                None
            }
            ToolKind::Spray => {
                self.begin(point);
                self.scatter(point);
                None
            }
            ToolKind::Eraser => {
                self.begin(point);
                Some(ToolAction::EraseAt(point))
            }
            ToolKind::Fill => {
                if self.fill_mode == FillMode::OneShot {
                    self.current_tool = ToolKind::Select;
                    log::debug!("fill finished, back to select");
                }
                Some(ToolAction::FillAt {
                    at: point,
                    color: self.color,
                })
            }
            ToolKind::Text => Some(ToolAction::PlaceText(point)),
            ToolKind::Rectangle
            | ToolKind::Circle
            | ToolKind::Triangle
            | ToolKind::Pentagon
            | ToolKind::Hexagon
            | ToolKind::Star => None,
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> Option<ToolAction> {
        let ToolState::Active { current, .. } = &mut self.state else {
            return None;
        };
        let delta = point - *current;
        *current = point;
        match self.current_tool {
            ToolKind::Select if delta != Vec2::ZERO => Some(ToolAction::MoveSelection(delta)),
            ToolKind::Pencil => {
                if self.points.last() != Some(&point) {
                    self.points.push(point);
                }
                None
            }
            ToolKind::Spray => {
                self.scatter(point);
                None
            }
            ToolKind::Eraser => Some(ToolAction::EraseAt(point)),
            _ => None,
        }
    }

    /// Finish the gesture. The release position is not applied; feed it
    /// through [`ToolManager::pointer_move`] first.
    pub fn pointer_up(&mut self) -> Option<ToolAction> {
        let ToolState::Active { start, current } = self.state else {
            return None;
        };
        let action = match self.current_tool {
            ToolKind::Select => Some(ToolAction::FinishMove),
            ToolKind::Eraser => Some(ToolAction::FinishErase),
            ToolKind::Pencil | ToolKind::Spray | ToolKind::Line => {
                self.gesture_shape(start, current).map(|mut shape| {
                    if let Shape::Freehand(stroke) = &mut shape {
                        stroke.simplify(STROKE_SIMPLIFY_TOLERANCE);
                    }
                    ToolAction::Insert(shape)
                })
            }
            _ => None,
        };
        self.cancel();
        action
    }

    /// The object the current gesture would create right now.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.state {
            ToolState::Active { start, current } => self.gesture_shape(start, current),
            ToolState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.points.clear();
    }

    fn begin(&mut self, point: Point) {
        self.points.clear();
        self.state = ToolState::Active {
            start: point,
            current: point,
        };
    }

    fn stroke_style(&self) -> ShapeStyle {
        ShapeStyle::stroked(self.color, self.brush_width)
    }

    fn gesture_shape(&self, start: Point, current: Point) -> Option<Shape> {
        match self.current_tool {
            ToolKind::Pencil if self.points.len() >= 2 => {
                let mut stroke = Freehand::from_points(BrushKind::Pencil, self.points.clone());
                stroke.style = self.stroke_style();
                Some(Shape::Freehand(stroke))
            }
            ToolKind::Spray if !self.points.is_empty() => {
                let mut spray = Freehand::from_points(BrushKind::Spray, self.points.clone());
                spray.style = self.stroke_style();
                Some(Shape::Freehand(spray))
            }
            ToolKind::Line if start != current => {
                let mut line = Line::new(start, current);
                line.style = self.stroke_style();
                Some(Shape::Line(line))
            }
            _ => None,
        }
    }

    fn preset_shape(&mut self) -> Option<Shape> {
        let mut shape = match self.current_tool {
            ToolKind::Rectangle => Shape::Rectangle(Rectangle::preset(PRESET_ORIGIN)),
            ToolKind::Circle => Shape::Ellipse(Ellipse::preset(PRESET_ORIGIN)),
            tool => {
                let kind = tool.polygon_kind()?;
                let r = Polygon::PRESET_RADIUS;
                let x = self.rng.range(r, self.canvas_size.width - r);
                let y = self.rng.range(r, self.canvas_size.height - r);
                Shape::Polygon(Polygon::new(kind, Point::new(x, y), r))
            }
        };
        *shape.style_mut() = ShapeStyle::filled(self.color);
        Some(shape)
    }

    /// Drop dots uniformly over the nozzle disc around `center`.
    fn scatter(&mut self, center: Point) {
        for _ in 0..self.spray_density {
            let angle = self.rng.next_f64() * TAU;
            let dist = self.rng.next_f64().sqrt() * self.spray_radius;
            self.points
                .push(center + Vec2::new(dist * angle.cos(), dist * angle.sin()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeTrait;

    fn manager() -> ToolManager {
        ToolManager::new().with_seed(1234)
    }

    #[test]
    fn test_tool_names_round_trip() {
        for tool in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(tool.name()), Some(tool));
        }
        assert_eq!(ToolKind::from_name("lasso"), None);
    }

    #[test]
    fn test_rectangle_preset_inserted_each_select() {
        let mut tm = manager();
        tm.color = SerializableColor::new(0x9b, 0x87, 0xf5, 255);
        let first = tm.select_tool(ToolKind::Rectangle);
        let second = tm.select_tool(ToolKind::Rectangle);
        let (Some(ToolAction::Insert(a)), Some(ToolAction::Insert(b))) = (first, second) else {
            panic!("expected two inserts");
        };
        assert_ne!(a.id(), b.id());
        let Shape::Rectangle(rect) = a else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.position, PRESET_ORIGIN);
        assert_eq!(rect.style.fill_color, Some(tm.color));
    }

    #[test]
    fn test_circle_preset_at_origin() {
        let mut tm = manager();
        let Some(ToolAction::Insert(Shape::Ellipse(circle))) = tm.select_tool(ToolKind::Circle)
        else {
            panic!("expected a circle");
        };
        let bounds = circle.bounds();
        assert!((bounds.x0 - 100.0).abs() < f64::EPSILON);
        assert!((circle.radius_x - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polygon_presets_inside_canvas() {
        let mut tm = manager();
        tm.canvas_size = Size::new(400.0, 300.0);
        for tool in [ToolKind::Triangle, ToolKind::Pentagon, ToolKind::Hexagon, ToolKind::Star] {
            for _ in 0..20 {
                let Some(ToolAction::Insert(shape)) = tm.select_tool(tool) else {
                    panic!("expected an insert");
                };
                let b = shape.bounds();
                assert!(b.x0 >= -1e-9 && b.y0 >= -1e-9);
                assert!(b.x1 <= 400.0 + 1e-9 && b.y1 <= 300.0 + 1e-9);
                assert_eq!(shape.kind_name(), tool.name());
            }
        }
    }

    #[test]
    fn test_non_shape_tools_insert_nothing_on_select() {
        let mut tm = manager();
        for tool in [ToolKind::Select, ToolKind::Pencil, ToolKind::Fill, ToolKind::Text] {
            assert!(tm.select_tool(tool).is_none());
        }
    }

    #[test]
    fn test_pencil_stroke() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Pencil);
        assert!(tm.pointer_down(Point::new(0.0, 0.0)).is_none());
        assert!(tm.is_active());
        tm.pointer_move(Point::new(10.0, 10.0));
        tm.pointer_move(Point::new(20.0, 5.0));
        let Some(ToolAction::Insert(Shape::Freehand(stroke))) = tm.pointer_up() else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.brush, BrushKind::Pencil);
        assert!((stroke.style.stroke_width - 3.0).abs() < f64::EPSILON);
        assert!(!tm.is_active());
    }

    #[test]
    fn test_straight_pencil_stroke_is_simplified() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Pencil);
        tm.pointer_down(Point::new(0.0, 0.0));
        for x in 1..=10 {
            tm.pointer_move(Point::new(x as f64 * 10.0, 0.1 * (x % 2) as f64));
        }
        let Some(Shape::Freehand(preview)) = tm.preview_shape() else {
            panic!("expected a preview stroke");
        };
        assert_eq!(preview.len(), 11);
        let Some(ToolAction::Insert(Shape::Freehand(stroke))) = tm.pointer_up() else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.points, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    }

    #[test]
    fn test_pencil_click_inserts_nothing() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Pencil);
        tm.pointer_down(Point::new(0.0, 0.0));
        assert!(tm.pointer_up().is_none());
    }

    #[test]
    fn test_spray_scatters_within_radius() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Spray);
        let center = Point::new(200.0, 200.0);
        tm.pointer_down(center);
        let Some(ToolAction::Insert(Shape::Freehand(spray))) = tm.pointer_up() else {
            panic!("expected spray");
        };
        assert_eq!(spray.brush, BrushKind::Spray);
        assert_eq!(spray.len(), tm.spray_density);
        assert!(spray.points.iter().all(|p| (*p - center).hypot() <= tm.spray_radius + 1e-9));
    }

    #[test]
    fn test_select_drag() {
        let mut tm = manager();
        assert_eq!(
            tm.pointer_down(Point::new(5.0, 5.0)),
            Some(ToolAction::SelectAt(Point::new(5.0, 5.0)))
        );
        assert_eq!(
            tm.pointer_move(Point::new(15.0, 10.0)),
            Some(ToolAction::MoveSelection(Vec2::new(10.0, 5.0)))
        );
        assert_eq!(tm.pointer_move(Point::new(15.0, 10.0)), None);
        assert_eq!(tm.pointer_up(), Some(ToolAction::FinishMove));
    }

    #[test]
    fn test_eraser() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Eraser);
        assert_eq!(
            tm.pointer_down(Point::new(1.0, 1.0)),
            Some(ToolAction::EraseAt(Point::new(1.0, 1.0)))
        );
        assert_eq!(
            tm.pointer_move(Point::new(2.0, 2.0)),
            Some(ToolAction::EraseAt(Point::new(2.0, 2.0)))
        );
        assert_eq!(tm.pointer_up(), Some(ToolAction::FinishErase));
    }

    #[test]
    fn test_fill_one_shot_reverts_to_select() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Fill);
        let action = tm.pointer_down(Point::new(3.0, 4.0));
        assert!(matches!(action, Some(ToolAction::FillAt { .. })));
        assert_eq!(tm.current_tool(), ToolKind::Select);
    }

    #[test]
    fn test_fill_persistent_stays() {
        let mut tm = manager();
        tm.fill_mode = FillMode::Persistent;
        tm.select_tool(ToolKind::Fill);
        tm.pointer_down(Point::new(3.0, 4.0));
        assert_eq!(tm.current_tool(), ToolKind::Fill);
    }

    #[test]
    fn test_line_needs_length() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Line);
        tm.pointer_down(Point::new(0.0, 0.0));
        assert!(tm.pointer_up().is_none());

        tm.pointer_down(Point::new(0.0, 0.0));
        tm.pointer_move(Point::new(30.0, 40.0));
        assert!(matches!(tm.preview_shape(), Some(Shape::Line(_))));
        let Some(ToolAction::Insert(Shape::Line(line))) = tm.pointer_up() else {
            panic!("expected a line");
        };
        assert!((line.length() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_text_places_at_point() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Text);
        assert_eq!(
            tm.pointer_down(Point::new(7.0, 8.0)),
            Some(ToolAction::PlaceText(Point::new(7.0, 8.0)))
        );
    }

    #[test]
    fn test_select_tool_cancels_gesture() {
        let mut tm = manager();
        tm.select_tool(ToolKind::Pencil);
        tm.pointer_down(Point::new(0.0, 0.0));
        tm.pointer_move(Point::new(5.0, 5.0));
        tm.select_tool(ToolKind::Pencil);
        assert!(!tm.is_active());
        assert!(tm.pointer_up().is_none());
    }
}
