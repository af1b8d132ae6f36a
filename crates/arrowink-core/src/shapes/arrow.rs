//! Arrow shape.

use super::{ShapeId, ShapeStyle, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uuid::Uuid;

/// Length of the arrowhead sides, in local units.
pub const ARROW_SIZE: f64 = 10.0;
/// Angle between each arrowhead side and the shaft.
pub const ARROW_HALF_ANGLE: f64 = PI / 6.0;

/// The two endpoints of an arrow, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowGeometry {
    /// Start of the shaft.
    pub tail: Point,
    /// End of the shaft (where the arrowhead points).
    pub head: Point,
}

impl ArrowGeometry {
    pub fn new(tail: Point, head: Point) -> Self {
        Self { tail, head }
    }

    /// Build from a flat `[x1, y1, x2, y2]` point list.
    pub fn from_points(points: [f64; 4]) -> Self {
        Self {
            tail: Point::new(points[0], points[1]),
            head: Point::new(points[2], points[3]),
        }
    }

    /// Flat `[x1, y1, x2, y2]` point list, as stored on a stage node.
    pub fn to_points(&self) -> [f64; 4] {
        [self.tail.x, self.tail.y, self.head.x, self.head.y]
    }

    /// Shaft angle in radians. A zero-length shaft yields `0.0`.
    pub fn angle(&self) -> f64 {
        (self.head.y - self.tail.y).atan2(self.head.x - self.tail.x)
    }
}

impl Default for ArrowGeometry {
    fn default() -> Self {
        Self::new(Point::new(50.0, 50.0), Point::new(200.0, 200.0))
    }
}

/// The filled triangle drawn at the head of an arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowheadTriangle {
    /// Always equal to the arrow head.
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

impl ArrowheadTriangle {
    /// Vertices in drawing order: tip, left, right.
    pub fn points(&self) -> [Point; 3] {
        [self.tip, self.left, self.right]
    }

    /// Closed path through the three vertices.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.tip);
        path.line_to(self.left);
        path.line_to(self.right);
        path.close_path();
        path
    }

    /// Point-in-triangle test (edges count as inside).
    pub fn contains(&self, point: Point) -> bool {
        fn sign(p1: Point, p2: Point, p3: Point) -> f64 {
            (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
        }

        let d1 = sign(point, self.tip, self.left);
        let d2 = sign(point, self.left, self.right);
        let d3 = sign(point, self.right, self.tip);

        let has_neg = (d1 < 0.0) || (d2 < 0.0) || (d3 < 0.0);
        let has_pos = (d1 > 0.0) || (d2 > 0.0) || (d3 > 0.0);

        !(has_neg && has_pos)
    }
}

/// Compute the arrowhead for a geometry.
///
/// This is the only place the arrowhead is derived; rendering and SVG export both call it.
pub fn arrowhead(geometry: &ArrowGeometry) -> ArrowheadTriangle {
    let angle = geometry.angle();
    let head = geometry.head;
    let back = |theta: f64| {
        Point::new(
            head.x - ARROW_SIZE * theta.cos(),
            head.y - ARROW_SIZE * theta.sin(),
        )
    };
    ArrowheadTriangle {
        tip: head,
        left: back(angle - ARROW_HALF_ANGLE),
        right: back(angle + ARROW_HALF_ANGLE),
    }
}

/// An arrow: a straight shaft plus a filled arrowhead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrowShape {
    pub(crate) id: ShapeId,
    /// Current endpoints.
    pub geometry: ArrowGeometry,
    /// Style properties.
    pub style: ShapeStyle,
}

impl ArrowShape {
    /// Create a new arrow.
    pub fn new(geometry: ArrowGeometry, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            style,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Arrowhead derived from the current geometry.
    pub fn arrowhead(&self) -> ArrowheadTriangle {
        arrowhead(&self.geometry)
    }

    /// Open shaft path from tail to head.
    pub fn body_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.geometry.tail);
        path.line_to(self.geometry.head);
        path
    }

    /// Closed arrowhead path.
    pub fn head_path(&self) -> BezPath {
        self.arrowhead().to_path()
    }

    /// Local bounding box of shaft and arrowhead.
    pub fn bounds(&self) -> Rect {
        let head = self.arrowhead();
        let mut rect = Rect::from_points(self.geometry.tail, self.geometry.head);
        for p in head.points() {
            rect = rect.union_pt(p);
        }
        rect
    }

    /// Check if a point (in local coordinates) hits the shaft or arrowhead.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = point_to_segment_dist(point, self.geometry.tail, self.geometry.head);
        if dist <= tolerance + self.style.stroke_width / 2.0 {
            return true;
        }
        self.arrowhead().contains(point)
    }
}

impl Default for ArrowShape {
    fn default() -> Self {
        Self::new(ArrowGeometry::default(), ShapeStyle::default())
    }
}
