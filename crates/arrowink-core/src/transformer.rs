//! Transform-handle overlay: resize and rotate handles attached to one node.

use crate::node::{ArrowNode, NodeTransform};
use crate::shapes::ShapeId;
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 10.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;
/// Distance from the top edge to the rotation handle (in stage units).
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;
/// Smallest absolute scale a resize can produce.
pub const MIN_SCALE: f64 = 0.05;
/// Rotation snap increment in degrees.
pub const ROTATION_SNAP_DEGREES: f64 = 15.0;

/// Type of transform handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle (resizes both axes).
    Corner(Corner),
    /// Edge midpoint handle (resizes one axis).
    Edge(Edge),
    /// Rotation handle (positioned above the top edge).
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A handle with its stage position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in stage coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a stage point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Local-space position of a resize handle within `bounds`.
fn resize_handle_local(bounds: Rect, kind: HandleKind) -> Option<Point> {
    let center = bounds.center();
    let p = match kind {
        HandleKind::Corner(Corner::TopLeft) => Point::new(bounds.x0, bounds.y0),
        HandleKind::Corner(Corner::TopRight) => Point::new(bounds.x1, bounds.y0),
        HandleKind::Corner(Corner::BottomLeft) => Point::new(bounds.x0, bounds.y1),
        HandleKind::Corner(Corner::BottomRight) => Point::new(bounds.x1, bounds.y1),
        HandleKind::Edge(Edge::Top) => Point::new(center.x, bounds.y0),
        HandleKind::Edge(Edge::Right) => Point::new(bounds.x1, center.y),
        HandleKind::Edge(Edge::Bottom) => Point::new(center.x, bounds.y1),
        HandleKind::Edge(Edge::Left) => Point::new(bounds.x0, center.y),
        HandleKind::Rotate => return None,
    };
    Some(p)
}

/// The handle that stays fixed while `kind` is dragged.
fn opposite(kind: HandleKind) -> HandleKind {
    match kind {
        HandleKind::Corner(Corner::TopLeft) => HandleKind::Corner(Corner::BottomRight),
        HandleKind::Corner(Corner::TopRight) => HandleKind::Corner(Corner::BottomLeft),
        HandleKind::Corner(Corner::BottomLeft) => HandleKind::Corner(Corner::TopRight),
        HandleKind::Corner(Corner::BottomRight) => HandleKind::Corner(Corner::TopLeft),
        HandleKind::Edge(Edge::Top) => HandleKind::Edge(Edge::Bottom),
        HandleKind::Edge(Edge::Bottom) => HandleKind::Edge(Edge::Top),
        HandleKind::Edge(Edge::Left) => HandleKind::Edge(Edge::Right),
        HandleKind::Edge(Edge::Right) => HandleKind::Edge(Edge::Left),
        HandleKind::Rotate => HandleKind::Rotate,
    }
}

const RESIZE_HANDLES: [HandleKind; 8] = [
    HandleKind::Corner(Corner::TopLeft),
    HandleKind::Corner(Corner::TopRight),
    HandleKind::Corner(Corner::BottomLeft),
    HandleKind::Corner(Corner::BottomRight),
    HandleKind::Edge(Edge::Top),
    HandleKind::Edge(Edge::Right),
    HandleKind::Edge(Edge::Bottom),
    HandleKind::Edge(Edge::Left),
];

/// Get the transform handles for a node, in stage coordinates.
pub fn handles(node: &ArrowNode) -> Vec<Handle> {
    let bounds = node.local_bounds();
    let transform = node.get_transform();

    let mut handles: Vec<Handle> = RESIZE_HANDLES
        .iter()
        .filter_map(|&kind| resize_handle_local(bounds, kind).map(|p| Handle::new(transform * p, kind)))
        .collect();

    // Rotation handle: above top-center, along the node's local "up"
    let top_center = transform * Point::new(bounds.center().x, bounds.y0);
    let up = rotated_up(transform);
    handles.push(Handle::new(top_center + up * ROTATE_HANDLE_OFFSET, HandleKind::Rotate));
    handles
}

/// Unit vector for local -y after the linear part of `transform`.
fn rotated_up(transform: Affine) -> Vec2 {
    let [_, _, c, d, _, _] = transform.as_coeffs();
    let v = Vec2::new(-c, -d);
    let len = v.hypot();
    if len < f64::EPSILON {
        Vec2::new(0.0, -1.0)
    } else {
        v / len
    }
}

/// Find which handle (if any) is hit at the given stage point.
pub fn hit_test_handles(node: &ArrowNode, point: Point, tolerance: f64) -> Option<HandleKind> {
    handles(node)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// The overlay itself: which node the handles are attached to.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    attached: Option<ShapeId>,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the handles to a node.
    pub fn attach(&mut self, id: ShapeId) {
        if self.attached != Some(id) {
            log::debug!("transformer attached to {id}");
        }
        self.attached = Some(id);
    }

    /// Remove the handles.
    pub fn detach(&mut self) {
        self.attached = None;
    }

    /// The node the handles are attached to.
    pub fn attached(&self) -> Option<ShapeId> {
        self.attached
    }

    pub fn is_attached_to(&self, id: ShapeId) -> bool {
        self.attached == Some(id)
    }
}

/// State of an active handle manipulation on one node.
#[derive(Debug, Clone)]
pub struct TransformSession {
    /// The node being manipulated.
    pub shape_id: ShapeId,
    /// The handle being dragged.
    pub handle: HandleKind,
    /// Starting point of the drag (stage coordinates).
    pub start_point: Point,
    /// Current point of the drag (stage coordinates).
    pub current_point: Point,
    /// Node transform when the drag started.
    pub original_transform: NodeTransform,
    /// Local bounds when the drag started.
    original_bounds: Rect,
}

impl TransformSession {
    /// Start manipulating `handle` on `node`.
    pub fn begin(node: &ArrowNode, handle: HandleKind, start_point: Point) -> Self {
        Self {
            shape_id: node.id(),
            handle,
            start_point,
            current_point: start_point,
            original_transform: node.transform,
            original_bounds: node.local_bounds(),
        }
    }

    /// Apply the manipulation for a new cursor position.
    ///
    /// `constrain` keeps the aspect ratio for corner resizes and snaps rotation to 15° steps.
    pub fn update(&mut self, node: &mut ArrowNode, cursor: Point, constrain: bool) {
        self.current_point = cursor;
        node.transform = match self.handle {
            HandleKind::Rotate => self.rotated(cursor, constrain),
            kind => self.resized(kind, cursor, constrain),
        };
    }

    /// Restore the node to where it was before the session started.
    pub fn cancel(&self, node: &mut ArrowNode) {
        node.transform = self.original_transform;
    }

    fn resized(&self, kind: HandleKind, cursor: Point, keep_aspect_ratio: bool) -> NodeTransform {
        let t0 = self.original_transform;
        let (Some(handle_local), Some(anchor_local)) = (
            resize_handle_local(self.original_bounds, kind),
            resize_handle_local(self.original_bounds, opposite(kind)),
        ) else {
            return t0;
        };

        let cursor_local = t0.to_affine().inverse() * cursor;
        let factor = |cursor: f64, handle: f64, anchor: f64| {
            let span = handle - anchor;
            if span.abs() < f64::EPSILON {
                1.0
            } else {
                (cursor - anchor) / span
            }
        };

        let (mut fx, mut fy) = match kind {
            HandleKind::Corner(_) => (
                factor(cursor_local.x, handle_local.x, anchor_local.x),
                factor(cursor_local.y, handle_local.y, anchor_local.y),
            ),
            HandleKind::Edge(Edge::Left | Edge::Right) => {
                (factor(cursor_local.x, handle_local.x, anchor_local.x), 1.0)
            }
            HandleKind::Edge(Edge::Top | Edge::Bottom) => {
                (1.0, factor(cursor_local.y, handle_local.y, anchor_local.y))
            }
            HandleKind::Rotate => (1.0, 1.0),
        };

        if keep_aspect_ratio && matches!(kind, HandleKind::Corner(_)) {
            // Same magnitude on both axes, but each axis may still flip past the anchor
            let f = fx.abs().max(fy.abs());
            fx = f.copysign(fx);
            fy = f.copysign(fy);
        }

        let clamp = |scale: f64| {
            if scale.abs() < MIN_SCALE {
                MIN_SCALE.copysign(scale)
            } else {
                scale
            }
        };
        let scale_x = clamp(t0.scale_x * fx);
        let scale_y = clamp(t0.scale_y * fy);

        // Keep the anchor fixed in stage space
        let anchor_stage = t0.to_affine() * anchor_local;
        let linear = Affine::rotate(t0.rotation.to_radians()) * Affine::scale_non_uniform(scale_x, scale_y);
        let position = anchor_stage - (linear * anchor_local).to_vec2();

        NodeTransform {
            x: position.x,
            y: position.y,
            scale_x,
            scale_y,
            rotation: t0.rotation,
        }
    }

    fn rotated(&self, cursor: Point, snap: bool) -> NodeTransform {
        let t0 = self.original_transform;
        let center_local = self.original_bounds.center();
        let center = t0.to_affine() * center_local;

        let mut angle = rotation_from_cursor(center, cursor);
        if snap {
            angle = snap_rotation(angle);
        }

        let linear = Affine::rotate(angle.to_radians()) * Affine::scale_non_uniform(t0.scale_x, t0.scale_y);
        let position = center - (linear * center_local).to_vec2();

        NodeTransform {
            x: position.x,
            y: position.y,
            scale_x: t0.scale_x,
            scale_y: t0.scale_y,
            rotation: angle,
        }
    }
}

/// Rotation in degrees for a cursor position around `center`, with 0° pointing up.
pub fn rotation_from_cursor(center: Point, cursor: Point) -> f64 {
    let d = cursor - center;
    d.y.atan2(d.x).to_degrees() + 90.0
}

/// Snap an angle in degrees to the nearest 15° step.
pub fn snap_rotation(degrees: f64) -> f64 {
    (degrees / ROTATION_SNAP_DEGREES).round() * ROTATION_SNAP_DEGREES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ArrowShape;

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6, "{a:?} != {b:?}");
    }

    fn default_node() -> ArrowNode {
        ArrowNode::new(ArrowShape::default())
    }

    #[test]
    fn test_handles_for_default_arrow() {
        let node = default_node();
        let handles = handles(&node);

        // 4 corners + 4 edges + 1 rotation
        assert_eq!(handles.len(), 9);
        assert!(matches!(handles[0].kind, HandleKind::Corner(Corner::TopLeft)));
        assert_point_eq(handles[0].position, Point::new(50.0, 50.0));
        assert_point_eq(handles[3].position, Point::new(200.0, 200.0));
        assert!(matches!(handles[8].kind, HandleKind::Rotate));
        assert_point_eq(handles[8].position, Point::new(125.0, 50.0 - ROTATE_HANDLE_OFFSET));
    }

    #[test]
    fn test_handle_hit_test() {
        let node = default_node();
        assert_eq!(
            hit_test_handles(&node, Point::new(203.0, 198.0), HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        assert_eq!(
            hit_test_handles(&node, Point::new(125.0, 26.0), HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Rotate)
        );
        assert_eq!(hit_test_handles(&node, Point::new(125.0, 125.0), HANDLE_HIT_TOLERANCE), None);
    }

    #[test]
    fn test_corner_resize_keeps_anchor() {
        let mut node = default_node();
        let handle = HandleKind::Corner(Corner::BottomRight);
        let mut session = TransformSession::begin(&node, handle, Point::new(200.0, 200.0));
        session.update(&mut node, Point::new(350.0, 350.0), false);

        assert!((node.scale_x() - 2.0).abs() < 1e-9);
        assert!((node.scale_y() - 2.0).abs() < 1e-9);
        // Opposite corner does not move, dragged corner follows the cursor
        assert_point_eq(node.local_to_stage(Point::new(50.0, 50.0)), Point::new(50.0, 50.0));
        assert_point_eq(node.local_to_stage(Point::new(200.0, 200.0)), Point::new(350.0, 350.0));
        // Resizing never rewrites the local points
        assert_eq!(node.points(), [50.0, 50.0, 200.0, 200.0]);
    }

    #[test]
    fn test_edge_resize_single_axis() {
        let mut node = default_node();
        let mut session = TransformSession::begin(&node, HandleKind::Edge(Edge::Right), Point::new(200.0, 125.0));
        session.update(&mut node, Point::new(125.0, 400.0), false);

        assert!((node.scale_x() - 0.5).abs() < 1e-9);
        assert!((node.scale_y() - 1.0).abs() < 1e-9);
        assert_point_eq(node.local_to_stage(Point::new(50.0, 125.0)), Point::new(50.0, 125.0));
    }

    #[test]
    fn test_resize_clamps_scale() {
        let mut node = default_node();
        let mut session = TransformSession::begin(&node, HandleKind::Edge(Edge::Right), Point::new(200.0, 125.0));
        session.update(&mut node, Point::new(50.0, 125.0), false);
        assert!((node.scale_x() - MIN_SCALE).abs() < 1e-12);
    }

    #[test]
    fn test_corner_resize_keep_aspect_ratio() {
        let mut node = default_node();
        let mut session =
            TransformSession::begin(&node, HandleKind::Corner(Corner::BottomRight), Point::new(200.0, 200.0));
        session.update(&mut node, Point::new(350.0, 230.0), true);
        assert!((node.scale_x() - node.scale_y()).abs() < 1e-9);
        assert!((node.scale_x() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_corner_resize_keep_aspect_ratio_flips_past_anchor() {
        let mut node = default_node();
        let mut session =
            TransformSession::begin(&node, HandleKind::Corner(Corner::BottomRight), Point::new(200.0, 200.0));
        session.update(&mut node, Point::new(-100.0, -100.0), true);

        assert!((node.scale_x() + 1.0).abs() < 1e-9);
        assert!((node.scale_y() + 1.0).abs() < 1e-9);
        // Dragged corner follows the cursor, the opposite corner stays put
        assert_point_eq(node.local_to_stage(Point::new(200.0, 200.0)), Point::new(-100.0, -100.0));
        assert_point_eq(node.local_to_stage(Point::new(50.0, 50.0)), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_rotation_about_center() {
        let mut node = default_node();
        let center = node.stage_center();
        let mut session = TransformSession::begin(&node, HandleKind::Rotate, Point::new(125.0, 25.0));
        // Cursor to the right of the center -> 90°
        session.update(&mut node, Point::new(center.x + 100.0, center.y), false);

        assert!((node.rotation() - 90.0).abs() < 1e-9);
        assert_point_eq(node.stage_center(), center);
    }

    #[test]
    fn test_rotation_snaps_to_15_degrees() {
        assert!((snap_rotation(37.0) - 30.0).abs() < 1e-9);
        assert!((snap_rotation(38.0) - 45.0).abs() < 1e-9);

        let mut node = default_node();
        let center = node.stage_center();
        let mut session = TransformSession::begin(&node, HandleKind::Rotate, Point::new(125.0, 25.0));
        let rad = (10.0f64 - 90.0).to_radians();
        session.update(&mut node, center + Vec2::new(rad.cos(), rad.sin()) * 50.0, true);
        assert!((node.rotation() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancel_restores_transform() {
        let mut node = default_node();
        let mut session =
            TransformSession::begin(&node, HandleKind::Corner(Corner::TopLeft), Point::new(50.0, 50.0));
        session.update(&mut node, Point::new(0.0, 0.0), false);
        assert!(!node.transform.is_identity());
        session.cancel(&mut node);
        assert!(node.transform.is_identity());
    }

    #[test]
    fn test_attach_detach() {
        let node = default_node();
        let mut transformer = Transformer::new();
        assert_eq!(transformer.attached(), None);
        transformer.attach(node.id());
        assert!(transformer.is_attached_to(node.id()));
        transformer.detach();
        assert_eq!(transformer.attached(), None);
    }
}
