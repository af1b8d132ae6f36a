//! Pointer gestures on the stage: dragging nodes and manipulating transform handles.

use arrowink_core::input::InputState;
use arrowink_core::node::NodeTransform;
use arrowink_core::transformer::{HANDLE_HIT_TOLERANCE, HandleKind, TransformSession, hit_test_handles};
use arrowink_core::{ArrowEvent, ArrowGeometry, ShapeId, Stage};
use arrowink_render::RotationInfo;
use kurbo::Point;

/// Hit tolerance for grabbing the arrow body, in stage units.
const NODE_HIT_TOLERANCE: f64 = 5.0;

/// State of a drag on a node body.
#[derive(Debug, Clone)]
struct DragState {
    shape_id: ShapeId,
    last_point: Point,
    original_transform: NodeTransform,
}

/// What the pointer is currently doing.
#[derive(Debug, Clone)]
enum Gesture {
    Drag(DragState),
    Transform(TransformSession),
}

/// Translates pointer input into stage operations.
pub struct EventHandler {
    gesture: Option<Gesture>,
    /// Current rotation during a rotate-handle drag (for helper line rendering).
    pub rotation_state: Option<RotationInfo>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            gesture: None,
            rotation_state: None,
        }
    }

    /// Check if a drag or handle manipulation is in progress.
    pub fn is_manipulating(&self) -> bool {
        self.gesture.is_some()
    }

    /// Cancel any ongoing gesture, restoring the node's transform.
    pub fn cancel(&mut self, stage: &mut Stage) {
        match self.gesture.take() {
            Some(Gesture::Drag(drag)) => {
                if let Some(node) = stage.node_mut(drag.shape_id) {
                    node.transform = drag.original_transform;
                }
            }
            Some(Gesture::Transform(session)) => {
                if let Some(node) = stage.node_mut(session.shape_id) {
                    session.cancel(node);
                }
            }
            None => {}
        }
        self.rotation_state = None;
    }

    /// What the pointer would grab at `point`: `Some(Some(handle))` for a handle,
    /// `Some(None)` for a draggable node body, `None` for empty stage.
    pub fn get_cursor_for_position(&self, stage: &Stage, point: Point) -> Option<Option<HandleKind>> {
        if let Some(node) = stage.transformer.attached().and_then(|id| stage.node(id)) {
            if let Some(handle) = hit_test_handles(node, point, HANDLE_HIT_TOLERANCE) {
                return Some(Some(handle));
            }
        }
        stage
            .node_at_point(point, NODE_HIT_TOLERANCE)
            .filter(|&id| stage.node(id).is_some_and(|node| node.draggable))
            .map(|_| None)
    }

    /// Handle a press event (mouse down).
    pub fn handle_press(&mut self, stage: &mut Stage, point: Point) {
        // Handles of the attached node take priority over the node body
        if let Some(id) = stage.transformer.attached() {
            if let Some(node) = stage.node(id) {
                if let Some(handle) = hit_test_handles(node, point, HANDLE_HIT_TOLERANCE) {
                    self.gesture = Some(Gesture::Transform(TransformSession::begin(node, handle, point)));
                    return;
                }
            }
        }

        let Some(id) = stage.node_at_point(point, NODE_HIT_TOLERANCE) else {
            return;
        };
        let Some(node) = stage.node(id) else {
            return;
        };
        if node.draggable {
            self.gesture = Some(Gesture::Drag(DragState {
                shape_id: id,
                last_point: point,
                original_transform: node.transform,
            }));
        }
    }

    /// Handle pointer movement while the left button is held.
    pub fn handle_drag(&mut self, stage: &mut Stage, point: Point, input: &InputState) {
        match &mut self.gesture {
            Some(Gesture::Drag(drag)) => {
                let delta = point - drag.last_point;
                drag.last_point = point;
                if let Err(e) = stage.drag_node(drag.shape_id, delta) {
                    log::warn!("Drag on a missing node: {e}");
                    self.gesture = None;
                }
            }
            Some(Gesture::Transform(session)) => {
                let constrain = input.modifiers.shift;
                let Some(node) = stage.node_mut(session.shape_id) else {
                    self.gesture = None;
                    return;
                };
                session.update(node, point, constrain);

                self.rotation_state = (session.handle == HandleKind::Rotate).then(|| RotationInfo {
                    center: node.stage_center(),
                    degrees: node.rotation(),
                    snapped: constrain,
                });
            }
            None => {}
        }
    }

    /// Handle a release event (mouse up). Call after `input` has seen the release.
    ///
    /// Finishing a drag dispatches `DragEnd`, finishing a handle manipulation dispatches
    /// `TransformEnd`; both carry the node's current point list. A plain click on the stage
    /// re-attaches the transformer to the top node. Returns the geometry produced by the reducer.
    pub fn handle_release(&mut self, stage: &mut Stage, input: &InputState) -> Option<ArrowGeometry> {
        self.rotation_state = None;

        let finished = match self.gesture.take() {
            // A press without movement is not a drag
            Some(Gesture::Drag(drag)) => stage
                .node(drag.shape_id)
                .filter(|node| node.transform != drag.original_transform)
                .map(|node| (drag.shape_id, ArrowEvent::DragEnd { points: node.points() })),
            Some(Gesture::Transform(session)) => stage
                .node(session.shape_id)
                .map(|node| (session.shape_id, ArrowEvent::TransformEnd { points: node.points() })),
            None => None,
        };

        if input.is_click() {
            if let Some(id) = stage.top_node_id() {
                if let Err(e) = stage.attach_transformer(id) {
                    log::debug!("Transformer attach skipped: {e}");
                }
            }
        }

        let (id, event) = finished?;
        match stage.dispatch(id, event) {
            Ok(geometry) => Some(geometry),
            Err(e) => {
                log::debug!("Dropped {event:?}: {e}");
                None
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrowink_core::input::{MouseButton, PointerEvent};
    use arrowink_core::ArrowShape;

    fn press(input: &mut InputState, x: f64, y: f64) -> Point {
        let position = Point::new(x, y);
        input.handle_pointer_event(PointerEvent::Down { position, button: MouseButton::Left });
        position
    }

    fn release(input: &mut InputState, x: f64, y: f64) {
        input.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn move_to(input: &mut InputState, x: f64, y: f64) -> Point {
        let position = Point::new(x, y);
        input.handle_pointer_event(PointerEvent::Move { position });
        position
    }

    #[test]
    fn test_drag_moves_transform_and_dispatches_points() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_arrow(ArrowShape::default());
        let mut input = InputState::new();
        let mut handler = EventHandler::new();

        let p = press(&mut input, 125.0, 125.0);
        handler.handle_press(&mut stage, p);
        assert!(handler.is_manipulating());

        let p = move_to(&mut input, 155.0, 155.0);
        handler.handle_drag(&mut stage, p, &input);
        release(&mut input, 155.0, 155.0);
        let geometry = handler.handle_release(&mut stage, &input).unwrap();

        let node = stage.node(id).unwrap();
        assert_eq!(geometry.to_points(), [50.0, 50.0, 200.0, 200.0]);
        assert_eq!(node.points(), [50.0, 50.0, 200.0, 200.0]);
        assert_eq!(node.transform.position(), Point::new(30.0, 30.0));
        assert!(!handler.is_manipulating());
    }

    #[test]
    fn test_handle_drag_rescales_node() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_arrow(ArrowShape::default());
        stage.attach_transformer(id).unwrap();
        let mut input = InputState::new();
        let mut handler = EventHandler::new();

        let p = press(&mut input, 200.0, 200.0);
        handler.handle_press(&mut stage, p);
        let p = move_to(&mut input, 350.0, 350.0);
        handler.handle_drag(&mut stage, p, &input);
        release(&mut input, 350.0, 350.0);
        assert!(handler.handle_release(&mut stage, &input).is_some());

        let node = stage.node(id).unwrap();
        assert!((node.scale_x() - 2.0).abs() < 1e-9);
        assert_eq!(node.points(), [50.0, 50.0, 200.0, 200.0]);
    }

    #[test]
    fn test_rotate_sets_rotation_state() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_arrow(ArrowShape::default());
        stage.attach_transformer(id).unwrap();
        let mut input = InputState::new();
        let mut handler = EventHandler::new();

        let p = press(&mut input, 125.0, 25.0);
        handler.handle_press(&mut stage, p);
        let p = move_to(&mut input, 300.0, 125.0);
        handler.handle_drag(&mut stage, p, &input);
        assert!(handler.rotation_state.is_some());

        release(&mut input, 300.0, 125.0);
        handler.handle_release(&mut stage, &input);
        assert!(handler.rotation_state.is_none());
        assert!((stage.node(id).unwrap().rotation() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_click_on_empty_stage_attaches_transformer() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_arrow(ArrowShape::default());
        let mut input = InputState::new();
        let mut handler = EventHandler::new();

        let p = press(&mut input, 600.0, 500.0);
        handler.handle_press(&mut stage, p);
        release(&mut input, 600.0, 500.0);
        assert!(handler.handle_release(&mut stage, &input).is_none());
        assert_eq!(stage.transformer.attached(), Some(id));
    }

    #[test]
    fn test_cancel_restores_transform() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_arrow(ArrowShape::default());
        let mut input = InputState::new();
        let mut handler = EventHandler::new();

        let p = press(&mut input, 125.0, 125.0);
        handler.handle_press(&mut stage, p);
        let p = move_to(&mut input, 200.0, 125.0);
        handler.handle_drag(&mut stage, p, &input);
        handler.cancel(&mut stage);

        assert!(stage.node(id).unwrap().transform.is_identity());
        assert!(!handler.is_manipulating());
    }

    #[test]
    fn test_cursor_for_position() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_arrow(ArrowShape::default());
        let handler = EventHandler::new();

        assert_eq!(handler.get_cursor_for_position(&stage, Point::new(125.0, 125.0)), Some(None));
        assert_eq!(handler.get_cursor_for_position(&stage, Point::new(600.0, 500.0)), None);

        stage.attach_transformer(id).unwrap();
        assert_eq!(
            handler.get_cursor_for_position(&stage, Point::new(125.0, 25.0)),
            Some(Some(HandleKind::Rotate))
        );
    }
}
