//! Shape events and the geometry reducer.
//!
//! Surface callbacks do not mutate shapes directly. They produce an [`ArrowEvent`], and
//! [`reduce`] turns the current geometry plus that event into the next geometry. The stage
//! applies the result and re-synchronizes the node (see [`crate::Stage::dispatch`]).

use crate::shapes::ArrowGeometry;
use serde::{Deserialize, Serialize};

/// Events reported by the surface for one arrow node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArrowEvent {
    /// A drag gesture finished. Carries the point list the node reports afterwards.
    DragEnd { points: [f64; 4] },
    /// A resize/rotate handle gesture finished. Carries the node's reported point list.
    TransformEnd { points: [f64; 4] },
}

/// Compute the next geometry for an event.
pub fn reduce(_current: ArrowGeometry, event: &ArrowEvent) -> ArrowGeometry {
    match event {
        ArrowEvent::DragEnd { points } => ArrowGeometry::from_points(*points),
        ArrowEvent::TransformEnd { points } => ArrowGeometry::from_points(*points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::arrowhead;

    #[test]
    fn test_drag_end_replaces_geometry() {
        let next = reduce(
            ArrowGeometry::default(),
            &ArrowEvent::DragEnd { points: [80.0, 80.0, 230.0, 230.0] },
        );
        assert_eq!(next.to_points(), [80.0, 80.0, 230.0, 230.0]);
    }

    #[test]
    fn test_transform_end_replaces_geometry() {
        let next = reduce(
            ArrowGeometry::default(),
            &ArrowEvent::TransformEnd { points: [0.0, 0.0, 10.0, 0.0] },
        );
        assert_eq!(next.to_points(), [0.0, 0.0, 10.0, 0.0]);
    }

    #[test]
    fn test_unchanged_points_are_idempotent() {
        let current = ArrowGeometry::default();
        let event = ArrowEvent::TransformEnd { points: current.to_points() };
        let once = reduce(current, &event);
        let twice = reduce(once, &event);
        assert_eq!(once, current);
        assert_eq!(twice, current);
    }

    #[test]
    fn test_arrowhead_follows_reduced_geometry() {
        let next = reduce(
            ArrowGeometry::default(),
            &ArrowEvent::DragEnd { points: [80.0, 80.0, 230.0, 230.0] },
        );
        assert_eq!(arrowhead(&next).tip, next.head);
    }
}
