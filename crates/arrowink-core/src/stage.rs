//! The drawing surface: nodes in z-order plus the transform-handle overlay.

use crate::error::{StageError, StageResult};
use crate::event::{ArrowEvent, reduce};
use crate::node::ArrowNode;
use crate::shapes::{ArrowGeometry, ArrowShape, ShapeId};
use crate::transformer::Transformer;
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// A drawing surface holding arrow nodes.
#[derive(Debug, Clone)]
pub struct Stage {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f64,
    nodes: HashMap<ShapeId, ArrowNode>,
    /// Back to front.
    z_order: Vec<ShapeId>,
    /// Resize/rotate overlay.
    pub transformer: Transformer,
}

impl Stage {
    /// Create an empty stage of the given logical size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
            nodes: HashMap::new(),
            z_order: Vec::new(),
            transformer: Transformer::new(),
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Resize the stage (e.g. when the window resizes).
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Mount an arrow in a new node on top of the others.
    pub fn add_arrow(&mut self, shape: ArrowShape) -> ShapeId {
        let node = ArrowNode::new(shape);
        let id = node.id();
        self.z_order.push(id);
        self.nodes.insert(id, node);
        log::debug!("mounted arrow {id}");
        id
    }

    /// Unmount a node. Detaches the transformer if it was attached to it.
    pub fn remove(&mut self, id: ShapeId) -> Option<ArrowNode> {
        self.z_order.retain(|&node_id| node_id != id);
        if self.transformer.is_attached_to(id) {
            self.transformer.detach();
        }
        self.nodes.remove(&id)
    }

    pub fn node(&self, id: ShapeId) -> Option<&ArrowNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: ShapeId) -> Option<&mut ArrowNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in z-order (back to front).
    pub fn nodes_ordered(&self) -> impl Iterator<Item = &ArrowNode> {
        self.z_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// The front-most node, if any.
    pub fn top_node_id(&self) -> Option<ShapeId> {
        self.z_order.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Find the front-most node under a stage point.
    pub fn node_at_point(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.nodes.get(id).is_some_and(|node| node.hit_test(point, tolerance)))
    }

    /// Attach the transform handles to a mounted node.
    pub fn attach_transformer(&mut self, id: ShapeId) -> StageResult<()> {
        if !self.contains(id) {
            return Err(StageError::UnknownShape(id));
        }
        self.transformer.attach(id);
        Ok(())
    }

    /// Move a draggable node by a stage-space delta. Its point list is untouched.
    ///
    /// Returns `false` if the node is not draggable.
    pub fn drag_node(&mut self, id: ShapeId, delta: Vec2) -> StageResult<bool> {
        let node = self.nodes.get_mut(&id).ok_or(StageError::UnknownShape(id))?;
        if !node.draggable {
            return Ok(false);
        }
        node.translate(delta);
        Ok(true)
    }

    /// Run an event through the reducer for one node and store the result.
    ///
    /// The node's point list is re-synchronized with the new geometry in the same call.
    pub fn dispatch(&mut self, id: ShapeId, event: ArrowEvent) -> StageResult<ArrowGeometry> {
        let node = self.nodes.get_mut(&id).ok_or(StageError::UnknownShape(id))?;
        let next = reduce(node.geometry(), &event);
        node.set_geometry(next);
        log::debug!("{event:?} on {id} -> {:?}", next.to_points());
        Ok(next)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
