//! Stage nodes: a shape plus the affine transform the surface applies to it.

use crate::shapes::{ArrowGeometry, ArrowShape, ShapeId, ShapeStyle};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Position, scale and rotation of a node, as manipulated by dragging and the transform handles.
///
/// Rotation is kept in degrees because that is how the handles report it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl NodeTransform {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
    };

    /// Compose into a single affine: translate, then rotate, then scale.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Translation part.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// A node on the stage hosting one arrow.
///
/// The shape geometry is the only copy of the endpoints; the point list the surface reports is
/// derived from it, so rendering and export always read the same values.
#[derive(Debug, Clone)]
pub struct ArrowNode {
    shape: ArrowShape,
    /// Transform applied on top of the local point list.
    pub transform: NodeTransform,
    /// Whether the node can be moved by dragging.
    pub draggable: bool,
}

impl ArrowNode {
    /// Create a node for a shape with an identity transform.
    pub fn new(shape: ArrowShape) -> Self {
        Self {
            shape,
            transform: NodeTransform::IDENTITY,
            draggable: true,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.shape.id()
    }

    /// The arrow owned by this node.
    pub fn shape(&self) -> &ArrowShape {
        &self.shape
    }

    /// Mutable access to the arrow style. Geometry only changes through [`Self::set_geometry`].
    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.shape.style
    }

    /// Current local endpoints.
    pub fn geometry(&self) -> ArrowGeometry {
        self.shape.geometry
    }

    /// Local point list `[x1, y1, x2, y2]` as the surface reports it.
    pub fn points(&self) -> [f64; 4] {
        self.shape.geometry.to_points()
    }

    /// Replace the shape geometry.
    pub fn set_geometry(&mut self, geometry: ArrowGeometry) {
        self.shape.geometry = geometry;
    }

    /// Current affine transform (local → stage).
    pub fn get_transform(&self) -> Affine {
        self.transform.to_affine()
    }

    pub fn scale_x(&self) -> f64 {
        self.transform.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.transform.scale_y
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    /// Move the node by a stage-space delta. The point list is left untouched.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform.x += delta.x;
        self.transform.y += delta.y;
    }

    /// Convert a stage point into local coordinates.
    pub fn stage_to_local(&self, point: Point) -> Point {
        self.get_transform().inverse() * point
    }

    /// Convert a local point into stage coordinates.
    pub fn local_to_stage(&self, point: Point) -> Point {
        self.get_transform() * point
    }

    /// Local bounds of the hosted shape.
    pub fn local_bounds(&self) -> Rect {
        self.shape.bounds()
    }

    /// Visual center in stage coordinates.
    pub fn stage_center(&self) -> Point {
        self.local_to_stage(self.local_bounds().center())
    }

    /// Hit test a stage point against the transformed shape.
    ///
    /// `tolerance` is in stage units; it is converted to local units using the mean scale.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.stage_to_local(point);
        let scale = ((self.transform.scale_x.abs() + self.transform.scale_y.abs()) / 2.0).max(f64::EPSILON);
        self.shape.hit_test(local, tolerance / scale)
    }
}
