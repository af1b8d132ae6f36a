//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer, RotationInfo};
use arrowink_core::node::ArrowNode;
use arrowink_core::transformer::{HANDLE_SIZE, Handle, HandleKind, handles};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape as KurboShape, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Transform handle color.
    selection_color: Color,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Draw one arrow node: body stroke, then the filled arrowhead, both through the node transform.
    fn render_arrow(&mut self, node: &ArrowNode, view: Affine) {
        let transform = view * node.get_transform();
        let style = &node.shape().style;

        self.scene.stroke(
            &style.kurbo_stroke(),
            transform,
            style.stroke(),
            None,
            &node.shape().body_path(),
        );
        self.scene.fill(
            Fill::NonZero,
            transform,
            style.stroke(),
            None,
            &node.shape().head_path(),
        );
    }

    /// Draw the transformer outline and its handles around a node.
    fn render_transformer(&mut self, node: &ArrowNode, view: Affine) {
        let bounds = node.local_bounds();
        let node_transform = node.get_transform();

        // Outline follows the node rotation, so build it in stage space
        let mut outline = BezPath::new();
        outline.move_to(node_transform * Point::new(bounds.x0, bounds.y0));
        outline.line_to(node_transform * Point::new(bounds.x1, bounds.y0));
        outline.line_to(node_transform * Point::new(bounds.x1, bounds.y1));
        outline.line_to(node_transform * Point::new(bounds.x0, bounds.y1));
        outline.close_path();
        self.scene.stroke(&Stroke::new(1.0), view, self.selection_color, None, &outline);

        let handles = handles(node);

        // Connector from the top edge to the rotate handle
        if let Some(rotate) = handles.iter().find(|h| h.kind == HandleKind::Rotate) {
            let top_center = node_transform * Point::new(bounds.center().x, bounds.y0);
            let mut connector = BezPath::new();
            connector.move_to(top_center);
            connector.line_to(rotate.position);
            self.scene.stroke(&Stroke::new(1.0), view, self.selection_color, None, &connector);
        }

        for handle in &handles {
            self.render_handle(handle, view);
        }
    }

    /// Render a single handle.
    fn render_handle(&mut self, handle: &Handle, view: Affine) {
        let pos = handle.position;
        let path = match handle.kind {
            HandleKind::Rotate => Circle::new(pos, HANDLE_SIZE / 2.0).to_path(0.1),
            HandleKind::Corner(_) | HandleKind::Edge(_) => {
                let half = HANDLE_SIZE / 2.0;
                Rect::new(pos.x - half, pos.y - half, pos.x + half, pos.y + half).to_path(0.1)
            }
        };

        // White fill
        self.scene.fill(Fill::NonZero, view, Color::WHITE, None, &path);

        // Blue border
        self.scene.stroke(&Stroke::new(1.5), view, self.selection_color, None, &path);
    }

    /// Dashed line from the rotation center in the current direction.
    fn render_rotation_guide(&mut self, info: &RotationInfo, view: Affine) {
        let guide_color = Color::from_rgba8(236, 72, 153, 200); // Magenta
        let length = 60.0;
        // 0° points up
        let radians = (info.degrees - 90.0).to_radians();
        let end = Point::new(
            info.center.x + length * radians.cos(),
            info.center.y + length * radians.sin(),
        );

        let mut path = BezPath::new();
        path.move_to(info.center);
        path.line_to(end);
        let width = if info.snapped { 1.5 } else { 1.0 };
        let stroke = Stroke::new(width).with_dashes(0.0, &[4.0, 4.0]);
        self.scene.stroke(&stroke, view, guide_color, None, &path);

        self.scene.fill(Fill::NonZero, view, guide_color, None, &Circle::new(info.center, 2.5));
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();
        self.selection_color = ctx.selection_color;

        let view = ctx.view_transform();

        // Nodes back to front
        for node in ctx.stage.nodes_ordered() {
            self.render_arrow(node, view);
        }

        // Handles on top of every node
        if let Some(node) = ctx.stage.transformer.attached().and_then(|id| ctx.stage.node(id)) {
            self.render_transformer(node, view);
        }

        if let Some(ref info) = ctx.rotation_info {
            self.render_rotation_guide(info, view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrowink_core::{ArrowShape, Stage};

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let stage = Stage::new(800.0, 600.0);
        let ctx = RenderContext::new(&stage, kurbo::Size::new(800.0, 600.0));

        renderer.build_scene(&ctx);
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_arrow_and_handles() {
        let mut renderer = VelloRenderer::new();
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_arrow(ArrowShape::default());

        let ctx = RenderContext::new(&stage, kurbo::Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
        let arrow_only = renderer.scene().encoding().n_paths;
        assert!(arrow_only > 0);

        stage.attach_transformer(id).unwrap();
        let ctx = RenderContext::new(&stage, kurbo::Size::new(800.0, 600.0)).with_scale_factor(2.0);
        renderer.build_scene(&ctx);
        assert!(renderer.scene().encoding().n_paths > arrow_only);
    }

    #[test]
    fn test_take_scene_resets() {
        let mut renderer = VelloRenderer::new();
        let mut stage = Stage::new(800.0, 600.0);
        stage.add_arrow(ArrowShape::default());
        renderer.build_scene(&RenderContext::new(&stage, kurbo::Size::new(800.0, 600.0)));

        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }
}
