//! Renderer trait abstraction.

use arrowink_core::Stage;
use kurbo::{Affine, Point, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Rotation visualization info (for the rotation helper line).
#[derive(Debug, Clone, Copy)]
pub struct RotationInfo {
    /// Center of the node being rotated, in stage coordinates.
    pub center: Point,
    /// Current rotation in degrees (0 points up).
    pub degrees: f64,
    /// Whether snapping to 15° increments.
    pub snapped: bool,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The stage to render.
    pub stage: &'a Stage,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Transform handle color.
    pub selection_color: Color,
    /// Rotation helper, while a rotate handle is being dragged.
    pub rotation_info: Option<RotationInfo>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(stage: &'a Stage, viewport_size: Size) -> Self {
        Self {
            stage,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            rotation_info: None,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set rotation info for rendering the rotation helper.
    pub fn with_rotation_info(mut self, info: Option<RotationInfo>) -> Self {
        self.rotation_info = info;
        self
    }

    /// Stage (logical pixels) to physical pixels.
    pub fn view_transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
