//! ArrowInk Render Library
//!
//! Renderer abstraction for the ArrowInk stage.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, RotationInfo};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
