//! ArrowInk Core Library
//!
//! Platform-agnostic data model and logic for the ArrowInk canvas: the arrow shape, its stage node,
//! the transform-handle overlay, pointer input and SVG export.

pub mod error;
pub mod event;
pub mod export;
pub mod input;
pub mod node;
pub mod shapes;
pub mod stage;
pub mod transformer;

pub use error::{ExportError, StageError};
pub use event::{ArrowEvent, reduce};
pub use export::{EXPORT_FILE_NAME, SVG_MIME_TYPE, SvgDocument, export_svg};
pub use input::{InputState, Modifiers, MouseButton, PointerEvent};
pub use node::{ArrowNode, NodeTransform};
pub use shapes::{ArrowGeometry, ArrowShape, ArrowheadTriangle, ShapeId, ShapeStyle, arrowhead};
pub use stage::Stage;
pub use transformer::{
    HANDLE_HIT_TOLERANCE, HANDLE_SIZE, Handle, HandleKind, MIN_SCALE, ROTATE_HANDLE_OFFSET, TransformSession,
    Transformer,
};
