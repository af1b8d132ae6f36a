//! SVG export of a mounted arrow.
//!
//! The node's local points are written verbatim and its transform goes into a `matrix(...)`
//! attribute on both elements, so the SVG reproduces what is on screen without baking the
//! transform into coordinates.

use crate::error::{ExportError, ExportResult};
use crate::shapes::{ArrowGeometry, ArrowheadTriangle, ShapeId, ShapeStyle, arrowhead};
use crate::stage::Stage;
use kurbo::{Affine, Point};
use std::fmt::Write as _;
use std::path::Path;

/// Default file name for exported arrows.
pub const EXPORT_FILE_NAME: &str = "arrow.svg";
/// MIME type used for browser downloads.
pub const SVG_MIME_TYPE: &str = "image/svg+xml;charset=utf-8";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A standalone SVG document sized to the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub width: f64,
    pub height: f64,
    /// Markup placed inside the root `<svg>` element.
    pub body: String,
}

impl SvgDocument {
    /// Complete UTF-8 SVG text.
    pub fn to_svg_string(&self) -> String {
        format!(
            "<svg width=\"{}\" height=\"{}\" xmlns=\"{}\">\n{}</svg>\n",
            fmt_number(self.width),
            fmt_number(self.height),
            SVG_NAMESPACE,
            self.body
        )
    }

    /// Write the document to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        std::fs::write(path, self.to_svg_string())?;
        Ok(())
    }
}

/// Format a number with the shortest representation that round-trips (`50`, `12.5`).
///
/// Negative zero is written as `0`.
pub fn fmt_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// `matrix(a,b,c,d,e,f)` for an affine transform.
pub fn svg_matrix(transform: Affine) -> String {
    let coeffs = transform.as_coeffs().map(fmt_number);
    format!("matrix({})", coeffs.join(","))
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_number(p.x), fmt_number(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<polyline>` for the arrow body.
pub fn polyline_element(geometry: &ArrowGeometry, style: &ShapeStyle, transform: Affine) -> String {
    format!(
        "<polyline points=\"{}\" style=\"fill:none;stroke:{};stroke-width:{}px;\" transform=\"{}\" />",
        points_attr(&[geometry.tail, geometry.head]),
        style.stroke_color.to_css(),
        fmt_number(style.stroke_width),
        svg_matrix(transform)
    )
}

/// `<polygon>` for the arrowhead.
pub fn polygon_element(head: &ArrowheadTriangle, style: &ShapeStyle, transform: Affine) -> String {
    format!(
        "<polygon points=\"{}\" style=\"fill:{};stroke:none;\" transform=\"{}\" />",
        points_attr(&head.points()),
        style.stroke_color.to_css(),
        svg_matrix(transform)
    )
}

/// Build the SVG document for one mounted arrow.
pub fn export_svg(stage: &Stage, id: ShapeId) -> ExportResult<SvgDocument> {
    let node = stage.node(id).ok_or(ExportError::NotMounted(id))?;
    let transform = node.get_transform();
    let geometry = ArrowGeometry::from_points(node.points());
    let head = arrowhead(&geometry);
    let style = &node.shape().style;

    let mut body = String::new();
    let _ = writeln!(body, "{}", polyline_element(&geometry, style, transform));
    let _ = writeln!(body, "{}", polygon_element(&head, style, transform));

    Ok(SvgDocument {
        width: stage.width,
        height: stage.height,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ArrowEvent;
    use crate::node::NodeTransform;
    use crate::shapes::{ArrowShape, SerializableColor};
    use crate::transformer::{HandleKind, TransformSession};
    use uuid::Uuid;

    fn stage_with_default_arrow() -> (Stage, ShapeId) {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_arrow(ArrowShape::default());
        (stage, id)
    }

    fn attr<'a>(svg: &'a str, element: &str, name: &str) -> &'a str {
        let start = svg.find(&format!("<{element} ")).unwrap();
        let rest = &svg[start..];
        let key = format!("{name}=\"");
        let from = rest.find(&key).unwrap() + key.len();
        let len = rest[from..].find('"').unwrap();
        &rest[from..from + len]
    }

    #[test]
    fn test_fmt_number() {
        assert_eq!(fmt_number(50.0), "50");
        assert_eq!(fmt_number(12.5), "12.5");
        assert_eq!(fmt_number(-3.0), "-3");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_default_export() {
        let (stage, id) = stage_with_default_arrow();
        let svg = export_svg(&stage, id).unwrap().to_svg_string();

        assert!(svg.starts_with("<svg width=\"800\" height=\"600\" xmlns=\"http://www.w3.org/2000/svg\">"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline ").count(), 1);
        assert_eq!(svg.matches("<polygon ").count(), 1);

        assert_eq!(attr(&svg, "polyline", "points"), "50,50 200,200");
        assert_eq!(attr(&svg, "polyline", "style"), "fill:none;stroke:#000000;stroke-width:5px;");
        assert!(attr(&svg, "polygon", "points").starts_with("200,200 "));
        assert_eq!(attr(&svg, "polygon", "style"), "fill:#000000;stroke:none;");
    }

    #[test]
    fn test_identity_matrix() {
        let (stage, id) = stage_with_default_arrow();
        let svg = export_svg(&stage, id).unwrap().to_svg_string();
        assert_eq!(attr(&svg, "polyline", "transform"), "matrix(1,0,0,1,0,0)");
        assert_eq!(attr(&svg, "polygon", "transform"), "matrix(1,0,0,1,0,0)");
    }

    #[test]
    fn test_export_after_drag_end() {
        let (mut stage, id) = stage_with_default_arrow();
        stage
            .dispatch(id, ArrowEvent::DragEnd { points: [80.0, 80.0, 230.0, 230.0] })
            .unwrap();
        let svg = export_svg(&stage, id).unwrap().to_svg_string();
        assert_eq!(attr(&svg, "polyline", "points"), "80,80 230,230");
        assert!(attr(&svg, "polygon", "points").starts_with("230,230 "));
    }

    #[test]
    fn test_export_carries_node_transform() {
        let (mut stage, id) = stage_with_default_arrow();
        stage.node_mut(id).unwrap().transform = NodeTransform {
            x: 30.0,
            y: -10.0,
            scale_x: 2.0,
            scale_y: 0.5,
            rotation: 0.0,
        };
        let svg = export_svg(&stage, id).unwrap().to_svg_string();

        // Points stay local, the transform is applied once through the matrix
        assert_eq!(attr(&svg, "polyline", "points"), "50,50 200,200");
        assert_eq!(attr(&svg, "polyline", "transform"), "matrix(2,0,0,0.5,30,-10)");
        assert_eq!(attr(&svg, "polygon", "transform"), "matrix(2,0,0,0.5,30,-10)");
    }

    fn first_pair(points: &str) -> Point {
        let (x, y) = points.split(' ').next().unwrap().split_once(',').unwrap();
        Point::new(x.parse().unwrap(), y.parse().unwrap())
    }

    fn matrix_coeffs(transform: &str) -> Vec<f64> {
        transform
            .trim_start_matches("matrix(")
            .trim_end_matches(')')
            .split(',')
            .map(|v| v.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_exported_head_matches_rendered_head() {
        let (mut stage, id) = stage_with_default_arrow();
        let mutations: [&dyn Fn(&mut Stage); 3] = [
            &|stage| {
                stage
                    .dispatch(id, ArrowEvent::DragEnd { points: [80.0, 80.0, 230.0, 230.0] })
                    .unwrap();
            },
            &|stage| {
                stage
                    .node_mut(id)
                    .unwrap()
                    .set_geometry(ArrowGeometry::from_points([-5.0, 12.0, 40.0, -30.0]));
            },
            &|stage| {
                stage
                    .dispatch(id, ArrowEvent::TransformEnd { points: [0.0, 0.0, 100.0, 0.0] })
                    .unwrap();
            },
        ];

        for mutate in mutations {
            mutate(&mut stage);
            let node = stage.node(id).unwrap();
            let svg = export_svg(&stage, id).unwrap().to_svg_string();
            let tip = node.shape().arrowhead().tip;
            assert_eq!(first_pair(attr(&svg, "polygon", "points")), tip);
            assert_eq!(first_pair(attr(&svg, "polyline", "points")), node.shape().geometry.tail);
        }
    }

    #[test]
    fn test_export_rotated_node() {
        let (mut stage, id) = stage_with_default_arrow();
        let node = stage.node_mut(id).unwrap();
        let center = node.stage_center();
        let mut session = TransformSession::begin(node, HandleKind::Rotate, Point::new(125.0, 25.0));
        // Cursor right of the center -> 90°
        session.update(node, Point::new(center.x + 100.0, center.y), false);

        let svg = export_svg(&stage, id).unwrap().to_svg_string();
        assert_eq!(attr(&svg, "polyline", "points"), "50,50 200,200");

        // Rotating about (125, 125) by 90° puts the origin at (250, 0)
        let expected = [0.0, 1.0, -1.0, 0.0, 250.0, 0.0];
        for element in ["polyline", "polygon"] {
            let coeffs = matrix_coeffs(attr(&svg, element, "transform"));
            assert_eq!(coeffs.len(), 6);
            for (got, want) in coeffs.iter().zip(expected) {
                assert!((got - want).abs() < 1e-9, "{element}: {coeffs:?}");
            }
        }
    }

    #[test]
    fn test_export_style() {
        let (mut stage, id) = stage_with_default_arrow();
        let style = stage.node_mut(id).unwrap().style_mut();
        style.stroke_color = SerializableColor::new(255, 0, 0, 255);
        style.stroke_width = 2.5;
        let svg = export_svg(&stage, id).unwrap().to_svg_string();
        assert_eq!(attr(&svg, "polyline", "style"), "fill:none;stroke:#ff0000;stroke-width:2.5px;");
        assert_eq!(attr(&svg, "polygon", "style"), "fill:#ff0000;stroke:none;");
    }

    #[test]
    fn test_zero_length_export_is_well_formed() {
        let (mut stage, id) = stage_with_default_arrow();
        stage
            .dispatch(id, ArrowEvent::TransformEnd { points: [10.0, 10.0, 10.0, 10.0] })
            .unwrap();
        let svg = export_svg(&stage, id).unwrap().to_svg_string();

        assert_eq!(attr(&svg, "polyline", "points"), "10,10 10,10");
        let polygon = attr(&svg, "polygon", "points");
        assert_eq!(polygon.split(' ').count(), 3);
        assert!(!polygon.contains("NaN") && !polygon.contains("inf"));
    }

    #[test]
    fn test_export_unknown_shape() {
        let (stage, _) = stage_with_default_arrow();
        let missing = Uuid::new_v4();
        assert!(matches!(
            export_svg(&stage, missing),
            Err(ExportError::NotMounted(id)) if id == missing
        ));
    }

    #[test]
    fn test_save_writes_file() {
        let (stage, id) = stage_with_default_arrow();
        let doc = export_svg(&stage, id).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        doc.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, doc.to_svg_string());
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let (stage, id) = stage_with_default_arrow();
        let doc = export_svg(&stage, id).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(EXPORT_FILE_NAME);
        assert!(matches!(doc.save(&path), Err(ExportError::Io(_))));
    }
}
