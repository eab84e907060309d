// File: crates/stock-core/src/annotation.rs
// Summary: Committed annotation shapes anchored to chart (domain) coordinates.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::axis::AxisId;
use crate::glyph::PathSegment;

static NEXT_ANNOTATION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationId(u64);

impl AnnotationId {
    pub fn new() -> Self {
        Self(NEXT_ANNOTATION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

/// A clicked position in chart coordinates: x ordinate, price, and the pane's y-axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    pub y_axis: AxisId,
}

impl ControlPoint {
    pub fn new(x: f64, y: f64, y_axis: AxisId) -> Self {
        Self { x, y, y_axis }
    }
}

/// How an annotation's control points are turned into a drawable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationShape {
    /// Box marker at the first point.
    Label,
    /// Arrow pointing down at the first point.
    VerticalMarker,
    HorizontalLine,
    VerticalLine,
    /// Centre at the first point, radius through the second.
    Circle,
    /// Opposite corners at the first and second points.
    Rectangle,
    /// Straight segments through all points in order.
    Polyline,
}

impl AnnotationShape {
    pub fn for_tool(tool: &str) -> Self {
        match tool {
            "label-annotation" => AnnotationShape::Label,
            "horizontal-line" => AnnotationShape::HorizontalLine,
            "vertical-line" => AnnotationShape::VerticalLine,
            "vertical-counter" | "vertical-label" | "vertical-arrow" => {
                AnnotationShape::VerticalMarker
            }
            "circle-annotation" => AnnotationShape::Circle,
            "rectangle-annotation" => AnnotationShape::Rectangle,
            _ => AnnotationShape::Polyline,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub id: AnnotationId,
    /// Name of the binding that produced it.
    pub tool: String,
    pub shape: AnnotationShape,
    pub points: Vec<ControlPoint>,
    pub visible: bool,
}

impl Annotation {
    /// Build the annotation a finished binding gesture describes.
    pub fn from_binding(tool: &str, points: Vec<ControlPoint>) -> Self {
        Self {
            id: AnnotationId::new(),
            tool: tool.to_string(),
            shape: AnnotationShape::for_tool(tool),
            points,
            visible: true,
        }
    }

    /// Path in plot pixels. `to_pixel` maps a control point into the plot; `size` is the
    /// plot's (x extent, y extent) used by full-width and full-height lines.
    pub fn path<F>(&self, to_pixel: F, size: (f64, f64)) -> Vec<PathSegment>
    where
        F: Fn(&ControlPoint) -> (f64, f64),
    {
        let px: Vec<(f64, f64)> = self.points.iter().map(to_pixel).collect();
        let Some(&(x0, y0)) = px.first() else {
            return Vec::new();
        };
        match self.shape {
            AnnotationShape::HorizontalLine => {
                vec![PathSegment::MoveTo(0.0, y0), PathSegment::LineTo(size.0, y0)]
            }
            AnnotationShape::VerticalLine => {
                vec![PathSegment::MoveTo(x0, 0.0), PathSegment::LineTo(x0, size.1)]
            }
            AnnotationShape::Label => rect_path((x0 - 12.0, y0 - 24.0), (x0 + 12.0, y0 - 8.0)),
            AnnotationShape::VerticalMarker => vec![
                PathSegment::MoveTo(x0, y0 - 40.0),
                PathSegment::LineTo(x0, y0 - 6.0),
                PathSegment::MoveTo(x0 - 5.0, y0 - 12.0),
                PathSegment::LineTo(x0, y0 - 6.0),
                PathSegment::LineTo(x0 + 5.0, y0 - 12.0),
            ],
            AnnotationShape::Circle => {
                let (x1, y1) = px.get(1).copied().unwrap_or((x0, y0));
                circle_path((x0, y0), (x1 - x0).hypot(y1 - y0))
            }
            AnnotationShape::Rectangle => {
                let corner = px.get(1).copied().unwrap_or((x0, y0));
                rect_path((x0, y0), corner)
            }
            AnnotationShape::Polyline => {
                let mut segments = vec![PathSegment::MoveTo(x0, y0)];
                segments.extend(px[1..].iter().map(|&(x, y)| PathSegment::LineTo(x, y)));
                segments
            }
        }
    }
}

fn rect_path(a: (f64, f64), b: (f64, f64)) -> Vec<PathSegment> {
    vec![
        PathSegment::MoveTo(a.0, a.1),
        PathSegment::LineTo(b.0, a.1),
        PathSegment::LineTo(b.0, b.1),
        PathSegment::LineTo(a.0, b.1),
        PathSegment::Close,
    ]
}

fn circle_path(center: (f64, f64), radius: f64) -> Vec<PathSegment> {
    const SEGMENTS: usize = 48;
    let mut segments = Vec::with_capacity(SEGMENTS + 2);
    for i in 0..=SEGMENTS {
        let t = i as f64 / SEGMENTS as f64 * std::f64::consts::TAU;
        let p = (center.0 + radius * t.cos(), center.1 + radius * t.sin());
        segments.push(if i == 0 {
            PathSegment::MoveTo(p.0, p.1)
        } else {
            PathSegment::LineTo(p.0, p.1)
        });
    }
    segments.push(PathSegment::Close);
    segments
}
