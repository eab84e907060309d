// File: crates/stock-core/src/glyph.rs
// Summary: Crisp vector glyphs for OHLC bars, candlesticks and close lines.
// Notes:
// - All coordinates are pane-relative pixels; the owning series' group offset places
//   them on the canvas at paint time.
// - Points outside the viewport are skipped, not clipped.

use skia_safe as skia;

use crate::point::Point;

/// Length of the open/close ticks, in pixels.
pub const TICK_LENGTH: f64 = 5.0;

/// One command of a path drawable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// Visual state a point is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointState {
    Normal,
    Selected,
}

impl PointState {
    /// Key in the attribute table: `""` or `"selected"`.
    pub fn key(self) -> &'static str {
        match self {
            PointState::Normal => "",
            PointState::Selected => "selected",
        }
    }
}

/// Stroke/fill attributes applied to a drawable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointAttr {
    pub stroke: skia::Color,
    pub stroke_width: f32,
    pub fill: Option<skia::Color>,
}

impl Default for PointAttr {
    fn default() -> Self {
        Self { stroke: skia::Color::BLACK, stroke_width: 1.0, fill: None }
    }
}

/// Precomputed attributes per visual state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateAttrs {
    pub normal: PointAttr,
    pub selected: PointAttr,
    /// Style of the selection overlay drawn on top of a selected point.
    pub select_marker: PointAttr,
}

impl StateAttrs {
    pub fn get(&self, state: PointState) -> &PointAttr {
        match state {
            PointState::Normal => &self.normal,
            PointState::Selected => &self.selected,
        }
    }
}

/// A path drawable owned by exactly one point (or one series for line graphs).
#[derive(Clone, Debug, PartialEq)]
pub struct Graphic {
    pub segments: Vec<PathSegment>,
    pub attrs: PointAttr,
}

impl Graphic {
    pub fn path(segments: Vec<PathSegment>) -> Self {
        Self { segments, attrs: PointAttr::default() }
    }

    pub fn attr(mut self, attrs: PointAttr) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Drawable area of one pane, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Half-pixel offset that puts odd-width strokes on pixel centres.
#[inline]
pub fn crisp_correction(stroke_width: f32) -> f64 {
    (stroke_width as f64 % 2.0) / 2.0
}

/// Whether a translated point should get a glyph at all. NaN coordinates fail every comparison.
pub fn is_drawable(point: &Point, viewport: Viewport) -> bool {
    match point.plot_y {
        Some(y) => {
            point.plot_x >= 0.0
                && point.plot_x <= viewport.width
                && y >= 0.0
                && y <= viewport.height
        }
        None => false,
    }
}

/// Spine from low to high, open tick to the left, close tick to the right.
pub fn ohlc_path(point: &Point, stroke_width: f32) -> Vec<PathSegment> {
    let corr = crisp_correction(stroke_width);
    let x = point.plot_x.round() + corr;
    let open = point.plot_open.round() + corr;
    let close = point.plot_close.round() + corr;
    vec![
        PathSegment::MoveTo(x, point.plot_low.round()),
        PathSegment::LineTo(x, point.plot_high.round()),
        PathSegment::MoveTo(x, open),
        PathSegment::LineTo(x - TICK_LENGTH, open),
        PathSegment::MoveTo(x, close),
        PathSegment::LineTo(x + TICK_LENGTH, close),
        PathSegment::Close,
    ]
}

/// Wick above and below a rectangular body spanning open..close.
pub fn candlestick_path(point: &Point, stroke_width: f32, half_width: f64) -> Vec<PathSegment> {
    let corr = crisp_correction(stroke_width);
    let x = point.plot_x.round() + corr;
    let top = point.plot_open.min(point.plot_close).round() + corr;
    let bottom = point.plot_open.max(point.plot_close).round() + corr;
    let left = (point.plot_x - half_width).round() + corr;
    let right = (point.plot_x + half_width).round() + corr;
    vec![
        PathSegment::MoveTo(x, point.plot_high.round()),
        PathSegment::LineTo(x, top),
        PathSegment::MoveTo(x, bottom),
        PathSegment::LineTo(x, point.plot_low.round()),
        PathSegment::MoveTo(left, top),
        PathSegment::LineTo(right, top),
        PathSegment::LineTo(right, bottom),
        PathSegment::LineTo(left, bottom),
        PathSegment::Close,
    ]
}

/// Square marker around the top of the bar, used for the select state.
pub fn select_marker_path(point: &Point, stroke_width: f32, radius: f64) -> Vec<PathSegment> {
    let corr = crisp_correction(stroke_width);
    let x = point.plot_x.round() + corr;
    let y = point.plot_y.unwrap_or(f64::NAN).round() + corr;
    vec![
        PathSegment::MoveTo(x - radius, y - radius),
        PathSegment::LineTo(x + radius, y - radius),
        PathSegment::LineTo(x + radius, y + radius),
        PathSegment::LineTo(x - radius, y + radius),
        PathSegment::Close,
    ]
}

/// Polyline through the closes; gaps break the line.
pub fn close_line_path(points: &[Point]) -> Vec<PathSegment> {
    let mut segments = Vec::with_capacity(points.len());
    let mut pen_down = false;
    for p in points {
        if p.plot_y.is_none() || !p.plot_x.is_finite() || !p.plot_close.is_finite() {
            pen_down = false;
            continue;
        }
        if pen_down {
            segments.push(PathSegment::LineTo(p.plot_x, p.plot_close));
        } else {
            segments.push(PathSegment::MoveTo(p.plot_x, p.plot_close));
            pen_down = true;
        }
    }
    segments
}
