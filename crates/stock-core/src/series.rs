// File: crates/stock-core/src/series.rs
// Summary: Series model (points, style options, axis binding) and the per-kind translate/draw behaviour.
// Notes:
// - Raw inputs are retained so a series can be re-typed: points are destroyed and rebuilt.
// - Behaviour is chosen by `SeriesKind` and dispatched statically through `SeriesBehavior`.

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::axis::{Axis, AxisId};
use crate::glyph::{
    candlestick_path, close_line_path, is_drawable, ohlc_path, select_marker_path, Graphic,
    PointAttr, StateAttrs, Viewport,
};
use crate::point::{AutoIncrement, Point, PointInput};
use crate::translate::{translate_points, PlotGeometry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    #[default]
    Ohlc,
    Candlestick,
}

impl SeriesKind {
    pub fn name(self) -> &'static str {
        match self {
            SeriesKind::Line => "line",
            SeriesKind::Ohlc => "ohlc",
            SeriesKind::Candlestick => "candlestick",
        }
    }

    /// Default style for a series of this kind.
    pub fn default_options(self) -> SeriesOptions {
        let base = SeriesOptions {
            color: skia::Color::from_argb(255, 0x41, 0x70, 0xa0),
            line_width: 1.0,
            select: SelectStateOptions {
                color: skia::Color::BLACK,
                fill: skia::Color::WHITE,
                line_width: 2.0,
                marker_radius: 4.0,
            },
            point_start: 0.0,
            point_interval: 1.0,
        };
        match self {
            SeriesKind::Line => SeriesOptions { line_width: 2.0, ..base },
            SeriesKind::Ohlc | SeriesKind::Candlestick => base,
        }
    }
}

/// Style of the "select" state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectStateOptions {
    pub color: skia::Color,
    pub fill: skia::Color,
    pub line_width: f32,
    pub marker_radius: f64,
}

/// Immutable per-series configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesOptions {
    /// Stroke color (`stroke` attribute).
    pub color: skia::Color,
    /// Stroke width (`stroke-width` attribute).
    pub line_width: f32,
    pub select: SelectStateOptions,
    /// First auto-assigned x.
    pub point_start: f64,
    /// Step between auto-assigned x values.
    pub point_interval: f64,
}

impl SeriesOptions {
    /// Attribute table for a point, honouring an optional per-point stroke color.
    pub fn state_attrs(&self, stroke_override: Option<skia::Color>) -> StateAttrs {
        StateAttrs {
            normal: PointAttr {
                stroke: stroke_override.unwrap_or(self.color),
                stroke_width: self.line_width,
                fill: None,
            },
            selected: PointAttr {
                stroke: self.select.color,
                stroke_width: self.select.line_width,
                fill: None,
            },
            select_marker: PointAttr {
                stroke: self.select.color,
                stroke_width: self.select.line_width,
                fill: Some(self.select.fill),
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub kind: SeriesKind,
    pub options: SeriesOptions,
    pub x_axis: AxisId,
    pub y_axis: AxisId,
    pub points: Vec<Point>,
    /// Whole-series path (line kind only).
    pub graph: Option<Graphic>,
    /// Id of the series an indicator was computed from.
    pub linked_to: Option<String>,
    data: Vec<PointInput>,
    auto_increment: AutoIncrement,
}

impl Series {
    pub fn new(id: impl Into<String>, kind: SeriesKind) -> Self {
        let options = kind.default_options();
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            options,
            x_axis: AxisId(0),
            y_axis: AxisId(0),
            points: Vec::new(),
            graph: None,
            linked_to: None,
            data: Vec::new(),
            auto_increment: AutoIncrement::new(options.point_start, options.point_interval),
        }
    }

    pub fn with_options(mut self, options: SeriesOptions) -> Self {
        self.options = options;
        self.rebuild_points();
        self
    }

    pub fn with_data(mut self, data: Vec<PointInput>) -> Self {
        self.set_data(data);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Next default x-ordinate for this series.
    pub fn auto_increment(&mut self) -> f64 {
        self.auto_increment.next_value()
    }

    /// Raw inputs the points were built from.
    pub fn data(&self) -> &[PointInput] {
        &self.data
    }

    /// Replace all data; existing points and their graphics are dropped.
    pub fn set_data(&mut self, data: Vec<PointInput>) {
        self.data = data;
        self.rebuild_points();
    }

    /// Append one point built from `input`.
    pub fn add_point(&mut self, input: PointInput) {
        let mut point = Point::from_input(&input, &mut self.auto_increment);
        point.attrs = self.point_attrs(&point);
        self.points.push(point);
        self.data.push(input);
    }

    /// Change the series kind. Points are destroyed and recreated from the retained input;
    /// the stroke color survives, everything else comes from the new kind's defaults.
    pub fn set_kind(&mut self, kind: SeriesKind) {
        if kind == self.kind {
            return;
        }
        let color = self.options.color;
        self.kind = kind;
        self.options = SeriesOptions { color, ..kind.default_options() };
        self.graph = None;
        self.rebuild_points();
        log::debug!("series {} re-typed to {}", self.id, kind.name());
    }

    fn rebuild_points(&mut self) {
        self.auto_increment =
            AutoIncrement::new(self.options.point_start, self.options.point_interval);
        let mut points = Vec::with_capacity(self.data.len());
        for input in &self.data {
            let mut point = Point::from_input(input, &mut self.auto_increment);
            point.attrs = self.point_attrs(&point);
            points.push(point);
        }
        self.points = points;
    }

    fn point_attrs(&self, point: &Point) -> StateAttrs {
        let stroke = point
            .options
            .as_ref()
            .and_then(|o| o.color.as_deref())
            .and_then(|c| match crate::config::parse_color(c) {
                Ok(color) => Some(color),
                Err(err) => {
                    log::warn!("series {}: ignoring point color: {err}", self.id);
                    None
                }
            });
        self.options.state_attrs(stroke)
    }

    /// Toggle selection of the point at `index`. Returns false when there is no such point.
    pub fn select_point(&mut self, index: usize, selected: bool) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Index of the point whose `client_x` is nearest to `client_x`.
    pub fn point_at_client_x(&self, client_x: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.client_x.is_finite())
            .min_by(|(_, a), (_, b)| {
                (a.client_x - client_x).abs().total_cmp(&(b.client_x - client_x).abs())
            })
            .map(|(i, _)| i)
    }

    /// Translate and regenerate all drawables for the current axes.
    pub fn redraw(&mut self, x_axis: &Axis, y_axis: &Axis, geom: &PlotGeometry) {
        let viewport = Viewport::new(geom.plot_size_x(), y_axis.len);
        match self.kind {
            SeriesKind::Ohlc => render_with(&OhlcBehavior, self, x_axis, y_axis, geom, viewport),
            SeriesKind::Candlestick => {
                render_with(&CandlestickBehavior, self, x_axis, y_axis, geom, viewport)
            }
            SeriesKind::Line => render_with(&LineBehavior, self, x_axis, y_axis, geom, viewport),
        }
    }
}

/// Translate/draw behaviour of one series kind.
pub trait SeriesBehavior {
    fn translate(&self, series: &mut Series, x_axis: &Axis, y_axis: &Axis, geom: &PlotGeometry) {
        translate_points(&mut series.points, x_axis, y_axis, geom);
    }

    /// Build per-point drawables; points failing the draw predicate release theirs.
    fn draw_points(&self, series: &mut Series, viewport: Viewport);

    /// Build the whole-series drawable, if the kind has one.
    fn draw_graph(&self, series: &mut Series) {
        series.graph = None;
    }
}

fn render_with<B: SeriesBehavior>(
    behavior: &B,
    series: &mut Series,
    x_axis: &Axis,
    y_axis: &Axis,
    geom: &PlotGeometry,
    viewport: Viewport,
) {
    behavior.translate(series, x_axis, y_axis, geom);
    behavior.draw_points(series, viewport);
    behavior.draw_graph(series);
}

/// Build the select overlay. Only points that got a base glyph are eligible, so a
/// selected point outside the viewport carries no overlay either.
fn draw_select_state(point: &mut Point, radius: f64) {
    point.state_graphic = if point.selected && point.graphic.is_some() {
        let marker = point.attrs.select_marker;
        Some(Graphic::path(select_marker_path(point, marker.stroke_width, radius)).attr(marker))
    } else {
        None
    };
}

/// Classic OHLC bars.
pub struct OhlcBehavior;

impl SeriesBehavior for OhlcBehavior {
    fn draw_points(&self, series: &mut Series, viewport: Viewport) {
        let radius = series.options.select.marker_radius;
        for point in &mut series.points {
            point.graphic = if is_drawable(point, viewport) {
                let attrs = *point.attrs.get(point.state());
                Some(Graphic::path(ohlc_path(point, attrs.stroke_width)).attr(attrs))
            } else {
                None
            };
            draw_select_state(point, radius);
        }
    }
}

/// Hollow rising / filled falling candles.
pub struct CandlestickBehavior;

impl SeriesBehavior for CandlestickBehavior {
    fn draw_points(&self, series: &mut Series, viewport: Viewport) {
        let radius = series.options.select.marker_radius;
        let n = series.points.len().max(1) as f64;
        let half_width = (viewport.width / n).max(3.0) * 0.7 * 0.5;
        for point in &mut series.points {
            point.graphic = if is_drawable(point, viewport) {
                let mut attrs = *point.attrs.get(point.state());
                if point.close < point.open {
                    attrs.fill = Some(attrs.stroke);
                }
                let path = candlestick_path(point, attrs.stroke_width, half_width);
                Some(Graphic::path(path).attr(attrs))
            } else {
                None
            };
            draw_select_state(point, radius);
        }
    }
}

/// One polyline through the closes.
pub struct LineBehavior;

impl SeriesBehavior for LineBehavior {
    fn draw_points(&self, series: &mut Series, _viewport: Viewport) {
        for point in &mut series.points {
            point.graphic = None;
            point.state_graphic = None;
        }
    }

    fn draw_graph(&self, series: &mut Series) {
        let attrs = series.options.state_attrs(None).normal;
        let segments = close_line_path(&series.points);
        series.graph = (!segments.is_empty()).then(|| Graphic::path(segments).attr(attrs));
    }
}
