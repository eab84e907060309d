// File: crates/stock-core/src/translate.rs
// Summary: Domain-to-pixel translation of OHLC points through the series' axes.

use crate::axis::Axis;
use crate::point::{Category, Point};

/// Plot-area geometry the translator and draw predicate need.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotGeometry {
    pub plot_width: f64,
    pub plot_height: f64,
    /// Axes are transposed: x runs vertically.
    pub inverted: bool,
}

impl PlotGeometry {
    pub fn new(plot_width: f64, plot_height: f64, inverted: bool) -> Self {
        Self { plot_width, plot_height, inverted }
    }

    /// Extent along the x-axis direction.
    pub fn plot_size_x(&self) -> f64 {
        if self.inverted {
            self.plot_height
        } else {
            self.plot_width
        }
    }

    /// Extent along the y-axis direction.
    pub fn plot_size_y(&self) -> f64 {
        if self.inverted {
            self.plot_width
        } else {
            self.plot_height
        }
    }
}

/// Translate one point in place.
pub fn translate_point(point: &mut Point, x_axis: &Axis, y_axis: &Axis, geom: &PlotGeometry) {
    point.plot_x = x_axis.translate(point.x, false, false);
    point.plot_y = point.y.map(|y| y_axis.translate(y, false, true));

    point.plot_open = y_axis.translate(point.open, false, true);
    point.plot_high = y_axis.translate(point.high, false, true);
    point.plot_low = y_axis.translate(point.low, false, true);
    point.plot_close = y_axis.translate(point.close, false, true);

    // pointer coordinates swap roles when the chart is transposed
    point.client_x = if geom.inverted { geom.plot_height - point.plot_x } else { point.plot_x };

    point.category = match x_axis.category_at(point.x) {
        Some(label) => Category::Label(label.to_string()),
        None => Category::Value(point.x),
    };
}

/// Translate every point of a series.
pub fn translate_points(points: &mut [Point], x_axis: &Axis, y_axis: &Axis, geom: &PlotGeometry) {
    for point in points.iter_mut() {
        translate_point(point, x_axis, y_axis, geom);
    }
}
