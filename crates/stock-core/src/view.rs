// File: crates/stock-core/src/view.rs
// Data extents used to autoscale axes from OHLC points.

use crate::series::Series;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Extents over x and low..high of every finite point. `None` when nothing is finite.
    pub fn from_series<'a>(series: impl IntoIterator<Item = &'a Series>) -> Option<Self> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in series {
            for p in &s.points {
                if !p.x.is_finite() {
                    continue;
                }
                x_min = x_min.min(p.x);
                x_max = x_max.max(p.x);
                for v in [p.low, p.high, p.open, p.close] {
                    if v.is_finite() {
                        y_min = y_min.min(v);
                        y_max = y_max.max(v);
                    }
                }
            }
        }
        if !x_min.is_finite() || !y_min.is_finite() {
            return None;
        }
        if (x_max - x_min).abs() < 1e-9 {
            x_max = x_min + 1.0;
        }
        if (y_max - y_min).abs() < 1e-9 {
            y_max = y_min + 1.0;
        }
        Some(Self { x_min, x_max, y_min, y_max })
    }

    /// Pad the y range by `frac` of its span on both sides.
    pub fn with_y_margin(self, frac: f64) -> Self {
        let m = (self.y_max - self.y_min) * frac;
        Self { y_min: self.y_min - m, y_max: self.y_max + m, ..self }
    }
}
