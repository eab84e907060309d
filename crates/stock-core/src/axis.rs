// File: crates/stock-core/src/axis.rs
// Summary: Axis model with extremes, pixel placement, categories and value<->pixel translation.

use chrono::DateTime;

use crate::scale::{trans_a, ScaleKind};

/// Stable handle of an axis; survives insertion/removal of other axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
struct Extremes {
    min: f64,
    max: f64,
    len: f64,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub id: AxisId,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
    pub reversed: bool,
    /// Ordered labels looked up by integer x.
    pub categories: Option<Vec<String>>,
    /// Values are epoch seconds; labels are formatted as dates.
    pub datetime: bool,
    /// Pixel length along the axis direction; set by chart layout.
    pub len: f64,
    /// Pixel offset of the axis start inside the plot area (pane top for y axes).
    pub offset: f64,
    old: Option<Extremes>,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            id: AxisId(0),
            label: label.into(),
            min,
            max,
            kind: ScaleKind::Linear,
            reversed: false,
            categories: None,
            datetime: false,
            len: 1.0,
            offset: 0.0,
            old: None,
        }
    }

    pub fn default_x() -> Self {
        Self::new("Time", 0.0, 10.0)
    }

    pub fn default_y() -> Self {
        Self::new("Price", 0.0, 100.0)
    }

    pub fn with_id(mut self, id: AxisId) -> Self {
        self.id = id;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Set new extremes, remembering the current ones for `old` translations.
    pub fn set_extremes(&mut self, min: f64, max: f64) {
        self.old = Some(self.current());
        self.min = min;
        self.max = max;
    }

    fn current(&self) -> Extremes {
        Extremes { min: self.min, max: self.max, len: self.len }
    }

    /// Sign and canvas offset of the pixel mapping.
    fn orientation(&self, len: f64, is_y: bool) -> (f64, f64) {
        let mut sign = 1.0;
        let mut cvs_offset = 0.0;
        if is_y {
            sign = -1.0;
            cvs_offset = len;
        }
        if self.reversed {
            sign = -sign;
            cvs_offset -= sign * len;
        }
        (sign, cvs_offset)
    }

    /// Domain value to pixel position along the axis.
    ///
    /// `old` uses the extremes from before the last `set_extremes`; `is_y` measures from the
    /// bottom edge like a canvas y coordinate. Non-finite input yields non-finite output.
    pub fn translate(&self, value: f64, old: bool, is_y: bool) -> f64 {
        let ext = if old { self.old.unwrap_or_else(|| self.current()) } else { self.current() };
        let lo = self.kind.forward(ext.min);
        let hi = self.kind.forward(ext.max);
        let a = trans_a(lo, hi, ext.len);
        let (sign, cvs_offset) = self.orientation(ext.len, is_y);
        sign * (self.kind.forward(value) - lo) * a + cvs_offset
    }

    /// Inverse of [`Axis::translate`].
    pub fn to_value(&self, pixel: f64, old: bool, is_y: bool) -> f64 {
        let ext = if old { self.old.unwrap_or_else(|| self.current()) } else { self.current() };
        let lo = self.kind.forward(ext.min);
        let hi = self.kind.forward(ext.max);
        let a = trans_a(lo, hi, ext.len);
        let (sign, cvs_offset) = self.orientation(ext.len, is_y);
        self.kind.inverse((pixel - cvs_offset) / (sign * a) + lo)
    }

    /// Category label at integer index `x`, if the axis has one there.
    pub fn category_at(&self, x: f64) -> Option<&str> {
        let cats = self.categories.as_ref()?;
        if x < 0.0 || x.fract() != 0.0 {
            return None;
        }
        cats.get(x as usize).map(String::as_str)
    }

    /// Tick label text for `value`.
    pub fn format_label(&self, value: f64) -> String {
        if let Some(label) = self.category_at(value.round()) {
            return label.to_string();
        }
        if self.datetime {
            if let Some(dt) = DateTime::from_timestamp(value as i64, 0) {
                return dt.format("%Y-%m-%d").to_string();
            }
        }
        let span = (self.max - self.min).abs();
        if span >= 100.0 {
            format!("{value:.0}")
        } else if span >= 1.0 {
            format!("{value:.2}")
        } else {
            format!("{value:.4}")
        }
    }
}
