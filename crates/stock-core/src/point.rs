// File: crates/stock-core/src/point.rs
// Summary: OHLC point model; decodes object / 4-list / 5-list input into one canonical record.
// Notes:
// - Ingestion is permissive. Wrong list lengths and non-numeric prices become NaN and
//   are dropped later by the glyph renderer's draw predicate.

use serde::{Deserialize, Deserializer, Serialize};

use crate::glyph::{Graphic, StateAttrs};

/// One raw element of a list-form point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Null,
    Other(serde_json::Value),
}

impl RawValue {
    /// Numeric view of the value. Numeric strings coerce, everything else is NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            RawValue::Number(v) => *v,
            RawValue::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            RawValue::Null | RawValue::Other(_) => f64::NAN,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// Object-form point input,
/// e.g. `{ "x": 3, "open": 7.88, "high": 7.99, "low": 7.02, "close": 7.65 }`.
/// Kept on the point as `options` after ingestion.
///
/// Value fields distinguish an absent key (`None`) from an explicit `null`
/// (`Some(RawValue::Null)`), so an update only touches the keys it carries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointOptions {
    #[serde(deserialize_with = "present")]
    pub x: Option<RawValue>,
    #[serde(deserialize_with = "present")]
    pub open: Option<RawValue>,
    #[serde(deserialize_with = "present")]
    pub high: Option<RawValue>,
    #[serde(deserialize_with = "present")]
    pub low: Option<RawValue>,
    #[serde(deserialize_with = "present")]
    pub close: Option<RawValue>,
    pub name: Option<String>,
    pub selected: Option<bool>,
    /// Per-point stroke override, `#rrggbb`.
    pub color: Option<String>,
}

// A key that is present, `null` included, becomes `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<RawValue>, D::Error>
where
    D: Deserializer<'de>,
{
    RawValue::deserialize(deserializer).map(Some)
}

/// Raw point input as it arrives from configuration or user code.
///
/// Anything that is neither a list nor an object lands in `Other` and becomes an
/// all-NaN point, so one bad element never rejects the whole data array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointInput {
    List(Vec<RawValue>),
    Object(PointOptions),
    Other(serde_json::Value),
}

impl PointInput {
    /// `[open, high, low, close]`
    pub fn ohlc(open: f64, high: f64, low: f64, close: f64) -> Self {
        PointInput::List(vec![open.into(), high.into(), low.into(), close.into()])
    }

    /// `[x, open, high, low, close]`
    pub fn xohlc(x: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        PointInput::List(vec![x.into(), open.into(), high.into(), low.into(), close.into()])
    }

    /// `[name, open, high, low, close]`
    pub fn named(name: &str, open: f64, high: f64, low: f64, close: f64) -> Self {
        PointInput::List(vec![name.into(), open.into(), high.into(), low.into(), close.into()])
    }
}

/// Default x-ordinates for points that do not carry one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoIncrement {
    next: f64,
    interval: f64,
}

impl AutoIncrement {
    pub fn new(start: f64, interval: f64) -> Self {
        Self { next: start, interval }
    }

    /// Return the current value and advance by one interval.
    pub fn next_value(&mut self) -> f64 {
        let v = self.next;
        self.next += self.interval;
        v
    }
}

impl Default for AutoIncrement {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Resolved x-axis category of a point.
#[derive(Clone, Debug, PartialEq)]
pub enum Category {
    Label(String),
    Value(f64),
}

/// One OHLC data point plus the pixel geometry derived from it.
#[derive(Clone, Debug)]
pub struct Point {
    pub x: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Mirrors `high`; `None` marks a gap.
    pub y: Option<f64>,
    pub name: Option<String>,
    pub selected: bool,
    /// Object-form input, retained for later updates.
    pub options: Option<PointOptions>,

    pub plot_x: f64,
    pub plot_y: Option<f64>,
    pub plot_open: f64,
    pub plot_high: f64,
    pub plot_low: f64,
    pub plot_close: f64,
    pub client_x: f64,
    pub category: Category,

    /// Attribute table keyed by state, filled by the owning series.
    pub attrs: StateAttrs,
    /// Base glyph; replaced on every redraw.
    pub graphic: Option<Graphic>,
    /// Selection overlay drawn on top of `graphic`.
    pub state_graphic: Option<Graphic>,
}

impl Point {
    fn blank() -> Self {
        Self {
            x: f64::NAN,
            open: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            close: f64::NAN,
            y: None,
            name: None,
            selected: false,
            options: None,
            plot_x: f64::NAN,
            plot_y: None,
            plot_open: f64::NAN,
            plot_high: f64::NAN,
            plot_low: f64::NAN,
            plot_close: f64::NAN,
            client_x: f64::NAN,
            category: Category::Value(f64::NAN),
            attrs: StateAttrs::default(),
            graphic: None,
            state_graphic: None,
        }
    }

    /// Build a point from raw input, drawing `x` from `counter` when the input has none.
    pub fn from_input(input: &PointInput, counter: &mut AutoIncrement) -> Self {
        let mut point = Self::blank();
        let x = point.apply_options(input);
        point.x = x.unwrap_or_else(|| counter.next_value());
        point.category = Category::Value(point.x);
        point
    }

    /// Re-apply input to an existing point. The current `x` is kept unless the input sets one.
    pub fn update(&mut self, input: &PointInput) {
        if let Some(x) = self.apply_options(input) {
            self.x = x;
        }
    }

    /// Copy fields from `input`; returns the explicit x if one was given.
    fn apply_options(&mut self, input: &PointInput) -> Option<f64> {
        let mut x = None;
        match input {
            PointInput::Object(opts) => {
                let num = |v: &Option<RawValue>| v.as_ref().map(RawValue::as_number);
                if let Some(v) = num(&opts.open) {
                    self.open = v;
                }
                if let Some(v) = num(&opts.low) {
                    self.low = v;
                }
                if let Some(v) = num(&opts.close) {
                    self.close = v;
                }
                match &opts.high {
                    Some(raw) => {
                        self.high = raw.as_number();
                        self.y = (!raw.is_null()).then_some(self.high);
                    }
                    None => self.y = (!self.high.is_nan()).then_some(self.high),
                }
                if opts.name.is_some() {
                    self.name = opts.name.clone();
                }
                if let Some(selected) = opts.selected {
                    self.selected = selected;
                }
                // a non-numeric x is treated as missing
                x = num(&opts.x).filter(|v| !v.is_nan());
                self.options = Some(opts.clone());
            }
            PointInput::Other(value) => {
                log::debug!("unrecognised point input {value}; treated as a gap");
                self.open = f64::NAN;
                self.high = f64::NAN;
                self.low = f64::NAN;
                self.close = f64::NAN;
                self.y = None;
            }
            PointInput::List(values) => {
                let mut i = 0;
                if values.len() == 5 {
                    match &values[0] {
                        RawValue::Text(name) => self.name = Some(name.clone()),
                        RawValue::Number(v) => x = Some(*v),
                        _ => {}
                    }
                    i += 1;
                }
                let at = |k: usize| values.get(k).map_or(f64::NAN, RawValue::as_number);
                self.open = at(i);
                self.high = at(i + 1);
                self.low = at(i + 2);
                self.close = at(i + 3);
                self.y = match values.get(i + 1) {
                    Some(raw) if !raw.is_null() => Some(self.high),
                    _ => None,
                };
            }
        }
        x
    }

    /// The state key used to look up drawing attributes.
    pub fn state(&self) -> crate::glyph::PointState {
        if self.selected {
            crate::glyph::PointState::Selected
        } else {
            crate::glyph::PointState::Normal
        }
    }
}
