// File: crates/stock-core/src/indicator.rs
// Summary: Indicator trait, built-in SMA/EMA/ATR implementations and the add/remove request format.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::point::PointInput;
use crate::series::Series;

/// OHLC field index used by `params.index`: 0 open, 1 high, 2 low, 3 close.
const CLOSE_INDEX: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorParams {
    pub period: usize,
    pub index: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self { period: 14, index: CLOSE_INDEX }
    }
}

impl IndicatorParams {
    /// Parse the string field map of an add request (`"params.period"`, `"params.index"`).
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Result<Self> {
        let mut params = Self::default();
        for (name, value) in fields {
            let parse = || {
                value.trim().parse::<usize>().map_err(|_| ChartError::InvalidParam {
                    name: name.clone(),
                    value: value.clone(),
                })
            };
            match name.as_str() {
                "params.period" => params.period = parse()?.max(1),
                "params.index" => params.index = parse()?.min(CLOSE_INDEX),
                other => log::debug!("ignoring indicator field {other}"),
            }
        }
        Ok(params)
    }
}

/// Indicator transforms an OHLC series into single-valued points `[x, v, v, v, v]`.
pub trait Indicator {
    fn id(&self) -> &'static str;
    fn compute(&self, input: &Series, params: &IndicatorParams) -> Vec<PointInput>;
}

/// Look up a built-in indicator by type name.
pub fn lookup(name: &str) -> Option<&'static dyn Indicator> {
    static SMA: SmaIndicator = SmaIndicator;
    static EMA: EmaIndicator = EmaIndicator;
    static ATR: AtrIndicator = AtrIndicator;
    match name.to_ascii_lowercase().as_str() {
        "sma" => Some(&SMA),
        "ema" => Some(&EMA),
        "atr" => Some(&ATR),
        _ => None,
    }
}

fn field(series: &Series, index: usize) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .map(|p| {
            let v = match index {
                0 => p.open,
                1 => p.high,
                2 => p.low,
                _ => p.close,
            };
            (p.x, v)
        })
        .collect()
}

fn to_points(values: Vec<(f64, f64)>) -> Vec<PointInput> {
    values.into_iter().map(|(x, v)| PointInput::xohlc(x, v, v, v, v)).collect()
}

/// Simple moving average over (x, y) pairs.
pub fn sma_xy(data: &[(f64, f64)], period: usize) -> Vec<(f64, f64)> {
    if period == 0 || data.len() < period {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(data.len() - period + 1);
    let mut sum = 0.0f64;
    for i in 0..data.len() {
        sum += data[i].1;
        if i + 1 > period {
            sum -= data[i - period].1;
        }
        if i + 1 >= period {
            out.push((data[i].0, sum / period as f64));
        }
    }
    out
}

/// Exponential moving average seeded with the SMA of the first `period` values.
pub fn ema_xy(data: &[(f64, f64)], period: usize) -> Vec<(f64, f64)> {
    if period == 0 || data.len() < period {
        return Vec::new();
    }
    let k = 2.0 / (period as f64 + 1.0);
    let seed = data[..period].iter().map(|d| d.1).sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(data.len() - period + 1);
    out.push((data[period - 1].0, seed));
    let mut prev = seed;
    for &(x, v) in &data[period..] {
        prev = v * k + prev * (1.0 - k);
        out.push((x, prev));
    }
    out
}

/// Wilder's average true range.
pub fn atr(series: &Series, period: usize) -> Vec<(f64, f64)> {
    let points = &series.points;
    if period == 0 || points.len() <= period {
        return Vec::new();
    }
    let true_range: Vec<(f64, f64)> = points
        .windows(2)
        .map(|w| {
            let (prev, cur) = (&w[0], &w[1]);
            let tr = (cur.high - cur.low)
                .max((cur.high - prev.close).abs())
                .max((cur.low - prev.close).abs());
            (cur.x, tr)
        })
        .collect();
    let mut out = Vec::with_capacity(true_range.len() - period + 1);
    let mut prev = true_range[..period].iter().map(|t| t.1).sum::<f64>() / period as f64;
    out.push((true_range[period - 1].0, prev));
    for &(x, tr) in &true_range[period..] {
        prev = (prev * (period as f64 - 1.0) + tr) / period as f64;
        out.push((x, prev));
    }
    out
}

pub struct SmaIndicator;

impl Indicator for SmaIndicator {
    fn id(&self) -> &'static str {
        "sma"
    }

    fn compute(&self, input: &Series, params: &IndicatorParams) -> Vec<PointInput> {
        to_points(sma_xy(&field(input, params.index), params.period))
    }
}

pub struct EmaIndicator;

impl Indicator for EmaIndicator {
    fn id(&self) -> &'static str {
        "ema"
    }

    fn compute(&self, input: &Series, params: &IndicatorParams) -> Vec<PointInput> {
        to_points(ema_xy(&field(input, params.index), params.period))
    }
}

pub struct AtrIndicator;

impl Indicator for AtrIndicator {
    fn id(&self) -> &'static str {
        "atr"
    }

    fn compute(&self, input: &Series, params: &IndicatorParams) -> Vec<PointInput> {
        to_points(atr(input, params.period))
    }
}

/// Add/remove request as issued by the indicator toolbar.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IndicatorRequest {
    Remove {
        remove: bool,
        id: String,
    },
    Add {
        #[serde(rename = "linkedTo")]
        linked_to: String,
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        fields: BTreeMap<String, String>,
    },
}

impl IndicatorRequest {
    pub fn add(linked_to: &str, kind: &str, fields: &[(&str, &str)]) -> Self {
        IndicatorRequest::Add {
            linked_to: linked_to.to_string(),
            kind: kind.to_string(),
            fields: fields.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    pub fn remove(id: &str) -> Self {
        IndicatorRequest::Remove { remove: true, id: id.to_string() }
    }
}
