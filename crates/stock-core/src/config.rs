// File: crates/stock-core/src/config.rs
// Summary: JSON chart configuration (x-axis, series data, tool bindings) and color parsing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use skia_safe as skia;

use crate::bindings::ToolBinding;
use crate::error::{ChartError, Result};
use crate::point::PointInput;
use crate::series::{Series, SeriesKind, SeriesOptions};
use crate::Chart;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    pub title: Option<String>,
    pub categories: Option<Vec<String>>,
    pub datetime: bool,
    pub reversed: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: SeriesKind,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub line_width: Option<f32>,
    #[serde(default)]
    pub point_start: Option<f64>,
    #[serde(default)]
    pub point_interval: Option<f64>,
    #[serde(default)]
    pub data: Vec<PointInput>,
    /// Indices of points that start out selected.
    #[serde(default)]
    pub selected: Vec<usize>,
}

impl SeriesConfig {
    fn options(&self) -> Result<SeriesOptions> {
        let mut opts = self.kind.default_options();
        if let Some(color) = &self.color {
            opts.color = parse_color(color)?;
        }
        if let Some(w) = self.line_width {
            opts.line_width = w;
        }
        if let Some(start) = self.point_start {
            opts.point_start = start;
        }
        if let Some(interval) = self.point_interval {
            opts.point_interval = interval;
        }
        Ok(opts)
    }
}

/// Top-level chart document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub x_axis: AxisConfig,
    pub inverted: bool,
    pub series: Vec<SeriesConfig>,
    /// Extra or overriding tool bindings, merged over the built-in stock tools.
    pub bindings: BTreeMap<String, ToolBinding>,
}

impl ChartConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build a chart with autoscaled axes.
    pub fn build(&self) -> Result<Chart> {
        let mut chart = Chart::new();
        chart.set_inverted(self.inverted);
        if let Some(title) = &self.x_axis.title {
            chart.x_axis.label = title.clone();
        }
        chart.x_axis.categories = self.x_axis.categories.clone();
        chart.x_axis.datetime = self.x_axis.datetime;
        chart.x_axis.reversed = self.x_axis.reversed;

        for sc in &self.series {
            let mut series = Series::new(sc.id.clone(), sc.kind)
                .with_name(sc.name.clone().unwrap_or_else(|| sc.id.clone()))
                .with_options(sc.options()?)
                .with_data(sc.data.clone());
            for &index in &sc.selected {
                if !series.select_point(index, true) {
                    log::warn!("series {}: selected index {index} out of range", sc.id);
                }
            }
            chart.add_series(series);
        }
        for (name, binding) in &self.bindings {
            chart.navigation.insert(name.clone(), binding.clone());
        }
        chart.autoscale_axes(0.02);
        Ok(chart)
    }
}

/// Parse `#rrggbb` or `#aarrggbb`.
pub fn parse_color(s: &str) -> Result<skia::Color> {
    let invalid = || ChartError::InvalidColor(s.to_string());
    let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
    let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    match hex.len() {
        6 => Ok(skia::Color::new(0xff00_0000 | value)),
        8 => Ok(skia::Color::new(value)),
        _ => Err(invalid()),
    }
}
