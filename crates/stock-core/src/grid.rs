// File: crates/stock-core/src/grid.rs
// Summary: Tick positions for pane grid lines and axis labels.

use crate::axis::Axis;

/// `count` evenly spaced values from `start` to `end`, both ends included.
/// A single tick sits at `start`; zero ticks is an empty list.
pub fn ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Label values across an axis' current extremes, low to high.
pub fn axis_ticks(axis: &Axis, count: usize) -> Vec<f64> {
    if !axis.min.is_finite() || !axis.max.is_finite() {
        return Vec::new();
    }
    ticks(axis.min.min(axis.max), axis.min.max(axis.max), count)
}
