// File: crates/stock-core/src/pane.rs
// Summary: Vertical height distribution across stacked y-axis panes.
// Notes:
// - Heights are percentages of the plot height and always sum to 100.
// - Up to FIXED_STEP_LIMIT extra panes each take PANE_STEP percent from the main pane;
//   beyond that every pane gets an equal share.

use crate::axis::AxisId;

/// Percent given to each extra pane while the fixed-step rule applies.
pub const PANE_STEP: f64 = 20.0;
/// Largest extra-pane count that still uses the fixed-step rule.
pub const FIXED_STEP_LIMIT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pane {
    pub axis: AxisId,
    /// Percent of plot height.
    pub height: f64,
    /// Percent of plot height above this pane.
    pub top: f64,
}

/// Ordered panes; the first one is the main price pane and is never removed.
#[derive(Clone, Debug, PartialEq)]
pub struct PaneLayout {
    panes: Vec<Pane>,
}

impl PaneLayout {
    pub fn new(main_axis: AxisId) -> Self {
        Self { panes: vec![Pane { axis: main_axis, height: 100.0, top: 0.0 }] }
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn main(&self) -> &Pane {
        &self.panes[0]
    }

    pub fn get(&self, axis: AxisId) -> Option<&Pane> {
        self.panes.iter().find(|p| p.axis == axis)
    }

    pub fn contains(&self, axis: AxisId) -> bool {
        self.get(axis).is_some()
    }

    /// Number of panes besides the main one.
    pub fn extra_count(&self) -> usize {
        self.panes.len() - 1
    }

    /// Append a pane for `axis` and re-flow all heights.
    pub fn add_pane(&mut self, axis: AxisId) {
        if self.contains(axis) {
            return;
        }
        self.panes.push(Pane { axis, height: 0.0, top: 0.0 });
        self.reflow();
        log::debug!(
            "pane added for axis {:?}: main {:.4}%, {} panes",
            axis,
            self.main().height,
            self.panes.len()
        );
    }

    /// Remove the pane for `axis` and re-flow. Unknown axes and the main pane are left alone.
    pub fn remove_pane(&mut self, axis: AxisId) -> bool {
        match self.panes.iter().skip(1).position(|p| p.axis == axis) {
            Some(i) => {
                self.panes.remove(i + 1);
                self.reflow();
                log::debug!(
                    "pane removed for axis {:?}: main {:.4}%, {} panes",
                    axis,
                    self.main().height,
                    self.panes.len()
                );
                true
            }
            None => false,
        }
    }

    fn reflow(&mut self) {
        let extra = self.extra_count();
        let (main, other) = pane_heights(extra);
        let mut top = 0.0;
        for (i, pane) in self.panes.iter_mut().enumerate() {
            pane.height = if i == 0 { main } else { other };
            pane.top = top;
            top += pane.height;
        }
    }

    /// Pixel `(offset, length)` of the pane for `axis` inside a plot of `plot_height` pixels.
    pub fn pixel_span(&self, axis: AxisId, plot_height: f64) -> Option<(f64, f64)> {
        self.get(axis)
            .map(|p| (p.top / 100.0 * plot_height, p.height / 100.0 * plot_height))
    }

    /// Pane whose vertical span contains `y` (pixels from the plot top).
    pub fn pane_at(&self, y: f64, plot_height: f64) -> Option<&Pane> {
        self.panes.iter().find(|p| {
            let top = p.top / 100.0 * plot_height;
            let bottom = top + p.height / 100.0 * plot_height;
            y >= top && y <= bottom
        })
    }
}

/// `(main, each extra)` pane heights in percent for `extra` extra panes.
pub fn pane_heights(extra: usize) -> (f64, f64) {
    if extra <= FIXED_STEP_LIMIT {
        (100.0 - PANE_STEP * extra as f64, PANE_STEP)
    } else {
        let share = 100.0 / (extra + 1) as f64;
        (share, share)
    }
}
