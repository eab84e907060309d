// File: crates/stock-core/src/geometry.rs
// Summary: Integer pixel rectangles for plot and pane placement.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether a plot-relative point lies inside `[0, width] x [0, height]`.
    pub fn contains_local(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x <= self.width() as f64 && y <= self.height() as f64
    }
}
