// File: crates/stock-core/src/scale.rs
// Summary: Linear and log10 value transforms shared by axis translation.

const LOG_EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log10,
}

impl ScaleKind {
    /// Map a domain value into the linear space the axis interpolates in.
    #[inline]
    pub fn forward(self, v: f64) -> f64 {
        match self {
            ScaleKind::Linear => v,
            // f64::max would swallow NaN, which must keep propagating
            ScaleKind::Log10 if v.is_nan() => v,
            ScaleKind::Log10 => v.max(LOG_EPS).log10(),
        }
    }

    #[inline]
    pub fn inverse(self, v: f64) -> f64 {
        match self {
            ScaleKind::Linear => v,
            ScaleKind::Log10 => 10f64.powf(v),
        }
    }
}

/// Slope in pixels per (transformed) unit; degenerate spans are widened to avoid division by zero.
#[inline]
pub fn trans_a(lo: f64, hi: f64, len: f64) -> f64 {
    len / (hi - lo).abs().max(LOG_EPS)
}
