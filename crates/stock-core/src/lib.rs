// File: crates/stock-core/src/lib.rs
// Summary: Core library entry point; exports the OHLC series, pane, annotation-binding and rendering API.

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod point;
pub mod translate;
pub mod glyph;
pub mod surface;
pub mod pane;
pub mod annotation;
pub mod bindings;
pub mod indicator;
pub mod config;
pub mod error;

pub use chart::{Chart, RenderOptions};
pub use series::{Series, SeriesKind, SeriesOptions};
pub use axis::{Axis, AxisId};
pub use view::ViewState;
pub use point::{Point, PointInput, RawValue};
pub use translate::PlotGeometry;
pub use pane::{Pane, PaneLayout};
pub use annotation::{Annotation, ControlPoint};
pub use bindings::{BindingAction, ClickOutcome, NavigationBindings, ToolBinding};
pub use indicator::{Indicator, IndicatorParams, IndicatorRequest};
pub use config::ChartConfig;
pub use error::{ChartError, Result};
