// File: crates/stock-core/src/chart.rs
// Summary: Chart aggregate (series, axes, panes, annotations, tool bindings) and headless Skia rendering.
// Notes:
// - Pointer coordinates are plot-relative pixels, the same space as `Point::plot_x/plot_y`
//   of main-pane series.
// - Rendering takes `&mut self`: every frame re-runs layout, translation and glyph building.

use std::collections::BTreeMap;

use anyhow::Context;
use skia_safe as skia;

use crate::annotation::{Annotation, ControlPoint};
use crate::axis::{Axis, AxisId};
use crate::bindings::{BindingAction, ClickOutcome, NavigationBindings};
use crate::error::{ChartError, Result};
use crate::geometry::RectI32;
use crate::glyph::{Graphic, PointAttr};
use crate::grid::{axis_ticks, ticks};
use crate::indicator::{self, IndicatorParams, IndicatorRequest};
use crate::pane::PaneLayout;
use crate::point::Point;
use crate::series::{Series, SeriesKind};
use crate::surface::{SkiaSurface, Surface};
use crate::translate::PlotGeometry;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::view::ViewState;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub annotation: skia::Color,
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            annotation: skia::Color::from_argb(255, 30, 120, 240),
            draw_labels: true,
        }
    }
}

pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    /// `y_axes[0]` is the main price axis and is never removed.
    pub y_axes: Vec<Axis>,
    pub panes: PaneLayout,
    pub annotations: Vec<Annotation>,
    pub navigation: NavigationBindings,
    /// Transposed chart: x runs top to bottom, y left to right.
    pub inverted: bool,
    plot: RectI32,
    next_axis_id: usize,
    indicator_seq: usize,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        let main = AxisId(1);
        let mut chart = Self {
            series: Vec::new(),
            x_axis: Axis::default_x().with_id(AxisId(0)),
            y_axes: vec![Axis::default_y().with_id(main)],
            panes: PaneLayout::new(main),
            annotations: Vec::new(),
            navigation: NavigationBindings::default(),
            inverted: false,
            plot: RectI32::default(),
            next_axis_id: 2,
            indicator_seq: 0,
        };
        chart.layout(&RenderOptions::default());
        chart
    }

    /// Transpose the chart and re-fit axis lengths to the swapped plot sides.
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
        self.fit_axes();
    }

    /// Add a series; it is bound to the main y-axis unless it names an existing one.
    pub fn add_series(&mut self, mut series: Series) {
        if self.y_axis(series.y_axis).is_none() {
            series.y_axis = self.main_y_axis().id;
        }
        series.x_axis = self.x_axis.id;
        self.series.push(series);
    }

    pub fn series_by_id(&self, id: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.id == id)
    }

    pub fn series_by_id_mut(&mut self, id: &str) -> Option<&mut Series> {
        self.series.iter_mut().find(|s| s.id == id)
    }

    pub fn main_y_axis(&self) -> &Axis {
        &self.y_axes[0]
    }

    pub fn main_y_axis_mut(&mut self) -> &mut Axis {
        &mut self.y_axes[0]
    }

    pub fn y_axis(&self, id: AxisId) -> Option<&Axis> {
        self.y_axes.iter().find(|a| a.id == id)
    }

    pub fn y_axis_mut(&mut self, id: AxisId) -> Option<&mut Axis> {
        self.y_axes.iter_mut().find(|a| a.id == id)
    }

    /// Fit the x-axis to all series and each y-axis to the series bound to it.
    pub fn autoscale_axes(&mut self, margin: f64) {
        if let Some(v) = ViewState::from_series(&self.series) {
            self.x_axis.set_extremes(v.x_min, v.x_max);
        }
        for axis in &mut self.y_axes {
            let bound = self.series.iter().filter(|s| s.y_axis == axis.id);
            if let Some(v) = ViewState::from_series(bound) {
                let v = v.with_y_margin(margin);
                axis.set_extremes(v.y_min, v.y_max);
            }
        }
    }

    /// Plot rectangle from the last layout, in canvas pixels.
    pub fn plot_rect(&self) -> RectI32 {
        self.plot
    }

    pub fn plot_geometry(&self) -> PlotGeometry {
        PlotGeometry::new(self.plot.width() as f64, self.plot.height() as f64, self.inverted)
    }

    /// Place the plot area inside the canvas insets.
    pub fn layout(&mut self, opts: &RenderOptions) {
        let ins = opts.insets;
        self.plot = RectI32::from_ltrb(
            ins.left as i32,
            ins.top as i32,
            (opts.width - ins.right as i32).max(ins.left as i32 + 1),
            (opts.height - ins.bottom as i32).max(ins.top as i32 + 1),
        );
        self.fit_axes();
    }

    /// Give every axis its pixel length and pane offset inside the current plot rectangle.
    fn fit_axes(&mut self) {
        let geom = self.plot_geometry();
        self.x_axis.len = geom.plot_size_x();
        self.x_axis.offset = 0.0;
        let size_y = geom.plot_size_y();
        for axis in &mut self.y_axes {
            let (offset, len) = self.panes.pixel_span(axis.id, size_y).unwrap_or((0.0, size_y));
            axis.offset = offset;
            axis.len = len;
        }
    }

    /// Translate every series and rebuild its drawables.
    pub fn redraw(&mut self) {
        let geom = self.plot_geometry();
        for series in &mut self.series {
            match self.y_axes.iter().find(|a| a.id == series.y_axis) {
                Some(y_axis) => series.redraw(&self.x_axis, y_axis, &geom),
                None => {
                    log::warn!("series {} has no y-axis {:?}; skipped", series.id, series.y_axis)
                }
            }
        }
    }

    /// Nearest point of the first series to a pointer at `client_x`.
    pub fn hover_point(&self, client_x: f64) -> Option<&Point> {
        let series = self.series.first()?;
        series.point_at_client_x(client_x).map(|i| &series.points[i])
    }

    /// Map a plot-relative pointer position into chart coordinates of the pane under it.
    pub fn to_control_point(&self, px: f64, py: f64) -> Option<ControlPoint> {
        if !self.plot.contains_local(px, py) {
            return None;
        }
        let geom = self.plot_geometry();
        let (along_x, along_y) = if self.inverted { (py, geom.plot_width - px) } else { (px, py) };
        let pane = self.panes.pane_at(along_y, geom.plot_size_y())?;
        let y_axis = self.y_axis(pane.axis)?;
        let x = self.x_axis.to_value(along_x - self.x_axis.offset, false, false);
        let y = y_axis.to_value(along_y - y_axis.offset, false, true);
        Some(ControlPoint::new(x, y, y_axis.id))
    }

    /// Select a toolbar binding by name. Action bindings run immediately.
    pub fn select_tool(&mut self, name: &str) -> Result<()> {
        match self.navigation.select(name)? {
            Some(BindingAction::ToggleAnnotations) => self.toggle_annotations(),
            Some(BindingAction::SeriesType(kind)) => self.set_main_series_kind(kind),
            None => {}
        }
        Ok(())
    }

    pub fn deselect_tool(&mut self) {
        self.navigation.deselect();
    }

    /// Pointer click at a plot-relative position.
    pub fn click(&mut self, px: f64, py: f64) -> ClickOutcome {
        let Some(cp) = self.to_control_point(px, py) else {
            return ClickOutcome::Ignored;
        };
        let outcome = self.navigation.on_click(cp);
        if let ClickOutcome::Committed(annotation) = &outcome {
            self.annotations.push(annotation.clone());
        }
        outcome
    }

    /// Pointer move at a plot-relative position.
    pub fn mouse_move(&mut self, px: f64, py: f64) {
        if let Some(cp) = self.to_control_point(px, py) {
            self.navigation.on_mousemove(cp);
        }
    }

    /// Flip the visibility of every annotation.
    pub fn toggle_annotations(&mut self) {
        for annotation in &mut self.annotations {
            annotation.visible = !annotation.visible;
        }
    }

    fn set_main_series_kind(&mut self, kind: SeriesKind) {
        match self.series.iter_mut().find(|s| s.linked_to.is_none()) {
            Some(series) => series.set_kind(kind),
            None => log::warn!("no price series to re-type to {}", kind.name()),
        }
    }

    /// Add or remove an indicator. Returns the new series id on add.
    pub fn manage_indicators(&mut self, request: &IndicatorRequest) -> Result<Option<String>> {
        match request {
            IndicatorRequest::Add { linked_to, kind, fields } => {
                self.add_indicator(linked_to, kind, fields).map(Some)
            }
            IndicatorRequest::Remove { remove, id } => {
                if *remove {
                    self.remove_indicator(id);
                } else {
                    log::warn!("indicator request for {id} has remove=false; ignored");
                }
                Ok(None)
            }
        }
    }

    fn add_indicator(
        &mut self,
        linked_to: &str,
        kind: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<String> {
        let indicator = indicator::lookup(kind)
            .ok_or_else(|| ChartError::UnknownIndicator(kind.to_string()))?;
        let params = IndicatorParams::from_fields(fields)?;
        let linked = self
            .series_by_id(linked_to)
            .ok_or_else(|| ChartError::UnknownSeries(linked_to.to_string()))?;
        let data = indicator.compute(linked, &params);
        let x_axis = linked.x_axis;

        self.indicator_seq += 1;
        let id = format!("{}-{}", indicator.id(), self.indicator_seq);
        let axis_id = AxisId(self.next_axis_id);
        self.next_axis_id += 1;

        let mut series = Series::new(id.clone(), SeriesKind::Line)
            .with_name(format!("{} ({})", indicator.id().to_uppercase(), params.period))
            .with_data(data);
        series.x_axis = x_axis;
        series.y_axis = axis_id;
        series.linked_to = Some(linked_to.to_string());

        let mut axis = Axis::new(indicator.id().to_uppercase(), 0.0, 1.0).with_id(axis_id);
        if let Some(v) = ViewState::from_series([&series]) {
            let v = v.with_y_margin(0.05);
            axis.set_extremes(v.y_min, v.y_max);
        }
        self.y_axes.push(axis);
        self.panes.add_pane(axis_id);
        self.series.push(series);
        self.fit_axes();
        log::debug!("indicator {id} linked to {linked_to} on axis {axis_id:?}");
        Ok(id)
    }

    fn remove_indicator(&mut self, id: &str) -> bool {
        let Some(index) = self.series.iter().position(|s| s.id == id) else {
            log::debug!("remove indicator {id}: no such series");
            return false;
        };
        let series = self.series.remove(index);
        let axis = series.y_axis;
        if axis != self.main_y_axis().id && !self.series.iter().any(|s| s.y_axis == axis) {
            self.y_axes.retain(|a| a.id != axis);
            self.panes.remove_pane(axis);
            self.fit_axes();
        }
        log::debug!("indicator {id} removed");
        true
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &mut self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> anyhow::Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path.as_ref(), bytes)
            .with_context(|| format!("writing {}", output_png_path.as_ref().display()))?;
        Ok(())
    }

    /// Render the chart and return encoded PNG bytes.
    pub fn render_to_png_bytes(&mut self, opts: &RenderOptions) -> anyhow::Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.paint(surface.canvas(), opts);
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render into an RGBA8 buffer. Returns `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(
        &mut self,
        opts: &RenderOptions,
    ) -> anyhow::Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.paint(surface.canvas(), opts);
        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("reading back surface pixels failed");
        }
        Ok((pixels, opts.width as u32, opts.height as u32, stride))
    }

    /// Lay out, translate, build glyphs and paint everything onto `canvas`.
    pub fn paint(&mut self, canvas: &skia::Canvas, opts: &RenderOptions) {
        self.layout(opts);
        self.redraw();

        canvas.clear(opts.background);
        self.draw_panes(canvas, opts);

        let plot = self.plot;
        canvas.save();
        canvas.clip_rect(
            skia::Rect::from_ltrb(
                plot.left as f32,
                plot.top as f32,
                plot.right as f32,
                plot.bottom as f32,
            ),
            None,
            Some(false),
        );

        for series in &self.series {
            let Some(y_axis) = self.y_axis(series.y_axis) else { continue };
            canvas.save();
            self.enter_plot_frame(canvas, self.x_axis.offset, y_axis.offset);
            let mut surface =
                SkiaSurface::new(canvas).with_anti_alias(series.kind == SeriesKind::Line);
            if let Some(graph) = &series.graph {
                surface.draw_graphic(graph);
            }
            for graphic in series.points.iter().filter_map(|p| p.graphic.as_ref()) {
                surface.draw_graphic(graphic);
            }
            // select state goes on top of every base glyph
            for graphic in series.points.iter().filter_map(|p| p.state_graphic.as_ref()) {
                surface.draw_graphic(graphic);
            }
            canvas.restore();
        }

        canvas.save();
        self.enter_plot_frame(canvas, 0.0, 0.0);
        self.draw_annotations(canvas, opts);
        canvas.restore();

        canvas.restore();
    }

    /// Switch the canvas into plot-local coordinates shifted by an axis offset.
    fn enter_plot_frame(&self, canvas: &skia::Canvas, dx: f64, dy: f64) {
        let plot = self.plot;
        if self.inverted {
            canvas.translate((plot.right as f32, plot.top as f32));
            canvas.rotate(90.0, None);
        } else {
            canvas.translate((plot.left as f32, plot.top as f32));
        }
        canvas.translate((dx as f32, dy as f32));
    }

    fn draw_annotations(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let geom = self.plot_geometry();
        let size = (geom.plot_size_x(), geom.plot_size_y());
        let attrs = PointAttr { stroke: opts.annotation, stroke_width: 1.5, fill: None };
        let mut surface = SkiaSurface::new(canvas).with_anti_alias(true);
        let to_pixel = |cp: &ControlPoint| -> (f64, f64) {
            let px = self.x_axis.translate(cp.x, false, false) + self.x_axis.offset;
            let py = match self.y_axis(cp.y_axis) {
                Some(axis) => axis.translate(cp.y, false, true) + axis.offset,
                None => f64::NAN,
            };
            (px, py)
        };
        for annotation in self.annotations.iter().filter(|a| a.visible) {
            let segments = annotation.path(to_pixel, size);
            if !segments.is_empty() {
                surface.draw_graphic(&Graphic::path(segments).attr(attrs));
            }
        }
    }

    fn draw_panes(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let plot = self.plot;
        let mut grid = skia::Paint::default();
        grid.set_color(opts.grid);
        grid.set_stroke_width(1.0);

        let mut axis_paint = skia::Paint::default();
        axis_paint.set_color(opts.axis_line);
        axis_paint.set_anti_alias(true);
        axis_paint.set_stroke_width(1.0);

        let mut text = skia::Paint::default();
        text.set_color(opts.axis_label);
        text.set_anti_alias(true);
        let mut font = skia::Font::default();
        font.set_size(12.0);

        let (l, r) = (plot.left as f32, plot.right as f32);
        for x in ticks(l as f64, r as f64, 10) {
            canvas.draw_line((x as f32, plot.top as f32), (x as f32, plot.bottom as f32), &grid);
        }

        if self.inverted {
            canvas.draw_line((l, plot.top as f32), (l, plot.bottom as f32), &axis_paint);
            return;
        }

        for axis in &self.y_axes {
            let top = (plot.top as f64 + axis.offset) as f32;
            let bottom = top + axis.len as f32;
            for y in ticks(top as f64, bottom as f64, 5) {
                canvas.draw_line((l, y as f32), (r, y as f32), &grid);
            }
            // pane separator and price axis line
            canvas.draw_line((l, bottom), (r, bottom), &axis_paint);
            canvas.draw_line((r, top), (r, bottom), &axis_paint);

            if opts.draw_labels {
                for v in axis_ticks(axis, 4) {
                    let y = top as f64 + axis.translate(v, false, true);
                    canvas.draw_str(axis.format_label(v), (r + 6.0, y as f32 + 4.0), &font, &text);
                }
                canvas.draw_str(&axis.label, (l + 4.0, top + 14.0), &font, &text);
            }
        }

        if opts.draw_labels {
            for v in axis_ticks(&self.x_axis, 6) {
                let x = l as f64 + self.x_axis.translate(v, false, false);
                canvas.draw_str(
                    self.x_axis.format_label(v),
                    (x as f32 - 16.0, plot.bottom as f32 + 18.0),
                    &font,
                    &text,
                );
            }
        }
    }
}
