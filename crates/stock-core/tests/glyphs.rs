// File: crates/stock-core/tests/glyphs.rs
// Purpose: Crisp OHLC paths, the draw predicate, and per-kind drawables built by series redraw.

use stock_core::glyph::{crisp_correction, is_drawable, ohlc_path, PathSegment, Viewport};
use stock_core::point::{AutoIncrement, PointOptions};
use stock_core::{Axis, PlotGeometry, Point, PointInput, Series, SeriesKind};

fn placed(plot_x: f64, open: f64, high: f64, low: f64, close: f64) -> Point {
    let mut p = Point::from_input(
        &PointInput::ohlc(1.0, 2.0, 0.5, 1.5),
        &mut AutoIncrement::default(),
    );
    p.plot_x = plot_x;
    p.plot_y = Some(high);
    p.plot_open = open;
    p.plot_high = high;
    p.plot_low = low;
    p.plot_close = close;
    p
}

fn axes() -> (Axis, Axis, PlotGeometry) {
    let mut x = Axis::new("X", 0.0, 4.0);
    x.len = 400.0;
    let mut y = Axis::new("Y", 0.0, 20.0);
    y.len = 200.0;
    (x, y, PlotGeometry::new(400.0, 200.0, false))
}

#[test]
fn crisp_offsets() {
    assert_eq!(crisp_correction(1.0), 0.5);
    assert_eq!(crisp_correction(2.0), 0.0);
    assert_eq!(crisp_correction(3.0), 0.5);
}

#[test]
fn ohlc_path_shape() {
    let p = placed(10.4, 20.2, 5.0, 40.0, 30.6);
    let path = ohlc_path(&p, 1.0);
    assert_eq!(
        path,
        vec![
            PathSegment::MoveTo(10.5, 40.0),
            PathSegment::LineTo(10.5, 5.0),
            PathSegment::MoveTo(10.5, 20.5),
            PathSegment::LineTo(5.5, 20.5),
            PathSegment::MoveTo(10.5, 31.5),
            PathSegment::LineTo(15.5, 31.5),
            PathSegment::Close,
        ]
    );

    let even = ohlc_path(&p, 2.0);
    assert_eq!(even[0], PathSegment::MoveTo(10.0, 40.0));
}

#[test]
fn draw_predicate() {
    let vp = Viewport::new(100.0, 50.0);
    assert!(is_drawable(&placed(10.0, 1.0, 2.0, 3.0, 4.0), vp));
    assert!(is_drawable(&placed(100.0, 1.0, 50.0, 3.0, 4.0), vp));
    assert!(!is_drawable(&placed(-1.0, 1.0, 2.0, 3.0, 4.0), vp));
    assert!(!is_drawable(&placed(10.0, 1.0, 51.0, 3.0, 4.0), vp));
    assert!(!is_drawable(&placed(f64::NAN, 1.0, 2.0, 3.0, 4.0), vp));

    let mut gap = placed(10.0, 1.0, 2.0, 3.0, 4.0);
    gap.plot_y = None;
    assert!(!is_drawable(&gap, vp));
}

#[test]
fn ohlc_series_draws_only_visible_points() {
    let (x, y, geom) = axes();
    let mut series = Series::new("s", SeriesKind::Ohlc).with_data(vec![
        PointInput::xohlc(1.0, 10.0, 12.0, 8.0, 11.0),
        PointInput::xohlc(9.0, 10.0, 12.0, 8.0, 11.0),
        PointInput::xohlc(2.0, 10.0, 30.0, 8.0, 11.0),
        PointInput::List(vec![
            3.0.into(),
            10.0.into(),
            stock_core::RawValue::Null,
            8.0.into(),
            11.0.into(),
        ]),
    ]);
    series.redraw(&x, &y, &geom);

    let drawn: Vec<bool> = series.points.iter().map(|p| p.graphic.is_some()).collect();
    assert_eq!(drawn, vec![true, false, false, false]);

    let g = series.points[0].graphic.as_ref().unwrap();
    assert_eq!(g.attrs.stroke, series.options.color);
    assert_eq!(g.attrs.stroke_width, 1.0);
}

#[test]
fn redraw_replaces_graphics() {
    let (x, mut y, geom) = axes();
    let mut series = Series::new("s", SeriesKind::Ohlc)
        .with_data(vec![PointInput::xohlc(1.0, 10.0, 12.0, 8.0, 11.0)]);
    series.redraw(&x, &y, &geom);
    assert!(series.points[0].graphic.is_some());

    y.set_extremes(15.0, 20.0);
    series.redraw(&x, &y, &geom);
    assert!(series.points[0].graphic.is_none());
}

#[test]
fn selected_points_get_an_overlay() {
    let (x, y, geom) = axes();
    let selected = PointInput::Object(PointOptions {
        x: Some(2.0.into()),
        open: Some(10.0.into()),
        high: Some(12.0.into()),
        low: Some(8.0.into()),
        close: Some(11.0.into()),
        selected: Some(true),
        ..PointOptions::default()
    });
    let mut series = Series::new("s", SeriesKind::Ohlc)
        .with_data(vec![PointInput::xohlc(1.0, 10.0, 12.0, 8.0, 11.0), selected]);
    series.redraw(&x, &y, &geom);

    assert!(series.points[0].state_graphic.is_none());
    let base = series.points[1].graphic.as_ref().unwrap();
    assert_eq!(base.attrs.stroke_width, series.options.select.line_width);
    let overlay = series.points[1].state_graphic.as_ref().unwrap();
    assert_eq!(overlay.attrs.fill, Some(series.options.select.fill));

    assert!(series.select_point(1, false));
    assert!(!series.select_point(7, true));
    series.redraw(&x, &y, &geom);
    assert!(series.points[1].state_graphic.is_none());
}

#[test]
fn selected_point_outside_viewport_has_no_overlay() {
    let (x, y, geom) = axes();
    let mut series = Series::new("s", SeriesKind::Ohlc).with_data(vec![
        PointInput::xohlc(1.0, 10.0, 12.0, 8.0, 11.0),
        PointInput::xohlc(10.0, 10.0, 12.0, 8.0, 11.0),
    ]);
    assert!(series.select_point(0, true));
    assert!(series.select_point(1, true));
    series.redraw(&x, &y, &geom);

    assert!(series.points[0].state_graphic.is_some());
    assert!(series.points[1].graphic.is_none());
    assert!(series.points[1].state_graphic.is_none());
}

#[test]
fn point_color_overrides_stroke() {
    let (x, y, geom) = axes();
    let input = PointInput::Object(PointOptions {
        x: Some(1.0.into()),
        open: Some(10.0.into()),
        high: Some(12.0.into()),
        low: Some(8.0.into()),
        close: Some(11.0.into()),
        color: Some("#00ff00".into()),
        ..PointOptions::default()
    });
    let mut series = Series::new("s", SeriesKind::Ohlc).with_data(vec![input]);
    series.redraw(&x, &y, &geom);
    let g = series.points[0].graphic.as_ref().unwrap();
    assert_eq!(g.attrs.stroke, skia_safe::Color::from_rgb(0, 255, 0));
}

#[test]
fn falling_candles_are_filled() {
    let (x, y, geom) = axes();
    let mut series = Series::new("s", SeriesKind::Candlestick).with_data(vec![
        PointInput::xohlc(1.0, 10.0, 12.0, 8.0, 11.0),
        PointInput::xohlc(2.0, 11.0, 12.0, 8.0, 9.0),
    ]);
    series.redraw(&x, &y, &geom);
    assert_eq!(series.points[0].graphic.as_ref().unwrap().attrs.fill, None);
    assert!(series.points[1].graphic.as_ref().unwrap().attrs.fill.is_some());
}

#[test]
fn line_kind_draws_one_graph() {
    let (x, y, geom) = axes();
    let mut series = Series::new("s", SeriesKind::Line).with_data(vec![
        PointInput::xohlc(0.0, 1.0, 1.0, 1.0, 1.0),
        PointInput::xohlc(1.0, 2.0, 2.0, 2.0, 2.0),
        PointInput::xohlc(2.0, 3.0, 3.0, 3.0, 3.0),
    ]);
    series.redraw(&x, &y, &geom);
    assert!(series.points.iter().all(|p| p.graphic.is_none()));
    let graph = series.graph.as_ref().unwrap();
    assert_eq!(graph.segments.len(), 3);
    assert_eq!(graph.segments[0], PathSegment::MoveTo(0.0, 190.0));
}

#[test]
fn set_kind_rebuilds_and_keeps_color() {
    let (x, y, geom) = axes();
    let mut opts = SeriesKind::Ohlc.default_options();
    opts.color = skia_safe::Color::from_rgb(200, 10, 10);
    let mut series = Series::new("s", SeriesKind::Ohlc)
        .with_options(opts)
        .with_data(vec![PointInput::xohlc(1.0, 10.0, 12.0, 8.0, 11.0)]);
    series.redraw(&x, &y, &geom);

    series.set_kind(SeriesKind::Line);
    assert_eq!(series.kind, SeriesKind::Line);
    assert!(series.points[0].graphic.is_none());
    assert_eq!(series.options.color, opts.color);
    assert_eq!(series.options.line_width, 2.0);
    assert_eq!(series.points[0].x, 1.0);
}

#[test]
fn hover_finds_the_nearest_client_x() {
    let (x, y, geom) = axes();
    let mut series = Series::new("s", SeriesKind::Ohlc).with_data(vec![
        PointInput::ohlc(10.0, 12.0, 8.0, 11.0),
        PointInput::ohlc(10.0, 12.0, 8.0, 11.0),
        PointInput::ohlc(10.0, 12.0, 8.0, 11.0),
    ]);
    assert_eq!(series.point_at_client_x(50.0), None);
    series.redraw(&x, &y, &geom);
    assert_eq!(series.point_at_client_x(140.0), Some(1));
    assert_eq!(series.point_at_client_x(-20.0), Some(0));
}
