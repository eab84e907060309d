// File: crates/stock-core/tests/translate.rs
// Purpose: Axis value<->pixel mapping and point translation (plain, inverted, categories).

use stock_core::grid::{axis_ticks, ticks};
use stock_core::point::{AutoIncrement, Category};
use stock_core::scale::ScaleKind;
use stock_core::translate::translate_point;
use stock_core::{Axis, PlotGeometry, Point, PointInput};

fn axis(min: f64, max: f64, len: f64) -> Axis {
    let mut a = Axis::new("A", min, max);
    a.len = len;
    a
}

fn point(x: f64, o: f64, h: f64, l: f64, c: f64) -> Point {
    Point::from_input(&PointInput::xohlc(x, o, h, l, c), &mut AutoIncrement::default())
}

#[test]
fn x_and_y_directions() {
    let a = axis(0.0, 10.0, 100.0);
    assert_eq!(a.translate(5.0, false, false), 50.0);
    assert_eq!(a.translate(0.0, false, true), 100.0);
    assert_eq!(a.translate(10.0, false, true), 0.0);
}

#[test]
fn reversed_axis_flips() {
    let mut a = axis(0.0, 10.0, 100.0);
    a.reversed = true;
    assert_eq!(a.translate(0.0, false, false), 100.0);
    assert_eq!(a.translate(10.0, false, false), 0.0);
    assert_eq!(a.translate(0.0, false, true), 0.0);
}

#[test]
fn to_value_inverts_translate() {
    let mut a = axis(-3.0, 17.0, 321.0);
    for is_y in [false, true] {
        for v in [-3.0, 0.0, 4.25, 17.0] {
            let back = a.to_value(a.translate(v, false, is_y), false, is_y);
            assert!((back - v).abs() < 1e-9, "{v} -> {back}");
        }
    }
    a.kind = ScaleKind::Log10;
    a.set_extremes(1.0, 1000.0);
    let back = a.to_value(a.translate(10.0, false, true), false, true);
    assert!((back - 10.0).abs() < 1e-9);
}

#[test]
fn old_extremes_are_kept_for_one_change() {
    let mut a = axis(0.0, 10.0, 100.0);
    a.set_extremes(0.0, 20.0);
    assert_eq!(a.translate(10.0, true, false), 100.0);
    assert_eq!(a.translate(10.0, false, false), 50.0);
}

#[test]
fn nan_stays_nan() {
    let a = axis(0.0, 10.0, 100.0);
    assert!(a.translate(f64::NAN, false, true).is_nan());
}

#[test]
fn translate_point_fills_pixel_fields() {
    let x = axis(0.0, 10.0, 200.0);
    let y = axis(0.0, 100.0, 100.0);
    let geom = PlotGeometry::new(200.0, 100.0, false);
    let mut p = point(2.0, 40.0, 60.0, 20.0, 50.0);
    translate_point(&mut p, &x, &y, &geom);

    assert_eq!(p.plot_x, 40.0);
    assert_eq!(p.plot_y, Some(40.0));
    assert_eq!(p.plot_open, 60.0);
    assert_eq!(p.plot_high, 40.0);
    assert_eq!(p.plot_low, 80.0);
    assert_eq!(p.plot_close, 50.0);
    assert_eq!(p.client_x, p.plot_x);
    assert_eq!(p.category, Category::Value(2.0));
}

#[test]
fn inverted_client_x_runs_from_the_bottom() {
    let geom = PlotGeometry::new(200.0, 100.0, true);
    assert_eq!(geom.plot_size_x(), 100.0);
    assert_eq!(geom.plot_size_y(), 200.0);

    let x = axis(0.0, 10.0, geom.plot_size_x());
    let y = axis(0.0, 100.0, geom.plot_size_y());
    let mut p = point(2.0, 40.0, 60.0, 20.0, 50.0);
    translate_point(&mut p, &x, &y, &geom);
    assert_eq!(p.plot_x, 20.0);
    assert_eq!(p.client_x, 80.0);
}

#[test]
fn categories_resolve_by_index() {
    let x = axis(0.0, 4.0, 100.0).with_categories(vec!["Mon".into(), "Tue".into()]);
    let y = axis(0.0, 10.0, 100.0);
    let geom = PlotGeometry::new(100.0, 100.0, false);

    let mut p = point(1.0, 1.0, 2.0, 0.5, 1.5);
    translate_point(&mut p, &x, &y, &geom);
    assert_eq!(p.category, Category::Label("Tue".into()));

    let mut q = point(3.0, 1.0, 2.0, 0.5, 1.5);
    translate_point(&mut q, &x, &y, &geom);
    assert_eq!(q.category, Category::Value(3.0));
}

#[test]
fn labels_use_categories_dates_and_precision() {
    let cats = Axis::new("X", 0.0, 2.0).with_categories(vec!["Jan".into()]);
    assert_eq!(cats.format_label(0.0), "Jan");

    let mut dates = Axis::new("T", 0.0, 86_400.0 * 30.0);
    dates.datetime = true;
    assert_eq!(dates.format_label(86_400.0), "1970-01-02");

    assert_eq!(Axis::new("P", 0.0, 500.0).format_label(12.345), "12");
    assert_eq!(Axis::new("P", 0.0, 5.0).format_label(1.5), "1.50");
}

#[test]
fn tick_positions() {
    assert_eq!(ticks(0.0, 10.0, 3), vec![0.0, 5.0, 10.0]);
    assert_eq!(ticks(4.0, 8.0, 1), vec![4.0]);
    assert!(ticks(0.0, 1.0, 0).is_empty());

    let mut axis = Axis::new("Y", 20.0, 0.0);
    assert_eq!(axis_ticks(&axis, 3), vec![0.0, 10.0, 20.0]);
    axis.min = f64::NAN;
    assert!(axis_ticks(&axis, 3).is_empty());
}
