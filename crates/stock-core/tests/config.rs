// File: crates/stock-core/tests/config.rs
// Purpose: JSON chart configuration parsing and chart construction.

use stock_core::bindings::BindingAction;
use stock_core::config::parse_color;
use stock_core::{ChartConfig, ChartError, ClickOutcome, SeriesKind};

const DOC: &str = r##"{
    "xAxis": { "title": "Session", "categories": ["Mon", "Tue", "Wed"] },
    "series": [{
        "id": "aapl",
        "name": "AAPL",
        "type": "candlestick",
        "color": "#ff0000",
        "lineWidth": 3,
        "data": [
            [0, 12, 15, 10, 13],
            { "x": 1, "open": 13, "high": 16, "low": 9, "close": 15 },
            [2, 14, 18, 13, 17]
        ],
        "selected": [1, 7]
    }],
    "bindings": {
        "quick-measure": { "steps": [{ "label": "end" }], "keepSelected": true },
        "flip": { "action": "toggleAnnotations" },
        "bars": { "action": { "seriesType": "ohlc" } }
    }
}"##;

#[test]
fn parses_a_full_document() {
    let cfg = ChartConfig::from_json_str(DOC).unwrap();
    assert_eq!(cfg.series.len(), 1);
    assert_eq!(cfg.series[0].kind, SeriesKind::Candlestick);
    assert_eq!(cfg.series[0].data.len(), 3);
    assert_eq!(cfg.bindings["flip"].action, Some(BindingAction::ToggleAnnotations));
    assert_eq!(cfg.bindings["bars"].action, Some(BindingAction::SeriesType(SeriesKind::Ohlc)));
    assert!(cfg.bindings["quick-measure"].keep_selected);
}

#[test]
fn builds_an_autoscaled_chart() {
    let mut chart = ChartConfig::from_json_str(DOC).unwrap().build().unwrap();
    assert_eq!(chart.x_axis.label, "Session");
    assert_eq!(chart.x_axis.min, 0.0);
    assert_eq!(chart.x_axis.max, 2.0);
    assert!(chart.main_y_axis().min < 9.0 && chart.main_y_axis().max > 18.0);

    let series = &chart.series[0];
    assert_eq!(series.name, "AAPL");
    assert_eq!(series.options.color, skia_safe::Color::from_rgb(255, 0, 0));
    assert_eq!(series.options.line_width, 3.0);
    assert_eq!(series.points[2].x, 2.0);
    assert!(series.points[1].selected && !series.points[0].selected);

    chart.select_tool("quick-measure").unwrap();
    assert_eq!(chart.click(10.0, 10.0), ClickOutcome::Started);
    assert!(matches!(chart.click(40.0, 40.0), ClickOutcome::Committed(_)));
    assert_eq!(chart.navigation.active_tool(), Some("quick-measure"));
}

#[test]
fn defaults_for_an_empty_document() {
    let chart = ChartConfig::from_json_str("{}").unwrap().build().unwrap();
    assert!(chart.series.is_empty());
    assert!(chart.navigation.binding("fibonacci").is_some());
}

#[test]
fn stray_data_elements_do_not_reject_the_document() {
    let doc = r#"{ "series": [{ "id": "s", "data": [[0, 12, 15, 10, 13], 5, null, true] }] }"#;
    let chart = ChartConfig::from_json_str(doc).unwrap().build().unwrap();
    let points = &chart.series[0].points;
    assert_eq!(points.len(), 4);
    assert_eq!(points[0].y, Some(15.0));
    assert!(points[1..].iter().all(|p| p.y.is_none()));
}

#[test]
fn rejects_bad_input() {
    assert!(matches!(ChartConfig::from_json_str("{ \"series\": 3 }"), Err(ChartError::Config(_))));

    let bad_color = r##"{ "series": [{ "id": "s", "color": "red" }] }"##;
    let err = ChartConfig::from_json_str(bad_color).unwrap().build().err().unwrap();
    assert!(matches!(err, ChartError::InvalidColor(_)));
}

#[test]
fn color_formats() {
    assert_eq!(parse_color("#336699").unwrap(), skia_safe::Color::from_rgb(0x33, 0x66, 0x99));
    assert_eq!(parse_color("#80ffffff").unwrap(), skia_safe::Color::from_argb(0x80, 255, 255, 255));
    assert!(parse_color("#12345").is_err());
    assert!(parse_color("336699").is_err());
    assert!(parse_color("#zzzzzz").is_err());
}
