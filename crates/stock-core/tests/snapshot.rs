// File: crates/stock-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a small deterministic OHLC chart (one selected bar) to PNG bytes.
// - UPDATE_SNAPSHOTS=1 (re)writes the snapshot file.
// - Otherwise an existing snapshot is compared pixel for pixel.
// - A missing snapshot is reported and the test passes.

use stock_core::point::PointOptions;
use stock_core::{Axis, Chart, PointInput, RenderOptions, Series, SeriesKind};

fn render_bytes() -> Vec<u8> {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", -1.0, 5.0);
    chart.main_y_axis_mut().set_extremes(0.0, 10.0);

    let selected = PointInput::Object(PointOptions {
        x: Some(2.0.into()),
        open: Some(4.0.into()),
        high: Some(8.0.into()),
        low: Some(3.0.into()),
        close: Some(7.0.into()),
        selected: Some(true),
        ..PointOptions::default()
    });
    chart.add_series(Series::new("bars", SeriesKind::Ohlc).with_data(vec![
        PointInput::xohlc(0.0, 2.0, 5.0, 1.0, 4.0),
        PointInput::xohlc(1.0, 4.0, 6.0, 3.5, 5.0),
        selected,
        PointInput::xohlc(3.0, 7.0, 9.0, 5.0, 6.0),
        PointInput::xohlc(4.0, 6.0, 7.5, 4.0, 4.5),
    ]));

    let opts = RenderOptions {
        width: 240,
        height: 160,
        draw_labels: false,
        ..RenderOptions::default()
    };
    chart.render_to_png_bytes(&opts).expect("render bytes")
}

#[test]
fn golden_ohlc_chart() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("ohlc_chart.png");

    let update = std::env::var("UPDATE_SNAPSHOTS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // decoded pixels, so PNG encoder differences don't matter
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(
            got_img.as_raw(),
            want_img.as_raw(),
            "rendered pixels differ from golden snapshot: {}",
            snap_path.display()
        );
    } else {
        eprintln!(
            "[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.",
            snap_path.display()
        );
    }
}
