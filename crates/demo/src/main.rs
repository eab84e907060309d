// File: crates/demo/src/main.rs
// Summary: Demo loads OHLC data (CSV or JSON chart config), exercises the stock tools and renders PNGs.

use anyhow::{Context, Result};
use stock_core::{
    Chart, ChartConfig, IndicatorRequest, PointInput, RenderOptions, Series, SeriesKind,
};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    // Optional input: .csv/.cvs candles or a .json chart config.
    // Without one, synthetic data is used.
    let input = std::env::args().nth(1);
    let (mut chart, stem) = match input.as_deref() {
        Some(raw) => {
            let (path, used_alt) = resolve_path(raw)?;
            log::info!("using input file {}", path.display());
            if used_alt {
                log::info!("extension swapped between .csv/.cvs");
            }
            (load_chart(&path)?, file_stem(&path))
        }
        None => {
            log::info!("no input given; generating a synthetic random walk");
            (synthetic_chart(240), "synthetic".to_string())
        }
    };

    let Some(main_id) = chart.series.first().map(|s| s.id.clone()) else {
        anyhow::bail!("no series loaded; check headers/delimiter");
    };
    log::info!("loaded {} points into {main_id}", chart.series[0].points.len());

    let opts = RenderOptions::default();

    // 1) Price series in each drawing style
    for tool in ["series-type-ohlc", "series-type-candlestick", "series-type-line"] {
        chart.select_tool(tool)?;
        let out = out_name_with(&stem, tool.trim_start_matches("series-type-"));
        chart.render_to_png(&opts, &out)?;
        println!("Wrote {}", out.display());
    }
    chart.select_tool("series-type-candlestick")?;

    // 2) Indicators in stacked panes
    for (kind, period) in [("sma", "20"), ("ema", "9"), ("atr", "14")] {
        let request = IndicatorRequest::add(&main_id, kind, &[("params.period", period)]);
        let id = chart.manage_indicators(&request)?;
        log::info!("added indicator {id:?}");
    }
    let out = out_name_with(&stem, "indicators");
    chart.render_to_png(&opts, &out)?;
    println!("Wrote {}", out.display());

    // 3) Annotations drawn by simulated clicks (plot-relative pixels)
    let plot = chart.plot_rect();
    let (w, h) = (plot.width() as f64, plot.height() as f64 * 0.4);
    let gestures: [(&str, &[(f64, f64)]); 4] = [
        ("horizontal-line", &[(0.0, h * 0.5)]),
        ("segment", &[(w * 0.1, h * 0.8), (w * 0.45, h * 0.2)]),
        ("circle-annotation", &[(w * 0.6, h * 0.5), (w * 0.65, h * 0.5)]),
        (
            "elliott3",
            &[(w * 0.7, h * 0.9), (w * 0.75, h * 0.4), (w * 0.8, h * 0.7), (w * 0.9, h * 0.1)],
        ),
    ];
    for (tool, clicks) in gestures {
        chart.select_tool(tool)?;
        for &(x, y) in clicks {
            chart.mouse_move(x, y);
            let outcome = chart.click(x, y);
            log::debug!("{tool} click at ({x:.0}, {y:.0}): {outcome:?}");
        }
    }
    println!("{} annotations placed", chart.annotations.len());
    let out = out_name_with(&stem, "annotated");
    chart.render_to_png(&opts, &out)?;
    println!("Wrote {}", out.display());

    chart.select_tool("toggle-annotations")?;
    let out = out_name_with(&stem, "annotations_hidden");
    chart.render_to_png(&opts, &out)?;
    println!("Wrote {}", out.display());

    Ok(())
}

fn load_chart(path: &Path) -> Result<Chart> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    if ext == "json" {
        let cfg = ChartConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        return Ok(cfg.build()?);
    }
    let data = load_ohlc_csv(path)
        .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    let mut chart = Chart::new();
    chart.x_axis.datetime = data.iter().any(|p| matches!(p, PointInput::List(v) if v.len() == 5));
    chart.add_series(
        Series::new("price", SeriesKind::Candlestick)
            .with_name(file_stem(path))
            .with_data(data),
    );
    chart.autoscale_axes(0.02);
    Ok(chart)
}

fn synthetic_chart(n: usize) -> Chart {
    let mut price = 100.0f64;
    let data = (0..n)
        .map(|i| {
            let open = price;
            let drift = (i as f64 * 0.13).sin() * 1.5 + (i as f64 * 0.031).cos();
            let close = (open + drift).max(1.0);
            price = close;
            PointInput::ohlc(open, open.max(close) + 0.8, open.min(close) - 0.8, close)
        })
        .collect();
    let mut chart = Chart::new();
    chart.add_series(
        Series::new("price", SeriesKind::Candlestick)
            .with_name("Synthetic")
            .with_data(data),
    );
    chart.autoscale_axes(0.02);
    chart
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn file_stem(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    stem.split('_').take(3).collect::<Vec<_>>().join("_")
}

/// Output file name like target/out/stock_<stem>_<suffix>.png
fn out_name_with(stem: &str, suffix: &str) -> PathBuf {
    let out = PathBuf::from("target/out");
    if stem.is_empty() {
        out.join(format!("stock_{suffix}.png"))
    } else {
        out.join(format!("stock_{stem}_{suffix}.png"))
    }
}

/// Load Binance-like OHLC CSV rows as `[t, o, h, l, c]` (or `[o, h, l, c]` without a time column).
fn load_ohlc_csv(path: &Path) -> Result<Vec<PointInput>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    log::debug!("headers: {headers:?}");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);

    if i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        log::warn!("could not find one of open/high/low/close columns");
    }

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: Option<usize>| {
            i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok())
        };
        let (Some(o), Some(h), Some(l), Some(c)) =
            (parse(i_open), parse(i_high), parse(i_low), parse(i_close))
        else {
            skipped += 1;
            continue;
        };
        match i_time.and_then(|ix| rec.get(ix)).and_then(parse_time_to_f64) {
            Some(t) => out.push(PointInput::xohlc(t, o, h, l, c)),
            None => out.push(PointInput::ohlc(o, h, l, c)),
        }
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} rows without numeric OHLC values");
    }
    Ok(out)
}

/// Epoch seconds from an integer timestamp; milliseconds are scaled down.
fn parse_time_to_f64(s: &str) -> Option<f64> {
    let n = s.trim().parse::<i64>().ok()?;
    if n > 10_i64.pow(12) {
        Some(n as f64 / 1000.0)
    } else {
        Some(n as f64)
    }
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
