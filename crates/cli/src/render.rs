use std::fmt::Write;

use coin_pulse_core::models::chart::{ChartPoint, ChartViewport};
use coin_pulse_core::models::price::format_price;
use coin_pulse_core::models::symbol::Symbol;
use coin_pulse_core::models::view::DashboardView;

/// Characters used for the sparkline, lowest to highest.
const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the dashboard as plain text.
pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "── Crypto Portfolio Tracker ──");
    let prices: Vec<String> = Symbol::ALL
        .iter()
        .map(|&s| match view.snapshot.price(s) {
            Some(p) => format!("{s} {}", format_price(p)),
            None => format!("{s} loading..."),
        })
        .collect();
    let _ = writeln!(out, "{}", prices.join("  |  "));

    let current = view
        .selected_price
        .map_or_else(|| "loading...".to_string(), format_price);
    let _ = writeln!(
        out,
        "{} {}  {}",
        view.selected_symbol,
        current,
        sparkline(&view.chart, ChartViewport::default())
    );

    if view.rows.is_empty() {
        let _ = writeln!(out, "no positions yet");
    }
    for row in &view.rows {
        let _ = writeln!(
            out,
            "  [{}] {} - {} ฿  {:+.2}%",
            row.index, row.symbol, row.purchase_price, row.percent
        );
    }
    if view.summary.has_positions() {
        let _ = writeln!(out, "portfolio: {}", view.summary);
    }
    let _ = writeln!(
        out,
        "target: {}% ({}, {:?})",
        view.target_percent, view.alert_mode, view.alert_state
    );
    if let Some(error) = &view.last_feed_error {
        let _ = writeln!(out, "feed: {error}");
    }
    out
}

/// Draw normalized chart points as block characters.
///
/// `viewport` must be the one the points were normalized into; y = height
/// is the lowest block, y = 0 the highest.
pub fn sparkline(points: &[ChartPoint], viewport: ChartViewport) -> String {
    let top = (SPARK.len() - 1) as f64;
    points
        .iter()
        .map(|p| {
            let level = (1.0 - p.y / viewport.height) * top;
            SPARK[(level.round().max(0.0) as usize).min(SPARK.len() - 1)]
        })
        .collect()
}
