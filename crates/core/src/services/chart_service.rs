use crate::models::chart::{ChartPoint, ChartViewport};

/// Generates chart-ready coordinates from a price series.
///
/// The core computes the numbers; the frontend only renders them.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Normalize `prices` into `viewport` coordinates.
    ///
    /// - x is spread evenly over `0..=width` by index. A single point sits at x = 0.
    /// - y maps the series minimum to `height` (bottom) and the maximum to 0 (top).
    ///   A flat series (max == min) uses a range of 1, so every point lands
    ///   at the bottom.
    pub fn normalize(&self, prices: &[f64], viewport: ChartViewport) -> Vec<ChartPoint> {
        if prices.is_empty() {
            return Vec::new();
        }

        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };
        let last_index = match prices.len() - 1 {
            0 => 1.0,
            n => n as f64,
        };

        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| ChartPoint {
                x: i as f64 / last_index * viewport.width,
                y: viewport.height - (price - min) / range * viewport.height,
                price,
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
