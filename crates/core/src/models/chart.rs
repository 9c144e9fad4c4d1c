use serde::{Deserialize, Serialize};

/// A single normalized point for the mini chart.
///
/// The core computes the coordinates; the frontend only draws them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Horizontal position, `0..=width`, evenly spaced by series index.
    pub x: f64,

    /// Vertical position, `0..=height`. The series minimum sits at `height`
    /// (bottom), the maximum at `0` (top).
    pub y: f64,

    /// The price this point was drawn from.
    pub price: f64,
}

/// Fixed coordinate space the chart is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewport {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartViewport {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 60.0,
        }
    }
}
