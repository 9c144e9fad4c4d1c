use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::{AlertMode, AlertState};
use super::chart::ChartPoint;
use super::position::Position;
use super::price::PriceSnapshot;
use super::summary::{PortfolioSummary, PositionRow};
use super::symbol::Symbol;

/// Everything the presentation layer needs to draw one frame.
///
/// A plain owned copy of the tracker's state, so it can be sent across
/// tasks and rendered without holding on to the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub selected_symbol: Symbol,
    /// Current price of the selected symbol; `None` while loading
    pub selected_price: Option<f64>,
    pub snapshot: PriceSnapshot,
    pub rows: Vec<PositionRow>,
    pub summary: PortfolioSummary,
    pub target_percent: f64,
    pub alert_mode: AlertMode,
    pub alert_state: AlertState,
    /// Charted prices of the selected symbol, oldest first
    pub history: Vec<f64>,
    pub chart: Vec<ChartPoint>,
    /// Text currently bound to the purchase-price input
    pub price_input: String,
    /// Message of the most recent failed poll, cleared by the next success
    pub last_feed_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl DashboardView {
    /// The ledger as shown, oldest first.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        self.rows
            .iter()
            .map(|row| Position::new(row.symbol, row.purchase_price))
            .collect()
    }
}
