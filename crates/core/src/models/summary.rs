use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// Profit/loss of the whole ledger against the current snapshot.
///
/// Derived on demand, never stored. Positions whose symbol has no known
/// price are left out of both the difference and the invested total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of `current - purchase` over priced positions (THB)
    pub aggregate_difference: f64,

    /// `aggregate_difference / total_invested * 100`, or 0 when nothing is invested
    pub aggregate_percent: f64,

    /// Sum of purchase prices over priced positions (THB)
    pub total_invested: f64,

    /// How many positions had a known current price
    pub priced_positions: usize,

    /// Total number of positions in the ledger
    pub total_positions: usize,
}

impl PortfolioSummary {
    /// True when the ledger has at least one position.
    #[must_use]
    pub fn has_positions(&self) -> bool {
        self.total_positions > 0
    }
}

impl std::fmt::Display for PortfolioSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2}% ({:.2} ฿)",
            self.aggregate_percent, self.aggregate_difference
        )
    }
}

/// One ledger row as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRow {
    /// Position in the ledger; the handle used for removal
    pub index: usize,
    pub symbol: Symbol,
    pub purchase_price: f64,
    pub current_price: Option<f64>,
    /// `current - purchase`, 0 while the price is unknown
    pub difference: f64,
    /// Percent change vs. purchase, 0 while the price is unknown (display only)
    pub percent: f64,
}

impl PositionRow {
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.percent >= 0.0
    }
}
