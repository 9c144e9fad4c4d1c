use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// One recorded buy: which coin, at what price (THB).
///
/// Persisted as `{"coin": "KUB", "price": 100.0}`. Positions are never
/// edited; the ledger only appends and removes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "coin")]
    pub symbol: Symbol,

    #[serde(rename = "price")]
    pub purchase_price: f64,
}

impl Position {
    pub fn new(symbol: Symbol, purchase_price: f64) -> Self {
        Self {
            symbol,
            purchase_price,
        }
    }

    /// Absolute difference `current - purchase` for this position.
    #[must_use]
    pub fn difference(&self, current_price: f64) -> f64 {
        current_price - self.purchase_price
    }

    /// Percentage gain/loss relative to the purchase price.
    /// Zero when the purchase price is zero.
    #[must_use]
    pub fn percent_change(&self, current_price: f64) -> f64 {
        if self.purchase_price == 0.0 {
            return 0.0;
        }
        self.difference(current_price) / self.purchase_price * 100.0
    }
}

/// Ordered list of recorded buys, in insertion order.
pub type Ledger = Vec<Position>;
