use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::symbol::Symbol;

/// Number of recent prices kept for the chart.
pub const HISTORY_CAPACITY: usize = 20;

/// A single past representative price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub price: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Sliding window of the most recent prices for the selected symbol.
///
/// Only one series exists at a time: switching symbols starts a new, empty
/// series rather than keeping one per symbol. Appending past capacity drops
/// the oldest point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryBuffer {
    symbol: Symbol,
    capacity: usize,
    points: VecDeque<HistoryPoint>,
}

impl HistoryBuffer {
    pub fn new(symbol: Symbol) -> Self {
        Self::with_capacity(symbol, HISTORY_CAPACITY)
    }

    /// A buffer with a custom window size (at least 1).
    pub fn with_capacity(symbol: Symbol, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            symbol,
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Symbol this series belongs to.
    #[must_use]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add a point at the end, dropping from the front to stay within capacity.
    pub fn append(&mut self, point: HistoryPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Convenience: append a price stamped with the current time.
    pub fn push_price(&mut self, price: f64) {
        self.append(HistoryPoint {
            price,
            recorded_at: Utc::now(),
        });
    }

    /// Start a fresh, empty series for `symbol`.
    /// A no-op when `symbol` is already the tracked one.
    pub fn reset_for(&mut self, symbol: Symbol) {
        if self.symbol != symbol {
            self.symbol = symbol;
            self.points.clear();
        }
    }

    /// Points oldest-first.
    pub fn points(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    /// Prices oldest-first.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }
}
