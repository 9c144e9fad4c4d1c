use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::symbol::Symbol;

/// One market's entry in the ticker response.
///
/// Every field is optional: the feed may omit any of them, and a value of
/// `0` means "no quote" on this exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub last: Option<f64>,
}

impl Quote {
    /// The single representative price for this quote.
    ///
    /// Mid-price `(bid + ask) / 2` when both sides are quoted, otherwise the
    /// last traded price. A side quoted as zero (or any non-positive or
    /// non-finite value) counts as missing.
    #[must_use]
    pub fn representative_price(&self) -> Option<f64> {
        match (quoted(self.bid), quoted(self.ask)) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => quoted(self.last),
        }
    }
}

fn quoted(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Raw ticker response: market key (`"THB_KUB"`) → quote.
pub type Ticker = HashMap<String, Quote>;

/// Representative price for `symbol` in `ticker`, or `None` if the feed has
/// no usable entry for it.
#[must_use]
pub fn derive_price(ticker: &Ticker, symbol: Symbol) -> Option<f64> {
    ticker
        .get(&symbol.market_key())
        .and_then(Quote::representative_price)
}

/// Best known current price of every tracked symbol.
///
/// Built from one ticker response and replaced wholesale on the next
/// successful poll. A symbol maps to `None` until the feed has a price for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub prices: BTreeMap<Symbol, Option<f64>>,
    /// When the underlying ticker was received. `None` for the initial, empty snapshot.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl PriceSnapshot {
    /// The snapshot before the first successful poll: every symbol absent.
    pub fn empty() -> Self {
        Self {
            prices: Symbol::ALL.into_iter().map(|s| (s, None)).collect(),
            fetched_at: None,
        }
    }

    /// Derive a snapshot for all tracked symbols from a ticker response.
    pub fn from_ticker(ticker: &Ticker, fetched_at: DateTime<Utc>) -> Self {
        Self {
            prices: Symbol::ALL
                .into_iter()
                .map(|s| (s, derive_price(ticker, s)))
                .collect(),
            fetched_at: Some(fetched_at),
        }
    }

    /// Build a snapshot from explicit prices; symbols not listed are absent.
    pub fn from_prices(prices: impl IntoIterator<Item = (Symbol, f64)>) -> Self {
        let mut snapshot = Self::empty();
        for (symbol, price) in prices {
            snapshot.prices.insert(symbol, Some(price));
        }
        snapshot.fetched_at = Some(Utc::now());
        snapshot
    }

    /// Current price of `symbol`, if known.
    #[must_use]
    pub fn price(&self, symbol: Symbol) -> Option<f64> {
        self.prices.get(&symbol).copied().flatten()
    }

    /// True when no symbol has a known price yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.values().all(Option::is_none)
    }
}

impl Default for PriceSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Format a THB price for display: two decimals and the baht sign.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("{price:.2} ฿")
}
