use chrono::Utc;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::price::{PriceSnapshot, Ticker};
use crate::providers::traits::TickerProvider;

/// Turns ticker responses into price snapshots.
///
/// One fetch yields one complete snapshot: either every tracked symbol is
/// derived from the same response, or the call fails and the caller keeps
/// its previous snapshot. There is no retry within a call; the poller
/// simply tries again on its next tick.
///
/// **Note on precision**: prices are `f64`. Sums over many positions may
/// accumulate small floating-point errors.
pub struct PriceService {
    provider: Arc<dyn TickerProvider>,
}

impl PriceService {
    pub fn new(provider: Arc<dyn TickerProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Derive a snapshot for all tracked symbols from a ticker response.
    pub fn snapshot(ticker: &Ticker) -> PriceSnapshot {
        PriceSnapshot::from_ticker(ticker, Utc::now())
    }

    /// Fetch the ticker once and derive a snapshot from it.
    pub async fn fetch_snapshot(&self) -> Result<PriceSnapshot, CoreError> {
        let ticker = self.provider.fetch_ticker().await?;
        let snapshot = Self::snapshot(&ticker);
        tracing::debug!(
            provider = self.provider.name(),
            markets = ticker.len(),
            "derived price snapshot"
        );
        Ok(snapshot)
    }
}
