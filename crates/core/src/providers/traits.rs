use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::price::Ticker;

/// Abstraction over the market-data endpoint.
///
/// The exchange feed implements this; tests substitute scripted providers.
/// One call is one network request returning every market's quote.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TickerProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the current ticker for all markets.
    async fn fetch_ticker(&self) -> Result<Ticker, CoreError>;
}
