use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::{Quote, Ticker};
use crate::models::settings::DEFAULT_TICKER_URL;
use super::traits::TickerProvider;

const PROVIDER_NAME: &str = "Bitkub";

/// Bitkub public market ticker.
///
/// - **Free**: no API key, no authentication.
/// - **Endpoint**: `GET /api/market/ticker`, one object keyed by market
///   (`"THB_KUB"`) with `bid`, `ask`, `last` and other numeric fields.
pub struct BitkubProvider {
    client: Client,
    url: String,
}

impl BitkubProvider {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_TICKER_URL)
    }

    /// Point the provider at a different ticker URL (mirrors, test servers).
    pub fn with_url(url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for BitkubProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a raw ticker body into quotes.
///
/// The body must be a JSON object. Markets whose entry is not an object of
/// numeric fields are skipped, so one odd market never discards the others.
pub fn parse_ticker(body: Value) -> Result<Ticker, CoreError> {
    let markets: HashMap<String, Value> = match body {
        Value::Object(map) => map.into_iter().collect(),
        other => {
            return Err(CoreError::MalformedFeed(format!(
                "expected a JSON object keyed by market, got {}",
                json_kind(&other)
            )))
        }
    };

    let ticker = markets
        .into_iter()
        .filter_map(|(market, entry)| match serde_json::from_value::<Quote>(entry) {
            Ok(quote) => Some((market, quote)),
            Err(e) => {
                tracing::debug!(%market, error = %e, "skipping unreadable ticker entry");
                None
            }
        })
        .collect();

    Ok(ticker)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TickerProvider for BitkubProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_ticker(&self) -> Result<Ticker, CoreError> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("ticker request failed with HTTP {status}"),
            });
        }

        let body: Value = resp.json().await.map_err(|e| {
            CoreError::MalformedFeed(format!("ticker body is not valid JSON: {e}"))
        })?;

        parse_ticker(body)
    }
}
