use serde::{Deserialize, Serialize};

use super::alert::AlertMode;
use super::symbol::Symbol;

pub const DEFAULT_TARGET_PERCENT: f64 = 10.0;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_TICKER_URL: &str = "https://api.bitkub.com/api/market/ticker";
pub const DEFAULT_ALERT_SOUND_URL: &str =
    "https://actions.google.com/sounds/v1/alarms/alarm_clock.ogg";

/// User-configurable settings. Session-only: nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Symbol whose price is charted.
    pub selected_symbol: Symbol,

    /// Aggregate profit percent that triggers the alert.
    pub target_percent: f64,

    /// Delay between ticker requests, in milliseconds.
    pub poll_interval_ms: u64,

    pub alert_mode: AlertMode,

    /// Market ticker endpoint.
    pub ticker_url: String,

    /// Audio clip played with every alert.
    pub alert_sound_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selected_symbol: Symbol::default(),
            target_percent: DEFAULT_TARGET_PERCENT,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            alert_mode: AlertMode::default(),
            ticker_url: DEFAULT_TICKER_URL.to_string(),
            alert_sound_url: DEFAULT_ALERT_SOUND_URL.to_string(),
        }
    }
}
