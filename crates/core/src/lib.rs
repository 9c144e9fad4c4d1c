pub mod errors;
pub mod models;
pub mod notifiers;
#[cfg(not(target_arch = "wasm32"))]
pub mod poller;
pub mod providers;
pub mod services;
pub mod storage;

use models::{
    alert::{AlertEvent, AlertMode, AlertState},
    chart::{ChartPoint, ChartViewport},
    command::Command,
    history::HistoryBuffer,
    position::{Ledger, Position},
    price::PriceSnapshot,
    settings::Settings,
    summary::{PortfolioSummary, PositionRow},
    symbol::Symbol,
    view::DashboardView,
};
use services::{
    alert_service::AlertMonitor, chart_service::ChartService,
    ledger_service::LedgerService, summary_service::SummaryService,
};
use storage::kv::{KeyValueStore, MemoryStore};

use errors::CoreError;

/// Main entry point for the Coin Pulse core library.
///
/// One explicit state container: settings, the ledger and its store, the
/// latest price snapshot, the chart history and the alert monitor. Whoever
/// owns it (normally the poller) applies commands and poll
/// results, and delivers the alerts those calls return.
#[must_use]
pub struct PortfolioTracker {
    settings: Settings,
    ledger: Ledger,
    store: Box<dyn KeyValueStore>,
    snapshot: PriceSnapshot,
    history: HistoryBuffer,
    alert_monitor: AlertMonitor,
    price_input: String,
    last_feed_error: Option<String>,
    ledger_service: LedgerService,
    summary_service: SummaryService,
    chart_service: ChartService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("positions", &self.ledger.len())
            .field("settings", &self.settings)
            .field("history", &self.history.len())
            .field("alert_state", &self.alert_monitor.state())
            .finish()
    }
}

impl PortfolioTracker {
    /// Open a tracker over `store`, loading any persisted ledger.
    ///
    /// A corrupt stored ledger is treated as empty; only invalid settings fail.
    pub fn open(store: Box<dyn KeyValueStore>, settings: Settings) -> Result<Self, CoreError> {
        validate_settings(&settings)?;
        Ok(Self::build(store, settings))
    }

    /// A tracker with default settings and a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self::build(Box::new(MemoryStore::new()), Settings::default())
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Apply a user command, then re-evaluate the alert if the command
    /// changed the ledger or the target.
    pub fn apply(&mut self, command: Command) -> Result<Option<AlertEvent>, CoreError> {
        let reevaluate = match command {
            Command::SelectSymbol(symbol) => {
                self.select_symbol(symbol);
                false
            }
            Command::SetPriceInput(text) => {
                self.set_price_input(text);
                false
            }
            Command::SubmitPriceInput => self.submit_price_input()?,
            Command::AddPosition { symbol, raw_price } => {
                self.add_position(symbol, &raw_price)?
            }
            Command::RemovePosition(index) => {
                self.remove_position(index)?;
                true
            }
            Command::ClearPositions => {
                self.ledger_service.clear(&mut self.ledger, self.store.as_mut())?;
                true
            }
            Command::SetTargetPercent(percent) => {
                self.set_target_percent(percent)?;
                true
            }
            Command::SetAlertMode(mode) => {
                self.set_alert_mode(mode);
                false
            }
        };

        Ok(if reevaluate { self.evaluate_alert() } else { None })
    }

    /// Apply the outcome of one poll.
    ///
    /// On success the snapshot is replaced, the selected symbol's price is
    /// charted and the alert is evaluated. On failure everything is kept as
    /// it was and the error is logged.
    pub fn apply_poll_result(
        &mut self,
        result: Result<PriceSnapshot, CoreError>,
    ) -> Option<AlertEvent> {
        match result {
            Ok(snapshot) => {
                self.publish_snapshot(snapshot);
                self.evaluate_alert()
            }
            Err(e) => {
                self.record_feed_failure(&e);
                None
            }
        }
    }

    // ── Prices & History ────────────────────────────────────────────

    /// Replace the current snapshot wholesale and chart the selected
    /// symbol's new price. Does not evaluate the alert.
    pub fn publish_snapshot(&mut self, snapshot: PriceSnapshot) {
        self.snapshot = snapshot;
        self.last_feed_error = None;
        if let Some(price) = self.snapshot.price(self.settings.selected_symbol) {
            self.history.push_price(price);
        }
    }

    /// Note a failed poll. The previous snapshot stays in place.
    pub fn record_feed_failure(&mut self, error: &CoreError) {
        if error.is_transient() {
            tracing::warn!(error = %error, "price poll failed, keeping previous prices");
        } else {
            tracing::error!(error = %error, "unexpected price poll error, keeping previous prices");
        }
        self.last_feed_error = Some(error.to_string());
    }

    #[must_use]
    pub fn snapshot(&self) -> &PriceSnapshot {
        &self.snapshot
    }

    /// Current price of `symbol`, if the feed has delivered one.
    #[must_use]
    pub fn current_price(&self, symbol: Symbol) -> Option<f64> {
        self.snapshot.price(symbol)
    }

    #[must_use]
    pub fn selected_price(&self) -> Option<f64> {
        self.current_price(self.settings.selected_symbol)
    }

    #[must_use]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Chart coordinates for the current history in the default viewport.
    #[must_use]
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.chart_points_in(ChartViewport::default())
    }

    #[must_use]
    pub fn chart_points_in(&self, viewport: ChartViewport) -> Vec<ChartPoint> {
        self.chart_service.normalize(&self.history.prices(), viewport)
    }

    #[must_use]
    pub fn last_feed_error(&self) -> Option<&str> {
        self.last_feed_error.as_deref()
    }

    // ── Ledger ──────────────────────────────────────────────────────

    /// Record a buy of `symbol` at the price in `raw_price`.
    ///
    /// Returns `Ok(false)` and changes nothing when the input is not a usable
    /// price. Errors only when the store cannot be written, in which case the
    /// ledger is unchanged.
    pub fn add_position(&mut self, symbol: Symbol, raw_price: &str) -> Result<bool, CoreError> {
        self.ledger_service
            .add(&mut self.ledger, self.store.as_mut(), symbol, raw_price)
    }

    /// Remove the position at `index`. Out of range is a no-op returning `None`.
    pub fn remove_position(&mut self, index: usize) -> Result<Option<Position>, CoreError> {
        self.ledger_service
            .remove_at(&mut self.ledger, self.store.as_mut(), index)
    }

    /// Remove every recorded position, then re-evaluate the alert so the
    /// monitor re-arms.
    pub fn clear_positions(&mut self) -> Result<Option<AlertEvent>, CoreError> {
        self.apply(Command::ClearPositions)
    }

    /// Replace the bound purchase-price input text.
    pub fn set_price_input(&mut self, text: impl Into<String>) {
        self.price_input = text.into();
    }

    #[must_use]
    pub fn price_input(&self) -> &str {
        &self.price_input
    }

    /// Record a buy of the selected symbol at the bound input's price.
    /// The input text is left as it is.
    pub fn submit_price_input(&mut self) -> Result<bool, CoreError> {
        let raw = self.price_input.clone();
        self.add_position(self.settings.selected_symbol, &raw)
    }

    /// Recorded positions, oldest first.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.ledger
    }

    #[must_use]
    pub fn position_count(&self) -> usize {
        self.ledger.len()
    }

    /// Ledger rows with current price and percent change, for display.
    #[must_use]
    pub fn position_rows(&self) -> Vec<PositionRow> {
        self.summary_service.position_rows(&self.ledger, &self.snapshot)
    }

    /// Export the ledger as pretty-printed JSON in the stored `{coin, price}` schema.
    pub fn export_ledger_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    // ── Summary & Alert ─────────────────────────────────────────────

    /// Aggregate profit/loss of the ledger at current prices.
    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        self.summary_service.summarize(&self.ledger, &self.snapshot)
    }

    /// Recompute the summary and run it through the alert monitor.
    pub fn evaluate_alert(&mut self) -> Option<AlertEvent> {
        let summary = self.summary();
        self.alert_monitor.evaluate(
            &summary,
            self.settings.target_percent,
            &self.settings.alert_sound_url,
        )
    }

    #[must_use]
    pub fn alert_state(&self) -> AlertState {
        self.alert_monitor.state()
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Chart a different symbol. Its history starts empty.
    pub fn select_symbol(&mut self, symbol: Symbol) {
        self.settings.selected_symbol = symbol;
        self.history.reset_for(symbol);
    }

    #[must_use]
    pub fn selected_symbol(&self) -> Symbol {
        self.settings.selected_symbol
    }

    /// Set the profit target. Must be a finite number.
    pub fn set_target_percent(&mut self, percent: f64) -> Result<(), CoreError> {
        if !percent.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Target percent must be a finite number, got {percent}"
            )));
        }
        self.settings.target_percent = percent;
        Ok(())
    }

    #[must_use]
    pub fn target_percent(&self) -> f64 {
        self.settings.target_percent
    }

    pub fn set_alert_mode(&mut self, mode: AlertMode) {
        self.settings.alert_mode = mode;
        self.alert_monitor.set_mode(mode);
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Presentation ────────────────────────────────────────────────

    /// Owned copy of everything needed to render the dashboard.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        DashboardView {
            selected_symbol: self.settings.selected_symbol,
            selected_price: self.selected_price(),
            snapshot: self.snapshot.clone(),
            rows: self.position_rows(),
            summary: self.summary(),
            target_percent: self.settings.target_percent,
            alert_mode: self.settings.alert_mode,
            alert_state: self.alert_monitor.state(),
            history: self.history.prices(),
            chart: self.chart_points(),
            price_input: self.price_input.clone(),
            last_feed_error: self.last_feed_error.clone(),
            last_updated: self.snapshot.fetched_at,
        }
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(store: Box<dyn KeyValueStore>, settings: Settings) -> Self {
        let ledger_service = LedgerService::new();
        let ledger = ledger_service.load(store.as_ref());

        Self {
            history: HistoryBuffer::new(settings.selected_symbol),
            alert_monitor: AlertMonitor::new(settings.alert_mode),
            settings,
            ledger,
            store,
            snapshot: PriceSnapshot::empty(),
            price_input: String::new(),
            last_feed_error: None,
            ledger_service,
            summary_service: SummaryService::new(),
            chart_service: ChartService::new(),
        }
    }
}

fn validate_settings(settings: &Settings) -> Result<(), CoreError> {
    if !settings.target_percent.is_finite() {
        return Err(CoreError::ValidationError(format!(
            "Target percent must be a finite number, got {}",
            settings.target_percent
        )));
    }
    if settings.poll_interval_ms == 0 {
        return Err(CoreError::ValidationError(
            "Poll interval must be at least 1 ms".into(),
        ));
    }
    Ok(())
}
