use crate::models::alert::{AlertEvent, AlertMode, AlertState};
use crate::models::summary::PortfolioSummary;

/// Watches the aggregate percent against the profit target.
///
/// The target is met when the ledger is non-empty and
/// `aggregate_percent >= target_percent`. What happens while it stays met
/// depends on [`AlertMode`]:
/// - `EveryEvaluation`: every evaluation that meets the target fires again.
/// - `EdgeTriggered`: only the Armed → Fired transition fires; the monitor
///   re-arms once the target is no longer met.
#[derive(Debug, Clone, Default)]
pub struct AlertMonitor {
    mode: AlertMode,
    state: AlertState,
}

impl AlertMonitor {
    pub fn new(mode: AlertMode) -> Self {
        Self {
            mode,
            state: AlertState::Armed,
        }
    }

    #[must_use]
    pub fn state(&self) -> AlertState {
        self.state
    }

    #[must_use]
    pub fn mode(&self) -> AlertMode {
        self.mode
    }

    /// Switch modes. The current state is kept.
    pub fn set_mode(&mut self, mode: AlertMode) {
        self.mode = mode;
    }

    /// Evaluate one recomputed summary. Returns the alert to deliver, if any.
    pub fn evaluate(
        &mut self,
        summary: &PortfolioSummary,
        target_percent: f64,
        sound_url: &str,
    ) -> Option<AlertEvent> {
        let target_met =
            summary.has_positions() && summary.aggregate_percent >= target_percent;

        if !target_met {
            self.state = AlertState::Armed;
            return None;
        }

        let fire = match self.mode {
            AlertMode::EveryEvaluation => true,
            AlertMode::EdgeTriggered => self.state == AlertState::Armed,
        };
        self.state = AlertState::Fired;

        fire.then(|| {
            tracing::info!(
                target_percent,
                aggregate_percent = summary.aggregate_percent,
                "profit target reached"
            );
            AlertEvent::new(target_percent, summary.aggregate_percent, sound_url)
        })
    }
}
