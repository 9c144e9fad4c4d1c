use async_trait::async_trait;
use tracing::warn;

use crate::models::alert::AlertEvent;

use super::traits::AlertNotifier;

/// Writes alerts to the log.
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertNotifier for LogNotifier {
    async fn notify(&self, alert: &AlertEvent) {
        warn!(
            target_percent = alert.target_percent,
            aggregate_percent = alert.aggregate_percent,
            sound = %alert.sound_url,
            "{}",
            alert.message
        );
    }
}
