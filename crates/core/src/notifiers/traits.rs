use async_trait::async_trait;

use crate::models::alert::AlertEvent;

/// Delivers profit-target alerts to the user.
///
/// The poller awaits `notify` before continuing, so an implementation that
/// waits for acknowledgement blocks the session the same way a modal alert
/// would.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, alert: &AlertEvent);
}
