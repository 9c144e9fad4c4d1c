use async_trait::async_trait;
use std::sync::Arc;

use crate::models::alert::AlertEvent;

use super::traits::AlertNotifier;

/// Fans one alert out to several notifiers, in registration order.
pub struct CompositeNotifier {
    notifiers: Vec<Arc<dyn AlertNotifier>>,
}

impl CompositeNotifier {
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    pub fn add(&mut self, notifier: Arc<dyn AlertNotifier>) {
        self.notifiers.push(notifier);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }
}

impl Default for CompositeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertNotifier for CompositeNotifier {
    async fn notify(&self, alert: &AlertEvent) {
        for notifier in &self.notifiers {
            notifier.notify(alert).await;
        }
    }
}
