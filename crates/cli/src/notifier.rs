use std::io::Write;

use async_trait::async_trait;
use coin_pulse_core::models::alert::AlertEvent;
use coin_pulse_core::notifiers::traits::AlertNotifier;

/// Prints alerts to the terminal and rings the bell.
///
/// The terminal cannot play the configured clip, so its URL is printed
/// next to the message.
pub struct TerminalNotifier;

#[async_trait]
impl AlertNotifier for TerminalNotifier {
    async fn notify(&self, alert: &AlertEvent) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "\x07\n🔔 {} (now {:.2}%)  ♪ {}",
            alert.message, alert.aggregate_percent, alert.sound_url
        );
        let _ = out.flush();
    }
}
