use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observed state of the profit-target monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertState {
    /// Below target, or no positions.
    #[default]
    Armed,
    /// The latest evaluation met the target.
    Fired,
}

/// How often the monitor fires while the target stays met.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertMode {
    /// Fire on every evaluation where the target is met.
    #[default]
    EveryEvaluation,
    /// Fire once per Armed → Fired transition; re-arm when the percent
    /// drops back below target or the ledger empties.
    EdgeTriggered,
}

impl std::fmt::Display for AlertMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertMode::EveryEvaluation => write!(f, "every-evaluation"),
            AlertMode::EdgeTriggered => write!(f, "edge-triggered"),
        }
    }
}

/// A notification the owner of the tracker must deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub target_percent: f64,
    pub aggregate_percent: f64,
    pub message: String,
    /// Audio clip to play alongside the message
    pub sound_url: String,
    pub fired_at: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(target_percent: f64, aggregate_percent: f64, sound_url: impl Into<String>) -> Self {
        Self {
            target_percent,
            aggregate_percent,
            message: format!("Portfolio profit exceeded {target_percent}%!"),
            sound_url: sound_url.into(),
            fired_at: Utc::now(),
        }
    }
}
