use crate::errors::CoreError;
use crate::models::position::Ledger;

use super::kv::KeyValueStore;

/// Fixed key the ledger is stored under.
pub const LEDGER_KEY: &str = "buyList";

/// Reads and writes the ledger as a JSON array of `{coin, price}` objects.
pub struct LedgerStore;

impl LedgerStore {
    /// Serialize a ledger to its stored JSON text.
    pub fn to_json(ledger: &Ledger) -> Result<String, CoreError> {
        serde_json::to_string(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    /// Parse stored JSON text back into a ledger.
    pub fn from_json(text: &str) -> Result<Ledger, CoreError> {
        serde_json::from_str(text)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse ledger: {e}")))
    }

    /// Load the persisted ledger.
    ///
    /// Never fails: a missing key, an unreadable store, or a value that is
    /// not a valid ledger all yield an empty ledger.
    pub fn load(store: &dyn KeyValueStore) -> Ledger {
        let text = match store.get(LEDGER_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return Ledger::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored ledger, starting empty");
                return Ledger::new();
            }
        };
        match Self::from_json(&text) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!(error = %e, "stored ledger is corrupt, starting empty");
                Ledger::new()
            }
        }
    }

    /// Replace the persisted ledger with `ledger`.
    pub fn save(store: &mut dyn KeyValueStore, ledger: &Ledger) -> Result<(), CoreError> {
        let text = Self::to_json(ledger)?;
        store.set(LEDGER_KEY, &text)
    }
}
