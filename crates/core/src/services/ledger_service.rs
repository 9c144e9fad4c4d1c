use crate::errors::CoreError;
use crate::models::position::{Ledger, Position};
use crate::models::symbol::Symbol;
use crate::storage::kv::KeyValueStore;
use crate::storage::ledger_store::LedgerStore;

/// Manages the ledger of recorded buys and keeps the stored copy in sync.
///
/// Every mutation builds the next ledger, writes it to the store, and only
/// then replaces the in-memory copy. If the write fails the in-memory
/// ledger is untouched, so the two never diverge.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Load the persisted ledger; corrupt or missing data yields an empty one.
    pub fn load(&self, store: &dyn KeyValueStore) -> Ledger {
        let ledger = LedgerStore::load(store);
        tracing::debug!(positions = ledger.len(), "loaded ledger");
        ledger
    }

    /// Append a buy of `symbol` at the price typed in `raw_price`.
    ///
    /// Returns `Ok(false)` without touching anything when the input is not a
    /// usable price (see [`parse_purchase_price`]). Errors only come from
    /// the store.
    pub fn add(
        &self,
        ledger: &mut Ledger,
        store: &mut dyn KeyValueStore,
        symbol: Symbol,
        raw_price: &str,
    ) -> Result<bool, CoreError> {
        let price = match parse_purchase_price(raw_price) {
            Ok(price) => price,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring purchase price input");
                return Ok(false);
            }
        };

        let mut next = ledger.clone();
        next.push(Position::new(symbol, price));
        self.commit(ledger, store, next)?;
        tracing::info!(%symbol, price, "recorded position");
        Ok(true)
    }

    /// Remove the position at `index` (its place in the current order).
    ///
    /// Returns the removed position, or `None` when `index` is out of range.
    /// The store is rewritten in both cases.
    pub fn remove_at(
        &self,
        ledger: &mut Ledger,
        store: &mut dyn KeyValueStore,
        index: usize,
    ) -> Result<Option<Position>, CoreError> {
        let mut next = ledger.clone();
        let removed = (index < next.len()).then(|| next.remove(index));
        self.commit(ledger, store, next)?;
        if let Some(position) = &removed {
            tracing::info!(index, symbol = %position.symbol, "removed position");
        }
        Ok(removed)
    }

    /// Remove every position.
    pub fn clear(&self, ledger: &mut Ledger, store: &mut dyn KeyValueStore) -> Result<(), CoreError> {
        self.commit(ledger, store, Ledger::new())
    }

    fn commit(
        &self,
        ledger: &mut Ledger,
        store: &mut dyn KeyValueStore,
        next: Ledger,
    ) -> Result<(), CoreError> {
        LedgerStore::save(store, &next)?;
        *ledger = next;
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a purchase price typed by the user.
///
/// Surrounding whitespace is ignored. Empty input, anything that is not a
/// number, and non-finite or non-positive values are rejected.
pub fn parse_purchase_price(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    let price: f64 = trimmed
        .parse()
        .map_err(|_| CoreError::InvalidPrice(raw.to_string()))?;
    if !price.is_finite() || price <= 0.0 {
        return Err(CoreError::InvalidPrice(raw.to_string()));
    }
    Ok(price)
}
