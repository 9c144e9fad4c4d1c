use serde::{Deserialize, Serialize};

use super::alert::AlertMode;
use super::symbol::Symbol;

/// A user action sent to the tracker's owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Change which symbol is charted.
    SelectSymbol(Symbol),
    /// Replace the bound purchase-price input text.
    SetPriceInput(String),
    /// Record a buy of the selected symbol at the bound input's price.
    SubmitPriceInput,
    /// Record a buy of `symbol` at `raw_price`.
    AddPosition { symbol: Symbol, raw_price: String },
    /// Remove the position at this ledger index.
    RemovePosition(usize),
    /// Remove every position.
    ClearPositions,
    SetTargetPercent(f64),
    SetAlertMode(AlertMode),
}
