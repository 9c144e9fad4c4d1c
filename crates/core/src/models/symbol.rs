use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Quote currency of every tracked market.
pub const QUOTE_CURRENCY: &str = "THB";

/// One of the fixed set of tradable assets tracked by the feed.
///
/// Serialized as the bare uppercase ticker (`"KUB"`), which is also the
/// `coin` field of persisted positions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Symbol {
    #[default]
    #[serde(rename = "KUB")]
    Kub,
    #[serde(rename = "VELO")]
    Velo,
    #[serde(rename = "UNI")]
    Uni,
}

impl Symbol {
    /// Every tracked symbol, in display order.
    pub const ALL: [Symbol; 3] = [Symbol::Kub, Symbol::Velo, Symbol::Uni];

    /// Uppercase ticker, e.g. `"KUB"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Kub => "KUB",
            Symbol::Velo => "VELO",
            Symbol::Uni => "UNI",
        }
    }

    /// Key of this symbol's entry in the ticker response, e.g. `"THB_KUB"`.
    #[must_use]
    pub fn market_key(&self) -> String {
        format!("{QUOTE_CURRENCY}_{}", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Symbol::ALL
            .into_iter()
            .find(|sym| sym.as_str() == upper)
            .ok_or_else(|| CoreError::UnknownSymbol(s.to_string()))
    }
}
