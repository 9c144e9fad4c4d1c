use crate::models::position::Position;
use crate::models::price::PriceSnapshot;
use crate::models::summary::{PortfolioSummary, PositionRow};

/// Computes profit/loss of the ledger against current prices.
///
/// Pure: the result depends only on the ledger and the snapshot passed in.
/// The whole ledger is rescanned on every call instead of being maintained
/// incrementally.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate difference and percent over all positions with a known price.
    ///
    /// Positions whose symbol has no current price are skipped entirely:
    /// they add to neither the difference nor the invested total.
    pub fn summarize(&self, ledger: &[Position], snapshot: &PriceSnapshot) -> PortfolioSummary {
        let mut aggregate_difference = 0.0;
        let mut total_invested = 0.0;
        let mut priced_positions = 0;

        for position in ledger {
            if let Some(current) = snapshot.price(position.symbol) {
                aggregate_difference += position.difference(current);
                total_invested += position.purchase_price;
                priced_positions += 1;
            }
        }

        let aggregate_percent = if total_invested > 0.0 {
            aggregate_difference / total_invested * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            aggregate_difference,
            aggregate_percent,
            total_invested,
            priced_positions,
            total_positions: ledger.len(),
        }
    }

    /// Per-position rows for display, in ledger order.
    /// Unpriced positions show a difference and percent of 0.
    pub fn position_rows(&self, ledger: &[Position], snapshot: &PriceSnapshot) -> Vec<PositionRow> {
        ledger
            .iter()
            .enumerate()
            .map(|(index, position)| {
                let current_price = snapshot.price(position.symbol);
                PositionRow {
                    index,
                    symbol: position.symbol,
                    purchase_price: position.purchase_price,
                    current_price,
                    difference: current_price.map_or(0.0, |c| position.difference(c)),
                    percent: current_price.map_or(0.0, |c| position.percent_change(c)),
                }
            })
            .collect()
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
