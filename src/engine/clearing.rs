//! Limit order clearing loop.
//!
//! ## Algorithm
//!
//! A cursor `skip` walks the bid queue while the bid under the cursor
//! crosses the best ask. Each step trades `min(bid, ask)`:
//!
//! - an indivisible bid the best ask cannot fully satisfy is deferred
//!   (the cursor advances, nothing is mutated)
//! - otherwise both sides fill; the buyer pays the best ask price and the
//!   seller is credited at the bid price
//!
//! Orders reaching zero leave their queue for the settled log, bid first.
//! When the best ask settles the cursor returns to the top of the bid queue,
//! so a deferred bid is retried against the next ask.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::orderbook::OrderBook;

/// How the clearing loop treats an indivisible bid larger than the best ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum IndivisiblePolicy {
    /// The bid only fills against a single ask large enough to cover it.
    #[default]
    #[serde(rename = "single")]
    SingleCounterparty,
    /// The bid fills across several asks when the total ask quantity at or
    /// below its price covers it.
    #[serde(rename = "aggregate")]
    Aggregate,
}

impl OrderBook {
    /// Clear all crossing limit orders.
    ///
    /// Runs to a fixed point: on return either a queue is empty, the best bid
    /// is below the best ask, or every crossing bid is an indivisible bid the
    /// current asks cannot satisfy under the active [`IndivisiblePolicy`].
    ///
    /// # Errors
    ///
    /// [`crate::OrderBookError::FillOverflow`] when a fill increment does not fit in
    /// a `Decimal`. The loop stops before touching either order of that pair.
    pub fn clear(&mut self) -> Result<()> {
        let mut skip = 0;
        while skip < self.bids.len() && !self.asks.is_empty() {
            let bid_key = self.bids[skip];
            let ask_key = self.asks[0];
            let bid_price = self.price_of(bid_key);
            let ask_price = self.price_of(ask_key);
            if bid_price < ask_price {
                break;
            }

            let bid = &self.orders[bid_key];
            let ask = &self.orders[ask_key];
            let (bid_id, ask_id) = (bid.id, ask.id);
            let trade = bid.quantity.min(ask.quantity);

            if !bid.divisible && trade < bid.quantity && !self.crossing_depth_covers(bid_price, bid.quantity) {
                debug!(
                    bid = bid_id,
                    ask = ask_id,
                    %trade,
                    "cannot buy from ask due to indivisible bid"
                );
                skip += 1;
                continue;
            }

            debug!(bid = bid_id, ask = ask_id, %trade, price = %ask_price, "bid buying from ask");
            self.fill_pair(bid_key, ask_price, ask_key, bid_price, trade)?;
            self.record_fill(bid_id, ask_id, ask_price, trade);

            if self.orders[bid_key].is_filled() {
                self.bids.remove(skip);
                self.settled.push(bid_key);
            }
            if self.orders[ask_key].is_filled() {
                self.asks.remove(0);
                self.settled.push(ask_key);
                // New best ask: deferred bids become eligible again
                skip = 0;
            }
        }
        Ok(())
    }

    /// Whether the asks priced at or below `limit` hold at least `quantity`.
    ///
    /// Always false under [`IndivisiblePolicy::SingleCounterparty`].
    fn crossing_depth_covers(&self, limit: Decimal, quantity: Decimal) -> bool {
        if self.policy != IndivisiblePolicy::Aggregate {
            return false;
        }
        let depth: Decimal = self
            .asks
            .iter()
            .take_while(|key| self.price_of(**key) <= limit)
            .map(|key| self.orders[*key].quantity)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        depth >= quantity
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
