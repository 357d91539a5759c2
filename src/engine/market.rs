//! Market order matching against resting limit orders.
//!
//! ## Depth checks
//!
//! - A sell market order is cancelled up front when the bids it could take
//!   (divisible ones, or indivisible ones no larger than the order) cannot
//!   cover it.
//! - A buy market order is checked only when it is itself indivisible, and
//!   then against the total ask quantity regardless of ask divisibility.
//!
//! A cancelled market order is returned untouched; it is neither queued nor
//! settled.
//!
//! ## Fills
//!
//! Resting orders are scanned best-first. Indivisible resting orders larger
//! than what remains of the market order are skipped. Every increment clears
//! at the resting order's own price, which the market order adopts as its
//! price.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::Result;
use crate::orderbook::OrderBook;

impl OrderBook {
    /// Match the sell market order at `key` against the pending bids.
    pub(crate) fn find_buy(&mut self, key: usize) -> Result<()> {
        let wanted = self.orders[key].quantity;
        let depth: Decimal = self
            .bids
            .iter()
            .map(|k| &self.orders[*k])
            .filter(|bid| bid.divisible || bid.quantity <= wanted)
            .map(|bid| bid.quantity)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        if depth < wanted {
            let order = &mut self.orders[key];
            order.set_cancel();
            warn!(order_id = order.id, %wanted, %depth, "market sell cancelled due to insufficient buy depth");
            return Ok(());
        }

        let mut skip = 0;
        while skip < self.bids.len() && self.orders[key].quantity > Decimal::ZERO {
            let bid_key = self.bids[skip];
            let bid = &self.orders[bid_key];
            let order = &self.orders[key];
            let (bid_id, order_id) = (bid.id, order.id);
            let trade = order.quantity.min(bid.quantity);

            if !bid.divisible && trade < bid.quantity {
                debug!(bid = bid_id, order = order_id, %trade, "cannot buy from market sell due to indivisible bid");
                skip += 1;
                continue;
            }

            let price = self.price_of(bid_key);
            debug!(bid = bid_id, order = order_id, %trade, %price, "market sell filling bid");
            self.fill_pair(key, price, bid_key, price, trade)?;
            self.orders[key].set_price(price);
            self.record_fill(bid_id, order_id, price, trade);

            if self.orders[key].is_filled() {
                self.settled.push(key);
            }
            if self.orders[bid_key].is_filled() {
                self.bids.remove(skip);
                self.settled.push(bid_key);
            }
        }
        Ok(())
    }

    /// Match the buy market order at `key` against the pending asks.
    pub(crate) fn find_sell(&mut self, key: usize) -> Result<()> {
        let wanted = self.orders[key].quantity;
        if !self.orders[key].divisible {
            let depth = self
                .asks
                .iter()
                .map(|k| self.orders[*k].quantity)
                .fold(Decimal::ZERO, Decimal::saturating_add);
            if depth < wanted {
                let order = &mut self.orders[key];
                order.set_cancel();
                warn!(order_id = order.id, %wanted, %depth, "market buy cancelled due to insufficient sell depth");
                return Ok(());
            }
        }

        let mut skip = 0;
        while skip < self.asks.len() && self.orders[key].quantity > Decimal::ZERO {
            let ask_key = self.asks[skip];
            let ask = &self.orders[ask_key];
            let order = &self.orders[key];
            let (ask_id, order_id) = (ask.id, order.id);
            let trade = order.quantity.min(ask.quantity);

            if !ask.divisible && trade < ask.quantity {
                debug!(ask = ask_id, order = order_id, %trade, "cannot sell to market buy due to indivisible ask");
                skip += 1;
                continue;
            }

            let price = self.price_of(ask_key);
            debug!(ask = ask_id, order = order_id, %trade, %price, "market buy filling ask");
            self.fill_pair(key, price, ask_key, price, trade)?;
            self.orders[key].set_price(price);
            self.record_fill(order_id, ask_id, price, trade);

            if self.orders[key].is_filled() {
                self.settled.push(key);
            }
            if self.orders[ask_key].is_filled() {
                self.asks.remove(skip);
                self.settled.push(ask_key);
            }
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
