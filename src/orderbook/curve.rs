//! Cumulative supply and demand step curves.
//!
//! Charting is left to the caller; this only produces the step points from
//! the pending queues.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::orderbook::OrderBook;
use crate::types::Side;

/// One vertex of a cumulative step curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurvePoint {
    pub price: Decimal,
    /// Cumulative quantity up to this vertex
    pub quantity: Decimal,
}

impl OrderBook {
    /// Step curve of the pending orders on one side, in queue order.
    ///
    /// Each order contributes two vertices at its price: the cumulative
    /// quantity before it and after it. Bids give the demand curve, asks the
    /// supply curve.
    pub fn curve(&self, side: Side) -> Vec<CurvePoint> {
        let queue = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };

        let mut points = Vec::with_capacity(queue.len() * 2);
        let mut total = Decimal::ZERO;
        for key in queue {
            let price = self.price_of(*key);
            points.push(CurvePoint { price, quantity: total });
            total = total.saturating_add(self.orders[*key].quantity);
            points.push(CurvePoint { price, quantity: total });
        }
        points
    }
}
