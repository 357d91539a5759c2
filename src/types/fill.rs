//! Fill record for one matching increment.

use rust_decimal::Decimal;
use serde::Serialize;

/// A fill is a single increment exchanged between a bid and an ask.
///
/// ## Price
///
/// `price` is the settlement price the buyer pays: the best ask price for
/// limit-against-limit clearing, and the resting order's own price when a
/// market order is matched.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use transactive_orderbook::types::Fill;
///
/// let fill = Fill::new(1, 10, 11, Decimal::from(4), Decimal::from(2));
/// assert_eq!(fill.notional(), Decimal::from(8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fill {
    /// Fill sequence number within the book
    pub id: u64,

    /// Buying order
    pub bid_order_id: u64,

    /// Selling order
    pub ask_order_id: u64,

    /// Settlement price
    pub price: Decimal,

    /// Filled quantity
    pub quantity: Decimal,
}

impl Fill {
    pub fn new(
        id: u64,
        bid_order_id: u64,
        ask_order_id: u64,
        price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            id,
            bid_order_id,
            ask_order_id,
            price,
            quantity,
        }
    }

    /// Price times quantity
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}
