//! Extension points for splitting indivisible orders.
//!
//! Splitting an indivisible order along its quantity or its duration would
//! let the clearing loop match it against several counterparties. No
//! splitting policy exists yet, so every hook reports
//! [`OrderBookError::Unsupported`].

use crate::error::{OrderBookError, Result};
use crate::orderbook::OrderBook;
use crate::types::Order;

/// Order splitting hooks.
///
/// Implementors override the methods they support; the defaults refuse.
pub trait OrderDivision {
    /// Split an order into parts that can be matched independently
    fn divide(&self, _order: &Order) -> Result<Vec<Order>> {
        Err(OrderBookError::Unsupported("divide"))
    }

    /// Split an order into parts of smaller quantity over the same duration
    fn divide_quantity(&self, _order: &Order) -> Result<Vec<Order>> {
        Err(OrderBookError::Unsupported("divide_quantity"))
    }

    /// Split an order into consecutive parts of shorter duration
    fn divide_duration(&self, _order: &Order) -> Result<Vec<Order>> {
        Err(OrderBookError::Unsupported("divide_duration"))
    }
}

impl OrderDivision for OrderBook {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_hooks_are_unsupported() {
        let book = OrderBook::default();
        let order = Order::new(OrderType::BuyLimit, dec!(2), dec!(1)).with_price(dec!(5));

        assert!(matches!(book.divide(&order), Err(OrderBookError::Unsupported("divide"))));
        assert!(matches!(
            book.divide_quantity(&order),
            Err(OrderBookError::Unsupported("divide_quantity"))
        ));
        assert!(matches!(
            book.divide_duration(&order),
            Err(OrderBookError::Unsupported("divide_duration"))
        ));
    }
}
