//! Fixed-schema order construction record.
//!
//! `OrderRequest` is the keyed form of an order as it arrives from outside
//! the crate (JSON, configuration, test fixtures). Unknown keys are rejected
//! when deserializing; missing required keys are reported by
//! [`Order::create`].

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{OrderBookError, Result};
use crate::types::order::{Order, OrderType};

/// Keyed order description.
///
/// ## Example
///
/// ```
/// use transactive_orderbook::types::{Order, OrderRequest};
///
/// let request: OrderRequest = serde_json::from_str(
///     r#"{"order_type": "SELLLIMIT", "quantity": "1.5", "duration": "1", "price": "3"}"#,
/// ).unwrap();
/// let order = Order::create(request).unwrap();
/// assert!(order.divisible);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderRequest {
    /// Order type tag, e.g. `BUYLIMIT`
    pub order_type: Option<String>,
    pub quantity: Option<Decimal>,
    pub duration: Option<Decimal>,
    pub price: Option<Decimal>,
    pub divisible: Option<bool>,
}

impl Order {
    /// Build an order from a keyed request.
    ///
    /// # Errors
    ///
    /// - [`OrderBookError::MissingRequiredField`] when `order_type`,
    ///   `quantity` or `duration` is absent, or a limit order has no price
    /// - [`OrderBookError::InvalidOrderType`] for an unrecognised tag
    /// - [`OrderBookError::InvalidQuantity`] for a zero or negative quantity
    pub fn create(request: OrderRequest) -> Result<Order> {
        let order_type: OrderType = request
            .order_type
            .ok_or(OrderBookError::MissingRequiredField("order_type"))?
            .parse()?;
        let quantity = request
            .quantity
            .ok_or(OrderBookError::MissingRequiredField("quantity"))?;
        let duration = request
            .duration
            .ok_or(OrderBookError::MissingRequiredField("duration"))?;

        if quantity <= Decimal::ZERO {
            return Err(OrderBookError::InvalidQuantity(quantity));
        }
        if order_type.is_limit() && request.price.is_none() {
            return Err(OrderBookError::MissingRequiredField("price"));
        }

        let mut order = Order::new(order_type, quantity, duration);
        order.price = request.price;
        if let Some(divisible) = request.divisible {
            order.divisible = divisible;
        }
        Ok(order)
    }
}

impl TryFrom<OrderRequest> for Order {
    type Error = OrderBookError;

    fn try_from(request: OrderRequest) -> Result<Self> {
        Order::create(request)
    }
}
