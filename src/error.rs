//! Order book error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::OrderType;

/// Errors that can occur while building, submitting or comparing orders.
///
/// A market order that cannot be filled from the resting depth is *not* an
/// error: it comes back from the book with its type set to
/// [`OrderType::Cancel`].
#[derive(Debug, Error)]
pub enum OrderBookError {
    /// Unrecognised order type tag, or an order type the operation cannot handle.
    #[error("invalid order type: {0}")]
    InvalidOrderType(String),

    /// A required order field was not supplied.
    #[error("'{0}' must be specified")]
    MissingRequiredField(&'static str),

    /// Priority comparison across sides (buy vs sell).
    #[error("cannot compare {left} order to {right} order")]
    InvalidComparison { left: OrderType, right: OrderType },

    /// Order quantity that is zero or negative.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(Decimal),

    /// The submitted order carries an id already known to the book.
    #[error("duplicate order id: {0}")]
    DuplicateOrderId(u64),

    /// The submitted id leaves no room for the book's id allocator.
    #[error("order id out of range: {0}")]
    InvalidOrderId(u64),

    /// A fill increment between two orders does not fit in a `Decimal`.
    ///
    /// Neither order is modified; matching stops at that fill.
    #[error("fill between orders {order_id} and {counterparty_id} overflows")]
    FillOverflow { order_id: u64, counterparty_id: u64 },

    /// Extension point without a concrete policy.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// Settings could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrderBookError>;
