//! # Transactive Order Book
//!
//! Continuous market for a resource offered in a quantity, at a price, for a
//! duration (e.g. MW of power for some hours).
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, OrderType, Fill, BookSnapshot)
//! - **OrderBook**: Sorted bid/ask queues over a slab of orders, settled log
//! - **Engine**: Limit clearing loop and market order matching
//! - **Settings**: Units, clearing policy and log verbosity
//!
//! ## Design Principles
//!
//! 1. **Price-Time Priority**: Best price first, ties in submission order
//! 2. **Exact Arithmetic**: Decimal quantities and prices, no floating point
//! 3. **Indivisible Orders**: Filled in one increment or deferred, never split
//! 4. **Synchronous Execution**: Every call runs to completion on `&mut self`
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use transactive_orderbook::OrderBook;
//!
//! let mut book = OrderBook::new("MW", "h", "$", None);
//! let bid = book.bid(Decimal::ONE, Decimal::ONE, Some(Decimal::ONE)).unwrap();
//! book.ask(Decimal::ONE, Decimal::ONE, Some(Decimal::ONE)).unwrap();
//!
//! assert_eq!(book.settled().len(), 2);
//! assert_eq!(book.order(bid).unwrap().amount, Decimal::ONE);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error type shared by every module
pub mod error;

/// Core data types: Order, OrderType, Fill, BookSnapshot
pub mod types;

/// Order book: queues, settled log, order entry
pub mod orderbook;

/// Matching engine: clearing loop and market order matching
pub mod engine;

/// Layered settings
pub mod settings;

/// Tracing subscriber setup
pub mod logging;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::{IndivisiblePolicy, OrderDivision};
pub use error::{OrderBookError, Result};
pub use orderbook::{CurvePoint, OrderBook};
pub use settings::Settings;
pub use types::{BookSnapshot, Fill, Order, OrderRequest, OrderType, Side, Units};
