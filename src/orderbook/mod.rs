//! Order book module for the transactive market.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: every submitted order lives in one arena
//! - **Sorted queues**: bids and asks as vectors of arena keys in priority order
//! - **Price-time priority**: stable insertion keeps equal prices in arrival order
//! - **Settled log**: fully filled orders, appended as they complete
//!
//! The clearing and market matching algorithms live in
//! [`crate::engine`] as further `impl OrderBook` blocks.
//!
//! ## Components
//!
//! - [`OrderBook`]: queues, logs, order entry and snapshots
//! - [`CurvePoint`]: cumulative supply/demand step data
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use transactive_orderbook::orderbook::OrderBook;
//!
//! let mut book = OrderBook::new("MW", "h", "$", None);
//! book.bid(Decimal::from(2), Decimal::ONE, Some(Decimal::from(50))).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(Decimal::from(50)));
//! ```

pub mod book;
pub mod curve;

pub use book::OrderBook;
pub use curve::CurvePoint;
