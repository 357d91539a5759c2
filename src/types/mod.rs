//! Core data types for the transactive order book
//!
//! ## Types
//!
//! - [`Order`]: A limit or market order for a quantity over a duration
//! - [`OrderType`]: Closed order type tag with side/kind predicates
//! - [`Side`]: Buy or Sell
//! - [`OrderRequest`]: Keyed, fixed-schema construction record
//! - [`Fill`]: One matching increment between a bid and an ask
//! - [`BookSnapshot`]: Read-only view of a book for external consumers
//! - [`Units`], [`BookId`]: Market units and book identity
//!
//! ## Numbers
//!
//! Quantities, prices, durations and values are `rust_decimal::Decimal`, so
//! fills conserve quantity exactly.

mod fill;
mod market;
mod order;
mod request;
mod snapshot;

pub use fill::Fill;
pub use market::{BookId, Units};
pub use order::{Order, OrderType, OrderView, Side};
pub use request::OrderRequest;
pub use snapshot::BookSnapshot;
