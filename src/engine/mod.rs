//! Matching engine for the transactive order book.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same submission sequence always produces the same fills
//! 2. **Exact Math**: Decimal quantities, so every fill conserves quantity
//! 3. **Synchronous Execution**: Each operation runs to a fixed point before returning
//! 4. **Price-Time Priority**: Best price first, then submission order
//!
//! ## Matching Rules
//!
//! - **Limit orders** rest in their queue; [`crate::OrderBook::clear`] fills crossing pairs
//! - **Sell market orders** match against bids (highest price first)
//! - **Buy market orders** match against asks (lowest price first)
//! - **Indivisible orders** are only filled completely in one increment,
//!   subject to [`IndivisiblePolicy`]
//! - **Durations** are carried but never compared
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use transactive_orderbook::OrderBook;
//!
//! let mut book = OrderBook::default();
//! book.ask(Decimal::from(3), Decimal::ONE, Some(Decimal::from(20))).unwrap();
//!
//! let buy = book.bid(Decimal::from(2), Decimal::ONE, None).unwrap();
//! let buy = book.order(buy).unwrap();
//!
//! assert!(buy.is_filled());
//! assert_eq!(buy.value, Decimal::from(-40));
//! ```

pub mod clearing;
pub mod divide;
pub mod market;

pub use clearing::IndivisiblePolicy;
pub use divide::OrderDivision;
