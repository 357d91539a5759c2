//! Order book: storage, queues and submission.
//!
//! ## Architecture
//!
//! - **Slab**: arena holding every order ever submitted to the book
//! - **HashMap**: order ID to slab key mapping for lookups
//! - **Vec queues**: slab keys of pending bids and asks in priority order
//! - **Settled log**: slab keys of fully filled orders, in settlement order
//!
//! ## Price Ordering
//!
//! - **Bids** (buy orders): high-to-low, equal prices in submission order
//! - **Asks** (sell orders): low-to-high, equal prices in submission order
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use transactive_orderbook::OrderBook;
//!
//! let mut book = OrderBook::default();
//! let bid = book.bid(Decimal::ONE, Decimal::ONE, Some(Decimal::ONE)).unwrap();
//! let ask = book.ask(Decimal::ONE, Decimal::ONE, Some(Decimal::ONE)).unwrap();
//!
//! assert_eq!(book.pending_bids().len(), 0);
//! assert_eq!(book.pending_asks().len(), 0);
//! assert_eq!(book.order(bid).unwrap().value, -Decimal::ONE);
//! assert_eq!(book.order(ask).unwrap().value, Decimal::ONE);
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use slab::Slab;
use tracing::{debug, info, warn};

use crate::engine::IndivisiblePolicy;
use crate::error::{OrderBookError, Result};
use crate::settings::MarketSettings;
use crate::types::{BookId, BookSnapshot, Fill, Order, OrderType, OrderView, Side, Units};

/// Continuous order book for one market session.
#[derive(Debug)]
pub struct OrderBook {
    /// Identity handed to submitted orders
    pub(crate) id: BookId,

    pub(crate) units: Units,

    /// Clearing rule for indivisible bids
    pub(crate) policy: IndivisiblePolicy,

    /// Every submitted order
    pub(crate) orders: Slab<Order>,

    /// Order ID to slab key mapping
    pub(crate) order_index: HashMap<u64, usize>,

    /// Pending buy limit orders, best first
    pub(crate) bids: Vec<usize>,

    /// Pending sell limit orders, best first
    pub(crate) asks: Vec<usize>,

    /// Fully filled orders
    pub(crate) settled: Vec<usize>,

    pub(crate) fills: Vec<Fill>,

    next_order_id: u64,

    next_fill_id: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::with_units(Units::default())
    }
}

impl OrderBook {
    /// Create a book quoted in the given units.
    ///
    /// When `price` is `None` the price unit is `"<currency>/<unit>.<time_unit>"`.
    pub fn new(
        unit: impl Into<String>,
        time_unit: impl Into<String>,
        currency: impl Into<String>,
        price: Option<&str>,
    ) -> Self {
        Self::with_units(Units::new(unit, time_unit, currency, price))
    }

    pub fn with_units(units: Units) -> Self {
        debug!(price_unit = %units.price_unit, "orderbook initialized");
        Self {
            id: BookId::next(),
            units,
            policy: IndivisiblePolicy::default(),
            orders: Slab::new(),
            order_index: HashMap::new(),
            bids: Vec::new(),
            asks: Vec::new(),
            settled: Vec::new(),
            fills: Vec::new(),
            next_order_id: 1,
            next_fill_id: 1,
        }
    }

    /// Create a book from loaded settings
    pub fn from_settings(settings: &MarketSettings) -> Self {
        Self::new(
            settings.unit.as_str(),
            settings.time_unit.as_str(),
            settings.currency.as_str(),
            settings.price_unit.as_deref(),
        )
        .with_policy(settings.indivisible)
    }

    /// Select the indivisible-bid clearing policy
    pub fn with_policy(mut self, policy: IndivisiblePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> IndivisiblePolicy {
        self.policy
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    // ========================================================================
    // Units
    // ========================================================================

    pub fn quantity_unit(&self) -> &str {
        &self.units.unit
    }

    pub fn time_unit(&self) -> &str {
        &self.units.time_unit
    }

    pub fn currency_unit(&self) -> &str {
        &self.units.currency
    }

    pub fn price_unit(&self) -> &str {
        &self.units.price_unit
    }

    // ========================================================================
    // Queues and logs
    // ========================================================================

    /// Settled orders in settlement order
    pub fn settled(&self) -> impl ExactSizeIterator<Item = &Order> + '_ {
        self.settled.iter().map(move |key| &self.orders[*key])
    }

    /// Pending buy limit orders, best (highest price) first
    pub fn pending_bids(&self) -> impl ExactSizeIterator<Item = &Order> + '_ {
        self.bids.iter().map(move |key| &self.orders[*key])
    }

    /// Pending sell limit orders, best (lowest price) first
    pub fn pending_asks(&self) -> impl ExactSizeIterator<Item = &Order> + '_ {
        self.asks.iter().map(move |key| &self.orders[*key])
    }

    /// Fill log in execution order
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Look up any order submitted to this book
    pub fn order(&self, id: u64) -> Option<&Order> {
        self.order_index
            .get(&id)
            .and_then(|key| self.orders.get(*key))
    }

    /// Render an order with this book's units
    pub fn describe(&self, id: u64) -> Option<OrderView<'_>> {
        let order = self.order(id)?;
        Some(order.display(order.units(self.id, &self.units)))
    }

    /// Get the total number of orders held (pending, settled or cancelled)
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Best (highest) bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|key| self.price_of(*key))
    }

    /// Best (lowest) ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|key| self.price_of(*key))
    }

    // ========================================================================
    // Order entry
    // ========================================================================

    /// Submit an order to the market.
    ///
    /// Limit orders are queued and the book is cleared; market orders are
    /// matched immediately against the opposite side. Returns the order id;
    /// inspect the outcome with [`OrderBook::order`]. A market order that
    /// cannot be filled comes back with type [`OrderType::Cancel`].
    ///
    /// # Errors
    ///
    /// Rejected before the order is stored:
    ///
    /// - [`OrderBookError::InvalidOrderType`] for a `Cancel` order
    /// - [`OrderBookError::MissingRequiredField`] for a limit order without price
    /// - [`OrderBookError::InvalidQuantity`] for a zero or negative quantity
    /// - [`OrderBookError::DuplicateOrderId`] for an id already in the book
    /// - [`OrderBookError::InvalidOrderId`] for `u64::MAX`
    ///
    /// Raised while matching, after the order is stored:
    ///
    /// - [`OrderBookError::FillOverflow`] when a fill increment does not fit in
    ///   a `Decimal`; fills up to that point stand and the book stays consistent
    pub fn submit(&mut self, mut order: Order) -> Result<u64> {
        if order.is_cancel() {
            warn!(order = %order, "cannot submit a cancelled order");
            return Err(OrderBookError::InvalidOrderType(order.order_type.to_string()));
        }
        if order.is_limit() && order.price.is_none() {
            return Err(OrderBookError::MissingRequiredField("price"));
        }
        if order.quantity <= Decimal::ZERO {
            warn!(order = %order, "cannot submit an order without quantity");
            return Err(OrderBookError::InvalidQuantity(order.quantity));
        }

        let order_id = if order.id == 0 { self.next_order_id } else { order.id };
        if order.id != 0 && self.order_index.contains_key(&order_id) {
            return Err(OrderBookError::DuplicateOrderId(order_id));
        }
        let next_order_id = order_id
            .checked_add(1)
            .ok_or(OrderBookError::InvalidOrderId(order_id))?;
        self.next_order_id = self.next_order_id.max(next_order_id);

        order.id = order_id;
        order.bind_market(self.id);
        let order_type = order.order_type;

        let key = self.orders.insert(order);
        self.order_index.insert(order_id, key);

        match order_type {
            OrderType::BuyLimit | OrderType::SellLimit => {
                self.insert_pending(key);
                info!(order = %self.orders[key].display(Some(&self.units)), "order submitted");
                self.clear()?;
            }
            OrderType::SellMarket => self.find_buy(key)?,
            OrderType::BuyMarket => self.find_sell(key)?,
            OrderType::Cancel => {
                return Err(OrderBookError::InvalidOrderType(order_type.to_string()))
            }
        }

        Ok(order_id)
    }

    /// Place a sell order: market when `price` is `None`, limit otherwise.
    pub fn ask(&mut self, quantity: Decimal, duration: Decimal, price: Option<Decimal>) -> Result<u64> {
        self.submit(Self::side_order(Side::Sell, quantity, duration, price))
    }

    /// Place a buy order: market when `price` is `None`, limit otherwise.
    pub fn bid(&mut self, quantity: Decimal, duration: Decimal, price: Option<Decimal>) -> Result<u64> {
        self.submit(Self::side_order(Side::Buy, quantity, duration, price))
    }

    fn side_order(side: Side, quantity: Decimal, duration: Decimal, price: Option<Decimal>) -> Order {
        match price {
            None => Order::new(OrderType::market(side), quantity, duration),
            Some(price) => Order::new(OrderType::limit(side), quantity, duration).with_price(price),
        }
    }

    /// Withdraw a pending limit order.
    ///
    /// The order leaves its queue and is marked [`OrderType::Cancel`].
    /// Returns `None` if the id is unknown or the order is not pending.
    pub fn cancel(&mut self, id: u64) -> Option<&Order> {
        let key = *self.order_index.get(&id)?;
        let queue = if self.orders[key].is_buy() {
            &mut self.bids
        } else {
            &mut self.asks
        };
        let position = queue.iter().position(|k| *k == key)?;
        queue.remove(position);

        self.orders[key].set_cancel();
        info!(order_id = id, "order cancelled");
        Some(&self.orders[key])
    }

    /// Reset the market to an empty session, keeping the units.
    ///
    /// Order ids keep increasing across resets.
    pub fn reset(&mut self) {
        self.orders.clear();
        self.order_index.clear();
        self.bids.clear();
        self.asks.clear();
        self.settled.clear();
        self.fills.clear();
        info!(book = self.id.get(), "orderbook reset");
    }

    /// Read-only structural view for serializers and visualizers
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.pending_bids().cloned().collect(),
            asks: self.pending_asks().cloned().collect(),
            unit: self.units.unit.clone(),
            time_unit: self.units.time_unit.clone(),
            currency: self.units.currency.clone(),
            price_unit: self.units.price_unit.clone(),
            settled: self.settled().cloned().collect(),
        }
    }

    // ========================================================================
    // Engine helpers
    // ========================================================================

    /// Price of a queued order.
    ///
    /// Queued orders are limit orders, which always carry a price.
    #[inline]
    pub(crate) fn price_of(&self, key: usize) -> Decimal {
        self.orders[key].price.unwrap_or_default()
    }

    /// Insert a limit order into its queue after every order of equal or
    /// better price.
    fn insert_pending(&mut self, key: usize) {
        let order = &self.orders[key];
        let price = order.price;
        if order.is_buy() {
            let position = self.bids.partition_point(|k| self.orders[*k].price >= price);
            self.bids.insert(position, key);
        } else {
            let position = self.asks.partition_point(|k| self.orders[*k].price <= price);
            self.asks.insert(position, key);
        }
    }

    /// Book one fill increment of `trade` between two orders.
    ///
    /// `debit` loses `debit_price * trade` of value, `credit` gains
    /// `credit_price * trade`, and both move `trade` from quantity to amount.
    /// Both new states are computed before either order is written, so an
    /// overflow leaves the two orders untouched.
    pub(crate) fn fill_pair(
        &mut self,
        debit: usize,
        debit_price: Decimal,
        credit: usize,
        credit_price: Decimal,
        trade: Decimal,
    ) -> Result<()> {
        let debited = debit_price
            .checked_mul(trade)
            .and_then(|value| self.orders[debit].checked_fill(trade, -value));
        let credited = credit_price
            .checked_mul(trade)
            .and_then(|value| self.orders[credit].checked_fill(trade, value));

        match (debited, credited) {
            (Some(debited), Some(credited)) => {
                self.orders[debit] = debited;
                self.orders[credit] = credited;
                Ok(())
            }
            _ => {
                let (order_id, counterparty_id) = (self.orders[debit].id, self.orders[credit].id);
                warn!(order_id, counterparty_id, %trade, "fill overflows, matching stopped");
                Err(OrderBookError::FillOverflow {
                    order_id,
                    counterparty_id,
                })
            }
        }
    }

    pub(crate) fn record_fill(&mut self, bid_order_id: u64, ask_order_id: u64, price: Decimal, quantity: Decimal) {
        let fill = Fill::new(self.next_fill_id, bid_order_id, ask_order_id, price, quantity);
        self.next_fill_id += 1;
        self.fills.push(fill);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
