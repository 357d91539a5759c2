//! Order types for the transactive order book.
//!
//! ## Order Types
//!
//! Every order carries one of five closed tags. Market and limit orders exist
//! for both sides; `Cancel` marks an order that was withdrawn or that could
//! not be filled from the available depth.
//!
//! ## Priority
//!
//! Orders on the same side are ranked by price: bids high-to-low, asks
//! low-to-high. Ranking a bid against an ask is meaningless and reported as
//! [`OrderBookError::InvalidComparison`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{OrderBookError, Result};
use crate::types::market::{BookId, Units};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Buy order (bid) - wants to consume the resource
    #[default]
    Buy,
    /// Sell order (ask) - wants to supply the resource
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// Order type tag
///
/// Serialized and parsed as the upper-case tags `CANCEL`, `BUYMARKET`,
/// `SELLMARKET`, `BUYLIMIT` and `SELLLIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Withdrawn, or rejected for lack of depth
    Cancel,
    /// Buy immediately at the best available asks
    BuyMarket,
    /// Sell immediately at the best available bids
    SellMarket,
    /// Standing offer to buy at or below a price
    BuyLimit,
    /// Standing offer to sell at or above a price
    SellLimit,
}

impl OrderType {
    /// Market order for the given side
    pub fn market(side: Side) -> Self {
        match side {
            Side::Buy => OrderType::BuyMarket,
            Side::Sell => OrderType::SellMarket,
        }
    }

    /// Limit order for the given side
    pub fn limit(side: Side) -> Self {
        match side {
            Side::Buy => OrderType::BuyLimit,
            Side::Sell => OrderType::SellLimit,
        }
    }

    pub fn is_cancel(self) -> bool {
        matches!(self, OrderType::Cancel)
    }

    pub fn is_market(self) -> bool {
        matches!(self, OrderType::BuyMarket | OrderType::SellMarket)
    }

    pub fn is_limit(self) -> bool {
        matches!(self, OrderType::BuyLimit | OrderType::SellLimit)
    }

    pub fn is_buy(self) -> bool {
        matches!(self, OrderType::BuyMarket | OrderType::BuyLimit)
    }

    pub fn is_sell(self) -> bool {
        matches!(self, OrderType::SellMarket | OrderType::SellLimit)
    }

    /// Side of the order, `None` for `Cancel`
    pub fn side(self) -> Option<Side> {
        if self.is_buy() {
            Some(Side::Buy)
        } else if self.is_sell() {
            Some(Side::Sell)
        } else {
            None
        }
    }

    /// Upper-case tag
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Cancel => "CANCEL",
            OrderType::BuyMarket => "BUYMARKET",
            OrderType::SellMarket => "SELLMARKET",
            OrderType::BuyLimit => "BUYLIMIT",
            OrderType::SellLimit => "SELLLIMIT",
        }
    }
}

impl FromStr for OrderType {
    type Err = OrderBookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CANCEL" => Ok(OrderType::Cancel),
            "BUYMARKET" => Ok(OrderType::BuyMarket),
            "SELLMARKET" => Ok(OrderType::SellMarket),
            "BUYLIMIT" => Ok(OrderType::BuyLimit),
            "SELLLIMIT" => Ok(OrderType::SellLimit),
            other => Err(OrderBookError::InvalidOrderType(other.to_string())),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// An order for a quantity of resource over a duration.
///
/// ## Fields
///
/// `quantity` is what remains to be filled. `amount` and `value` accumulate
/// over fills: `amount` is the filled quantity, `value` the signed monetary
/// total. Only the order book mutates these once the order is submitted.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use transactive_orderbook::types::{Order, OrderType};
///
/// let order = Order::new(OrderType::BuyLimit, Decimal::from(2), Decimal::ONE)
///     .with_price(Decimal::from(5));
///
/// assert!(!order.divisible); // buy orders default to indivisible
/// assert_eq!(order.price, Some(Decimal::from(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Order identifier, assigned by the book on submission (0 = unassigned)
    pub id: u64,

    /// Order type tag
    pub order_type: OrderType,

    /// Remaining quantity
    pub quantity: Decimal,

    /// Limit price, or the clearing price of the last fill of a market order
    pub price: Option<Decimal>,

    /// Eligibility duration (carried as metadata)
    pub duration: Decimal,

    /// Whether the order may be filled in several increments
    pub divisible: bool,

    /// Cumulative filled quantity
    pub amount: Decimal,

    /// Cumulative signed monetary value of the fills
    pub value: Decimal,

    #[serde(skip)]
    market: Option<BookId>,
}

impl Order {
    /// Create an order with the divisibility default for its type.
    ///
    /// Buy orders default to indivisible, everything else to divisible.
    pub fn new(order_type: OrderType, quantity: Decimal, duration: Decimal) -> Self {
        Self {
            id: 0,
            order_type,
            quantity,
            price: None,
            duration,
            divisible: !order_type.is_buy(),
            amount: Decimal::ZERO,
            value: Decimal::ZERO,
            market: None,
        }
    }

    /// Set the limit price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Override the divisibility default
    pub fn with_divisible(mut self, divisible: bool) -> Self {
        self.divisible = divisible;
        self
    }

    pub fn is_cancel(&self) -> bool {
        self.order_type.is_cancel()
    }

    pub fn is_market(&self) -> bool {
        self.order_type.is_market()
    }

    pub fn is_limit(&self) -> bool {
        self.order_type.is_limit()
    }

    pub fn is_buy(&self) -> bool {
        self.order_type.is_buy()
    }

    pub fn is_sell(&self) -> bool {
        self.order_type.is_sell()
    }

    /// Check if nothing remains to be filled
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    pub fn set_cancel(&mut self) {
        self.order_type = OrderType::Cancel;
    }

    pub fn set_price(&mut self, price: Decimal) {
        self.price = Some(price);
    }

    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
    }

    pub fn add_quantity(&mut self, delta: Decimal) {
        self.quantity += delta;
    }

    pub fn add_amount(&mut self, delta: Decimal) {
        self.amount += delta;
    }

    pub fn add_value(&mut self, delta: Decimal) {
        self.value += delta;
    }

    /// State of the order after one fill increment: `trade` moves from
    /// quantity to amount and `value_delta` is booked against the value.
    ///
    /// Returns `None` if any field overflows; `self` is never modified.
    pub(crate) fn checked_fill(&self, trade: Decimal, value_delta: Decimal) -> Option<Order> {
        Some(Order {
            quantity: self.quantity.checked_sub(trade)?,
            amount: self.amount.checked_add(trade)?,
            value: self.value.checked_add(value_delta)?,
            ..self.clone()
        })
    }

    /// Book this order was submitted to
    pub fn market(&self) -> Option<BookId> {
        self.market
    }

    pub(crate) fn bind_market(&mut self, market: BookId) {
        self.market = Some(market);
    }

    /// Resolve display units through the book the order belongs to.
    ///
    /// Returns `None` when the order is unbound or `units` come from another
    /// book.
    pub fn units<'a>(&self, market: BookId, units: &'a Units) -> Option<&'a Units> {
        match self.market {
            Some(id) if id == market => Some(units),
            _ => None,
        }
    }

    /// Compare priority with another order on the same side.
    ///
    /// `Ordering::Less` means `self` ranks ahead of `other`. Bids rank by
    /// descending price, asks by ascending price.
    ///
    /// # Errors
    ///
    /// [`OrderBookError::InvalidComparison`] when the orders are not on the
    /// same side.
    pub fn priority_cmp(&self, other: &Order) -> Result<Ordering> {
        let (left, right) = (self.order_type, other.order_type);
        if left.is_buy() && right.is_buy() {
            Ok(other.price.cmp(&self.price))
        } else if left.is_sell() && right.is_sell() {
            Ok(self.price.cmp(&other.price))
        } else {
            Err(OrderBookError::InvalidComparison { left, right })
        }
    }

    /// Render the order with optional market units.
    pub fn display<'a>(&'a self, units: Option<&'a Units>) -> OrderView<'a> {
        OrderView { order: self, units }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(None).fmt(f)
    }
}

/// Human-readable rendering of an order, e.g.
/// `<order:3 BUYLIMIT INDIVISIBLE 2MW at 5$/MW.h for 1h>`.
pub struct OrderView<'a> {
    order: &'a Order,
    units: Option<&'a Units>,
}

impl fmt::Display for OrderView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order;
        let (unit, time, currency, price_unit) = match self.units {
            Some(u) => (
                u.unit.as_str(),
                u.time_unit.as_str(),
                u.currency.as_str(),
                u.price_unit.as_str(),
            ),
            None => ("", "", "", ""),
        };

        write!(f, "<order:{} {}", order.id, order.order_type)?;
        if order.quantity > Decimal::ZERO {
            if !order.divisible {
                f.write_str(" INDIVISIBLE")?;
            }
            let quantity = order.quantity.normalize();
            let duration = order.duration.normalize();
            match order.price {
                None => write!(f, " {quantity}{unit} for {duration}{time}")?,
                Some(price) => write!(
                    f,
                    " {quantity}{unit} at {}{price_unit} for {duration}{time}",
                    price.normalize()
                )?,
            }
        }
        if !order.amount.is_zero() {
            write!(
                f,
                " FILLED {}{unit}{time} for {}{currency}",
                order.amount.normalize(),
                order.value.normalize()
            )?;
        }
        f.write_str(">")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
