//! Market identity and display units.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_BOOK_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle identifying one order book instance.
///
/// Orders keep a `BookId` instead of a reference to the book they were
/// submitted to; units are resolved by presenting the book itself (see
/// [`Order::units`](crate::types::Order::units)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(u64);

impl BookId {
    /// Allocate a fresh, process-unique book identity.
    pub fn next() -> Self {
        BookId(NEXT_BOOK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the handle
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Units a market is quoted in.
///
/// The price unit defaults to `"<currency>/<unit>.<time_unit>"`, e.g. `$/MW.h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    /// Quantity unit (e.g. `MW`)
    pub unit: String,
    /// Time unit of durations (e.g. `h`)
    pub time_unit: String,
    /// Currency unit (e.g. `$`)
    pub currency: String,
    /// Price unit
    pub price_unit: String,
}

impl Units {
    /// Build a unit set, composing the price unit when none is given.
    pub fn new(
        unit: impl Into<String>,
        time_unit: impl Into<String>,
        currency: impl Into<String>,
        price_unit: Option<&str>,
    ) -> Self {
        let unit = unit.into();
        let time_unit = time_unit.into();
        let currency = currency.into();
        let price_unit = match price_unit {
            Some(p) => p.to_string(),
            None => format!("{}/{}.{}", currency, unit, time_unit),
        };
        Self {
            unit,
            time_unit,
            currency,
            price_unit,
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::new("MW", "h", "$", None)
    }
}
