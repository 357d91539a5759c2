//! Read-only structural view of an order book.
//!
//! The snapshot is what external serializers and visualizers consume. Its
//! field set is fixed: `bids`, `asks`, `unit`, `timeUnit`, `currency`,
//! `priceUnit` and `settled`.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::types::Order;

/// Point-in-time copy of a book's queues, settled log and units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSnapshot {
    /// Pending bids, best first
    pub bids: Vec<Order>,
    /// Pending asks, best first
    pub asks: Vec<Order>,
    pub unit: String,
    pub time_unit: String,
    pub currency: String,
    pub price_unit: String,
    /// Settled orders in settlement order
    pub settled: Vec<Order>,
}

impl BookSnapshot {
    /// Encode as compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// SHA-256 over the JSON encoding.
    ///
    /// Identical book states always yield identical digests.
    pub fn digest(&self) -> Result<[u8; 32]> {
        let bytes = serde_json::to_vec(self)?;
        Ok(Self::compute_hash(&bytes))
    }

    /// Digest as a hex string
    pub fn digest_hex(&self) -> Result<String> {
        Ok(hex::encode(self.digest()?))
    }

    /// Compute SHA-256 hash of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Check if the book held no orders at all
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty() && self.settled.is_empty()
    }
}
