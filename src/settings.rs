//! Layered settings.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults (`MW`, `h`, `$`, warnings on, debug off)
//! 2. an optional `orderbook.toml` file
//! 3. `ORDERBOOK__*` environment variables, e.g. `ORDERBOOK__LOG__DEBUG=true`
//!    or `ORDERBOOK__MARKET__INDIVISIBLE=aggregate`

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::engine::IndivisiblePolicy;
use crate::error::Result;

/// Default settings file name, without extension
pub const DEFAULT_FILE: &str = "orderbook";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ORDERBOOK";

/// Root settings
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: LogSettings,
    pub market: MarketSettings,
}

/// Verbosity gates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Emit warnings (cancelled market orders, rejected submissions)
    pub warning: bool,
    /// Emit per-fill debug traces
    pub debug: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            warning: true,
            debug: false,
        }
    }
}

impl LogSettings {
    /// `tracing_subscriber::EnvFilter` directive for these gates
    pub fn directive(&self) -> &'static str {
        if self.debug {
            "transactive_orderbook=debug"
        } else if self.warning {
            "transactive_orderbook=warn"
        } else {
            "transactive_orderbook=error"
        }
    }
}

/// Units and clearing policy of a new book
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    pub unit: String,
    pub time_unit: String,
    pub currency: String,
    /// Composed from the other units when absent
    pub price_unit: Option<String>,
    pub indivisible: IndivisiblePolicy,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            unit: "MW".to_string(),
            time_unit: "h".to_string(),
            currency: "$".to_string(),
            price_unit: None,
            indivisible: IndivisiblePolicy::default(),
        }
    }
}

impl Settings {
    /// Load from `orderbook.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_FILE)
    }

    /// Load from the named file (if present) and the environment
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
