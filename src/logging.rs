//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::settings::LogSettings;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter comes from the verbosity
/// gates in `settings`. Returns `false` if a subscriber was already installed.
pub fn init(settings: &LogSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
