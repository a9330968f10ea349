//! Logging setup

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "food_catalog=info,tower_http=info";

pub struct Logger;

impl Logger {
    /// Installs the global subscriber, honouring `RUST_LOG` when set.
    pub fn init() {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
