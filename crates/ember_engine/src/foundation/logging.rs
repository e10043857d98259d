//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter string
///
/// Used when the filter comes from an [`EngineConfig`](crate::config::EngineConfig)
/// rather than the `RUST_LOG` environment variable.
pub fn init_with_filter(filter: &str) {
    env_logger::Builder::new().parse_filters(filter).init();
}
