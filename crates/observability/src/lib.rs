//! Log setup for the `shopfront` binary.

pub mod tracing;

pub use self::tracing::{LogConfig, LogFormat};

/// Install the global subscriber from `RUST_LOG` and `SHOPFRONT_LOG_FORMAT`.
/// `verbose` raises the default filter to `debug`. Later calls are no-ops.
pub fn init(verbose: bool) {
    tracing::init(LogConfig::from_env().verbose(verbose));
}
