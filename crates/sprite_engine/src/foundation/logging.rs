//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Call once from the host before engine construction. Respects the
/// `RUST_LOG` environment variable.
pub fn init() {
    env_logger::init();
}
