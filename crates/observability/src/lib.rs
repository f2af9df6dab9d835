//! Tracing and logging setup shared by the stockroom binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat, default_filter: &str) {
    self::tracing::init(format, default_filter);
}
