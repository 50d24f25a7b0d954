//! Tracing/logging setup shared by binaries and test harnesses.

/// Initialize process-wide observability with the default filter.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init("info");
}

/// Tracing configuration (filters, output format).
pub mod tracing;
