//! Slow resource detection.

use crate::metrics::load_time;
use crate::timing::ResourceRecord;

/// Default threshold: 10 seconds.
pub const DEFAULT_TIMEOUT_MS: f64 = 10.0 * 1000.0;

/// Names of resources whose load took at least `threshold_ms`.
///
/// The boundary is inclusive. Output keeps the input order and keeps
/// duplicate names.
pub fn detect_timeouts(resources: &[ResourceRecord], threshold_ms: f64) -> Vec<String> {
    resources
        .iter()
        .filter(|r| load_time(r) >= threshold_ms)
        .map(|r| r.name.clone())
        .collect()
}
