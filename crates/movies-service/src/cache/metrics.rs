//! Cache metrics.
//!
//! Counters are labelled with the memoized operation's name. Without an
//! installed recorder they are no-ops.

use metrics::{counter, describe_counter};

/// Metric names for the cache layer.
pub mod names {
    /// Reads served from the cache.
    pub const CACHE_HITS_TOTAL: &str = "movies_cache_hits_total";
    /// Reads that fell through to the wrapped operation.
    pub const CACHE_MISSES_TOTAL: &str = "movies_cache_misses_total";
    /// Failed cache reads, writes and key derivations.
    pub const CACHE_ERRORS_TOTAL: &str = "movies_cache_errors_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of cache hits");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Total number of cache misses");
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Total number of cache failures degraded to a miss or a skipped write"
    );
}

/// Cache metrics recorder.
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache hit.
    pub fn hit(operation: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a cache miss.
    pub fn miss(operation: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a cache failure.
    pub fn error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics() {
        register_metrics();
    }

    #[test]
    fn test_record_without_recorder() {
        CacheMetrics::hit("construct_sort_query");
        CacheMetrics::miss("construct_sort_query");
        CacheMetrics::error("construct_sort_query");
    }
}
