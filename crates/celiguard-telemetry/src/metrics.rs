//! Metrics collection and reporting

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for celiguard service monitoring
#[derive(Clone)]
pub struct ServiceMetrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    risk_requests: AtomicU64,
    scan_requests: AtomicU64,
    encoder_fallbacks: AtomicU64,
    gluten_verdicts: AtomicU64,
    request_failures: AtomicU64,
}

impl ServiceMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                risk_requests: AtomicU64::new(0),
                scan_requests: AtomicU64::new(0),
                encoder_fallbacks: AtomicU64::new(0),
                gluten_verdicts: AtomicU64::new(0),
                request_failures: AtomicU64::new(0),
            }),
        }
    }

    /// Record a risk scoring request
    pub fn record_risk_request(&self) {
        self.inner.risk_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an ingredient scan request
    pub fn record_scan_request(&self) {
        self.inner.scan_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an unseen-category fallback substitution
    pub fn record_encoder_fallback(&self) {
        self.inner.encoder_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a gluten-positive scan verdict
    pub fn record_gluten_verdict(&self) {
        self.inner.gluten_verdicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        self.inner.request_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> ServiceMetricsSnapshot {
        ServiceMetricsSnapshot {
            risk_requests: self.inner.risk_requests.load(Ordering::Relaxed),
            scan_requests: self.inner.scan_requests.load(Ordering::Relaxed),
            encoder_fallbacks: self.inner.encoder_fallbacks.load(Ordering::Relaxed),
            gluten_verdicts: self.inner.gluten_verdicts.load(Ordering::Relaxed),
            request_failures: self.inner.request_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone)]
pub struct ServiceMetricsSnapshot {
    pub risk_requests: u64,
    pub scan_requests: u64,
    pub encoder_fallbacks: u64,
    pub gluten_verdicts: u64,
    pub request_failures: u64,
}

impl ServiceMetricsSnapshot {
    /// Fallback substitutions per risk request; a rising value means live
    /// traffic is drifting away from the training vocabulary
    pub fn fallback_rate(&self) -> f64 {
        if self.risk_requests == 0 {
            0.0
        } else {
            self.encoder_fallbacks as f64 / self.risk_requests as f64
        }
    }

    /// Share of scans that flagged gluten
    pub fn gluten_rate(&self) -> f64 {
        if self.scan_requests == 0 {
            0.0
        } else {
            self.gluten_verdicts as f64 / self.scan_requests as f64
        }
    }
}
