//! Running metrics for the synthesis engine.

use serde::Serialize;

/// Smoothing constant for the processing-time moving average.
///
/// `new_avg = old_avg * EMA_DECAY + latency * (1 - EMA_DECAY)`; no
/// windowing, history influence decays geometrically.
const EMA_DECAY: f64 = 0.9;

/// Mutable counters, kept behind the engine's mutex.
///
/// Updated only while the lock is held; a multi-threaded runtime may
/// interleave syntheses freely.
#[derive(Debug, Default)]
pub(crate) struct EngineMetrics {
    total_syntheses: u64,
    failed_syntheses: u64,
    avg_processing_time_ms: f64,
}

impl EngineMetrics {
    pub(crate) fn record_success(&mut self, latency_ms: f64) {
        self.total_syntheses += 1;
        self.avg_processing_time_ms =
            self.avg_processing_time_ms * EMA_DECAY + latency_ms * (1.0 - EMA_DECAY);
    }

    pub(crate) fn record_failure(&mut self) {
        self.failed_syntheses += 1;
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        let attempts = self.total_syntheses + self.failed_syntheses;
        let success_rate = if attempts == 0 {
            1.0
        } else {
            self.total_syntheses as f64 / attempts as f64
        };
        MetricsSnapshot {
            total_syntheses: self.total_syntheses,
            failed_syntheses: self.failed_syntheses,
            success_rate,
            avg_processing_time_ms: self.avg_processing_time_ms,
        }
    }
}

/// Point-in-time copy of the engine's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Successful syntheses since construction.
    pub total_syntheses: u64,
    /// Executor failures since construction.
    pub failed_syntheses: u64,
    /// Successes over total attempts; 1.0 while idle.
    pub success_rate: f64,
    /// Exponential moving average of executor latency.
    pub avg_processing_time_ms: f64,
}
