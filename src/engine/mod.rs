//! Risk-tiered policy synthesis dispatcher.

pub mod error;
pub mod metrics;
pub mod strategy;
pub mod tiers;
pub mod types;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::time::sleep;
use uuid::Uuid;

use crate::audit::{AuditSink, NoopAuditSink, SynthesisRecord};
use metrics::EngineMetrics;
use tiers::executor_for;

pub use error::SynthesisError;
pub use metrics::MetricsSnapshot;
pub use strategy::RiskStrategy;
pub use tiers::{TierExecutor, CONSENSUS_AGREEMENT};
pub use types::{SynthesisRequest, SynthesisResult, TierOutcome, UNTITLED};

/// Hash of the governance ruleset policies are synthesized against.
pub const DEFAULT_CONSTITUTIONAL_HASH: &str = "cdd01ef066bc6cf2";

/// Scale for the engine's simulated latencies.
///
/// The built-in executors perform no real model or reviewer round-trips;
/// each tier suspends for `base_unit * tier_factor` in their place. Set a
/// zero base unit to run without delays (tests do).
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    /// One simulated time unit.
    pub base_unit: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            base_unit: Duration::from_secs(1),
        }
    }
}

impl SimulatedLatency {
    /// No delays at all.
    pub fn zero() -> Self {
        Self {
            base_unit: Duration::ZERO,
        }
    }

    /// Delay for a tier executor.
    pub fn for_strategy(&self, strategy: RiskStrategy) -> Duration {
        self.base_unit.mul_f64(strategy.latency_factor())
    }

    /// Delay for one initializer stub.
    pub fn init_stub(&self) -> Duration {
        self.base_unit.mul_f64(0.1)
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub simulated_latency: SimulatedLatency,
    /// Hash identifying the constitution artifacts are synthesized against.
    pub constitutional_hash: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulated_latency: SimulatedLatency::default(),
            constitutional_hash: DEFAULT_CONSTITUTIONAL_HASH.to_string(),
        }
    }
}

/// The synthesis engine: strategy dispatch, metrics, and audit recording.
///
/// An explicit dependency: construct one at startup and hand it to callers
/// (tests build their own with `SimulatedLatency::zero()`). There is no
/// process-global instance.
pub struct SynthesisEngine {
    config: EngineConfig,
    metrics: Mutex<EngineMetrics>,
    init: tokio::sync::Mutex<bool>,
    audit_sink: Arc<dyn AuditSink>,
}

impl SynthesisEngine {
    /// Engine with the given config and no audit recording.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_audit_sink(config, Arc::new(NoopAuditSink))
    }

    /// Engine that records every dispatch to `audit_sink`.
    pub fn with_audit_sink(config: EngineConfig, audit_sink: Arc<dyn AuditSink>) -> Self {
        Self {
            config,
            metrics: Mutex::new(EngineMetrics::default()),
            init: tokio::sync::Mutex::new(false),
            audit_sink,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Prepare the engine's backends. Idempotent: repeat calls are no-ops.
    ///
    /// Called lazily by `synthesize_policy`, so callers only need this when
    /// they want the startup cost paid eagerly.
    pub async fn initialize(&self) {
        let mut done = self.init.lock().await;
        if *done {
            return;
        }
        tracing::info!("initializing synthesis engine");
        self.load_model_backends().await;
        self.prepare_validation_systems().await;
        self.prepare_consensus_mechanisms().await;
        *done = true;
        tracing::info!("synthesis engine ready");
    }

    /// Synthesize a policy artifact under the given risk strategy.
    ///
    /// Fail-fast: executor errors are recorded against the metrics and the
    /// audit trail, then propagated unmodified. No retry, no tier fallback.
    pub async fn synthesize_policy(
        &self,
        request: SynthesisRequest,
        strategy: RiskStrategy,
    ) -> Result<SynthesisResult, SynthesisError> {
        self.initialize().await;

        let executor = executor_for(strategy);
        let started = Instant::now();
        let outcome = executor.execute(&request, &self.config).await;
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(outcome) => {
                let synthesis_id = format!("SYN-{}", Uuid::new_v4());
                self.lock_metrics().record_success(latency_ms);
                self.audit_sink
                    .record(
                        SynthesisRecord::new(strategy)
                            .synthesis_id(synthesis_id.clone())
                            .latency(latency_ms)
                            .confidence(outcome.confidence_score),
                    )
                    .await;
                tracing::info!(
                    %synthesis_id,
                    strategy = strategy.as_str(),
                    latency_ms,
                    confidence = outcome.confidence_score,
                    "policy synthesized"
                );

                Ok(SynthesisResult {
                    synthesis_id,
                    policy_content: outcome.policy_content,
                    confidence_score: outcome.confidence_score,
                    risk_strategy_used: strategy,
                    processing_time_ms: latency_ms,
                    validation_results: outcome.validation_results,
                    recommendations: outcome.recommendations,
                    timestamp: Utc::now(),
                })
            }
            Err(err) => {
                self.lock_metrics().record_failure();
                self.audit_sink
                    .record(
                        SynthesisRecord::new(strategy)
                            .latency(latency_ms)
                            .error(err.code()),
                    )
                    .await;
                tracing::warn!(
                    strategy = strategy.as_str(),
                    error = %err,
                    "policy synthesis failed"
                );
                Err(err)
            }
        }
    }

    /// Like `synthesize_policy`, but takes the strategy's wire name.
    ///
    /// An unrecognized name is rejected before any dispatch happens, so it
    /// leaves the metrics untouched.
    pub async fn synthesize_policy_named(
        &self,
        request: SynthesisRequest,
        strategy: &str,
    ) -> Result<SynthesisResult, SynthesisError> {
        let strategy: RiskStrategy = match strategy.parse() {
            Ok(strategy) => strategy,
            Err(err) => {
                tracing::warn!(value = strategy, error = %err, "rejected synthesis request");
                return Err(err);
            }
        };
        self.synthesize_policy(request, strategy).await
    }

    /// Point-in-time copy of the engine's counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.lock_metrics().snapshot()
    }

    fn lock_metrics(&self) -> std::sync::MutexGuard<'_, EngineMetrics> {
        // A poisoned lock still holds valid counters; keep serving them.
        self.metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn load_model_backends(&self) {
        sleep(self.config.simulated_latency.init_stub()).await;
        tracing::debug!("model backends loaded");
    }

    async fn prepare_validation_systems(&self) {
        sleep(self.config.simulated_latency.init_stub()).await;
        tracing::debug!("validation systems ready");
    }

    async fn prepare_consensus_mechanisms(&self) {
        sleep(self.config.simulated_latency.init_stub()).await;
        tracing::debug!("consensus mechanisms ready");
    }
}
