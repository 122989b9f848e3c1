//! Audit trail via the AuditSink trait.
//!
//! The engine logs every dispatch through an AuditSink. This decouples the
//! engine from any specific storage backend:
//! - Services persist records to their audit store
//! - The CLI uses StderrAuditSink to stream JSON lines
//! - Tests use NoopAuditSink or a capturing sink

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::RiskStrategy;

/// Outcome of a synthesis dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisStatus {
    Success,
    Error,
}

impl SynthesisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisStatus::Success => "success",
            SynthesisStatus::Error => "error",
        }
    }
}

/// Record of a single synthesis dispatch for the audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisRecord {
    /// Strategy tier the dispatch ran under.
    pub strategy: RiskStrategy,
    /// Synthesis id, absent when the dispatch failed before minting one.
    pub synthesis_id: Option<String>,
    /// Dispatch outcome.
    pub status: SynthesisStatus,
    /// Error code if status is Error.
    pub error_code: Option<String>,
    /// Executor latency in milliseconds.
    pub latency_ms: f64,
    /// Confidence of the produced artifact, if any.
    pub confidence_score: Option<f64>,
    /// When the dispatch completed.
    pub timestamp: DateTime<Utc>,
}

impl SynthesisRecord {
    /// Create a success-shaped record with required fields, defaulting others.
    pub fn new(strategy: RiskStrategy) -> Self {
        Self {
            strategy,
            synthesis_id: None,
            status: SynthesisStatus::Success,
            error_code: None,
            latency_ms: 0.0,
            confidence_score: None,
            timestamp: Utc::now(),
        }
    }

    pub fn synthesis_id(mut self, id: impl Into<String>) -> Self {
        self.synthesis_id = Some(id.into());
        self
    }

    pub fn latency(mut self, ms: f64) -> Self {
        self.latency_ms = ms;
        self
    }

    pub fn confidence(mut self, score: f64) -> Self {
        self.confidence_score = Some(score);
        self
    }

    pub fn error(mut self, code: impl Into<String>) -> Self {
        self.status = SynthesisStatus::Error;
        self.error_code = Some(code.into());
        self
    }
}

/// Trait for recording synthesis dispatches.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record a dispatch. This should be fire-and-forget: failures should
    /// be logged but not propagated.
    async fn record(&self, record: SynthesisRecord);
}

/// No-op audit sink that discards all records.
/// Useful for embedding and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

#[async_trait]
impl AuditSink for NoopAuditSink {
    async fn record(&self, _record: SynthesisRecord) {
        // Discard
    }
}

/// Audit sink that writes each record to stderr as a JSON line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

#[async_trait]
impl AuditSink for StderrAuditSink {
    async fn record(&self, record: SynthesisRecord) {
        match serde_json::to_string(&record) {
            Ok(line) => eprintln!("{line}"),
            Err(err) => tracing::warn!(error = %err, "failed to serialize audit record"),
        }
    }
}
