#![forbid(unsafe_code)]

//! # govsynth
//!
//! Risk-tiered policy synthesis for constitutional governance workflows.
//!
//! A synthesis request enters at one of four escalating scrutiny tiers
//! (standard, enhanced validation, multi-model consensus, human review).
//! The dispatcher routes it to the tier's executor, which produces a policy
//! artifact together with a confidence score and an accumulating map of
//! validation checkpoints; the engine stamps the result envelope, tracks
//! running metrics, and records every dispatch to an audit sink.
//!
//! Higher tiers never report lower confidence and never drop checkpoints:
//! escalation only adds scrutiny. The tier executors currently simulate
//! their checks (no model ensemble is polled, no reviewer is paged); the
//! `TierExecutor` trait is the seam where real gating logic lands.

pub mod audit;
pub mod engine;

pub use audit::{AuditSink, NoopAuditSink, StderrAuditSink, SynthesisRecord, SynthesisStatus};
pub use engine::{
    EngineConfig, MetricsSnapshot, RiskStrategy, SimulatedLatency, SynthesisEngine,
    SynthesisError, SynthesisRequest, SynthesisResult, TierExecutor, TierOutcome,
    DEFAULT_CONSTITUTIONAL_HASH,
};
