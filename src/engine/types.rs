//! Request/response types for policy synthesis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::strategy::RiskStrategy;

/// Title used when the caller supplies none.
pub const UNTITLED: &str = "Untitled";

/// A policy synthesis request.
///
/// Deliberately loose: any context map is accepted and no schema is
/// enforced. Executors default missing fields rather than reject them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Human-readable policy title.
    #[serde(default)]
    pub title: Option<String>,

    /// Free-form description of the desired policy.
    #[serde(default)]
    pub description: Option<String>,

    /// Opaque caller-supplied context, passed through untouched.
    #[serde(flatten)]
    pub context: Map<String, Value>,
}

impl SynthesisRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn context_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Title to synthesize against, defaulting when absent or blank.
    pub fn title_or_default(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => UNTITLED,
        }
    }
}

/// Output of a single tier executor, before the dispatcher wraps it.
#[derive(Debug, Clone)]
pub struct TierOutcome {
    /// Synthesized policy text.
    pub policy_content: String,
    /// Confidence in the artifact, in [0, 1].
    pub confidence_score: f64,
    /// Named validation checkpoints and their statuses. Keys accumulate
    /// as tier strictness increases.
    pub validation_results: Map<String, Value>,
    /// Human-readable follow-up recommendations.
    pub recommendations: Vec<String>,
}

/// The uniform result envelope returned by `synthesize_policy`.
///
/// JSON-serializable as-is; the surrounding service layer returns it to
/// clients without reshaping.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisResult {
    /// Unique id for this synthesis ("SYN-" + UUID v4).
    pub synthesis_id: String,
    /// Synthesized policy text.
    pub policy_content: String,
    /// Confidence in the artifact, in [0, 1].
    pub confidence_score: f64,
    /// Tier the artifact was synthesized under.
    pub risk_strategy_used: RiskStrategy,
    /// Wall-clock time spent in the tier executor.
    pub processing_time_ms: f64,
    /// Validation checkpoints attached by the executor; consumed downstream
    /// as an audit trail.
    pub validation_results: Map<String, Value>,
    /// Human-readable follow-up recommendations.
    pub recommendations: Vec<String>,
    /// When the synthesis completed (UTC, serialized as ISO-8601).
    pub timestamp: DateTime<Utc>,
}
