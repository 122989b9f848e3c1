//! Risk strategy tiers for policy synthesis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SynthesisError;

/// Escalating scrutiny tiers for a synthesis request.
///
/// Ordered by increasing strictness: every tier runs all the validation
/// checkpoints of the tiers below it plus its own. The caller picks the
/// tier; this engine performs no risk inference of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStrategy {
    /// Basic validation only.
    Standard,
    /// Adds enhanced validation and a constitutional compliance check.
    EnhancedValidation,
    /// Adds cross-model consensus on top of enhanced validation.
    MultiModelConsensus,
    /// Adds human review and expert sign-off on top of consensus.
    HumanReview,
}

impl RiskStrategy {
    /// All tiers, lowest scrutiny first.
    pub const ALL: [RiskStrategy; 4] = [
        RiskStrategy::Standard,
        RiskStrategy::EnhancedValidation,
        RiskStrategy::MultiModelConsensus,
        RiskStrategy::HumanReview,
    ];

    /// Wire name used by callers (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStrategy::Standard => "standard",
            RiskStrategy::EnhancedValidation => "enhanced_validation",
            RiskStrategy::MultiModelConsensus => "multi_model_consensus",
            RiskStrategy::HumanReview => "human_review",
        }
    }

    /// Confidence score attached to artifacts synthesized at this tier.
    ///
    /// Strictly increasing with tier strictness; downstream consumers rely
    /// on this ordering when deciding whether to escalate.
    pub fn confidence_score(&self) -> f64 {
        match self {
            RiskStrategy::Standard => 0.85,
            RiskStrategy::EnhancedValidation => 0.92,
            RiskStrategy::MultiModelConsensus => 0.96,
            RiskStrategy::HumanReview => 0.98,
        }
    }

    /// Simulated-latency multiplier applied to the engine's base unit.
    ///
    /// Stands in for the real model/review round-trips each tier would
    /// make; see `SimulatedLatency`.
    pub fn latency_factor(&self) -> f64 {
        match self {
            RiskStrategy::Standard => 0.5,
            RiskStrategy::EnhancedValidation => 1.0,
            RiskStrategy::MultiModelConsensus => 2.0,
            RiskStrategy::HumanReview => 3.0,
        }
    }
}

impl FromStr for RiskStrategy {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(RiskStrategy::Standard),
            "enhanced_validation" => Ok(RiskStrategy::EnhancedValidation),
            "multi_model_consensus" => Ok(RiskStrategy::MultiModelConsensus),
            "human_review" => Ok(RiskStrategy::HumanReview),
            other => Err(SynthesisError::unknown_strategy(other)),
        }
    }
}

impl fmt::Display for RiskStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
