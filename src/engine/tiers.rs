//! Tier executors: one handler per risk strategy.
//!
//! The four executors share a signature and are selected through
//! `executor_for`, so the dispatcher treats them as an opaque strategy
//! table. Each tier emits every validation checkpoint of the tiers below
//! it plus its own, which is what makes the checkpoint key sets nest.
//!
//! The checkpoint statuses are simulated: no model ensemble is polled and
//! no reviewer is paged. Real gating logic replaces these impls behind the
//! same trait.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::time::sleep;

use super::error::SynthesisError;
use super::strategy::RiskStrategy;
use super::types::{SynthesisRequest, TierOutcome};
use super::EngineConfig;

/// Agreement level reported by the simulated consensus round.
pub const CONSENSUS_AGREEMENT: f64 = 0.94;

/// A tier's synthesis handler.
#[async_trait]
pub trait TierExecutor: Send + Sync {
    /// The strategy this executor implements.
    fn strategy(&self) -> RiskStrategy;

    /// Synthesize a policy artifact for `request`.
    ///
    /// Must tolerate arbitrary request maps (defensive defaulting, never
    /// reject). The `Result` is the seam for real validation gates.
    async fn execute(
        &self,
        request: &SynthesisRequest,
        config: &EngineConfig,
    ) -> Result<TierOutcome, SynthesisError>;
}

/// Look up the executor for a strategy.
pub fn executor_for(strategy: RiskStrategy) -> &'static dyn TierExecutor {
    match strategy {
        RiskStrategy::Standard => &StandardExecutor,
        RiskStrategy::EnhancedValidation => &EnhancedValidationExecutor,
        RiskStrategy::MultiModelConsensus => &MultiModelConsensusExecutor,
        RiskStrategy::HumanReview => &HumanReviewExecutor,
    }
}

/// Basic synthesis with no extra scrutiny.
pub struct StandardExecutor;

/// Adds enhanced validation plus the constitutional compliance check.
pub struct EnhancedValidationExecutor;

/// Adds a simulated cross-model consensus round.
pub struct MultiModelConsensusExecutor;

/// Adds simulated human review and expert sign-off.
pub struct HumanReviewExecutor;

#[async_trait]
impl TierExecutor for StandardExecutor {
    fn strategy(&self) -> RiskStrategy {
        RiskStrategy::Standard
    }

    async fn execute(
        &self,
        request: &SynthesisRequest,
        config: &EngineConfig,
    ) -> Result<TierOutcome, SynthesisError> {
        let strategy = self.strategy();
        sleep(config.simulated_latency.for_strategy(strategy)).await;

        Ok(TierOutcome {
            policy_content: render_policy(request, strategy, config),
            confidence_score: strategy.confidence_score(),
            validation_results: standard_checkpoints(),
            recommendations: vec![
                "Review the synthesized policy with the owning governance team".to_string(),
                "Schedule a periodic revalidation of this policy".to_string(),
            ],
        })
    }
}

#[async_trait]
impl TierExecutor for EnhancedValidationExecutor {
    fn strategy(&self) -> RiskStrategy {
        RiskStrategy::EnhancedValidation
    }

    async fn execute(
        &self,
        request: &SynthesisRequest,
        config: &EngineConfig,
    ) -> Result<TierOutcome, SynthesisError> {
        let strategy = self.strategy();
        sleep(config.simulated_latency.for_strategy(strategy)).await;

        Ok(TierOutcome {
            policy_content: render_policy(request, strategy, config),
            confidence_score: strategy.confidence_score(),
            validation_results: enhanced_checkpoints(),
            recommendations: vec![
                "Review the synthesized policy with the owning governance team".to_string(),
                "Confirm constitutional compliance findings with the compliance office"
                    .to_string(),
                "Schedule a periodic revalidation of this policy".to_string(),
            ],
        })
    }
}

#[async_trait]
impl TierExecutor for MultiModelConsensusExecutor {
    fn strategy(&self) -> RiskStrategy {
        RiskStrategy::MultiModelConsensus
    }

    async fn execute(
        &self,
        request: &SynthesisRequest,
        config: &EngineConfig,
    ) -> Result<TierOutcome, SynthesisError> {
        let strategy = self.strategy();
        sleep(config.simulated_latency.for_strategy(strategy)).await;

        Ok(TierOutcome {
            policy_content: render_policy(request, strategy, config),
            confidence_score: strategy.confidence_score(),
            validation_results: consensus_checkpoints(),
            recommendations: vec![
                "Archive the consensus agreement record alongside the policy".to_string(),
                "Confirm constitutional compliance findings with the compliance office"
                    .to_string(),
                "Schedule a periodic revalidation of this policy".to_string(),
            ],
        })
    }
}

#[async_trait]
impl TierExecutor for HumanReviewExecutor {
    fn strategy(&self) -> RiskStrategy {
        RiskStrategy::HumanReview
    }

    async fn execute(
        &self,
        request: &SynthesisRequest,
        config: &EngineConfig,
    ) -> Result<TierOutcome, SynthesisError> {
        let strategy = self.strategy();
        sleep(config.simulated_latency.for_strategy(strategy)).await;

        Ok(TierOutcome {
            policy_content: render_policy(request, strategy, config),
            confidence_score: strategy.confidence_score(),
            validation_results: human_review_checkpoints(),
            recommendations: vec![
                "File the expert sign-off with the policy's audit trail".to_string(),
                "Archive the consensus agreement record alongside the policy".to_string(),
                "Schedule a periodic revalidation of this policy".to_string(),
            ],
        })
    }
}

fn standard_checkpoints() -> Map<String, Value> {
    let mut checkpoints = Map::new();
    checkpoints.insert("basic_validation".to_string(), Value::from("passed"));
    checkpoints
}

fn enhanced_checkpoints() -> Map<String, Value> {
    let mut checkpoints = standard_checkpoints();
    checkpoints.insert("enhanced_validation".to_string(), Value::from("passed"));
    checkpoints.insert("constitutional_check".to_string(), Value::from("compliant"));
    checkpoints
}

fn consensus_checkpoints() -> Map<String, Value> {
    let mut checkpoints = enhanced_checkpoints();
    checkpoints.insert("multi_model_consensus".to_string(), Value::from("achieved"));
    checkpoints.insert(
        "consensus_agreement".to_string(),
        Value::from(CONSENSUS_AGREEMENT),
    );
    checkpoints
}

fn human_review_checkpoints() -> Map<String, Value> {
    let mut checkpoints = consensus_checkpoints();
    checkpoints.insert("human_review".to_string(), Value::from("approved"));
    checkpoints.insert("expert_validation".to_string(), Value::from("confirmed"));
    checkpoints
}

fn render_policy(
    request: &SynthesisRequest,
    strategy: RiskStrategy,
    config: &EngineConfig,
) -> String {
    let title = request.title_or_default();
    let mut policy = format!(
        "# {title}\n\nSynthesized under the {strategy} strategy against constitution {hash}.\n",
        hash = config.constitutional_hash,
    );
    if let Some(description) = request.description.as_deref() {
        policy.push_str("\n## Intent\n\n");
        policy.push_str(description);
        policy.push('\n');
    }
    policy.push_str(&format!(
        "\n## Enforcement\n\nAll actions governed by \"{title}\" must satisfy the validation \
         checkpoints recorded with this artifact before taking effect.\n",
    ));
    policy
}
