use std::collections::BTreeSet;

use serde_json::{json, Value};

use govsynth::engine::{
    EngineConfig, RiskStrategy, SimulatedLatency, SynthesisEngine, SynthesisRequest,
};

fn test_engine() -> SynthesisEngine {
    SynthesisEngine::new(EngineConfig {
        simulated_latency: SimulatedLatency::zero(),
        ..EngineConfig::default()
    })
}

#[tokio::test]
async fn confidence_increases_with_tier_strictness() {
    let engine = test_engine();
    let mut scores = Vec::new();
    for strategy in RiskStrategy::ALL {
        let result = engine
            .synthesize_policy(SynthesisRequest::new("Access Control Policy"), strategy)
            .await
            .unwrap();
        scores.push(result.confidence_score);
    }

    assert_eq!(scores, vec![0.85, 0.92, 0.96, 0.98]);
    for pair in scores.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[tokio::test]
async fn validation_keys_nest_across_tiers() {
    let engine = test_engine();
    let mut previous: Option<BTreeSet<String>> = None;
    for strategy in RiskStrategy::ALL {
        let result = engine
            .synthesize_policy(SynthesisRequest::default(), strategy)
            .await
            .unwrap();
        let keys: BTreeSet<String> = result.validation_results.keys().cloned().collect();
        if let Some(prev) = &previous {
            assert!(
                prev.is_subset(&keys),
                "{} dropped checkpoints: {prev:?} vs {keys:?}",
                strategy
            );
            assert!(keys.len() > prev.len(), "{strategy} added no checkpoints");
        }
        previous = Some(keys);
    }
}

#[tokio::test]
async fn standard_tier_example_scenario() {
    let engine = test_engine();
    let result = engine
        .synthesize_policy(
            SynthesisRequest::new("Data Retention Policy"),
            RiskStrategy::Standard,
        )
        .await
        .unwrap();

    assert!(result.policy_content.contains("Data Retention Policy"));
    assert_eq!(result.confidence_score, 0.85);
    assert_eq!(result.risk_strategy_used, RiskStrategy::Standard);
    assert_eq!(
        Value::Object(result.validation_results.clone()),
        json!({ "basic_validation": "passed" })
    );
    assert_eq!(result.recommendations.len(), 2);
    assert!(result.synthesis_id.starts_with("SYN-"));
}

#[tokio::test]
async fn empty_request_at_human_review_defaults_title() {
    let engine = test_engine();
    let result = engine
        .synthesize_policy(SynthesisRequest::default(), RiskStrategy::HumanReview)
        .await
        .unwrap();

    assert!(result.policy_content.contains("Untitled"));
    assert_eq!(result.confidence_score, 0.98);
    for key in [
        "basic_validation",
        "enhanced_validation",
        "constitutional_check",
        "multi_model_consensus",
        "consensus_agreement",
        "human_review",
        "expert_validation",
    ] {
        assert!(
            result.validation_results.contains_key(key),
            "missing checkpoint {key}"
        );
    }
    assert_eq!(
        result.validation_results.get("human_review"),
        Some(&Value::from("approved"))
    );
    assert_eq!(
        result.validation_results.get("expert_validation"),
        Some(&Value::from("confirmed"))
    );
}

#[tokio::test]
async fn total_syntheses_counts_every_tier() {
    let engine = test_engine();
    for strategy in RiskStrategy::ALL {
        engine
            .synthesize_policy(SynthesisRequest::new("Audit Logging Policy"), strategy)
            .await
            .unwrap();
    }

    let snapshot = engine.metrics();
    assert_eq!(snapshot.total_syntheses, 4);
    assert_eq!(snapshot.failed_syntheses, 0);
    assert_eq!(snapshot.success_rate, 1.0);
}

#[tokio::test]
async fn unknown_strategy_is_rejected_without_touching_metrics() {
    let engine = test_engine();
    let err = engine
        .synthesize_policy_named(SynthesisRequest::new("P"), "maximum_paranoia")
        .await
        .unwrap_err();

    assert_eq!(err.code(), "unknown_strategy");
    let snapshot = engine.metrics();
    assert_eq!(snapshot.total_syntheses, 0);
    assert_eq!(snapshot.failed_syntheses, 0);
}

#[tokio::test]
async fn named_dispatch_accepts_all_wire_names() {
    let engine = test_engine();
    for name in [
        "standard",
        "enhanced_validation",
        "multi_model_consensus",
        "human_review",
    ] {
        let result = engine
            .synthesize_policy_named(SynthesisRequest::new("Wire Policy"), name)
            .await
            .unwrap();
        assert_eq!(result.risk_strategy_used.as_str(), name);
    }
}

#[tokio::test]
async fn synthesis_ids_are_unique() {
    let engine = test_engine();
    let a = engine
        .synthesize_policy(SynthesisRequest::new("A"), RiskStrategy::Standard)
        .await
        .unwrap();
    let b = engine
        .synthesize_policy(SynthesisRequest::new("B"), RiskStrategy::Standard)
        .await
        .unwrap();
    assert_ne!(a.synthesis_id, b.synthesis_id);
}

#[tokio::test]
async fn result_envelope_serializes_completely() {
    let engine = test_engine();
    let result = engine
        .synthesize_policy(
            SynthesisRequest::new("Incident Response Policy"),
            RiskStrategy::EnhancedValidation,
        )
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    for field in [
        "synthesis_id",
        "policy_content",
        "confidence_score",
        "risk_strategy_used",
        "processing_time_ms",
        "validation_results",
        "recommendations",
        "timestamp",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(json["risk_strategy_used"], "enhanced_validation");
}
