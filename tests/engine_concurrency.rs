use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use govsynth::engine::{
    EngineConfig, RiskStrategy, SimulatedLatency, SynthesisEngine, SynthesisRequest,
};

fn shared_engine(base_unit: Duration) -> Arc<SynthesisEngine> {
    Arc::new(SynthesisEngine::new(EngineConfig {
        simulated_latency: SimulatedLatency { base_unit },
        ..EngineConfig::default()
    }))
}

#[tokio::test]
async fn ten_concurrent_standard_calls_all_count() {
    // A small nonzero delay keeps the calls genuinely in flight together.
    let engine = shared_engine(Duration::from_millis(10));

    let calls = (0..10).map(|i| {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            engine
                .synthesize_policy(
                    SynthesisRequest::new(format!("Policy {i}")),
                    RiskStrategy::Standard,
                )
                .await
        })
    });

    let mut ids = HashSet::new();
    for joined in join_all(calls).await {
        let result = joined.unwrap().unwrap();
        ids.insert(result.synthesis_id);
    }

    assert_eq!(ids.len(), 10, "ids must not collide");
    let snapshot = engine.metrics();
    assert_eq!(snapshot.total_syntheses, 10);
    assert_eq!(snapshot.success_rate, 1.0);
}

#[tokio::test]
async fn initialization_is_idempotent() {
    let engine = shared_engine(Duration::ZERO);

    engine.initialize().await;
    let before = engine.metrics();
    engine.initialize().await;
    let after = engine.metrics();

    assert_eq!(before.total_syntheses, after.total_syntheses);
    assert_eq!(before.failed_syntheses, after.failed_syntheses);

    let result = engine
        .synthesize_policy(SynthesisRequest::new("Post-init"), RiskStrategy::Standard)
        .await
        .unwrap();
    assert_eq!(result.confidence_score, 0.85);
}

#[tokio::test]
async fn concurrent_initialization_is_safe() {
    let engine = shared_engine(Duration::from_millis(5));

    let inits = (0..4).map(|_| {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.initialize().await })
    });
    for joined in join_all(inits).await {
        joined.unwrap();
    }

    assert_eq!(engine.metrics().total_syntheses, 0);
}

#[tokio::test]
async fn mixed_tier_concurrency_keeps_counts_exact() {
    let engine = shared_engine(Duration::from_millis(2));

    let calls = RiskStrategy::ALL.into_iter().cycle().take(12).map(|s| {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            engine
                .synthesize_policy(SynthesisRequest::new("Mixed"), s)
                .await
        })
    });

    for joined in join_all(calls).await {
        joined.unwrap().unwrap();
    }
    assert_eq!(engine.metrics().total_syntheses, 12);
}
