#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use govsynth::audit::{NoopAuditSink, StderrAuditSink};
use govsynth::engine::{
    EngineConfig, RiskStrategy, SimulatedLatency, SynthesisEngine, SynthesisRequest,
};

#[derive(Parser)]
#[command(name = "govsynth", version, about = "Risk-tiered policy synthesis CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a single policy and print the result envelope as JSON
    Synthesize {
        /// Policy title
        #[arg(long)]
        title: Option<String>,
        /// Free-text description of the desired policy
        #[arg(long)]
        description: Option<String>,
        /// Risk strategy wire name (standard, enhanced_validation,
        /// multi_model_consensus, human_review)
        #[arg(long, default_value = "standard")]
        strategy: String,
        /// Extra request context as a JSON object
        #[arg(long)]
        context: Option<String>,
        /// Simulated-latency base unit in milliseconds
        #[arg(long, default_value_t = 1000)]
        latency_unit_ms: u64,
        /// Stream audit records to stderr as JSON lines
        #[arg(long)]
        audit: bool,
    },
    /// List the four risk strategies with their confidence floors
    Strategies,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Synthesize {
            title,
            description,
            strategy,
            context,
            latency_unit_ms,
            audit,
        } => {
            let mut request = SynthesisRequest {
                title,
                description,
                ..SynthesisRequest::default()
            };
            if let Some(raw) = context {
                request.context = serde_json::from_str(&raw)
                    .map_err(|e| format!("invalid --context JSON: {e}"))?;
            }

            let config = EngineConfig {
                simulated_latency: SimulatedLatency {
                    base_unit: Duration::from_millis(latency_unit_ms),
                },
                ..EngineConfig::default()
            };
            let engine = if audit {
                SynthesisEngine::with_audit_sink(config, Arc::new(StderrAuditSink))
            } else {
                SynthesisEngine::with_audit_sink(config, Arc::new(NoopAuditSink))
            };

            let result = engine.synthesize_policy_named(request, &strategy).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Strategies => {
            for strategy in RiskStrategy::ALL {
                println!(
                    "{:<22} confidence={:.2} latency_factor={:.1}",
                    strategy.as_str(),
                    strategy.confidence_score(),
                    strategy.latency_factor(),
                );
            }
        }
    }

    Ok(())
}
