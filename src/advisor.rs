//! Advisor seam
//!
//! `LocalAdvisor` computes everything in-process; `RemoteAdvisor` takes the
//! numbers from the backend and classifies and narrates them locally.

use crate::assistant::{self, IntentClassifier};
use crate::classifier::{classify_result, Tier};
use crate::client::BackendClient;
use crate::config::AdvisorConfig;
use crate::models::{Metrics, ScenarioInput, ScenarioResult};
use crate::recommendations::build_recommendations;
use crate::report::{ReportGenerator, TemplateRegistry};
use crate::scenario::{self, Horizon};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// A classified and narrated simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationAnalysis {
    pub analysis_id: Uuid,
    pub result: ScenarioResult,
    pub tier: Tier,
    pub report: String,
    pub generated_at: DateTime<Utc>,
}

/// Trait for advisory backends
#[async_trait::async_trait]
pub trait Advisor: Send + Sync {
    async fn analyze_simulation(&self, input: &ScenarioInput) -> Result<SimulationAnalysis>;
    async fn recommendations(&self, metrics: &Metrics) -> Result<Vec<String>>;
    async fn answer(&self, message: &str, metrics: Option<&Metrics>) -> Result<String>;
}

/// Rule-based advisor that never leaves the process
pub struct LocalAdvisor {
    generator: ReportGenerator,
    currency: String,
    latency: Duration,
}

impl LocalAdvisor {
    pub fn new(config: &AdvisorConfig) -> Self {
        Self {
            generator: ReportGenerator::new(
                TemplateRegistry::default(),
                config.currency.clone(),
                config.max_horizon_months,
            ),
            currency: config.currency.clone(),
            latency: config.latency,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Synchronous core of `analyze_simulation`
    pub fn analyze(&self, input: &ScenarioInput) -> Result<SimulationAnalysis> {
        let result = scenario::project(input, self.generator.max_horizon_months())?;
        analysis_for(&self.generator, result)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            debug!(latency_ms = self.latency.as_millis() as u64, "Simulating advisor latency");
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for LocalAdvisor {
    fn default() -> Self {
        Self::new(&AdvisorConfig::default())
    }
}

#[async_trait::async_trait]
impl Advisor for LocalAdvisor {
    async fn analyze_simulation(&self, input: &ScenarioInput) -> Result<SimulationAnalysis> {
        self.simulate_latency().await;
        self.analyze(input)
    }

    async fn recommendations(&self, metrics: &Metrics) -> Result<Vec<String>> {
        self.simulate_latency().await;
        Ok(build_recommendations(metrics))
    }

    async fn answer(&self, message: &str, metrics: Option<&Metrics>) -> Result<String> {
        self.simulate_latency().await;
        let intent = IntentClassifier::classify(message);
        debug!(?intent, has_metrics = metrics.is_some(), "Answering question");
        Ok(assistant::render(intent, metrics, &self.currency))
    }
}

/// Advisor backed by the finance backend
pub struct RemoteAdvisor {
    backend: BackendClient,
    generator: ReportGenerator,
}

impl RemoteAdvisor {
    pub fn new(backend: BackendClient, config: &AdvisorConfig) -> Self {
        Self {
            backend,
            generator: ReportGenerator::new(
                TemplateRegistry::default(),
                config.currency.clone(),
                config.max_horizon_months,
            ),
        }
    }
}

#[async_trait::async_trait]
impl Advisor for RemoteAdvisor {
    async fn analyze_simulation(&self, input: &ScenarioInput) -> Result<SimulationAnalysis> {
        // Reject bad horizons before spending a round trip
        Horizon::with_max(input.projection_months, self.generator.max_horizon_months())?;

        let simulation = self
            .backend
            .run_simulation(&input.category_adjustments, input.projection_months)
            .await?;
        let result = scenario::from_simulation(&simulation, input)?;
        analysis_for(&self.generator, result)
    }

    async fn recommendations(&self, _metrics: &Metrics) -> Result<Vec<String>> {
        self.backend.get_recommendations().await
    }

    async fn answer(&self, message: &str, _metrics: Option<&Metrics>) -> Result<String> {
        self.backend.chat(message).await
    }
}

fn analysis_for(generator: &ReportGenerator, result: ScenarioResult) -> Result<SimulationAnalysis> {
    let tier = classify_result(&result);
    let horizon = Horizon::with_max(result.projection_months, generator.max_horizon_months())?;
    let report = generator.generate(tier, horizon, &result)?;

    let analysis = SimulationAnalysis {
        analysis_id: Uuid::new_v4(),
        result,
        tier,
        report,
        generated_at: Utc::now(),
    };

    info!(
        analysis_id = %analysis.analysis_id,
        tier = %analysis.tier,
        severity = analysis.tier.severity(),
        months = analysis.result.projection_months,
        delta = analysis.result.delta,
        "Simulation classified"
    );
    Ok(analysis)
}
