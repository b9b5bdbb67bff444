use finance_advisor::{
    advisor::{Advisor, LocalAdvisor},
    config::AdvisorConfig,
    models::ScenarioInput,
};
use std::collections::BTreeMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AdvisorConfig::from_env()?;
    let advisor = LocalAdvisor::new(&config);

    // Scenario from a JSON file, or a sample one
    let input = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Loading scenario");
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str::<ScenarioInput>(&raw)?
        }
        None => sample_scenario(),
    };

    info!(
        months = input.projection_months,
        adjustments = input.category_adjustments.len(),
        "Running simulation"
    );

    match advisor.analyze_simulation(&input).await {
        Ok(analysis) => {
            println!("\n=== SIMULATION ANALYSIS ===");
            println!("Analysis ID: {}", analysis.analysis_id);
            println!("Tier: {}", analysis.tier);
            println!();
            println!("{}", analysis.report);
            Ok(())
        }
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}

fn sample_scenario() -> ScenarioInput {
    ScenarioInput {
        monthly_income: 20000.0,
        current_expenses: 15000.0,
        category_adjustments: BTreeMap::from([
            ("food".to_string(), -20.0),
            ("entertainment".to_string(), -30.0),
        ]),
        category_breakdown: BTreeMap::from([
            ("food".to_string(), 5000.0),
            ("entertainment".to_string(), 2000.0),
            ("rent".to_string(), 8000.0),
        ]),
        projection_months: 6,
    }
}
