use finance_advisor::{
    advisor::{Advisor, LocalAdvisor, RemoteAdvisor},
    api::start_server,
    client::{session_store_from_config, AuthClient, BackendClient},
    config::AdvisorConfig,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables (.env included)
    let config = AdvisorConfig::from_env()?;

    info!("Finance Advisor - API Server");
    info!("Port: {}", config.api_port);

    // Use the backend when a remembered session still verifies
    let store = session_store_from_config(&config);
    let auth = AuthClient::new(&config, store)?;

    let advisor: Arc<dyn Advisor> = match auth.restore_session().await {
        Ok(Some(session)) => {
            info!(username = %session.profile.username, "Using backend advisor");
            let backend = BackendClient::new(&config)?.with_session(session);
            Arc::new(RemoteAdvisor::new(backend, &config))
        }
        Ok(None) => {
            info!("No stored session, using local advisor");
            Arc::new(LocalAdvisor::new(&config))
        }
        Err(e) => {
            warn!("Session restore failed, using local advisor: {}", e);
            Arc::new(LocalAdvisor::new(&config))
        }
    };

    info!("Starting API server...");
    start_server(advisor, config.api_port).await?;

    Ok(())
}
